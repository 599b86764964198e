//! Engine configuration and its JSON persistence.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{FdctError, Result};
use crate::{MAX_EXPONENT, MIN_EXPONENT};

/// Construction-time settings for [`crate::Fdct`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FdctConfig {
    /// Largest transform exponent the engine accepts; buffers hold
    /// `2^max_exponent` samples.
    pub max_exponent: u32,
}

impl Default for FdctConfig {
    fn default() -> Self {
        Self {
            max_exponent: MAX_EXPONENT,
        }
    }
}

impl FdctConfig {
    pub fn new(max_exponent: u32) -> Self {
        Self { max_exponent }
    }

    /// Checks `max_exponent` against `[MIN_EXPONENT, MAX_EXPONENT]`.
    pub fn validate(&self) -> Result<()> {
        if (MIN_EXPONENT..=MAX_EXPONENT).contains(&self.max_exponent) {
            Ok(())
        } else {
            Err(FdctError::MaxExponentOutOfRange(self.max_exponent))
        }
    }

    /// Sample capacity implied by this config.
    pub fn capacity(&self) -> usize {
        1 << self.max_exponent
    }

    /// Loads a config from a JSON file.
    ///
    /// Missing fields fall back to their defaults; the result is validated.
    ///
    /// # Arguments
    /// * `path` - JSON file to read (e.g., "fdct.json")
    ///
    /// # Returns
    /// * `Ok(FdctConfig)` - Parsed and validated config
    /// * `Err(FdctError)` - I/O, JSON or range error
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let mut file = File::open(path)?;
        let mut data = String::new();
        file.read_to_string(&mut data)?;
        let config: FdctConfig = serde_json::from_str(&data)?;
        config.validate()?;
        Ok(config)
    }

    /// Saves the config as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json_string = serde_json::to_string_pretty(self)?;
        let mut file = File::create(path)?;
        file.write_all(json_string.as_bytes())?;
        Ok(())
    }
}
