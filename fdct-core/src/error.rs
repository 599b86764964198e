//! Error types for fdct-core.

use std::collections::TryReserveError;

use thiserror::Error;

/// Errors reported by the transform engine and its configuration.
#[derive(Debug, Error)]
pub enum FdctError {
    /// A transform was requested with an exponent outside `[min, max]`.
    #[error("transform exponent {n} out of range [{min}, {max}]")]
    ExponentOutOfRange {
        /// The rejected exponent.
        n: u32,
        /// Smallest accepted exponent.
        min: u32,
        /// Largest accepted exponent (the engine's configured maximum).
        max: u32,
    },

    /// The engine was configured with an unsupported maximum exponent.
    #[error("maximum exponent {0} out of range [{min}, {max}]", min = crate::MIN_EXPONENT, max = crate::MAX_EXPONENT)]
    MaxExponentOutOfRange(u32),

    /// The sample, scratch or table storage could not be reserved.
    #[error("buffer allocation failed: {0}")]
    Allocation(#[from] TryReserveError),

    /// More samples were supplied than the sample buffer holds.
    #[error("{len} samples do not fit a buffer of {capacity}")]
    BufferOverflow {
        /// Number of samples offered.
        len: usize,
        /// Capacity of the sample buffer.
        capacity: usize,
    },

    /// Reading or writing a config file failed.
    #[error("config i/o: {0}")]
    Io(#[from] std::io::Error),

    /// A config file was not valid JSON for [`crate::FdctConfig`].
    #[error("config format: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, FdctError>;
