//! # Synthetic Signal Module
//!
//! Test signals for the transform: a fixed mix of integer-period sinusoids
//! with fresh uniform noise added on every frame, and quantisation of
//! floating-point audio to 12-bit integers for the live path.

use anyhow::{Result, ensure};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Largest magnitude of a 12-bit signed sample.
pub const SAMPLE_MAX: i32 = 2047;

/// Widest accepted noise band, 16 times the 12-bit range.
pub const MAX_NOISE_SPAN: u32 = 1 << 16;

/// Parameters of the synthetic test signal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalSpec {
    /// Periods of the sinusoids, in samples.
    pub periods: Vec<f64>,
    /// Amplitude of each sinusoid.
    pub amplitude: f64,
    /// Width of the uniform noise band, centred on zero.
    pub noise_span: u32,
    /// Seed of the noise generator.
    pub seed: u64,
}

impl Default for SignalSpec {
    fn default() -> Self {
        Self {
            periods: vec![11.0, 133.0],
            amplitude: 1024.0,
            noise_span: 1024,
            seed: 0xCAFE_C0DE,
        }
    }
}

/// Produces frames of `clean + noise`; the clean part is computed once.
pub struct SignalGenerator {
    clean: Vec<i32>,
    noise_span: u32,
    rng: StdRng,
}

impl SignalGenerator {
    /// Builds a generator for frames of `len` samples.
    ///
    /// # Returns
    /// * `Err(e)` - `noise_span` is wider than [`MAX_NOISE_SPAN`]
    pub fn new(spec: &SignalSpec, len: usize) -> Result<Self> {
        ensure!(
            spec.noise_span <= MAX_NOISE_SPAN,
            "noise span {} exceeds {MAX_NOISE_SPAN}",
            spec.noise_span
        );
        let clean = (0..len)
            .map(|i| {
                spec.periods
                    .iter()
                    .map(|&period| {
                        let phase = 2.0 * std::f64::consts::PI / period * i as f64;
                        (0.5 + spec.amplitude * phase.sin()) as i32
                    })
                    .sum::<i32>()
            })
            .collect();

        Ok(Self {
            clean,
            noise_span: spec.noise_span,
            rng: StdRng::seed_from_u64(spec.seed),
        })
    }

    /// Next frame: the clean signal plus a new draw of noise.
    pub fn next_frame(&mut self) -> Vec<i32> {
        let span = self.noise_span as i32;
        if span == 0 {
            return self.clean.clone();
        }
        let half = span / 2;
        self.clean
            .iter()
            .map(|&s| s + self.rng.gen_range(0..span) - half)
            .collect()
    }
}

/// Maps `[-1.0, 1.0]` audio onto 12-bit integers, clipping anything louder.
#[cfg_attr(not(feature = "live"), allow(dead_code))]
pub fn quantize_12bit(frame: &[f32]) -> Vec<i32> {
    frame
        .iter()
        .map(|&x| {
            let scaled = (x * SAMPLE_MAX as f32).round() as i32;
            scaled.clamp(-SAMPLE_MAX - 1, SAMPLE_MAX)
        })
        .collect()
}
