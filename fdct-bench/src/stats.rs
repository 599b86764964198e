//! Error statistics of a forward -> inverse cycle.

use serde::{Deserialize, Serialize};

/// How far a reconstructed frame strays from the original.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ErrorStats {
    /// Peak-to-peak range of the original frame.
    pub peak_to_peak: i32,
    /// Standard deviation of the per-sample error.
    pub std_dev: f64,
    /// `20·log10(std_dev / peak_to_peak)`, in dB relative to full range.
    pub snr_db: f64,
    /// Largest absolute per-sample error.
    pub max_abs_error: u32,
}

impl ErrorStats {
    /// Compares `restored` against `original` sample by sample.
    ///
    /// # Arguments
    /// * `original` - Frame fed to the forward transform
    /// * `restored` - Frame after inverse transform and rescaling
    pub fn compute(original: &[i32], restored: &[i32]) -> Self {
        let len = original.len().min(restored.len());
        if len == 0 {
            return Self {
                peak_to_peak: 0,
                std_dev: 0.0,
                snr_db: f64::NEG_INFINITY,
                max_abs_error: 0,
            };
        }

        let (min, max) = original[..len]
            .iter()
            .fold((i32::MAX, i32::MIN), |(lo, hi), &s| (lo.min(s), hi.max(s)));
        let peak_to_peak = max - min;

        let mut acc = 0.0;
        let mut max_abs_error = 0;
        for (&a, &b) in original.iter().zip(restored) {
            let diff = b - a;
            acc += (diff as f64) * (diff as f64);
            max_abs_error = max_abs_error.max(diff.unsigned_abs());
        }
        let std_dev = (acc / len as f64).sqrt();

        Self {
            peak_to_peak,
            std_dev,
            snr_db: 20.0 * (std_dev / peak_to_peak.max(1) as f64).log10(),
            max_abs_error,
        }
    }
}
