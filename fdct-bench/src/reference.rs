//! # Floating-Point Reference Module
//!
//! A double-precision DCT-II built on RustFFT, used to measure how far the
//! integer coefficients drift from the exact transform.

use std::sync::Arc;

use rustfft::{Fft, FftPlanner, num_complex::Complex};

/// Unnormalised DCT-II of a fixed length,
/// `X[k] = Σ x[i]·cos(π(2i+1)k / 2N)`, the same scale the integer forward
/// transform produces.
pub struct ReferenceDct {
    len: usize,
    fft: Arc<dyn Fft<f64>>,
    buffer: Vec<Complex<f64>>,
    twiddles: Vec<Complex<f64>>,
}

impl ReferenceDct {
    /// Plans a transform of `len` samples (an FFT of `2·len`).
    pub fn new(len: usize) -> Self {
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(2 * len);
        let twiddles = (0..len)
            .map(|k| {
                let angle = -std::f64::consts::PI * k as f64 / (2 * len) as f64;
                Complex::from_polar(0.5, angle)
            })
            .collect();

        Self {
            len,
            fft,
            buffer: vec![Complex::new(0.0, 0.0); 2 * len],
            twiddles,
        }
    }

    /// Transforms `x` (exactly `len` samples) via the FFT of its even
    /// extension `[x, reverse(x)]`.
    ///
    /// # Panics
    /// * If `x.len()` differs from the planned length
    pub fn process(&mut self, x: &[i32]) -> Vec<f64> {
        assert_eq!(x.len(), self.len, "reference length mismatch");

        for (slot, &s) in self.buffer.iter_mut().zip(x.iter().chain(x.iter().rev())) {
            *slot = Complex::new(s as f64, 0.0);
        }
        self.fft.process(&mut self.buffer);

        self.buffer
            .iter()
            .zip(&self.twiddles)
            .map(|(v, w)| (*v * *w).re)
            .collect()
    }
}

/// RMS of `fixed - reference` relative to the RMS of `reference`, in dB.
pub fn relative_error_db(fixed: &[i32], reference: &[f64]) -> f64 {
    let (err, power) = fixed
        .iter()
        .zip(reference)
        .fold((0.0, 0.0), |(err, power), (&a, &b)| {
            let d = a as f64 - b;
            (err + d * d, power + b * b)
        });
    if power == 0.0 {
        return if err == 0.0 { f64::NEG_INFINITY } else { f64::INFINITY };
    }
    10.0 * (err / power).log10()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn direct_dct(x: &[i32]) -> Vec<f64> {
        let len = x.len();
        (0..len)
            .map(|k| {
                x.iter()
                    .enumerate()
                    .map(|(i, &s)| {
                        let phase = std::f64::consts::PI * (2 * i + 1) as f64 * k as f64 / (2 * len) as f64;
                        s as f64 * phase.cos()
                    })
                    .sum()
            })
            .collect()
    }

    #[test]
    fn matches_direct_sum() {
        let x: Vec<i32> = (0..64).map(|i| ((i * 37) % 101) - 50).collect();
        let mut reference = ReferenceDct::new(64);
        let fast = reference.process(&x);
        for (k, (a, b)) in fast.iter().zip(direct_dct(&x)).enumerate() {
            assert!((a - b).abs() < 1e-6, "bin {k}: {a} vs {b}");
        }
    }

    #[test]
    fn reusable_across_frames() {
        let mut reference = ReferenceDct::new(8);
        let first = reference.process(&[1, 2, 3, 4, 5, 6, 7, 8]);
        reference.process(&[0; 8]);
        let again = reference.process(&[1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(first, again);
        assert!((first[0] - 36.0).abs() < 1e-9);
    }

    #[test]
    fn relative_error_in_db() {
        assert!((relative_error_db(&[11, 0], &[10.0, 0.0]) + 20.0).abs() < 1e-9);
        assert_eq!(relative_error_db(&[0, 0], &[0.0, 0.0]), f64::NEG_INFINITY);
    }
}
