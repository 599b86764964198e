//! Signal generators and a floating-point reference shared by the
//! integration tests.

#![allow(dead_code)]

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rustfft::{FftPlanner, num_complex::Complex};

/// Full scale of a 12-bit converter.
pub const FULL_SCALE: f64 = 4096.0;

/// Two integer-period sinusoids of amplitude 1024 plus uniform noise in
/// `[-512, 512)`: the mix the benchmark harness feeds the engine.
pub fn tone_mix_with_noise(len: usize, seed: u64) -> Vec<i32> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..len)
        .map(|i| {
            let t = i as f64;
            let a = (0.5 + 1024.0 * (2.0 * std::f64::consts::PI / 11.0 * t).sin()) as i32;
            let b = (0.5 + 1024.0 * (2.0 * std::f64::consts::PI / 133.0 * t).sin()) as i32;
            a + b + rng.gen_range(0..1024) - 512
        })
        .collect()
}

/// Uniform 12-bit samples.
pub fn uniform_12bit(len: usize, seed: u64) -> Vec<i32> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..len).map(|_| rng.gen_range(-2048..2048)).collect()
}

/// Cosine sitting exactly on DCT-II bin `k0`.
pub fn bin_centred_cosine(len: usize, k0: usize, amplitude: f64) -> Vec<i32> {
    (0..len)
        .map(|i| {
            let phase = std::f64::consts::PI * (2 * i + 1) as f64 * k0 as f64 / (2 * len) as f64;
            (amplitude * phase.cos()).round() as i32
        })
        .collect()
}

/// Unnormalised DCT-II, `X[k] = Σ x[i]·cos(π(2i+1)k / 2N)`, via an FFT of
/// the even extension of `x`.
pub fn reference_dct(x: &[i32]) -> Vec<f64> {
    let len = x.len();
    let mut buffer: Vec<Complex<f64>> = x
        .iter()
        .chain(x.iter().rev())
        .map(|&s| Complex::new(s as f64, 0.0))
        .collect();

    let mut planner = FftPlanner::new();
    planner.plan_fft_forward(2 * len).process(&mut buffer);

    buffer
        .iter()
        .take(len)
        .enumerate()
        .map(|(k, v)| {
            let angle = -std::f64::consts::PI * k as f64 / (2 * len) as f64;
            0.5 * (*v * Complex::from_polar(1.0, angle)).re
        })
        .collect()
}

pub fn rms_error(a: &[i32], b: &[i32]) -> f64 {
    let sum: f64 = a
        .iter()
        .zip(b)
        .map(|(&x, &y)| {
            let d = (x - y) as f64;
            d * d
        })
        .sum();
    (sum / a.len() as f64).sqrt()
}

pub fn peak_to_peak(x: &[i32]) -> i32 {
    let min = x.iter().copied().min().unwrap_or(0);
    let max = x.iter().copied().max().unwrap_or(0);
    max - min
}

pub fn db(ratio: f64) -> f64 {
    20.0 * ratio.log10()
}
