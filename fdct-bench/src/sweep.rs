//! Timing across every supported transform size, with a linear fit of
//! forward time against `N·log2(N)`.

use std::time::Instant;

use anyhow::Result;
use fdct_core::{Fdct, MIN_EXPONENT, scale};
use linreg::linear_regression;

use crate::report::{SweepPoint, SweepReport};
use crate::signal::{SignalGenerator, SignalSpec};

/// Times `repetitions` forward and inverse calls for each `n` in
/// `[MIN_EXPONENT, dct.max_exponent()]`.
pub fn sweep(dct: &mut Fdct, repetitions: usize, spec: &SignalSpec) -> Result<SweepReport> {
    let repetitions = repetitions.max(1);
    let mut points = Vec::new();

    for n in MIN_EXPONENT..=dct.max_exponent() {
        let len = dct.checked_len(n)?;
        let input = SignalGenerator::new(spec, len)?.next_frame();

        let mut forward_total = 0.0;
        for _ in 0..repetitions {
            dct.load(&input)?;
            let start = Instant::now();
            dct.forward(n)?;
            forward_total += start.elapsed().as_secs_f64();
        }

        scale::normalize_forward(&mut dct.buffer_mut()[..len]);
        let coeffs = dct.buffer()[..len].to_vec();

        let mut inverse_total = 0.0;
        for _ in 0..repetitions {
            dct.load(&coeffs)?;
            let start = Instant::now();
            dct.inverse(n)?;
            inverse_total += start.elapsed().as_secs_f64();
        }

        let point = SweepPoint {
            exponent: n,
            len,
            forward_micros: forward_total * 1e6 / repetitions as f64,
            inverse_micros: inverse_total * 1e6 / repetitions as f64,
        };
        eprintln!(
            "[SWEEP] DCT-{}: forward {:.2} micros, inverse {:.2} micros",
            point.len, point.forward_micros, point.inverse_micros
        );
        points.push(point);
    }

    let fit = fit_butterfly_cost(&points);
    if fit.is_none() {
        tracing::warn!(points = points.len(), "not enough sizes for a timing fit");
    }

    Ok(SweepReport {
        repetitions,
        ns_per_butterfly: fit.map(|(slope, _)| slope * 1e3),
        overhead_micros: fit.map(|(_, intercept)| intercept),
        points,
    })
}

/// Fits `forward_micros = slope · N·log2(N) + intercept`.
///
/// # Returns
/// * `Some((slope, intercept))` - slope in microseconds per butterfly
/// * `None` - fewer than two distinct sizes
pub fn fit_butterfly_cost(points: &[SweepPoint]) -> Option<(f64, f64)> {
    let (xs, ys): (Vec<f64>, Vec<f64>) = points
        .iter()
        .map(|p| ((p.len as f64) * (p.exponent as f64), p.forward_micros))
        .unzip();

    linear_regression::<_, _, f64>(&xs, &ys)
        .ok()
        .filter(|(slope, intercept)| slope.is_finite() && intercept.is_finite())
}
