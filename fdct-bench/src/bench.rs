//! # Benchmark Module
//!
//! Runs the forward -> inverse accuracy and timing cycle on synthetic
//! signals:
//! 1. Synthesize a sinusoid mix plus fresh noise
//! 2. Time the forward transform and compare it with the float reference
//! 3. Normalize, time the inverse transform, normalize again
//! 4. Measure the reconstruction error against the input

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use fdct_core::{Fdct, scale};
use serde::{Deserialize, Serialize};

use crate::reference::{ReferenceDct, relative_error_db};
use crate::report::{BenchReport, IterationReport};
use crate::signal::{SignalGenerator, SignalSpec};
use crate::stats::ErrorStats;

/// Settings of one benchmark run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchConfig {
    /// Transform exponent; the frame holds `2^exponent` samples.
    pub exponent: u32,
    /// Number of forward -> inverse cycles.
    pub iterations: usize,
    pub signal: SignalSpec,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            exponent: 12,
            iterations: 1,
            signal: SignalSpec::default(),
        }
    }
}

/// Input, raw coefficients and reconstruction of one cycle.
#[derive(Debug, Clone, Default)]
pub struct Frame {
    pub input: Vec<i32>,
    pub coeffs: Vec<i32>,
    pub restored: Vec<i32>,
}

/// Executes `config.iterations` cycles on `dct`.
///
/// # Returns
/// * `Ok((report, last_frame))` - Per-iteration measurements and the final frame
/// * `Err(e)` - The exponent is not accepted by the engine
pub fn run(dct: &mut Fdct, config: &BenchConfig) -> Result<(BenchReport, Frame)> {
    let n = config.exponent;
    let len = dct.checked_len(n)?;
    let mut generator = SignalGenerator::new(&config.signal, len)?;
    let mut reference = ReferenceDct::new(len);
    let mut iterations = Vec::with_capacity(config.iterations);
    let mut frame = Frame::default();

    tracing::info!(exponent = n, len, iterations = config.iterations, "benchmark started");

    for iteration in 0..config.iterations {
        let input = generator.next_frame();
        dct.load(&input)?;

        let start = Instant::now();
        dct.forward(n).with_context(|| format!("forward DCT-{len}"))?;
        let forward_micros = start.elapsed().as_secs_f64() * 1e6;

        let coeffs = dct.buffer()[..len].to_vec();
        let forward_error_db = relative_error_db(&coeffs, &reference.process(&input));

        // Apply scale to output in order to normalize result.
        scale::normalize_forward(&mut dct.buffer_mut()[..len]);

        let start = Instant::now();
        dct.inverse(n).with_context(|| format!("inverse DCT-{len}"))?;
        let inverse_micros = start.elapsed().as_secs_f64() * 1e6;

        scale::normalize_inverse(&mut dct.buffer_mut()[..len], n);
        let restored = dct.buffer()[..len].to_vec();
        let round_trip = ErrorStats::compute(&input, &restored);

        eprintln!("[BENCH] Forward DCT-{len} conversion time: {forward_micros:.0} micros.");
        eprintln!("[BENCH] Inverse DCT-{len} conversion time: {inverse_micros:.0} micros.");
        eprintln!(
            "[BENCH] Forward -> inverse transform error stats: Vpk-pk: {}, Std.dev:{:.3}, SNR:{:.1} dBFS",
            round_trip.peak_to_peak, round_trip.std_dev, round_trip.snr_db
        );
        tracing::debug!(iteration, forward_error_db, max_abs_error = round_trip.max_abs_error, "cycle done");

        iterations.push(IterationReport {
            forward_micros,
            inverse_micros,
            forward_error_db,
            round_trip,
        });
        frame = Frame {
            input,
            coeffs,
            restored,
        };
    }

    Ok((BenchReport::new(n, len, iterations), frame))
}

/// Writes `|coeff|;input;restored;diff` lines for every sample of `frame`.
pub fn write_dump(frame: &Frame, path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating dump file {}", path.display()))?;
    let mut out = BufWriter::new(file);
    for ((&coeff, &input), &restored) in frame.coeffs.iter().zip(&frame.input).zip(&frame.restored) {
        writeln!(out, "{};{};{};{}", coeff.unsigned_abs(), input, restored, restored - input)?;
    }
    out.flush()?;
    Ok(())
}
