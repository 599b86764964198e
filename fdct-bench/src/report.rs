//! # Report Module
//!
//! Serializable results of benchmark runs and size sweeps, and their JSON
//! persistence.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::stats::ErrorStats;

/// Measurements of one forward -> inverse cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IterationReport {
    pub forward_micros: f64,
    pub inverse_micros: f64,
    /// Fixed-point forward coefficients against the float reference, in dB.
    pub forward_error_db: f64,
    pub round_trip: ErrorStats,
}

/// Aggregates over all iterations of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub mean_forward_micros: f64,
    pub mean_inverse_micros: f64,
    /// Forward throughput, samples per second.
    pub forward_samples_per_second: f64,
    pub worst_snr_db: f64,
    pub worst_forward_error_db: f64,
}

/// Result of `fdct-bench run`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchReport {
    pub exponent: u32,
    pub len: usize,
    pub iterations: Vec<IterationReport>,
    pub summary: Summary,
}

impl BenchReport {
    /// Builds the report and its summary from per-iteration results.
    pub fn new(exponent: u32, len: usize, iterations: Vec<IterationReport>) -> Self {
        let count = iterations.len().max(1) as f64;
        let mean_forward_micros = iterations.iter().map(|it| it.forward_micros).sum::<f64>() / count;
        let mean_inverse_micros = iterations.iter().map(|it| it.inverse_micros).sum::<f64>() / count;
        let forward_samples_per_second = if mean_forward_micros > 0.0 {
            len as f64 * 1e6 / mean_forward_micros
        } else {
            0.0
        };

        let worst_snr_db = iterations
            .iter()
            .map(|it| it.round_trip.snr_db)
            .fold(f64::NEG_INFINITY, f64::max);
        let worst_forward_error_db = iterations
            .iter()
            .map(|it| it.forward_error_db)
            .fold(f64::NEG_INFINITY, f64::max);

        Self {
            exponent,
            len,
            iterations,
            summary: Summary {
                mean_forward_micros,
                mean_inverse_micros,
                forward_samples_per_second,
                worst_snr_db,
                worst_forward_error_db,
            },
        }
    }
}

/// Timing of one transform size in a sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepPoint {
    pub exponent: u32,
    pub len: usize,
    pub forward_micros: f64,
    pub inverse_micros: f64,
}

/// Result of `fdct-bench sweep`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepReport {
    pub repetitions: usize,
    pub points: Vec<SweepPoint>,
    /// Slope of forward time against `N·log2(N)`, in nanoseconds.
    pub ns_per_butterfly: Option<f64>,
    /// Fixed per-call overhead from the same fit, in microseconds.
    pub overhead_micros: Option<f64>,
}

/// Saves any report to a pretty-printed JSON file.
///
/// # Arguments
/// * `report` - The report to save
/// * `path` - Destination file (e.g., "bench.json")
pub fn save_json<T: Serialize>(report: &T, path: &Path) -> Result<()> {
    let json_string = serde_json::to_string_pretty(report)?;
    let mut file = File::create(path)
        .with_context(|| format!("creating report file {}", path.display()))?;
    file.write_all(json_string.as_bytes())?;
    Ok(())
}
