//! # fdct-bench - Accuracy and Timing Harness for the Integer FDCT
//!
//! Drives the transform engine from the command line:
//! - **run**: forward -> inverse cycles on a synthetic tone mix with noise,
//!   reporting conversion time and reconstruction error
//! - **sweep**: timing for every transform size with a cost fit
//! - **listen**: live spectrum of the default input device (feature `live`)
//! - **config**: print the effective engine configuration

mod bench;
mod reference;
mod report;
mod signal;
#[cfg_attr(not(feature = "live"), allow(dead_code))]
mod spectrum;
mod stats;
mod sweep;

#[cfg(feature = "live")]
mod audio;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use fdct_core::{Fdct, FdctConfig};
use tracing_subscriber::EnvFilter;

use bench::BenchConfig;
use signal::SignalSpec;

#[derive(Parser)]
#[command(name = "fdct-bench", version, about = "Integer FDCT accuracy and timing harness")]
struct Cli {
    /// Engine config file (JSON); overrides the built-in default.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Largest transform exponent the engine is built for.
    #[arg(long, global = true)]
    max_exponent: Option<u32>,

    /// Log filter used when RUST_LOG is unset.
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Forward -> inverse accuracy and timing on a synthetic signal.
    Run {
        /// Transform exponent (2..=12).
        #[arg(short, long, default_value_t = 12)]
        exponent: u32,
        /// Number of cycles.
        #[arg(short, long, default_value_t = 1)]
        iterations: usize,
        /// Seed of the noise generator.
        #[arg(long, default_value_t = 0xCAFE_C0DE)]
        seed: u64,
        /// Width of the uniform noise band.
        #[arg(long, default_value_t = 1024, value_parser = clap::value_parser!(u32).range(0..=signal::MAX_NOISE_SPAN as i64))]
        noise_span: u32,
        /// Write the JSON report here instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Write `|coeff|;input;restored;diff` lines of the last cycle here.
        #[arg(long)]
        dump: Option<PathBuf>,
    },
    /// Time every transform size up to the engine maximum.
    Sweep {
        /// Calls averaged per size.
        #[arg(short, long, default_value_t = 200)]
        repetitions: usize,
        /// Write the JSON report here instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Transform live input and print the dominant frequency.
    #[cfg(feature = "live")]
    Listen {
        /// Transform exponent (2..=12).
        #[arg(short, long, default_value_t = 11)]
        exponent: u32,
        /// Frames to process; 0 runs until interrupted.
        #[arg(short, long, default_value_t = 0)]
        frames: usize,
    },
    /// Print the effective engine configuration as JSON.
    Config,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match execute(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("[MAIN] Fatal error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn execute(cli: Cli) -> Result<()> {
    let config = engine_config(&cli)?;

    match cli.command {
        Command::Run {
            exponent,
            iterations,
            seed,
            noise_span,
            output,
            dump,
        } => {
            let mut dct = build_engine(config)?;
            let bench_config = BenchConfig {
                exponent,
                iterations,
                signal: SignalSpec {
                    seed,
                    noise_span,
                    ..SignalSpec::default()
                },
            };
            let (report, frame) = bench::run(&mut dct, &bench_config)?;
            if let Some(path) = dump {
                bench::write_dump(&frame, &path)?;
                eprintln!("[MAIN] Sample dump written to {}", path.display());
            }
            emit(&report, output)
        }
        Command::Sweep { repetitions, output } => {
            let mut dct = build_engine(config)?;
            let report = sweep::sweep(&mut dct, repetitions, &SignalSpec::default())?;
            if let Some(ns) = report.ns_per_butterfly {
                eprintln!("[SWEEP] Fitted cost: {ns:.2} ns per butterfly");
            }
            emit(&report, output)
        }
        #[cfg(feature = "live")]
        Command::Listen { exponent, frames } => {
            let mut dct = build_engine(config)?;
            audio::listen(&mut dct, exponent, frames)
        }
        Command::Config => {
            println!("{}", serde_json::to_string_pretty(&config)?);
            Ok(())
        }
    }
}

/// Resolves the engine config: file first, then the command-line override.
fn engine_config(cli: &Cli) -> Result<FdctConfig> {
    let mut config = match &cli.config {
        Some(path) => FdctConfig::load(path).with_context(|| format!("loading {}", path.display()))?,
        None => FdctConfig::default(),
    };
    if let Some(max_exponent) = cli.max_exponent {
        config.max_exponent = max_exponent;
    }
    config.validate()?;
    Ok(config)
}

fn build_engine(config: FdctConfig) -> Result<Fdct> {
    eprintln!("[MAIN] FDCT engine init (max exponent {})...", config.max_exponent);
    let dct = Fdct::new(config).context("constructing FDCT engine")?;
    eprintln!("[MAIN] OK, buffer capacity {} samples", dct.capacity());
    Ok(dct)
}

/// Prints a report to stdout or saves it to `output`.
fn emit<T: serde::Serialize>(report: &T, output: Option<PathBuf>) -> Result<()> {
    match output {
        Some(path) => {
            report::save_json(report, &path)?;
            eprintln!("[MAIN] Report saved to {}", path.display());
        }
        None => println!("{}", serde_json::to_string_pretty(report)?),
    }
    Ok(())
}
