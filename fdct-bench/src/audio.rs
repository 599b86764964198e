//! # Audio Capture Module
//!
//! Feeds the transform from a live input device using CPAL (Cross-Platform
//! Audio Library). Frames travel from the audio callback to the transform
//! loop over a bounded crossbeam channel.
//!
//! ## Features
//! - Automatic audio device selection
//! - Frame accumulation sized to the transform length
//! - 12-bit quantisation before the integer transform

use anyhow::{Context, Result, anyhow};
use cpal::{SupportedStreamConfig, SupportedStreamConfigRange};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use crossbeam_channel::{Sender, bounded};
use fdct_core::Fdct;

use crate::signal::quantize_12bit;
use crate::spectrum::{bin_frequency, dominant_bin};

/// Sample rate requested from the input device.
pub const TARGET_SAMPLE_RATE: u32 = 44100;

/// Starts audio capture from the default input device.
///
/// # Arguments
/// * `sender` - Channel receiving frames of exactly `frame_len` samples
/// * `frame_len` - Samples per frame (the transform length)
///
/// # Returns
/// * `Ok((stream, sample_rate))` - Running stream handle and its sample rate
/// * `Err(e)` - No device, no mono f32 format, or stream setup failed
pub fn start_audio_capture(sender: Sender<Vec<f32>>, frame_len: usize) -> Result<(cpal::Stream, u32)> {
    let host = cpal::default_host();
    let device = host
        .default_input_device()
        .ok_or_else(|| anyhow!("No input device available"))?;

    tracing::info!(device = %device.name()?, "using audio input device");

    let config = choose_input_config(device.supported_input_configs()?)
        .ok_or_else(|| anyhow!("No mono f32 input format found"))?;

    let sample_rate_val = config.sample_rate().0;
    let config: cpal::StreamConfig = config.into();

    tracing::info!(sample_rate = sample_rate_val, frame_len, "input stream configured");

    let err_fn = |err: cpal::StreamError| tracing::error!(%err, "an error occurred on the audio stream");

    // Callback-owned; holds less than one frame between calls.
    let mut pending = Vec::with_capacity(frame_len * 2);

    let stream = device.build_input_stream(
        &config,
        move |data: &[f32], _: &cpal::InputCallbackInfo| {
            pending.extend_from_slice(data);

            while pending.len() >= frame_len {
                let frame: Vec<f32> = pending.drain(..frame_len).collect();
                // Drop the frame when the transform loop lags behind.
                let _ = sender.try_send(frame);
            }
        },
        err_fn,
        None,
    )?;

    stream.play()?;

    Ok((stream, sample_rate_val))
}

/// Picks a mono f32 input format and the rate to open it at: the target
/// rate when a range covers it, otherwise the closest rate a range offers.
fn choose_input_config(
    ranges: impl IntoIterator<Item = SupportedStreamConfigRange>,
) -> Option<SupportedStreamConfig> {
    ranges
        .into_iter()
        .filter(|r| r.channels() == 1 && r.sample_format() == cpal::SampleFormat::F32)
        .map(|r| {
            let rate = TARGET_SAMPLE_RATE.clamp(r.min_sample_rate().0, r.max_sample_rate().0);
            (rate.abs_diff(TARGET_SAMPLE_RATE), rate, r)
        })
        .min_by_key(|&(distance, _, _)| distance)
        .map(|(_, rate, r)| r.with_sample_rate(cpal::SampleRate(rate)))
}

/// Transforms `frames` captured frames (0 = until the stream closes) and
/// reports the dominant frequency of each.
pub fn listen(dct: &mut Fdct, n: u32, frames: usize) -> Result<()> {
    let len = dct.checked_len(n)?;
    let (sender, receiver) = bounded(4);
    let (stream, sample_rate) = start_audio_capture(sender, len)?;

    let mut processed = 0;
    while frames == 0 || processed < frames {
        let frame = receiver.recv().context("audio channel closed")?;
        dct.load(&quantize_12bit(&frame))?;
        dct.forward(n)?;

        if let Some((k, magnitude)) = dominant_bin(&dct.buffer()[..len]) {
            eprintln!(
                "[LISTEN] bin {k:5} ~ {:8.1} Hz, magnitude {magnitude}",
                bin_frequency(k, len, sample_rate)
            );
        }
        processed += 1;
    }

    if let Err(e) = stream.pause() {
        tracing::warn!(%e, "error pausing stream");
    }
    Ok(())
}
