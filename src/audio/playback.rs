//! One-shot playback of a decoded [`AudioBuffer`] via `cpal`.
//!
//! The default output device is opened as a stereo 48 kHz stream; mono
//! source material is duplicated across both channels and upsampled by
//! integer sample repetition (24 kHz speech output repeats each sample
//! twice). Submission returns immediately; the returned [`PlaybackHandle`]
//! is an RAII guard over the output stream, so it must be kept alive for
//! the duration of the clip. Concurrent playbacks open independent streams
//! and are mixed by the platform.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use thiserror::Error;

use super::decode::AudioBuffer;

/// Output stream rate; an integer multiple of the 24 kHz speech payloads.
const OUTPUT_RATE: u32 = 48_000;

// ---------------------------------------------------------------------------
// PlaybackError
// ---------------------------------------------------------------------------

/// Errors that can occur while submitting a buffer for playback.
#[derive(Debug, Error)]
pub enum PlaybackError {
    #[error("no output device found on the default audio host")]
    NoDevice,

    #[error("failed to build output stream: {0}")]
    BuildStream(#[from] cpal::BuildStreamError),

    #[error("failed to start output stream: {0}")]
    PlayStream(#[from] cpal::PlayStreamError),
}

// ---------------------------------------------------------------------------
// PlaybackHandle
// ---------------------------------------------------------------------------

/// RAII guard for one in-flight playback.
///
/// Dropping the handle stops the stream; drop it early to cut a clip short.
pub struct PlaybackHandle {
    _stream: cpal::Stream,
    queue: Arc<Mutex<VecDeque<f32>>>,
}

impl PlaybackHandle {
    /// `true` once every queued sample has been handed to the device.
    pub fn is_done(&self) -> bool {
        self.queue.lock().map(|q| q.is_empty()).unwrap_or(true)
    }
}

// ---------------------------------------------------------------------------
// play
// ---------------------------------------------------------------------------

/// Submit `buffer` to the default output device for one-shot playback.
///
/// Returns as soon as the stream is running; playback proceeds on the audio
/// thread. The callback feeds zeros once the queue drains, so a clip ends in
/// silence rather than an underrun.
///
/// # Errors
///
/// Returns [`PlaybackError::NoDevice`] when no output device exists, or a
/// stream setup error from the backend.
pub fn play(buffer: &AudioBuffer) -> Result<PlaybackHandle, PlaybackError> {
    let host = cpal::default_host();
    let device = host.default_output_device().ok_or(PlaybackError::NoDevice)?;

    let config = cpal::StreamConfig {
        channels: 2,
        sample_rate: cpal::SampleRate(OUTPUT_RATE),
        buffer_size: cpal::BufferSize::Default,
    };

    // Integer-ratio upsample by repetition (24 kHz speech → factor 2).
    let repeat = (OUTPUT_RATE / buffer.sample_rate.max(1)).max(1) as usize;
    let mut queued = VecDeque::with_capacity(buffer.samples.len() * repeat);
    for &s in &buffer.samples {
        for _ in 0..repeat {
            queued.push_back(s);
        }
    }

    let queue = Arc::new(Mutex::new(queued));
    let callback_queue = Arc::clone(&queue);

    let stream = device.build_output_stream(
        &config,
        move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
            let mut q = match callback_queue.lock() {
                Ok(q) => q,
                Err(_) => return,
            };
            for frame in data.chunks_mut(2) {
                let s = q.pop_front().unwrap_or(0.0);
                for out in frame.iter_mut() {
                    *out = s;
                }
            }
        },
        |err: cpal::StreamError| {
            log::error!("cpal output stream error: {err}");
        },
        None,
    )?;

    stream.play()?;
    log::debug!(
        "playback started ({:.2} s @ {} Hz)",
        buffer.duration_secs(),
        buffer.sample_rate
    );

    Ok(PlaybackHandle {
        _stream: stream,
        queue,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
