//! Microphone capture via `cpal`.
//!
//! [`Microphone`] wraps the cpal host/device/stream lifecycle. [`Recorder`]
//! drives one start/stop capture session on top of it: chunks delivered by
//! the cpal callback are accumulated, downmixed to mono, and encoded as a
//! single in-memory WAV blob ([`Recording`]) when the session stops. The
//! input device is held exclusively between `start` and `stop` and is always
//! released on `stop`, whatever happens to the blob afterwards.

use std::sync::mpsc;

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Recording
// ---------------------------------------------------------------------------

/// One encoded capture blob, produced once per start/stop cycle and consumed
/// once by transcription.
#[derive(Debug, Clone)]
pub struct Recording {
    /// WAV-encoded bytes (16-bit mono at the device's native rate).
    pub bytes: Vec<u8>,
    /// Declared MIME type of `bytes`.
    pub mime_type: String,
    /// Length of the capture in seconds.
    pub duration_secs: f32,
}

// ---------------------------------------------------------------------------
// StreamHandle
// ---------------------------------------------------------------------------

/// RAII guard that keeps the cpal input stream alive.
///
/// Dropping this value stops the underlying hardware stream and releases the
/// device claim.
pub struct StreamHandle {
    _stream: cpal::Stream,
}

// ---------------------------------------------------------------------------
// CaptureError
// ---------------------------------------------------------------------------

/// Errors that can occur while setting up or running audio capture.
#[derive(Debug, Error)]
pub enum CaptureError {
    /// The platform backend refused the stream (microphone access denied).
    #[error("microphone access denied: {0}")]
    PermissionDenied(String),

    #[error("no input device found on the default audio host")]
    NoDevice,

    #[error("failed to query default input config: {0}")]
    DefaultConfig(#[from] cpal::DefaultStreamConfigError),

    #[error("failed to build input stream: {0}")]
    BuildStream(String),

    #[error("failed to start audio stream: {0}")]
    PlayStream(#[from] cpal::PlayStreamError),

    /// `start` was called while a capture session was already active.
    #[error("a capture session is already active")]
    AlreadyRecording,

    /// `stop` was called with no active capture session.
    #[error("no capture session is active")]
    NotRecording,
}

impl From<cpal::BuildStreamError> for CaptureError {
    fn from(e: cpal::BuildStreamError) -> Self {
        match e {
            cpal::BuildStreamError::DeviceNotAvailable => CaptureError::NoDevice,
            // Denied microphone access surfaces as a backend-specific error
            // on the platforms that gate it.
            cpal::BuildStreamError::BackendSpecific { err } => {
                CaptureError::PermissionDenied(err.description)
            }
            other => CaptureError::BuildStream(other.to_string()),
        }
    }
}

// ---------------------------------------------------------------------------
// Microphone
// ---------------------------------------------------------------------------

/// Microphone wrapper built on top of `cpal`, using the system default input
/// device and its preferred stream configuration.
pub struct Microphone {
    device: cpal::Device,
    config: cpal::StreamConfig,
    /// Native sample rate reported by the device (Hz).
    sample_rate: u32,
    /// Number of interleaved channels reported by the device.
    channels: u16,
}

impl Microphone {
    /// Create a new [`Microphone`] using the system default input device.
    ///
    /// # Errors
    ///
    /// Returns [`CaptureError::NoDevice`] when no input device is available,
    /// or [`CaptureError::DefaultConfig`] when the device cannot report a
    /// default stream configuration.
    pub fn new() -> Result<Self, CaptureError> {
        let host = cpal::default_host();
        let device = host.default_input_device().ok_or(CaptureError::NoDevice)?;

        let supported = device.default_input_config()?;

        let channels = supported.channels();
        let sample_rate = supported.sample_rate().0;
        let config: cpal::StreamConfig = supported.into();

        Ok(Self {
            device,
            config,
            sample_rate,
            channels,
        })
    }

    /// Start streaming raw interleaved `f32` chunks to `tx`.
    ///
    /// The cpal callback runs on a dedicated audio thread; send errors
    /// (receiver dropped) are silently ignored so that thread never panics.
    ///
    /// # Errors
    ///
    /// Returns [`CaptureError::PermissionDenied`] when the backend refuses
    /// the stream, or [`CaptureError::BuildStream`] / [`CaptureError::PlayStream`]
    /// on other configuration failures.
    pub fn start(&self, tx: mpsc::Sender<Vec<f32>>) -> Result<StreamHandle, CaptureError> {
        let stream = self.device.build_input_stream(
            &self.config,
            move |data: &[f32], _: &cpal::InputCallbackInfo| {
                let _ = tx.send(data.to_vec());
            },
            |err: cpal::StreamError| {
                log::error!("cpal stream error: {err}");
            },
            None, // no timeout
        )?;

        stream.play()?;
        Ok(StreamHandle { _stream: stream })
    }

    /// Native sample rate of the capture stream in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Number of interleaved channels in each chunk.
    pub fn channels(&self) -> u16 {
        self.channels
    }
}

// ---------------------------------------------------------------------------
// Recorder
// ---------------------------------------------------------------------------

/// One start/stop capture session over a [`Microphone`].
///
/// Produces exactly one [`Recording`] per cycle:
///
/// ```rust,no_run
/// use wastenot::audio::{Microphone, Recorder};
///
/// let mut recorder = Recorder::new(Microphone::new().unwrap());
/// recorder.start().unwrap();
/// // ... user speaks ...
/// let recording = recorder.stop().unwrap();
/// assert_eq!(recording.mime_type, "audio/wav");
/// ```
pub struct Recorder {
    mic: Microphone,
    session: Option<(StreamHandle, mpsc::Receiver<Vec<f32>>)>,
}

impl Recorder {
    /// Wrap `mic` in a recorder with no active session.
    pub fn new(mic: Microphone) -> Self {
        Self { mic, session: None }
    }

    /// `true` while a capture session is active.
    pub fn is_recording(&self) -> bool {
        self.session.is_some()
    }

    /// Begin accumulating audio.
    ///
    /// # Errors
    ///
    /// Returns [`CaptureError::AlreadyRecording`] if a session is active,
    /// otherwise any stream setup error from [`Microphone::start`].
    pub fn start(&mut self) -> Result<(), CaptureError> {
        if self.session.is_some() {
            return Err(CaptureError::AlreadyRecording);
        }

        let (tx, rx) = mpsc::channel();
        let handle = self.mic.start(tx)?;
        self.session = Some((handle, rx));
        log::info!(
            "capture started ({} Hz, {} ch)",
            self.mic.sample_rate(),
            self.mic.channels()
        );
        Ok(())
    }

    /// Stop the session and assemble the accumulated chunks into one
    /// [`Recording`].
    ///
    /// The input stream is dropped (device released) before the blob is
    /// assembled, so the claim is never held past this call.
    ///
    /// # Errors
    ///
    /// Returns [`CaptureError::NotRecording`] when no session is active.
    pub fn stop(&mut self) -> Result<Recording, CaptureError> {
        let (handle, rx) = self.session.take().ok_or(CaptureError::NotRecording)?;
        drop(handle); // release the input device first

        let mut samples = Vec::new();
        while let Ok(chunk) = rx.try_recv() {
            samples.extend_from_slice(&chunk);
        }

        let mono = downmix_mono(&samples, self.mic.channels());
        let sample_rate = self.mic.sample_rate();
        let duration_secs = mono.len() as f32 / sample_rate as f32;
        log::info!("capture stopped ({duration_secs:.2} s)");

        Ok(Recording {
            bytes: encode_wav(&mono, sample_rate, 1),
            mime_type: "audio/wav".into(),
            duration_secs,
        })
    }
}

// ---------------------------------------------------------------------------
// WAV encoding
// ---------------------------------------------------------------------------

/// Encode normalized `f32` samples as an in-memory 16-bit PCM WAV file.
pub fn encode_wav(samples: &[f32], sample_rate: u32, channels: u16) -> Vec<u8> {
    let spec = hound::WavSpec {
        channels,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut cursor = std::io::Cursor::new(Vec::new());
    {
        // Writing to an in-memory cursor cannot fail.
        let mut writer =
            hound::WavWriter::new(&mut cursor, spec).expect("in-memory WAV writer");
        for &s in samples {
            let scaled = (s.clamp(-1.0, 1.0) * 32767.0).round() as i16;
            writer.write_sample(scaled).expect("in-memory WAV write");
        }
        writer.finalize().expect("in-memory WAV finalize");
    }
    cursor.into_inner()
}

/// Mix interleaved multi-channel audio down to mono by averaging channels.
fn downmix_mono(samples: &[f32], channels: u16) -> Vec<f32> {
    match channels {
        0 => Vec::new(),
        1 => samples.to_vec(),
        n => {
            let n = n as usize;
            samples
                .chunks_exact(n)
                .map(|frame| frame.iter().sum::<f32>() / n as f32)
                .collect()
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
