//! Audio pipeline — microphone capture → WAV blob; base64/PCM16 decode → playback.
//!
//! # Pipeline
//!
//! ```text
//! Microphone → cpal callback → mono f32 chunks → Recorder → Recording (WAV)
//! base64 payload → decode_base64 → decode_pcm16 → AudioBuffer → play
//! ```
//!
//! The capture side feeds [`crate::assistant::Assistant::transcribe`]; the
//! decode/playback side consumes the raw PCM payload returned by
//! [`crate::assistant::Assistant::synthesize_speech`]. The two halves are
//! otherwise independent.

pub mod capture;
pub mod decode;
pub mod playback;

pub use capture::{encode_wav, CaptureError, Microphone, Recorder, Recording, StreamHandle};
pub use decode::{
    decode_base64, decode_pcm16, encode_pcm16, AudioBuffer, DecodeError, TTS_SAMPLE_RATE,
};
pub use playback::{play, PlaybackError, PlaybackHandle};
