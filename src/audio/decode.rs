//! Base64 and raw PCM16 decoding for provider audio payloads.
//!
//! The speech-synthesis endpoint returns base64-encoded raw PCM: signed
//! 16-bit little-endian samples, 24 000 Hz, mono, no container. Decoding is
//! a pure, allocation-only transform — no I/O.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use thiserror::Error;

/// Sample rate of provider speech-synthesis output, in Hz.
pub const TTS_SAMPLE_RATE: u32 = 24_000;

// ---------------------------------------------------------------------------
// AudioBuffer
// ---------------------------------------------------------------------------

/// A decoded audio clip: normalized `f32` samples in `[-1.0, 1.0]` at a
/// fixed rate and channel count. Immutable once decoded.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioBuffer {
    /// Interleaved PCM samples in `[-1.0, 1.0]`.
    pub samples: Vec<f32>,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Number of interleaved channels (1 = mono).
    pub channels: u16,
}

impl AudioBuffer {
    /// Duration of the clip in seconds.
    pub fn duration_secs(&self) -> f32 {
        if self.sample_rate == 0 || self.channels == 0 {
            return 0.0;
        }
        self.samples.len() as f32 / (self.sample_rate as f32 * self.channels as f32)
    }
}

// ---------------------------------------------------------------------------
// DecodeError
// ---------------------------------------------------------------------------

/// Errors that can occur while decoding a provider audio payload.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The PCM byte payload cannot be split into whole 16-bit samples.
    #[error("malformed PCM payload: length {0} is not a multiple of 2")]
    MalformedAudio(usize),

    /// The base64 text is not valid standard-alphabet base64.
    #[error("malformed base64 payload: {0}")]
    MalformedEncoding(#[from] base64::DecodeError),
}

// ---------------------------------------------------------------------------
// decode / encode
// ---------------------------------------------------------------------------

/// Decode `text` as standard base64 into raw bytes.
///
/// # Errors
///
/// Returns [`DecodeError::MalformedEncoding`] on an invalid alphabet or
/// padding.
pub fn decode_base64(text: &str) -> Result<Vec<u8>, DecodeError> {
    Ok(BASE64.decode(text)?)
}

/// Interpret `bytes` as signed 16-bit little-endian samples and convert each
/// to a normalized float via `sample / 32768.0`.
///
/// # Errors
///
/// Returns [`DecodeError::MalformedAudio`] when `bytes.len()` is odd; no
/// partial decode is performed.
///
/// # Example
///
/// ```rust
/// use wastenot::audio::decode_pcm16;
///
/// // i16::MIN (0x8000 LE) decodes to exactly -1.0
/// let buf = decode_pcm16(&[0x00, 0x80], 24_000, 1).unwrap();
/// assert_eq!(buf.samples, vec![-1.0]);
/// ```
pub fn decode_pcm16(bytes: &[u8], sample_rate: u32, channels: u16) -> Result<AudioBuffer, DecodeError> {
    if bytes.len() % 2 != 0 {
        return Err(DecodeError::MalformedAudio(bytes.len()));
    }

    let samples = bytes
        .chunks_exact(2)
        .map(|pair| i16::from_le_bytes([pair[0], pair[1]]) as f32 / 32768.0)
        .collect();

    Ok(AudioBuffer {
        samples,
        sample_rate,
        channels,
    })
}

/// Encode normalized floats as signed 16-bit little-endian PCM bytes.
///
/// Samples are clamped to `[-1.0, 1.0]` before scaling, so out-of-range
/// input cannot wrap.
pub fn encode_pcm16(samples: &[f32]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(samples.len() * 2);
    for &s in samples {
        let scaled = (s.clamp(-1.0, 1.0) * 32767.0).round() as i16;
        bytes.extend_from_slice(&scaled.to_le_bytes());
    }
    bytes
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose::STANDARD as BASE64;
    use base64::Engine as _;

    // ---- decode_pcm16 ------------------------------------------------------

    #[test]
    fn decode_known_samples() {
        // 0x0000 → 0.0, 0x8000 → -1.0, 0x7FFF → 32767/32768
        let bytes = [0x00, 0x00, 0x00, 0x80, 0xFF, 0x7F];
        let buf = decode_pcm16(&bytes, TTS_SAMPLE_RATE, 1).unwrap();
        assert_eq!(buf.samples.len(), 3);
        assert_eq!(buf.samples[0], 0.0);
        assert_eq!(buf.samples[1], -1.0);
        assert!((buf.samples[2] - 32767.0 / 32768.0).abs() < 1e-7);
        assert_eq!(buf.sample_rate, 24_000);
        assert_eq!(buf.channels, 1);
    }

    #[test]
    fn odd_length_is_malformed() {
        let err = decode_pcm16(&[0x01, 0x02, 0x03], TTS_SAMPLE_RATE, 1).unwrap_err();
        assert!(matches!(err, DecodeError::MalformedAudio(3)));
    }

    #[test]
    fn odd_length_never_partially_decodes() {
        // Every odd length must fail, regardless of content.
        for len in [1usize, 5, 101] {
            let bytes = vec![0u8; len];
            assert!(decode_pcm16(&bytes, TTS_SAMPLE_RATE, 1).is_err(), "len={len}");
        }
    }

    #[test]
    fn empty_payload_decodes_to_empty_buffer() {
        let buf = decode_pcm16(&[], TTS_SAMPLE_RATE, 1).unwrap();
        assert!(buf.samples.is_empty());
        assert_eq!(buf.duration_secs(), 0.0);
    }

    /// Decoding the same base64 payload twice yields bit-identical buffers.
    #[test]
    fn decode_is_deterministic() {
        let pcm: Vec<u8> = (0u8..=255).collect::<Vec<_>>().repeat(4);
        let b64 = BASE64.encode(&pcm);

        let a = decode_pcm16(&decode_base64(&b64).unwrap(), TTS_SAMPLE_RATE, 1).unwrap();
        let b = decode_pcm16(&decode_base64(&b64).unwrap(), TTS_SAMPLE_RATE, 1).unwrap();
        assert_eq!(a, b);
    }

    // ---- encode_pcm16 round trip -------------------------------------------

    #[test]
    fn round_trip_within_quantization_tolerance() {
        let original = vec![0.0_f32, 0.25, -0.25, 0.5, -0.5, 0.999, -0.999];
        let decoded = decode_pcm16(&encode_pcm16(&original), TTS_SAMPLE_RATE, 1).unwrap();

        assert_eq!(decoded.samples.len(), original.len());
        for (a, b) in original.iter().zip(decoded.samples.iter()) {
            assert!(
                (a - b).abs() <= 1.0 / 32768.0,
                "sample drift: {a} vs {b}"
            );
        }
    }

    #[test]
    fn encode_clamps_out_of_range() {
        let bytes = encode_pcm16(&[2.0, -2.0]);
        let buf = decode_pcm16(&bytes, TTS_SAMPLE_RATE, 1).unwrap();
        assert!((buf.samples[0] - 32767.0 / 32768.0).abs() < 1e-6);
        assert!((buf.samples[1] + 32767.0 / 32768.0).abs() < 1e-6);
    }

    // ---- decode_base64 -----------------------------------------------------

    #[test]
    fn base64_round_trip() {
        let raw = vec![0u8, 1, 2, 253, 254, 255];
        let encoded = BASE64.encode(&raw);
        assert_eq!(decode_base64(&encoded).unwrap(), raw);
    }

    #[test]
    fn invalid_base64_is_malformed_encoding() {
        let err = decode_base64("not base64 !!!").unwrap_err();
        assert!(matches!(err, DecodeError::MalformedEncoding(_)));
    }

    #[test]
    fn truncated_padding_is_malformed_encoding() {
        // Valid alphabet, invalid length/padding.
        assert!(decode_base64("AAAAA").is_err());
    }

    // ---- AudioBuffer -------------------------------------------------------

    #[test]
    fn duration_of_one_second_clip() {
        let buf = AudioBuffer {
            samples: vec![0.0; 24_000],
            sample_rate: TTS_SAMPLE_RATE,
            channels: 1,
        };
        assert!((buf.duration_secs() - 1.0).abs() < 1e-6);
    }
}
