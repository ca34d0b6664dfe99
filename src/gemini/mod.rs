//! Gemini generative API — wire types and HTTP client.
//!
//! This module provides:
//! * [`GenerativeBackend`] — async trait implemented by all provider backends.
//! * [`GeminiClient`] — reqwest-based REST client (the production backend).
//! * Request/response structs mirroring the `generateContent` JSON contract.
//! * [`ProviderError`] — error variants for provider operations.

pub mod client;
pub mod types;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use client::{GeminiClient, GenerativeBackend, ProviderError};
pub use types::{
    Candidate, Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig,
    GroundingChunk, GroundingMetadata, InlineData, LatLng, MapsSource, Part, PlaceAnswerSource,
    PrebuiltVoiceConfig, RetrievalConfig, ReviewSnippetSource, SpeechConfig, ThinkingConfig,
    Tool, ToolConfig, VoiceConfig, WebSource,
};
