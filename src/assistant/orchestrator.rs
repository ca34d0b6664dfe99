//! The `Assistant` orchestrator — one async operation per feature.
//!
//! Each operation validates its inputs, builds exactly one provider request,
//! awaits exactly one response, and normalizes the result. Provider and
//! network failures are propagated unchanged: no retry, no caching, no
//! partial results. Validation failures are raised before any network call.

use std::sync::Arc;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use thiserror::Error;

use crate::audio::{decode_base64, decode_pcm16, AudioBuffer, DecodeError, Recording, TTS_SAMPLE_RATE};
use crate::config::ProviderConfig;
use crate::gemini::{
    Content, GeminiClient, GenerateContentRequest, GenerationConfig, GenerativeBackend, LatLng,
    Part, ProviderError, RetrievalConfig, SpeechConfig, ThinkingConfig, Tool, ToolConfig,
};

use super::citation::{Citation, GroundedAnswer};
use super::conversation::ConversationLog;

// ---------------------------------------------------------------------------
// Fixed request text
// ---------------------------------------------------------------------------

const CHAT_SYSTEM_INSTRUCTION: &str = "You are a helpful assistant focused on reducing food \
     waste. Provide creative recipes, storage tips, and practical advice.";

const PLANNER_SYSTEM_INSTRUCTION: &str = "You are a master meal planner. Create a detailed, \
     day-by-day meal plan based on the user's ingredients and constraints, with the primary \
     goal of using up all ingredients and minimizing food waste. Provide a shopping list for \
     any minor missing items.";

const NEARBY_QUERY: &str = "Find food banks, compost centers, or community fridges near me.";

const TRANSCRIBE_PROMPT: &str = "Transcribe the following audio recording.";

/// Extended-reasoning budget for meal planning, in tokens.
const PLANNER_THINKING_BUDGET: i32 = 32_768;

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// A position obtained from the caller's location source at call time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Binary image plus its declared MIME type.
#[derive(Debug, Clone)]
pub struct ImageInput {
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

impl ImageInput {
    /// Read an image file, guessing the MIME type from the extension.
    pub fn from_path(path: &std::path::Path) -> std::io::Result<Self> {
        let bytes = std::fs::read(path)?;
        let mime_type = guess_image_mime(path).to_string();
        Ok(Self { bytes, mime_type })
    }
}

fn guess_image_mime(path: &std::path::Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        Some("bmp") => "image/bmp",
        _ => "application/octet-stream",
    }
}

// ---------------------------------------------------------------------------
// AssistantError
// ---------------------------------------------------------------------------

/// Errors surfaced by orchestrated operations.
#[derive(Debug, Error)]
pub enum AssistantError {
    /// A required input was missing or empty; raised before any network call.
    #[error("invalid input: {0}")]
    Validation(String),

    /// Provider-side or transport failure, passed through unchanged.
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// The speech payload could not be decoded.
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

fn validate(ok: bool, message: &str) -> Result<(), AssistantError> {
    if ok {
        Ok(())
    } else {
        Err(AssistantError::Validation(message.into()))
    }
}

// ---------------------------------------------------------------------------
// Assistant
// ---------------------------------------------------------------------------

/// Request orchestrator holding the provider backend and model settings.
///
/// Construct once and pass by reference; every operation is an independent
/// network round trip with no shared mutable state.
pub struct Assistant {
    backend: Arc<dyn GenerativeBackend>,
    text_model: String,
    planner_model: String,
    tts_model: String,
    voice: String,
}

impl Assistant {
    /// Build an assistant backed by the real [`GeminiClient`].
    ///
    /// # Errors
    ///
    /// Fails with [`ProviderError::MissingApiKey`] when no credential
    /// resolves — a fatal startup condition, checked before any operation.
    pub fn from_config(config: &ProviderConfig) -> Result<Self, ProviderError> {
        let client = GeminiClient::from_config(config)?;
        Ok(Self::with_backend(Arc::new(client), config))
    }

    /// Build an assistant over an arbitrary backend (tests inject doubles
    /// here).
    pub fn with_backend(backend: Arc<dyn GenerativeBackend>, config: &ProviderConfig) -> Self {
        Self {
            backend,
            text_model: config.text_model.clone(),
            planner_model: config.planner_model.clone(),
            tts_model: config.tts_model.clone(),
            voice: config.voice.clone(),
        }
    }

    /// Suggest recipes (or anything the prompt asks) from a photo.
    ///
    /// One multimodal request: inline image payload followed by the text
    /// instruction, default model.
    pub async fn analyze_visual(
        &self,
        image: &ImageInput,
        prompt: &str,
    ) -> Result<String, AssistantError> {
        validate(!image.bytes.is_empty(), "image must not be empty")?;
        validate(!prompt.trim().is_empty(), "prompt must not be empty")?;

        let request = GenerateContentRequest {
            contents: vec![Content::user(vec![
                Part::inline(&image.mime_type, BASE64.encode(&image.bytes)),
                Part::text(prompt),
            ])],
            ..Default::default()
        };

        let response = self.backend.generate(&self.text_model, request).await?;
        Ok(response.text().ok_or(ProviderError::EmptyResponse)?)
    }

    /// One chat turn: the prior history plus `new_message` appended as the
    /// final user content, under the fixed food-waste system instruction.
    ///
    /// The log is read, never written — appending the exchanged turns after
    /// a successful reply is the caller's job.
    pub async fn converse(
        &self,
        log: &ConversationLog,
        new_message: &str,
    ) -> Result<String, AssistantError> {
        validate(!new_message.trim().is_empty(), "message must not be empty")?;

        let mut contents = log.to_history();
        contents.push(Content::user(vec![Part::text(new_message)]));

        let request = GenerateContentRequest {
            contents,
            system_instruction: Some(Content::text(CHAT_SYSTEM_INSTRUCTION)),
            ..Default::default()
        };

        let response = self.backend.generate(&self.text_model, request).await?;
        Ok(response.text().ok_or(ProviderError::EmptyResponse)?)
    }

    /// Produce a multi-day meal plan from free-text constraints, on the
    /// higher-capability model with an extended reasoning budget.
    pub async fn plan_meals(&self, prompt: &str) -> Result<String, AssistantError> {
        validate(!prompt.trim().is_empty(), "prompt must not be empty")?;

        let request = GenerateContentRequest {
            contents: vec![Content::user(vec![Part::text(prompt)])],
            system_instruction: Some(Content::text(PLANNER_SYSTEM_INSTRUCTION)),
            generation_config: Some(GenerationConfig {
                thinking_config: Some(ThinkingConfig {
                    thinking_budget: PLANNER_THINKING_BUDGET,
                }),
                ..Default::default()
            }),
            ..Default::default()
        };

        let response = self.backend.generate(&self.planner_model, request).await?;
        Ok(response.text().ok_or(ProviderError::EmptyResponse)?)
    }

    /// Answer a factual question with the web-search retrieval tool enabled.
    /// Every returned citation is a [`Citation::Web`].
    pub async fn search_facts(&self, query: &str) -> Result<GroundedAnswer, AssistantError> {
        validate(!query.trim().is_empty(), "query must not be empty")?;

        let request = GenerateContentRequest {
            contents: vec![Content::user(vec![Part::text(query)])],
            tools: Some(vec![Tool::google_search()]),
            ..Default::default()
        };

        let response = self.backend.generate(&self.text_model, request).await?;
        let text = response.text().ok_or(ProviderError::EmptyResponse)?;
        let citations = Citation::from_grounding(response.grounding_metadata());
        Ok(GroundedAnswer { text, citations })
    }

    /// Look up food banks, compost centers and community fridges near the
    /// given position, with the maps retrieval tool biased to it. Every
    /// returned citation is a [`Citation::Maps`].
    pub async fn find_nearby(
        &self,
        location: Coordinates,
    ) -> Result<GroundedAnswer, AssistantError> {
        validate(
            (-90.0..=90.0).contains(&location.latitude),
            "latitude must be in [-90, 90]",
        )?;
        validate(
            (-180.0..=180.0).contains(&location.longitude),
            "longitude must be in [-180, 180]",
        )?;

        let request = GenerateContentRequest {
            contents: vec![Content::user(vec![Part::text(NEARBY_QUERY)])],
            tools: Some(vec![Tool::google_maps()]),
            tool_config: Some(ToolConfig {
                retrieval_config: RetrievalConfig {
                    lat_lng: LatLng {
                        latitude: location.latitude,
                        longitude: location.longitude,
                    },
                },
            }),
            ..Default::default()
        };

        let response = self.backend.generate(&self.text_model, request).await?;
        let text = response.text().ok_or(ProviderError::EmptyResponse)?;
        let citations = Citation::from_grounding(response.grounding_metadata());
        Ok(GroundedAnswer { text, citations })
    }

    /// Transcribe one captured recording. The blob is consumed by value —
    /// a recording is used once and discarded.
    pub async fn transcribe(&self, recording: Recording) -> Result<String, AssistantError> {
        validate(!recording.bytes.is_empty(), "recording must not be empty")?;

        let request = GenerateContentRequest {
            contents: vec![Content::user(vec![
                Part::inline(&recording.mime_type, BASE64.encode(&recording.bytes)),
                Part::text(TRANSCRIBE_PROMPT),
            ])],
            ..Default::default()
        };

        let response = self.backend.generate(&self.text_model, request).await?;
        Ok(response.text().ok_or(ProviderError::EmptyResponse)?)
    }

    /// Synthesize speech for `text` with the configured voice.
    ///
    /// Returns the decoded 24 kHz mono buffer, or `Ok(None)` when the
    /// provider responds without an audio part (a soft no-op, matching the
    /// provider's occasional behavior).
    pub async fn synthesize_speech(
        &self,
        text: &str,
    ) -> Result<Option<AudioBuffer>, AssistantError> {
        validate(!text.trim().is_empty(), "text must not be empty")?;

        let request = GenerateContentRequest {
            contents: vec![Content::user(vec![Part::text(text)])],
            generation_config: Some(GenerationConfig {
                response_modalities: Some(vec!["AUDIO".into()]),
                speech_config: Some(SpeechConfig::voice(&self.voice)),
                ..Default::default()
            }),
            ..Default::default()
        };

        let response = self.backend.generate(&self.tts_model, request).await?;

        let Some(inline) = response.inline_data() else {
            log::debug!("speech synthesis returned no audio part");
            return Ok(None);
        };

        let bytes = decode_base64(&inline.data)?;
        let buffer = decode_pcm16(&bytes, TTS_SAMPLE_RATE, 1)?;
        Ok(Some(buffer))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assistant::conversation::{ChatTurn, Role};
    use crate::audio::encode_wav;
    use crate::gemini::types::{
        Candidate, GenerateContentResponse, GroundingChunk, GroundingMetadata, InlineData,
        MapsSource, WebSource,
    };
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    // -----------------------------------------------------------------------
    // Test doubles
    // -----------------------------------------------------------------------

    /// Replays a canned response and records every request it receives.
    struct CannedBackend {
        response: GenerateContentResponse,
        calls: AtomicUsize,
        last: Mutex<Option<(String, GenerateContentRequest)>>,
    }

    impl CannedBackend {
        fn new(response: GenerateContentResponse) -> Arc<Self> {
            Arc::new(Self {
                response,
                calls: AtomicUsize::new(0),
                last: Mutex::new(None),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn last_request(&self) -> (String, GenerateContentRequest) {
            self.last.lock().unwrap().clone().expect("no request seen")
        }
    }

    #[async_trait]
    impl GenerativeBackend for CannedBackend {
        async fn generate(
            &self,
            model: &str,
            request: GenerateContentRequest,
        ) -> Result<GenerateContentResponse, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last.lock().unwrap() = Some((model.to_string(), request));
            Ok(self.response.clone())
        }
    }

    fn text_response(text: &str) -> GenerateContentResponse {
        GenerateContentResponse {
            candidates: vec![Candidate {
                content: Some(Content {
                    role: Some("model".into()),
                    parts: vec![Part::text(text)],
                }),
                grounding_metadata: None,
            }],
        }
    }

    fn grounded_response(text: &str, chunks: Vec<GroundingChunk>) -> GenerateContentResponse {
        GenerateContentResponse {
            candidates: vec![Candidate {
                content: Some(Content {
                    role: Some("model".into()),
                    parts: vec![Part::text(text)],
                }),
                grounding_metadata: Some(GroundingMetadata {
                    grounding_chunks: chunks,
                }),
            }],
        }
    }

    fn audio_response(data: &str) -> GenerateContentResponse {
        GenerateContentResponse {
            candidates: vec![Candidate {
                content: Some(Content {
                    role: Some("model".into()),
                    parts: vec![Part {
                        text: None,
                        inline_data: Some(InlineData {
                            mime_type: "audio/L16;rate=24000".into(),
                            data: data.into(),
                        }),
                    }],
                }),
                grounding_metadata: None,
            }],
        }
    }

    fn assistant(backend: Arc<CannedBackend>) -> Assistant {
        Assistant::with_backend(backend, &ProviderConfig::default())
    }

    fn image() -> ImageInput {
        ImageInput {
            bytes: vec![0x89, 0x50, 0x4E, 0x47],
            mime_type: "image/png".into(),
        }
    }

    // ---- validation --------------------------------------------------------

    #[tokio::test]
    async fn analyze_visual_rejects_empty_prompt_before_network() {
        let backend = CannedBackend::new(text_response("unused"));
        let a = assistant(Arc::clone(&backend));

        let err = a.analyze_visual(&image(), "   ").await.unwrap_err();
        assert!(matches!(err, AssistantError::Validation(_)));
        assert_eq!(backend.calls(), 0);
    }

    #[tokio::test]
    async fn analyze_visual_rejects_empty_image_before_network() {
        let backend = CannedBackend::new(text_response("unused"));
        let a = assistant(Arc::clone(&backend));

        let empty = ImageInput {
            bytes: Vec::new(),
            mime_type: "image/png".into(),
        };
        let err = a.analyze_visual(&empty, "what's edible here?").await.unwrap_err();
        assert!(matches!(err, AssistantError::Validation(_)));
        assert_eq!(backend.calls(), 0);
    }

    #[tokio::test]
    async fn converse_rejects_empty_message() {
        let backend = CannedBackend::new(text_response("unused"));
        let a = assistant(Arc::clone(&backend));

        let err = a.converse(&ConversationLog::new(), "").await.unwrap_err();
        assert!(matches!(err, AssistantError::Validation(_)));
        assert_eq!(backend.calls(), 0);
    }

    #[tokio::test]
    async fn find_nearby_rejects_out_of_range_coordinates() {
        let backend = CannedBackend::new(text_response("unused"));
        let a = assistant(Arc::clone(&backend));

        let err = a
            .find_nearby(Coordinates {
                latitude: 120.0,
                longitude: 0.0,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AssistantError::Validation(_)));
        assert_eq!(backend.calls(), 0);
    }

    // ---- request shapes ----------------------------------------------------

    #[tokio::test]
    async fn analyze_visual_sends_image_then_prompt() {
        let backend = CannedBackend::new(text_response("Roast the carrots."));
        let a = assistant(Arc::clone(&backend));

        let text = a.analyze_visual(&image(), "recipe ideas?").await.unwrap();
        assert_eq!(text, "Roast the carrots.");
        assert_eq!(backend.calls(), 1);

        let (model, request) = backend.last_request();
        assert_eq!(model, "gemini-2.5-flash");
        let parts = &request.contents[0].parts;
        assert_eq!(parts.len(), 2);
        let inline = parts[0].inline_data.as_ref().unwrap();
        assert_eq!(inline.mime_type, "image/png");
        assert_eq!(inline.data, BASE64.encode(image().bytes));
        assert_eq!(parts[1].text.as_deref(), Some("recipe ideas?"));
    }

    #[tokio::test]
    async fn converse_appends_new_message_after_history() {
        let backend = CannedBackend::new(text_response("Try shakshuka."));
        let a = assistant(Arc::clone(&backend));

        let mut log = ConversationLog::new();
        log.append(ChatTurn::new(Role::User, "I have tomatoes"));
        log.append(ChatTurn::new(Role::Model, "Lucky you."));

        let reply = a.converse(&log, "and six eggs").await.unwrap();
        assert_eq!(reply, "Try shakshuka.");

        let (_, request) = backend.last_request();
        assert_eq!(request.contents.len(), 3);
        assert_eq!(request.contents[0].parts[0].text.as_deref(), Some("I have tomatoes"));
        assert_eq!(request.contents[1].role.as_deref(), Some("model"));
        assert_eq!(request.contents[2].role.as_deref(), Some("user"));
        assert_eq!(request.contents[2].parts[0].text.as_deref(), Some("and six eggs"));
        assert!(request
            .system_instruction
            .as_ref()
            .unwrap()
            .parts[0]
            .text
            .as_deref()
            .unwrap()
            .contains("reducing food waste"));
    }

    #[tokio::test]
    async fn plan_meals_uses_planner_model_with_thinking_budget() {
        let backend = CannedBackend::new(text_response("Day 1: frittata."));
        let a = assistant(Arc::clone(&backend));

        a.plan_meals("use up my eggs in 3 days").await.unwrap();

        let (model, request) = backend.last_request();
        assert_eq!(model, "gemini-2.5-pro");
        let config = request.generation_config.unwrap();
        assert_eq!(config.thinking_config.unwrap().thinking_budget, 32_768);
        assert!(request
            .system_instruction
            .unwrap()
            .parts[0]
            .text
            .as_deref()
            .unwrap()
            .contains("meal plan"));
    }

    #[tokio::test]
    async fn find_nearby_sends_fixed_query_and_lat_lng() {
        let backend = CannedBackend::new(text_response("Two options nearby."));
        let a = assistant(Arc::clone(&backend));

        a.find_nearby(Coordinates {
            latitude: 51.5,
            longitude: -0.1,
        })
        .await
        .unwrap();

        let (_, request) = backend.last_request();
        assert_eq!(
            request.contents[0].parts[0].text.as_deref(),
            Some("Find food banks, compost centers, or community fridges near me.")
        );
        assert!(request.tools.as_ref().unwrap()[0].google_maps.is_some());
        let lat_lng = &request.tool_config.unwrap().retrieval_config.lat_lng;
        assert_eq!(lat_lng.latitude, 51.5);
        assert_eq!(lat_lng.longitude, -0.1);
    }

    // ---- citation variants -------------------------------------------------

    #[tokio::test]
    async fn search_facts_returns_only_web_citations() {
        let chunks = vec![
            GroundingChunk {
                web: Some(WebSource {
                    uri: "https://a.example".into(),
                    title: "A".into(),
                }),
                maps: None,
            },
            GroundingChunk {
                web: Some(WebSource {
                    uri: "https://b.example".into(),
                    title: "B".into(),
                }),
                maps: None,
            },
        ];
        let backend = CannedBackend::new(grounded_response("About a third is wasted.", chunks));
        let a = assistant(Arc::clone(&backend));

        let answer = a.search_facts("how much food is wasted?").await.unwrap();
        assert_eq!(answer.text, "About a third is wasted.");
        assert_eq!(answer.citations.len(), 2);
        assert!(answer.citations.iter().all(|c| c.is_web()));

        let (_, request) = backend.last_request();
        assert!(request.tools.as_ref().unwrap()[0].google_search.is_some());
        assert!(request.tool_config.is_none());
    }

    #[tokio::test]
    async fn find_nearby_returns_only_maps_citations() {
        let chunks = vec![GroundingChunk {
            web: None,
            maps: Some(MapsSource {
                uri: "https://maps.example/bank".into(),
                title: "Food Bank".into(),
                place_answer_sources: Vec::new(),
            }),
        }];
        let backend = CannedBackend::new(grounded_response("One food bank nearby.", chunks));
        let a = assistant(Arc::clone(&backend));

        let answer = a
            .find_nearby(Coordinates {
                latitude: 0.0,
                longitude: 0.0,
            })
            .await
            .unwrap();
        assert_eq!(answer.citations.len(), 1);
        assert!(answer.citations.iter().all(|c| c.is_maps()));
    }

    #[tokio::test]
    async fn grounded_ops_tolerate_absent_metadata() {
        let backend = CannedBackend::new(text_response("No sources this time."));
        let a = assistant(Arc::clone(&backend));

        let answer = a.search_facts("anything?").await.unwrap();
        assert!(answer.citations.is_empty());
    }

    // ---- transcription -----------------------------------------------------

    /// One second of synthetic silence makes it through the capture →
    /// transcribe wiring against a canned transcript.
    #[tokio::test]
    async fn transcribe_round_trips_synthetic_silence() {
        let backend = CannedBackend::new(text_response("test"));
        let a = assistant(Arc::clone(&backend));

        let recording = Recording {
            bytes: encode_wav(&vec![0.0_f32; 24_000], 24_000, 1),
            mime_type: "audio/wav".into(),
            duration_secs: 1.0,
        };

        let transcript = a.transcribe(recording).await.unwrap();
        assert_eq!(transcript, "test");

        let (_, request) = backend.last_request();
        let parts = &request.contents[0].parts;
        assert_eq!(
            parts[0].inline_data.as_ref().unwrap().mime_type,
            "audio/wav"
        );
        assert_eq!(
            parts[1].text.as_deref(),
            Some("Transcribe the following audio recording.")
        );
    }

    #[tokio::test]
    async fn transcribe_rejects_empty_recording() {
        let backend = CannedBackend::new(text_response("unused"));
        let a = assistant(Arc::clone(&backend));

        let empty = Recording {
            bytes: Vec::new(),
            mime_type: "audio/wav".into(),
            duration_secs: 0.0,
        };
        let err = a.transcribe(empty).await.unwrap_err();
        assert!(matches!(err, AssistantError::Validation(_)));
        assert_eq!(backend.calls(), 0);
    }

    // ---- speech synthesis --------------------------------------------------

    #[tokio::test]
    async fn synthesize_speech_decodes_pcm_payload() {
        // Two samples: 0x0000 → 0.0, 0x8000 → -1.0
        let payload = BASE64.encode([0x00u8, 0x00, 0x00, 0x80]);
        let backend = CannedBackend::new(audio_response(&payload));
        let a = assistant(Arc::clone(&backend));

        let buffer = a.synthesize_speech("read this").await.unwrap().unwrap();
        assert_eq!(buffer.sample_rate, 24_000);
        assert_eq!(buffer.channels, 1);
        assert_eq!(buffer.samples, vec![0.0, -1.0]);

        let (model, request) = backend.last_request();
        assert_eq!(model, "gemini-2.5-flash-preview-tts");
        let config = request.generation_config.unwrap();
        assert_eq!(config.response_modalities.unwrap(), vec!["AUDIO"]);
        assert_eq!(
            config
                .speech_config
                .unwrap()
                .voice_config
                .prebuilt_voice_config
                .voice_name,
            "Kore"
        );
    }

    #[tokio::test]
    async fn synthesize_speech_without_audio_part_is_soft_none() {
        let backend = CannedBackend::new(text_response("no audio here"));
        let a = assistant(Arc::clone(&backend));

        let result = a.synthesize_speech("read this").await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn synthesize_speech_surfaces_malformed_payload() {
        // Odd byte count after decoding → malformed PCM.
        let payload = BASE64.encode([0x01u8, 0x02, 0x03]);
        let backend = CannedBackend::new(audio_response(&payload));
        let a = assistant(Arc::clone(&backend));

        let err = a.synthesize_speech("read this").await.unwrap_err();
        assert!(matches!(
            err,
            AssistantError::Decode(DecodeError::MalformedAudio(3))
        ));
    }

    // ---- empty responses ---------------------------------------------------

    #[tokio::test]
    async fn empty_text_response_is_provider_error() {
        let backend = CannedBackend::new(GenerateContentResponse::default());
        let a = assistant(Arc::clone(&backend));

        let err = a.plan_meals("anything").await.unwrap_err();
        assert!(matches!(
            err,
            AssistantError::Provider(ProviderError::EmptyResponse)
        ));
    }

    // ---- mime guessing -----------------------------------------------------

    #[test]
    fn image_mime_from_extension() {
        use std::path::Path;
        assert_eq!(guess_image_mime(Path::new("fridge.png")), "image/png");
        assert_eq!(guess_image_mime(Path::new("leftovers.JPG")), "image/jpeg");
        assert_eq!(guess_image_mime(Path::new("pantry.webp")), "image/webp");
        assert_eq!(
            guess_image_mime(Path::new("mystery")),
            "application/octet-stream"
        );
    }
}
