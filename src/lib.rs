//! Food-waste-reduction assistant backed by the Gemini generative API.
//!
//! Everything the crate does is a thin, stateless request/response wrapper
//! around one hosted provider, plus a local audio pipeline:
//!
//! * [`assistant::Assistant`] — the orchestrator: recipe suggestions from
//!   photos, conversational advice, multi-day meal plans, grounded web
//!   search, nearby-resource lookup, transcription and speech synthesis.
//! * [`audio`] — microphone capture into a WAV blob, raw PCM16 decode, and
//!   one-shot playback.
//! * [`gemini`] — the provider wire types and HTTP client behind the
//!   [`gemini::GenerativeBackend`] seam.
//! * [`config`] — TOML-persisted settings and platform paths.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use wastenot::assistant::Assistant;
//! use wastenot::config::AppConfig;
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = AppConfig::load().unwrap();
//!     let assistant = Assistant::from_config(&config.provider).unwrap();
//!
//!     let plan = assistant
//!         .plan_meals("3 days, wilting spinach, half a loaf of bread, 4 eggs")
//!         .await
//!         .unwrap();
//!     println!("{plan}");
//! }
//! ```

pub mod assistant;
pub mod audio;
pub mod config;
pub mod gemini;
