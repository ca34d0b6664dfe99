//! Request orchestration for the food-waste assistant.
//!
//! This module provides:
//! * [`Assistant`] — one pure async operation per feature, each building a
//!   single provider request and normalizing the result.
//! * [`ConversationLog`] / [`ChatTurn`] — append-only chat session state.
//! * [`Citation`] / [`GroundedAnswer`] — normalized grounded results.
//! * [`OpState`] — explicit per-operation result slot for callers.
//! * [`AssistantError`] — error variants for orchestrated operations.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use wastenot::assistant::{Assistant, ChatTurn, ConversationLog, Role};
//! use wastenot::config::AppConfig;
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = AppConfig::load().unwrap();
//!     let assistant = Assistant::from_config(&config.provider).unwrap();
//!
//!     let mut log = ConversationLog::new();
//!     let reply = assistant
//!         .converse(&log, "What can I do with sour milk?")
//!         .await
//!         .unwrap();
//!
//!     log.append(ChatTurn::new(Role::User, "What can I do with sour milk?"));
//!     log.append(ChatTurn::new(Role::Model, reply.clone()));
//!     println!("{reply}");
//! }
//! ```

pub mod citation;
pub mod conversation;
pub mod orchestrator;
pub mod state;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use citation::{Citation, GroundedAnswer, ReviewSnippet};
pub use conversation::{ChatTurn, ConversationLog, Role};
pub use orchestrator::{Assistant, AssistantError, Coordinates, ImageInput};
pub use state::OpState;
