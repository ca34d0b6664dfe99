//! Append-only conversation state for one chat session.
//!
//! The log owns the ordered turns of a single session and maps them to the
//! provider's history format on demand. The newest user message is never
//! part of the log when a request is built — it travels separately as the
//! final content of the request and is appended here only after the
//! exchange completes.

use crate::gemini::types::{Content, Part};

// ---------------------------------------------------------------------------
// Role / ChatTurn
// ---------------------------------------------------------------------------

/// Who produced a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Model,
}

impl Role {
    /// Wire-format role string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Model => "model",
        }
    }
}

/// One immutable conversation turn.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatTurn {
    pub role: Role,
    pub text: String,
}

impl ChatTurn {
    pub fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// ConversationLog
// ---------------------------------------------------------------------------

/// Ordered, append-only sequence of [`ChatTurn`]s owned by one chat session.
///
/// No size cap: unbounded growth for the session's lifetime is accepted.
/// Existing entries are never mutated.
#[derive(Debug, Clone, Default)]
pub struct ConversationLog {
    turns: Vec<ChatTurn>,
}

impl ConversationLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `turn` to the end of the log.
    pub fn append(&mut self, turn: ChatTurn) {
        self.turns.push(turn);
    }

    /// All appended turns, in order.
    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Map every appended turn, in order, to the provider history format.
    ///
    /// The pending user message is passed to the orchestrator separately and
    /// is therefore never included here.
    pub fn to_history(&self) -> Vec<Content> {
        self.turns
            .iter()
            .map(|turn| Content {
                role: Some(turn.role.as_str().into()),
                parts: vec![Part::text(&turn.text)],
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
