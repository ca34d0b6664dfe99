//! Per-operation result slot.
//!
//! Every orchestrated operation either fully succeeds with a normalized
//! value or fully fails; [`OpState`] makes that lifecycle explicit for
//! whatever rendering layer sits on top, with no coupling to a UI
//! framework. A "start over" simply overwrites the slot — in-flight
//! requests are not cancellable, their late result is discarded on arrival.

// ---------------------------------------------------------------------------
// OpState
// ---------------------------------------------------------------------------

/// Lifecycle of one operation's result slot.
///
/// ```text
/// Idle ──dispatch──▶ Pending ──ok──▶ Success(value)
///                            ──err─▶ Failed(message)
/// Success / Failed ──new dispatch──▶ Pending
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum OpState<T> {
    /// Nothing dispatched yet.
    Idle,
    /// A request is in flight.
    Pending,
    /// The operation completed with a normalized value.
    Success(T),
    /// The operation failed; prior state elsewhere is left untouched.
    Failed(String),
}

impl<T> OpState<T> {
    /// `true` while a request is in flight.
    pub fn is_busy(&self) -> bool {
        matches!(self, OpState::Pending)
    }

    /// The success value, if any.
    pub fn value(&self) -> Option<&T> {
        match self {
            OpState::Success(v) => Some(v),
            _ => None,
        }
    }

    /// The failure message, if any.
    pub fn error(&self) -> Option<&str> {
        match self {
            OpState::Failed(msg) => Some(msg),
            _ => None,
        }
    }

    /// Fold a `Result` into the slot.
    pub fn from_result<E: std::fmt::Display>(result: Result<T, E>) -> Self {
        match result {
            Ok(v) => OpState::Success(v),
            Err(e) => OpState::Failed(e.to_string()),
        }
    }

    /// A short label suitable for a status line.
    pub fn label(&self) -> &'static str {
        match self {
            OpState::Idle => "Idle",
            OpState::Pending => "Working",
            OpState::Success(_) => "Done",
            OpState::Failed(_) => "Error",
        }
    }
}

impl<T> Default for OpState<T> {
    fn default() -> Self {
        OpState::Idle
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
