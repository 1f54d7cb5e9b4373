use thiserror::Error;

/// Why a submission never reached the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("message is empty")]
    EmptyMessage,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InteractionError {
    #[error("rejected input: {0}")]
    Validation(#[from] ValidationError),

    #[error("no quick action at position {index} ({available} available)")]
    UnknownQuickAction { index: usize, available: usize },
}

/// Failure reported by a [`ChatEngine`](super::engine::ChatEngine).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct EngineError {
    message: String,
}

impl EngineError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
