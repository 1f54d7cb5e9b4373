use std::sync::Arc;

use tokio::sync::mpsc;

use super::error::ValidationError;
use super::message::ChatMessage;

/// What the presentation layer is told. The core never looks at what the
/// renderer does with these.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderEvent {
    MessageAppended(Arc<ChatMessage>),
    TypingStarted,
    TypingStopped,
    HistoryCleared,
    ValidationRejected(ValidationError),
}

#[derive(Clone)]
pub struct RenderEventSender {
    tx: mpsc::UnboundedSender<RenderEvent>,
}

impl RenderEventSender {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<RenderEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    pub fn emit(&self, event: RenderEvent) {
        if self.tx.send(event).is_err() {
            tracing::debug!("render event dropped: presentation loop has shut down");
        }
    }
}
