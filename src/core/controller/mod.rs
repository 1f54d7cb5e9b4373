//! The interaction façade the presentation loop talks to.
//!
//! [`InteractionController`] owns the [`SessionState`] outright and is only
//! ever driven from the UI loop, so history and the typing indicator have a
//! single writer and need no locking. Background work reaches it exclusively
//! through [`InteractionController::on_response`], called by the loop when a
//! [`Delivery`] comes off the dispatcher channel.

use tracing::{debug, info, warn};

use super::config::Config;
use super::dispatcher::{
    Delivery, DeliveryOutcome, DispatchHandle, Dispatcher, PendingRequest, RequestId,
};
use super::error::{InteractionError, ValidationError};
use super::events::{RenderEvent, RenderEventSender};
use super::history::HistorySnapshot;
use super::message::ChatMessage;
use super::session::SessionState;

#[derive(Debug, Clone)]
pub struct ControllerSettings {
    pub user_label: String,
    pub assistant_name: String,
    pub fallback_reply: String,
    pub quick_actions: Vec<String>,
    pub default_identity: Option<String>,
}

impl From<&Config> for ControllerSettings {
    fn from(config: &Config) -> Self {
        Self {
            user_label: config.user_label.clone(),
            assistant_name: config.assistant_name.clone(),
            fallback_reply: config.fallback_reply.clone(),
            quick_actions: config.quick_actions.clone(),
            default_identity: config.default_identity.clone(),
        }
    }
}

pub struct InteractionController {
    session: SessionState,
    dispatcher: Dispatcher,
    events: RenderEventSender,
    settings: ControllerSettings,
    next_request_id: RequestId,
    /// Submitted requests whose delivery has not been applied yet.
    in_flight: usize,
}

impl InteractionController {
    pub fn new(
        dispatcher: Dispatcher,
        events: RenderEventSender,
        settings: ControllerSettings,
    ) -> Self {
        Self {
            session: SessionState::new(settings.default_identity.clone()),
            dispatcher,
            events,
            settings,
            next_request_id: 1,
            in_flight: 0,
        }
    }

    /// Validates and sends a message. Whitespace-only input is rejected
    /// without touching the history or spawning a backend call.
    pub fn submit(&mut self, raw_text: &str) -> Result<DispatchHandle, InteractionError> {
        let text = raw_text.trim();
        if text.is_empty() {
            debug!("rejected empty submission");
            self.events
                .emit(RenderEvent::ValidationRejected(ValidationError::EmptyMessage));
            return Err(ValidationError::EmptyMessage.into());
        }

        let author = self
            .session
            .identity()
            .unwrap_or(self.settings.user_label.as_str())
            .to_string();
        let entry = self.session.history.append(ChatMessage::user(author, text));
        self.events.emit(RenderEvent::MessageAppended(entry));

        if self.session.typing.start() {
            self.events.emit(RenderEvent::TypingStarted);
        }

        let request = PendingRequest {
            id: self.allocate_request_id(),
            epoch: self.session.epoch,
            text: text.to_string(),
            identity: self.session.identity.clone(),
        };
        info!(request_id = request.id, epoch = request.epoch, "message submitted");

        self.in_flight += 1;
        Ok(self.dispatcher.dispatch(request))
    }

    /// Submits the canned query at `index` in the quick-action list.
    pub fn submit_quick_action(&mut self, index: usize) -> Result<DispatchHandle, InteractionError> {
        let query = self
            .settings
            .quick_actions
            .get(index)
            .cloned()
            .ok_or(InteractionError::UnknownQuickAction {
                index,
                available: self.settings.quick_actions.len(),
            })?;
        self.submit(&query)
    }

    pub fn quick_actions(&self) -> &[String] {
        &self.settings.quick_actions
    }

    /// Applies to later submissions only; existing entries keep the label
    /// they were appended with. Blank input reverts to the default label.
    pub fn set_identity(&mut self, name: &str) {
        self.session.set_identity(name);
        debug!(identity = ?self.session.identity(), "identity updated");
    }

    pub fn identity(&self) -> Option<&str> {
        self.session.identity()
    }

    /// Empties the conversation. In-flight requests are not cancelled; their
    /// replies still land in the fresh history when they arrive.
    pub fn clear(&mut self) {
        let was_pending = self.session.typing.is_pending();
        self.session.reset();
        if was_pending {
            self.events.emit(RenderEvent::TypingStopped);
        }
        self.events.emit(RenderEvent::HistoryCleared);
        info!(epoch = self.session.epoch, "conversation cleared");
    }

    /// Applies a completed backend call. Must run on the UI loop.
    ///
    /// A delivery from before the last clear is still appended, but it never
    /// touches the typing indicator: the request it belonged to was already
    /// dismissed, and the indicator may now belong to a newer submission.
    pub fn on_response(&mut self, delivery: Delivery) {
        self.in_flight = self.in_flight.saturating_sub(1);
        let stale = delivery.epoch != self.session.epoch;
        if stale {
            debug!(
                request_id = delivery.request_id,
                delivery_epoch = delivery.epoch,
                current_epoch = self.session.epoch,
                "late delivery after clear"
            );
        } else if self.session.typing.stop() {
            self.events.emit(RenderEvent::TypingStopped);
        }

        if let DeliveryOutcome::Fallback { reason } = &delivery.outcome {
            warn!(request_id = delivery.request_id, %reason, "showing fallback reply");
        }

        let entry = self.session.history.append(ChatMessage::assistant(
            self.settings.assistant_name.as_str(),
            &delivery.text,
            &self.settings.fallback_reply,
        ));
        self.events.emit(RenderEvent::MessageAppended(entry));
    }

    pub fn snapshot(&self) -> HistorySnapshot {
        self.session.history.all()
    }

    pub fn is_pending(&self) -> bool {
        self.session.typing.is_pending()
    }

    /// Requests still waiting for their delivery, stale ones included. Unlike
    /// [`is_pending`](Self::is_pending) this only reaches zero once every
    /// submission has been answered.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    pub fn epoch(&self) -> u64 {
        self.session.epoch
    }

    fn allocate_request_id(&mut self) -> RequestId {
        let id = self.next_request_id;
        self.next_request_id = self.next_request_id.wrapping_add(1);
        id
    }
}

#[cfg(test)]
mod tests;
