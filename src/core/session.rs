use super::history::ChatHistory;
use super::typing::TypingIndicator;

/// Everything the conversation mutates, owned by the controller and only
/// touched from the UI loop.
#[derive(Debug, Default)]
pub struct SessionState {
    pub history: ChatHistory,
    pub identity: Option<String>,
    pub typing: TypingIndicator,
    /// Bumped on every clear. Requests remember the epoch they were submitted
    /// in so late deliveries can be told apart from live ones.
    pub epoch: u64,
}

impl SessionState {
    pub fn new(identity: Option<String>) -> Self {
        Self {
            identity: normalize_identity(identity.as_deref().unwrap_or_default()),
            ..Self::default()
        }
    }

    pub fn set_identity(&mut self, name: &str) {
        self.identity = normalize_identity(name);
    }

    pub fn identity(&self) -> Option<&str> {
        self.identity.as_deref()
    }

    pub fn reset(&mut self) {
        self.history.clear();
        self.typing.stop();
        self.epoch = self.epoch.wrapping_add(1);
    }
}

fn normalize_identity(name: &str) -> Option<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::message::ChatMessage;

    #[test]
    fn identity_is_trimmed_and_blank_clears_it() {
        let mut session = SessionState::new(Some("  Ada ".into()));
        assert_eq!(session.identity(), Some("Ada"));

        session.set_identity("   ");
        assert_eq!(session.identity(), None);
    }

    #[test]
    fn reset_clears_history_and_advances_epoch() {
        let mut session = SessionState::new(None);
        session.history.append(ChatMessage::user("You", "hi"));
        session.typing.start();

        session.reset();

        assert!(session.history.is_empty());
        assert!(!session.typing.is_pending());
        assert_eq!(session.epoch, 1);
    }
}
