/// Whether the assistant is currently "typing" from the user's point of view.
///
/// Transitions report whether they changed anything so the controller only
/// emits render events on real edges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TypingIndicator {
    #[default]
    Idle,
    Pending,
}

impl TypingIndicator {
    pub fn is_pending(self) -> bool {
        self == TypingIndicator::Pending
    }

    pub fn start(&mut self) -> bool {
        let changed = !self.is_pending();
        *self = TypingIndicator::Pending;
        changed
    }

    pub fn stop(&mut self) -> bool {
        let changed = self.is_pending();
        *self = TypingIndicator::Idle;
        changed
    }
}
