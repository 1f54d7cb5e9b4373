use std::sync::Arc;

use super::message::ChatMessage;

/// Append-only log of the current session. Entries are shared behind `Arc`
/// so a render pass can hold a snapshot while new messages keep arriving.
#[derive(Debug, Default)]
pub struct ChatHistory {
    entries: Vec<Arc<ChatMessage>>,
}

impl ChatHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends in chronological order and returns the shared entry so callers
    /// can forward it to the renderer without cloning the text.
    pub fn append(&mut self, message: ChatMessage) -> Arc<ChatMessage> {
        let entry = Arc::new(message);
        self.entries.push(Arc::clone(&entry));
        entry
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        self.entries.last().map(|entry| &**entry)
    }

    pub fn all(&self) -> HistorySnapshot {
        HistorySnapshot {
            entries: self.entries.clone().into(),
        }
    }
}

/// Point-in-time view of the history. Iteration can be restarted any number of
/// times and never observes appends made after the snapshot was taken.
#[derive(Debug, Clone)]
pub struct HistorySnapshot {
    entries: Arc<[Arc<ChatMessage>]>,
}

impl HistorySnapshot {
    pub fn iter(&self) -> impl Iterator<Item = &ChatMessage> + '_ {
        self.entries.iter().map(|entry| &**entry)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ChatMessage> {
        self.entries.get(index).map(|entry| &**entry)
    }
}
