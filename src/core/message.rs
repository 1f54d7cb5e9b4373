use chrono::{DateTime, Local};

/// Display format for message timestamps. Minute precision is all the
/// transcript ever shows.
pub const TIMESTAMP_FORMAT: &str = "%I:%M %p";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sender {
    User,
    Assistant,
}

impl Sender {
    pub fn as_str(self) -> &'static str {
        match self {
            Sender::User => "user",
            Sender::Assistant => "assistant",
        }
    }

    pub fn is_user(self) -> bool {
        self == Sender::User
    }

    pub fn is_assistant(self) -> bool {
        self == Sender::Assistant
    }
}

impl AsRef<str> for Sender {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl TryFrom<&str> for Sender {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "user" => Ok(Sender::User),
            "assistant" => Ok(Sender::Assistant),
            _ => Err(format!("invalid sender: {value}")),
        }
    }
}

/// One turn in the conversation. Immutable once built; the history hands out
/// shared references rather than letting callers edit entries in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    sender: Sender,
    author: String,
    text: String,
    timestamp: DateTime<Local>,
}

impl ChatMessage {
    fn new(sender: Sender, author: impl Into<String>, text: &str) -> Self {
        Self {
            sender,
            author: author.into(),
            text: text.trim().to_string(),
            timestamp: Local::now(),
        }
    }

    /// Builds a user entry. Callers validate that `text` is non-empty after
    /// trimming before getting here.
    pub fn user(author: impl Into<String>, text: &str) -> Self {
        Self::new(Sender::User, author, text)
    }

    /// Builds an assistant entry, substituting `fallback` when the engine
    /// produced nothing but whitespace.
    pub fn assistant(author: impl Into<String>, text: &str, fallback: &str) -> Self {
        if text.trim().is_empty() {
            Self::new(Sender::Assistant, author, fallback)
        } else {
            Self::new(Sender::Assistant, author, text)
        }
    }

    pub fn sender(&self) -> Sender {
        self.sender
    }

    /// Label captured when the message was appended. Renaming the user later
    /// never relabels existing entries.
    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn timestamp(&self) -> DateTime<Local> {
        self.timestamp
    }

    pub fn display_time(&self) -> String {
        self.timestamp.format(TIMESTAMP_FORMAT).to_string()
    }

    pub fn is_user(&self) -> bool {
        self.sender.is_user()
    }

    pub fn is_assistant(&self) -> bool {
        self.sender.is_assistant()
    }
}
