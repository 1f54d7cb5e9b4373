//! The question-answering backend seam.
//!
//! [`ChatEngine`] is called synchronously from a blocking background unit, so
//! implementations are free to do slow work. [`CannedEngine`] is the
//! configuration-driven engine the binary ships with.

use super::config::data::EngineConfig;
use super::error::EngineError;

pub trait ChatEngine: Send + Sync + 'static {
    fn process_query(&self, text: &str, identity: Option<&str>) -> Result<String, EngineError>;
}

impl<F> ChatEngine for F
where
    F: Fn(&str, Option<&str>) -> Result<String, EngineError> + Send + Sync + 'static,
{
    fn process_query(&self, text: &str, identity: Option<&str>) -> Result<String, EngineError> {
        self(text, identity)
    }
}

#[derive(Debug, Clone)]
struct CannedReply {
    /// Each keyword split into lowercase words.
    keywords: Vec<Vec<String>>,
    reply: String,
}

/// Answers by keyword lookup. The first reply whose keyword appears in the
/// query wins; otherwise the default reply is used.
///
/// Keywords match on word starts, so "visit" matches "visiting" but "er"
/// never matches "where".
#[derive(Debug, Clone)]
pub struct CannedEngine {
    replies: Vec<CannedReply>,
    default_reply: String,
}

impl CannedEngine {
    pub fn from_config(config: &EngineConfig) -> Self {
        let replies = config
            .replies
            .iter()
            .map(|entry| CannedReply {
                keywords: entry
                    .keywords
                    .iter()
                    .map(|keyword| words(keyword))
                    .filter(|keyword| !keyword.is_empty())
                    .collect(),
                reply: entry.reply.clone(),
            })
            .filter(|entry| !entry.keywords.is_empty())
            .collect();

        Self {
            replies,
            default_reply: config.default_reply.clone(),
        }
    }

    fn lookup(&self, query: &str) -> &str {
        let query = words(query);
        self.replies
            .iter()
            .find(|entry| {
                entry
                    .keywords
                    .iter()
                    .any(|keyword| contains_phrase(&query, keyword))
            })
            .map(|entry| entry.reply.as_str())
            .unwrap_or(&self.default_reply)
    }
}

fn words(text: &str) -> Vec<String> {
    text.split(|ch: char| !ch.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// True when `phrase` occurs as consecutive words of `query`, each phrase
/// word being a prefix of the query word it lines up with.
fn contains_phrase(query: &[String], phrase: &[String]) -> bool {
    query.windows(phrase.len()).any(|window| {
        window
            .iter()
            .zip(phrase)
            .all(|(word, part)| word.starts_with(part.as_str()))
    })
}

impl ChatEngine for CannedEngine {
    fn process_query(&self, text: &str, identity: Option<&str>) -> Result<String, EngineError> {
        let reply = self.lookup(text);
        if reply.trim().is_empty() {
            return Err(EngineError::new("no reply configured for query"));
        }

        Ok(match identity {
            Some(name) => format!("Hi {name}, {reply}"),
            None => reply.to_string(),
        })
    }
}
