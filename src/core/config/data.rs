use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_USER_LABEL: &str = "You";
pub const DEFAULT_ASSISTANT_NAME: &str = "Assistant";
pub const DEFAULT_DELIVERY_DELAY_MS: u64 = 800;
pub const DEFAULT_FALLBACK_REPLY: &str =
    "Sorry, I couldn't process that request right now. Please try again in a moment.";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ReplyConfig {
    #[serde(default)]
    pub keywords: Vec<String>,
    pub reply: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    #[serde(default = "default_engine_reply")]
    pub default_reply: String,
    #[serde(default = "default_engine_replies")]
    pub replies: Vec<ReplyConfig>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_reply: default_engine_reply(),
            replies: default_engine_replies(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Config {
    /// Name shown on outgoing messages until the user sets one.
    pub default_identity: Option<String>,
    #[serde(default = "default_user_label")]
    pub user_label: String,
    #[serde(default = "default_assistant_name")]
    pub assistant_name: String,
    /// Pause between the engine answering and the reply appearing, so the
    /// typing indicator is visible.
    #[serde(default = "default_delivery_delay_ms")]
    pub delivery_delay_ms: u64,
    /// Cap on concurrent backend calls. Unset means no cap.
    pub max_in_flight: Option<usize>,
    #[serde(default = "default_fallback_reply")]
    pub fallback_reply: String,
    #[serde(default = "default_quick_actions")]
    pub quick_actions: Vec<String>,
    #[serde(default)]
    pub engine: EngineConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_identity: None,
            user_label: default_user_label(),
            assistant_name: default_assistant_name(),
            delivery_delay_ms: default_delivery_delay_ms(),
            max_in_flight: None,
            fallback_reply: default_fallback_reply(),
            quick_actions: default_quick_actions(),
            engine: EngineConfig::default(),
        }
    }
}

impl Config {
    pub fn delivery_delay(&self) -> Duration {
        Duration::from_millis(self.delivery_delay_ms)
    }
}

fn default_user_label() -> String {
    DEFAULT_USER_LABEL.to_string()
}

fn default_assistant_name() -> String {
    DEFAULT_ASSISTANT_NAME.to_string()
}

fn default_delivery_delay_ms() -> u64 {
    DEFAULT_DELIVERY_DELAY_MS
}

fn default_fallback_reply() -> String {
    DEFAULT_FALLBACK_REPLY.to_string()
}

fn default_quick_actions() -> Vec<String> {
    [
        "How do I book an appointment?",
        "What are the pharmacy hours?",
        "How do I pay my bill?",
        "Where is the emergency room?",
        "What are the visiting hours?",
        "How do I get lab test results?",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_engine_reply() -> String {
    "I can help with appointments, the pharmacy, billing, emergencies, visiting hours and lab results. What would you like to know?".to_string()
}

fn default_engine_replies() -> Vec<ReplyConfig> {
    let entry = |keywords: &[&str], reply: &str| ReplyConfig {
        keywords: keywords.iter().map(|k| k.to_string()).collect(),
        reply: reply.to_string(),
    };

    vec![
        entry(
            &["appointment", "book", "schedule"],
            "you can book an appointment at the front desk or by calling reception during office hours.",
        ),
        entry(
            &["pharmacy", "medicine", "prescription"],
            "the pharmacy is open from 8 AM to 8 PM on weekdays and 9 AM to 5 PM on weekends.",
        ),
        entry(
            &["bill", "pay", "invoice", "insurance"],
            "bills can be paid at the billing counter on the ground floor or through the patient portal.",
        ),
        entry(
            &["emergency", "urgent"],
            "the emergency room is open 24/7 at the east entrance. If this is an emergency, call your local emergency number.",
        ),
        entry(
            &["visit", "visiting"],
            "visiting hours are from 10 AM to 8 PM daily.",
        ),
        entry(
            &["lab", "test result", "results"],
            "lab results are usually ready within 48 hours and can be collected from the lab reception.",
        ),
    ]
}

pub fn path_display(path: impl AsRef<Path>) -> String {
    path.as_ref().display().to_string()
}
