//! Command-line interface parsing and startup.
//!
//! Flags override values from the config file; the merged [`Config`] is
//! handed to [`run_chat`].

use std::error::Error;
use std::path::PathBuf;

use clap::Parser;

use crate::core::config::Config;
use crate::ui::chat_loop::run_chat;
use crate::utils::logging::init_logging;

#[derive(Parser, Debug)]
#[command(name = "chatdesk")]
#[command(about = "A terminal front desk assistant that keeps chatting while answers are on their way")]
#[command(
    long_about = "Chatdesk is a line-mode chat client. Each message is answered in the \
background, so you can keep typing while earlier questions are still being worked on.\n\n\
Configuration:\n\
  Settings are read from config.toml in the platform config directory, or from the \
file given with --config. Command-line flags take precedence.\n\n\
Commands:\n\
  /help             Show available commands\n\
  /clear            Start a fresh conversation\n\
  /name <name>      Set the name shown on your messages\n\
  /quick [n]        List quick actions, or send quick action n\n\
  /quit             Leave the chat (Ctrl+D also works)"
)]
pub struct Args {
    /// Read configuration from this file instead of the default location
    #[arg(short = 'c', long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Write diagnostic logs to this file
    #[arg(short = 'l', long, value_name = "PATH")]
    pub log: Option<PathBuf>,

    /// Name to show on your messages
    #[arg(short = 'n', long)]
    pub name: Option<String>,

    /// Milliseconds between an answer being ready and it appearing
    #[arg(long, value_name = "MS")]
    pub delay_ms: Option<u64>,

    /// Maximum number of questions answered at the same time
    #[arg(long, value_name = "N")]
    pub max_in_flight: Option<usize>,
}

impl Args {
    /// Applies command-line overrides on top of `config`.
    pub fn apply_to(&self, config: &mut Config) {
        if let Some(name) = &self.name {
            let name = name.trim();
            config.default_identity = (!name.is_empty()).then(|| name.to_string());
        }
        if let Some(delay_ms) = self.delay_ms {
            config.delivery_delay_ms = delay_ms;
        }
        if let Some(limit) = self.max_in_flight {
            config.max_in_flight = Some(limit);
        }
    }
}

pub fn main() -> Result<(), Box<dyn Error>> {
    tokio::runtime::Runtime::new()?.block_on(async_main())
}

async fn async_main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    init_logging(args.log.as_deref())?;

    let mut config = Config::load(args.config.as_deref())?;
    args.apply_to(&mut config);

    run_chat(config).await
}
