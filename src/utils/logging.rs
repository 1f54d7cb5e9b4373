//! Diagnostic logging for the binary.
//!
//! Diagnostics go through `tracing`. With `--log <file>` everything at `info`
//! and above is appended to that file; otherwise only warnings reach stderr so
//! they don't interleave with the conversation. `RUST_LOG` overrides either
//! default.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::core::config::data::path_display;

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Failed to open log file {}: {source}", path_display(.path))]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to install log subscriber: {0}")]
    Install(String),
}

fn default_directive(to_file: bool) -> &'static str {
    if to_file {
        "info"
    } else {
        "warn"
    }
}

fn env_filter(to_file: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| default_directive(to_file).into())
}

pub fn init_logging(log_file: Option<&Path>) -> Result<(), LoggingError> {
    let installed = match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|source| LoggingError::Open {
                    path: path.to_path_buf(),
                    source,
                })?;
            tracing_subscriber::fmt()
                .with_env_filter(env_filter(true))
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        None => tracing_subscriber::fmt()
            .with_env_filter(env_filter(false))
            .with_writer(std::io::stderr)
            .try_init(),
    };

    installed.map_err(|err| LoggingError::Install(err.to_string()))
}
