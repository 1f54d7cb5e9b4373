//! Chatdesk is a line-mode chat client whose interface stays responsive while
//! a question-answering backend works in the background.
//!
//! The crate is organized around a small set of collaborating layers:
//! - [`core`] owns the conversation (history, identity, typing indicator),
//!   the [`core::dispatcher`] that runs backend queries off the UI loop, and
//!   the [`core::controller`] façade the UI talks to.
//! - [`animation`] runs the cosmetic timers, isolated from conversation state.
//! - [`ui`] renders the terminal output and runs the loop that owns the
//!   controller.
//! - [`commands`] implements slash-command parsing used by the chat loop.
//!
//! Runtime entrypoints live in the binary crate (`src/main.rs`) and route
//! through [`crate::cli::main`], which loads configuration and starts
//! [`ui::chat_loop::run_chat`].

pub mod animation;
pub mod cli;
pub mod commands;
pub mod core;
pub mod ui;
pub mod utils;
