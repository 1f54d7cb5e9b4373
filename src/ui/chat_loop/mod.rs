//! The UI execution context.
//!
//! [`run_chat`] owns the [`InteractionController`](crate::core::controller::InteractionController)
//! and multiplexes four inputs on one task: lines typed by the user, backend
//! deliveries, render events and animation frames. Background work never
//! touches the session directly; it only posts into these channels.

mod event_loop;

pub use event_loop::{run_chat, ChatSession, LoopControl, UiEvent};
