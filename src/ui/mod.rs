//! Line-mode terminal presentation.
//!
//! - [`chat_loop`]: the loop that feeds user input to [`crate::commands`] and
//!   the controller, and everything the core emits to the renderer.
//! - [`renderer`]: the [`Renderer`](renderer::Renderer) seam and the terminal
//!   implementation.
//!
//! Ownership boundary: this layer presents and captures interaction state,
//! while [`crate::core`] owns the conversation and backend coordination.

pub mod chat_loop;
pub mod renderer;
