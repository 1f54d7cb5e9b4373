//! Cosmetic timers: clock, status dot, typing dots and decorative cycles.
//!
//! Nothing here reads or writes conversation state. The scheduler posts
//! [`Frame`]s to the UI loop, which hands them to the renderer.

pub mod cycle;
pub mod scheduler;

pub use cycle::Cycle;
pub use scheduler::{AnimationScheduler, TaskHandle};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimationKind {
    Clock,
    StatusDot,
    TypingDots,
    IconGlow,
    Sparkle,
    Breathing,
    SendPulse,
    Wave,
    Shake,
    Typewriter,
    Flash,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub kind: AnimationKind,
    pub glyph: String,
    /// Set on the last frame of a bounded animation.
    pub finished: bool,
}
