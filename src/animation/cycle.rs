//! Frame sequences for the cosmetic animations.
//!
//! A [`Cycle`] is plain data: it knows nothing about timers, so every
//! animation's look can be tested without a runtime.

use chrono::Local;

use crate::core::message::TIMESTAMP_FORMAT;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cycle {
    frames: Vec<String>,
    index: usize,
}

impl Cycle {
    pub fn new<I, S>(frames: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            frames: frames.into_iter().map(Into::into).collect(),
            index: 0,
        }
    }

    /// Returns the current frame and moves to the next one, wrapping around.
    pub fn advance(&mut self) -> String {
        if self.frames.is_empty() {
            return String::new();
        }
        let frame = self.frames[self.index].clone();
        self.index = (self.index + 1) % self.frames.len();
        frame
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn status_dot() -> Self {
        Self::new(["#10b981", "#34d399", "#6ee7b7", "#34d399"])
    }

    /// Three dots with one emphasised, moving left to right.
    pub fn typing_dots() -> Self {
        Self::new(["●○○", "○●○", "○○●"])
    }

    pub fn icon_glow() -> Self {
        Self::new(["#48cae4", "#38bdf8", "#48cae4"])
    }

    pub fn sparkle() -> Self {
        Self::new(["✨", "💫", "⭐", "💫"])
    }

    pub fn breathing() -> Self {
        Self::new(["expand", "contract"])
    }

    pub fn send_pulse() -> Self {
        Self::new(["#0077b6", "#023e8a", "#0077b6"])
    }

    pub fn wave() -> Self {
        Self::new(["👋", "🖐️", "👋", "✋", "👋"])
    }

    /// Border highlight shown when a reply arrives.
    pub fn flash() -> Self {
        Self::new(["#10b981"])
    }

    pub fn shake() -> Self {
        Self::new(["left", "right"])
    }

    /// Reveals `text` one character at a time, starting from the empty string.
    pub fn typewriter(text: &str) -> Self {
        let mut prefixes = vec![String::new()];
        let mut current = String::new();
        for ch in text.chars() {
            current.push(ch);
            prefixes.push(current.clone());
        }
        Self::new(prefixes)
    }
}

pub fn clock_face() -> String {
    Local::now().format(TIMESTAMP_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_wraps_around() {
        let mut cycle = Cycle::typing_dots();
        let frames: Vec<String> = (0..4).map(|_| cycle.advance()).collect();
        assert_eq!(frames, vec!["●○○", "○●○", "○○●", "●○○"]);
    }

    #[test]
    fn empty_cycle_yields_empty_frames() {
        let mut cycle = Cycle::new(Vec::<String>::new());
        assert!(cycle.is_empty());
        assert_eq!(cycle.advance(), "");
    }

    #[test]
    fn typewriter_reveals_by_character() {
        let mut cycle = Cycle::typewriter("héllo");
        assert_eq!(cycle.len(), 6);
        let frames: Vec<String> = (0..6).map(|_| cycle.advance()).collect();
        assert_eq!(frames, vec!["", "h", "hé", "hél", "héll", "héllo"]);
    }

    #[test]
    fn clock_face_has_minute_precision() {
        let face = clock_face();
        assert!(face.ends_with("AM") || face.ends_with("PM"));
        assert_eq!(face.matches(':').count(), 1);
    }
}
