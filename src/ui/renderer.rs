use std::collections::HashMap;
use std::io::{self, Write};

use crate::animation::{AnimationKind, Frame};
use crate::core::events::RenderEvent;

/// Instruction line revealed by the typewriter under the welcome banner.
pub const INTRO_LINE: &str = "Ask me anything, or pick a quick action with /quick <n>.";

const ERASE_LINE: &str = "\r\x1b[2K";

/// Presentation seam. The chat loop feeds it everything the core and the
/// animation scheduler produce.
pub trait Renderer {
    /// Banner shown at start and after the conversation is cleared.
    fn welcome(&mut self) -> io::Result<()>;
    fn render(&mut self, event: &RenderEvent) -> io::Result<()>;
    fn animate(&mut self, frame: &Frame) -> io::Result<()>;
    /// Text for the user that is not part of the conversation.
    fn notice(&mut self, text: &str) -> io::Result<()>;
}

/// The line that is currently drawn without a trailing newline and may be
/// redrawn in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ActiveLine {
    None,
    Intro,
    Typing,
    Notice,
}

pub struct TerminalRenderer<W: Write> {
    out: W,
    assistant_name: String,
    quick_actions: Vec<String>,
    pending: bool,
    active: ActiveLine,
    notice: String,
    glyphs: HashMap<AnimationKind, String>,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W, assistant_name: impl Into<String>, quick_actions: Vec<String>) -> Self {
        Self {
            out,
            assistant_name: assistant_name.into(),
            quick_actions,
            pending: false,
            active: ActiveLine::None,
            notice: String::new(),
            glyphs: HashMap::new(),
        }
    }

    /// Latest frame posted for `kind`, if any.
    pub fn glyph(&self, kind: AnimationKind) -> Option<&str> {
        self.glyphs.get(&kind).map(String::as_str)
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn close_active_line(&mut self) -> io::Result<()> {
        match self.active {
            ActiveLine::None => {}
            ActiveLine::Intro => writeln!(self.out, "{ERASE_LINE}{INTRO_LINE}")?,
            ActiveLine::Notice => writeln!(self.out)?,
            ActiveLine::Typing => write!(self.out, "{ERASE_LINE}")?,
        }
        self.active = ActiveLine::None;
        Ok(())
    }

    fn draw_typing(&mut self) -> io::Result<()> {
        let dots = self
            .glyphs
            .get(&AnimationKind::TypingDots)
            .map_or("●○○", String::as_str);
        write!(
            self.out,
            "{ERASE_LINE}{} is typing {dots}",
            self.assistant_name
        )?;
        self.active = ActiveLine::Typing;
        Ok(())
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    /// Writes the banner and leaves the intro line open for the typewriter.
    fn welcome(&mut self) -> io::Result<()> {
        self.close_active_line()?;
        let wave = self.glyphs.get(&AnimationKind::Wave).map_or("👋", String::as_str);
        match self.glyphs.get(&AnimationKind::Clock) {
            Some(clock) => writeln!(
                self.out,
                "{wave} {} is online · {clock}",
                self.assistant_name
            )?,
            None => writeln!(self.out, "{wave} {} is online", self.assistant_name)?,
        }
        for (index, query) in self.quick_actions.iter().enumerate() {
            writeln!(self.out, "  /quick {}  {query}", index + 1)?;
        }
        self.active = ActiveLine::Intro;
        self.out.flush()
    }

    fn render(&mut self, event: &RenderEvent) -> io::Result<()> {
        match event {
            RenderEvent::MessageAppended(message) => {
                self.close_active_line()?;
                writeln!(
                    self.out,
                    "[{}] {}: {}",
                    message.display_time(),
                    message.author(),
                    message.text()
                )?;
                if self.pending {
                    self.draw_typing()?;
                }
            }
            RenderEvent::TypingStarted => {
                self.pending = true;
                self.close_active_line()?;
                self.draw_typing()?;
            }
            RenderEvent::TypingStopped => {
                self.pending = false;
                if self.active == ActiveLine::Typing {
                    self.close_active_line()?;
                }
            }
            RenderEvent::HistoryCleared => {
                self.close_active_line()?;
                writeln!(self.out, "── conversation cleared ──")?;
                self.welcome()?;
            }
            RenderEvent::ValidationRejected(err) => {
                self.close_active_line()?;
                self.notice = format!("⚠ {err}: type something before sending");
                write!(self.out, "{ERASE_LINE}{}", self.notice)?;
                self.active = ActiveLine::Notice;
            }
        }
        self.out.flush()
    }

    fn animate(&mut self, frame: &Frame) -> io::Result<()> {
        self.glyphs.insert(frame.kind, frame.glyph.clone());

        match frame.kind {
            AnimationKind::TypingDots if self.pending && self.active == ActiveLine::Typing => {
                self.draw_typing()?;
            }
            AnimationKind::Typewriter if self.active == ActiveLine::Intro => {
                write!(self.out, "{ERASE_LINE}{}", frame.glyph)?;
                if frame.finished {
                    writeln!(self.out)?;
                    self.active = ActiveLine::None;
                }
            }
            AnimationKind::Shake if self.active == ActiveLine::Notice => {
                let offset = if frame.glyph == "right" { "  " } else { "" };
                write!(self.out, "{ERASE_LINE}{offset}{}", self.notice)?;
                if frame.finished {
                    writeln!(self.out)?;
                    self.active = ActiveLine::None;
                    if self.pending {
                        self.draw_typing()?;
                    }
                }
            }
            _ => return Ok(()),
        }
        self.out.flush()
    }

    fn notice(&mut self, text: &str) -> io::Result<()> {
        self.close_active_line()?;
        writeln!(self.out, "{text}")?;
        if self.pending {
            self.draw_typing()?;
        }
        self.out.flush()
    }
}
