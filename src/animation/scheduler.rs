use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::cycle::{clock_face, Cycle};
use super::{AnimationKind, Frame};

pub const CLOCK_INTERVAL: Duration = Duration::from_secs(60);
pub const STATUS_DOT_INTERVAL: Duration = Duration::from_millis(500);
pub const TYPING_DOTS_INTERVAL: Duration = Duration::from_millis(300);
pub const ICON_GLOW_INTERVAL: Duration = Duration::from_millis(800);
pub const SPARKLE_INTERVAL: Duration = Duration::from_millis(600);
pub const BREATHING_INTERVAL: Duration = Duration::from_millis(1000);
pub const SEND_PULSE_INTERVAL: Duration = Duration::from_millis(2000);
pub const WAVE_INTERVAL: Duration = Duration::from_millis(300);
pub const WAVE_ITERATIONS: usize = 10;
pub const WAVE_REST_GLYPH: &str = "👋";
pub const SHAKE_INTERVAL: Duration = Duration::from_millis(50);
pub const SHAKE_ITERATIONS: usize = 6;
pub const TYPEWRITER_INTERVAL: Duration = Duration::from_millis(30);
pub const FLASH_DURATION: Duration = Duration::from_millis(300);
pub const FLASH_REST_GLYPH: &str = "rest";

/// Cancels one scheduled animation. Cheap to clone; cancelling any clone
/// stops the task at its next tick.
#[derive(Debug, Clone)]
pub struct TaskHandle {
    kind: AnimationKind,
    token: CancellationToken,
}

impl TaskHandle {
    pub fn kind(&self) -> AnimationKind {
        self.kind
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

/// Owns every cosmetic timer for a window.
///
/// Each task gets a child of the scheduler's root token, so dropping or
/// shutting down the scheduler stops all of them; individual tasks can still be
/// cancelled through their [`TaskHandle`]. Frames are posted to the UI loop
/// and never touch conversation state.
pub struct AnimationScheduler {
    tx: mpsc::UnboundedSender<Frame>,
    root: CancellationToken,
    tasks: Vec<JoinHandle<()>>,
}

impl AnimationScheduler {
    pub fn new(tx: mpsc::UnboundedSender<Frame>) -> Self {
        Self {
            tx,
            root: CancellationToken::new(),
            tasks: Vec::new(),
        }
    }

    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Frame>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(tx), rx)
    }

    /// Repeats `cycle` every `interval` until cancelled. The first frame is
    /// posted immediately.
    pub fn start_periodic(
        &mut self,
        kind: AnimationKind,
        interval: Duration,
        mut cycle: Cycle,
    ) -> TaskHandle {
        self.spawn(kind, interval, None, None, move || cycle.advance())
    }

    /// Posts `iterations` frames of `cycle`, then `terminal` as the final
    /// frame, and stops on its own.
    pub fn start_bounded(
        &mut self,
        kind: AnimationKind,
        interval: Duration,
        iterations: usize,
        mut cycle: Cycle,
        terminal: impl Into<String>,
    ) -> TaskHandle {
        self.spawn(
            kind,
            interval,
            Some(iterations),
            Some(terminal.into()),
            move || cycle.advance(),
        )
    }

    pub fn start_clock(&mut self, interval: Duration) -> TaskHandle {
        self.spawn(AnimationKind::Clock, interval, None, None, clock_face)
    }

    /// Starts the animations a window runs for its whole lifetime.
    pub fn start_window_set(&mut self) -> Vec<TaskHandle> {
        vec![
            self.start_clock(CLOCK_INTERVAL),
            self.start_periodic(
                AnimationKind::StatusDot,
                STATUS_DOT_INTERVAL,
                Cycle::status_dot(),
            ),
            self.start_periodic(
                AnimationKind::TypingDots,
                TYPING_DOTS_INTERVAL,
                Cycle::typing_dots(),
            ),
            self.start_periodic(
                AnimationKind::IconGlow,
                ICON_GLOW_INTERVAL,
                Cycle::icon_glow(),
            ),
            self.start_periodic(AnimationKind::Sparkle, SPARKLE_INTERVAL, Cycle::sparkle()),
            self.start_periodic(
                AnimationKind::Breathing,
                BREATHING_INTERVAL,
                Cycle::breathing(),
            ),
            self.start_periodic(
                AnimationKind::SendPulse,
                SEND_PULSE_INTERVAL,
                Cycle::send_pulse(),
            ),
            self.start_bounded(
                AnimationKind::Wave,
                WAVE_INTERVAL,
                WAVE_ITERATIONS,
                Cycle::wave(),
                WAVE_REST_GLYPH,
            ),
        ]
    }

    /// Rejected-input feedback.
    pub fn start_shake(&mut self) -> TaskHandle {
        self.start_bounded(
            AnimationKind::Shake,
            SHAKE_INTERVAL,
            SHAKE_ITERATIONS,
            Cycle::shake(),
            "rest",
        )
    }

    /// Reveals `text` one character per tick. The full text is the terminal
    /// frame, so the cycle stops one prefix short of it.
    pub fn start_typewriter(&mut self, text: &str) -> TaskHandle {
        let cycle = Cycle::typewriter(text);
        let steps = cycle.len().saturating_sub(1);
        self.start_bounded(
            AnimationKind::Typewriter,
            TYPEWRITER_INTERVAL,
            steps,
            cycle,
            text,
        )
    }

    /// One-shot highlight when a reply lands: on now, back to rest after
    /// [`FLASH_DURATION`].
    pub fn start_flash(&mut self) -> TaskHandle {
        self.start_bounded(
            AnimationKind::Flash,
            FLASH_DURATION,
            1,
            Cycle::flash(),
            FLASH_REST_GLYPH,
        )
    }

    /// Number of tasks that have not exited yet.
    pub fn active_tasks(&mut self) -> usize {
        self.reap();
        self.tasks.len()
    }

    pub fn shutdown(&mut self) {
        self.root.cancel();
        self.tasks.clear();
        debug!("animation scheduler shut down");
    }

    fn reap(&mut self) {
        self.tasks.retain(|task| !task.is_finished());
    }

    fn spawn<F>(
        &mut self,
        kind: AnimationKind,
        interval: Duration,
        iterations: Option<usize>,
        terminal: Option<String>,
        next_glyph: F,
    ) -> TaskHandle
    where
        F: FnMut() -> String + Send + 'static,
    {
        self.reap();
        let token = self.root.child_token();
        let task = tokio::spawn(run_ticks(
            kind,
            interval,
            iterations,
            terminal,
            token.clone(),
            self.tx.clone(),
            next_glyph,
        ));
        self.tasks.push(task);
        TaskHandle { kind, token }
    }
}

impl Drop for AnimationScheduler {
    fn drop(&mut self) {
        self.root.cancel();
    }
}

async fn run_ticks<F>(
    kind: AnimationKind,
    interval: Duration,
    iterations: Option<usize>,
    terminal: Option<String>,
    token: CancellationToken,
    tx: mpsc::UnboundedSender<Frame>,
    mut next_glyph: F,
) where
    F: FnMut() -> String + Send + 'static,
{
    // `interval` panics on a zero period.
    let mut ticker = tokio::time::interval(interval.max(Duration::from_millis(1)));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut fired = 0usize;

    loop {
        tokio::select! {
            biased;
            _ = token.cancelled() => return,
            _ = ticker.tick() => {}
        }

        if iterations.is_some_and(|limit| fired >= limit) {
            let glyph = terminal.unwrap_or_default();
            let _ = tx.send(Frame {
                kind,
                glyph,
                finished: true,
            });
            return;
        }

        let frame = Frame {
            kind,
            glyph: next_glyph(),
            finished: false,
        };
        if tx.send(frame).is_err() {
            debug!(?kind, "animation target gone, stopping");
            return;
        }
        fired += 1;
    }
}
