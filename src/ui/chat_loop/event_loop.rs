use std::error::Error;
use std::io::{self, BufRead};
use std::sync::Arc;
use std::thread;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::animation::{AnimationScheduler, Frame, TaskHandle};
use crate::commands::{process_input, CommandResult};
use crate::core::config::Config;
use crate::core::controller::{ControllerSettings, InteractionController};
use crate::core::dispatcher::{Delivery, DispatchSettings, Dispatcher};
use crate::core::engine::{CannedEngine, ChatEngine};
use crate::core::events::{RenderEvent, RenderEventSender};
use crate::ui::renderer::{Renderer, TerminalRenderer, INTRO_LINE};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    Line(String),
    /// Input closed (Ctrl+D or a broken pipe).
    Eof,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Quit,
}

/// Reads stdin on a plain thread so a blocked read never holds up runtime
/// shutdown. The thread ends at EOF or once the loop drops its receiver.
fn spawn_input_reader(event_tx: mpsc::UnboundedSender<UiEvent>) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            match line {
                Ok(line) => {
                    if event_tx.send(UiEvent::Line(line)).is_err() {
                        return;
                    }
                }
                Err(err) => {
                    warn!(error = %err, "failed to read input");
                    break;
                }
            }
        }
        let _ = event_tx.send(UiEvent::Eof);
    })
}

/// Everything the UI execution context owns. Only [`ChatSession::step`] and
/// the handlers it calls touch the controller, so all conversation state
/// changes happen on this one task.
pub struct ChatSession<R: Renderer> {
    controller: InteractionController,
    renderer: R,
    scheduler: AnimationScheduler,
    intro: Option<TaskHandle>,
    ui_rx: mpsc::UnboundedReceiver<UiEvent>,
    deliveries: mpsc::UnboundedReceiver<Delivery>,
    render_events: mpsc::UnboundedReceiver<RenderEvent>,
    frames: mpsc::UnboundedReceiver<Frame>,
    /// Set at end of input; the loop quits once every reply has landed.
    input_closed: bool,
}

impl<R: Renderer> ChatSession<R> {
    pub fn new(
        config: &Config,
        engine: Arc<dyn ChatEngine>,
        renderer: R,
        ui_rx: mpsc::UnboundedReceiver<UiEvent>,
    ) -> Self {
        let (dispatcher, deliveries) = Dispatcher::new(
            engine,
            DispatchSettings {
                delivery_delay: config.delivery_delay(),
                fallback_reply: config.fallback_reply.clone(),
                max_in_flight: config.max_in_flight,
            },
        );
        let (events, render_events) = RenderEventSender::new();
        let controller =
            InteractionController::new(dispatcher, events, ControllerSettings::from(config));
        let (scheduler, frames) = AnimationScheduler::channel();

        Self {
            controller,
            renderer,
            scheduler,
            intro: None,
            ui_rx,
            deliveries,
            render_events,
            frames,
            input_closed: false,
        }
    }

    /// Draws the banner and starts the window's animations.
    pub fn start(&mut self) -> io::Result<()> {
        self.scheduler.start_window_set();
        self.renderer.welcome()?;
        self.restart_intro();
        Ok(())
    }

    /// Waits for the next thing to happen and handles it.
    ///
    /// End of input does not drop replies still on their way: the loop keeps
    /// running until the controller has no request in flight, then prints
    /// what is left and quits. `/quit` stops straight away.
    pub async fn step(&mut self) -> Result<LoopControl, Box<dyn Error>> {
        tokio::select! {
            Some(event) = self.ui_rx.recv(), if !self.input_closed => match event {
                UiEvent::Line(line) => {
                    if self.handle_line(&line)? == LoopControl::Quit {
                        return Ok(LoopControl::Quit);
                    }
                }
                UiEvent::Eof => {
                    debug!(in_flight = self.controller.in_flight(), "input closed");
                    self.input_closed = true;
                }
            },
            Some(delivery) = self.deliveries.recv() => self.controller.on_response(delivery),
            Some(event) = self.render_events.recv() => self.handle_render_event(&event)?,
            Some(frame) = self.frames.recv() => self.renderer.animate(&frame)?,
            else => return Ok(LoopControl::Quit),
        }

        if self.input_closed && self.controller.in_flight() == 0 {
            while let Ok(event) = self.render_events.try_recv() {
                self.handle_render_event(&event)?;
            }
            return Ok(LoopControl::Quit);
        }
        Ok(LoopControl::Continue)
    }

    pub fn handle_line(&mut self, line: &str) -> Result<LoopControl, Box<dyn Error>> {
        match process_input(&mut self.controller, line) {
            CommandResult::Continue => {}
            CommandResult::Notice(text) => self.renderer.notice(&text)?,
            CommandResult::ProcessAsMessage(text) => {
                // Rejections reach the renderer as `ValidationRejected`.
                if let Err(err) = self.controller.submit(&text) {
                    debug!(error = %err, "submission not sent");
                }
            }
            CommandResult::Quit => return Ok(LoopControl::Quit),
        }
        Ok(LoopControl::Continue)
    }

    fn handle_render_event(&mut self, event: &RenderEvent) -> io::Result<()> {
        self.renderer.render(event)?;
        match event {
            RenderEvent::HistoryCleared => self.restart_intro(),
            RenderEvent::ValidationRejected(_) => {
                self.scheduler.start_shake();
            }
            RenderEvent::MessageAppended(message) if message.is_assistant() => {
                self.scheduler.start_flash();
            }
            _ => {}
        }
        Ok(())
    }

    fn restart_intro(&mut self) {
        if let Some(previous) = self.intro.take() {
            previous.cancel();
        }
        self.intro = Some(self.scheduler.start_typewriter(INTRO_LINE));
    }

    pub fn controller(&self) -> &InteractionController {
        &self.controller
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn shutdown(&mut self) {
        self.scheduler.shutdown();
    }
}

/// Runs the interactive chat until `/quit`, or until end of input once every
/// outstanding reply has been shown.
pub async fn run_chat(config: Config) -> Result<(), Box<dyn Error>> {
    let engine: Arc<dyn ChatEngine> = Arc::new(CannedEngine::from_config(&config.engine));
    let renderer = TerminalRenderer::new(
        io::stdout(),
        config.assistant_name.clone(),
        config.quick_actions.clone(),
    );
    let (ui_tx, ui_rx) = mpsc::unbounded_channel();
    let mut session = ChatSession::new(&config, engine, renderer, ui_rx);
    let _reader = spawn_input_reader(ui_tx);

    info!(
        identity = ?config.default_identity,
        delay_ms = config.delivery_delay_ms,
        max_in_flight = ?config.max_in_flight,
        "chat session starting"
    );
    session.start()?;

    let result = loop {
        match session.step().await {
            Ok(LoopControl::Continue) => {}
            Ok(LoopControl::Quit) => break Ok(()),
            Err(err) => break Err(err),
        }
    };

    session.shutdown();
    info!("chat session ended");
    result
}

#[cfg(test)]
#[path = "event_loop_tests.rs"]
mod tests;
