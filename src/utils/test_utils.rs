#[cfg(test)]
use crate::core::controller::{ControllerSettings, InteractionController};
#[cfg(test)]
use crate::core::dispatcher::{Delivery, DispatchSettings, Dispatcher};
#[cfg(test)]
use crate::core::engine::ChatEngine;
#[cfg(test)]
use crate::core::error::EngineError;
#[cfg(test)]
use crate::core::events::{RenderEvent, RenderEventSender};
#[cfg(test)]
use std::collections::HashMap;
#[cfg(test)]
use std::sync::atomic::{AtomicUsize, Ordering};
#[cfg(test)]
use std::sync::{Arc, Mutex};
#[cfg(test)]
use std::time::Duration;
#[cfg(test)]
use tokio::sync::{mpsc, oneshot};

#[cfg(test)]
pub const TEST_FALLBACK: &str = "fallback reply";

/// Engine whose answers are released by the test. Queries without a gate are
/// echoed back immediately.
#[cfg(test)]
pub struct GatedEngine {
    gates: Mutex<HashMap<String, oneshot::Receiver<Result<String, EngineError>>>>,
    calls: AtomicUsize,
}

#[cfg(test)]
impl GatedEngine {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            gates: Mutex::new(HashMap::new()),
            calls: AtomicUsize::new(0),
        })
    }

    /// Holds the next query for `text` until the returned sender fires.
    pub fn gate(&self, text: &str) -> oneshot::Sender<Result<String, EngineError>> {
        let (tx, rx) = oneshot::channel();
        self.gates
            .lock()
            .expect("gate lock")
            .insert(text.to_string(), rx);
        tx
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
impl ChatEngine for GatedEngine {
    fn process_query(&self, text: &str, _identity: Option<&str>) -> Result<String, EngineError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let gate = self.gates.lock().expect("gate lock").remove(text);
        match gate {
            Some(rx) => rx
                .blocking_recv()
                .unwrap_or_else(|_| Err(EngineError::new("gate dropped"))),
            None => Ok(format!("echo: {text}")),
        }
    }
}

#[cfg(test)]
pub struct TestHarness {
    pub controller: InteractionController,
    pub deliveries: mpsc::UnboundedReceiver<Delivery>,
    pub events: mpsc::UnboundedReceiver<RenderEvent>,
}

#[cfg(test)]
impl TestHarness {
    /// Waits for the next delivery and applies it the way the UI loop would.
    pub async fn deliver_next(&mut self) -> Delivery {
        let delivery = tokio::time::timeout(Duration::from_secs(5), self.deliveries.recv())
            .await
            .expect("delivery within timeout")
            .expect("dispatcher channel open");
        self.controller.on_response(delivery.clone());
        delivery
    }

    pub fn drain_events(&mut self) -> Vec<RenderEvent> {
        let mut events = Vec::new();
        while let Ok(event) = self.events.try_recv() {
            events.push(event);
        }
        events
    }

    pub fn history_texts(&self) -> Vec<String> {
        self.controller
            .snapshot()
            .iter()
            .map(|message| format!("{}:{}", message.sender().as_str(), message.text()))
            .collect()
    }
}

#[cfg(test)]
pub fn test_settings() -> ControllerSettings {
    ControllerSettings {
        user_label: "You".into(),
        assistant_name: "Assistant".into(),
        fallback_reply: TEST_FALLBACK.into(),
        quick_actions: vec![
            "What are the pharmacy hours?".into(),
            "Where is the emergency room?".into(),
        ],
        default_identity: None,
    }
}

#[cfg(test)]
pub fn create_test_harness(engine: Arc<dyn ChatEngine>) -> TestHarness {
    let (dispatcher, deliveries) = Dispatcher::new(
        engine,
        DispatchSettings {
            delivery_delay: Duration::ZERO,
            fallback_reply: TEST_FALLBACK.into(),
            max_in_flight: None,
        },
    );
    let (sender, events) = RenderEventSender::new();
    TestHarness {
        controller: InteractionController::new(dispatcher, sender, test_settings()),
        deliveries,
        events,
    }
}
