//! Runs backend queries off the UI loop and posts the answers back to it.
//!
//! Each [`Dispatcher::dispatch`] call spawns its own task; there is no queue and
//! completions arrive in whatever order the engine finishes. The only thing a
//! background task does with the result is send a [`Delivery`] down the
//! channel the UI loop drains.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, Semaphore};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::engine::ChatEngine;

pub type RequestId = u64;

/// One in-flight backend call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRequest {
    pub id: RequestId,
    /// Session epoch at submission time.
    pub epoch: u64,
    pub text: String,
    pub identity: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryOutcome {
    Answered,
    /// The engine failed; `text` carries the user-facing fallback instead.
    Fallback { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    pub request_id: RequestId,
    pub epoch: u64,
    pub text: String,
    pub outcome: DeliveryOutcome,
}

impl Delivery {
    pub fn is_fallback(&self) -> bool {
        matches!(self.outcome, DeliveryOutcome::Fallback { .. })
    }
}

#[derive(Debug, Clone)]
pub struct DispatchSettings {
    pub delivery_delay: Duration,
    pub fallback_reply: String,
    pub max_in_flight: Option<usize>,
}

#[derive(Debug)]
pub struct DispatchHandle {
    request_id: RequestId,
    join: JoinHandle<()>,
}

impl DispatchHandle {
    pub fn request_id(&self) -> RequestId {
        self.request_id
    }

    pub fn is_finished(&self) -> bool {
        self.join.is_finished()
    }

    /// Waits until the delivery has been posted (or dropped because the UI
    /// loop is gone).
    pub async fn finished(self) {
        if let Err(err) = self.join.await {
            debug!(request_id = self.request_id, error = %err, "dispatch task ended abnormally");
        }
    }
}

#[derive(Clone)]
pub struct Dispatcher {
    engine: Arc<dyn ChatEngine>,
    tx: mpsc::UnboundedSender<Delivery>,
    delivery_delay: Duration,
    fallback_reply: Arc<str>,
    limiter: Option<Arc<Semaphore>>,
}

impl Dispatcher {
    pub fn new(
        engine: Arc<dyn ChatEngine>,
        settings: DispatchSettings,
    ) -> (Self, mpsc::UnboundedReceiver<Delivery>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let limiter = settings
            .max_in_flight
            .filter(|limit| *limit > 0)
            .map(|limit| Arc::new(Semaphore::new(limit)));

        let dispatcher = Self {
            engine,
            tx,
            delivery_delay: settings.delivery_delay,
            fallback_reply: settings.fallback_reply.into(),
            limiter,
        };
        (dispatcher, rx)
    }

    pub fn dispatch(&self, request: PendingRequest) -> DispatchHandle {
        let request_id = request.id;
        let engine = Arc::clone(&self.engine);
        let tx = self.tx.clone();
        let delay = self.delivery_delay;
        let fallback_reply = Arc::clone(&self.fallback_reply);
        let limiter = self.limiter.clone();

        debug!(request_id, epoch = request.epoch, "dispatching query");

        let join = tokio::spawn(async move {
            let PendingRequest {
                id,
                epoch,
                text,
                identity,
            } = request;

            let permit = match limiter {
                Some(semaphore) => semaphore.acquire_owned().await.ok(),
                None => None,
            };

            let result = tokio::task::spawn_blocking(move || {
                engine.process_query(&text, identity.as_deref())
            })
            .await;
            drop(permit);

            let (text, outcome) = match result {
                Ok(Ok(answer)) => {
                    info!(request_id = id, "engine answered");
                    (answer, DeliveryOutcome::Answered)
                }
                Ok(Err(err)) => {
                    warn!(request_id = id, error = %err, "engine failed, delivering fallback");
                    let reason = err.to_string();
                    (fallback_reply.to_string(), DeliveryOutcome::Fallback { reason })
                }
                Err(join_err) => {
                    let reason = if join_err.is_panic() {
                        "engine panicked".to_string()
                    } else {
                        "engine call was cancelled".to_string()
                    };
                    warn!(request_id = id, %reason, "engine call did not complete, delivering fallback");
                    (fallback_reply.to_string(), DeliveryOutcome::Fallback { reason })
                }
            };

            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }

            let delivery = Delivery {
                request_id: id,
                epoch,
                text,
                outcome,
            };
            if tx.send(delivery).is_err() {
                debug!(request_id = id, "delivery dropped: UI loop has shut down");
            }
        });

        DispatchHandle { request_id, join }
    }
}
