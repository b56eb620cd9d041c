//! Incoming message listener.
//!
//! Bridges the OS message source to the engine:
//! - Requests receive/read/send capabilities once; denial is not retried and
//!   leaves the engine idle.
//! - Drains raw OS events from a channel, dropping events without a body
//!   before they reach the engine.
//! - Evaluates events sequentially, one outcome per event.
//!
//! Subscription is an explicit scoped resource: acquired when the capability
//! grant completes, released through [`Subscription::close`] (or aborted on
//! drop).

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::forwarder::{FailureReason, ForwardOutcome, ForwardingEngine, IncomingMessage};

/// A raw event from the OS message source.
///
/// Shape follows the platform: every field may be missing.
#[derive(Debug, Clone)]
pub struct RawSmsEvent {
    pub sender: Option<String>,
    pub body: Option<String>,
    pub timestamp_millis: Option<i64>,
}

impl RawSmsEvent {
    /// Convert into an engine event, or `None` when the body is absent.
    fn into_message(self) -> Option<IncomingMessage> {
        let body = self.body.filter(|b| !b.is_empty())?;
        let received_at = self
            .timestamp_millis
            .and_then(DateTime::<Utc>::from_timestamp_millis);

        Some(IncomingMessage {
            sender: self.sender.unwrap_or_default(),
            body,
            received_at,
        })
    }
}

/// Capabilities the listener needs from the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    ReceiveSms,
    ReadSms,
    SendSms,
}

/// Capabilities requested before subscribing.
pub const REQUIRED_CAPABILITIES: [Capability; 3] = [
    Capability::ReceiveSms,
    Capability::ReadSms,
    Capability::SendSms,
];

/// Platform binding for capability requests.
#[async_trait]
pub trait PermissionRequester: Send + Sync {
    /// Request the capabilities, returning whether they were granted.
    ///
    /// Denial is terminal for this subscription attempt; the core never
    /// retries a denied request.
    async fn request(&self, capabilities: &[Capability]) -> bool;
}

/// Handle to an active event subscription.
///
/// Dropping the handle aborts the drain task; [`close`](Self::close) shuts it
/// down cleanly.
pub struct Subscription {
    shutdown: watch::Sender<bool>,
    task: Option<JoinHandle<()>>,
}

impl Subscription {
    /// Stop the drain task and wait for it to finish.
    pub async fn close(mut self) {
        let _ = self.shutdown.send(true);
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
        info!("message subscription closed");
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

/// Subscribe the engine to an OS event stream.
///
/// Requests capabilities first; on denial, returns `None` and the engine
/// stays idle (indistinguishable from disabled from the user's side, but the
/// caller can tell the two apart from this return value). On grant, spawns a
/// task that evaluates events in arrival order until the stream ends or the
/// subscription is closed.
pub async fn subscribe(
    engine: Arc<ForwardingEngine>,
    permissions: &dyn PermissionRequester,
    events: mpsc::Receiver<RawSmsEvent>,
) -> Option<Subscription> {
    if !permissions.request(&REQUIRED_CAPABILITIES).await {
        warn!("message capabilities denied, listener not started");
        return None;
    }

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let task = tokio::spawn(drain_events(engine, events, shutdown_rx));
    info!("message subscription started");

    Some(Subscription {
        shutdown: shutdown_tx,
        task: Some(task),
    })
}

/// Drain loop: one event, one evaluation, in order.
async fn drain_events(
    engine: Arc<ForwardingEngine>,
    mut events: mpsc::Receiver<RawSmsEvent>,
    mut shutdown: watch::Receiver<bool>,
) {
    loop {
        tokio::select! {
            biased;

            _ = shutdown.changed() => {
                if *shutdown.borrow_and_update() {
                    debug!("listener shutting down");
                    break;
                }
            }

            event = events.recv() => {
                let Some(event) = event else {
                    debug!("event stream closed");
                    break;
                };

                let Some(message) = event.into_message() else {
                    debug!("event without body dropped");
                    continue;
                };

                let sender = message.sender.clone();
                report(&sender, engine.evaluate_and_forward(message).await);
            }
        }
    }
}

/// Log a listener-path outcome.
///
/// Outcomes on this path are observed, not surfaced: expected rejections at
/// debug, channel problems at warn.
fn report(sender: &str, outcome: ForwardOutcome) {
    match outcome {
        ForwardOutcome::Success => {}
        ForwardOutcome::Failure { reason, error } => match reason {
            FailureReason::ChannelUnavailable | FailureReason::ChannelFailed => {
                match error {
                    Some(error) => {
                        warn!(sender = %sender, reason = ?reason, error = %error, "listener forward failed")
                    }
                    None => warn!(sender = %sender, reason = ?reason, "listener forward failed"),
                }
            }
            _ => debug!(sender = %sender, reason = ?reason, "listener forward skipped"),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_without_body_dropped() {
        let event = RawSmsEvent {
            sender: Some("Bank".to_string()),
            body: None,
            timestamp_millis: None,
        };
        assert!(event.into_message().is_none());

        let event = RawSmsEvent {
            sender: Some("Bank".to_string()),
            body: Some(String::new()),
            timestamp_millis: None,
        };
        assert!(event.into_message().is_none());
    }

    #[test]
    fn test_missing_sender_becomes_empty_label() {
        let event = RawSmsEvent {
            sender: None,
            body: Some("hello".to_string()),
            timestamp_millis: None,
        };

        let message = event.into_message().unwrap();
        assert_eq!(message.sender, "");
        assert_eq!(message.body, "hello");
        assert!(message.received_at.is_none());
    }

    #[test]
    fn test_timestamp_millis_converted() {
        let event = RawSmsEvent {
            sender: Some("Bank".to_string()),
            body: Some("hi".to_string()),
            timestamp_millis: Some(1_700_000_000_000),
        };

        let message = event.into_message().unwrap();
        let received_at = message.received_at.unwrap();
        assert_eq!(received_at.timestamp_millis(), 1_700_000_000_000);
    }
}
