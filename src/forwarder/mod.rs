//! Forwarding decision engine.
//!
//! Processes one incoming message event end to end:
//! 1. Check config (enabled, destination set)
//! 2. Check the sender against the blacklist
//! 3. Select a delivery channel and send the formatted payload
//! 4. On success, record the message in the log
//!
//! The config and blacklist checks run before any channel I/O, so disabled or
//! blacklisted messages never reach the channel layer and never incur side
//! effects. `evaluate_and_forward` always returns an outcome value; no error
//! escapes it.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, warn};

use crate::channel::{ChannelSet, Delivery};
use crate::format;
use crate::store::ForwardingStore;

/// An incoming text message, as handed to the engine.
///
/// Transient: consumed by one evaluation, producing at most one log entry.
#[derive(Debug, Clone)]
pub struct IncomingMessage {
    /// Sender label; may be empty when the OS did not report one.
    pub sender: String,
    /// Message body.
    pub body: String,
    /// When the message was received, if known.
    pub received_at: Option<DateTime<Utc>>,
}

/// Why a message was not forwarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FailureReason {
    /// Forwarding is switched off.
    Disabled,
    /// No destination number is configured.
    MissingDestination,
    /// The sender is on the blacklist.
    SenderBlacklisted,
    /// No delivery channel could be tried.
    ChannelUnavailable,
    /// A delivery channel was tried and failed.
    ChannelFailed,
    /// The user dismissed the composer.
    UserCancelled,
}

/// Result of one forwarding evaluation.
#[derive(Debug)]
pub enum ForwardOutcome {
    /// The message was delivered and recorded in the log.
    Success,
    /// The message was not forwarded.
    Failure {
        reason: FailureReason,
        /// Underlying channel error, when one was caught.
        error: Option<anyhow::Error>,
    },
}

impl ForwardOutcome {
    fn failure(reason: FailureReason) -> Self {
        Self::Failure {
            reason,
            error: None,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    /// Failure reason, if this outcome is a failure.
    pub fn reason(&self) -> Option<FailureReason> {
        match self {
            Self::Success => None,
            Self::Failure { reason, .. } => Some(*reason),
        }
    }
}

/// The forwarding engine.
///
/// Holds the shared store and the channel set; one instance serves all
/// incoming events for the life of the process.
pub struct ForwardingEngine {
    store: Arc<ForwardingStore>,
    channels: ChannelSet,
}

impl ForwardingEngine {
    pub fn new(store: Arc<ForwardingStore>, channels: ChannelSet) -> Self {
        Self { store, channels }
    }

    /// The store this engine reads and records into.
    pub fn store(&self) -> &Arc<ForwardingStore> {
        &self.store
    }

    /// Evaluate one incoming message and forward it if it qualifies.
    ///
    /// Precondition checks short-circuit in a fixed order: disabled, missing
    /// destination, blacklisted sender. Expected rejections are debug-logged,
    /// never treated as errors.
    pub async fn evaluate_and_forward(&self, event: IncomingMessage) -> ForwardOutcome {
        let config = self.store.config();

        if !config.enabled {
            debug!(sender = %event.sender, "forwarding disabled, message skipped");
            return ForwardOutcome::failure(FailureReason::Disabled);
        }

        if config.destination_is_empty() {
            debug!(sender = %event.sender, "no destination configured, message skipped");
            return ForwardOutcome::failure(FailureReason::MissingDestination);
        }

        if self.store.is_sender_blocked(&event.sender) {
            debug!(sender = %event.sender, "sender blacklisted, message skipped");
            return ForwardOutcome::failure(FailureReason::SenderBlacklisted);
        }

        let payload = format::forward_payload(&event.sender, &event.body);

        match self.channels.deliver(&config.destination, &payload).await {
            Delivery::Delivered => {
                self.store
                    .record_forwarded(&event.sender, &event.body, event.received_at);
                debug!(sender = %event.sender, dest = %config.destination, "message forwarded");
                ForwardOutcome::Success
            }
            Delivery::Cancelled => {
                debug!(sender = %event.sender, "forward cancelled by user");
                ForwardOutcome::failure(FailureReason::UserCancelled)
            }
            Delivery::Unavailable => {
                warn!(sender = %event.sender, "no delivery channel available");
                ForwardOutcome::failure(FailureReason::ChannelUnavailable)
            }
            Delivery::Failed(error) => {
                warn!(sender = %event.sender, error = %error, "delivery failed");
                ForwardOutcome::Failure {
                    reason: FailureReason::ChannelFailed,
                    error: Some(error),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_accessors() {
        assert!(ForwardOutcome::Success.is_success());
        assert_eq!(ForwardOutcome::Success.reason(), None);

        let failure = ForwardOutcome::failure(FailureReason::Disabled);
        assert!(!failure.is_success());
        assert_eq!(failure.reason(), Some(FailureReason::Disabled));
    }
}
