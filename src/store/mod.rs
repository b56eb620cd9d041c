//! Shared forwarding state.
//!
//! All state the engine and UI consume lives behind one explicitly
//! constructed [`ForwardingStore`]:
//! - **Config**: enabled flag and destination number
//! - **Blacklist**: blocked sender labels
//! - **Message log**: record of forwarded messages
//!
//! The store is injected into whatever consumes it (engine, listener, UI)
//! rather than living as a process-wide singleton; its lifecycle is tied to
//! application start and stop. Each sub-store serializes its own mutate path,
//! so concurrent updates from the event listener and the UI never lose
//! writes. Nothing here persists across restarts.

mod blacklist;
mod config;
mod log;

pub use blacklist::{BlacklistEntry, BlacklistError, BlacklistIndex};
pub use config::ForwardingConfig;
pub use log::{LogEntry, MessageLog};

use std::sync::RwLock;

use tracing::info;

use crate::id::EntryId;

/// State aggregate for the forwarding engine.
#[derive(Debug, Default)]
pub struct ForwardingStore {
    config: RwLock<ForwardingConfig>,
    blacklist: BlacklistIndex,
    log: MessageLog,
}

impl ForwardingStore {
    /// Create a store with default config (enabled, no destination).
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store from an explicit starting config.
    ///
    /// The destination is trimmed so the stored config always satisfies the
    /// empty-or-trimmed invariant.
    pub fn with_config(mut config: ForwardingConfig) -> Self {
        config.destination = config.destination.trim().to_string();
        Self {
            config: RwLock::new(config),
            blacklist: BlacklistIndex::new(),
            log: MessageLog::new(),
        }
    }

    // -------------------------------------------------------------------------
    // Config
    // -------------------------------------------------------------------------

    /// Consistent snapshot of the current config.
    pub fn config(&self) -> ForwardingConfig {
        self.config.read().unwrap().clone()
    }

    /// Toggle forwarding on or off. Takes effect for the next message.
    pub fn set_enabled(&self, enabled: bool) {
        self.config.write().unwrap().enabled = enabled;
        info!(enabled, "forwarding toggled");
    }

    /// Update the destination number.
    ///
    /// Trimmed-empty input is ignored; this call can never clear the
    /// destination.
    pub fn set_destination(&self, value: &str) {
        let mut config = self.config.write().unwrap();
        if config.update_destination(value) {
            info!(destination = %config.destination, "forwarding destination updated");
        }
    }

    // -------------------------------------------------------------------------
    // Blacklist
    // -------------------------------------------------------------------------

    /// Block a sender label.
    pub fn add_blocked(&self, label: &str) -> Result<EntryId, BlacklistError> {
        self.blacklist.add(label)
    }

    /// Unblock by entry id. Idempotent.
    pub fn remove_blocked(&self, id: EntryId) {
        self.blacklist.remove(id);
    }

    /// Whether a sender label is blocked (case-insensitive).
    pub fn is_sender_blocked(&self, label: &str) -> bool {
        self.blacklist.contains(label)
    }

    /// Blocked senders, newest first.
    pub fn blacklist(&self) -> Vec<BlacklistEntry> {
        self.blacklist.entries()
    }

    // -------------------------------------------------------------------------
    // Message log
    // -------------------------------------------------------------------------

    /// Record a successfully forwarded message.
    pub(crate) fn record_forwarded(
        &self,
        sender: &str,
        body: &str,
        received_at: Option<chrono::DateTime<chrono::Utc>>,
    ) -> EntryId {
        self.log.append(sender, body, received_at)
    }

    /// Forwarded messages, newest first.
    pub fn message_log(&self) -> Vec<LogEntry> {
        self.log.entries()
    }

    /// Number of forwarded messages.
    pub fn message_log_len(&self) -> usize {
        self.log.len()
    }
}
