//! Blocked sender index.
//!
//! Ordered list of blocked sender labels for display (newest first) plus a
//! hash set keyed by normalized label so the per-message membership test
//! stays O(1) however large the list grows.

use std::collections::HashSet;
use std::sync::RwLock;

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::id::EntryId;

/// A blocked sender.
#[derive(Debug, Clone, Serialize)]
pub struct BlacklistEntry {
    /// Opaque entry identifier, used for removal.
    pub id: EntryId,
    /// Sender label as the user typed it (trimmed).
    pub label: String,
}

/// Errors returned by [`BlacklistIndex::add`].
///
/// Returned, not panicked, so the UI can show targeted messages.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum BlacklistError {
    /// The label was empty after trimming.
    #[error("sender label is empty")]
    Empty,

    /// An entry with the same label already exists (case-insensitive).
    #[error("sender is already blacklisted")]
    Duplicate,
}

/// Case-insensitive set of blocked sender labels.
///
/// Thread-safe; mutations are serialized through an internal lock so
/// concurrent add/remove calls never lose updates.
#[derive(Debug, Default)]
pub struct BlacklistIndex {
    inner: RwLock<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    /// Display order, most recent first.
    entries: Vec<BlacklistEntry>,
    /// Normalized labels for O(1) membership.
    index: HashSet<String>,
}

/// Labels match under trimmed, case-insensitive comparison: sender labels are
/// user-typed free text with inconsistent casing.
fn normalize(label: &str) -> String {
    label.trim().to_lowercase()
}

impl BlacklistIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a sender label to the blacklist.
    ///
    /// Fails with [`BlacklistError::Empty`] when the trimmed label is empty
    /// and with [`BlacklistError::Duplicate`] when an entry with the same
    /// label already exists under case-insensitive comparison.
    pub fn add(&self, label: &str) -> Result<EntryId, BlacklistError> {
        let trimmed = label.trim();

        if trimmed.is_empty() {
            return Err(BlacklistError::Empty);
        }

        let normalized = normalize(trimmed);
        let mut inner = self.inner.write().unwrap();

        if inner.index.contains(&normalized) {
            return Err(BlacklistError::Duplicate);
        }

        let id = EntryId::new();
        inner.entries.insert(
            0,
            BlacklistEntry {
                id,
                label: trimmed.to_string(),
            },
        );
        inner.index.insert(normalized);

        debug!(entry_id = %id, label = %trimmed, "sender blacklisted");
        Ok(id)
    }

    /// Remove the entry with the given id.
    ///
    /// Idempotent: removing an absent id is a no-op, not an error.
    pub fn remove(&self, id: EntryId) {
        let mut inner = self.inner.write().unwrap();

        let Some(pos) = inner.entries.iter().position(|entry| entry.id == id) else {
            return;
        };

        let entry = inner.entries.remove(pos);
        inner.index.remove(&normalize(&entry.label));

        debug!(entry_id = %id, label = %entry.label, "sender unblacklisted");
    }

    /// Case-insensitive, trimmed membership test.
    ///
    /// Runs on every incoming-message evaluation.
    pub fn contains(&self, label: &str) -> bool {
        let inner = self.inner.read().unwrap();
        inner.index.contains(&normalize(label))
    }

    /// Snapshot of the entries, most recent first.
    pub fn entries(&self) -> Vec<BlacklistEntry> {
        let inner = self.inner.read().unwrap();
        inner.entries.clone()
    }

    /// Number of blocked senders.
    pub fn len(&self) -> usize {
        let inner = self.inner.read().unwrap();
        inner.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
