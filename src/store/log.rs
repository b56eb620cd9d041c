//! Forwarded message log.
//!
//! Append-only record of successfully forwarded messages, newest first.
//! Bodies are stored as length-bounded previews, never in full.

use std::sync::RwLock;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use crate::format;
use crate::id::EntryId;

/// Maximum preview length in characters.
const PREVIEW_MAX_CHARS: usize = 160;

/// Characters kept from the body when truncating, before the ellipsis.
const PREVIEW_KEEP_CHARS: usize = 157;

/// A forwarded message, as recorded in the log.
#[derive(Debug, Clone, Serialize)]
pub struct LogEntry {
    /// Opaque entry identifier.
    pub id: EntryId,
    /// Sender label from the original message.
    pub sender: String,
    /// Truncated body preview.
    pub preview: String,
    /// Display timestamp of when the message was received/forwarded.
    pub forwarded_at: String,
}

/// Append-only, reverse-chronological message log.
///
/// Thread-safe; no update or delete operation exists, the log grows
/// monotonically for the life of the process.
#[derive(Debug, Default)]
pub struct MessageLog {
    entries: RwLock<Vec<LogEntry>>,
}

/// Truncate a message body into a log preview.
///
/// Bodies over 160 characters keep the first 157, lose trailing whitespace,
/// and gain an ellipsis marker.
fn preview(body: &str) -> String {
    if body.chars().count() <= PREVIEW_MAX_CHARS {
        return body.to_string();
    }

    let mut cut: String = body.chars().take(PREVIEW_KEEP_CHARS).collect();
    let kept = cut.trim_end().len();
    cut.truncate(kept);
    cut.push('…');
    cut
}

impl MessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a forwarded message.
    ///
    /// Prepends the entry; `received_at` (or now when absent) becomes the
    /// display timestamp.
    pub fn append(
        &self,
        sender: &str,
        body: &str,
        received_at: Option<DateTime<Utc>>,
    ) -> EntryId {
        let id = EntryId::new();
        let entry = LogEntry {
            id,
            sender: sender.to_string(),
            preview: preview(body),
            forwarded_at: format::forwarded_at(received_at),
        };

        let mut entries = self.entries.write().unwrap();
        entries.insert(0, entry);

        debug!(entry_id = %id, sender = %sender, "forwarded message recorded");
        id
    }

    /// Snapshot of the log, most recent first.
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.read().unwrap().clone()
    }

    /// Number of recorded messages.
    pub fn len(&self) -> usize {
        self.entries.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_body_kept_verbatim() {
        let log = MessageLog::new();
        log.append("Bank", "code 123", None);

        let entries = log.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].sender, "Bank");
        assert_eq!(entries[0].preview, "code 123");
    }

    #[test]
    fn test_body_at_limit_not_truncated() {
        let log = MessageLog::new();
        let body = "x".repeat(160);
        log.append("Bank", &body, None);

        assert_eq!(log.entries()[0].preview, body);
    }

    #[test]
    fn test_long_body_truncated_with_ellipsis() {
        let log = MessageLog::new();
        log.append("Bank", &"x".repeat(200), None);

        let preview = &log.entries()[0].preview;
        assert_eq!(*preview, format!("{}…", "x".repeat(157)));
        assert_eq!(preview.chars().count(), 158);
        assert_eq!(preview.len(), 160);
    }

    #[test]
    fn test_truncation_trims_trailing_whitespace() {
        let log = MessageLog::new();
        let body = format!("{}   {}", "x".repeat(150), "y".repeat(50));
        log.append("Bank", &body, None);

        // Cut lands at character 157, four y's survive after the gap.
        let expected = format!("{}   {}…", "x".repeat(150), "y".repeat(4));
        assert_eq!(log.entries()[0].preview, expected);
    }

    #[test]
    fn test_trailing_whitespace_at_cut_removed() {
        let log = MessageLog::new();
        let body = format!("{}{}", "x".repeat(155), " ".repeat(45));
        log.append("Bank", &body, None);

        assert_eq!(log.entries()[0].preview, format!("{}…", "x".repeat(155)));
    }

    #[test]
    fn test_entries_newest_first() {
        let log = MessageLog::new();
        log.append("A", "first", None);
        log.append("B", "second", None);

        let senders: Vec<_> = log.entries().into_iter().map(|e| e.sender).collect();
        assert_eq!(senders, ["B", "A"]);
    }
}
