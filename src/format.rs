//! Outgoing payload and timestamp formatting.

use chrono::{DateTime, Local, Utc};

/// Header used when the incoming message carries no sender label.
const UNKNOWN_SENDER_HEADER: &str = "From: Unknown sender";

/// Display format for forwarded-at timestamps.
const FORWARDED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Build the payload sent to the destination number.
///
/// A `From:` header line, a blank line, then the original body. Empty or
/// whitespace-only senders render as `Unknown sender`; anything else is kept
/// exactly as the OS reported it.
pub fn forward_payload(sender: &str, body: &str) -> String {
    if sender.trim().is_empty() {
        format!("{UNKNOWN_SENDER_HEADER}\n\n{body}")
    } else {
        format!("From: {sender}\n\n{body}")
    }
}

/// Render the forwarded-at display timestamp for a log entry.
///
/// Falls back to the current time when the event carried no timestamp.
pub fn forwarded_at(received_at: Option<DateTime<Utc>>) -> String {
    received_at
        .unwrap_or_else(Utc::now)
        .with_timezone(&Local)
        .format(FORWARDED_AT_FORMAT)
        .to_string()
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_payload_has_header_and_spacer() {
        let payload = forward_payload("+15551234567", "hello");
        assert_eq!(payload, "From: +15551234567\n\nhello");
    }

    #[test]
    fn test_payload_unknown_sender() {
        assert_eq!(forward_payload("", "hi"), "From: Unknown sender\n\nhi");
        assert_eq!(forward_payload("   ", "hi"), "From: Unknown sender\n\nhi");
    }

    #[test]
    fn test_payload_keeps_sender_verbatim() {
        let payload = forward_payload("  Bank  ", "code 123");
        assert_eq!(payload, "From:   Bank  \n\ncode 123");
    }

    #[test]
    fn test_forwarded_at_uses_event_timestamp() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 5, 12, 30, 0).unwrap();
        let rendered = forwarded_at(Some(ts));

        // Local-time rendering; the date digits must come from the event.
        assert!(rendered.starts_with("2024-03-0"));
    }

    #[test]
    fn test_forwarded_at_defaults_to_now() {
        // Smoke test only: absent timestamp must still render something.
        assert!(!forwarded_at(None).is_empty());
    }
}
