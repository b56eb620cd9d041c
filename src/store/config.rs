//! Forwarding configuration.

use serde::{Deserialize, Serialize};

/// Runtime forwarding settings.
///
/// `destination` is either empty (unset) or a non-empty trimmed number; the
/// flag and the destination toggle independently. Mutated only through the
/// [`ForwardingStore`](super::ForwardingStore) setters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForwardingConfig {
    /// Whether incoming messages are forwarded at all.
    pub enabled: bool,

    /// Destination number messages are forwarded to.
    #[serde(default)]
    pub destination: String,
}

impl Default for ForwardingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            destination: String::new(),
        }
    }
}

impl ForwardingConfig {
    /// True when no destination number has been set.
    pub fn destination_is_empty(&self) -> bool {
        self.destination.is_empty()
    }

    /// Apply a destination update, ignoring empty input.
    ///
    /// The destination can never be cleared through this path; a trimmed-empty
    /// value leaves the previous number intact.
    pub(super) fn update_destination(&mut self, value: &str) -> bool {
        let next = value.trim();

        if next.is_empty() {
            return false;
        }

        self.destination = next.to_string();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_enabled_without_destination() {
        let config = ForwardingConfig::default();
        assert!(config.enabled);
        assert!(config.destination_is_empty());
    }

    #[test]
    fn test_update_trims_destination() {
        let mut config = ForwardingConfig::default();
        assert!(config.update_destination("  +15551234567  "));
        assert_eq!(config.destination, "+15551234567");
    }

    #[test]
    fn test_empty_update_keeps_previous_destination() {
        let mut config = ForwardingConfig::default();
        config.update_destination("+15551234567");

        assert!(!config.update_destination(""));
        assert!(!config.update_destination("   "));
        assert_eq!(config.destination, "+15551234567");
    }
}
