//! Composer-based SMS channel.
//!
//! Generic fallback channel that hands the message to the platform's SMS
//! composer. Delivery goes through a user-visible prompt, so the platform can
//! report cancellation as a normal outcome.

use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use super::Delivery;

/// Outcome reported by the platform composer.
///
/// Legacy platforms report a bare string; [`FromStr`] maps the known values
/// and passes anything else through for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComposerResult {
    Sent,
    Queued,
    Cancelled,
    /// Unrecognized platform result string.
    Other(String),
}

impl FromStr for ComposerResult {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "sent" => Self::Sent,
            "queued" => Self::Queued,
            "cancelled" => Self::Cancelled,
            other => Self::Other(other.to_string()),
        })
    }
}

/// Platform binding for the SMS composer.
#[async_trait]
pub trait SmsComposer: Send + Sync {
    /// Whether the device can compose SMS at all.
    async fn is_available(&self) -> bool;

    /// Open the composer with the payload addressed to the recipients.
    async fn send_sms(&self, recipients: &[String], body: &str)
        -> anyhow::Result<ComposerResult>;
}

/// Delivery variant backed by an [`SmsComposer`].
#[derive(Clone)]
pub struct ComposerChannel {
    composer: Arc<dyn SmsComposer>,
}

impl ComposerChannel {
    pub fn new(composer: Arc<dyn SmsComposer>) -> Self {
        Self { composer }
    }

    /// Capability probe, queried before any send attempt.
    pub(super) async fn probe(&self) -> bool {
        self.composer.is_available().await
    }

    /// Send through the composer.
    ///
    /// `Sent` and `Queued` both count as delivered; `Cancelled` is a user
    /// action, not an error. Composer errors are wrapped, never propagated.
    pub(super) async fn send(&self, destination: &str, payload: &str) -> Delivery {
        let recipients = [destination.to_string()];

        match self.composer.send_sms(&recipients, payload).await {
            Ok(ComposerResult::Sent) | Ok(ComposerResult::Queued) => {
                debug!("composer delivery succeeded");
                Delivery::Delivered
            }
            Ok(ComposerResult::Cancelled) => {
                debug!("composer delivery cancelled by user");
                Delivery::Cancelled
            }
            Ok(ComposerResult::Other(result)) => {
                Delivery::Failed(anyhow::anyhow!("composer reported '{result}'"))
            }
            Err(error) => Delivery::Failed(error.context("composer send failed")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_parses_known_strings() {
        assert_eq!("sent".parse(), Ok(ComposerResult::Sent));
        assert_eq!("queued".parse(), Ok(ComposerResult::Queued));
        assert_eq!("cancelled".parse(), Ok(ComposerResult::Cancelled));
    }

    #[test]
    fn test_result_passes_unknown_through() {
        assert_eq!(
            "dismissed".parse(),
            Ok(ComposerResult::Other("dismissed".to_string()))
        );
    }
}
