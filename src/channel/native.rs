//! Native platform forwarding channel.
//!
//! Wraps an OS-level messaging integration (a default-SMS-app module) that
//! can deliver without a user-facing compose prompt. Present only on
//! platforms that ship the module; always preferred when its probe passes.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use super::Delivery;

/// Platform binding for the native forwarding module.
///
/// Implemented by the host over its OS bridge; the crate never talks to the
/// OS directly.
#[async_trait]
pub trait NativeBridge: Send + Sync {
    /// Whether this app currently holds the default-SMS-app role.
    async fn is_default_sms_app(&self) -> anyhow::Result<bool>;

    /// Deliver the formatted payload to the destination number.
    async fn send_forwarded_message(&self, destination: &str, body: &str) -> anyhow::Result<()>;
}

/// Delivery variant backed by a [`NativeBridge`].
#[derive(Clone)]
pub struct NativeChannel {
    bridge: Arc<dyn NativeBridge>,
}

impl NativeChannel {
    pub fn new(bridge: Arc<dyn NativeBridge>) -> Self {
        Self { bridge }
    }

    /// Capability probe. Probe errors count as unavailable, never as fatal.
    pub(super) async fn probe(&self) -> bool {
        match self.bridge.is_default_sms_app().await {
            Ok(available) => available,
            Err(error) => {
                warn!(error = %error, "native bridge probe failed");
                false
            }
        }
    }

    /// Send through the native bridge.
    ///
    /// Bridge errors are wrapped, never propagated; there is no fallback to
    /// another channel once the native send has been attempted.
    pub(super) async fn send(&self, destination: &str, payload: &str) -> Delivery {
        match self.bridge.send_forwarded_message(destination, payload).await {
            Ok(()) => {
                debug!("native bridge delivery succeeded");
                Delivery::Delivered
            }
            Err(error) => Delivery::Failed(error.context("native bridge send failed")),
        }
    }
}
