//! Delivery channels.
//!
//! A closed set of two delivery variants, tried in fixed priority order:
//! 1. [`NativeChannel`] — OS default-SMS-app integration, promptless; always
//!    preferred when present and its probe passes.
//! 2. [`ComposerChannel`] — generic SMS composer, gated on an availability
//!    query; delivery may be cancelled by the user.
//!
//! Every collaborator error is caught here and wrapped into
//! [`Delivery::Failed`]; nothing below this boundary raises.

mod composer;
mod native;

pub use composer::{ComposerChannel, ComposerResult, SmsComposer};
pub use native::{NativeBridge, NativeChannel};

use std::sync::Arc;

use tracing::debug;

/// Result of one delivery attempt.
#[derive(Debug)]
pub enum Delivery {
    /// The message was sent or queued for sending.
    Delivered,
    /// The user dismissed the composer. Not an error.
    Cancelled,
    /// No channel could be tried; nothing was attempted.
    Unavailable,
    /// A channel was tried and failed.
    Failed(anyhow::Error),
}

/// Priority-ordered set of delivery variants.
#[derive(Clone, Default)]
pub struct ChannelSet {
    native: Option<NativeChannel>,
    composer: Option<ComposerChannel>,
}

impl ChannelSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a native bridge. Takes priority over the composer.
    pub fn with_native(mut self, bridge: Arc<dyn NativeBridge>) -> Self {
        self.native = Some(NativeChannel::new(bridge));
        self
    }

    /// Attach a composer channel.
    pub fn with_composer(mut self, composer: Arc<dyn SmsComposer>) -> Self {
        self.composer = Some(ComposerChannel::new(composer));
        self
    }

    /// Attempt delivery through the highest-priority available variant.
    ///
    /// The native bridge is tried first when present and probing available;
    /// otherwise the composer, gated on its own availability query. With no
    /// variant available, returns [`Delivery::Unavailable`] without any send
    /// attempt.
    pub async fn deliver(&self, destination: &str, payload: &str) -> Delivery {
        if let Some(native) = &self.native {
            if native.probe().await {
                debug!(dest = %destination, "delivering via native bridge");
                return native.send(destination, payload).await;
            }
        }

        if let Some(composer) = &self.composer {
            if !composer.probe().await {
                return Delivery::Unavailable;
            }

            debug!(dest = %destination, "delivering via composer");
            return composer.send(destination, payload).await;
        }

        Delivery::Unavailable
    }
}
