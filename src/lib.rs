//! SMS forwarding engine.
//!
//! Decides, for each incoming text message, whether to forward it to the
//! configured destination number, which delivery channel to use, and how to
//! record the outcome. State (config, blacklist, message log) lives in an
//! explicitly constructed [`ForwardingStore`] shared between the engine and
//! whatever UI consumes it.
//!
//! ```text
//! OS SMS source ──▶ Listener ──▶ ForwardingEngine ──▶ ChannelSet ──▶ platform
//!                                     │                                send
//!                                     ▼
//!                              ForwardingStore
//!                          (config / blacklist / log)
//! ```
//!
//! Platform integrations (native bridge, SMS composer, permission requester,
//! event source) are injected behind traits; the crate contains no OS
//! bindings of its own.

pub mod channel;
pub mod format;
pub mod forwarder;
pub mod id;
pub mod listener;
pub mod store;
pub mod telemetry;

pub use channel::{ChannelSet, ComposerResult, Delivery, NativeBridge, SmsComposer};
pub use forwarder::{FailureReason, ForwardOutcome, ForwardingEngine, IncomingMessage};
pub use id::EntryId;
pub use listener::{subscribe, Capability, PermissionRequester, RawSmsEvent, Subscription};
pub use store::{BlacklistEntry, BlacklistError, ForwardingConfig, ForwardingStore, LogEntry};
