//! Host-runtime primitives for the chalice companion app.
//!
//! This crate defines the seams between the companion logic and the
//! wearable-platform host:
//!
//! - **[`event`]** -- Typed lifecycle event bus backed by
//!   [`tokio::sync::broadcast`], carrying the `ready`,
//!   `showConfiguration`, and `webviewclosed` signals.
//! - **[`port`]** -- The two host primitives the companion consumes: a
//!   fire-and-forget URL opener and an asynchronous watch message
//!   transport resolving to a single [`port::SendOutcome`].
//! - **[`error`]** -- Host error types via [`thiserror`].
//!
//! All public types are `Send + Sync` and designed for use within a
//! multi-threaded tokio runtime.

pub mod error;
pub mod event;
pub mod port;

// Re-export the most commonly used types at the crate root for convenience.
pub use error::{HostError, Result};
pub use event::{LifecycleBus, LifecycleEvent};
pub use port::{SendOutcome, UrlOpener, WatchTransport};
