//! Configuration bridge for the chalice companion app.
//!
//! This crate implements the companion side of the configuration round
//! trip:
//!
//! - **[`bridge`]** -- [`ConfigBridge`], the adapter bound to the host's
//!   `ready`, `showConfiguration`, and `webviewclosed` lifecycle signals.
//! - **[`payload`]** -- the percent-encoded JSON codec for the webview's
//!   response payload.
//! - **[`error`]** -- decode fault types via [`thiserror`].

pub mod bridge;
pub mod error;
pub mod payload;

pub use bridge::{CONFIG_URL, ConfigBridge};
pub use error::{BridgeError, Result};
pub use payload::{decode_response, percent_decode, percent_encode};
