//! Bridge error types.
//!
//! Every variant here is a decode fault: the webview handed back something
//! that is not percent-encoded JSON text describing an object.  A watch
//! transport rejection is deliberately *not* an error -- it is an expected
//! [`chalice_host::SendOutcome`] that the bridge logs and returns.

/// Unified error type for the configuration bridge.
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    /// A `%` escape in the webview response was truncated or non-hex.
    #[error("malformed percent-encoding at byte {position}")]
    MalformedPercentEncoding {
        /// Byte offset of the offending `%` in the raw response.
        position: usize,
    },

    /// The percent-decoded bytes are not valid UTF-8.
    #[error("webview response is not valid UTF-8 after percent-decoding")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    /// The decoded text is not valid JSON.
    #[error("webview response is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// The decoded text is valid JSON but not a JSON object.
    #[error("webview response decoded to a non-object JSON value")]
    NotAnObject,
}

/// Convenience alias used throughout the bridge crate.
pub type Result<T> = std::result::Result<T, BridgeError>;
