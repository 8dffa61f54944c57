//! Host error types.
//!
//! Everything the host layer can fail at surfaces through [`HostError`].
//! The set is deliberately small: the URL opener is fire-and-forget and the
//! watch transport reports delivery through [`crate::port::SendOutcome`]
//! rather than an error, so only the bus itself has failure modes.

/// Unified error type for the chalice host layer.
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    /// Publishing a lifecycle event to the bus failed.
    #[error("lifecycle publish failed: {reason}")]
    PublishFailed { reason: String },

    /// Catch-all for unexpected internal errors that don't fit a specific
    /// variant.  Prefer a typed variant whenever possible.
    #[error("internal host error: {0}")]
    Internal(String),
}

/// Convenience alias used throughout the host crate.
pub type Result<T> = std::result::Result<T, HostError>;
