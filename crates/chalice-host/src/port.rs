//! Host ports consumed by the companion.
//!
//! The companion touches the platform through exactly two primitives: a
//! URL opener for the configuration webview and an asynchronous message
//! transport to the paired watch.  Both are traits so tests and the CLI
//! can substitute in-process implementations.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ---------------------------------------------------------------------------
// Send outcome
// ---------------------------------------------------------------------------

/// The result of one app-message send.
///
/// The platform's legacy interface invoked exactly one of two callbacks per
/// send; this enum is that contract as a single return value.  A rejection
/// is an expected outcome, not an error: the caller decides whether to log
/// or react.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SendOutcome {
    /// The watch acknowledged the message.
    Delivered,
    /// The host or watch refused the message.
    Rejected {
        /// Host-supplied reason, passed through verbatim.
        reason: String,
    },
}

impl SendOutcome {
    /// Build a rejection with the given reason.
    #[must_use]
    pub fn rejected(reason: impl Into<String>) -> Self {
        Self::Rejected {
            reason: reason.into(),
        }
    }

    /// Whether this outcome is [`SendOutcome::Delivered`].
    #[must_use]
    pub fn is_delivered(&self) -> bool {
        matches!(self, Self::Delivered)
    }
}

impl std::fmt::Display for SendOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Delivered => write!(f, "delivered"),
            Self::Rejected { reason } => write!(f, "rejected: {reason}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Ports
// ---------------------------------------------------------------------------

/// Opens URLs in the host's external browser surface.
///
/// The open call is fire-and-forget: the platform gives no return contract,
/// and a failed open is a host concern.  Implementations may log their own
/// failures but must not panic.
pub trait UrlOpener: Send + Sync {
    /// Ask the host to open `url`.
    fn open_url(&self, url: &str);
}

/// Asynchronous message transport to the paired watch.
///
/// One call resolves to exactly one [`SendOutcome`].  Implementations own
/// the key-space mapping: a payload whose fields the watch does not
/// understand resolves to [`SendOutcome::Rejected`] rather than an error.
#[async_trait]
pub trait WatchTransport: Send + Sync {
    /// Send a string-keyed payload to the watch.
    async fn send_app_message(&self, payload: Map<String, Value>) -> SendOutcome;
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_carries_reason() {
        let outcome = SendOutcome::rejected("inbox full");
        match &outcome {
            SendOutcome::Rejected { reason } => assert_eq!(reason, "inbox full"),
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert!(!outcome.is_delivered());
    }

    #[test]
    fn delivered_displays_plainly() {
        assert_eq!(SendOutcome::Delivered.to_string(), "delivered");
        assert_eq!(
            SendOutcome::rejected("timeout").to_string(),
            "rejected: timeout"
        );
    }
}
