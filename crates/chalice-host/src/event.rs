//! Lifecycle event bus.
//!
//! The bus delivers the three host lifecycle signals the companion cares
//! about as typed events over [`tokio::sync::broadcast`].  Events are
//! wrapped in [`Arc`] so that broadcasting to multiple subscribers does not
//! clone the payload (the `webviewclosed` response string can be sizeable).
//!
//! # Usage
//!
//! ```rust,no_run
//! # use chalice_host::event::{LifecycleBus, LifecycleEvent};
//! # async fn example() {
//! let bus = LifecycleBus::new(64);
//! let mut rx = bus.subscribe();
//!
//! bus.publish(LifecycleEvent::ready()).unwrap();
//!
//! let event = rx.recv().await.unwrap();
//! # }
//! ```

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::error::Result;

// ---------------------------------------------------------------------------
// Event types
// ---------------------------------------------------------------------------

/// A host lifecycle event.
///
/// These correspond one-to-one to the named signals the wearable platform
/// delivers to a companion app: `ready`, `showConfiguration`, and
/// `webviewclosed`.  Each carries the moment it was published so late
/// subscribers and logs can order them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum LifecycleEvent {
    /// The host runtime finished starting and the companion may use its
    /// messaging primitives.
    Ready {
        /// When the signal was published.
        at: DateTime<Utc>,
    },

    /// The user asked to open the configuration surface.
    ShowConfiguration {
        at: DateTime<Utc>,
    },

    /// The configuration webview closed and handed back its result.
    WebviewClosed {
        /// Percent-encoded JSON text supplied by the webview.
        response: String,
        at: DateTime<Utc>,
    },
}

impl LifecycleEvent {
    /// A `Ready` event stamped with the current time.
    #[must_use]
    pub fn ready() -> Self {
        Self::Ready { at: Utc::now() }
    }

    /// A `ShowConfiguration` event stamped with the current time.
    #[must_use]
    pub fn show_configuration() -> Self {
        Self::ShowConfiguration { at: Utc::now() }
    }

    /// A `WebviewClosed` event carrying the webview's encoded response.
    #[must_use]
    pub fn webview_closed(response: impl Into<String>) -> Self {
        Self::WebviewClosed {
            response: response.into(),
            at: Utc::now(),
        }
    }

    /// Short machine-readable name of the signal, matching the host's
    /// subscribe-by-name convention.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Ready { .. } => "ready",
            Self::ShowConfiguration { .. } => "showConfiguration",
            Self::WebviewClosed { .. } => "webviewclosed",
        }
    }
}

// ---------------------------------------------------------------------------
// Lifecycle bus
// ---------------------------------------------------------------------------

/// Publish/subscribe lifecycle bus backed by [`tokio::sync::broadcast`].
///
/// The bus is cheaply cloneable (`Arc`-backed) and `Send + Sync`.
/// Subscribers receive [`Arc<LifecycleEvent>`] references, avoiding
/// per-subscriber cloning of the event payload.
#[derive(Clone)]
pub struct LifecycleBus {
    inner: Arc<LifecycleBusInner>,
}

struct LifecycleBusInner {
    sender: broadcast::Sender<Arc<LifecycleEvent>>,
}

impl LifecycleBus {
    /// Create a new bus with the given channel capacity.
    ///
    /// If a subscriber falls behind by more than `capacity` events, it will
    /// receive a [`broadcast::error::RecvError::Lagged`] error indicating
    /// how many events were missed.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self {
            inner: Arc::new(LifecycleBusInner { sender }),
        }
    }

    /// Publish an event to all current subscribers.
    ///
    /// Returns the number of receivers that will observe this event.  If
    /// there are no active subscribers the event is silently dropped (this
    /// is not considered an error during early startup).
    pub fn publish(&self, event: LifecycleEvent) -> Result<usize> {
        let name = event.name();
        let event = Arc::new(event);
        match self.inner.sender.send(event) {
            Ok(n) => {
                tracing::trace!(signal = name, receivers = n, "lifecycle event published");
                Ok(n)
            }
            Err(_) => {
                // No active receivers -- common during startup/shutdown.
                tracing::trace!(signal = name, "lifecycle event published but no active receivers");
                Ok(0)
            }
        }
    }

    /// Create a new subscriber that will receive all future events.
    ///
    /// Events published *before* this call are **not** replayed.
    pub fn subscribe(&self) -> broadcast::Receiver<Arc<LifecycleEvent>> {
        tracing::trace!("new lifecycle subscriber created");
        self.inner.sender.subscribe()
    }

    /// Return the current number of active subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.inner.sender.receiver_count()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
