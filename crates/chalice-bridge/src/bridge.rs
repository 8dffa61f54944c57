//! The configuration bridge.
//!
//! [`ConfigBridge`] mediates between the host lifecycle and the watch: it
//! marks readiness on `ready`, opens the configuration webview on
//! `showConfiguration`, and on `webviewclosed` decodes the returned payload
//! and forwards it to the watch transport, logging the outcome.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::broadcast;
use tracing::{debug, error, info, warn};

use chalice_host::{LifecycleEvent, SendOutcome, UrlOpener, WatchTransport};

use crate::error::Result;
use crate::payload::decode_response;

/// Fixed URL of the external configuration form.
pub const CONFIG_URL: &str = "http://woozle.org/neale/misc/twatch-config/chalice.html";

/// Adapter between the host lifecycle and the watch configuration surface.
///
/// Handlers are independent and stateless except for the one-shot readiness
/// flag, which lives on the instance rather than in module-level state.
/// The bridge is `Send + Sync` and can be shared behind an [`Arc`].
pub struct ConfigBridge {
    /// Set once on the first `ready` signal, never cleared.
    ready: AtomicBool,
    opener: Arc<dyn UrlOpener>,
    transport: Arc<dyn WatchTransport>,
}

impl ConfigBridge {
    /// Create a bridge over the given host ports.
    pub fn new(opener: Arc<dyn UrlOpener>, transport: Arc<dyn WatchTransport>) -> Self {
        Self {
            ready: AtomicBool::new(false),
            opener,
            transport,
        }
    }

    /// Whether the host has signalled `ready`.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    /// Handle the `ready` signal.
    ///
    /// Sets the readiness flag; calling it again leaves the flag true.
    pub fn on_ready(&self) {
        self.ready.store(true, Ordering::Release);
        info!("host ready");
    }

    /// Handle the `showConfiguration` signal.
    ///
    /// Always opens the same fixed URL; the open call is fire-and-forget
    /// and any failure is the host's concern.
    pub fn on_show_configuration(&self) {
        info!(url = CONFIG_URL, "showing configuration");
        self.opener.open_url(CONFIG_URL);
    }

    /// Handle the `webviewclosed` signal.
    ///
    /// Decodes the percent-encoded JSON response and forwards the resulting
    /// object to the watch exactly as decoded -- no merging, caching, or
    /// field validation.  A decode fault returns `Err` without touching the
    /// transport; a transport rejection is logged and returned as an
    /// ordinary [`SendOutcome`].
    pub async fn on_webview_closed(&self, response: &str) -> Result<SendOutcome> {
        debug!(encoded_len = response.len(), "configuration webview closed");
        let options = decode_response(response)?;

        let outcome = self.transport.send_app_message(options).await;
        match &outcome {
            SendOutcome::Delivered => info!("configuration sent"),
            SendOutcome::Rejected { reason } => {
                warn!(reason = %reason, "configuration not sent");
            }
        }
        Ok(outcome)
    }

    /// Consume lifecycle events until the bus closes.
    ///
    /// Each event is handled to completion before the next is taken, so
    /// sends from successive `webviewclosed` events are naturally
    /// serialized.  A decode fault is logged and does not stop the loop;
    /// a lagged receiver skips the missed events and keeps going.
    pub async fn run(&self, mut events: broadcast::Receiver<Arc<LifecycleEvent>>) {
        loop {
            match events.recv().await {
                Ok(event) => match event.as_ref() {
                    LifecycleEvent::Ready { .. } => self.on_ready(),
                    LifecycleEvent::ShowConfiguration { .. } => self.on_show_configuration(),
                    LifecycleEvent::WebviewClosed { response, .. } => {
                        if let Err(e) = self.on_webview_closed(response).await {
                            error!(error = %e, "unhandled webview response");
                        }
                    }
                },
                Err(broadcast::error::RecvError::Lagged(missed)) => {
                    warn!(missed, "lifecycle receiver lagged; events dropped");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
        debug!("lifecycle bus closed; bridge loop exiting");
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Mutex;
    use std::sync::atomic::AtomicUsize;

    use async_trait::async_trait;
    use serde_json::{Map, Value, json};

    #[derive(Default)]
    struct RecordingOpener {
        opened: Mutex<Vec<String>>,
    }

    impl UrlOpener for RecordingOpener {
        fn open_url(&self, url: &str) {
            self.opened.lock().unwrap().push(url.to_string());
        }
    }

    struct RecordingTransport {
        sent: Mutex<Vec<Map<String, Value>>>,
        calls: AtomicUsize,
        reject_with: Option<String>,
    }

    impl RecordingTransport {
        fn accepting() -> Self {
            Self {
                sent: Mutex::new(Vec::new()),
                calls: AtomicUsize::new(0),
                reject_with: None,
            }
        }

        fn rejecting(reason: &str) -> Self {
            Self {
                reject_with: Some(reason.to_string()),
                ..Self::accepting()
            }
        }
    }

    #[async_trait]
    impl WatchTransport for RecordingTransport {
        async fn send_app_message(&self, payload: Map<String, Value>) -> SendOutcome {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.sent.lock().unwrap().push(payload);
            match &self.reject_with {
                Some(reason) => SendOutcome::rejected(reason.clone()),
                None => SendOutcome::Delivered,
            }
        }
    }

    fn bridge_with(transport: Arc<RecordingTransport>) -> (ConfigBridge, Arc<RecordingOpener>) {
        let opener = Arc::new(RecordingOpener::default());
        let bridge = ConfigBridge::new(opener.clone(), transport);
        (bridge, opener)
    }

    #[test]
    fn ready_flag_is_one_shot_and_idempotent() {
        let (bridge, _) = bridge_with(Arc::new(RecordingTransport::accepting()));
        assert!(!bridge.is_ready());

        bridge.on_ready();
        assert!(bridge.is_ready());

        bridge.on_ready();
        assert!(bridge.is_ready());
    }

    #[test]
    fn show_configuration_always_opens_fixed_url() {
        let (bridge, opener) = bridge_with(Arc::new(RecordingTransport::accepting()));

        bridge.on_show_configuration();
        bridge.on_show_configuration();

        let opened = opener.opened.lock().unwrap();
        assert_eq!(*opened, vec![CONFIG_URL.to_string(), CONFIG_URL.to_string()]);
    }

    #[test]
    fn config_url_is_well_formed() {
        let parsed = url::Url::parse(CONFIG_URL).expect("CONFIG_URL must parse");
        assert_eq!(parsed.scheme(), "http");
    }

    #[tokio::test]
    async fn webview_closed_forwards_decoded_object_verbatim() {
        let transport = Arc::new(RecordingTransport::accepting());
        let (bridge, _) = bridge_with(transport.clone());

        let outcome = bridge.on_webview_closed("%7B%22a%22%3A1%7D").await.unwrap();
        assert!(outcome.is_delivered());

        let sent = transport.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(Value::Object(sent[0].clone()), json!({"a": 1}));
    }

    #[tokio::test]
    async fn decode_fault_never_reaches_transport() {
        let transport = Arc::new(RecordingTransport::accepting());
        let (bridge, _) = bridge_with(transport.clone());

        let result = bridge.on_webview_closed("not json").await;
        assert!(result.is_err());
        assert_eq!(transport.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn rejection_is_surfaced_not_raised() {
        let transport = Arc::new(RecordingTransport::rejecting("inbox full"));
        let (bridge, _) = bridge_with(transport.clone());

        let outcome = bridge.on_webview_closed("%7B%7D").await.unwrap();
        assert_eq!(outcome, SendOutcome::rejected("inbox full"));
        // Exactly one send, exactly one outcome.
        assert_eq!(transport.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn repeated_closes_each_produce_an_independent_send() {
        let transport = Arc::new(RecordingTransport::accepting());
        let (bridge, _) = bridge_with(transport.clone());

        bridge.on_webview_closed("%7B%22a%22%3A1%7D").await.unwrap();
        bridge.on_webview_closed("%7B%22a%22%3A2%7D").await.unwrap();

        let sent = transport.sent.lock().unwrap();
        assert_eq!(sent.len(), 2);
        assert_eq!(Value::Object(sent[1].clone()), json!({"a": 2}));
    }
}
