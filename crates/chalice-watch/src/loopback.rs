//! Loopback watch transport.
//!
//! Stands in for the phone runtime plus a paired watch: it maps the
//! string-keyed configuration object onto the numeric app-message key space
//! and applies it to a [`SettingsStore`].  A payload the watch would not
//! understand resolves to [`SendOutcome::Rejected`], which is exactly the
//! NAK path of the real platform.

use async_trait::async_trait;
use serde_json::{Map, Value};
use tracing::debug;

use chalice_host::{SendOutcome, WatchTransport};

use crate::keys::MessageKey;
use crate::settings::SettingsStore;

/// In-process [`WatchTransport`] backed by a [`SettingsStore`].
#[derive(Clone)]
pub struct LoopbackWatch {
    store: SettingsStore,
}

impl LoopbackWatch {
    /// Create a transport that applies delivered messages to `store`.
    #[must_use]
    pub fn new(store: SettingsStore) -> Self {
        Self { store }
    }

    /// The settings store behind this transport.
    #[must_use]
    pub fn store(&self) -> &SettingsStore {
        &self.store
    }
}

#[async_trait]
impl WatchTransport for LoopbackWatch {
    async fn send_app_message(&self, payload: Map<String, Value>) -> SendOutcome {
        let mut dict = Vec::with_capacity(payload.len());
        for (field, value) in &payload {
            let key = match MessageKey::from_name(field) {
                Some(key) => key,
                None => {
                    return SendOutcome::rejected(format!("unknown field `{field}`"));
                }
            };
            let v = match coerce_int32(value) {
                Some(v) => v,
                None => {
                    return SendOutcome::rejected(format!(
                        "field `{field}` is not an int32-compatible value: {value}"
                    ));
                }
            };
            dict.push((key, v));
        }

        debug!(entries = dict.len(), "applying app message to settings");
        self.store.apply(&dict);
        SendOutcome::Delivered
    }
}

/// Coerce a configuration value to the watch's int32 tuple representation.
///
/// Accepts integers in range, booleans (as 0/1), and `#RRGGBB` /
/// `0xRRGGBB` color strings.
fn coerce_int32(value: &Value) -> Option<i32> {
    match value {
        Value::Number(n) => n.as_i64().and_then(|v| i32::try_from(v).ok()),
        Value::Bool(b) => Some(i32::from(*b)),
        Value::String(s) => parse_color_hex(s),
        _ => None,
    }
}

/// Parse a `#RRGGBB` or `0xRRGGBB` color string into its numeric value.
fn parse_color_hex(s: &str) -> Option<i32> {
    let digits = s
        .strip_prefix('#')
        .or_else(|| s.strip_prefix("0x"))
        .or_else(|| s.strip_prefix("0X"))?;
    if digits.len() != 6 {
        return None;
    }
    i32::from_str_radix(digits, 16).ok()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn as_map(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got: {other:?}"),
        }
    }

    #[tokio::test]
    async fn delivers_numeric_color() {
        let watch = LoopbackWatch::new(SettingsStore::new());
        let outcome = watch
            .send_app_message(as_map(json!({"COLOR_FACE": 0x123456})))
            .await;
        assert!(outcome.is_delivered());
        assert_eq!(watch.store().face_color(), 0x123456);
    }

    #[tokio::test]
    async fn delivers_hex_string_color() {
        let watch = LoopbackWatch::new(SettingsStore::new());
        let outcome = watch
            .send_app_message(as_map(json!({"COLOR_FACE": "#00ff55"})))
            .await;
        assert!(outcome.is_delivered());
        assert_eq!(watch.store().face_color(), 0x00FF55);

        let outcome = watch
            .send_app_message(as_map(json!({"COLOR_FACE": "0xFF0000"})))
            .await;
        assert!(outcome.is_delivered());
        assert_eq!(watch.store().face_color(), 0xFF0000);
    }

    #[tokio::test]
    async fn rejects_unknown_field_with_its_name() {
        let watch = LoopbackWatch::new(SettingsStore::new());
        let outcome = watch
            .send_app_message(as_map(json!({"COLOR_HANDS": 1})))
            .await;
        match outcome {
            SendOutcome::Rejected { reason } => assert!(reason.contains("COLOR_HANDS")),
            other => panic!("expected rejection, got: {other:?}"),
        }
        // Nothing was applied.
        assert_eq!(watch.store().get(MessageKey::ColorFace), None);
    }

    #[tokio::test]
    async fn rejects_non_coercible_value() {
        let watch = LoopbackWatch::new(SettingsStore::new());
        let outcome = watch
            .send_app_message(as_map(json!({"COLOR_FACE": [1, 2]})))
            .await;
        match outcome {
            SendOutcome::Rejected { reason } => assert!(reason.contains("COLOR_FACE")),
            other => panic!("expected rejection, got: {other:?}"),
        }
    }

    #[tokio::test]
    async fn empty_payload_is_delivered() {
        let watch = LoopbackWatch::new(SettingsStore::new());
        let outcome = watch.send_app_message(Map::new()).await;
        assert!(outcome.is_delivered());
        assert_eq!(watch.store().face_color(), 0x000000);
    }

    #[test]
    fn color_hex_parsing() {
        assert_eq!(parse_color_hex("#ffffff"), Some(0xFFFFFF));
        assert_eq!(parse_color_hex("0x000000"), Some(0));
        assert_eq!(parse_color_hex("ffffff"), None);
        assert_eq!(parse_color_hex("#fff"), None);
        assert_eq!(parse_color_hex("#zzzzzz"), None);
    }

    #[test]
    fn int32_coercion() {
        assert_eq!(coerce_int32(&json!(42)), Some(42));
        assert_eq!(coerce_int32(&json!(true)), Some(1));
        assert_eq!(coerce_int32(&json!(false)), Some(0));
        assert_eq!(coerce_int32(&json!(1.5)), None);
        assert_eq!(coerce_int32(&json!(i64::MAX)), None);
        assert_eq!(coerce_int32(&json!(null)), None);
    }
}
