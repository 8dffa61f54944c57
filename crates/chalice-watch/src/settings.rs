//! Watch settings store.
//!
//! Mirrors the firmware's persisted settings: one int32 slot per
//! [`MessageKey`], with a change notification fired after each applied
//! message so display code can redraw.  Unset slots fall back to firmware
//! defaults (black for the face color).

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use tokio::sync::broadcast;
use tracing::debug;

use crate::keys::MessageKey;

/// Marker broadcast to subscribers after a message has been applied.
#[derive(Debug, Clone, Copy)]
pub struct SettingsChanged;

/// In-memory settings store, cheaply cloneable (`Arc`-backed) and
/// `Send + Sync`.
#[derive(Clone)]
pub struct SettingsStore {
    inner: Arc<SettingsStoreInner>,
}

struct SettingsStoreInner {
    values: RwLock<HashMap<MessageKey, i32>>,
    notify: broadcast::Sender<SettingsChanged>,
}

impl SettingsStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        let (notify, _) = broadcast::channel(16);
        Self {
            inner: Arc::new(SettingsStoreInner {
                values: RwLock::new(HashMap::new()),
                notify,
            }),
        }
    }

    /// Apply an incoming app-message dictionary.
    ///
    /// Every known key present in `dict` is written; known keys absent from
    /// the dict are logged and left untouched.  One change notification
    /// fires per applied dict, after all writes.
    pub fn apply(&self, dict: &[(MessageKey, i32)]) {
        {
            let mut values = self.inner.values.write().expect("settings lock poisoned");
            for key in MessageKey::ALL {
                match dict.iter().find(|(k, _)| *k == key) {
                    Some((_, v)) => {
                        values.insert(key, *v);
                    }
                    None => {
                        debug!(key = %key, "incoming message omits key");
                    }
                }
            }
        }

        // No subscribers is fine; display code may not be wired up yet.
        let _ = self.inner.notify.send(SettingsChanged);
    }

    /// Raw value of a key, if one has been applied.
    #[must_use]
    pub fn get(&self, key: MessageKey) -> Option<i32> {
        self.inner
            .values
            .read()
            .expect("settings lock poisoned")
            .get(&key)
            .copied()
    }

    /// The face accent color as `0xRRGGBB`, defaulting to black when unset.
    #[must_use]
    pub fn face_color(&self) -> u32 {
        self.get(MessageKey::ColorFace)
            .map(|v| v as u32)
            .unwrap_or(0x000000)
    }

    /// Subscribe to change notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<SettingsChanged> {
        self.inner.notify.subscribe()
    }
}

impl Default for SettingsStore {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
