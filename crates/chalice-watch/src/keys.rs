//! The watch's app-message key space.
//!
//! Messages to the watch are dictionaries of int32 values under small
//! numeric keys.  The companion-facing configuration form uses field
//! *names*; the transport maps names to keys before anything crosses the
//! wire.

use serde::{Deserialize, Serialize};

/// A numeric app-message key understood by the watch firmware.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u32)]
pub enum MessageKey {
    /// Accent color of the watchface.
    ColorFace = 0,
}

impl MessageKey {
    /// Every key the firmware understands, in key order.
    pub const ALL: [MessageKey; 1] = [MessageKey::ColorFace];

    /// The configuration-form field name for this key.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::ColorFace => "COLOR_FACE",
        }
    }

    /// Look up a key by its configuration-form field name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|k| k.name() == name)
    }
}

impl std::fmt::Display for MessageKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl TryFrom<u32> for MessageKey {
    type Error = u32;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::ALL
            .iter()
            .copied()
            .find(|k| *k as u32 == value)
            .ok_or(value)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_round_trips() {
        for key in MessageKey::ALL {
            assert_eq!(MessageKey::from_name(key.name()), Some(key));
        }
    }

    #[test]
    fn unknown_name_is_none() {
        assert_eq!(MessageKey::from_name("COLOR_HANDS"), None);
    }

    #[test]
    fn numeric_conversion() {
        assert_eq!(MessageKey::try_from(0), Ok(MessageKey::ColorFace));
        assert_eq!(MessageKey::try_from(99), Err(99));
    }
}
