//! Watch-side settings model for the chalice companion.
//!
//! - **[`keys`]** -- the firmware's app-message key space.
//! - **[`settings`]** -- int32-per-key settings store with change
//!   notifications, mirroring the firmware's persisted settings.
//! - **[`loopback`]** -- an in-process [`chalice_host::WatchTransport`]
//!   used by the CLI simulation and integration tests.

pub mod keys;
pub mod loopback;
pub mod settings;

pub use keys::MessageKey;
pub use loopback::LoopbackWatch;
pub use settings::{SettingsChanged, SettingsStore};
