//! # hidscan
//!
//! A pure Rust cross-platform input device discovery library.
//!
//! ## Features
//!
//! - Cross-platform discovery (Linux/POSIX, macOS, Windows)
//! - One deduplicated, ordered view over keyboards, mice, gamepads and
//!   everything else
//! - Stable symbolic names for raw event types and codes, with Windows
//!   quirks handled in one place
//! - Injectable platform tag and filesystem/open capabilities for testing
//!
//! ## Quick Start
//!
//! ### Reading from the first keyboard
//!
//! ```no_run
//! use hidscan::get_key;
//!
//! let events = get_key().expect("no keyboard attached");
//! for event in events {
//!     println!("{} {} {}", event.ev_type, event.code, event.state);
//! }
//! ```
//!
//! ### Listing discovered devices
//!
//! ```no_run
//! use hidscan::DeviceManager;
//!
//! let manager = DeviceManager::new().expect("discovery failed");
//! for device in &manager {
//!     println!("{}: {}", device.kind(), device.identity());
//! }
//! ```
//!
//! ## Architecture
//!
//! Discovery runs once, synchronously, when a [`DeviceManager`] is
//! constructed: the platform's strategy enumerates raw identifiers, each
//! identifier is classified by its naming markers and inserted into the
//! registry under its canonical identity (so a device reachable through
//! several paths appears once). The manager then answers code lookups
//! and serves the device collections; it never rescans.

pub mod classify;
pub mod codes;
pub mod device;
pub mod error;
pub mod event;
pub mod manager;
pub mod platform;
pub mod registry;

// Re-exports
pub use classify::{DeviceKind, classify};
pub use codes::CodeTables;
pub use device::{Device, DeviceOpener, DeviceReader, EventLookup};
pub use error::{Error, Result};
pub use event::InputEvent;
pub use manager::{DeviceManager, ManagerBuilder};
pub use platform::{Enumerate, Platform, SysFs};
pub use registry::DeviceRegistry;

use std::sync::OnceLock;

static DEVICES: OnceLock<DeviceManager> = OnceLock::new();

/// The process-wide device manager, constructed on first use.
///
/// Kept alive until process exit; there is no teardown. Prefer passing
/// an explicit [`DeviceManager`] through your own code and reserve this
/// for the top-level convenience reads below. A failed construction is
/// not cached, so a later call may succeed once the underlying problem
/// (typically permissions) is fixed.
pub fn devices() -> Result<&'static DeviceManager> {
    if let Some(manager) = DEVICES.get() {
        return Ok(manager);
    }
    let manager = DeviceManager::new()?;
    // A racing thread may have won initialization; its manager is kept
    // and ours is dropped.
    Ok(DEVICES.get_or_init(|| manager))
}

/// Blocking read from the first keyboard of the process-wide manager.
///
/// Fails with [`Error::Unplugged`] when no keyboard was discovered.
pub fn get_key() -> Result<Vec<InputEvent>> {
    devices()?.get_key()
}

/// Blocking read from the first mouse of the process-wide manager.
///
/// Fails with [`Error::Unplugged`] when no mouse was discovered.
pub fn get_mouse() -> Result<Vec<InputEvent>> {
    devices()?.get_mouse()
}

/// Blocking read from the first gamepad of the process-wide manager.
///
/// Fails with [`Error::Unplugged`] when no gamepad was discovered.
pub fn get_gamepad() -> Result<Vec<InputEvent>> {
    devices()?.get_gamepad()
}
