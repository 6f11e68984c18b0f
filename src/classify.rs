//! Device kind classification from discovered identifier strings.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The kind of an input device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DeviceKind {
    /// A keyboard.
    Keyboard,
    /// A mouse, including vendor-specific mouse variants.
    Mouse,
    /// A gamepad or joystick.
    GamePad,
    /// Any other input device (touchscreens, switches, ...).
    Other,
}

impl fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DeviceKind::Keyboard => "keyboard",
            DeviceKind::Mouse => "mouse",
            DeviceKind::GamePad => "gamepad",
            DeviceKind::Other => "other device",
        };
        f.write_str(name)
    }
}

/// Classify a discovered device identifier into a [`DeviceKind`].
///
/// The identifier is the raw path or name produced by a discovery pass,
/// e.g. `/dev/input/by-path/pci-0000:00:14.0-usb-0:2:1.0-event-kbd`.
/// Path separators are normalized first so Windows-style identifiers
/// classify the same as POSIX ones. The marker is the trailing segment
/// after the last `-`: `kbd` is a keyboard, anything containing `mouse`
/// is a mouse, `joystick` is a gamepad, and every other marker is an
/// unspecific input device.
///
/// Returns `None` when the identifier carries no marker at all (no `-`
/// in it); callers are expected to warn and skip such identifiers.
pub fn classify(identifier: &str) -> Option<DeviceKind> {
    let normalized = identifier.replace('\\', "/");
    let (_, marker) = normalized.rsplit_once('-')?;
    Some(match marker {
        "kbd" => DeviceKind::Keyboard,
        m if m.contains("mouse") => DeviceKind::Mouse,
        "joystick" => DeviceKind::GamePad,
        _ => DeviceKind::Other,
    })
}
