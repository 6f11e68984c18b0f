//! Structured input events produced by device readers.

use crate::device::EventLookup;
use crate::error::Result;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A single decoded input event.
///
/// Event type and code are carried as their stable symbolic names so that
/// consumers never see platform-specific numeric ids.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct InputEvent {
    /// Label of the device that produced the event.
    pub device: String,
    /// Event type name, e.g. `Key` or `Relative`.
    pub ev_type: String,
    /// Symbolic code name, e.g. `KEY_ENTER`.
    pub code: String,
    /// Numeric state (key down/up, axis value, ...).
    pub state: i32,
    /// Seconds since the epoch, sub-millisecond resolution.
    pub timestamp: f64,
}

impl InputEvent {
    /// Create an event from already-resolved names.
    pub fn new(
        device: impl Into<String>,
        ev_type: impl Into<String>,
        code: impl Into<String>,
        state: i32,
        timestamp: f64,
    ) -> Self {
        Self {
            device: device.into(),
            ev_type: ev_type.into(),
            code: code.into(),
            state,
            timestamp,
        }
    }

    /// Create an event from raw numeric type and code ids, resolving both
    /// through the code tables.
    ///
    /// Unknown ids are data errors and fail the whole call.
    pub fn from_raw(
        lookup: EventLookup,
        device: &str,
        type_id: u16,
        code_id: u16,
        state: i32,
        timestamp: f64,
    ) -> Result<Self> {
        let ev_type = lookup.event_type_name(type_id)?;
        let code = lookup.event_code_name(ev_type, code_id)?;
        Ok(Self::new(device, ev_type, code, state, timestamp))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::Platform;

    #[test]
    fn test_input_event_fields() {
        let event = InputEvent::new("Some Device", "Key", "KEY_ENTER", 0, 1530900876.367757);
        assert_eq!(event.device, "Some Device");
        assert_eq!(event.ev_type, "Key");
        assert_eq!(event.state, 0);
        assert_eq!(event.timestamp, 1530900876.367757);
        assert_eq!(event.code, "KEY_ENTER");
    }

    #[test]
    fn test_from_raw_resolves_names() {
        let lookup = EventLookup::shared(Platform::Posix);
        let event =
            InputEvent::from_raw(lookup, "My Keyboard", 0x01, 0x01, 1, 1530900876.5).unwrap();
        assert_eq!(event.ev_type, "Key");
        assert_eq!(event.code, "KEY_ESC");
        assert_eq!(event.state, 1);
    }

    #[test]
    fn test_from_raw_unknown_type_fails() {
        let lookup = EventLookup::shared(Platform::Posix);
        assert!(InputEvent::from_raw(lookup, "dev", 0x64, 0x01, 0, 0.0).is_err());
    }
}
