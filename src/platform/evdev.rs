//! Linux reference device reader built on evdev.
//!
//! Opens `/dev/input` event nodes and decodes their raw records into
//! named [`InputEvent`]s through the shared code tables. Requires access
//! to the device nodes; on most distributions that means membership in
//! the `input` group.

use std::time::UNIX_EPOCH;

use crate::device::{DeviceOpener, DeviceReader, EventLookup};
use crate::error::{Error, Result};
use crate::event::InputEvent;

/// Opens devices through their `/dev/input` event nodes.
pub struct EvdevOpener;

impl DeviceOpener for EvdevOpener {
    fn open(&self, identity: &str, lookup: EventLookup) -> Result<Box<dyn DeviceReader + Send>> {
        let device = evdev::Device::open(identity).map_err(|err| {
            Error::PermissionDenied(format!(
                "cannot open {identity}: {err}. Make sure you're in the 'input' group."
            ))
        })?;
        let label = device.name().unwrap_or(identity).to_string();
        Ok(Box::new(EvdevReader {
            device,
            label,
            lookup,
        }))
    }
}

struct EvdevReader {
    device: evdev::Device,
    label: String,
    lookup: EventLookup,
}

impl DeviceReader for EvdevReader {
    fn read(&mut self) -> Result<Vec<InputEvent>> {
        let fetched = self.device.fetch_events().map_err(|err| {
            Error::Platform(format!("read failed on {}: {err}", self.label))
        })?;

        let mut events = Vec::new();
        for raw in fetched {
            let timestamp = raw
                .timestamp()
                .duration_since(UNIX_EPOCH)
                .map(|elapsed| elapsed.as_secs_f64())
                .unwrap_or_default();
            events.push(InputEvent::from_raw(
                self.lookup,
                &self.label,
                raw.event_type().0,
                raw.code(),
                raw.value(),
                timestamp,
            )?);
        }
        Ok(events)
    }
}
