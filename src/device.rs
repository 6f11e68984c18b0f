//! Device handles and the reader/opener capability seams.

use std::fmt;
use std::sync::Mutex;

use crate::classify::DeviceKind;
use crate::codes::CodeTables;
use crate::error::{Error, Result};
use crate::event::InputEvent;
use crate::platform::Platform;

/// Non-owning handle to the shared code-table lookups.
///
/// Devices and readers carry this instead of a reference to the manager
/// that discovered them, so there is no ownership cycle: the tables are
/// process-wide and outlive every device.
#[derive(Clone, Copy)]
pub struct EventLookup {
    codes: &'static CodeTables,
    platform: Platform,
}

impl EventLookup {
    pub(crate) fn new(codes: &'static CodeTables, platform: Platform) -> Self {
        Self { codes, platform }
    }

    /// Lookup handle over the process-wide tables for the given platform.
    pub fn shared(platform: Platform) -> Self {
        Self::new(CodeTables::shared(), platform)
    }

    /// Resolve a numeric event type to its name.
    pub fn event_type_name(&self, type_id: u16) -> Result<&'static str> {
        self.codes.event_type_name(type_id)
    }

    /// Resolve a numeric event code to its name, honoring platform
    /// overrides.
    pub fn event_code_name(&self, ev_type: &str, code: u16) -> Result<&'static str> {
        self.codes.event_code_name(ev_type, code, self.platform)
    }

    /// The platform this handle resolves codes for.
    pub fn platform(&self) -> Platform {
        self.platform
    }
}

/// Blocking event source for one opened device.
///
/// Implementations decode raw event records into [`InputEvent`] values;
/// a call blocks until at least one event is available.
pub trait DeviceReader: Send {
    /// Read the next batch of events from the device.
    fn read(&mut self) -> Result<Vec<InputEvent>>;
}

/// Capability to open a device handle from its canonical identity.
pub trait DeviceOpener {
    /// Open a reader for the device, resolving event names through
    /// `lookup`.
    fn open(&self, identity: &str, lookup: EventLookup) -> Result<Box<dyn DeviceReader + Send>>;
}

/// One discovered input device.
///
/// Created exactly once per distinct canonical identity during discovery
/// and owned by the registry for the rest of its life.
pub struct Device {
    kind: DeviceKind,
    identity: String,
    char_path: Option<String>,
    api_ids: Option<Vec<u32>>,
    lookup: EventLookup,
    reader: Mutex<Option<Box<dyn DeviceReader + Send>>>,
}

impl Device {
    pub(crate) fn new(
        kind: DeviceKind,
        identity: String,
        char_path: Option<String>,
        api_ids: Option<Vec<u32>>,
        lookup: EventLookup,
        reader: Option<Box<dyn DeviceReader + Send>>,
    ) -> Self {
        Self {
            kind,
            identity,
            char_path,
            api_ids,
            lookup,
            reader: Mutex::new(reader),
        }
    }

    /// The kind this device was classified as.
    pub fn kind(&self) -> DeviceKind {
        self.kind
    }

    /// The canonical, deduplication-stable identity.
    pub fn identity(&self) -> &str {
        &self.identity
    }

    /// The character-device path this device is reachable through, if it
    /// was discovered via a special-name alias.
    pub fn char_path(&self) -> Option<&str> {
        self.char_path.as_deref()
    }

    /// Display name of the character device (`event3` and the like).
    pub fn char_name(&self) -> Option<&str> {
        self.char_path
            .as_deref()
            .map(|path| path.rsplit_once('/').map_or(path, |(_, name)| name))
    }

    /// Raw numeric identifiers assigned by a platform API (e.g. XInput
    /// slot numbers).
    pub fn api_ids(&self) -> Option<&[u32]> {
        self.api_ids.as_deref()
    }

    /// The code-table lookup handle this device resolves names with.
    pub fn lookup(&self) -> EventLookup {
        self.lookup
    }

    /// Blocking read of the next batch of events.
    ///
    /// Dispatch onto a dedicated thread if you want to read several
    /// devices concurrently.
    pub fn read(&self) -> Result<Vec<InputEvent>> {
        let mut guard = self
            .reader
            .lock()
            .map_err(|_| Error::Platform("device reader lock poisoned".into()))?;
        match guard.as_mut() {
            Some(reader) => reader.read(),
            None => Err(Error::NotSupported(format!(
                "no reader available for {}",
                self.identity
            ))),
        }
    }
}

impl fmt::Debug for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Device")
            .field("kind", &self.kind)
            .field("identity", &self.identity)
            .field("char_path", &self.char_path)
            .field("api_ids", &self.api_ids)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_device(char_path: Option<&str>) -> Device {
        Device::new(
            DeviceKind::Keyboard,
            "/dev/input/event3".into(),
            char_path.map(str::to_string),
            None,
            EventLookup::shared(Platform::Posix),
            None,
        )
    }

    #[test]
    fn test_char_name_is_basename() {
        let device = test_device(Some("/dev/input/event3"));
        assert_eq!(device.char_name(), Some("event3"));
    }

    #[test]
    fn test_char_name_absent() {
        assert_eq!(test_device(None).char_name(), None);
    }

    #[test]
    fn test_read_without_reader_fails() {
        let err = test_device(None).read().unwrap_err();
        assert!(matches!(err, Error::NotSupported(_)));
    }
}
