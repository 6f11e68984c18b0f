//! Deduplicated, insertion-ordered collections of discovered devices.

use std::collections::HashSet;
use std::sync::Arc;

use crate::classify::DeviceKind;
use crate::device::Device;

/// Owns the per-kind device lists and the flattened view over them.
///
/// The flattened view is always the concatenation of the four lists in
/// fixed kind order (keyboards, mice, gamepads, other devices); consumers
/// index into it positionally, so that order is part of the contract.
#[derive(Default)]
pub struct DeviceRegistry {
    keyboards: Vec<Arc<Device>>,
    mice: Vec<Arc<Device>>,
    gamepads: Vec<Arc<Device>>,
    other_devices: Vec<Arc<Device>>,
    all_devices: Vec<Arc<Device>>,
    seen: HashSet<String>,
}

impl DeviceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a device under `kind` unless its canonical identity is
    /// already registered. Returns whether a new entry was created.
    ///
    /// `build` is only invoked for genuinely new identities.
    pub fn insert<F>(&mut self, kind: DeviceKind, identity: String, build: F) -> bool
    where
        F: FnOnce(&str) -> Arc<Device>,
    {
        if self.seen.contains(&identity) {
            return false;
        }
        let device = build(&identity);
        self.seen.insert(identity);
        self.list_mut(kind).push(device);
        self.recompute_all_devices();
        true
    }

    /// Whether a canonical identity is already registered.
    pub fn contains(&self, identity: &str) -> bool {
        self.seen.contains(identity)
    }

    fn list_mut(&mut self, kind: DeviceKind) -> &mut Vec<Arc<Device>> {
        match kind {
            DeviceKind::Keyboard => &mut self.keyboards,
            DeviceKind::Mouse => &mut self.mice,
            DeviceKind::GamePad => &mut self.gamepads,
            DeviceKind::Other => &mut self.other_devices,
        }
    }

    /// Rebuild the flattened view from the four kind lists.
    ///
    /// Always a full rebuild, never an incremental patch, so the view
    /// stays exact even after a partially failed discovery pass.
    fn recompute_all_devices(&mut self) {
        self.all_devices.clear();
        self.all_devices.extend(self.keyboards.iter().cloned());
        self.all_devices.extend(self.mice.iter().cloned());
        self.all_devices.extend(self.gamepads.iter().cloned());
        self.all_devices.extend(self.other_devices.iter().cloned());
    }

    /// Devices of one kind, in discovery order.
    pub fn list(&self, kind: DeviceKind) -> &[Arc<Device>] {
        match kind {
            DeviceKind::Keyboard => &self.keyboards,
            DeviceKind::Mouse => &self.mice,
            DeviceKind::GamePad => &self.gamepads,
            DeviceKind::Other => &self.other_devices,
        }
    }

    pub fn keyboards(&self) -> &[Arc<Device>] {
        &self.keyboards
    }

    pub fn mice(&self) -> &[Arc<Device>] {
        &self.mice
    }

    pub fn gamepads(&self) -> &[Arc<Device>] {
        &self.gamepads
    }

    pub fn other_devices(&self) -> &[Arc<Device>] {
        &self.other_devices
    }

    /// The flattened view, kind order then discovery order.
    pub fn all_devices(&self) -> &[Arc<Device>] {
        &self.all_devices
    }

    pub fn len(&self) -> usize {
        self.all_devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.all_devices.is_empty()
    }

    /// The device at `index` in the flattened view, or `None` when the
    /// index is out of range.
    pub fn get(&self, index: usize) -> Option<&Arc<Device>> {
        self.all_devices.get(index)
    }

    /// Iterate the flattened view. The iterator is a snapshot borrow;
    /// structural mutation while iterating is prevented by the borrow
    /// checker.
    pub fn iter(&self) -> std::slice::Iter<'_, Arc<Device>> {
        self.all_devices.iter()
    }

    /// Character-device display names of every registered device.
    pub(crate) fn char_names(&self) -> HashSet<String> {
        self.all_devices
            .iter()
            .filter_map(|device| device.char_name().map(str::to_string))
            .collect()
    }
}

impl<'a> IntoIterator for &'a DeviceRegistry {
    type Item = &'a Arc<Device>;
    type IntoIter = std::slice::Iter<'a, Arc<Device>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::EventLookup;
    use crate::platform::Platform;

    fn device(kind: DeviceKind, identity: &str, char_path: Option<&str>) -> Arc<Device> {
        Arc::new(Device::new(
            kind,
            identity.to_string(),
            char_path.map(str::to_string),
            None,
            EventLookup::shared(Platform::Posix),
            None,
        ))
    }

    #[test]
    fn test_insert_dedups_identity() {
        let mut registry = DeviceRegistry::new();
        let identity = "/dev/input/event0";
        assert!(registry.insert(DeviceKind::Keyboard, identity.into(), |id| {
            device(DeviceKind::Keyboard, id, None)
        }));
        assert!(!registry.insert(DeviceKind::Keyboard, identity.into(), |id| {
            device(DeviceKind::Keyboard, id, None)
        }));
        assert_eq!(registry.keyboards().len(), 1);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_build_not_called_for_duplicates() {
        let mut registry = DeviceRegistry::new();
        registry.insert(DeviceKind::Mouse, "m".into(), |id| {
            device(DeviceKind::Mouse, id, None)
        });
        registry.insert(DeviceKind::Mouse, "m".into(), |_| {
            panic!("constructor must not run for a known identity")
        });
    }

    #[test]
    fn test_all_devices_is_ordered_concatenation() {
        let mut registry = DeviceRegistry::new();
        // Insert in reverse kind order so the flattened order cannot be
        // an accident of insertion time.
        registry.insert(DeviceKind::Other, "o".into(), |id| {
            device(DeviceKind::Other, id, None)
        });
        registry.insert(DeviceKind::GamePad, "g".into(), |id| {
            device(DeviceKind::GamePad, id, None)
        });
        registry.insert(DeviceKind::Mouse, "m".into(), |id| {
            device(DeviceKind::Mouse, id, None)
        });
        registry.insert(DeviceKind::Keyboard, "k".into(), |id| {
            device(DeviceKind::Keyboard, id, None)
        });

        let identities: Vec<&str> = registry.iter().map(|d| d.identity()).collect();
        assert_eq!(identities, ["k", "m", "g", "o"]);
        assert_eq!(registry.len(), 4);
    }

    #[test]
    fn test_get_out_of_range() {
        let registry = DeviceRegistry::new();
        assert!(registry.get(0).is_none());
    }

    #[test]
    fn test_get_matches_iteration() {
        let mut registry = DeviceRegistry::new();
        registry.insert(DeviceKind::Keyboard, "k".into(), |id| {
            device(DeviceKind::Keyboard, id, None)
        });
        registry.insert(DeviceKind::Mouse, "m".into(), |id| {
            device(DeviceKind::Mouse, id, None)
        });

        for (index, iterated) in registry.iter().enumerate() {
            let indexed = registry.get(index).unwrap();
            assert!(Arc::ptr_eq(indexed, iterated));
        }
        assert!(registry.get(registry.len()).is_none());
    }

    #[test]
    fn test_char_names() {
        let mut registry = DeviceRegistry::new();
        registry.insert(DeviceKind::Keyboard, "k".into(), |id| {
            device(DeviceKind::Keyboard, id, Some("/dev/input/event1"))
        });
        registry.insert(DeviceKind::Mouse, "m".into(), |id| {
            device(DeviceKind::Mouse, id, None)
        });

        let names = registry.char_names();
        assert!(names.contains("event1"));
        assert_eq!(names.len(), 1);
    }
}
