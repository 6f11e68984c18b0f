//! The device manager: one blocking discovery sweep at construction,
//! then a read-only view of everything that was found.

use std::sync::Arc;

use crate::classify::DeviceKind;
use crate::codes::CodeTables;
use crate::device::{Device, DeviceOpener, EventLookup};
#[cfg(not(target_os = "linux"))]
use crate::device::DeviceReader;
use crate::error::{Error, Result};
use crate::event::InputEvent;
use crate::platform::{self, DiscoveryCtx, Enumerate, Platform, SysFs};
use crate::registry::DeviceRegistry;

/// Discovers and owns every attached input device.
///
/// Construction runs the platform's discovery strategy to completion;
/// the resulting collection never changes afterwards. To pick up newly
/// plugged devices, construct a new manager.
pub struct DeviceManager {
    platform: Platform,
    codes: &'static CodeTables,
    registry: DeviceRegistry,
}

impl DeviceManager {
    /// Discover all attached devices with the host platform's strategy.
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    /// Start configuring a manager; used by tests and embedders to
    /// substitute the platform tag or the enumeration/open capabilities.
    pub fn builder() -> ManagerBuilder {
        ManagerBuilder::new()
    }

    /// The platform family this manager was constructed for.
    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// Resolve a numeric event type to its name.
    pub fn get_event_type(&self, type_id: u16) -> Result<&'static str> {
        self.codes.event_type_name(type_id)
    }

    /// Resolve a numeric event code to its name, honoring this
    /// platform's overrides.
    pub fn get_event_string(&self, ev_type: &str, code: u16) -> Result<&'static str> {
        self.codes.event_code_name(ev_type, code, self.platform)
    }

    /// A lookup handle bound to this manager's platform.
    pub fn lookup(&self) -> EventLookup {
        EventLookup::new(self.codes, self.platform)
    }

    /// Discovered keyboards, in discovery order.
    pub fn keyboards(&self) -> &[Arc<Device>] {
        self.registry.keyboards()
    }

    /// Discovered mice, in discovery order.
    pub fn mice(&self) -> &[Arc<Device>] {
        self.registry.mice()
    }

    /// Discovered gamepads, in discovery order.
    pub fn gamepads(&self) -> &[Arc<Device>] {
        self.registry.gamepads()
    }

    /// Discovered devices of no specific kind, in discovery order.
    pub fn other_devices(&self) -> &[Arc<Device>] {
        self.registry.other_devices()
    }

    /// All discovered devices: keyboards, then mice, then gamepads, then
    /// other devices.
    pub fn all_devices(&self) -> &[Arc<Device>] {
        self.registry.all_devices()
    }

    /// Number of discovered devices across all kinds.
    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    /// The device at `index` in the flattened view, or `None` when the
    /// index is out of range.
    pub fn get(&self, index: usize) -> Option<&Arc<Device>> {
        self.registry.get(index)
    }

    /// Iterate all devices in the flattened order.
    pub fn iter(&self) -> std::slice::Iter<'_, Arc<Device>> {
        self.registry.iter()
    }

    fn read_first(&self, kind: DeviceKind) -> Result<Vec<InputEvent>> {
        let device = self
            .registry
            .list(kind)
            .first()
            .ok_or(Error::Unplugged(kind))?;
        device.read()
    }

    /// Blocking read from the first keyboard.
    pub fn get_key(&self) -> Result<Vec<InputEvent>> {
        self.read_first(DeviceKind::Keyboard)
    }

    /// Blocking read from the first mouse.
    pub fn get_mouse(&self) -> Result<Vec<InputEvent>> {
        self.read_first(DeviceKind::Mouse)
    }

    /// Blocking read from the first gamepad.
    pub fn get_gamepad(&self) -> Result<Vec<InputEvent>> {
        self.read_first(DeviceKind::GamePad)
    }
}

impl<'a> IntoIterator for &'a DeviceManager {
    type Item = &'a Arc<Device>;
    type IntoIter = std::slice::Iter<'a, Arc<Device>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Configures and constructs a [`DeviceManager`].
pub struct ManagerBuilder {
    platform: Platform,
    enumerator: Box<dyn Enumerate>,
    opener: Box<dyn DeviceOpener>,
}

impl ManagerBuilder {
    fn new() -> Self {
        Self {
            platform: Platform::current(),
            enumerator: Box::new(SysFs),
            opener: default_opener(),
        }
    }

    /// Override the platform tag (and with it the discovery strategy).
    pub fn platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    /// Substitute the filesystem enumeration capability.
    pub fn enumerator(mut self, enumerator: impl Enumerate + 'static) -> Self {
        self.enumerator = Box::new(enumerator);
        self
    }

    /// Substitute the device-open capability.
    pub fn opener(mut self, opener: impl DeviceOpener + 'static) -> Self {
        self.opener = Box::new(opener);
        self
    }

    /// Run discovery and return the populated manager.
    pub fn build(self) -> Result<DeviceManager> {
        let codes = CodeTables::shared();
        let mut registry = DeviceRegistry::new();
        let mut ctx = DiscoveryCtx {
            platform: self.platform,
            codes,
            fs: self.enumerator.as_ref(),
            opener: self.opener.as_ref(),
            registry: &mut registry,
        };
        platform::discover(&mut ctx)?;
        log::debug!(
            "discovery complete: {} device(s) on {:?}",
            registry.len(),
            self.platform
        );
        Ok(DeviceManager {
            platform: self.platform,
            codes,
            registry,
        })
    }
}

#[cfg(target_os = "linux")]
fn default_opener() -> Box<dyn DeviceOpener> {
    Box::new(platform::evdev::EvdevOpener)
}

#[cfg(not(target_os = "linux"))]
fn default_opener() -> Box<dyn DeviceOpener> {
    Box::new(UnsupportedOpener)
}

/// Opener for platforms without a bundled reader implementation.
#[cfg(not(target_os = "linux"))]
struct UnsupportedOpener;

#[cfg(not(target_os = "linux"))]
impl DeviceOpener for UnsupportedOpener {
    fn open(&self, identity: &str, _lookup: EventLookup) -> Result<Box<dyn DeviceReader + Send>> {
        Err(Error::NotSupported(format!(
            "no bundled reader for {identity} on this platform"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::DeviceReader;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const KEYBOARD_PATH: &str = "/dev/input/by-path/my-lovely-keyboard-0-event-kbd";
    const MOUSE_PATH: &str = "/dev/input/by-path/my-lovely-mouse-0-event-mouse";
    const GAMEPAD_PATH: &str = "/dev/input/by-path/my-lovely-gamepad-0-event-joystick";
    const OTHER_PATH: &str = "/dev/input/by-path/the-machine-that-goes-ping-other";

    #[derive(Default)]
    struct FakeFs {
        listings: HashMap<String, Vec<String>>,
        attributes: HashMap<String, String>,
        canonical: HashMap<String, String>,
        failing: Vec<String>,
    }

    impl FakeFs {
        fn with_by_path(paths: &[&str]) -> Self {
            let mut fs = Self::default();
            fs.listings.insert(
                "/dev/input/by-path/*".into(),
                paths.iter().map(|p| p.to_string()).collect(),
            );
            fs
        }
    }

    impl Enumerate for FakeFs {
        fn list(&self, pattern: &str) -> Result<Vec<String>> {
            if self.failing.iter().any(|p| p == pattern) {
                return Err(Error::Enumeration(format!("cannot list {pattern}")));
            }
            Ok(self.listings.get(pattern).cloned().unwrap_or_default())
        }

        fn canonicalize(&self, raw: &str) -> String {
            self.canonical
                .get(raw)
                .cloned()
                .unwrap_or_else(|| raw.to_string())
        }

        fn read_attribute(&self, path: &str) -> Option<String> {
            self.attributes.get(path).cloned()
        }
    }

    #[derive(Clone, Default)]
    struct CountingOpener {
        opens: Arc<AtomicUsize>,
        reads: Arc<AtomicUsize>,
    }

    impl DeviceOpener for CountingOpener {
        fn open(
            &self,
            _identity: &str,
            _lookup: EventLookup,
        ) -> Result<Box<dyn DeviceReader + Send>> {
            self.opens.fetch_add(1, Ordering::SeqCst);
            Ok(Box::new(CountingReader {
                reads: self.reads.clone(),
            }))
        }
    }

    struct CountingReader {
        reads: Arc<AtomicUsize>,
    }

    impl DeviceReader for CountingReader {
        fn read(&mut self) -> Result<Vec<InputEvent>> {
            self.reads.fetch_add(1, Ordering::SeqCst);
            Ok(vec![InputEvent::new(
                "Some Device",
                "Key",
                "KEY_ENTER",
                0,
                1530900876.367757,
            )])
        }
    }

    fn posix_manager(fs: FakeFs) -> DeviceManager {
        DeviceManager::builder()
            .platform(Platform::Posix)
            .enumerator(fs)
            .opener(CountingOpener::default())
            .build()
            .unwrap()
    }

    #[test]
    fn test_discovers_one_of_each_kind() {
        let manager = posix_manager(FakeFs::with_by_path(&[
            KEYBOARD_PATH,
            MOUSE_PATH,
            GAMEPAD_PATH,
            OTHER_PATH,
        ]));

        assert_eq!(manager.keyboards().len(), 1);
        assert_eq!(manager.mice().len(), 1);
        assert_eq!(manager.gamepads().len(), 1);
        assert_eq!(manager.other_devices().len(), 1);
        assert_eq!(manager.len(), 4);

        let identities: Vec<&str> = manager.iter().map(|d| d.identity()).collect();
        assert_eq!(
            identities,
            [KEYBOARD_PATH, MOUSE_PATH, GAMEPAD_PATH, OTHER_PATH]
        );
    }

    #[test]
    fn test_unclassifiable_identifier_is_skipped() {
        let manager = posix_manager(FakeFs::with_by_path(&[KEYBOARD_PATH, "Bob"]));
        assert_eq!(manager.len(), 1);
        assert_eq!(manager.keyboards().len(), 1);
    }

    #[test]
    fn test_same_real_path_added_once() {
        let by_id_path = "/dev/input/by-id/usb-my-lovely-keyboard-0-event-kbd";
        let mut fs = FakeFs::with_by_path(&[KEYBOARD_PATH]);
        fs.listings
            .insert("/dev/input/by-id/*".into(), vec![by_id_path.to_string()]);
        fs.canonical
            .insert(KEYBOARD_PATH.into(), "/dev/input/event2".into());
        fs.canonical
            .insert(by_id_path.into(), "/dev/input/event2".into());

        let manager = posix_manager(fs);
        assert_eq!(manager.keyboards().len(), 1);
        assert_eq!(manager.len(), 1);
        assert_eq!(manager.get(0).unwrap().identity(), "/dev/input/event2");
    }

    #[test]
    fn test_get_matches_iteration_and_rejects_out_of_range() {
        let manager = posix_manager(FakeFs::with_by_path(&[KEYBOARD_PATH, MOUSE_PATH]));

        for (index, iterated) in manager.iter().enumerate() {
            assert!(Arc::ptr_eq(manager.get(index).unwrap(), iterated));
        }
        assert!(manager.get(manager.len()).is_none());
    }

    #[test]
    fn test_mandatory_pass_failure_is_fatal() {
        let mut fs = FakeFs::default();
        fs.failing.push("/dev/input/by-path/*".into());

        let result = DeviceManager::builder()
            .platform(Platform::Posix)
            .enumerator(fs)
            .opener(CountingOpener::default())
            .build();
        assert!(matches!(result, Err(Error::Enumeration(_))));
    }

    #[test]
    fn test_secondary_pass_failure_keeps_partial_results() {
        let mut fs = FakeFs::with_by_path(&[KEYBOARD_PATH]);
        fs.failing.push("/dev/input/by-id/*".into());

        let manager = posix_manager(fs);
        assert_eq!(manager.keyboards().len(), 1);
    }

    #[test]
    fn test_zero_devices_is_valid() {
        let manager = posix_manager(FakeFs::default());
        assert!(manager.is_empty());
        assert_eq!(manager.len(), 0);
    }

    #[test]
    fn test_special_pass_inserts_with_char_path() {
        let special_path = "/dev/input/by-id/gpio-Raspberry_Pi_Sense_HAT_Joystick-event-kbd";
        let mut fs = FakeFs::default();
        fs.listings.insert(
            "/sys/class/input/event*".into(),
            vec!["/sys/class/input/event5".into()],
        );
        fs.attributes.insert(
            "/sys/class/input/event5/device/name".into(),
            "Raspberry Pi Sense HAT Joystick".into(),
        );

        let opener = CountingOpener::default();
        let manager = DeviceManager::builder()
            .platform(Platform::Posix)
            .enumerator(fs)
            .opener(opener.clone())
            .build()
            .unwrap();

        assert_eq!(manager.keyboards().len(), 1);
        let device = &manager.keyboards()[0];
        assert_eq!(device.identity(), special_path);
        assert_eq!(device.char_name(), Some("event5"));
        assert_eq!(opener.opens.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_mac_strategy_builds_fixed_set() {
        let manager = DeviceManager::builder()
            .platform(Platform::MacOs)
            .enumerator(FakeFs::default())
            .opener(CountingOpener::default())
            .build()
            .unwrap();

        assert_eq!(manager.keyboards().len(), 1);
        assert_eq!(manager.mice().len(), 2);
        assert_eq!(manager.gamepads().len(), 0);
        assert_eq!(manager.len(), 3);
    }

    #[test]
    fn test_windows_strategy_builds_keyboard_and_mouse() {
        let manager = DeviceManager::builder()
            .platform(Platform::Windows)
            .enumerator(FakeFs::default())
            .opener(CountingOpener::default())
            .build()
            .unwrap();

        assert_eq!(manager.keyboards().len(), 1);
        assert_eq!(manager.mice().len(), 1);
    }

    #[test]
    fn test_event_lookups() {
        let manager = posix_manager(FakeFs::default());
        assert_eq!(manager.get_event_type(0x00).unwrap(), "Sync");
        assert_eq!(manager.get_event_type(0x01).unwrap(), "Key");
        assert_eq!(manager.get_event_string("Key", 0x133).unwrap(), "BTN_NORTH");
        assert!(matches!(
            manager.get_event_type(0x64),
            Err(Error::UnknownEventType(0x64))
        ));
        assert!(matches!(
            manager.get_event_string("Key", 0x999),
            Err(Error::UnknownEventCode { .. })
        ));
    }

    #[test]
    fn test_windows_manager_applies_overrides() {
        let manager = DeviceManager::builder()
            .platform(Platform::Windows)
            .enumerator(FakeFs::default())
            .opener(CountingOpener::default())
            .build()
            .unwrap();

        assert_eq!(manager.get_event_string("Key", 0x45).unwrap(), "KEY_PAUSE");
        assert_eq!(manager.get_event_string("Key", 0x133).unwrap(), "BTN_NORTH");
    }

    #[test]
    fn test_get_key_reads_first_keyboard_once() {
        let opener = CountingOpener::default();
        let manager = DeviceManager::builder()
            .platform(Platform::Posix)
            .enumerator(FakeFs::with_by_path(&[KEYBOARD_PATH]))
            .opener(opener.clone())
            .build()
            .unwrap();

        let events = manager.get_key().unwrap();
        assert_eq!(opener.reads.load(Ordering::SeqCst), 1);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].code, "KEY_ENTER");
    }

    #[test]
    fn test_get_key_unplugged() {
        let manager = posix_manager(FakeFs::default());
        assert!(matches!(
            manager.get_key(),
            Err(Error::Unplugged(DeviceKind::Keyboard))
        ));
    }

    #[test]
    fn test_get_mouse_unplugged() {
        let manager = posix_manager(FakeFs::default());
        assert!(matches!(
            manager.get_mouse(),
            Err(Error::Unplugged(DeviceKind::Mouse))
        ));
    }

    #[test]
    fn test_get_gamepad_unplugged() {
        let manager = posix_manager(FakeFs::default());
        assert!(matches!(
            manager.get_gamepad(),
            Err(Error::Unplugged(DeviceKind::GamePad))
        ));
    }
}
