//! Event code tables: stable symbolic names for raw event integers.
//!
//! The tables mirror the Linux input-event-codes constants and are used as
//! the cross-platform vocabulary: every platform's raw event stream is
//! translated into these names. Loaded once into a process-wide instance
//! and never mutated afterwards.

use std::collections::{BTreeMap, HashMap};
use std::sync::OnceLock;

use crate::error::{Error, Result};
use crate::platform::Platform;

/// Immutable lookup tables for event types, event codes, special devices
/// and gamepad axis aliases.
pub struct CodeTables {
    type_names: BTreeMap<u16, &'static str>,
    code_names: HashMap<&'static str, BTreeMap<u16, &'static str>>,
    win_overrides: HashMap<&'static str, BTreeMap<u16, &'static str>>,
    specials: HashMap<&'static str, &'static str>,
    xpad_axes: HashMap<&'static str, u16>,
}

impl CodeTables {
    /// Get the process-wide shared tables, building them on first use.
    pub fn shared() -> &'static CodeTables {
        static TABLES: OnceLock<CodeTables> = OnceLock::new();
        TABLES.get_or_init(CodeTables::build)
    }

    fn build() -> CodeTables {
        let mut code_names = HashMap::new();
        code_names.insert("Sync", table(SYNC_CODES));
        code_names.insert("Key", table(KEY_CODES));
        code_names.insert("Relative", table(RELATIVE_CODES));
        code_names.insert("Absolute", table(ABSOLUTE_CODES));
        code_names.insert("Misc", table(MISC_CODES));
        code_names.insert("Switch", table(SWITCH_CODES));
        code_names.insert("LED", table(LED_CODES));
        code_names.insert("Sound", table(SOUND_CODES));
        code_names.insert("Repeat", table(REPEAT_CODES));

        let mut win_overrides = HashMap::new();
        win_overrides.insert("Key", table(WIN_KEY_OVERRIDES));

        CodeTables {
            type_names: table(EVENT_TYPES),
            code_names,
            win_overrides,
            specials: SPECIAL_DEVICES.iter().copied().collect(),
            xpad_axes: XPAD_AXES.iter().copied().collect(),
        }
    }

    /// Resolve a numeric event type to its name.
    pub fn event_type_name(&self, type_id: u16) -> Result<&'static str> {
        self.type_names
            .get(&type_id)
            .copied()
            .ok_or(Error::UnknownEventType(type_id))
    }

    /// Resolve a numeric event code within an event type to its name.
    ///
    /// On the Windows family a platform override wins over the base table;
    /// everywhere else (and for pairs without an override) the base table
    /// is authoritative.
    pub fn event_code_name(
        &self,
        ev_type: &str,
        code: u16,
        platform: Platform,
    ) -> Result<&'static str> {
        if platform.is_windows() {
            let override_name = self
                .win_overrides
                .get(ev_type)
                .and_then(|t| t.get(&code))
                .copied();
            if let Some(name) = override_name {
                return Ok(name);
            }
        }
        self.code_names
            .get(ev_type)
            .and_then(|t| t.get(&code))
            .copied()
            .ok_or_else(|| Error::UnknownEventCode {
                ev_type: ev_type.to_string(),
                code,
            })
    }

    /// Look up the by-id path of a special device by its display name.
    pub fn special(&self, label: &str) -> Option<&'static str> {
        self.specials.get(label).copied()
    }

    /// Resolve an xpad axis alias (e.g. `right_trigger`) to its XInput
    /// axis number.
    pub fn xpad_axis(&self, name: &str) -> Option<u16> {
        self.xpad_axes.get(name).copied()
    }

    /// Iterate over the known event types in numeric order.
    pub fn event_types(&self) -> impl Iterator<Item = (u16, &'static str)> + '_ {
        self.type_names.iter().map(|(id, name)| (*id, *name))
    }
}

fn table(entries: &[(u16, &'static str)]) -> BTreeMap<u16, &'static str> {
    entries.iter().copied().collect()
}

/// Event type ids, numeric order.
const EVENT_TYPES: &[(u16, &'static str)] = &[
    (0x00, "Sync"),
    (0x01, "Key"),
    (0x02, "Relative"),
    (0x03, "Absolute"),
    (0x04, "Misc"),
    (0x05, "Switch"),
    (0x11, "LED"),
    (0x12, "Sound"),
    (0x14, "Repeat"),
];

const SYNC_CODES: &[(u16, &'static str)] = &[
    (0x00, "SYN_REPORT"),
    (0x01, "SYN_CONFIG"),
    (0x02, "SYN_MT_REPORT"),
    (0x03, "SYN_DROPPED"),
];

const KEY_CODES: &[(u16, &'static str)] = &[
    (1, "KEY_ESC"),
    (2, "KEY_1"),
    (3, "KEY_2"),
    (4, "KEY_3"),
    (5, "KEY_4"),
    (6, "KEY_5"),
    (7, "KEY_6"),
    (8, "KEY_7"),
    (9, "KEY_8"),
    (10, "KEY_9"),
    (11, "KEY_0"),
    (12, "KEY_MINUS"),
    (13, "KEY_EQUAL"),
    (14, "KEY_BACKSPACE"),
    (15, "KEY_TAB"),
    (16, "KEY_Q"),
    (17, "KEY_W"),
    (18, "KEY_E"),
    (19, "KEY_R"),
    (20, "KEY_T"),
    (21, "KEY_Y"),
    (22, "KEY_U"),
    (23, "KEY_I"),
    (24, "KEY_O"),
    (25, "KEY_P"),
    (26, "KEY_LEFTBRACE"),
    (27, "KEY_RIGHTBRACE"),
    (28, "KEY_ENTER"),
    (29, "KEY_LEFTCTRL"),
    (30, "KEY_A"),
    (31, "KEY_S"),
    (32, "KEY_D"),
    (33, "KEY_F"),
    (34, "KEY_G"),
    (35, "KEY_H"),
    (36, "KEY_J"),
    (37, "KEY_K"),
    (38, "KEY_L"),
    (39, "KEY_SEMICOLON"),
    (40, "KEY_APOSTROPHE"),
    (41, "KEY_GRAVE"),
    (42, "KEY_LEFTSHIFT"),
    (43, "KEY_BACKSLASH"),
    (44, "KEY_Z"),
    (45, "KEY_X"),
    (46, "KEY_C"),
    (47, "KEY_V"),
    (48, "KEY_B"),
    (49, "KEY_N"),
    (50, "KEY_M"),
    (51, "KEY_COMMA"),
    (52, "KEY_DOT"),
    (53, "KEY_SLASH"),
    (54, "KEY_RIGHTSHIFT"),
    (55, "KEY_KPASTERISK"),
    (56, "KEY_LEFTALT"),
    (57, "KEY_SPACE"),
    (58, "KEY_CAPSLOCK"),
    (59, "KEY_F1"),
    (60, "KEY_F2"),
    (61, "KEY_F3"),
    (62, "KEY_F4"),
    (63, "KEY_F5"),
    (64, "KEY_F6"),
    (65, "KEY_F7"),
    (66, "KEY_F8"),
    (67, "KEY_F9"),
    (68, "KEY_F10"),
    (69, "KEY_NUMLOCK"),
    (70, "KEY_SCROLLLOCK"),
    (71, "KEY_KP7"),
    (72, "KEY_KP8"),
    (73, "KEY_KP9"),
    (74, "KEY_KPMINUS"),
    (75, "KEY_KP4"),
    (76, "KEY_KP5"),
    (77, "KEY_KP6"),
    (78, "KEY_KPPLUS"),
    (79, "KEY_KP1"),
    (80, "KEY_KP2"),
    (81, "KEY_KP3"),
    (82, "KEY_KP0"),
    (83, "KEY_KPDOT"),
    (85, "KEY_ZENKAKUHANKAKU"),
    (86, "KEY_102ND"),
    (87, "KEY_F11"),
    (88, "KEY_F12"),
    (89, "KEY_RO"),
    (90, "KEY_KATAKANA"),
    (91, "KEY_HIRAGANA"),
    (92, "KEY_HENKAN"),
    (93, "KEY_KATAKANAHIRAGANA"),
    (94, "KEY_MUHENKAN"),
    (95, "KEY_KPJPCOMMA"),
    (96, "KEY_KPENTER"),
    (97, "KEY_RIGHTCTRL"),
    (98, "KEY_KPSLASH"),
    (99, "KEY_SYSRQ"),
    (100, "KEY_RIGHTALT"),
    (101, "KEY_LINEFEED"),
    (102, "KEY_HOME"),
    (103, "KEY_UP"),
    (104, "KEY_PAGEUP"),
    (105, "KEY_LEFT"),
    (106, "KEY_RIGHT"),
    (107, "KEY_END"),
    (108, "KEY_DOWN"),
    (109, "KEY_PAGEDOWN"),
    (110, "KEY_INSERT"),
    (111, "KEY_DELETE"),
    (112, "KEY_MACRO"),
    (113, "KEY_MUTE"),
    (114, "KEY_VOLUMEDOWN"),
    (115, "KEY_VOLUMEUP"),
    (116, "KEY_POWER"),
    (117, "KEY_KPEQUAL"),
    (118, "KEY_KPPLUSMINUS"),
    (119, "KEY_PAUSE"),
    (120, "KEY_SCALE"),
    (121, "KEY_KPCOMMA"),
    (122, "KEY_HANGEUL"),
    (123, "KEY_HANJA"),
    (124, "KEY_YEN"),
    (125, "KEY_LEFTMETA"),
    (126, "KEY_RIGHTMETA"),
    (127, "KEY_COMPOSE"),
    (128, "KEY_STOP"),
    (140, "KEY_CALC"),
    (142, "KEY_SLEEP"),
    (143, "KEY_WAKEUP"),
    (155, "KEY_MAIL"),
    (156, "KEY_BOOKMARKS"),
    (157, "KEY_COMPUTER"),
    (158, "KEY_BACK"),
    (159, "KEY_FORWARD"),
    (163, "KEY_NEXTSONG"),
    (164, "KEY_PLAYPAUSE"),
    (165, "KEY_PREVIOUSSONG"),
    (166, "KEY_STOPCD"),
    (172, "KEY_HOMEPAGE"),
    (173, "KEY_REFRESH"),
    (183, "KEY_F13"),
    (184, "KEY_F14"),
    (185, "KEY_F15"),
    (186, "KEY_F16"),
    (187, "KEY_F17"),
    (188, "KEY_F18"),
    (189, "KEY_F19"),
    (190, "KEY_F20"),
    (191, "KEY_F21"),
    (192, "KEY_F22"),
    (193, "KEY_F23"),
    (194, "KEY_F24"),
    (224, "KEY_BRIGHTNESSDOWN"),
    (225, "KEY_BRIGHTNESSUP"),
    // Mouse buttons
    (0x110, "BTN_LEFT"),
    (0x111, "BTN_RIGHT"),
    (0x112, "BTN_MIDDLE"),
    (0x113, "BTN_SIDE"),
    (0x114, "BTN_EXTRA"),
    (0x115, "BTN_FORWARD"),
    (0x116, "BTN_BACK"),
    (0x117, "BTN_TASK"),
    // Joystick buttons
    (0x120, "BTN_TRIGGER"),
    (0x121, "BTN_THUMB"),
    (0x122, "BTN_THUMB2"),
    (0x123, "BTN_TOP"),
    (0x124, "BTN_TOP2"),
    (0x125, "BTN_PINKIE"),
    (0x126, "BTN_BASE"),
    (0x127, "BTN_BASE2"),
    (0x128, "BTN_BASE3"),
    (0x129, "BTN_BASE4"),
    (0x12a, "BTN_BASE5"),
    (0x12b, "BTN_BASE6"),
    (0x12f, "BTN_DEAD"),
    // Gamepad buttons
    (0x130, "BTN_SOUTH"),
    (0x131, "BTN_EAST"),
    (0x132, "BTN_C"),
    (0x133, "BTN_NORTH"),
    (0x134, "BTN_WEST"),
    (0x135, "BTN_Z"),
    (0x136, "BTN_TL"),
    (0x137, "BTN_TR"),
    (0x138, "BTN_TL2"),
    (0x139, "BTN_TR2"),
    (0x13a, "BTN_SELECT"),
    (0x13b, "BTN_START"),
    (0x13c, "BTN_MODE"),
    (0x13d, "BTN_THUMBL"),
    (0x13e, "BTN_THUMBR"),
    // D-pad
    (0x220, "BTN_DPAD_UP"),
    (0x221, "BTN_DPAD_DOWN"),
    (0x222, "BTN_DPAD_LEFT"),
    (0x223, "BTN_DPAD_RIGHT"),
];

const RELATIVE_CODES: &[(u16, &'static str)] = &[
    (0x00, "REL_X"),
    (0x01, "REL_Y"),
    (0x02, "REL_Z"),
    (0x03, "REL_RX"),
    (0x04, "REL_RY"),
    (0x05, "REL_RZ"),
    (0x06, "REL_HWHEEL"),
    (0x07, "REL_DIAL"),
    (0x08, "REL_WHEEL"),
    (0x09, "REL_MISC"),
];

const ABSOLUTE_CODES: &[(u16, &'static str)] = &[
    (0x00, "ABS_X"),
    (0x01, "ABS_Y"),
    (0x02, "ABS_Z"),
    (0x03, "ABS_RX"),
    (0x04, "ABS_RY"),
    (0x05, "ABS_RZ"),
    (0x06, "ABS_THROTTLE"),
    (0x07, "ABS_RUDDER"),
    (0x08, "ABS_WHEEL"),
    (0x09, "ABS_GAS"),
    (0x0a, "ABS_BRAKE"),
    (0x10, "ABS_HAT0X"),
    (0x11, "ABS_HAT0Y"),
    (0x12, "ABS_HAT1X"),
    (0x13, "ABS_HAT1Y"),
    (0x14, "ABS_HAT2X"),
    (0x15, "ABS_HAT2Y"),
    (0x16, "ABS_HAT3X"),
    (0x17, "ABS_HAT3Y"),
    (0x18, "ABS_PRESSURE"),
    (0x19, "ABS_DISTANCE"),
    (0x1a, "ABS_TILT_X"),
    (0x1b, "ABS_TILT_Y"),
    (0x1c, "ABS_TOOL_WIDTH"),
    (0x20, "ABS_VOLUME"),
    (0x28, "ABS_MISC"),
];

const MISC_CODES: &[(u16, &'static str)] = &[
    (0x00, "MSC_SERIAL"),
    (0x01, "MSC_PULSELED"),
    (0x02, "MSC_GESTURE"),
    (0x03, "MSC_RAW"),
    (0x04, "MSC_SCAN"),
    (0x05, "MSC_TIMESTAMP"),
];

const SWITCH_CODES: &[(u16, &'static str)] = &[
    (0x00, "SW_LID"),
    (0x01, "SW_TABLET_MODE"),
    (0x02, "SW_HEADPHONE_INSERT"),
    (0x03, "SW_RFKILL_ALL"),
    (0x04, "SW_MICROPHONE_INSERT"),
    (0x05, "SW_DOCK"),
    (0x06, "SW_LINEOUT_INSERT"),
    (0x07, "SW_JACK_PHYSICAL_INSERT"),
    (0x08, "SW_VIDEOOUT_INSERT"),
    (0x09, "SW_CAMERA_LENS_COVER"),
    (0x0a, "SW_KEYPAD_SLIDE"),
    (0x0b, "SW_FRONT_PROXIMITY"),
    (0x0c, "SW_ROTATE_LOCK"),
    (0x0d, "SW_LINEIN_INSERT"),
    (0x0e, "SW_MUTE_DEVICE"),
];

const LED_CODES: &[(u16, &'static str)] = &[
    (0x00, "LED_NUML"),
    (0x01, "LED_CAPSL"),
    (0x02, "LED_SCROLLL"),
    (0x03, "LED_COMPOSE"),
    (0x04, "LED_KANA"),
    (0x05, "LED_SLEEP"),
    (0x06, "LED_SUSPEND"),
    (0x07, "LED_MUTE"),
    (0x08, "LED_MISC"),
    (0x09, "LED_MAIL"),
    (0x0a, "LED_CHARGING"),
];

const SOUND_CODES: &[(u16, &'static str)] = &[
    (0x00, "SND_CLICK"),
    (0x01, "SND_BELL"),
    (0x02, "SND_TONE"),
];

const REPEAT_CODES: &[(u16, &'static str)] = &[(0x00, "REP_DELAY"), (0x01, "REP_MAX")];

/// Single-byte PS/2 set-1 scan codes whose meaning changes once the
/// Windows event source has stripped the extended-key prefix.
const WIN_KEY_OVERRIDES: &[(u16, &'static str)] = &[
    (0x37, "KEY_SYSRQ"),
    (0x45, "KEY_PAUSE"),
    (0x54, "KEY_SYSRQ"),
];

/// Devices only discoverable through their display name, keyed by the
/// name reported in sysfs.
const SPECIAL_DEVICES: &[(&str, &str)] = &[
    (
        "Raspberry Pi Sense HAT Joystick",
        "/dev/input/by-id/gpio-Raspberry_Pi_Sense_HAT_Joystick-event-kbd",
    ),
    (
        "FT5406 memory based driver",
        "/dev/input/by-id/gpio-Raspberry_Pi_Touchscreen-event-mouse",
    ),
];

/// XInput axis numbers by common nickname.
const XPAD_AXES: &[(&str, u16)] = &[
    ("left_stick_x", 0),
    ("left_stick_y", 1),
    ("left_trigger", 2),
    ("right_stick_x", 3),
    ("right_stick_y", 4),
    ("right_trigger", 5),
];
