//! Windows discovery: query-API device set plus an XInput gamepad probe.
//!
//! The system keyboard and mouse are always present through the input
//! queue; gamepads are probed through the XInput query API, one slot at
//! a time. The probe is not mandatory: if it fails, discovery keeps the
//! keyboard and mouse.

use crate::classify::DeviceKind;
use crate::error::Result;
use crate::platform::DiscoveryCtx;

pub(crate) const KEYBOARD: &str = "Windows Keyboard";
pub(crate) const MOUSE: &str = "Windows Mouse";

pub(crate) fn discover(ctx: &mut DiscoveryCtx<'_>) -> Result<()> {
    ctx.add_api(DeviceKind::Keyboard, KEYBOARD, None);
    ctx.add_api(DeviceKind::Mouse, MOUSE, None);

    if let Err(err) = find_xinput(&mut |slot| {
        ctx.add_api(
            DeviceKind::GamePad,
            &format!("XInput Gamepad {slot}"),
            Some(vec![slot]),
        );
    }) {
        log::warn!("xinput probe failed, keeping keyboard and mouse: {err}");
    }

    Ok(())
}

/// Probe every XInput slot and feed the connected ones to the sink.
#[cfg(windows)]
fn find_xinput(sink: &mut dyn FnMut(u32)) -> Result<()> {
    use windows::Win32::Foundation::ERROR_SUCCESS;
    use windows::Win32::UI::Input::XboxController::{XINPUT_STATE, XInputGetState};

    // XInput supports at most four simultaneously connected controllers.
    for slot in 0..4 {
        let mut state = XINPUT_STATE::default();
        let status = unsafe { XInputGetState(slot, &mut state) };
        if status == ERROR_SUCCESS.0 {
            sink(slot);
        }
    }
    Ok(())
}

/// Off Windows the probe sees no controller API; zero gamepads is the
/// valid steady state.
#[cfg(not(windows))]
fn find_xinput(_sink: &mut dyn FnMut(u32)) -> Result<()> {
    Ok(())
}
