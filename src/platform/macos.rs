//! macOS discovery: fixed API-level device set.
//!
//! macOS exposes no stable filesystem namespace for input devices, so
//! the strategy constructs the devices the system APIs always provide:
//! one keyboard, Apple's vendor mouse variant, and a generic mouse. Each
//! API binding owns its device-open lifecycle.

use crate::classify::DeviceKind;
use crate::error::Result;
use crate::platform::DiscoveryCtx;

pub(crate) const KEYBOARD: &str = "Mac Keyboard";
pub(crate) const MIGHTY_MOUSE: &str = "Apple Mighty Mouse";
pub(crate) const MOUSE: &str = "Mac Mouse";

pub(crate) fn discover(ctx: &mut DiscoveryCtx<'_>) -> Result<()> {
    ctx.add_api(DeviceKind::Keyboard, KEYBOARD, None);
    ctx.add_api(DeviceKind::Mouse, MIGHTY_MOUSE, None);
    ctx.add_api(DeviceKind::Mouse, MOUSE, None);
    Ok(())
}
