//! POSIX discovery: globbing passes over the `/dev/input` namespaces.
//!
//! Three passes run in order: "by-path", "by-id" and the special-device
//! scan. Only the first pass is mandatory; a later pass that cannot
//! enumerate logs a warning and discovery keeps whatever was found so
//! far.

use std::collections::HashSet;

use crate::codes::CodeTables;
use crate::error::Result;
use crate::platform::{DiscoveryCtx, Enumerate};

pub(crate) fn discover(ctx: &mut DiscoveryCtx<'_>) -> Result<()> {
    let fs = ctx.fs;
    let codes = ctx.codes;

    find_by(fs, "path", &mut |raw| {
        ctx.add_path(raw, None);
    })?;

    if let Err(err) = find_by(fs, "id", &mut |raw| {
        ctx.add_path(raw, None);
    }) {
        log::warn!("by-id enumeration failed, keeping partial results: {err}");
    }

    let known = ctx.registry.char_names();
    if let Err(err) = find_special(fs, codes, &known, &mut |raw, char_path| {
        ctx.add_path(raw, Some(char_path));
    }) {
        log::warn!("special-device scan failed, keeping partial results: {err}");
    }

    Ok(())
}

/// Enumerate one `/dev/input/by-*` namespace and feed every identifier
/// to the sink.
fn find_by(fs: &dyn Enumerate, key: &str, sink: &mut dyn FnMut(&str)) -> Result<()> {
    for raw in fs.list(&format!("/dev/input/by-{key}/*"))? {
        sink(&raw);
    }
    Ok(())
}

/// Scan the sysfs event-node namespace for devices only reachable
/// through a known display name.
///
/// A node whose basename already appears among the known character-device
/// names is an alias of a device discovered earlier and is skipped. For
/// the rest, the display name is read from the node's attribute file and
/// matched against the specials table; matches are emitted as the
/// special's by-id path with the event node as character-path override.
fn find_special(
    fs: &dyn Enumerate,
    codes: &CodeTables,
    known_char_names: &HashSet<String>,
    sink: &mut dyn FnMut(&str, &str),
) -> Result<()> {
    for node in fs.list("/sys/class/input/event*")? {
        let char_name = node.rsplit_once('/').map_or(node.as_str(), |(_, name)| name);
        if known_char_names.contains(char_name) {
            continue;
        }
        let Some(display_name) = fs.read_attribute(&format!("{node}/device/name")) else {
            continue;
        };
        if let Some(special_path) = codes.special(display_name.trim()) {
            sink(special_path, &format!("/dev/input/{char_name}"));
        }
    }
    Ok(())
}
