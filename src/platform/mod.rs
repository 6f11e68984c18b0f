//! Platform selection, the enumeration capability and discovery dispatch.

use std::fs;
use std::io::ErrorKind;
use std::sync::Arc;

use crate::classify::{DeviceKind, classify};
use crate::codes::CodeTables;
use crate::device::{Device, DeviceOpener, EventLookup};
use crate::error::{Error, Result};
use crate::registry::DeviceRegistry;

#[cfg(target_os = "linux")]
pub mod evdev;
pub mod macos;
pub mod posix;
pub mod windows;

/// The platform family a manager discovers devices for.
///
/// Selected once at manager construction and never re-evaluated; tests
/// substitute the tag directly through the manager builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    /// Path-based discovery over `/dev/input` namespaces.
    Posix,
    /// Fixed API-level device set.
    MacOs,
    /// Query-API discovery with code-table overrides.
    Windows,
}

impl Platform {
    /// The platform family of the running host.
    pub fn current() -> Self {
        if cfg!(target_os = "windows") {
            Platform::Windows
        } else if cfg!(target_os = "macos") {
            Platform::MacOs
        } else {
            Platform::Posix
        }
    }

    /// Whether code lookups must consult the Windows override table.
    pub fn is_windows(self) -> bool {
        self == Platform::Windows
    }
}

/// Filesystem enumeration capability consumed by discovery strategies.
///
/// Every method degrades instead of failing where the surrounding pass
/// tolerates it: a missing or unreadable namespace is zero results, an
/// unresolvable path canonicalizes to itself, an unreadable attribute is
/// absent.
pub trait Enumerate {
    /// List identifiers matching a namespace pattern (a directory plus a
    /// trailing name prefix ending in `*`). Not-found and permission
    /// failures yield zero results; other failures are enumeration
    /// errors for the calling pass to handle.
    fn list(&self, pattern: &str) -> Result<Vec<String>>;

    /// Resolve a raw identifier to its canonical real path.
    fn canonicalize(&self, raw: &str) -> String;

    /// Read a small text attribute file, trimmed.
    fn read_attribute(&self, path: &str) -> Option<String>;
}

/// [`Enumerate`] implementation over the real filesystem.
pub struct SysFs;

impl Enumerate for SysFs {
    fn list(&self, pattern: &str) -> Result<Vec<String>> {
        let (dir, name_pattern) = pattern.rsplit_once('/').unwrap_or((".", pattern));
        let prefix = name_pattern.trim_end_matches('*');
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(err)
                if matches!(
                    err.kind(),
                    ErrorKind::NotFound | ErrorKind::PermissionDenied
                ) =>
            {
                log::debug!("nothing to enumerate under {dir}: {err}");
                return Ok(Vec::new());
            }
            Err(err) => {
                return Err(Error::Enumeration(format!("cannot read {dir}: {err}")));
            }
        };

        let mut paths = Vec::new();
        for entry in entries.flatten() {
            let name = entry.file_name();
            let name = name.to_string_lossy();
            if name.starts_with(prefix) {
                paths.push(entry.path().to_string_lossy().into_owned());
            }
        }
        // read_dir order is filesystem-dependent; sort for a stable
        // discovery order.
        paths.sort();
        Ok(paths)
    }

    fn canonicalize(&self, raw: &str) -> String {
        fs::canonicalize(raw)
            .map(|path| path.to_string_lossy().into_owned())
            .unwrap_or_else(|_| raw.to_string())
    }

    fn read_attribute(&self, path: &str) -> Option<String> {
        fs::read_to_string(path).ok().map(|s| s.trim().to_string())
    }
}

/// Everything a discovery strategy needs: the capabilities to enumerate
/// and open devices, and the registry to insert into.
pub(crate) struct DiscoveryCtx<'a> {
    pub platform: Platform,
    pub codes: &'static CodeTables,
    pub fs: &'a dyn Enumerate,
    pub opener: &'a dyn DeviceOpener,
    pub registry: &'a mut DeviceRegistry,
}

impl DiscoveryCtx<'_> {
    /// Classify a raw identifier and insert the resulting device under
    /// its canonical identity. Unclassifiable identifiers are skipped
    /// with a warning and never reach any collection.
    pub(crate) fn add_path(&mut self, raw: &str, char_path: Option<&str>) -> bool {
        let Some(kind) = classify(raw) else {
            log::warn!("skipping unclassifiable device identifier: {raw}");
            return false;
        };
        let identity = self.fs.canonicalize(raw);
        self.insert(kind, identity, char_path, None)
    }

    /// Insert a device produced by direct API enumeration, with the
    /// identifier used verbatim as the canonical identity.
    pub(crate) fn add_api(
        &mut self,
        kind: DeviceKind,
        identity: &str,
        api_ids: Option<Vec<u32>>,
    ) -> bool {
        self.insert(kind, identity.to_string(), None, api_ids)
    }

    fn insert(
        &mut self,
        kind: DeviceKind,
        identity: String,
        char_path: Option<&str>,
        api_ids: Option<Vec<u32>>,
    ) -> bool {
        let opener = self.opener;
        let lookup = EventLookup::new(self.codes, self.platform);
        self.registry.insert(kind, identity, |identity| {
            let reader = match opener.open(identity, lookup) {
                Ok(reader) => Some(reader),
                Err(err) => {
                    log::warn!("cannot open {identity}: {err}");
                    None
                }
            };
            Arc::new(Device::new(
                kind,
                identity.to_string(),
                char_path.map(str::to_string),
                api_ids,
                lookup,
                reader,
            ))
        })
    }
}

/// Run the discovery strategy selected by the context's platform tag.
pub(crate) fn discover(ctx: &mut DiscoveryCtx<'_>) -> Result<()> {
    match ctx.platform {
        Platform::Posix => posix::discover(ctx),
        Platform::MacOs => macos::discover(ctx),
        Platform::Windows => windows::discover(ctx),
    }
}
