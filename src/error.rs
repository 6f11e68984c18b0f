//! Error types for device discovery and event code lookups.

use crate::classify::DeviceKind;
use thiserror::Error;

/// Result type alias for hidscan operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during device discovery and event lookups.
#[derive(Debug, Error)]
pub enum Error {
    /// The numeric event type has no entry in the code tables.
    #[error("unknown event type: 0x{0:02x}")]
    UnknownEventType(u16),

    /// The numeric event code has no entry for the given event type.
    #[error("unknown event code 0x{code:02x} for event type {ev_type}")]
    UnknownEventCode {
        /// Name of the event type the code was looked up under.
        ev_type: String,
        /// The numeric code that failed to resolve.
        code: u16,
    },

    /// No device of the requested kind is attached.
    ///
    /// This is an expected runtime condition, not a programming error:
    /// callers are free to retry after the user plugs the device in.
    #[error("no {0} found")]
    Unplugged(DeviceKind),

    /// The mandatory discovery pass could not enumerate at all.
    #[error("device enumeration failed: {0}")]
    Enumeration(String),

    /// The operation requires elevated permissions.
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    /// The requested operation is not supported on this platform.
    #[error("not supported: {0}")]
    NotSupported(String),

    /// Platform-specific error.
    #[error("platform error: {0}")]
    Platform(String),
}
