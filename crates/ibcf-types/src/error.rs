//! Unified error interface for IBCF crates.
//!
//! Every error enum in the workspace implements [`ErrorCode`] so that
//! callers get a stable machine-readable code alongside the Display
//! message, and can branch on recoverability without string matching.

use thiserror::Error;

/// Unified error code interface.
///
/// # Code Format
///
/// - UPPER_SNAKE_CASE, prefixed with the owning layer
///   (e.g. `"TYPES_"`, `"RUNTIME_"`)
/// - Stable once defined (changing a code is a breaking change)
///
/// # Recoverability
///
/// An error is recoverable when retrying later, or a corrective action by
/// the caller, may succeed. A frame that is not yet active is recoverable
/// (it becomes active on its own); a malformed timestamp is not.
///
/// # Example
///
/// ```
/// use ibcf_types::{ErrorCode, TimestampError};
///
/// let err = TimestampError::Unparseable {
///     field: "issuedAt",
///     value: "not-a-date".into(),
/// };
/// assert_eq!(err.code(), "TYPES_BAD_TIMESTAMP");
/// assert!(!err.is_recoverable());
/// ```
pub trait ErrorCode {
    /// Returns a machine-readable error code.
    fn code(&self) -> &'static str;

    /// Returns whether retrying or waiting may resolve the error.
    fn is_recoverable(&self) -> bool;
}

/// Failure to interpret a frame's timestamp fields.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TimestampError {
    /// The field does not parse as an RFC 3339 timestamp.
    #[error("{field} is not a valid RFC 3339 timestamp: {value:?}")]
    Unparseable {
        /// Wire name of the offending field (`"issuedAt"` / `"expiresAt"`).
        field: &'static str,
        /// The raw value as found in the frame.
        value: String,
    },

    /// `issuedAt + durationSeconds` does not fit in the timestamp range.
    #[error("computed expiry for {field} is out of range")]
    OutOfRange {
        /// Wire name of the field the computation started from.
        field: &'static str,
    },
}

impl ErrorCode for TimestampError {
    fn code(&self) -> &'static str {
        match self {
            Self::Unparseable { .. } => "TYPES_BAD_TIMESTAMP",
            Self::OutOfRange { .. } => "TYPES_TIMESTAMP_RANGE",
        }
    }

    fn is_recoverable(&self) -> bool {
        // The frame itself must change; waiting does not help.
        false
    }
}
