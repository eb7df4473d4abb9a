//! Runtime construction errors.
//!
//! These occur only at [`FrameRuntime::new`](crate::FrameRuntime::new)
//! time. Dispatch-time rejections are data, not errors — see
//! [`ExecutionResult`](ibcf_types::ExecutionResult).
//!
//! # Error Codes
//!
//! | Variant | Code | Recoverable |
//! |---------|------|-------------|
//! | [`RuntimeError::InvalidFrame`] | `RUNTIME_INVALID_FRAME` | No |
//! | [`RuntimeError::MalformedTimestamp`] | `RUNTIME_MALFORMED_TIMESTAMP` | No |
//! | [`RuntimeError::NotYetActive`] | `RUNTIME_NOT_YET_ACTIVE` | Yes |
//! | [`RuntimeError::Expired`] | `RUNTIME_EXPIRED` | No |
//!
//! `NotYetActive` is the one recoverable case: retrying after the window
//! opens will succeed with the same inputs.

use chrono::{DateTime, Utc};
use ibcf_types::{ErrorCode, TimestampError};
use thiserror::Error;

/// Failure to construct a [`FrameRuntime`](crate::FrameRuntime).
#[derive(Debug, Clone, Error)]
pub enum RuntimeError {
    /// The frame failed validation; carries every violated rule.
    #[error("invalid frame: {}", errors.join("; "))]
    InvalidFrame {
        /// Accumulated validation errors, in check order.
        errors: Vec<String>,
    },

    /// A timestamp field could not be interpreted.
    ///
    /// Defensive: validation already checks this, but the runtime does not
    /// trust that it was the one to call the validator.
    #[error(transparent)]
    MalformedTimestamp(#[from] TimestampError),

    /// The validity window has not opened yet.
    #[error("frame is not yet active (activates at {activates_at})")]
    NotYetActive {
        /// Start of the validity window.
        activates_at: DateTime<Utc>,
    },

    /// The validity window has already closed.
    #[error("frame is expired (expired at {expired_at})")]
    Expired {
        /// End of the validity window.
        expired_at: DateTime<Utc>,
    },
}

impl ErrorCode for RuntimeError {
    fn code(&self) -> &'static str {
        match self {
            Self::InvalidFrame { .. } => "RUNTIME_INVALID_FRAME",
            Self::MalformedTimestamp(_) => "RUNTIME_MALFORMED_TIMESTAMP",
            Self::NotYetActive { .. } => "RUNTIME_NOT_YET_ACTIVE",
            Self::Expired { .. } => "RUNTIME_EXPIRED",
        }
    }

    fn is_recoverable(&self) -> bool {
        // The window opens on its own; everything else needs a new frame.
        matches!(self, Self::NotYetActive { .. })
    }
}
