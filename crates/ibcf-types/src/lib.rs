//! Core types for IBCF (Intent-Bound Capability Frames).
//!
//! An IBCF frame is a signed, time-bounded grant: an issuer authorizes a
//! subject to invoke a restricted set of actions for a limited window.
//! This crate provides the frame schema and the transient value objects
//! shared by the validator and the runtime.
//!
//! # Crate Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │  ibcf-types     : Frame, results, ErrorCode  ◄── HERE │
//! │  ibcf-validate  : structural/temporal validation      │
//! │  ibcf-runtime   : handler table + enforced dispatch   │
//! └──────────────────────────────────────────────────────┘
//!                          ↓
//! ┌──────────────────────────────────────────────────────┐
//! │  ibcf-cli       : validate / explain / demo frontend  │
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! # Design Principles
//!
//! - **Frames are immutable values** — validation and runtime construction
//!   never mutate a frame; callers simply drop it when done.
//! - **Wall-clock instants, typed** — all temporal comparisons go through
//!   `chrono::DateTime<Utc>`, never ad hoc numeric subtraction.
//! - **Signatures are shape-checked only** — cryptographic verification is
//!   explicitly out of scope; a present signature proves nothing.
//!
//! # Example
//!
//! ```
//! use ibcf_types::Frame;
//!
//! let frame = Frame {
//!     version: "1.0".into(),
//!     issuer: "ops@example.com".into(),
//!     subject: "deploy-bot".into(),
//!     intent: "roll out release 42".into(),
//!     allowed_actions: vec!["log.message".into()],
//!     duration_seconds: 600.0,
//!     issued_at: "2026-01-01T00:00:00Z".into(),
//!     expires_at: None,
//!     metadata: None,
//!     signature: None,
//! };
//!
//! assert!(frame.allows("log.message"));
//! assert!(!frame.allows("fs.delete"));
//! ```

mod error;
mod frame;
mod result;

pub use error::{ErrorCode, TimestampError};
pub use frame::{
    is_supported_version, parse_timestamp, Frame, LONG_DURATION_WARNING_SECS, SUPPORTED_VERSIONS,
};
pub use result::{ExecutionResult, ValidationResult};
