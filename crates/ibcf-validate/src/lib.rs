//! Structural and temporal validation for IBCF frames.
//!
//! The validator is a pure function over an untyped candidate value
//! (`serde_json::Value`): no I/O, no side effects, and deterministic for a
//! given candidate and clock instant. All violated rules are accumulated
//! into a [`ValidationResult`](ibcf_types::ValidationResult) — the return
//! value is the sole error channel, nothing is ever thrown.
//!
//! # Check Order
//!
//! Only the very first check (candidate must be an object) short-circuits;
//! every remaining check runs independently so that the caller sees every
//! violated rule at once, not just the first.
//!
//! # Signatures
//!
//! A `signature` field is checked for shape only. **Cryptographic
//! verification is out of scope** — a frame that validates cleanly has
//! not been authenticated in any way, and the validator says so with a
//! warning whenever a signature is present.
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//!
//! let candidate = json!({
//!     "version": "1.0",
//!     "issuer": "ops@example.com",
//!     "subject": "deploy-bot",
//!     "intent": "roll out release 42",
//!     "allowedActions": ["log.message"],
//!     "durationSeconds": 600,
//!     "issuedAt": "2026-01-01T00:00:00Z"
//! });
//!
//! let result = ibcf_validate::validate(&candidate);
//! assert!(result.valid);
//! ```

mod validate;

pub use validate::{validate, validate_at};
