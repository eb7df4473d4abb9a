//! Transient result value objects.
//!
//! [`ValidationResult`] is the validator's sole output channel: every
//! violated rule is accumulated as a human-readable string, never thrown.
//! [`ExecutionResult`] is the per-dispatch outcome returned by the runtime;
//! dispatch failures are data, not faults.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Accumulated outcome of validating one candidate frame.
///
/// `valid` is exactly `errors.is_empty()`; warnings never affect it.
/// Produced fresh by each validation call and never persisted.
///
/// # Example
///
/// ```
/// use ibcf_types::ValidationResult;
///
/// let mut result = ValidationResult::ok();
/// result.push_warning("allowedActions is empty; no actions can be executed");
/// assert!(result.valid);
///
/// result.push_error("Missing required field: issuer");
/// assert!(!result.valid);
/// assert_eq!(result.errors.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// `true` iff no errors were recorded.
    pub valid: bool,
    /// Every violated rule, in check order.
    pub errors: Vec<String>,
    /// Non-fatal findings, in check order.
    pub warnings: Vec<String>,
}

impl ValidationResult {
    /// An empty (passing) result to accumulate into.
    #[must_use]
    pub fn ok() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// A result carrying exactly one error.
    ///
    /// Used by the short-circuiting shape check ("candidate is not an
    /// object"), where no further checks are meaningful.
    #[must_use]
    pub fn single_error(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            errors: vec![message.into()],
            warnings: Vec::new(),
        }
    }

    /// Records a violated rule and flips `valid` to `false`.
    pub fn push_error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
        self.valid = false;
    }

    /// Records a non-fatal finding. Does not affect `valid`.
    pub fn push_warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::ok()
    }
}

/// Outcome of a single `run` call on the runtime.
///
/// Never partially populated: success carries `data` and no `error`,
/// failure carries `error` and no `data`. The constructors are the only
/// way to build one, so the pairing cannot be violated.
///
/// # Example
///
/// ```
/// use ibcf_types::ExecutionResult;
/// use serde_json::json;
///
/// let ok = ExecutionResult::ok(json!({"echoed": "hi"}));
/// assert!(ok.success());
/// assert_eq!(ok.data(), Some(&json!({"echoed": "hi"})));
/// assert_eq!(ok.error(), None);
///
/// let failed = ExecutionResult::fail("Action not allowed");
/// assert!(!failed.success());
/// assert_eq!(failed.error(), Some("Action not allowed"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionResult {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl ExecutionResult {
    /// A successful dispatch carrying the handler's result.
    #[must_use]
    pub fn ok(data: Value) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    /// A rejected or failed dispatch with one concise reason.
    #[must_use]
    pub fn fail(reason: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(reason.into()),
        }
    }

    /// Returns `true` on handler success.
    #[must_use]
    pub fn success(&self) -> bool {
        self.success
    }

    /// The handler's result; present exactly when `success()`.
    #[must_use]
    pub fn data(&self) -> Option<&Value> {
        self.data.as_ref()
    }

    /// The failure reason; present exactly when `!success()`.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}
