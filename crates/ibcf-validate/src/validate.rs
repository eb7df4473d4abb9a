//! The validation pass.
//!
//! One function, nine independent checks. Errors accumulate; warnings
//! never affect validity. See the crate docs for the contract.

use chrono::{DateTime, Duration, Utc};
use ibcf_types::{
    is_supported_version, parse_timestamp, ValidationResult, LONG_DURATION_WARNING_SECS,
    SUPPORTED_VERSIONS,
};
use serde_json::{Map, Value};

/// Validates a candidate frame against the current wall clock.
#[must_use]
pub fn validate(candidate: &Value) -> ValidationResult {
    validate_at(candidate, Utc::now())
}

/// Validates a candidate frame at an explicit instant.
///
/// `now` only influences warnings (a frame already outside its validity
/// window is flagged); hard temporal admission happens in the runtime.
/// For a fixed `(candidate, now)` pair the result is always identical.
#[must_use]
pub fn validate_at(candidate: &Value, now: DateTime<Utc>) -> ValidationResult {
    let Some(obj) = candidate.as_object() else {
        // Nothing else is checkable on a non-object; stop here.
        return ValidationResult::single_error("Frame is not an object");
    };

    let mut result = ValidationResult::ok();

    check_version(obj, &mut result);
    check_identity(obj, &mut result);
    check_allowed_actions(obj, &mut result);
    let duration = check_duration(obj, &mut result);
    let issued = check_issued_at(obj, &mut result);
    let explicit_expiry = check_expires_at(obj, issued, &mut result);
    check_metadata(obj, &mut result);
    check_signature(obj, &mut result);
    check_temporal_window(issued, explicit_expiry, duration, now, &mut result);

    result
}

/// Looks up a field, treating an explicit `null` the same as absent.
fn field<'a>(obj: &'a Map<String, Value>, name: &str) -> Option<&'a Value> {
    obj.get(name).filter(|v| !v.is_null())
}

fn missing(result: &mut ValidationResult, name: &str) {
    result.push_error(format!("Missing required field: {name}"));
}

fn check_version(obj: &Map<String, Value>, result: &mut ValidationResult) {
    match field(obj, "version") {
        None => missing(result, "version"),
        Some(Value::String(v)) if is_supported_version(v) => {}
        Some(Value::String(v)) => result.push_error(format!(
            "Unsupported version: {v:?} (supported: {})",
            SUPPORTED_VERSIONS.join(", ")
        )),
        Some(_) => result.push_error("version must be a string"),
    }
}

fn check_identity(obj: &Map<String, Value>, result: &mut ValidationResult) {
    for name in ["issuer", "subject", "intent"] {
        match field(obj, name) {
            None => missing(result, name),
            Some(Value::String(s)) if !s.trim().is_empty() => {}
            Some(_) => result.push_error(format!("{name} must be a non-empty string")),
        }
    }
}

fn check_allowed_actions(obj: &Map<String, Value>, result: &mut ValidationResult) {
    let Some(value) = field(obj, "allowedActions") else {
        missing(result, "allowedActions");
        return;
    };
    let Some(actions) = value.as_array() else {
        result.push_error("allowedActions must be an array of strings");
        return;
    };

    for (i, action) in actions.iter().enumerate() {
        match action.as_str() {
            Some(s) if !s.trim().is_empty() => {}
            _ => result.push_error(format!("allowedActions[{i}] must be a non-empty string")),
        }
    }

    if actions.is_empty() {
        result.push_warning("allowedActions is empty; no actions can be executed");
    }
}

/// Returns the duration when it passes, for the temporal-window warning.
fn check_duration(obj: &Map<String, Value>, result: &mut ValidationResult) -> Option<f64> {
    let Some(value) = field(obj, "durationSeconds") else {
        missing(result, "durationSeconds");
        return None;
    };
    match value.as_f64() {
        Some(secs) if secs.is_finite() && secs > 0.0 => {
            if secs > LONG_DURATION_WARNING_SECS {
                result.push_warning("durationSeconds exceeds 30 days; consider a shorter grant");
            }
            Some(secs)
        }
        _ => {
            result.push_error("durationSeconds must be a finite number greater than zero");
            None
        }
    }
}

fn check_issued_at(obj: &Map<String, Value>, result: &mut ValidationResult) -> Option<DateTime<Utc>> {
    let Some(value) = field(obj, "issuedAt") else {
        missing(result, "issuedAt");
        return None;
    };
    match value.as_str().map(|s| parse_timestamp("issuedAt", s)) {
        Some(Ok(instant)) => Some(instant),
        _ => {
            result.push_error("issuedAt must be a valid RFC 3339 timestamp");
            None
        }
    }
}

/// The ordering check is skipped when `issuedAt` itself failed to parse.
fn check_expires_at(
    obj: &Map<String, Value>,
    issued: Option<DateTime<Utc>>,
    result: &mut ValidationResult,
) -> Option<DateTime<Utc>> {
    let value = field(obj, "expiresAt")?;
    let expires = match value.as_str().map(|s| parse_timestamp("expiresAt", s)) {
        Some(Ok(instant)) => instant,
        _ => {
            result.push_error("expiresAt must be a valid RFC 3339 timestamp");
            return None;
        }
    };
    if let Some(issued) = issued {
        if expires <= issued {
            result.push_error("expiresAt must be strictly after issuedAt");
        }
    }
    Some(expires)
}

fn check_metadata(obj: &Map<String, Value>, result: &mut ValidationResult) {
    if let Some(value) = field(obj, "metadata") {
        if !value.is_object() {
            result.push_error("metadata must be an object");
        }
    }
}

fn check_signature(obj: &Map<String, Value>, result: &mut ValidationResult) {
    match field(obj, "signature") {
        None => {}
        Some(Value::String(_)) => {
            result.push_warning("Signature is not cryptographically verified");
        }
        Some(_) => result.push_error("signature must be a string"),
    }
}

/// Flags a frame that is outside its validity window at `now`.
///
/// Warning-only: temporal admission is enforced by the runtime, this is an
/// early signal for callers inspecting a frame before use.
fn check_temporal_window(
    issued: Option<DateTime<Utc>>,
    explicit_expiry: Option<DateTime<Utc>>,
    duration: Option<f64>,
    now: DateTime<Utc>,
    result: &mut ValidationResult,
) {
    if let Some(issued) = issued {
        if now < issued {
            result.push_warning("Frame is not yet active");
            return;
        }
    }

    let expiry = explicit_expiry.or_else(|| {
        let issued = issued?;
        let secs = duration?;
        issued.checked_add_signed(Duration::milliseconds((secs * 1000.0) as i64))
    });
    if let Some(expiry) = expiry {
        if now > expiry {
            result.push_warning("Frame is already expired");
        }
    }
}
