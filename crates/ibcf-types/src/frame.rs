//! The IBCF frame schema.
//!
//! A [`Frame`] is the central entity: a grant record stating that
//! `issuer` authorizes `subject` to invoke the `allowed_actions` for the
//! stated `intent`, within a validity window starting at `issued_at`.
//!
//! # Temporal Model
//!
//! ```text
//! issued_at ────────────────► effective_expiry
//!     │                            │
//!     │   frame is "active" here   │
//!     ▼                            ▼
//!   expires_at if present, else issued_at + duration_seconds
//! ```
//!
//! A frame is temporally active at time `T` iff
//! `issued_at ≤ T ≤ effective_expiry`.
//!
//! # Wire Format
//!
//! Frames are deserialized from JSON or YAML with camelCase field names
//! (`allowedActions`, `durationSeconds`, `issuedAt`, `expiresAt`). The
//! older snake_case field set (`allowed_actions`/`duration`/`issued_at`)
//! is a different schema revision and is deliberately not read here.

use crate::TimestampError;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Schema revisions this implementation accepts.
pub const SUPPORTED_VERSIONS: &[&str] = &["1.0"];

/// Durations above this (30 days, in seconds) are legal but draw a warning.
pub const LONG_DURATION_WARNING_SECS: f64 = 2_592_000.0;

/// Returns `true` if `version` is a schema revision this crate understands.
#[must_use]
pub fn is_supported_version(version: &str) -> bool {
    SUPPORTED_VERSIONS.contains(&version)
}

/// Parses an RFC 3339 timestamp field into a UTC instant.
///
/// `field` is the wire name, carried into the error for display.
pub fn parse_timestamp(field: &'static str, value: &str) -> Result<DateTime<Utc>, TimestampError> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| TimestampError::Unparseable {
            field,
            value: value.to_string(),
        })
}

/// A signed, time-bounded capability grant.
///
/// # Immutability
///
/// Frames are immutable value types. The validator and the runtime only
/// ever read them; there is no lifecycle beyond construction and drop.
///
/// # Example
///
/// ```
/// use ibcf_types::Frame;
///
/// let json = r#"{
///     "version": "1.0",
///     "issuer": "ops@example.com",
///     "subject": "deploy-bot",
///     "intent": "roll out release 42",
///     "allowedActions": ["log.message", "deploy.start"],
///     "durationSeconds": 600,
///     "issuedAt": "2026-01-01T00:00:00Z"
/// }"#;
///
/// let frame: Frame = serde_json::from_str(json).expect("deserialize");
/// assert_eq!(frame.subject, "deploy-bot");
/// assert!(frame.allows("deploy.start"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Frame {
    /// Schema revision (must be in [`SUPPORTED_VERSIONS`]).
    pub version: String,

    /// Identity granting the capability.
    pub issuer: String,

    /// Identity receiving the capability.
    pub subject: String,

    /// Human-readable purpose of the grant.
    pub intent: String,

    /// Allow-list of action names the subject may invoke.
    ///
    /// Stored as a sequence but semantically a set: order carries no
    /// meaning and duplicates are tolerated. An empty list is legal (the
    /// validator warns) and makes every dispatch fail the allow-list check.
    pub allowed_actions: Vec<String>,

    /// Validity window length in seconds, measured from `issued_at`.
    pub duration_seconds: f64,

    /// RFC 3339 timestamp marking when the grant begins.
    pub issued_at: String,

    /// Optional explicit expiry; when present it overrides the computed
    /// `issued_at + duration_seconds` and must be strictly later than
    /// `issued_at`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<String>,

    /// Free-form key/value map, opaque to validation and dispatch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Map<String, serde_json::Value>>,

    /// Optional signature string. Shape-checked only — never verified.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
}

impl Frame {
    /// Returns `true` if `action` is on the allow-list.
    #[must_use]
    pub fn allows(&self, action: &str) -> bool {
        self.allowed_actions.iter().any(|a| a == action)
    }

    /// Parses `issued_at` into a UTC instant.
    pub fn issued_instant(&self) -> Result<DateTime<Utc>, TimestampError> {
        parse_timestamp("issuedAt", &self.issued_at)
    }

    /// Computes the effective expiry instant.
    ///
    /// `expires_at` when present, otherwise `issued_at + duration_seconds`.
    pub fn effective_expiry(&self) -> Result<DateTime<Utc>, TimestampError> {
        if let Some(ref explicit) = self.expires_at {
            return parse_timestamp("expiresAt", explicit);
        }

        let issued = self.issued_instant()?;
        // Saturating cast: validator guarantees finite > 0, but a frame may
        // reach here unvalidated.
        let millis = (self.duration_seconds * 1000.0) as i64;
        issued
            .checked_add_signed(Duration::milliseconds(millis))
            .ok_or(TimestampError::OutOfRange { field: "issuedAt" })
    }

    /// Evaluates the temporal invariant `issued_at ≤ now ≤ effective_expiry`.
    pub fn is_active_at(&self, now: DateTime<Utc>) -> Result<bool, TimestampError> {
        let issued = self.issued_instant()?;
        let expiry = self.effective_expiry()?;
        Ok(issued <= now && now <= expiry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn frame() -> Frame {
        Frame {
            version: "1.0".into(),
            issuer: "issuer".into(),
            subject: "subject".into(),
            intent: "intent".into(),
            allowed_actions: vec!["log.message".into(), "echo.message".into()],
            duration_seconds: 600.0,
            issued_at: "2026-01-01T00:00:00Z".into(),
            expires_at: None,
            metadata: None,
            signature: None,
        }
    }

    #[test]
    fn allows_membership() {
        let f = frame();
        assert!(f.allows("log.message"));
        assert!(!f.allows("fs.delete"));
    }

    #[test]
    fn computed_expiry_from_duration() {
        let f = frame();
        let expiry = f.effective_expiry().expect("expiry");
        let expected = Utc.with_ymd_and_hms(2026, 1, 1, 0, 10, 0).unwrap();
        assert_eq!(expiry, expected);
    }

    #[test]
    fn explicit_expiry_overrides_duration() {
        let mut f = frame();
        f.expires_at = Some("2026-01-02T00:00:00Z".into());
        let expiry = f.effective_expiry().expect("expiry");
        let expected = Utc.with_ymd_and_hms(2026, 1, 2, 0, 0, 0).unwrap();
        assert_eq!(expiry, expected);
    }

    #[test]
    fn fractional_duration_is_respected() {
        let mut f = frame();
        f.duration_seconds = 0.5;
        let expiry = f.effective_expiry().expect("expiry");
        let issued = f.issued_instant().expect("issued");
        assert_eq!(expiry - issued, Duration::milliseconds(500));
    }

    #[test]
    fn active_window_is_inclusive() {
        let f = frame();
        let issued = f.issued_instant().expect("issued");
        let expiry = f.effective_expiry().expect("expiry");

        assert!(f.is_active_at(issued).expect("at start"));
        assert!(f.is_active_at(expiry).expect("at end"));
        assert!(!f
            .is_active_at(issued - Duration::seconds(1))
            .expect("before"));
        assert!(!f.is_active_at(expiry + Duration::seconds(1)).expect("after"));
    }

    #[test]
    fn bad_timestamp_is_reported_with_field_name() {
        let mut f = frame();
        f.issued_at = "not-a-date".into();
        let err = f.issued_instant().expect_err("should fail");
        assert_eq!(
            err,
            TimestampError::Unparseable {
                field: "issuedAt",
                value: "not-a-date".into(),
            }
        );
    }

    #[test]
    fn serde_uses_camel_case_wire_names() {
        let f = frame();
        let json = serde_json::to_value(&f).expect("serialize");
        assert!(json.get("allowedActions").is_some());
        assert!(json.get("durationSeconds").is_some());
        assert!(json.get("issuedAt").is_some());
        // Absent optionals are omitted entirely
        assert!(json.get("expiresAt").is_none());
        assert!(json.get("signature").is_none());
    }

    #[test]
    fn serde_roundtrip() {
        let mut f = frame();
        f.signature = Some("sig:abcd".into());
        let json = serde_json::to_string(&f).expect("serialize");
        let parsed: Frame = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed, f);
    }
}
