//! Runtime construction and dispatch.

use crate::{Handlers, RuntimeError};
use chrono::{DateTime, Utc};
use ibcf_types::{ExecutionResult, Frame};
use tracing::{debug, warn};

/// A live enforcement context for one validated frame.
///
/// Holds the frame, the two instants of its validity window (fixed at
/// construction, never re-derived), and the handler table. The instance
/// may be long-lived and invoked many times; every [`run`](Self::run)
/// re-checks the window, so a runtime constructed inside the window
/// starts rejecting dispatches the moment the window closes.
///
/// # Example
///
/// ```
/// use ibcf_runtime::{FnHandler, FrameRuntime, Handlers};
/// use ibcf_types::Frame;
/// use serde_json::json;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let frame = Frame {
///     version: "1.0".into(),
///     issuer: "ops@example.com".into(),
///     subject: "deploy-bot".into(),
///     intent: "roll out release 42".into(),
///     allowed_actions: vec!["log.message".into()],
///     duration_seconds: 600.0,
///     issued_at: chrono::Utc::now().to_rfc3339(),
///     expires_at: None,
///     metadata: None,
///     signature: None,
/// };
///
/// let handlers = Handlers::new().register(
///     "log.message",
///     FnHandler::new(|payload| async move { Ok(json!({ "ok": true, "payload": payload })) }),
/// );
///
/// let runtime = FrameRuntime::new(frame, handlers).expect("active frame");
/// let result = runtime.run("log.message", json!({"text": "hello"})).await;
/// assert!(result.success());
/// # }
/// ```
#[derive(Debug)]
pub struct FrameRuntime {
    frame: Frame,
    issued: DateTime<Utc>,
    expires: DateTime<Utc>,
    handlers: Handlers,
}

impl FrameRuntime {
    /// Validates `frame` and, if it is active right now, builds a runtime.
    ///
    /// # Errors
    ///
    /// See [`RuntimeError`]; construction stops at the first failure and
    /// no partially constructed runtime is ever returned.
    pub fn new(frame: Frame, handlers: Handlers) -> Result<Self, RuntimeError> {
        Self::new_at(frame, handlers, Utc::now())
    }

    /// [`new`](Self::new) with an injected clock instant.
    pub fn new_at(
        frame: Frame,
        handlers: Handlers,
        now: DateTime<Utc>,
    ) -> Result<Self, RuntimeError> {
        let candidate = serde_json::to_value(&frame)
            .map_err(|e| RuntimeError::InvalidFrame {
                errors: vec![e.to_string()],
            })?;
        let validation = ibcf_validate::validate_at(&candidate, now);
        if !validation.valid {
            return Err(RuntimeError::InvalidFrame {
                errors: validation.errors,
            });
        }

        // Re-derive the window here rather than trusting validation ran.
        let issued = frame.issued_instant()?;
        let expires = frame.effective_expiry()?;

        if now < issued {
            return Err(RuntimeError::NotYetActive {
                activates_at: issued,
            });
        }
        if now > expires {
            return Err(RuntimeError::Expired {
                expired_at: expires,
            });
        }

        debug!(
            issuer = %frame.issuer,
            subject = %frame.subject,
            actions = frame.allowed_actions.len(),
            %expires,
            "frame runtime constructed"
        );

        Ok(Self {
            frame,
            issued,
            expires,
            handlers,
        })
    }

    /// The frame this runtime enforces.
    #[must_use]
    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    /// Start of the validity window, fixed at construction.
    #[must_use]
    pub fn issued(&self) -> DateTime<Utc> {
        self.issued
    }

    /// End of the validity window, fixed at construction.
    #[must_use]
    pub fn expires(&self) -> DateTime<Utc> {
        self.expires
    }

    /// Dispatches `action` with `payload` under the frame's constraints.
    ///
    /// Never panics and never returns `Err` in any form: rejections and
    /// handler failures all come back inside the [`ExecutionResult`].
    pub async fn run(&self, action: &str, payload: serde_json::Value) -> ExecutionResult {
        self.run_at(action, payload, Utc::now()).await
    }

    /// [`run`](Self::run) with an injected clock instant.
    pub async fn run_at(
        &self,
        action: &str,
        payload: serde_json::Value,
        now: DateTime<Utc>,
    ) -> ExecutionResult {
        if !self.frame.allows(action) {
            warn!(action, subject = %self.frame.subject, "dispatch rejected: not on allow-list");
            return ExecutionResult::fail("Action not allowed");
        }

        let Some(handler) = self.handlers.get(action) else {
            warn!(action, "dispatch rejected: no handler registered");
            return ExecutionResult::fail("No handler registered");
        };

        // Window re-check against the instants fixed at construction.
        if now < self.issued {
            warn!(action, "dispatch rejected: frame not yet active");
            return ExecutionResult::fail("Frame is not yet active");
        }
        if now > self.expires {
            warn!(action, "dispatch rejected: frame expired");
            return ExecutionResult::fail("Frame is expired");
        }

        debug!(action, "dispatching");
        match handler.invoke(payload).await {
            Ok(data) => ExecutionResult::ok(data),
            Err(err) => {
                warn!(action, error = %err, "handler failed");
                ExecutionResult::fail(err.to_string())
            }
        }
    }
}
