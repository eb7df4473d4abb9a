//! End-to-end dispatch tests for `FrameRuntime`.
//!
//! Construction-time failures are covered by unit tests in the crate;
//! these exercise the per-call contract: allow-list, handler lookup,
//! window re-check, and handler failure containment.

use chrono::{DateTime, TimeZone, Utc};
use ibcf_runtime::{ActionHandler, FnHandler, FrameRuntime, Handlers, RuntimeError};
use ibcf_types::Frame;
use serde_json::{json, Value};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap()
}

fn frame(actions: &[&str], duration_seconds: f64) -> Frame {
    Frame {
        version: "1.0".into(),
        issuer: "ops@example.com".into(),
        subject: "deploy-bot".into(),
        intent: "integration test".into(),
        allowed_actions: actions.iter().map(|s| (*s).to_string()).collect(),
        duration_seconds,
        issued_at: now().to_rfc3339(),
        expires_at: None,
        metadata: None,
        signature: None,
    }
}

fn ok_handlers() -> Handlers {
    Handlers::new().register(
        "log.message",
        FnHandler::new(|_| async { Ok(json!({ "ok": true })) }),
    )
}

#[tokio::test]
async fn allowed_action_with_handler_succeeds() {
    let runtime = FrameRuntime::new_at(frame(&["log.message"], 600.0), ok_handlers(), now())
        .expect("active frame");

    let result = runtime
        .run_at("log.message", json!({"text": "hello"}), now())
        .await;

    assert!(result.success());
    assert_eq!(result.data(), Some(&json!({ "ok": true })));
    assert_eq!(result.error(), None);
}

#[tokio::test]
async fn unknown_action_is_rejected() {
    let runtime = FrameRuntime::new_at(frame(&["log.message"], 600.0), ok_handlers(), now())
        .expect("active frame");

    let result = runtime.run_at("unknown.action", json!({}), now()).await;

    assert!(!result.success());
    assert_eq!(result.error(), Some("Action not allowed"));
}

#[tokio::test]
async fn allowed_action_without_handler_is_rejected() {
    let runtime = FrameRuntime::new_at(
        frame(&["log.message", "fs.read"], 600.0),
        ok_handlers(),
        now(),
    )
    .expect("active frame");

    let result = runtime.run_at("fs.read", json!({}), now()).await;

    assert!(!result.success());
    assert_eq!(result.error(), Some("No handler registered"));
}

#[tokio::test]
async fn allow_list_is_checked_before_handler_lookup() {
    // No handler either, but the allow-list rejection must win.
    let runtime = FrameRuntime::new_at(frame(&["log.message"], 600.0), ok_handlers(), now())
        .expect("active frame");

    let result = runtime.run_at("fs.read", json!({}), now()).await;
    assert_eq!(result.error(), Some("Action not allowed"));
}

#[tokio::test]
async fn dispatch_past_expiry_is_rejected_per_call() {
    // One-second grant: runtime constructed inside the window keeps working
    // until the window closes, then rejects without being reconstructed.
    let runtime = FrameRuntime::new_at(frame(&["log.message"], 1.0), ok_handlers(), now())
        .expect("active frame");

    let inside = now() + chrono::Duration::milliseconds(900);
    assert!(runtime.run_at("log.message", json!({}), inside).await.success());

    let past = now() + chrono::Duration::seconds(2);
    let result = runtime.run_at("log.message", json!({}), past).await;
    assert!(!result.success());
    assert_eq!(result.error(), Some("Frame is expired"));
}

#[tokio::test]
async fn dispatch_before_window_is_rejected_per_call() {
    let runtime = FrameRuntime::new_at(frame(&["log.message"], 600.0), ok_handlers(), now())
        .expect("active frame");

    let before = now() - chrono::Duration::seconds(1);
    let result = runtime.run_at("log.message", json!({}), before).await;
    assert_eq!(result.error(), Some("Frame is not yet active"));
}

#[tokio::test]
async fn handler_failure_is_contained() {
    let handlers = Handlers::new().register(
        "log.message",
        FnHandler::new(|_| async { Err(anyhow::anyhow!("boom")) }),
    );
    let runtime = FrameRuntime::new_at(frame(&["log.message"], 600.0), handlers, now())
        .expect("active frame");

    let result = runtime.run_at("log.message", json!({}), now()).await;

    assert!(!result.success());
    assert_eq!(result.error(), Some("boom"));
    assert!(result.data().is_none());
}

#[tokio::test]
async fn payload_reaches_the_handler_untouched() {
    struct Echo;

    #[async_trait::async_trait]
    impl ActionHandler for Echo {
        async fn invoke(&self, payload: Value) -> anyhow::Result<Value> {
            Ok(json!({ "echoed": payload }))
        }
    }

    let handlers = Handlers::new().register("echo.message", Echo);
    let runtime = FrameRuntime::new_at(frame(&["echo.message"], 600.0), handlers, now())
        .expect("active frame");

    let payload = json!({"text": "Hello IBCF", "n": [1, 2, 3]});
    let result = runtime.run_at("echo.message", payload.clone(), now()).await;

    assert_eq!(result.data(), Some(&json!({ "echoed": payload })));
}

#[tokio::test]
async fn concurrent_dispatches_share_one_runtime() {
    let handlers = Handlers::new().register(
        "log.message",
        FnHandler::new(|payload| async move {
            // Suspend to force interleaving.
            tokio::task::yield_now().await;
            Ok(payload)
        }),
    );
    let runtime = FrameRuntime::new_at(frame(&["log.message"], 600.0), handlers, now())
        .expect("active frame");

    let (a, b, c) = tokio::join!(
        runtime.run_at("log.message", json!(1), now()),
        runtime.run_at("log.message", json!(2), now()),
        runtime.run_at("unknown.action", json!(3), now()),
    );

    assert_eq!(a.data(), Some(&json!(1)));
    assert_eq!(b.data(), Some(&json!(2)));
    assert_eq!(c.error(), Some("Action not allowed"));
}

#[tokio::test]
async fn explicit_expiry_governs_the_recheck() {
    let mut f = frame(&["log.message"], 600.0);
    // Explicit expiry well before issued + duration.
    f.expires_at = Some((now() + chrono::Duration::seconds(10)).to_rfc3339());

    let runtime = FrameRuntime::new_at(f, ok_handlers(), now()).expect("active frame");

    let past_explicit = now() + chrono::Duration::seconds(11);
    let result = runtime.run_at("log.message", json!({}), past_explicit).await;
    assert_eq!(result.error(), Some("Frame is expired"));
}

#[tokio::test]
async fn unsupported_version_blocks_construction() {
    let mut f = frame(&["log.message"], 600.0);
    f.version = "0.1".into();

    let err = FrameRuntime::new_at(f, ok_handlers(), now()).expect_err("must not construct");
    match err {
        RuntimeError::InvalidFrame { errors } => {
            assert!(errors.iter().any(|e| e.contains("Unsupported version")));
        }
        other => panic!("expected InvalidFrame, got {other:?}"),
    }
}

#[tokio::test]
async fn wall_clock_entry_points_work() {
    // Frame issued now with a generous window: the non-injected paths
    // (`new` / `run`) must behave like their `_at` counterparts.
    let f = Frame {
        issued_at: Utc::now().to_rfc3339(),
        ..frame(&["log.message"], 600.0)
    };
    let runtime = FrameRuntime::new(f, ok_handlers()).expect("active frame");
    let result = runtime.run("log.message", json!({})).await;
    assert!(result.success());
}
