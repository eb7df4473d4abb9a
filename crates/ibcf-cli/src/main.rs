//! IBCF CLI - validate, explain, and demo capability frames.
//!
//! # Exit Codes
//!
//! - `0` - frame is valid (or the command completed)
//! - `1` - frame is invalid
//! - `2` - parse/IO failure (unreadable file, unsupported extension,
//!   malformed document)
//!
//! # Environment Variables
//!
//! - `IBCF_LOG`: tracing filter for diagnostic output (default `warn`)

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use ibcf_runtime::{FnHandler, FrameRuntime, Handlers};
use ibcf_types::{Frame, ValidationResult};
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Seven days, the explain command's duration-risk threshold.
const LONG_GRANT_RISK_SECS: f64 = 604_800.0;

#[derive(Parser)]
#[command(name = "ibcf", version, about = "Intent-Bound Capability Frame tool")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Validate a frame file and list every violated rule.
    Validate {
        /// Path to a frame document (.json, .yaml, or .yml).
        frame_path: PathBuf,
    },

    /// Explain a frame in human-readable form, with risk notes.
    Explain {
        /// Path to a frame document (.json, .yaml, or .yml).
        frame_path: PathBuf,
    },

    /// Run a built-in end-to-end demo (no file needed).
    Demo,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            EnvFilter::try_from_env("IBCF_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Validate { frame_path } => run_validate(&frame_path),
        Command::Explain { frame_path } => run_explain(&frame_path),
        Command::Demo => run_demo().await,
    }
}

/// Loads a frame document by extension. JSON and YAML are interchangeable.
fn load_document(path: &Path) -> Result<Value> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read {}", path.display()))?;

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    tracing::debug!(path = %path.display(), bytes = raw.len(), ext = %ext, "loading frame document");

    match ext.as_str() {
        "json" => serde_json::from_str(&raw)
            .with_context(|| format!("{} is not valid JSON", path.display())),
        "yaml" | "yml" => serde_yaml::from_str(&raw)
            .with_context(|| format!("{} is not valid YAML", path.display())),
        "" => bail!("Unsupported file extension: (none)"),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

fn print_outcome(validation: &ValidationResult) {
    println!("{}", if validation.valid { "VALID" } else { "INVALID" });

    if !validation.errors.is_empty() {
        println!("Errors:");
        for error in &validation.errors {
            println!("- {error}");
        }
    }

    if !validation.warnings.is_empty() {
        println!("Warnings:");
        for warning in &validation.warnings {
            println!("- {warning}");
        }
    }
}

fn run_validate(path: &Path) -> ExitCode {
    let candidate = match load_document(path) {
        Ok(value) => value,
        Err(err) => {
            eprintln!("Parsing or validation failed: {err:#}");
            return ExitCode::from(2);
        }
    };

    let validation = ibcf_validate::validate(&candidate);
    print_outcome(&validation);
    if validation.valid {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    }
}

fn run_explain(path: &Path) -> ExitCode {
    match explain(path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Failed to explain frame: {err:#}");
            ExitCode::from(2)
        }
    }
}

fn explain(path: &Path) -> Result<()> {
    let candidate = load_document(path)?;

    let validation = ibcf_validate::validate(&candidate);
    if !validation.valid {
        bail!("invalid frame: {}", validation.errors.join("; "));
    }

    let frame: Frame = serde_json::from_value(candidate).context("frame does not match schema")?;

    println!("Issuer: {}", frame.issuer);
    println!("Subject: {}", frame.subject);
    println!("Intent: {}", frame.intent);
    let actions = if frame.allowed_actions.is_empty() {
        "(none)".to_string()
    } else {
        frame.allowed_actions.join(", ")
    };
    println!("Allowed actions: {actions}");
    println!("Issued at: {}", frame.issued_at);
    match frame.expires_at {
        Some(ref explicit) => println!("Expires at: {explicit}"),
        None => println!("Expires at: +{}s after issuance", frame.duration_seconds),
    }

    let mut risks = Vec::new();
    if frame.allowed_actions.len() > 5 {
        risks.push("Frame allows many actions; review necessity.");
    }
    if frame.duration_seconds > LONG_GRANT_RISK_SECS {
        risks.push("Duration exceeds 7 days; consider shortening.");
    }
    if frame.expires_at.is_none() {
        risks.push("No explicit expiresAt; relying solely on durationSeconds.");
    }

    if !risks.is_empty() {
        println!("Risks / Notes:");
        for risk in risks {
            println!("- {risk}");
        }
    }

    Ok(())
}

async fn run_demo() -> ExitCode {
    match demo().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Demo failed: {err:#}");
            ExitCode::from(1)
        }
    }
}

/// In-process walkthrough: build a frame, validate it, dispatch once.
async fn demo() -> Result<()> {
    let frame = Frame {
        version: "1.0".into(),
        issuer: "demo-issuer@example.com".into(),
        subject: "demo-subject".into(),
        intent: "demonstrate the IBCF runtime".into(),
        allowed_actions: vec!["echo.message".into()],
        duration_seconds: 600.0,
        issued_at: chrono::Utc::now().to_rfc3339(),
        expires_at: None,
        metadata: None,
        signature: None,
    };

    let validation = ibcf_validate::validate(&serde_json::to_value(&frame)?);
    println!(
        "Validation result: {}",
        serde_json::to_string_pretty(&validation)?
    );

    let handlers = Handlers::new().register(
        "echo.message",
        FnHandler::new(|payload| async move { Ok(json!({ "echoed": payload })) }),
    );

    let runtime = FrameRuntime::new(frame, handlers)?;
    let result = runtime
        .run("echo.message", json!({"text": "Hello IBCF"}))
        .await;
    println!("Runtime result: {}", serde_json::to_string_pretty(&result)?);

    Ok(())
}
