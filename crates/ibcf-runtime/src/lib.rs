//! Execution runtime for IBCF frames.
//!
//! A [`FrameRuntime`] closes over one validated frame, the two instants of
//! its validity window, and an immutable capability table mapping action
//! names to handlers. Every dispatch re-checks the allow-list and the
//! window before invoking a handler.
//!
//! # Hard Fail vs Soft Fail
//!
//! Construction is the hard boundary: an invalid frame, a malformed
//! timestamp, or a window that has not opened (or has already closed) all
//! abort [`FrameRuntime::new`] with a [`RuntimeError`] — no partially
//! constructed runtime ever escapes. Dispatch never faults: a disallowed
//! action, a missing handler, a window violation, or a failing handler
//! all come back as an [`ExecutionResult`](ibcf_types::ExecutionResult)
//! the caller branches on.
//!
//! # Concurrency
//!
//! [`FrameRuntime::run`] takes `&self` and the runtime holds no interior
//! mutability, so concurrent dispatches on one instance are safe; a call
//! suspends cooperatively while awaiting its handler and blocks nothing
//! else. There is no cancellation primitive — wrap the handler if you
//! need timeouts.

mod error;
mod handler;
mod runtime;

pub use error::RuntimeError;
pub use handler::{ActionHandler, FnHandler, Handlers};
pub use runtime::FrameRuntime;
