//! The handler capability table.
//!
//! Handlers are the externally supplied units of work: one unary
//! async function per action name. The runtime treats a handler as
//! opaque — payload and result pass through uninspected, and a handler's
//! failure is reported through its `Result`, never allowed to propagate
//! as a fault out of dispatch.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

/// An externally supplied unit of work bound to an action name.
///
/// # Contract
///
/// - May suspend; dispatch awaits it cooperatively.
/// - Reports failure via `Err` — the runtime stringifies it into the
///   [`ExecutionResult`](ibcf_types::ExecutionResult), it never escapes.
/// - Must be `Send + Sync`: one handler may serve concurrent dispatches.
///
/// # Example
///
/// ```
/// use async_trait::async_trait;
/// use ibcf_runtime::ActionHandler;
/// use serde_json::{json, Value};
///
/// struct Echo;
///
/// #[async_trait]
/// impl ActionHandler for Echo {
///     async fn invoke(&self, payload: Value) -> anyhow::Result<Value> {
///         Ok(json!({ "echoed": payload }))
///     }
/// }
/// ```
#[async_trait]
pub trait ActionHandler: Send + Sync {
    /// Performs the action with the given payload.
    async fn invoke(&self, payload: Value) -> anyhow::Result<Value>;
}

/// Adapter turning an async closure into an [`ActionHandler`].
///
/// # Example
///
/// ```
/// use ibcf_runtime::{FnHandler, Handlers};
/// use serde_json::json;
///
/// let handlers = Handlers::new()
///     .register("log.message", FnHandler::new(|payload| async move {
///         Ok(json!({ "logged": payload }))
///     }));
/// assert!(handlers.contains("log.message"));
/// ```
pub struct FnHandler<F>(F);

impl<F> FnHandler<F> {
    /// Wraps `f` as a handler.
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

#[async_trait]
impl<F, Fut> ActionHandler for FnHandler<F>
where
    F: Fn(Value) -> Fut + Send + Sync,
    Fut: Future<Output = anyhow::Result<Value>> + Send,
{
    async fn invoke(&self, payload: Value) -> anyhow::Result<Value> {
        (self.0)(payload).await
    }
}

/// Immutable mapping from action name to handler.
///
/// Built once with [`register`](Self::register) calls, then handed to the
/// runtime and never modified again. Cloning shares the underlying
/// handlers.
#[derive(Clone, Default)]
pub struct Handlers {
    map: HashMap<String, Arc<dyn ActionHandler>>,
}

impl Handlers {
    /// An empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `handler` to `action`, replacing any previous binding.
    #[must_use]
    pub fn register(
        mut self,
        action: impl Into<String>,
        handler: impl ActionHandler + 'static,
    ) -> Self {
        self.map.insert(action.into(), Arc::new(handler));
        self
    }

    /// Looks up the handler bound to `action`.
    #[must_use]
    pub fn get(&self, action: &str) -> Option<&Arc<dyn ActionHandler>> {
        self.map.get(action)
    }

    /// Returns `true` if a handler is bound to `action`.
    #[must_use]
    pub fn contains(&self, action: &str) -> bool {
        self.map.contains_key(action)
    }

    /// Number of bound actions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` if no handler is bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl fmt::Debug for Handlers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handlers")
            .field("actions", &self.map.keys().collect::<Vec<_>>())
            .finish()
    }
}
