//! Dispatch adapter — one handler, two calling conventions.
//!
//! An [`Action`] pairs an [`ActionEntry`] with a handler. Each call selects
//! its mode exactly once:
//!
//! - **Routed**: a real request is present. The handler runs against it and
//!   its result comes back untouched.
//! - **Direct**: no request. A [`DirectRequest`] is synthesized from the
//!   arguments, the handler runs against it, and the outcome is normalized:
//!   the payload keys are lowercased, and every error collapses into a
//!   [`DirectFailure`] carrying only a reason. A handler panic is caught
//!   and reported the same way.
//!
//! ## Example
//!
//! ```ignore
//! let action = Action::new(entry, |ctx: &ActionContext<()>| {
//!     Ok(ActionResponse::ok(json!({ "Name": "x", "Count": 3 })))
//! });
//!
//! let normalized = action.run_direct(&(), Arguments::new())?;
//! assert_eq!(Value::Object(normalized), json!({ "name": "x", "count": 3 }));
//! ```

use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use crate::context::ActionContext;
use crate::entry::ActionEntry;
use crate::error::{DirectFailure, HandlerError};
use crate::request::{Arguments, DirectRequest, TransportRequest};
use crate::response::ActionResponse;

/// Handler signature shared by both calling conventions.
pub type HandlerFn<S> =
    dyn Fn(&ActionContext<'_, S>) -> Result<ActionResponse, HandlerError> + Send + Sync;

/// Calling convention of one invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Routed,
    Direct,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Routed => f.write_str("routed"),
            Mode::Direct => f.write_str("direct"),
        }
    }
}

/// A single invocation, with its mode decided.
pub enum Invocation<'r> {
    Routed {
        request: &'r dyn TransportRequest,
        arguments: Arguments,
    },
    Direct {
        arguments: Arguments,
    },
}

impl<'r> Invocation<'r> {
    /// A present request means routed; absence means direct.
    pub fn select(request: Option<&'r dyn TransportRequest>, arguments: Arguments) -> Self {
        match request {
            Some(request) => Invocation::Routed { request, arguments },
            None => Invocation::Direct { arguments },
        }
    }

    pub fn mode(&self) -> Mode {
        match self {
            Invocation::Routed { .. } => Mode::Routed,
            Invocation::Direct { .. } => Mode::Direct,
        }
    }
}

/// Terminal result of an invocation, shaped by its mode.
#[derive(Debug)]
pub enum Outcome {
    /// The handler's own result.
    Routed(Result<ActionResponse, HandlerError>),
    /// Normalized mapping or uniform failure.
    Direct(Result<Arguments, DirectFailure>),
}

impl Outcome {
    pub fn mode(&self) -> Mode {
        match self {
            Outcome::Routed(_) => Mode::Routed,
            Outcome::Direct(_) => Mode::Direct,
        }
    }

    pub fn is_success(&self) -> bool {
        match self {
            Outcome::Routed(result) => result.is_ok(),
            Outcome::Direct(result) => result.is_ok(),
        }
    }

    pub fn into_routed(self) -> Option<Result<ActionResponse, HandlerError>> {
        match self {
            Outcome::Routed(result) => Some(result),
            Outcome::Direct(_) => None,
        }
    }

    pub fn into_direct(self) -> Option<Result<Arguments, DirectFailure>> {
        match self {
            Outcome::Direct(result) => Some(result),
            Outcome::Routed(_) => None,
        }
    }
}

/// A handler bound to its entry.
pub struct Action<S> {
    entry: Arc<ActionEntry>,
    handler: Box<HandlerFn<S>>,
}

impl<S> Action<S> {
    pub fn new<F>(entry: ActionEntry, handler: F) -> Self
    where
        F: Fn(&ActionContext<'_, S>) -> Result<ActionResponse, HandlerError> + Send + Sync + 'static,
    {
        Self {
            entry: Arc::new(entry),
            handler: Box::new(handler),
        }
    }

    pub fn entry(&self) -> &ActionEntry {
        &self.entry
    }

    /// Shared handle to the entry, for routers that outlive a borrow.
    pub fn entry_ref(&self) -> Arc<ActionEntry> {
        self.entry.clone()
    }

    pub fn name(&self) -> &str {
        self.entry.name()
    }

    /// Select the mode from the presence of `request`, then run.
    pub fn call(
        &self,
        state: &S,
        request: Option<&dyn TransportRequest>,
        arguments: Arguments,
    ) -> Outcome {
        let invocation = Invocation::select(request, arguments);
        debug!(action = self.name(), mode = %invocation.mode(), "invoking action");

        match invocation {
            Invocation::Routed { request, arguments } => {
                Outcome::Routed(self.run_routed(state, request, arguments))
            }
            Invocation::Direct { arguments } => Outcome::Direct(self.run_direct(state, arguments)),
        }
    }

    /// Run against a real request. The handler's result is returned as is.
    pub fn run_routed(
        &self,
        state: &S,
        request: &dyn TransportRequest,
        arguments: Arguments,
    ) -> Result<ActionResponse, HandlerError> {
        self.execute(state, request, arguments)
    }

    /// Run without a request, returning a lowercase-keyed mapping or a uniform failure.
    ///
    /// A panicking handler is caught and reported as a generic failure
    /// carrying the panic message.
    pub fn run_direct(&self, state: &S, arguments: Arguments) -> Result<Arguments, DirectFailure> {
        let request = DirectRequest::new(arguments.clone(), arguments.clone());

        panic::catch_unwind(AssertUnwindSafe(|| self.execute(state, &request, arguments)))
            .unwrap_or_else(|payload| Err(HandlerError::other(panic_message(payload))))
            .and_then(extract_payload)
            .map_err(|err| {
                let failure = DirectFailure::from(err);
                debug!(
                    action = self.name(),
                    kind = %failure.kind(),
                    reason = failure.message(),
                    "direct call failed"
                );
                failure
            })
    }

    fn execute(
        &self,
        state: &S,
        request: &dyn TransportRequest,
        arguments: Arguments,
    ) -> Result<ActionResponse, HandlerError> {
        let ctx = ActionContext::new(
            self.entry.name(),
            request,
            arguments,
            self.entry.result_formatter(),
            state,
        );
        (self.handler)(&ctx)
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "handler panicked".to_string()
    }
}

fn extract_payload(response: ActionResponse) -> Result<Arguments, HandlerError> {
    match response.into_data() {
        Value::Object(map) => Ok(normalize_keys(map)),
        other => Err(HandlerError::other(format!(
            "response data is not a mapping: {}",
            other
        ))),
    }
}

/// Lowercase every key of `map`.
///
/// When two keys collapse to the same lowercase key the one visited later
/// wins. `serde_json::Map` visits keys in sorted order, so e.g. `name`
/// beats `Name`.
pub fn normalize_keys(map: Arguments) -> Arguments {
    map.into_iter()
        .map(|(key, value)| (key.to_lowercase(), value))
        .collect()
}
