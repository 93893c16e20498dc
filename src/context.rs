//! Context passed to action handlers.
//!
//! Carries the request (real or synthesized), the call arguments, the
//! entry's result formatter, and a reference to the viewset state. Handler
//! code reads everything through the context and never needs to know which
//! calling convention produced it.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::HandlerError;
use crate::formatter::ResultFormatter;
use crate::request::{Arguments, TransportRequest};

/// The context passed to every action handler.
///
/// Generic over `S`, the state shared by the actions of one viewset.
///
/// ## Example
///
/// ```ignore
/// pub fn handle(ctx: &ActionContext<Store>) -> Result<ActionResponse, HandlerError> {
///     let id = ctx.kwarg_str("pk")?;
///     let order = ctx.state().find(id).ok_or_else(|| HandlerError::NotFound(id.into()))?;
///     Ok(ActionResponse::ok(ctx.format(&order)?))
/// }
/// ```
pub struct ActionContext<'a, S> {
    action: &'a str,
    request: &'a dyn TransportRequest,
    kwargs: Arguments,
    formatter: &'a dyn ResultFormatter,
    state: &'a S,
}

impl<'a, S> ActionContext<'a, S> {
    pub(crate) fn new(
        action: &'a str,
        request: &'a dyn TransportRequest,
        kwargs: Arguments,
        formatter: &'a dyn ResultFormatter,
        state: &'a S,
    ) -> Self {
        Self {
            action,
            request,
            kwargs,
            formatter,
            state,
        }
    }

    /// Name of the action being handled.
    pub fn action(&self) -> &str {
        self.action
    }

    /// The request being handled, real or synthesized.
    pub fn request(&self) -> &dyn TransportRequest {
        self.request
    }

    /// Call arguments: path parameters when routed, caller keywords when direct.
    pub fn kwargs(&self) -> &Arguments {
        &self.kwargs
    }

    /// Look up one call argument.
    pub fn kwarg(&self, key: &str) -> Option<&Value> {
        self.kwargs.get(key)
    }

    /// String argument, or `DecodeFailed` if missing or not a string.
    pub fn kwarg_str(&self, key: &str) -> Result<&str, HandlerError> {
        self.kwargs
            .get(key)
            .and_then(Value::as_str)
            .ok_or_else(|| HandlerError::DecodeFailed(format!("missing string argument: {}", key)))
    }

    /// The entry's result formatter.
    pub fn formatter(&self) -> &dyn ResultFormatter {
        self.formatter
    }

    /// Shape a value with the entry's formatter.
    pub fn format(&self, instance: &Value) -> Result<Value, HandlerError> {
        self.formatter.format(instance)
    }

    /// Validate the request data with the entry's formatter.
    pub fn validated_data(&self) -> Result<Value, HandlerError> {
        let data = Value::Object(self.request.data().clone());
        self.formatter.validate(&data).map_err(HandlerError::from)
    }

    /// Deserialize the request data into a typed struct.
    pub fn input<T: DeserializeOwned>(&self) -> Result<T, HandlerError> {
        let data = Value::Object(self.request.data().clone());
        serde_json::from_value(data).map_err(|e| HandlerError::DecodeFailed(e.to_string()))
    }

    /// Get a reference to the viewset state.
    pub fn state(&self) -> &S {
        self.state
    }
}
