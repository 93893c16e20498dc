//! ViewSet — a named collection of actions sharing one state value.
//!
//! `ViewSet<S>` holds the state and the registered actions. Each action can
//! be reached three ways: through [`call`](ViewSet::call), which picks the
//! mode from the presence of a request, or explicitly through
//! [`routed`](ViewSet::routed) and [`direct`](ViewSet::direct).
//!
//! ## Example
//!
//! ```ignore
//! use action_api::{ActionEntry, ActionResponse, Arguments, PassthroughFormatter, ViewSet};
//! use serde_json::json;
//!
//! let viewset = ViewSet::new(store)
//!     .action(
//!         ActionEntry::builder("recent")
//!             .detail(false)
//!             .result_formatter(Arc::new(PassthroughFormatter))
//!             .build()?,
//!         |ctx| Ok(ActionResponse::ok(json!({ "Items": ctx.state().recent() }))),
//!     )?;
//!
//! let result = viewset.direct("recent", Arguments::new())?;
//! ```

use std::collections::HashMap;

use crate::context::ActionContext;
use crate::dispatch::{Action, Outcome};
use crate::entry::ActionEntry;
use crate::error::{ConfigError, DirectFailure, FailureKind, HandlerError};
use crate::request::{Arguments, TransportRequest};
use crate::response::ActionResponse;

/// State plus the actions that run against it.
pub struct ViewSet<S> {
    state: S,
    actions: HashMap<String, Action<S>>,
    order: Vec<String>,
}

impl<S: Send + Sync + 'static> ViewSet<S> {
    /// Create an empty viewset over `state`.
    pub fn new(state: S) -> Self {
        Self {
            state,
            actions: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Register an action. Names must be unique within the viewset.
    pub fn action<F>(self, entry: ActionEntry, handler: F) -> Result<Self, ConfigError>
    where
        F: Fn(&ActionContext<'_, S>) -> Result<ActionResponse, HandlerError> + Send + Sync + 'static,
    {
        self.register(Action::new(entry, handler))
    }

    /// Register an already-built action.
    ///
    /// Fails when the name is taken, or when another action already answers
    /// one of its methods at the same route.
    pub fn register(mut self, action: Action<S>) -> Result<Self, ConfigError> {
        let name = action.name().to_string();
        if self.actions.contains_key(&name) {
            return Err(ConfigError::DuplicateAction(name));
        }
        self.check_route(action.entry())?;
        self.order.push(name.clone());
        self.actions.insert(name, action);
        Ok(self)
    }

    fn check_route(&self, entry: &ActionEntry) -> Result<(), ConfigError> {
        for existing in self.entries() {
            if existing.is_detail() != entry.is_detail() || existing.url_path() != entry.url_path() {
                continue;
            }
            if let Some(method) = entry.methods().iter().find(|m| existing.allows(m)) {
                return Err(ConfigError::DuplicateRoute {
                    action: entry.name().to_string(),
                    existing: existing.name().to_string(),
                    path: entry.url_path().to_string(),
                    method: method.clone(),
                });
            }
        }
        Ok(())
    }

    /// Look up a registered action by name.
    pub fn get(&self, name: &str) -> Option<&Action<S>> {
        self.actions.get(name)
    }

    /// Pick the mode from `request` and run the named action.
    ///
    /// An unknown name yields an outcome in the mode the caller asked for.
    pub fn call(
        &self,
        name: &str,
        request: Option<&dyn TransportRequest>,
        arguments: Arguments,
    ) -> Outcome {
        match self.actions.get(name) {
            Some(action) => action.call(&self.state, request, arguments),
            None if request.is_some() => Outcome::Routed(Err(unknown_action(name))),
            None => Outcome::Direct(Err(DirectFailure::new(
                FailureKind::Generic,
                format!("unknown action: {}", name),
            ))),
        }
    }

    /// Run the named action against a real request.
    pub fn routed(
        &self,
        name: &str,
        request: &dyn TransportRequest,
        arguments: Arguments,
    ) -> Result<ActionResponse, HandlerError> {
        let action = self.actions.get(name).ok_or_else(|| unknown_action(name))?;
        action.run_routed(&self.state, request, arguments)
    }

    /// Run the named action as a direct call.
    pub fn direct(&self, name: &str, arguments: Arguments) -> Result<Arguments, DirectFailure> {
        let action = self.actions.get(name).ok_or_else(|| {
            DirectFailure::new(FailureKind::Generic, format!("unknown action: {}", name))
        })?;
        action.run_direct(&self.state, arguments)
    }

    /// Registered action names in registration order.
    pub fn actions(&self) -> Vec<&str> {
        self.order.iter().map(|s| s.as_str()).collect()
    }

    /// Entries in registration order.
    pub fn entries(&self) -> impl Iterator<Item = &ActionEntry> {
        self.order
            .iter()
            .filter_map(|name| self.actions.get(name))
            .map(|action| action.entry())
    }

    /// Get a reference to the shared state.
    pub fn state(&self) -> &S {
        &self.state
    }
}

fn unknown_action(name: &str) -> HandlerError {
    HandlerError::NotFound(format!("unknown action: {}", name))
}
