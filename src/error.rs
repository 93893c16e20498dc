//! Error types for action definition and execution.
//!
//! Three layers:
//! - [`ConfigError`] — raised while an action is being defined, never at call time.
//! - [`HandlerError`] — what handler code returns; routed callers see it unchanged.
//! - [`DirectFailure`] — the single failure shape direct callers observe.

use std::error::Error;
use std::fmt;

use serde_json::Value;
use thiserror::Error;

/// Definition-time configuration error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The builder was never told whether the action targets one resource or a collection.
    #[error("action {0}: detail flag must be set explicitly")]
    MissingDetail(String),
    /// No result formatter was supplied.
    #[error("action {0}: result formatter is required")]
    MissingResultFormatter(String),
    /// An explicitly empty method list.
    #[error("action {0}: at least one HTTP method is required")]
    NoMethods(String),
    /// A method token that is not an HTTP verb.
    #[error("action {action}: unknown HTTP method {method:?}")]
    UnknownMethod { action: String, method: String },
    /// A URL segment the router cannot mount.
    #[error("action {action}: invalid url path {path:?}")]
    InvalidUrlPath { action: String, path: String },
    /// Two actions with the same name on one viewset.
    #[error("duplicate action: {0}")]
    DuplicateAction(String),
    /// Two actions on one viewset answering the same method at the same route.
    #[error("action {action}: route {path:?} already serves {method} for {existing}")]
    DuplicateRoute {
        action: String,
        existing: String,
        path: String,
        method: String,
    },
}

/// Structured validation failure carrying field/message details.
///
/// The detail is free-form JSON: usually an object mapping field names to
/// lists of messages, sometimes a list or a bare string.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    detail: Value,
}

impl ValidationError {
    pub fn new(detail: impl Into<Value>) -> Self {
        Self {
            detail: detail.into(),
        }
    }

    /// Single-field convenience: `{ field: [message] }`.
    pub fn field(field: &str, message: &str) -> Self {
        Self::new(serde_json::json!({ field: [message] }))
    }

    pub fn detail(&self) -> &Value {
        &self.detail
    }

    /// Human-readable rendering of the detail.
    ///
    /// A string detail renders as itself, anything else as compact JSON.
    pub fn render(&self) -> String {
        match &self.detail {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl Error for ValidationError {}

/// Error type returned by action handlers.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// Input failed validation.
    #[error("{0}")]
    Validation(ValidationError),
    /// Payload decode / deserialization failed.
    #[error("decode failed: {0}")]
    DecodeFailed(String),
    /// Business logic rejected the call.
    #[error("rejected: {0}")]
    Rejected(String),
    /// Resource or action not found.
    #[error("not found: {0}")]
    NotFound(String),
    /// Other error.
    #[error("{0}")]
    Other(Box<dyn Error + Send + Sync>),
}

impl HandlerError {
    /// Wrap an arbitrary message as a generic failure.
    pub fn other(message: impl Into<String>) -> Self {
        let message: String = message.into();
        HandlerError::Other(message.into())
    }

    /// Which side of the validation/generic split this error falls on.
    pub fn kind(&self) -> FailureKind {
        match self {
            HandlerError::Validation(_) => FailureKind::Validation,
            _ => FailureKind::Generic,
        }
    }

    /// Map this error to an HTTP-style status code.
    pub fn status_code(&self) -> u16 {
        match self {
            HandlerError::Validation(_) => 400,
            HandlerError::DecodeFailed(_) => 400,
            HandlerError::Rejected(_) => 422,
            HandlerError::NotFound(_) => 404,
            HandlerError::Other(_) => 500,
        }
    }
}

impl From<ValidationError> for HandlerError {
    fn from(err: ValidationError) -> Self {
        HandlerError::Validation(err)
    }
}

impl From<serde_json::Error> for HandlerError {
    fn from(err: serde_json::Error) -> Self {
        HandlerError::DecodeFailed(err.to_string())
    }
}

/// Internal classification of a direct-call failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Validation,
    Generic,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::Validation => f.write_str("validation"),
            FailureKind::Generic => f.write_str("generic"),
        }
    }
}

/// The uniform failure raised by a direct call.
///
/// Only the reason text is visible to callers; validation and generic
/// failures look the same from outside.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{reason}")]
pub struct DirectFailure {
    kind: FailureKind,
    reason: String,
}

impl DirectFailure {
    pub(crate) fn new(kind: FailureKind, reason: impl Into<String>) -> Self {
        Self {
            kind,
            reason: reason.into(),
        }
    }

    /// The failure reason.
    pub fn message(&self) -> &str {
        &self.reason
    }

    pub(crate) fn kind(&self) -> FailureKind {
        self.kind
    }
}

impl From<HandlerError> for DirectFailure {
    fn from(err: HandlerError) -> Self {
        let kind = err.kind();
        let reason = match err {
            HandlerError::Validation(v) => v.render(),
            other => other.to_string(),
        };
        DirectFailure::new(kind, reason)
    }
}
