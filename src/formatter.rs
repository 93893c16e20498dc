//! Result formatters — the components that shape a handler's outgoing data.
//!
//! An action entry holds a shared reference to one formatter. Handlers reach
//! it through [`ActionContext::formatter`](crate::ActionContext::formatter)
//! so routed and direct calls shape their output the same way.

use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::error::{HandlerError, ValidationError};

/// Shapes outgoing data and validates incoming data for an action.
pub trait ResultFormatter: Send + Sync {
    /// Name used in logs and route metadata.
    fn name(&self) -> &str;

    /// Shape an instance into the outgoing representation.
    fn format(&self, instance: &Value) -> Result<Value, HandlerError>;

    /// Validate incoming data. Accepts everything by default.
    fn validate(&self, data: &Value) -> Result<Value, ValidationError> {
        Ok(data.clone())
    }
}

/// Shared formatter reference stored on an action entry.
pub type FormatterRef = Arc<dyn ResultFormatter>;

impl fmt::Debug for dyn ResultFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ResultFormatter({})", self.name())
    }
}

/// Formatter that passes instances through unchanged.
#[derive(Debug, Clone, Default)]
pub struct PassthroughFormatter;

impl ResultFormatter for PassthroughFormatter {
    fn name(&self) -> &str {
        "passthrough"
    }

    fn format(&self, instance: &Value) -> Result<Value, HandlerError> {
        Ok(instance.clone())
    }
}

/// Formatter over a fixed field list.
///
/// `format` keeps only the declared fields (missing ones are skipped);
/// `validate` rejects objects lacking a required field with
/// `{ field: ["This field is required."] }`.
#[derive(Debug, Clone)]
pub struct FieldsFormatter {
    name: String,
    fields: Vec<String>,
    required: Vec<String>,
}

impl FieldsFormatter {
    pub fn new(name: impl Into<String>, fields: &[&str]) -> Self {
        Self {
            name: name.into(),
            fields: fields.iter().map(|f| f.to_string()).collect(),
            required: Vec::new(),
        }
    }

    /// Mark fields that `validate` insists on.
    pub fn required(mut self, fields: &[&str]) -> Self {
        self.required = fields.iter().map(|f| f.to_string()).collect();
        self
    }

    /// Wrap into a shared reference.
    pub fn shared(self) -> FormatterRef {
        Arc::new(self)
    }
}

impl ResultFormatter for FieldsFormatter {
    fn name(&self) -> &str {
        &self.name
    }

    fn format(&self, instance: &Value) -> Result<Value, HandlerError> {
        let object = instance.as_object().ok_or_else(|| {
            HandlerError::other(format!("{}: expected an object to format", self.name))
        })?;
        let shaped: Map<String, Value> = self
            .fields
            .iter()
            .filter_map(|f| object.get(f).map(|v| (f.clone(), v.clone())))
            .collect();
        Ok(Value::Object(shaped))
    }

    fn validate(&self, data: &Value) -> Result<Value, ValidationError> {
        let object = data.as_object().ok_or_else(|| {
            ValidationError::new(serde_json::json!({
                "non_field_errors": ["Invalid data. Expected an object."]
            }))
        })?;

        let mut errors = Map::new();
        for field in &self.required {
            if object.get(field).map_or(true, Value::is_null) {
                errors.insert(
                    field.clone(),
                    Value::Array(vec![Value::from("This field is required.")]),
                );
            }
        }
        if !errors.is_empty() {
            return Err(ValidationError::new(Value::Object(errors)));
        }

        self.format(data)
            .map_err(|e| ValidationError::new(e.to_string()))
    }
}
