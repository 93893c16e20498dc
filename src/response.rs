//! Framework response returned by action handlers.

use serde_json::Value;

/// A handler's response: status code plus a data payload.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionResponse {
    status: u16,
    data: Value,
}

impl ActionResponse {
    pub fn new(status: u16, data: Value) -> Self {
        Self { status, data }
    }

    /// 200 with the given payload.
    pub fn ok(data: Value) -> Self {
        Self::new(200, data)
    }

    /// 201 with the given payload.
    pub fn created(data: Value) -> Self {
        Self::new(201, data)
    }

    /// 204 with a null payload.
    pub fn no_content() -> Self {
        Self::new(204, Value::Null)
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn data(&self) -> &Value {
        &self.data
    }

    pub fn into_data(self) -> Value {
        self.data
    }
}
