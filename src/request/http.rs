//! Real inbound request representation.

use std::collections::HashMap;

use serde_json::Value;

use super::{Arguments, TransportRequest};

/// An inbound HTTP request, reduced to what handlers need.
///
/// Built by the router adapter, or by hand in tests:
///
/// ```ignore
/// let request = HttpRequest::new("GET", "/orders/1/summary")
///     .with_header("X-User-Id", "u1")
///     .with_query_param("verbose", true);
/// ```
#[derive(Debug, Clone, Default)]
pub struct HttpRequest {
    method: String,
    path: String,
    headers: HashMap<String, String>,
    data: Arguments,
    query_params: Arguments,
}

impl HttpRequest {
    pub fn new(method: &str, path: impl Into<String>) -> Self {
        Self {
            method: method.to_ascii_lowercase(),
            path: path.into(),
            ..Self::default()
        }
    }

    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.insert(name.to_ascii_lowercase(), value.into());
        self
    }

    pub fn with_data(mut self, data: Arguments) -> Self {
        self.data = data;
        self
    }

    pub fn with_query_param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.query_params.insert(key.into(), value.into());
        self
    }

    pub fn with_query_params(mut self, params: Arguments) -> Self {
        self.query_params = params;
        self
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }
}

impl TransportRequest for HttpRequest {
    fn method(&self) -> &str {
        &self.method
    }

    fn data(&self) -> &Arguments {
        &self.data
    }

    fn query_params(&self) -> &Arguments {
        &self.query_params
    }

    fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(|v| v.as_str())
    }
}
