//! Stand-in request built for direct calls.

use super::{Arguments, TransportRequest};

/// Minimal request synthesized from plain arguments.
///
/// Reports method `post`, carries no headers.
#[derive(Debug, Clone, Default)]
pub struct DirectRequest {
    data: Arguments,
    query_params: Arguments,
}

impl DirectRequest {
    /// Build from an argument source and a parameter source.
    pub fn new(data: Arguments, query_params: Arguments) -> Self {
        Self { data, query_params }
    }
}

impl TransportRequest for DirectRequest {
    fn method(&self) -> &str {
        "post"
    }

    fn data(&self) -> &Arguments {
        &self.data
    }

    fn query_params(&self) -> &Arguments {
        &self.query_params
    }

    fn header(&self, _name: &str) -> Option<&str> {
        None
    }

    fn is_direct(&self) -> bool {
        true
    }
}
