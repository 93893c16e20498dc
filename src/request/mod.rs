//! Transport request capability.
//!
//! Handlers only see `&dyn TransportRequest`. Two types implement it:
//! [`HttpRequest`] for real inbound requests and [`DirectRequest`], the
//! stand-in synthesized for direct calls.

mod direct;
mod http;

pub use direct::DirectRequest;
pub use http::HttpRequest;

use serde_json::{Map, Value};

/// Argument mapping shared by requests, contexts and direct results.
pub type Arguments = Map<String, Value>;

/// What a handler may ask of the request it runs against.
pub trait TransportRequest: Send + Sync {
    /// Lowercase HTTP method.
    fn method(&self) -> &str;

    /// Parsed body / argument source.
    fn data(&self) -> &Arguments;

    /// Query / parameter source.
    fn query_params(&self) -> &Arguments;

    /// Header lookup, case-insensitive.
    fn header(&self, name: &str) -> Option<&str>;

    /// True for synthesized direct-call requests.
    fn is_direct(&self) -> bool {
        false
    }

    fn arg(&self, key: &str) -> Option<&Value> {
        self.data().get(key)
    }

    fn param(&self, key: &str) -> Option<&Value> {
        self.query_params().get(key)
    }
}
