//! Action entries — the static configuration attached to a handler.
//!
//! An entry is built once when the action is defined and never changes
//! afterward. The router reads it to mount a route; the dispatch adapter
//! reads it on every call to find the result formatter.
//!
//! ```ignore
//! use action_api::{ActionEntry, FieldsFormatter};
//!
//! let entry = ActionEntry::builder("set_password")
//!     .methods(&["POST"])
//!     .detail(true)
//!     .result_formatter(FieldsFormatter::new("password", &["status"]).shared())
//!     .build()?;
//!
//! assert_eq!(entry.methods(), &["post"]);
//! assert_eq!(entry.url_name(), "set-password");
//! ```

use serde_json::{Map, Value};

use crate::error::ConfigError;
use crate::formatter::{FormatterRef, ResultFormatter};

/// HTTP method tokens an entry may declare.
pub const KNOWN_METHODS: &[&str] = &[
    "get", "post", "put", "patch", "delete", "head", "options", "trace",
];

/// Immutable per-handler configuration.
#[derive(Debug, Clone)]
pub struct ActionEntry {
    name: String,
    methods: Vec<String>,
    detail: bool,
    url_path: Option<String>,
    url_name: Option<String>,
    extra_options: Map<String, Value>,
    result_formatter: FormatterRef,
}

impl ActionEntry {
    /// Start defining an action for the handler called `name`.
    pub fn builder(name: impl Into<String>) -> ActionBuilder {
        ActionBuilder::new(name)
    }

    /// Handler identifier.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Lowercase, deduplicated method tokens in declaration order.
    pub fn methods(&self) -> &[String] {
        &self.methods
    }

    /// Whether `method` is declared, ignoring case.
    pub fn allows(&self, method: &str) -> bool {
        self.methods.iter().any(|m| m.eq_ignore_ascii_case(method))
    }

    /// Whether the action targets a single resource rather than a collection.
    pub fn is_detail(&self) -> bool {
        self.detail
    }

    /// URL segment; defaults to the handler name.
    pub fn url_path(&self) -> &str {
        self.url_path.as_deref().unwrap_or(&self.name)
    }

    /// Reverse-lookup name; defaults to the handler name with `_` replaced by `-`.
    pub fn url_name(&self) -> String {
        match &self.url_name {
            Some(name) => name.clone(),
            None => self.name.replace('_', "-"),
        }
    }

    /// Explicit path override, if any.
    pub fn url_path_override(&self) -> Option<&str> {
        self.url_path.as_deref()
    }

    /// Explicit name override, if any.
    pub fn url_name_override(&self) -> Option<&str> {
        self.url_name.as_deref()
    }

    /// Options forwarded verbatim to the router.
    pub fn extra_options(&self) -> &Map<String, Value> {
        &self.extra_options
    }

    /// Look up one extra option.
    pub fn option(&self, key: &str) -> Option<&Value> {
        self.extra_options.get(key)
    }

    /// The formatter handlers shape their output with.
    pub fn result_formatter(&self) -> &dyn ResultFormatter {
        self.result_formatter.as_ref()
    }

    /// Shared handle to the formatter.
    pub fn formatter_ref(&self) -> FormatterRef {
        self.result_formatter.clone()
    }
}

/// Builder for [`ActionEntry`]. Validation happens in [`build`](Self::build).
#[derive(Debug)]
pub struct ActionBuilder {
    name: String,
    methods: Option<Vec<String>>,
    detail: Option<bool>,
    url_path: Option<String>,
    url_name: Option<String>,
    extra_options: Map<String, Value>,
    result_formatter: Option<FormatterRef>,
}

impl ActionBuilder {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            methods: None,
            detail: None,
            url_path: None,
            url_name: None,
            extra_options: Map::new(),
            result_formatter: None,
        }
    }

    /// HTTP methods this action responds to. Defaults to `["get"]`.
    pub fn methods(mut self, methods: &[&str]) -> Self {
        self.methods = Some(methods.iter().map(|m| m.to_string()).collect());
        self
    }

    /// Required: single resource (`true`) or collection (`false`).
    pub fn detail(mut self, detail: bool) -> Self {
        self.detail = Some(detail);
        self
    }

    /// Override the URL segment. Must be a single non-empty segment.
    pub fn url_path(mut self, path: impl Into<String>) -> Self {
        self.url_path = Some(path.into());
        self
    }

    /// Override the reverse-lookup name.
    pub fn url_name(mut self, name: impl Into<String>) -> Self {
        self.url_name = Some(name.into());
        self
    }

    /// Add an extra option forwarded to the router.
    pub fn option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra_options.insert(key.into(), value.into());
        self
    }

    /// Required: the formatter handlers use to shape their output.
    pub fn result_formatter(mut self, formatter: FormatterRef) -> Self {
        self.result_formatter = Some(formatter);
        self
    }

    /// Validate and freeze the configuration.
    pub fn build(self) -> Result<ActionEntry, ConfigError> {
        let detail = self
            .detail
            .ok_or_else(|| ConfigError::MissingDetail(self.name.clone()))?;
        let result_formatter = self
            .result_formatter
            .ok_or_else(|| ConfigError::MissingResultFormatter(self.name.clone()))?;
        let methods = normalize_methods(&self.name, self.methods)?;
        validate_url_path(&self.name, self.url_path.as_deref().unwrap_or(&self.name))?;

        Ok(ActionEntry {
            name: self.name,
            methods,
            detail,
            url_path: self.url_path,
            url_name: self.url_name,
            extra_options: self.extra_options,
            result_formatter,
        })
    }
}

/// A URL path must be one non-empty literal segment.
fn validate_url_path(action: &str, path: &str) -> Result<(), ConfigError> {
    let invalid = path.trim().is_empty()
        || path.contains('/')
        || path.starts_with(':')
        || path.starts_with('*')
        || path.contains('{')
        || path.contains('}');
    if invalid {
        return Err(ConfigError::InvalidUrlPath {
            action: action.to_string(),
            path: path.to_string(),
        });
    }
    Ok(())
}

fn normalize_methods(action: &str, methods: Option<Vec<String>>) -> Result<Vec<String>, ConfigError> {
    let Some(methods) = methods else {
        return Ok(vec!["get".to_string()]);
    };
    if methods.is_empty() {
        return Err(ConfigError::NoMethods(action.to_string()));
    }

    let mut normalized: Vec<String> = Vec::with_capacity(methods.len());
    for method in methods {
        let lower = method.trim().to_ascii_lowercase();
        if !KNOWN_METHODS.contains(&lower.as_str()) {
            return Err(ConfigError::UnknownMethod {
                action: action.to_string(),
                method,
            });
        }
        if !normalized.contains(&lower) {
            normalized.push(lower);
        }
    }
    Ok(normalized)
}
