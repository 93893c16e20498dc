//! HTTP router adapter — mounts a viewset's actions on an axum `Router`.
//!
//! Requires the `http` feature.
//!
//! ## Routes
//!
//! - `/{url_path}` — collection actions (`detail = false`).
//! - `/:pk/{url_path}` — detail actions; `pk` becomes the `pk` argument.
//! - `GET /` — metadata for every mounted action.
//!
//! Each route answers only the methods its entry declares. Handlers run in
//! routed mode; their responses and errors are rendered here.
//!
//! ## Example
//!
//! ```ignore
//! let viewset = Arc::new(ViewSet::new(store).action(entry, handler)?);
//!
//! // Compose with other axum routes
//! let app = Router::new().nest("/orders", action_api::http::router(viewset.clone()));
//!
//! // Or serve directly
//! action_api::http::serve(viewset, "0.0.0.0:3000").await?;
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Path, Query};
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, MethodFilter, MethodRouter};
use axum::{Json, Router};
use serde::Serialize;
use serde_json::{json, Map, Value};
use tracing::debug;

use crate::entry::ActionEntry;
use crate::error::HandlerError;
use crate::request::{Arguments, HttpRequest};
use crate::response::ActionResponse;
use crate::viewset::ViewSet;

/// Route metadata for one mounted action.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteInfo {
    pub name: String,
    pub url_name: String,
    pub path: String,
    pub methods: Vec<String>,
    pub detail: bool,
    pub formatter: String,
    pub options: Map<String, Value>,
}

impl RouteInfo {
    pub fn from_entry(entry: &ActionEntry) -> Self {
        Self {
            name: entry.name().to_string(),
            url_name: entry.url_name(),
            path: route_path(entry),
            methods: entry.methods().to_vec(),
            detail: entry.is_detail(),
            formatter: entry.result_formatter().name().to_string(),
            options: entry.extra_options().clone(),
        }
    }
}

/// Path an entry is mounted at.
pub fn route_path(entry: &ActionEntry) -> String {
    if entry.is_detail() {
        format!("/:pk/{}", entry.url_path())
    } else {
        format!("/{}", entry.url_path())
    }
}

/// Build an axum `Router` exposing every action of `viewset`.
pub fn router<S: Send + Sync + 'static>(viewset: Arc<ViewSet<S>>) -> Router {
    let routes: Vec<RouteInfo> = viewset.entries().map(RouteInfo::from_entry).collect();
    let mut app = Router::new();

    for entry in viewset.entries() {
        let path = route_path(entry);
        let mut method_router: MethodRouter = MethodRouter::new();

        for method in entry.methods() {
            let Some(filter) = method_filter(method) else {
                continue;
            };
            let viewset = viewset.clone();
            let name = entry.name().to_string();
            method_router = method_router.on(
                filter,
                move |method: Method,
                      uri: Uri,
                      path_params: Option<Path<HashMap<String, String>>>,
                      Query(query): Query<HashMap<String, String>>,
                      headers: HeaderMap,
                      body: Bytes| async move {
                    let params = path_params.map(|Path(p)| p).unwrap_or_default();
                    let result = build_request(&method, &uri, query, &headers, &body)
                        .and_then(|request| viewset.routed(&name, &request, path_arguments(params)));
                    render(result)
                },
            );
        }

        debug!(action = entry.name(), path = %path, methods = ?entry.methods(), "mounted action");
        app = app.route(&path, method_router);
    }

    app.route("/", get(move || async move { Json(routes) }))
}

/// Serve the viewset over HTTP at the given address (e.g. `"0.0.0.0:3000"`).
pub async fn serve<S: Send + Sync + 'static>(
    viewset: Arc<ViewSet<S>>,
    addr: &str,
) -> Result<(), std::io::Error> {
    let app = router(viewset);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await
}

fn method_filter(method: &str) -> Option<MethodFilter> {
    match method {
        "get" => Some(MethodFilter::GET),
        "post" => Some(MethodFilter::POST),
        "put" => Some(MethodFilter::PUT),
        "patch" => Some(MethodFilter::PATCH),
        "delete" => Some(MethodFilter::DELETE),
        "head" => Some(MethodFilter::HEAD),
        "options" => Some(MethodFilter::OPTIONS),
        "trace" => Some(MethodFilter::TRACE),
        _ => None,
    }
}

fn path_arguments(params: HashMap<String, String>) -> Arguments {
    params
        .into_iter()
        .map(|(k, v)| (k, Value::String(v)))
        .collect()
}

/// Translate the HTTP request into the handler-facing representation.
///
/// A non-empty body must be a JSON object.
fn build_request(
    method: &Method,
    uri: &Uri,
    query: HashMap<String, String>,
    headers: &HeaderMap,
    body: &Bytes,
) -> Result<HttpRequest, HandlerError> {
    let data = if body.is_empty() {
        Arguments::new()
    } else {
        match serde_json::from_slice::<Value>(body)? {
            Value::Object(map) => map,
            _ => return Err(HandlerError::DecodeFailed("body must be a JSON object".into())),
        }
    };

    let query_params: Arguments = query
        .into_iter()
        .map(|(k, v)| (k, Value::String(v)))
        .collect();

    let mut request = HttpRequest::new(method.as_str(), uri.path())
        .with_data(data)
        .with_query_params(query_params);
    for (name, value) in headers.iter() {
        if let Ok(v) = value.to_str() {
            request = request.with_header(name.as_str(), v);
        }
    }
    Ok(request)
}

fn render(result: Result<ActionResponse, HandlerError>) -> Response {
    match result {
        Ok(response) => {
            let status = StatusCode::from_u16(response.status()).unwrap_or(StatusCode::OK);
            if status == StatusCode::NO_CONTENT {
                return status.into_response();
            }
            (status, Json(response.into_data())).into_response()
        }
        Err(e) => {
            let status =
                StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            let detail = match &e {
                HandlerError::Validation(v) => v.detail().clone(),
                other => Value::String(other.to_string()),
            };
            (status, Json(json!({ "detail": detail }))).into_response()
        }
    }
}
