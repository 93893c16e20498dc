//! Tests for the action module convention.
//!
//! Each action lives in its own file under `handlers/` and exports:
//! - `entry() -> Result<ActionEntry, ConfigError>` — the action definition
//! - `handle(ctx) -> Result<ActionResponse, HandlerError>` — the handler
//!
//! Registration uses the `register_actions!` macro.

use action_api::{ConfigError, ViewSet};
use serde_json::{json, Value};

use crate::handlers;
use crate::support::seeded_store;

#[test]
fn register_actions_and_dispatch() {
    let viewset = action_api::register_actions!(
        ViewSet::new(seeded_store()),
        handlers::order_summary,
        handlers::order_create,
        handlers::order_recent,
    )
    .unwrap();

    assert_eq!(
        viewset.actions(),
        vec!["order_summary", "order_create", "order_recent"]
    );

    let mut args = action_api::Arguments::new();
    args.insert("limit".into(), json!(2));
    let recent = viewset.direct("order_recent", args).unwrap();
    assert_eq!(
        Value::Object(recent),
        json!({ "count": 2, "limit": 2, "direct": true })
    );
}

#[test]
fn entries_expose_route_metadata() {
    let viewset = action_api::register_actions!(
        ViewSet::new(seeded_store()),
        handlers::order_summary,
        handlers::order_create,
    )
    .unwrap();

    let summary = viewset.get("order_summary").unwrap().entry();
    assert!(summary.is_detail());
    assert_eq!(summary.methods(), &["get"]);
    assert_eq!(summary.url_path(), "summary");
    assert_eq!(summary.url_name(), "order-summary");

    let create = viewset.get("order_create").unwrap().entry();
    assert!(!create.is_detail());
    assert_eq!(create.methods(), &["post"]);
    assert_eq!(create.option("throttle_scope"), Some(&json!("writes")));
    assert_eq!(create.result_formatter().name(), "new_order");
}

#[test]
fn duplicate_registration_fails() {
    let result = action_api::register_actions!(
        ViewSet::new(seeded_store()),
        handlers::order_summary,
        handlers::order_summary,
    );
    assert!(matches!(result, Err(ConfigError::DuplicateAction(ref s)) if s == "order_summary"));
}
