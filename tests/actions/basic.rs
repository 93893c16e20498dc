//! One handler, two contracts — exercised through a viewset over the order store.

use action_api::{
    ActionContext, ActionEntry, ActionResponse, Arguments, ConfigError, HandlerError,
    HttpRequest, Outcome, PassthroughFormatter, TransportRequest, ValidationError, ViewSet,
};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::handlers;
use crate::support::{init_tracing, seeded_store, Store};

fn args(value: Value) -> Arguments {
    value.as_object().cloned().unwrap()
}

fn entry(name: &str) -> ActionEntry {
    ActionEntry::builder(name)
        .detail(false)
        .result_formatter(Arc::new(PassthroughFormatter))
        .build()
        .unwrap()
}

fn viewset() -> ViewSet<Store> {
    init_tracing();
    ViewSet::new(seeded_store())
        .action(handlers::order_summary::entry().unwrap(), handlers::order_summary::handle)
        .unwrap()
        .action(handlers::order_create::entry().unwrap(), handlers::order_create::handle)
        .unwrap()
        .action(entry("stats"), |_ctx| {
            Ok(ActionResponse::ok(json!({ "Name": "x", "Count": 3 })))
        })
        .unwrap()
        .action(entry("strict"), |_ctx| {
            Err(ValidationError::new(json!({ "field": ["required"] })).into())
        })
        .unwrap()
        .action(entry("explode"), |_ctx| Err(HandlerError::other("boom")))
        .unwrap()
}

#[test]
fn direct_call_lowercases_keys() {
    let result = viewset().direct("stats", Arguments::new()).unwrap();
    assert_eq!(Value::Object(result), json!({ "name": "x", "count": 3 }));
}

#[test]
fn direct_validation_failure_is_uniform() {
    let failure = viewset().direct("strict", Arguments::new()).unwrap_err();
    assert_eq!(failure.message(), r#"{"field":["required"]}"#);
    assert_eq!(failure.to_string(), failure.message());
}

#[test]
fn direct_generic_failure_is_uniform() {
    let failure = viewset().direct("explode", Arguments::new()).unwrap_err();
    assert_eq!(failure.message(), "boom");
}

#[test]
fn same_handler_two_contracts() {
    let viewset = viewset();

    let request = HttpRequest::new("GET", "/o1/summary");
    let routed = viewset
        .routed("order_summary", &request, args(json!({ "pk": "o1" })))
        .unwrap();
    assert_eq!(routed.status(), 200);
    assert_eq!(
        routed.data(),
        &json!({ "Id": "o1", "Customer": "ada", "Total": 120 })
    );

    let direct = viewset
        .direct("order_summary", args(json!({ "pk": "o1" })))
        .unwrap();
    assert_eq!(
        Value::Object(direct),
        json!({ "id": "o1", "customer": "ada", "total": 120 })
    );
}

#[test]
fn call_selects_mode_from_request_presence() {
    let viewset = viewset();
    let request = HttpRequest::new("GET", "/stats");

    match viewset.call("stats", Some(&request as &dyn TransportRequest), Arguments::new()) {
        Outcome::Routed(Ok(response)) => {
            assert_eq!(response.data(), &json!({ "Name": "x", "Count": 3 }))
        }
        other => panic!("expected routed success, got {:?}", other),
    }

    match viewset.call("stats", None, Arguments::new()) {
        Outcome::Direct(Ok(map)) => assert_eq!(Value::Object(map), json!({ "name": "x", "count": 3 })),
        other => panic!("expected direct success, got {:?}", other),
    }
}

#[test]
fn routed_errors_are_not_translated() {
    let viewset = viewset();
    let request = HttpRequest::new("GET", "/o9/summary");
    let err = viewset
        .routed("order_summary", &request, args(json!({ "pk": "o9" })))
        .unwrap_err();
    assert!(matches!(err, HandlerError::NotFound(ref s) if s == "order o9"));
    assert_eq!(err.status_code(), 404);

    let failure = viewset
        .direct("order_summary", args(json!({ "pk": "o9" })))
        .unwrap_err();
    assert_eq!(failure.message(), "not found: order o9");
}

#[test]
fn direct_create_runs_validation_against_synthetic_request() {
    let viewset = viewset();

    let failure = viewset
        .direct("order_create", args(json!({ "id": "o3", "customer": "linus" })))
        .unwrap_err();
    assert_eq!(failure.message(), r#"{"total":["This field is required."]}"#);
    assert_eq!(viewset.state().len(), 2);

    let created = viewset
        .direct(
            "order_create",
            args(json!({ "id": "o3", "customer": "linus", "total": 10 })),
        )
        .unwrap();
    assert_eq!(Value::Object(created), json!({ "id": "o3", "status": "created" }));
    assert_eq!(viewset.state().len(), 3);

    let failure = viewset
        .direct(
            "order_create",
            args(json!({ "id": "o3", "customer": "linus", "total": 10 })),
        )
        .unwrap_err();
    assert_eq!(failure.message(), "rejected: order o3 already exists");
}

#[test]
fn routed_create_reads_request_body() {
    let viewset = viewset();
    let request = HttpRequest::new("POST", "/create")
        .with_data(args(json!({ "id": "o4", "customer": "ken", "total": 5 })));
    let response = viewset
        .routed("order_create", &request, Arguments::new())
        .unwrap();
    assert_eq!(response.status(), 201);
    assert_eq!(response.data(), &json!({ "Id": "o4", "Status": "created" }));
    assert!(viewset.state().find("o4").is_some());
}

#[test]
fn handler_sees_context_in_both_modes() {
    let viewset = ViewSet::new(())
        .action(entry("echo"), |ctx: &ActionContext<()>| {
            Ok(ActionResponse::ok(json!({
                "Action": ctx.action(),
                "Direct": ctx.request().is_direct(),
                "Method": ctx.request().method(),
                "Pk": ctx.kwarg("pk").cloned(),
            })))
        })
        .unwrap();

    let request = HttpRequest::new("PUT", "/echo");
    let routed = viewset
        .routed("echo", &request, args(json!({ "pk": "1" })))
        .unwrap();
    assert_eq!(
        routed.into_data(),
        json!({ "Action": "echo", "Direct": false, "Method": "put", "Pk": "1" })
    );

    let direct = viewset.direct("echo", args(json!({ "pk": "1" }))).unwrap();
    assert_eq!(
        Value::Object(direct),
        json!({ "action": "echo", "direct": true, "method": "post", "pk": "1" })
    );
}

#[test]
fn formatter_is_checked_at_definition_time() {
    let result = ActionEntry::builder("orphan").detail(true).build();
    assert!(matches!(result, Err(ConfigError::MissingResultFormatter(ref s)) if s == "orphan"));
}
