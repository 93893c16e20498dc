//! Action: order_recent
//!
//! Collection action reading the optional `limit` parameter.

use action_api::{
    ActionContext, ActionEntry, ActionResponse, ConfigError, HandlerError, PassthroughFormatter,
};
use serde_json::json;
use std::sync::Arc;

use crate::support::Store;

pub fn entry() -> Result<ActionEntry, ConfigError> {
    ActionEntry::builder("order_recent")
        .detail(false)
        .result_formatter(Arc::new(PassthroughFormatter))
        .build()
}

pub fn handle(ctx: &ActionContext<Store>) -> Result<ActionResponse, HandlerError> {
    let limit = match ctx.request().param("limit") {
        None => 10,
        Some(value) => match value.as_i64() {
            Some(n) => n,
            None => value
                .as_str()
                .and_then(|s| s.parse::<i64>().ok())
                .ok_or_else(|| HandlerError::DecodeFailed("limit must be an integer".into()))?,
        },
    };
    Ok(ActionResponse::ok(json!({
        "Count": ctx.state().len(),
        "Limit": limit,
        "Direct": ctx.request().is_direct(),
    })))
}
