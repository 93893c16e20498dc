//! action_api — register a handler once, call it two ways.
//!
//! Every action is a handler plus an immutable [`ActionEntry`]. The same
//! handler runs:
//!
//! - **routed**, against a real [`TransportRequest`], returning its
//!   [`ActionResponse`] and [`HandlerError`] unchanged;
//! - **direct**, from plain keyword [`Arguments`], returning a
//!   lowercase-keyed mapping or a single [`DirectFailure`].
//!
//! ## Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//! use action_api::{ActionEntry, ActionResponse, Arguments, FieldsFormatter, ViewSet};
//! use serde_json::json;
//!
//! let viewset = ViewSet::new(())
//!     .action(
//!         ActionEntry::builder("status")
//!             .detail(false)
//!             .result_formatter(FieldsFormatter::new("status", &["Name", "Count"]).shared())
//!             .build()?,
//!         |ctx| {
//!             let data = ctx.format(&json!({ "Name": "x", "Count": 3, "Hidden": true }))?;
//!             Ok(ActionResponse::ok(data))
//!         },
//!     )?;
//!
//! // Direct call
//! let result = viewset.direct("status", Arguments::new())?; // {"count": 3, "name": "x"}
//!
//! // HTTP transport (requires "http" feature)
//! // action_api::http::serve(Arc::new(viewset), "0.0.0.0:3000").await?;
//! ```

mod context;
mod dispatch;
mod entry;
mod error;
mod formatter;
mod request;
mod response;
mod viewset;

#[cfg(feature = "http")]
pub mod http;

pub use context::ActionContext;
pub use dispatch::{normalize_keys, Action, HandlerFn, Invocation, Mode, Outcome};
pub use entry::{ActionBuilder, ActionEntry, KNOWN_METHODS};
pub use error::{ConfigError, DirectFailure, FailureKind, HandlerError, ValidationError};
pub use formatter::{FieldsFormatter, FormatterRef, PassthroughFormatter, ResultFormatter};
pub use request::{Arguments, DirectRequest, HttpRequest, TransportRequest};
pub use response::ActionResponse;
pub use viewset::ViewSet;

/// Register action modules with a viewset using the convention pattern.
///
/// Each module must export:
/// - `entry() -> Result<ActionEntry, ConfigError>` — the action definition
/// - `handle(ctx) -> Result<ActionResponse, HandlerError>` — the handler
///
/// Expands to `Result<ViewSet<S>, ConfigError>`.
///
/// # Example
/// ```ignore
/// let viewset = action_api::register_actions!(
///     ViewSet::new(Store::default()),
///     actions::order_summary,
///     actions::order_recent,
/// )?;
/// ```
#[macro_export]
macro_rules! register_actions {
    ($viewset:expr, $( $($seg:ident)::+ ),+ $(,)?) => {
        (|| -> ::std::result::Result<_, $crate::ConfigError> {
            let viewset = $viewset;
            $(
                let viewset = viewset.action($($seg)::+::entry()?, $($seg)::+::handle)?;
            )+
            Ok(viewset)
        })()
    };
}
