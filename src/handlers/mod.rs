pub mod cart;
pub mod health;
pub mod metrics;
pub mod middleware;

pub use cart::*;
pub use health::*;
pub use metrics::*;
pub use middleware::*;

use serde_json::{json, Value};

use crate::observability::get_current_trace_id;

/// JSON error body shared by the service's handlers
pub(crate) fn error_body(message: &str) -> Value {
    let mut body = json!({
        "error": message,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    });
    if let Some(trace_id) = get_current_trace_id() {
        body["trace_id"] = Value::String(trace_id);
    }
    body
}
