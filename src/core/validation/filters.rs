//! Reusable field filters
//!
//! These filters transform a raw field value before it is stored and validated

use serde_json::Value;

/// Filter: trim whitespace from string
pub fn trim() -> impl Fn(&str, Value) -> Value + Send + Sync + Clone {
    |_: &str, value: Value| match value {
        Value::String(s) => Value::String(s.trim().to_string()),
        other => other,
    }
}
