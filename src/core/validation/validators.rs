//! Reusable field validators
//!
//! Each factory returns a closure that checks one field value and yields the
//! configured message when the value violates the rule. Bound checks let an
//! absent or empty value through so that `required()` owns that message.

use serde_json::Value;

/// Returns true when the value carries nothing to check
fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

/// Validator: value must be present and, for strings, non-empty
pub fn required(
    message: &'static str,
) -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    move |_: &str, value: &Value| {
        if is_blank(value) {
            Err(message.to_string())
        } else {
            Ok(())
        }
    }
}

/// Validator: string must have at least `min` characters
pub fn min_length(
    min: usize,
    message: &'static str,
) -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    move |_: &str, value: &Value| match value.as_str() {
        Some(s) if !s.is_empty() && s.chars().count() < min => Err(message.to_string()),
        _ => Ok(()),
    }
}

/// Validator: string must have at most `max` characters
pub fn max_length(
    max: usize,
    message: &'static str,
) -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    move |_: &str, value: &Value| match value.as_str() {
        Some(s) if s.chars().count() > max => Err(message.to_string()),
        _ => Ok(()),
    }
}

/// Validator: string must be one of the allowed values
pub fn one_of(
    allowed: &'static [&'static str],
    message: &'static str,
) -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    move |_: &str, value: &Value| {
        if is_blank(value) {
            return Ok(());
        }
        match value.as_str() {
            Some(s) if allowed.contains(&s) => Ok(()),
            _ => Err(message.to_string()),
        }
    }
}

/// Validator: every element of an array must be a string
pub fn each_string() -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    |field: &str, value: &Value| match value {
        Value::Array(items) => match items.iter().position(|item| !item.is_string()) {
            Some(index) => Err(format!("{}[{}] must be a string", field, index)),
            None => Ok(()),
        },
        Value::Null => Ok(()),
        _ => Err(format!("{} must be a list", field)),
    }
}
