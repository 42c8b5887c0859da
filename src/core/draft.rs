//! Order draft, transport payload, and the per-attempt form outcomes

use crate::core::error::ValidationError;
use crate::core::field::{Field, Size};
use crate::core::validation::order_schema;
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::collections::BTreeMap;
use std::fmt;

/// The in-progress, not-yet-submitted order
///
/// `size` keeps the raw input so that values outside the menu can be held and
/// reported. `toppings` is a set that remembers the order ids were checked in.
/// Drafts are replaced, never edited in place: every `with_*` method returns a
/// new draft.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDraft {
    pub full_name: String,
    pub size: String,
    pub toppings: IndexSet<String>,
}

impl OrderDraft {
    /// The empty draft a fresh form starts from
    pub fn empty() -> Self {
        Self::default()
    }

    /// Copy of this draft with one scalar field replaced
    ///
    /// Setting `Field::Toppings` this way leaves the draft unchanged; toppings
    /// are edited with [`OrderDraft::with_topping`].
    pub fn with_field(&self, field: Field, value: String) -> Self {
        let mut next = self.clone();
        match field {
            Field::FullName => next.full_name = value,
            Field::Size => next.size = value,
            Field::Toppings => {}
        }
        next
    }

    /// Copy of this draft with `id` added to or removed from the toppings
    pub fn with_topping(&self, id: &str, included: bool) -> Self {
        let mut next = self.clone();
        if included {
            next.toppings.insert(id.to_string());
        } else {
            next.toppings.shift_remove(id);
        }
        next
    }

    /// Value of one field as the schema sees it
    pub fn field_value(&self, field: Field) -> Value {
        match field {
            Field::FullName => Value::String(self.full_name.clone()),
            Field::Size => Value::String(self.size.clone()),
            Field::Toppings => Value::Array(
                self.toppings
                    .iter()
                    .map(|id| Value::String(id.clone()))
                    .collect(),
            ),
        }
    }

    /// Whole draft as a JSON object keyed by wire field names
    pub fn to_value(&self) -> Value {
        json!({
            "fullName": self.full_name,
            "size": self.size,
            "toppings": self.field_value(Field::Toppings),
        })
    }

    pub fn is_empty(&self) -> bool {
        self.full_name.is_empty() && self.size.is_empty() && self.toppings.is_empty()
    }
}

/// Body of the order request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPayload {
    pub full_name: String,
    pub size: Size,
    pub toppings: Vec<String>,
}

impl TryFrom<&OrderDraft> for OrderPayload {
    type Error = ValidationError;

    fn try_from(draft: &OrderDraft) -> Result<Self, Self::Error> {
        order_schema().validate_draft(draft)?;
        Ok(Self {
            full_name: draft.full_name.clone(),
            size: draft.size.parse()?,
            toppings: draft.toppings.iter().cloned().collect(),
        })
    }
}

/// Per-field error messages
///
/// An empty message means the field currently has no error. Each field holds
/// only the message of its most recent validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldErrors(BTreeMap<Field, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the message for `field`
    pub fn set(&mut self, field: Field, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    /// Mark `field` as having no error
    pub fn clear(&mut self, field: Field) {
        self.0.insert(field, String::new());
    }

    /// Raw entry for `field`; `Some("")` once the field validated cleanly
    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    /// Message to display for `field`, if any
    pub fn message(&self, field: Field) -> Option<&str> {
        self.get(field).filter(|message| !message.is_empty())
    }

    pub fn has_errors(&self) -> bool {
        self.0.values().any(|message| !message.is_empty())
    }

    /// Fields that currently have a message, in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0
            .iter()
            .filter(|(_, message)| !message.is_empty())
            .map(|(field, message)| (*field, message.as_str()))
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", field, message)?;
            first = false;
        }
        Ok(())
    }
}

/// Outcome of the latest submit attempt
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "message", rename_all = "snake_case")]
pub enum SubmitResult {
    #[default]
    None,
    Success(String),
    Failure(String),
}

impl SubmitResult {
    /// Banner text, if a banner is showing
    pub fn message(&self) -> Option<&str> {
        match self {
            SubmitResult::None => None,
            SubmitResult::Success(message) | SubmitResult::Failure(message) => Some(message),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, SubmitResult::Success(_))
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, SubmitResult::Failure(_))
    }
}
