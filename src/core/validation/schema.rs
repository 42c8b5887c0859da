//! Ordered rule engine and the order form schema
//!
//! A [`ValidationSchema`] holds, per field, a list of filters and an ordered
//! list of rules. Checking a field stops at the first rule that fails and
//! reports that rule's message. Checking a whole draft is the conjunction of
//! every field check.

use super::{filters, validators};
use crate::core::draft::{FieldErrors, OrderDraft};
use crate::core::error::ValidationError;
use crate::core::field::{Field, Size};
use serde_json::Value;
use std::fmt;
use std::sync::{Arc, LazyLock};

/// A rule: `Ok` when the value passes, otherwise the message to show
pub type Validator = Arc<dyn Fn(&str, &Value) -> Result<(), String> + Send + Sync>;

/// A transformation applied to a raw value before it is stored
pub type Filter = Arc<dyn Fn(&str, Value) -> Value + Send + Sync>;

/// Messages of the order form schema
pub mod messages {
    pub const FULL_NAME_TOO_SHORT: &str = "Full name must be at least 3 characters";
    pub const FULL_NAME_TOO_LONG: &str = "Full name must be at most 20 characters";
    pub const FULL_NAME_REQUIRED: &str = "Full name is required";
    pub const SIZE_INCORRECT: &str = "Size must be S or M or L";
    pub const SIZE_REQUIRED: &str = "Size is required";
}

/// Filters and rules of a single field
#[derive(Clone, Default)]
pub struct FieldSchema {
    filters: Vec<Filter>,
    rules: Vec<Validator>,
}

impl FieldSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a filter; filters run in the order they were added
    pub fn filter(mut self, filter: impl Fn(&str, Value) -> Value + Send + Sync + 'static) -> Self {
        self.filters.push(Arc::new(filter));
        self
    }

    /// Append a rule; rules are checked in the order they were added
    pub fn rule(
        mut self,
        rule: impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + 'static,
    ) -> Self {
        self.rules.push(Arc::new(rule));
        self
    }

    pub fn apply_filters(&self, field: &str, value: Value) -> Value {
        self.filters
            .iter()
            .fold(value, |value, filter| filter(field, value))
    }

    /// First failing rule's message, if any
    pub fn check(&self, field: &str, value: &Value) -> Result<(), String> {
        self.rules.iter().try_for_each(|rule| rule(field, value))
    }
}

impl fmt::Debug for FieldSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldSchema")
            .field("filters", &self.filters.len())
            .field("rules", &self.rules.len())
            .finish()
    }
}

/// Per-field schemas in declaration order
#[derive(Debug, Clone, Default)]
pub struct ValidationSchema {
    fields: Vec<(Field, FieldSchema)>,
}

impl ValidationSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare the schema of `field`, replacing an earlier declaration
    pub fn field(mut self, field: Field, schema: FieldSchema) -> Self {
        match self.fields.iter_mut().find(|(f, _)| *f == field) {
            Some(entry) => entry.1 = schema,
            None => self.fields.push((field, schema)),
        }
        self
    }

    pub fn get(&self, field: Field) -> Option<&FieldSchema> {
        self.fields
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, schema)| schema)
    }

    /// Run the filters declared for `field`; undeclared fields pass through
    pub fn filter(&self, field: Field, value: Value) -> Value {
        match self.get(field) {
            Some(schema) => schema.apply_filters(field.as_str(), value),
            None => value,
        }
    }

    /// Check one field value against its rules
    pub fn validate_field(&self, field: Field, value: &Value) -> Result<(), ValidationError> {
        let Some(schema) = self.get(field) else {
            return Ok(());
        };
        schema
            .check(field.as_str(), value)
            .map_err(|message| ValidationError::FieldError { field, message })
    }

    /// Check a whole form object; a missing key is checked as `null`
    ///
    /// Reports the first failing rule of every failing field.
    pub fn validate_value(&self, value: &Value) -> Result<(), ValidationError> {
        let mut errors = FieldErrors::new();
        for (field, schema) in &self.fields {
            let field_value = value.get(field.as_str()).cloned().unwrap_or(Value::Null);
            if let Err(message) = schema.check(field.as_str(), &field_value) {
                errors.set(*field, message);
            }
        }

        if errors.has_errors() {
            Err(ValidationError::FieldErrors(errors))
        } else {
            Ok(())
        }
    }

    pub fn validate_draft(&self, draft: &OrderDraft) -> Result<(), ValidationError> {
        self.validate_value(&draft.to_value())
    }

    /// Whether the draft satisfies every field's rules
    pub fn is_valid(&self, draft: &OrderDraft) -> bool {
        self.fields.iter().all(|(field, schema)| {
            schema
                .check(field.as_str(), &draft.field_value(*field))
                .is_ok()
        })
    }
}

static ORDER_SCHEMA: LazyLock<ValidationSchema> = LazyLock::new(build_order_schema);

/// The order form schema, built once per process
pub fn order_schema() -> &'static ValidationSchema {
    &ORDER_SCHEMA
}

fn build_order_schema() -> ValidationSchema {
    ValidationSchema::new()
        .field(
            Field::FullName,
            FieldSchema::new()
                .filter(filters::trim())
                .rule(validators::min_length(3, messages::FULL_NAME_TOO_SHORT))
                .rule(validators::max_length(20, messages::FULL_NAME_TOO_LONG))
                .rule(validators::required(messages::FULL_NAME_REQUIRED)),
        )
        .field(
            Field::Size,
            FieldSchema::new()
                .rule(validators::one_of(&Size::VALUES, messages::SIZE_INCORRECT))
                .rule(validators::required(messages::SIZE_REQUIRED)),
        )
        .field(
            Field::Toppings,
            FieldSchema::new().rule(validators::each_string()),
        )
}
