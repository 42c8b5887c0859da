//! Service traits for order submission and field validation

use crate::core::draft::OrderPayload;
use crate::core::error::{SubmissionError, ValidationError};
use crate::core::field::Field;
use crate::core::validation::{ValidationSchema, order_schema};
use async_trait::async_trait;
use serde_json::Value;

/// Sends a finished order somewhere that can accept it
///
/// Implementations make exactly one attempt per call and never retry.
#[async_trait]
pub trait OrderSubmitter: Send + Sync {
    /// Submit the order, returning the message to show on success
    async fn submit(&self, order: &OrderPayload) -> Result<String, SubmissionError>;
}

/// Validates a single field value
///
/// The controller runs this off the input path, so implementations may be
/// slow or remote without blocking edits.
#[async_trait]
pub trait FieldValidator: Send + Sync {
    async fn validate(&self, field: Field, value: &Value) -> Result<(), ValidationError>;
}

/// [`FieldValidator`] backed by a [`ValidationSchema`]
#[derive(Debug, Clone, Copy)]
pub struct SchemaValidator {
    schema: &'static ValidationSchema,
}

impl SchemaValidator {
    pub fn new(schema: &'static ValidationSchema) -> Self {
        Self { schema }
    }
}

impl Default for SchemaValidator {
    fn default() -> Self {
        Self::new(order_schema())
    }
}

#[async_trait]
impl FieldValidator for SchemaValidator {
    async fn validate(&self, field: Field, value: &Value) -> Result<(), ValidationError> {
        self.schema.validate_field(field, value)
    }
}
