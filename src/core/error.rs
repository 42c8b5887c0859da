//! Typed error handling for the order form
//!
//! Every error here is recoverable by the caller:
//!
//! - [`ValidationError`]: a field or the whole draft does not satisfy the schema
//! - [`SubmissionError`]: the order endpoint rejected the order or could not be reached
//! - [`ConfigError`]: the form configuration could not be loaded or is inconsistent
//! - [`OrderError`]: what controller operations return
//!
//! Submission failures are normally surfaced as a failure banner rather than
//! as an `Err`; [`SubmissionError::banner_message`] gives the banner text.

use crate::core::draft::FieldErrors;
use crate::core::field::Field;
use thiserror::Error;

/// Errors returned by controller operations
#[derive(Debug, Error)]
pub enum OrderError {
    /// The draft or a field value does not satisfy the schema
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The form configuration is unusable
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A topping id that is not in the catalog
    #[error("Unknown topping '{id}'")]
    UnknownTopping { id: String },

    /// `set_field` was called for a field that is not a single value
    #[error("Field '{field}' cannot be set directly")]
    NotAScalarField { field: Field },

    /// The submit flag is off (invalid draft, or the last attempt failed)
    #[error("Order submission is disabled")]
    SubmitDisabled,

    /// A submission is already waiting for the order endpoint
    #[error("An order submission is already in progress")]
    SubmitInProgress,

    /// No Tokio runtime to run on, or a background task failed
    #[error("Internal error: {0}")]
    Internal(String),
}

impl OrderError {
    /// Stable code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            OrderError::Validation(e) => e.error_code(),
            OrderError::Config(_) => "CONFIG_ERROR",
            OrderError::UnknownTopping { .. } => "UNKNOWN_TOPPING",
            OrderError::NotAScalarField { .. } => "NOT_A_SCALAR_FIELD",
            OrderError::SubmitDisabled => "SUBMIT_DISABLED",
            OrderError::SubmitInProgress => "SUBMIT_IN_PROGRESS",
            OrderError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

/// Result type for controller operations
pub type OrderResult<T> = Result<T, OrderError>;

// =============================================================================
// Validation Errors
// =============================================================================

/// Errors related to schema validation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A single field failed a rule
    #[error("Validation failed for field '{field}': {message}")]
    FieldError { field: Field, message: String },

    /// One or more fields of the draft failed their rules
    #[error("Validation failed: {0}")]
    FieldErrors(FieldErrors),

    /// The field name is not part of the form
    #[error("Unknown field '{name}'")]
    UnknownField { name: String },
}

impl ValidationError {
    pub fn error_code(&self) -> &'static str {
        match self {
            ValidationError::FieldError { .. } | ValidationError::FieldErrors(_) => {
                "VALIDATION_ERROR"
            }
            ValidationError::UnknownField { .. } => "UNKNOWN_FIELD",
        }
    }
}

// =============================================================================
// Submission Errors
// =============================================================================

/// Errors raised while sending an order to the order endpoint
#[derive(Debug, Error)]
pub enum SubmissionError {
    /// The request never produced a response
    #[error("Order request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status
    #[error("Order rejected ({status}): {message}")]
    Rejected { status: u16, message: String },
}

impl SubmissionError {
    /// Text shown in the failure banner
    ///
    /// A rejection carries the server's message verbatim.
    pub fn banner_message(&self) -> String {
        match self {
            SubmissionError::Rejected { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to loading and checking the form configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid order endpoint '{endpoint}': {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },

    #[error("Topping at position {index} has an empty id")]
    EmptyToppingId { index: usize },

    #[error("Duplicate topping id '{id}'")]
    DuplicateTopping { id: String },
}
