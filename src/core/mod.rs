//! Core module containing the form's data model, rules, and service traits

pub mod catalog;
pub mod draft;
pub mod error;
pub mod field;
pub mod service;
pub mod validation;

pub use catalog::ToppingCatalog;
pub use draft::{FieldErrors, OrderDraft, OrderPayload, SubmitResult};
pub use error::{ConfigError, OrderError, OrderResult, SubmissionError, ValidationError};
pub use field::{Field, Size};
pub use service::{FieldValidator, OrderSubmitter, SchemaValidator};
pub use validation::{ValidationSchema, order_schema};
