//! Validation and filtering system
//!
//! This module provides a declarative approach to validating and filtering form
//! data: small factory functions build filters and rules, and a schema lists
//! them per field in the order they are evaluated.

pub mod filters;
pub mod schema;
pub mod validators;

pub use schema::{FieldSchema, Filter, ValidationSchema, Validator, messages, order_schema};
