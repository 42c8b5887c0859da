//! # Pizza Order
//!
//! Headless controller for a pizza order form: it holds the draft, validates
//! it field by field against a declarative schema, and submits it to an order
//! endpoint over HTTP. A UI shell renders [`form::FormView`] snapshots and
//! forwards input events to the controller.
//!
//! ## Features
//!
//! - **Ordered Rules**: Each field lists its rules; the first failing rule supplies the message
//! - **Background Validation**: Field checks never block input, and stale results are dropped
//! - **Derived Submit Flag**: Submission is enabled exactly when the whole draft validates
//! - **Configurable Catalog**: Toppings and the endpoint come from YAML configuration
//! - **Pluggable Transport**: Any [`core::OrderSubmitter`] can receive orders
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pizza_order::prelude::*;
//!
//! let form = OrderFormController::from_config(&FormConfig::default_config())?;
//!
//! form.set_field(Field::FullName, "  Alice Smith ")?;
//! form.set_field(Field::Size, "M")?;
//! form.set_topping("1", true)?;
//!
//! if form.is_submit_enabled() {
//!     match form.submit().await? {
//!         SubmitResult::Success(message) => println!("{message}"),
//!         SubmitResult::Failure(message) => eprintln!("{message}"),
//!         SubmitResult::None => {}
//!     }
//! }
//! ```

pub mod client;
pub mod config;
pub mod core;
pub mod form;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        ConfigError, Field, FieldErrors, FieldValidator, OrderDraft, OrderError, OrderPayload,
        OrderResult, OrderSubmitter, SchemaValidator, Size, SubmissionError, SubmitResult,
        ToppingCatalog, ValidationError, ValidationSchema, order_schema,
    };

    // === Form ===
    pub use crate::form::{FormPhase, FormView, OrderFormController, PendingValidation, ToppingOption};

    // === Clients ===
    pub use crate::client::{HttpOrderSubmitter, InMemoryOrderSubmitter, ScriptedReply};

    // === Config ===
    pub use crate::config::{FormConfig, ToppingConfig};

    // === External dependencies ===
    pub use async_trait::async_trait;
}
