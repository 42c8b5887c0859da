//! Render snapshot of the order form

use crate::core::draft::{FieldErrors, OrderDraft, SubmitResult};
use crate::core::field::Field;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Where the form is in its submit cycle
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormPhase {
    #[default]
    Editing,
    Submitting,
}

/// A checkbox for one catalog topping
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToppingOption {
    pub id: String,
    pub label: String,
    pub checked: bool,
}

/// Everything a shell needs to draw the form at one instant
#[derive(Debug, Clone)]
pub struct FormView {
    pub draft: Arc<OrderDraft>,
    pub errors: FieldErrors,
    pub result: SubmitResult,
    pub submit_enabled: bool,
    pub phase: FormPhase,
    pub toppings: Vec<ToppingOption>,
}

impl FormView {
    /// Error message to show under `field`
    pub fn error(&self, field: Field) -> Option<&str> {
        self.errors.message(field)
    }

    /// Success banner text
    pub fn success(&self) -> Option<&str> {
        match &self.result {
            SubmitResult::Success(message) => Some(message),
            _ => None,
        }
    }

    /// Failure banner text
    pub fn failure(&self) -> Option<&str> {
        match &self.result {
            SubmitResult::Failure(message) => Some(message),
            _ => None,
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == FormPhase::Submitting
    }
}
