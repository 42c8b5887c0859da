//! The order form: controller plus the snapshot it exposes to a UI shell

pub mod controller;
pub mod view;

pub use controller::{OrderFormController, PendingValidation};
pub use view::{FormPhase, FormView, ToppingOption};
