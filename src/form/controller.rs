//! Order form controller
//!
//! The controller owns the draft and everything derived from it. Edits replace
//! the draft synchronously; per-field validation runs as a spawned task and
//! lands whenever it completes. Each field carries a sequence number so a
//! validation that finishes after a newer one for the same field is dropped
//! instead of overwriting the fresher message.

use crate::client::HttpOrderSubmitter;
use crate::config::FormConfig;
use crate::core::catalog::ToppingCatalog;
use crate::core::draft::{FieldErrors, OrderDraft, OrderPayload, SubmitResult};
use crate::core::error::{OrderError, OrderResult, ValidationError};
use crate::core::field::Field;
use crate::core::service::{FieldValidator, OrderSubmitter, SchemaValidator};
use crate::core::validation::order_schema;
use crate::form::view::{FormPhase, FormView, ToppingOption};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

/// Issued and applied validation sequence numbers of one field
#[derive(Debug, Default, Clone, Copy)]
struct FieldSequence {
    issued: u64,
    applied: u64,
}

#[derive(Debug, Default)]
struct FormState {
    draft: Arc<OrderDraft>,
    errors: FieldErrors,
    result: SubmitResult,
    submit_enabled: bool,
    phase: FormPhase,
    sequences: HashMap<Field, FieldSequence>,
}

impl FormState {
    /// Swap in a new draft and re-derive the submit flag from it
    fn replace_draft(&mut self, draft: OrderDraft) {
        self.submit_enabled = order_schema().is_valid(&draft);
        self.draft = Arc::new(draft);
    }

    fn issue(&mut self, field: Field) -> u64 {
        let sequence = self.sequences.entry(field).or_default();
        sequence.issued += 1;
        sequence.issued
    }

    /// Record a validation outcome unless a newer one was already applied
    fn apply_validation(
        &mut self,
        field: Field,
        seq: u64,
        outcome: Result<(), ValidationError>,
    ) -> bool {
        let sequence = self.sequences.entry(field).or_default();
        if seq <= sequence.applied {
            tracing::debug!(field = %field, seq, applied = sequence.applied, "Discarding stale validation");
            return false;
        }
        sequence.applied = seq;

        match outcome {
            Ok(()) => self.errors.clear(field),
            Err(ValidationError::FieldError { message, .. }) => self.errors.set(field, message),
            Err(other) => self.errors.set(field, other.to_string()),
        }
        true
    }
}

/// Handle to a field validation started by [`OrderFormController::set_field`]
///
/// Dropping it leaves the validation running; awaiting [`settled`] waits until
/// its outcome has been applied (or discarded as stale).
///
/// [`settled`]: PendingValidation::settled
#[derive(Debug)]
pub struct PendingValidation {
    field: Field,
    sequence: u64,
    handle: JoinHandle<bool>,
}

impl PendingValidation {
    pub fn field(&self) -> Field {
        self.field
    }

    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Wait for the validation; `true` when its outcome was applied
    pub async fn settled(self) -> OrderResult<bool> {
        self.handle
            .await
            .map_err(|e| OrderError::Internal(format!("field validation task failed: {}", e)))
    }
}

/// Holds the order draft, validates it, and submits it
///
/// Cloning yields another handle onto the same form. Operations that start
/// background work (`set_field`, `submit`) must run inside a Tokio runtime.
pub struct OrderFormController<S, V = SchemaValidator> {
    state: Arc<RwLock<FormState>>,
    submitter: Arc<S>,
    validator: Arc<V>,
    catalog: Arc<ToppingCatalog>,
}

impl<S, V> Clone for OrderFormController<S, V> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            submitter: Arc::clone(&self.submitter),
            validator: Arc::clone(&self.validator),
            catalog: Arc::clone(&self.catalog),
        }
    }
}

impl OrderFormController<HttpOrderSubmitter> {
    /// Controller posting to the configured endpoint with the configured catalog
    pub fn from_config(config: &FormConfig) -> OrderResult<Self> {
        config.validate()?;
        Ok(Self::new(
            HttpOrderSubmitter::from_config(config),
            ToppingCatalog::new(&config.toppings),
        ))
    }
}

impl<S> OrderFormController<S>
where
    S: OrderSubmitter + 'static,
{
    pub fn new(submitter: S, catalog: ToppingCatalog) -> Self {
        Self::with_validator(submitter, SchemaValidator::default(), catalog)
    }
}

impl<S, V> OrderFormController<S, V>
where
    S: OrderSubmitter + 'static,
    V: FieldValidator + 'static,
{
    pub fn with_validator(submitter: S, validator: V, catalog: ToppingCatalog) -> Self {
        Self {
            state: Arc::new(RwLock::new(FormState::default())),
            submitter: Arc::new(submitter),
            validator: Arc::new(validator),
            catalog: Arc::new(catalog),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, FormState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, FormState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn runtime() -> OrderResult<Handle> {
        Handle::try_current()
            .map_err(|e| OrderError::Internal(format!("no Tokio runtime available: {}", e)))
    }

    /// Store a new raw value for `field` and validate it in the background
    ///
    /// The value passes through the field's filters (the full name is
    /// trimmed) before it is stored and validated.
    pub fn set_field(&self, field: Field, raw: &str) -> OrderResult<PendingValidation> {
        if field == Field::Toppings {
            return Err(OrderError::NotAScalarField { field });
        }
        let runtime = Self::runtime()?;

        let value = order_schema().filter(field, Value::String(raw.to_string()));
        let stored = value.as_str().unwrap_or_default().to_string();

        let (seq, submit_enabled) = {
            let mut state = self.write();
            let next = state.draft.with_field(field, stored);
            state.replace_draft(next);
            (state.issue(field), state.submit_enabled)
        };
        tracing::debug!(field = %field, seq, submit_enabled, "Field updated");

        let validator = Arc::clone(&self.validator);
        let state = Arc::clone(&self.state);
        let handle = runtime.spawn(async move {
            let outcome = validator.validate(field, &value).await;
            let mut state = state.write().unwrap_or_else(PoisonError::into_inner);
            state.apply_validation(field, seq, outcome)
        });

        Ok(PendingValidation {
            field,
            sequence: seq,
            handle,
        })
    }

    /// Parse `name` as a wire field name and set it
    pub fn set_field_by_name(&self, name: &str, raw: &str) -> OrderResult<PendingValidation> {
        let field: Field = name.parse()?;
        self.set_field(field, raw)
    }

    /// Check or uncheck a topping from the catalog
    pub fn set_topping(&self, id: &str, included: bool) -> OrderResult<()> {
        if !self.catalog.contains(id) {
            return Err(OrderError::UnknownTopping { id: id.to_string() });
        }

        let mut state = self.write();
        let next = state.draft.with_topping(id, included);
        state.replace_draft(next);
        tracing::debug!(topping = id, included, "Topping toggled");
        Ok(())
    }

    /// Whether the current draft satisfies the whole schema
    pub fn validate_whole(&self) -> bool {
        order_schema().is_valid(&self.draft())
    }

    /// Send the draft to the order endpoint
    ///
    /// Refuses without a network call while another submission is in flight
    /// or while the submit flag is off. The draft is also checked, because a
    /// success re-enables the flag on the reset (empty) draft. Otherwise
    /// makes exactly one call: on success the draft is reset and submission
    /// re-enabled; on failure the draft is kept and submission disabled until
    /// the next edit. The outcome is applied even if the returned future is
    /// dropped early.
    pub async fn submit(&self) -> OrderResult<SubmitResult> {
        let runtime = Self::runtime()?;

        let payload = {
            let mut state = self.write();
            if state.phase == FormPhase::Submitting {
                return Err(OrderError::SubmitInProgress);
            }
            if !state.submit_enabled {
                return Err(OrderError::SubmitDisabled);
            }
            let payload = OrderPayload::try_from(state.draft.as_ref())?;
            state.phase = FormPhase::Submitting;
            payload
        };
        tracing::info!(size = %payload.size, toppings = payload.toppings.len(), "Submitting order");

        let submitter = Arc::clone(&self.submitter);
        let state = Arc::clone(&self.state);
        let task = runtime.spawn(async move {
            let outcome = submitter.submit(&payload).await;

            let mut state = state.write().unwrap_or_else(PoisonError::into_inner);
            state.phase = FormPhase::Editing;
            let result = match outcome {
                Ok(message) => {
                    tracing::info!(message = %message, "Order accepted");
                    state.draft = Arc::new(OrderDraft::empty());
                    state.submit_enabled = true;
                    SubmitResult::Success(message)
                }
                Err(err) => {
                    tracing::warn!(error = %err, "Order submission failed");
                    // Disabled even though the kept draft may still be valid;
                    // the next edit re-derives the flag.
                    state.submit_enabled = false;
                    SubmitResult::Failure(err.banner_message())
                }
            };
            state.result = result.clone();
            result
        });

        task.await
            .map_err(|e| OrderError::Internal(format!("order submission task failed: {}", e)))
    }

    /// Snapshot of everything a shell needs to render the form
    pub fn view(&self) -> FormView {
        let state = self.read();
        let toppings = self
            .catalog
            .iter()
            .map(|(id, label)| ToppingOption {
                id: id.to_string(),
                label: label.to_string(),
                checked: state.draft.toppings.contains(id),
            })
            .collect();

        FormView {
            draft: Arc::clone(&state.draft),
            errors: state.errors.clone(),
            result: state.result.clone(),
            submit_enabled: state.submit_enabled,
            phase: state.phase,
            toppings,
        }
    }

    pub fn draft(&self) -> Arc<OrderDraft> {
        Arc::clone(&self.read().draft)
    }

    pub fn errors(&self) -> FieldErrors {
        self.read().errors.clone()
    }

    pub fn submit_result(&self) -> SubmitResult {
        self.read().result.clone()
    }

    pub fn is_submit_enabled(&self) -> bool {
        self.read().submit_enabled
    }

    pub fn phase(&self) -> FormPhase {
        self.read().phase
    }

    pub fn catalog(&self) -> &ToppingCatalog {
        &self.catalog
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{InMemoryOrderSubmitter, ScriptedReply};
    use crate::config::FormConfig;
    use crate::core::validation::messages;
    use async_trait::async_trait;
    use std::time::Duration;

    fn controller() -> OrderFormController<InMemoryOrderSubmitter> {
        OrderFormController::new(
            InMemoryOrderSubmitter::new(),
            ToppingCatalog::new(&FormConfig::default_config().toppings),
        )
    }

    #[test]
    fn test_apply_validation_drops_older_result() {
        let mut state = FormState::default();
        let first = state.issue(Field::FullName);
        let second = state.issue(Field::FullName);

        assert!(state.apply_validation(Field::FullName, second, Ok(())));
        assert!(!state.apply_validation(
            Field::FullName,
            first,
            Err(ValidationError::FieldError {
                field: Field::FullName,
                message: messages::FULL_NAME_TOO_SHORT.to_string(),
            })
        ));
        assert_eq!(state.errors.get(Field::FullName), Some(""));
    }

    #[test]
    fn test_sequences_are_per_field() {
        let mut state = FormState::default();
        assert_eq!(state.issue(Field::FullName), 1);
        assert_eq!(state.issue(Field::FullName), 2);
        assert_eq!(state.issue(Field::Size), 1);
    }

    #[test]
    fn test_set_field_outside_runtime_is_error() {
        let form = controller();
        let err = form.set_field(Field::FullName, "Alice").unwrap_err();
        assert!(matches!(err, OrderError::Internal(_)));
        assert!(form.draft().is_empty());
    }

    #[tokio::test]
    async fn test_set_field_trims_and_stores_immediately() {
        let form = controller();
        let pending = form.set_field(Field::FullName, "  Bob  ").unwrap();
        assert_eq!(form.draft().full_name, "Bob");
        assert!(pending.settled().await.unwrap());
        assert_eq!(form.errors().message(Field::FullName), None);
    }

    #[tokio::test]
    async fn test_set_field_rejects_toppings() {
        let form = controller();
        let err = form.set_field(Field::Toppings, "1").unwrap_err();
        assert!(matches!(err, OrderError::NotAScalarField { .. }));
    }

    #[tokio::test]
    async fn test_set_field_by_name_rejects_unknown_name() {
        let form = controller();
        let err = form.set_field_by_name("crust", "thin").unwrap_err();
        assert_eq!(err.error_code(), "UNKNOWN_FIELD");
    }

    #[tokio::test]
    async fn test_previous_draft_snapshot_is_not_mutated() {
        let form = controller();
        let before = form.draft();
        form.set_field(Field::Size, "L").unwrap();
        assert_eq!(before.size, "");
        assert_eq!(form.draft().size, "L");
    }

    #[tokio::test]
    async fn test_set_topping_rejects_unknown_id() {
        let form = controller();
        let err = form.set_topping("42", true).unwrap_err();
        assert!(matches!(err, OrderError::UnknownTopping { .. }));
    }

    #[tokio::test]
    async fn test_submit_invalid_draft_makes_no_call() {
        let submitter = InMemoryOrderSubmitter::new();
        let form = OrderFormController::new(submitter.clone(), ToppingCatalog::default());
        form.set_field(Field::FullName, "Al").unwrap();
        form.set_field(Field::Size, "M").unwrap();

        let err = form.submit().await.unwrap_err();
        assert!(matches!(err, OrderError::SubmitDisabled));
        assert_eq!(submitter.order_count(), 0);
        assert_eq!(form.phase(), FormPhase::Editing);
    }

    #[tokio::test]
    async fn test_submit_after_failure_is_refused_until_edit() {
        let submitter = InMemoryOrderSubmitter::new();
        submitter.push_reply(ScriptedReply::Reject {
            status: 500,
            message: "Out of stock".to_string(),
        });
        let form = OrderFormController::new(submitter.clone(), ToppingCatalog::default());
        form.set_field(Field::FullName, "Alice").unwrap();
        form.set_field(Field::Size, "S").unwrap();
        assert!(form.submit().await.unwrap().is_failure());

        let err = form.submit().await.unwrap_err();
        assert!(matches!(err, OrderError::SubmitDisabled));
        assert_eq!(submitter.order_count(), 1);

        form.set_field(Field::Size, "S").unwrap();
        assert!(form.submit().await.unwrap().is_success());
        assert_eq!(submitter.order_count(), 2);
    }

    #[tokio::test]
    async fn test_submit_after_success_refuses_empty_draft() {
        let submitter = InMemoryOrderSubmitter::new();
        let form = OrderFormController::new(submitter.clone(), ToppingCatalog::default());
        form.set_field(Field::FullName, "Alice").unwrap();
        form.set_field(Field::Size, "S").unwrap();
        assert!(form.submit().await.unwrap().is_success());
        assert!(form.is_submit_enabled());

        let err = form.submit().await.unwrap_err();
        assert!(matches!(err, OrderError::Validation(_)));
        assert_eq!(submitter.order_count(), 1);
        assert_eq!(form.phase(), FormPhase::Editing);
    }

    #[tokio::test]
    async fn test_second_submit_while_in_flight_is_refused() {
        let submitter = InMemoryOrderSubmitter::new().with_delay(Duration::from_millis(50));
        let form = OrderFormController::new(submitter.clone(), ToppingCatalog::default());
        form.set_field(Field::FullName, "Alice").unwrap();
        form.set_field(Field::Size, "S").unwrap();

        let first = tokio::spawn({
            let form = form.clone();
            async move { form.submit().await }
        });
        while form.phase() != FormPhase::Submitting {
            tokio::task::yield_now().await;
        }

        let err = form.submit().await.unwrap_err();
        assert!(matches!(err, OrderError::SubmitInProgress));

        let result = first.await.unwrap().unwrap();
        assert!(result.is_success());
        assert_eq!(submitter.order_count(), 1);
        assert_eq!(form.phase(), FormPhase::Editing);
    }

    #[tokio::test]
    async fn test_failure_keeps_draft_and_disables_submit() {
        let submitter = InMemoryOrderSubmitter::new();
        submitter.push_reply(ScriptedReply::Reject {
            status: 500,
            message: "Out of stock".to_string(),
        });
        let form = OrderFormController::new(submitter, ToppingCatalog::default());
        form.set_field(Field::FullName, "Alice").unwrap();
        form.set_field(Field::Size, "S").unwrap();
        let before = form.draft();

        let result = form.submit().await.unwrap();
        assert_eq!(result, SubmitResult::Failure("Out of stock".to_string()));
        assert_eq!(*form.draft(), *before);
        assert!(!form.is_submit_enabled());
        assert!(form.validate_whole());

        // editing re-derives the flag
        form.set_field(Field::Size, "M").unwrap();
        assert!(form.is_submit_enabled());
    }

    struct SlowFirstValidator;

    #[async_trait]
    impl FieldValidator for SlowFirstValidator {
        async fn validate(&self, field: Field, value: &Value) -> Result<(), ValidationError> {
            // the short value resolves last
            if value.as_str().is_some_and(|s| s.chars().count() < 3) {
                tokio::time::sleep(Duration::from_millis(30)).await;
            }
            order_schema().validate_field(field, value)
        }
    }

    #[tokio::test]
    async fn test_late_stale_validation_does_not_overwrite_fresh_one() {
        let form = OrderFormController::with_validator(
            InMemoryOrderSubmitter::new(),
            SlowFirstValidator,
            ToppingCatalog::default(),
        );

        let stale = form.set_field(Field::FullName, "Al").unwrap();
        let fresh = form.set_field(Field::FullName, "Alice").unwrap();

        assert!(fresh.settled().await.unwrap());
        assert!(!stale.settled().await.unwrap());
        assert_eq!(form.errors().get(Field::FullName), Some(""));
        assert_eq!(form.draft().full_name, "Alice");
    }
}
