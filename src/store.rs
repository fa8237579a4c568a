//! Signup form state and the reducer that updates it
//!
//! The store owns the [`ViewModel`] and the [`ErrorState`]. UI events become
//! [`SignupAction`]s, and [`reduce`] folds each action into a new
//! [`SignupState`]. The validation engine is passed in by the caller. The
//! store never owns it.
//!
//! # Request fencing
//!
//! A field can be validated again before an earlier validation of the same
//! field has finished; a slow remote lookup makes this common. Every
//! interaction therefore gets a [`FieldTicket`] carrying a per-field
//! generation, and a result is merged only if its ticket is still the
//! field's latest. Older results are dropped.
//!
//! # Example
//!
//! ```
//! use signup_validation::testing::StaticDirectory;
//! use signup_validation::{Field, FormValidation, SignupStore, Submission, Trigger, ValidationConfig};
//!
//! # tokio_test::block_on(async {
//! let engine = FormValidation::signup(&ValidationConfig::default(), StaticDirectory::default());
//! let mut store = SignupStore::new();
//!
//! store.interact(&engine, Field::Username, "octocat", Trigger::Blur).await;
//! store.interact(&engine, Field::Password, "abc", Trigger::Change).await;
//! assert!(!store.state().errors.message(Field::Password).is_empty());
//!
//! store.interact(&engine, Field::Password, "abcd", Trigger::Change).await;
//! store.interact(&engine, Field::ConfirmPassword, "abcd", Trigger::Change).await;
//!
//! assert!(matches!(store.submit(&engine).await, Submission::Accepted(_)));
//! # });
//! ```

use std::collections::BTreeMap;

use tracing::{debug, info};

use crate::directory::UserDirectory;
use crate::engine::FormValidation;
use crate::form::{Field, Trigger, ViewModel};
use crate::outcome::{FieldOutcome, FormOutcome};
use crate::state::ErrorState;

/// Identifies one interaction with one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldTicket {
    field: Field,
    generation: u64,
}

impl FieldTicket {
    /// The field this interaction concerns.
    pub fn field(&self) -> Field {
        self.field
    }

    /// Position of this interaction among the field's interactions.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Everything the signup form renders from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignupState {
    /// Current field values
    pub view_model: ViewModel,
    /// Latest outcome per field
    pub errors: ErrorState,
    generations: BTreeMap<Field, u64>,
}

impl SignupState {
    /// Generation of the latest interaction with `field` (0 if none).
    pub fn generation(&self, field: Field) -> u64 {
        self.generations.get(&field).copied().unwrap_or(0)
    }

    /// Whether `ticket` is the latest interaction with its field.
    pub fn is_current(&self, ticket: FieldTicket) -> bool {
        self.generation(ticket.field) == ticket.generation
    }
}

/// State transitions of the signup form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignupAction {
    /// The user edited or left a field; its value is replaced
    InteractionStarted {
        /// Field that was interacted with
        field: Field,
        /// Its new value
        value: String,
    },
    /// A field validation finished
    InteractionCompleted {
        /// Ticket issued when the interaction started
        ticket: FieldTicket,
        /// Outcome to display; `None` when no rule applied
        outcome: Option<FieldOutcome>,
    },
    /// Whole-form validation for a signup request finished
    SignupRequestCompleted(FormOutcome),
}

/// Fold `action` into `state`, returning the new state.
pub fn reduce(state: &SignupState, action: SignupAction) -> SignupState {
    match action {
        SignupAction::InteractionStarted { field, value } => {
            let mut generations = state.generations.clone();
            *generations.entry(field).or_insert(0) += 1;
            SignupState {
                view_model: state.view_model.with_value(field, value),
                errors: state.errors.clone(),
                generations,
            }
        }
        SignupAction::InteractionCompleted { ticket, outcome } => {
            if !state.is_current(ticket) {
                debug!(
                    field = %ticket.field,
                    generation = ticket.generation,
                    latest = state.generation(ticket.field),
                    "dropping stale validation result"
                );
                return state.clone();
            }
            match outcome {
                Some(outcome) => SignupState {
                    errors: state.errors.merge(ticket.field, outcome),
                    ..state.clone()
                },
                None => state.clone(),
            }
        }
        SignupAction::SignupRequestCompleted(form) => SignupState {
            errors: state.errors.merge_form(&form),
            ..state.clone()
        },
    }
}

/// Result of a signup attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// Every field passed; carries the submitted values
    Accepted(ViewModel),
    /// At least one field failed; carries the full result
    Rejected(FormOutcome),
}

/// Owns the signup state and applies actions to it.
#[derive(Debug, Clone, Default)]
pub struct SignupStore {
    state: SignupState,
}

impl SignupStore {
    /// A store for a freshly mounted form.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current state.
    pub fn state(&self) -> &SignupState {
        &self.state
    }

    /// Apply one action.
    pub fn dispatch(&mut self, action: SignupAction) {
        self.state = reduce(&self.state, action);
    }

    /// Record a new value for `field` and issue a ticket for validating it.
    pub fn begin(&mut self, field: Field, value: impl Into<String>) -> FieldTicket {
        self.dispatch(SignupAction::InteractionStarted {
            field,
            value: value.into(),
        });
        FieldTicket {
            field,
            generation: self.state.generation(field),
        }
    }

    /// Merge the outcomes of the validation started with `ticket`.
    ///
    /// Returns `false` if the ticket was stale and nothing was merged.
    pub fn complete<D: UserDirectory>(
        &mut self,
        ticket: FieldTicket,
        outcomes: &[FieldOutcome],
        engine: &FormValidation<D>,
    ) -> bool {
        let current = self.state.is_current(ticket);
        self.dispatch(SignupAction::InteractionCompleted {
            ticket,
            outcome: engine.resolve(outcomes),
        });
        current
    }

    /// Handle one UI event end to end: record, validate, merge.
    pub async fn interact<D: UserDirectory>(
        &mut self,
        engine: &FormValidation<D>,
        field: Field,
        value: impl Into<String>,
        trigger: Trigger,
    ) -> Vec<FieldOutcome> {
        let value = value.into();
        let ticket = self.begin(field, value.clone());
        let view_model = self.state.view_model.clone();
        let outcomes = engine
            .validate_field(&view_model, field, &value, trigger)
            .await;
        self.complete(ticket, &outcomes, engine);
        outcomes
    }

    /// Validate the whole form and decide whether signup may proceed.
    ///
    /// Errors for every field are merged either way.
    pub async fn submit<D: UserDirectory>(&mut self, engine: &FormValidation<D>) -> Submission {
        let view_model = self.state.view_model.clone();
        let form = engine.validate_form(&view_model).await;
        self.dispatch(SignupAction::SignupRequestCompleted(form.clone()));

        if form.succeeded() {
            info!(username = %view_model.username, "sign up completed");
            Submission::Accepted(view_model)
        } else {
            debug!(failed = form.failures().count(), "sign up rejected");
            Submission::Rejected(form)
        }
    }
}
