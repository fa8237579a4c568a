//! Per-field error state and the merge that updates it
//!
//! [`ErrorState`] records, for each field, the most recently merged outcome.
//! It is never mutated in place: [`ErrorState::merge`] returns a new state
//! that shares every untouched entry with the old one.
//!
//! ```
//! use signup_validation::{ErrorState, Field, FieldOutcome, RuleKind};
//!
//! let empty = ErrorState::new();
//! let state = empty.merge(Field::Password, FieldOutcome::fail(RuleKind::Required, "required"));
//!
//! assert_eq!(state.message(Field::Password), "required");
//! assert_eq!(state.message(Field::Username), "");
//! assert!(empty.get(Field::Password).is_none());
//! ```

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Serialize, Serializer};

use crate::form::Field;
use crate::outcome::{FieldOutcome, FormOutcome};

/// Latest validation outcome per field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorState {
    fields: BTreeMap<Field, Arc<FieldOutcome>>,
}

impl ErrorState {
    /// An empty state: nothing validated yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a new state with `field`'s entry replaced by `outcome`.
    #[must_use]
    pub fn merge(&self, field: Field, outcome: FieldOutcome) -> Self {
        let mut fields = self.fields.clone();
        fields.insert(field, Arc::new(outcome));
        Self { fields }
    }

    /// Merge every entry of a whole-form result, in order.
    #[must_use]
    pub fn merge_form(&self, form: &FormOutcome) -> Self {
        form.field_outcomes()
            .iter()
            .fold(self.clone(), |state, (field, outcome)| {
                state.merge(*field, outcome.clone())
            })
    }

    /// The stored outcome for `field`, if it has been validated.
    pub fn get(&self, field: Field) -> Option<&FieldOutcome> {
        self.fields.get(&field).map(Arc::as_ref)
    }

    /// The message to display next to `field`; empty when none.
    pub fn message(&self, field: Field) -> &str {
        self.get(field).map(FieldOutcome::message).unwrap_or("")
    }

    /// Whether any stored outcome is a failure.
    pub fn has_errors(&self) -> bool {
        self.fields.values().any(|outcome| !outcome.succeeded())
    }

    /// Whether nothing has been validated yet.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate over validated fields in form order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, &FieldOutcome)> {
        self.fields.iter().map(|(field, outcome)| (*field, outcome.as_ref()))
    }

    #[cfg(test)]
    fn shares_entry_with(&self, other: &ErrorState, field: Field) -> bool {
        match (self.fields.get(&field), other.fields.get(&field)) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl Serialize for ErrorState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}
