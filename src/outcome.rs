//! Validation outcomes
//!
//! A failed rule is not an error: it is a normal negative result returned as
//! data. [`FieldOutcome`] reports the result of one rule, [`FormOutcome`] the
//! aggregate of a whole-form validation.
//!
//! # Examples
//!
//! ```
//! use signup_validation::{FieldOutcome, RuleKind};
//!
//! let ok = FieldOutcome::pass(RuleKind::Required);
//! assert!(ok.succeeded());
//! assert_eq!(ok.message(), "");
//!
//! let failed = FieldOutcome::fail(RuleKind::PasswordMatch, "Passwords do not match");
//! assert!(!failed.succeeded());
//! assert_eq!(failed.kind().code(), "PASSWORD_MATCH");
//! ```

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::form::Field;
use crate::validators::{PASSWORD_MISMATCH_MESSAGE, REQUIRED_MESSAGE, USERNAME_TAKEN_MESSAGE};

/// Identifies which rule produced an outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RuleKind {
    /// Value must not be blank
    Required,
    /// Value must reach a minimum length
    MinLength,
    /// Confirmation must equal the password
    PasswordMatch,
    /// Username must not already exist in the remote directory
    RemoteExists,
}

impl RuleKind {
    /// Stable code for this kind, as shown to the UI layer.
    pub fn code(self) -> &'static str {
        match self {
            RuleKind::Required => "REQUIRED",
            RuleKind::MinLength => "MIN_LENGTH",
            RuleKind::PasswordMatch => "PASSWORD_MATCH",
            RuleKind::RemoteExists => "REMOTE_EXISTS",
        }
    }

    fn fallback_message(self) -> &'static str {
        match self {
            RuleKind::Required => REQUIRED_MESSAGE,
            RuleKind::MinLength => "The value provided is too short.",
            RuleKind::PasswordMatch => PASSWORD_MISMATCH_MESSAGE,
            RuleKind::RemoteExists => USERNAME_TAKEN_MESSAGE,
        }
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.code())
    }
}

/// Result of running one rule against one field value.
///
/// The message is empty if and only if the outcome succeeded. Only the
/// constructors below can build one; it is serialize-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldOutcome {
    kind: RuleKind,
    succeeded: bool,
    message: String,
}

impl FieldOutcome {
    /// A passing outcome for `kind`.
    #[inline]
    pub fn pass(kind: RuleKind) -> Self {
        Self {
            kind,
            succeeded: true,
            message: String::new(),
        }
    }

    /// A failing outcome for `kind`.
    ///
    /// An empty `message` is replaced with a default message for the kind.
    pub fn fail(kind: RuleKind, message: impl Into<String>) -> Self {
        let mut message = message.into();
        if message.is_empty() {
            message = kind.fallback_message().to_string();
        }
        Self {
            kind,
            succeeded: false,
            message,
        }
    }

    /// Pass or fail depending on `ok`, using `message` on failure.
    #[inline]
    pub fn check(kind: RuleKind, ok: bool, message: impl FnOnce() -> String) -> Self {
        if ok {
            Self::pass(kind)
        } else {
            Self::fail(kind, message())
        }
    }

    /// The rule that produced this outcome.
    pub fn kind(&self) -> RuleKind {
        self.kind
    }

    /// Whether the rule was satisfied.
    pub fn succeeded(&self) -> bool {
        self.succeeded
    }

    /// The message to show next to the input; empty when passing.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Aggregate result of validating every field of the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormOutcome {
    succeeded: bool,
    field_outcomes: Vec<(Field, FieldOutcome)>,
}

impl FormOutcome {
    /// Build a form outcome from per-field results.
    ///
    /// Entries are put in form order; when a field appears more than once,
    /// its last entry is kept. `succeeded` is derived: it is true iff every
    /// remaining entry succeeded.
    pub fn new(field_outcomes: Vec<(Field, FieldOutcome)>) -> Self {
        let field_outcomes: Vec<_> = field_outcomes
            .into_iter()
            .collect::<BTreeMap<_, _>>()
            .into_iter()
            .collect();
        let succeeded = field_outcomes.iter().all(|(_, o)| o.succeeded());
        Self {
            succeeded,
            field_outcomes,
        }
    }

    /// True iff every field passed.
    pub fn succeeded(&self) -> bool {
        self.succeeded
    }

    /// Per-field results, in form order.
    pub fn field_outcomes(&self) -> &[(Field, FieldOutcome)] {
        &self.field_outcomes
    }

    /// The result reported for `field`, if it has any rules.
    pub fn outcome(&self, field: Field) -> Option<&FieldOutcome> {
        self.field_outcomes
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, o)| o)
    }

    /// Iterator over the failing entries only.
    pub fn failures(&self) -> impl Iterator<Item = &(Field, FieldOutcome)> {
        self.field_outcomes.iter().filter(|(_, o)| !o.succeeded())
    }
}
