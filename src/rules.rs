//! Declarative validation rules
//!
//! A [`RulesTable`] maps each [`Field`] to an ordered list of [`Rule`]s. A rule
//! pairs a [`Validator`] with an optional [`TriggerFilter`] that restricts the
//! UI events it runs on. Rules without a filter run on every event.
//!
//! # Example
//!
//! ```
//! use signup_validation::{Field, RulesTable, Trigger, TriggerFilter, Validator};
//!
//! let table = RulesTable::builder()
//!     .rule(Field::Password, Validator::Required)
//!     .rule(Field::Password, Validator::MinLength(4))
//!     .rule_on(Field::Username, Validator::RemoteAvailable, TriggerFilter::BLUR)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(table.rules_for(Field::Password).len(), 2);
//! assert_eq!(table.applicable(Field::Username, Trigger::Change).count(), 0);
//! assert_eq!(table.applicable(Field::Username, Trigger::Blur).count(), 1);
//! ```

use std::collections::BTreeMap;

use crate::config::ValidationConfig;
use crate::directory::UserDirectory;
use crate::error::RulesError;
use crate::form::{Field, Trigger, ViewModel};
use crate::outcome::{FieldOutcome, RuleKind};
use crate::validators;

/// The built-in validators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Validator {
    /// Value must have non-whitespace content
    Required,
    /// Value must have at least this many characters
    MinLength(usize),
    /// Value must equal the view model's password
    PasswordsMatch,
    /// Value must not be an existing user in the directory
    RemoteAvailable,
}

impl Validator {
    /// The kind of outcome this validator produces.
    pub fn kind(self) -> RuleKind {
        match self {
            Validator::Required => RuleKind::Required,
            Validator::MinLength(_) => RuleKind::MinLength,
            Validator::PasswordsMatch => RuleKind::PasswordMatch,
            Validator::RemoteAvailable => RuleKind::RemoteExists,
        }
    }

    /// Whether running this validator may suspend on I/O.
    pub fn is_async(self) -> bool {
        matches!(self, Validator::RemoteAvailable)
    }

    /// Run the validator against `value`.
    pub async fn run<D: UserDirectory>(
        self,
        value: &str,
        view_model: &ViewModel,
        directory: &D,
    ) -> FieldOutcome {
        match self {
            Validator::Required => validators::required(value),
            Validator::MinLength(min) => validators::min_length(value, min),
            Validator::PasswordsMatch => validators::passwords_match(value, view_model),
            Validator::RemoteAvailable => {
                validators::remote_username_available(value, directory).await
            }
        }
    }
}

/// The set of triggers a rule runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TriggerFilter {
    /// Run when the value changes
    pub on_change: bool,
    /// Run when the input loses focus
    pub on_blur: bool,
}

impl TriggerFilter {
    /// Change events only.
    pub const CHANGE: TriggerFilter = TriggerFilter {
        on_change: true,
        on_blur: false,
    };

    /// Blur events only.
    pub const BLUR: TriggerFilter = TriggerFilter {
        on_change: false,
        on_blur: true,
    };

    /// Both change and blur events.
    pub const ALL: TriggerFilter = TriggerFilter {
        on_change: true,
        on_blur: true,
    };

    /// Whether this filter lets `trigger` through.
    #[inline]
    pub fn matches(self, trigger: Trigger) -> bool {
        match trigger {
            Trigger::Change => self.on_change,
            Trigger::Blur => self.on_blur,
        }
    }

    fn is_empty(self) -> bool {
        !self.on_change && !self.on_blur
    }
}

/// One validator bound to a field, with an optional trigger filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    /// What to check
    pub validator: Validator,
    /// When to check it; `None` means on every trigger
    pub filter: Option<TriggerFilter>,
}

impl Rule {
    /// Whether this rule runs for `trigger`.
    #[inline]
    pub fn applies_to(&self, trigger: Trigger) -> bool {
        self.filter.is_none_or(|filter| filter.matches(trigger))
    }
}

/// Ordered rules for every field of the form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RulesTable {
    rules: BTreeMap<Field, Vec<Rule>>,
}

impl RulesTable {
    /// Start building a table.
    pub fn builder() -> RulesTableBuilder {
        RulesTableBuilder::default()
    }

    /// The standard signup table.
    ///
    /// | field | rules |
    /// |---|---|
    /// | password | required, min length |
    /// | confirmPassword | required, passwords match |
    /// | username | required (change, blur), remote available (blur) |
    pub fn signup(config: &ValidationConfig) -> Self {
        let builder = RulesTable::builder()
            .rule(Field::Password, Validator::Required)
            .rule(
                Field::Password,
                Validator::MinLength(config.password_min_length),
            )
            .rule(Field::ConfirmPassword, Validator::Required)
            .rule(Field::ConfirmPassword, Validator::PasswordsMatch)
            .rule_on(Field::Username, Validator::Required, TriggerFilter::ALL)
            .rule_on(
                Field::Username,
                Validator::RemoteAvailable,
                TriggerFilter::BLUR,
            );
        Self {
            rules: builder.rules,
        }
    }

    /// Every rule for `field`, in declared order.
    pub fn rules_for(&self, field: Field) -> &[Rule] {
        self.rules.get(&field).map(Vec::as_slice).unwrap_or_default()
    }

    /// The rules for `field` that run on `trigger`, in declared order.
    pub fn applicable(&self, field: Field, trigger: Trigger) -> impl Iterator<Item = &Rule> {
        self.rules_for(field)
            .iter()
            .filter(move |rule| rule.applies_to(trigger))
    }

    /// Fields that have at least one rule, in form order.
    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.rules.keys().copied()
    }
}

/// Builder for [`RulesTable`].
#[derive(Debug, Clone, Default)]
pub struct RulesTableBuilder {
    rules: BTreeMap<Field, Vec<Rule>>,
}

impl RulesTableBuilder {
    /// Append an unfiltered rule to `field`.
    #[must_use]
    pub fn rule(self, field: Field, validator: Validator) -> Self {
        self.push(field, Rule {
            validator,
            filter: None,
        })
    }

    /// Append a rule to `field` that only runs for triggers in `filter`.
    #[must_use]
    pub fn rule_on(self, field: Field, validator: Validator, filter: TriggerFilter) -> Self {
        self.push(field, Rule {
            validator,
            filter: Some(filter),
        })
    }

    fn push(mut self, field: Field, rule: Rule) -> Self {
        self.rules.entry(field).or_default().push(rule);
        self
    }

    /// Finish the table, rejecting rules that could never run.
    pub fn build(self) -> Result<RulesTable, RulesError> {
        for (field, rules) in &self.rules {
            if let Some(rule) = rules
                .iter()
                .find(|rule| rule.filter.is_some_and(TriggerFilter::is_empty))
            {
                return Err(RulesError::EmptyTriggerFilter {
                    field: *field,
                    kind: rule.validator.kind(),
                });
            }
        }
        Ok(RulesTable { rules: self.rules })
    }
}
