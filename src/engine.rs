//! The form validation engine
//!
//! [`FormValidation`] owns a [`RulesTable`] and a [`UserDirectory`]. It is
//! built once and passed to whoever handles UI events. It reads view model
//! snapshots and returns outcomes; it never touches error state.
//!
//! Within one call every selected rule runs to completion, concurrently, and
//! outcomes come back in rule-declaration order regardless of which rule
//! finished first.
//!
//! # Example
//!
//! ```
//! use signup_validation::testing::StaticDirectory;
//! use signup_validation::{Field, FormValidation, Trigger, ValidationConfig, ViewModel};
//!
//! # tokio_test::block_on(async {
//! let engine = FormValidation::signup(
//!     &ValidationConfig::default(),
//!     StaticDirectory::with_users(["torvalds"]),
//! );
//!
//! let vm = ViewModel::default();
//! let outcomes = engine
//!     .validate_field(&vm, Field::Username, "torvalds", Trigger::Blur)
//!     .await;
//! assert_eq!(outcomes.len(), 2);
//! assert!(outcomes[0].succeeded());
//! assert!(!outcomes[1].succeeded());
//!
//! let form = engine.validate_form(&ViewModel::new("octocat", "abcd", "abcd")).await;
//! assert!(form.succeeded());
//! # });
//! ```

use futures::future::join_all;
use tracing::{debug, debug_span, Instrument};

use crate::config::ValidationConfig;
use crate::directory::UserDirectory;
use crate::form::{Field, Trigger, ViewModel};
use crate::outcome::{FieldOutcome, FormOutcome};
use crate::rules::{Rule, RulesTable};

/// How a field's list of outcomes is reduced to the one that is displayed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Aggregation {
    /// The last failing outcome in declared order, or the last outcome if
    /// every rule passed.
    #[default]
    LastFailure,
    /// The last outcome in declared order, whether it passed or not.
    ///
    /// A passing later rule hides an earlier failure.
    LastOutcome,
}

impl Aggregation {
    /// Pick the representative outcome; `None` for an empty list.
    ///
    /// ```
    /// use signup_validation::{Aggregation, FieldOutcome, RuleKind};
    ///
    /// let outcomes = vec![
    ///     FieldOutcome::fail(RuleKind::Required, "required"),
    ///     FieldOutcome::pass(RuleKind::PasswordMatch),
    /// ];
    /// assert_eq!(Aggregation::LastFailure.resolve(&outcomes), Some(&outcomes[0]));
    /// assert_eq!(Aggregation::LastOutcome.resolve(&outcomes), Some(&outcomes[1]));
    /// ```
    pub fn resolve(self, outcomes: &[FieldOutcome]) -> Option<&FieldOutcome> {
        match self {
            Aggregation::LastOutcome => outcomes.last(),
            Aggregation::LastFailure => outcomes
                .iter()
                .rev()
                .find(|outcome| !outcome.succeeded())
                .or_else(|| outcomes.last()),
        }
    }
}

/// Runs rules from a [`RulesTable`] against view model snapshots.
#[derive(Debug, Clone)]
pub struct FormValidation<D> {
    rules: RulesTable,
    directory: D,
    aggregation: Aggregation,
}

impl<D: UserDirectory> FormValidation<D> {
    /// Create an engine over `rules`, using `directory` for remote checks.
    pub fn new(rules: RulesTable, directory: D) -> Self {
        Self {
            rules,
            directory,
            aggregation: Aggregation::default(),
        }
    }

    /// Create an engine over the standard signup rules.
    pub fn signup(config: &ValidationConfig, directory: D) -> Self {
        Self::new(RulesTable::signup(config), directory)
    }

    /// Use `aggregation` when reducing a field's outcomes.
    #[must_use]
    pub fn with_aggregation(mut self, aggregation: Aggregation) -> Self {
        self.aggregation = aggregation;
        self
    }

    /// The rules this engine runs.
    pub fn rules(&self) -> &RulesTable {
        &self.rules
    }

    /// The directory used for remote checks.
    pub fn directory(&self) -> &D {
        &self.directory
    }

    /// The configured aggregation policy.
    pub fn aggregation(&self) -> Aggregation {
        self.aggregation
    }

    /// Reduce a field's outcomes to the one to display.
    pub fn resolve(&self, outcomes: &[FieldOutcome]) -> Option<FieldOutcome> {
        self.aggregation.resolve(outcomes).cloned()
    }

    /// Validate one field after a UI event.
    ///
    /// Runs the rules of `field` whose trigger filter admits `trigger`.
    /// `value` is the field's new value; `view_model` provides the other
    /// fields. Returns one outcome per selected rule, in declared order.
    pub async fn validate_field(
        &self,
        view_model: &ViewModel,
        field: Field,
        value: &str,
        trigger: Trigger,
    ) -> Vec<FieldOutcome> {
        let span = debug_span!("validate_field", %field, %trigger);
        async move {
            let outcomes = self
                .run_rules(self.rules.applicable(field, trigger), value, view_model)
                .await;
            debug!(
                rules = outcomes.len(),
                failed = outcomes.iter().filter(|o| !o.succeeded()).count(),
                "field validated"
            );
            outcomes
        }
        .instrument(span)
        .await
    }

    /// Validate every field of `view_model`, ignoring trigger filters.
    ///
    /// All fields are validated concurrently. The result has one entry per
    /// field that has rules, in form order, each chosen by the aggregation
    /// policy.
    pub async fn validate_form(&self, view_model: &ViewModel) -> FormOutcome {
        async move {
            let fields: Vec<Field> = self.rules.fields().collect();
            let per_field = join_all(fields.iter().map(|&field| {
                self.run_rules(
                    self.rules.rules_for(field).iter(),
                    view_model.value(field),
                    view_model,
                )
            }))
            .await;

            let field_outcomes = fields
                .into_iter()
                .zip(per_field)
                .filter_map(|(field, outcomes)| {
                    self.resolve(&outcomes).map(|outcome| (field, outcome))
                })
                .collect();
            let form = FormOutcome::new(field_outcomes);
            debug!(
                succeeded = form.succeeded(),
                failed = form.failures().count(),
                "form validated"
            );
            form
        }
        .instrument(debug_span!("validate_form"))
        .await
    }

    async fn run_rules<'a>(
        &self,
        rules: impl Iterator<Item = &'a Rule>,
        value: &str,
        view_model: &ViewModel,
    ) -> Vec<FieldOutcome> {
        join_all(
            rules.map(|rule| rule.validator.run(value, view_model, &self.directory)),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outcome::RuleKind;
    use crate::rules::Validator;
    use crate::testing::StaticDirectory;
    use crate::validators::{PASSWORD_MISMATCH_MESSAGE, REQUIRED_MESSAGE};

    fn engine() -> FormValidation<StaticDirectory> {
        FormValidation::signup(
            &ValidationConfig::default(),
            StaticDirectory::with_users(["torvalds"]),
        )
    }

    fn kinds(outcomes: &[FieldOutcome]) -> Vec<RuleKind> {
        outcomes.iter().map(FieldOutcome::kind).collect()
    }

    #[tokio::test]
    async fn change_on_username_skips_remote_rule() {
        let engine = engine();
        let outcomes = engine
            .validate_field(&ViewModel::default(), Field::Username, "torvalds", Trigger::Change)
            .await;

        assert_eq!(kinds(&outcomes), vec![RuleKind::Required]);
        assert_eq!(engine.directory().lookups(), 0);
    }

    #[tokio::test]
    async fn blur_on_username_runs_both_rules_in_order() {
        let engine = engine();
        let outcomes = engine
            .validate_field(&ViewModel::default(), Field::Username, "torvalds", Trigger::Blur)
            .await;

        assert_eq!(kinds(&outcomes), vec![RuleKind::Required, RuleKind::RemoteExists]);
        assert!(outcomes[0].succeeded());
        assert!(!outcomes[1].succeeded());
        assert_eq!(engine.directory().lookups(), 1);
    }

    #[tokio::test]
    async fn no_short_circuit_after_failure() {
        let engine = engine();
        let outcomes = engine
            .validate_field(&ViewModel::default(), Field::Password, "", Trigger::Change)
            .await;

        assert_eq!(kinds(&outcomes), vec![RuleKind::Required, RuleKind::MinLength]);
        assert!(outcomes.iter().all(|o| !o.succeeded()));
    }

    #[tokio::test]
    async fn confirm_password_reads_password_from_view_model() {
        let engine = engine();
        let vm = ViewModel::new("", "abcd", "");

        let ok = engine
            .validate_field(&vm, Field::ConfirmPassword, "abcd", Trigger::Change)
            .await;
        assert!(ok.iter().all(FieldOutcome::succeeded));

        let bad = engine
            .validate_field(&vm, Field::ConfirmPassword, "abcx", Trigger::Change)
            .await;
        assert_eq!(
            bad[1],
            FieldOutcome::fail(RuleKind::PasswordMatch, PASSWORD_MISMATCH_MESSAGE)
        );
    }

    #[tokio::test]
    async fn validate_form_ignores_filters() {
        let engine = engine();
        let form = engine
            .validate_form(&ViewModel::new("torvalds", "abcd", "abcd"))
            .await;

        assert!(!form.succeeded());
        assert_eq!(engine.directory().lookups(), 1);
        assert_eq!(
            form.outcome(Field::Username).map(FieldOutcome::kind),
            Some(RuleKind::RemoteExists)
        );
    }

    #[tokio::test]
    async fn validate_form_reports_each_field_once_in_form_order() {
        let engine = engine();
        let form = engine.validate_form(&ViewModel::new("", "abcd", "abcd")).await;

        let fields: Vec<Field> = form.field_outcomes().iter().map(|(f, _)| *f).collect();
        assert_eq!(fields, Field::ALL.to_vec());

        let failures: Vec<_> = form.failures().collect();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].0, Field::Username);
        assert_eq!(failures[0].1.message(), REQUIRED_MESSAGE);
    }

    #[tokio::test]
    async fn last_outcome_policy_lets_a_later_pass_hide_a_failure() {
        // blank confirmation that still equals a blank password
        let vm = ViewModel::new("octocat", "", "");

        let strict = engine().validate_form(&vm).await;
        assert_eq!(
            strict.outcome(Field::ConfirmPassword).map(FieldOutcome::kind),
            Some(RuleKind::Required)
        );

        let literal = engine()
            .with_aggregation(Aggregation::LastOutcome)
            .validate_form(&vm)
            .await;
        let confirm = literal.outcome(Field::ConfirmPassword).unwrap();
        assert!(confirm.succeeded());
        assert_eq!(confirm.kind(), RuleKind::PasswordMatch);
    }

    #[tokio::test]
    async fn fields_without_rules_are_absent_from_form_outcome() {
        let rules = RulesTable::builder()
            .rule(Field::Password, Validator::Required)
            .build()
            .unwrap();
        let engine = FormValidation::new(rules, StaticDirectory::default());

        let form = engine.validate_form(&ViewModel::default()).await;
        assert_eq!(form.field_outcomes().len(), 1);
        assert_eq!(form.field_outcomes()[0].0, Field::Password);

        let outcomes = engine
            .validate_field(&ViewModel::default(), Field::Username, "x", Trigger::Blur)
            .await;
        assert!(outcomes.is_empty());
        assert_eq!(engine.resolve(&outcomes), None);
    }

    #[test]
    fn aggregation_resolves_last_failure() {
        let outcomes = vec![
            FieldOutcome::fail(RuleKind::Required, "a"),
            FieldOutcome::fail(RuleKind::MinLength, "b"),
            FieldOutcome::pass(RuleKind::PasswordMatch),
        ];
        assert_eq!(
            Aggregation::LastFailure.resolve(&outcomes).map(FieldOutcome::kind),
            Some(RuleKind::MinLength)
        );
        assert_eq!(
            Aggregation::LastOutcome.resolve(&outcomes).map(FieldOutcome::kind),
            Some(RuleKind::PasswordMatch)
        );
        assert_eq!(Aggregation::LastFailure.resolve(&[]), None);
    }

    #[test]
    fn aggregation_all_passing_picks_last() {
        let outcomes = vec![
            FieldOutcome::pass(RuleKind::Required),
            FieldOutcome::pass(RuleKind::MinLength),
        ];
        assert_eq!(
            Aggregation::LastFailure.resolve(&outcomes),
            Some(&FieldOutcome::pass(RuleKind::MinLength))
        );
    }
}
