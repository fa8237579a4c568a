//! # signup-validation
//!
//! Declarative, asynchronous field validation for a signup form.
//!
//! A static [`RulesTable`] maps each form [`Field`] to an ordered list of
//! validators, each optionally restricted to change or blur events. The
//! [`FormValidation`] engine runs the rules that apply to a UI event, or all
//! of them on submission, and returns outcomes as data. [`ErrorState::merge`]
//! folds those outcomes into per-field error state owned by the caller.
//!
//! ## Pure core, explicit I/O
//!
//! Every validator is a pure function except the username check, which
//! consults a [`UserDirectory`]. Directory lookups return an explicit
//! `Result`; the validator decides, visibly and with a log line, to treat a
//! failed lookup as "user not found".
//!
//! ## Quick Example
//!
//! ```rust
//! use signup_validation::testing::StaticDirectory;
//! use signup_validation::prelude::*;
//!
//! # tokio_test::block_on(async {
//! let engine = FormValidation::signup(
//!     &ValidationConfig::default(),
//!     StaticDirectory::with_users(["torvalds"]),
//! );
//!
//! // field-level, on blur
//! let vm = ViewModel::default();
//! let outcomes = engine
//!     .validate_field(&vm, Field::Username, "torvalds", Trigger::Blur)
//!     .await;
//! let errors = ErrorState::new().merge(Field::Username, engine.resolve(&outcomes).unwrap());
//! assert_eq!(errors.message(Field::Username), "This user exists on GitHub");
//!
//! // whole form, on submit
//! let form = engine.validate_form(&ViewModel::new("octocat", "abcd", "abcd")).await;
//! assert!(form.succeeded());
//! # });
//! ```
//!
//! Against the real GitHub API, use [`GitHubDirectory`]:
//!
//! ```rust,no_run
//! use signup_validation::prelude::*;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ValidationConfig::default();
//! let engine = FormValidation::signup(&config, GitHubDirectory::new(&config.directory)?);
//! let form = engine.validate_form(&ViewModel::new("torvalds", "abcd", "abcd")).await;
//! assert!(!form.succeeded());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod config;
pub mod directory;
pub mod engine;
pub mod error;
pub mod form;
pub mod outcome;
pub mod predicate;
pub mod rules;
pub mod state;
pub mod store;
pub mod testing;
pub mod validators;

// Re-exports
pub use config::{DirectoryConfig, ValidationConfig};
pub use directory::{DirectoryError, GitHubDirectory, Lookup, UserDirectory};
pub use engine::{Aggregation, FormValidation};
pub use error::{ConfigError, RulesError, UnknownField};
pub use form::{Field, Trigger, ViewModel};
pub use outcome::{FieldOutcome, FormOutcome, RuleKind};
pub use rules::{Rule, RulesTable, RulesTableBuilder, TriggerFilter, Validator};
pub use state::ErrorState;
pub use store::{reduce, FieldTicket, SignupAction, SignupState, SignupStore, Submission};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::{DirectoryConfig, ValidationConfig};
    pub use crate::directory::{GitHubDirectory, Lookup, UserDirectory};
    pub use crate::engine::{Aggregation, FormValidation};
    pub use crate::form::{Field, Trigger, ViewModel};
    pub use crate::outcome::{FieldOutcome, FormOutcome, RuleKind};
    pub use crate::rules::{RulesTable, TriggerFilter, Validator};
    pub use crate::state::ErrorState;
    pub use crate::store::{SignupStore, Submission};
}
