//! Field validators
//!
//! Each validator turns a field value (and, where needed, the rest of the
//! view model) into a [`FieldOutcome`]. The synchronous ones are pure; the
//! remote one performs exactly one directory lookup and never fails.
//!
//! ```
//! use signup_validation::validators::{min_length, passwords_match, required};
//! use signup_validation::ViewModel;
//!
//! assert!(!required("   ").succeeded());
//! assert!(min_length("abcd", 4).succeeded());
//!
//! let vm = ViewModel::new("octocat", "abcd", "");
//! assert!(passwords_match("abcd", &vm).succeeded());
//! assert!(!passwords_match("abcx", &vm).succeeded());
//! ```

use crate::directory::{downgrade, UserDirectory};
use crate::form::ViewModel;
use crate::outcome::{FieldOutcome, RuleKind};
use crate::predicate::{len_min, not_blank, Predicate};

/// Message shown when a required field is blank.
pub const REQUIRED_MESSAGE: &str = "Please fill in this mandatory field.";

/// Message shown when the confirmation differs from the password.
pub const PASSWORD_MISMATCH_MESSAGE: &str = "Passwords do not match";

/// Message shown when the username is already registered.
pub const USERNAME_TAKEN_MESSAGE: &str = "This user exists on GitHub";

/// Succeeds iff `value` has non-whitespace content.
pub fn required(value: &str) -> FieldOutcome {
    FieldOutcome::check(RuleKind::Required, not_blank().check(value), || {
        REQUIRED_MESSAGE.to_string()
    })
}

/// Succeeds iff `value` is at least `min` characters long.
pub fn min_length(value: &str, min: usize) -> FieldOutcome {
    FieldOutcome::check(RuleKind::MinLength, len_min(min).check(value), || {
        format!("The value provided must be at least {min} characters long.")
    })
}

/// Succeeds iff `value` equals the view model's password.
pub fn passwords_match(value: &str, view_model: &ViewModel) -> FieldOutcome {
    FieldOutcome::check(RuleKind::PasswordMatch, value == view_model.password, || {
        PASSWORD_MISMATCH_MESSAGE.to_string()
    })
}

/// Succeeds iff `directory` reports that `value` is not taken.
///
/// A failed lookup is downgraded to "not found", so this outcome passes when
/// the directory is unreachable.
pub async fn remote_username_available<D: UserDirectory>(value: &str, directory: &D) -> FieldOutcome {
    let lookup = downgrade(value, directory.lookup(value).await);
    FieldOutcome::check(RuleKind::RemoteExists, !lookup.is_found(), || {
        USERNAME_TAKEN_MESSAGE.to_string()
    })
}
