//! Form model: field identifiers, the view model and trigger kinds
//!
//! The view model holds the current value of every field of the signup form.
//! It is never mutated in place; each interaction produces a new `ViewModel`
//! with exactly one field replaced.
//!
//! # Examples
//!
//! ```
//! use signup_validation::{Field, ViewModel};
//!
//! let vm = ViewModel::default().with_value(Field::Username, "octocat");
//! let next = vm.with_value(Field::Password, "hunter2");
//!
//! assert_eq!(vm.value(Field::Password), "");
//! assert_eq!(next.value(Field::Username), "octocat");
//! assert_eq!(next.value(Field::Password), "hunter2");
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::UnknownField;

/// A field of the signup form.
///
/// Fields are ordered by their position on the form, which is also the order
/// in which whole-form results are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Field {
    /// The requested account name
    #[serde(rename = "username")]
    Username,
    /// The chosen password
    #[serde(rename = "password")]
    Password,
    /// The password typed a second time
    #[serde(rename = "confirmPassword")]
    ConfirmPassword,
}

impl Field {
    /// Every field, in form order.
    pub const ALL: [Field; 3] = [Field::Username, Field::Password, Field::ConfirmPassword];

    /// The name the UI layer uses for this field.
    ///
    /// ```
    /// use signup_validation::Field;
    ///
    /// assert_eq!(Field::ConfirmPassword.name(), "confirmPassword");
    /// ```
    pub fn name(self) -> &'static str {
        match self {
            Field::Username => "username",
            Field::Password => "password",
            Field::ConfirmPassword => "confirmPassword",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for Field {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .into_iter()
            .find(|field| field.name() == s)
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}

/// The UI event that caused a validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Trigger {
    /// The input's value changed
    Change,
    /// The input lost focus
    Blur,
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trigger::Change => f.write_str("change"),
            Trigger::Blur => f.write_str("blur"),
        }
    }
}

/// Current values of all signup form fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ViewModel {
    /// Value of the `username` input
    pub username: String,
    /// Value of the `password` input
    pub password: String,
    /// Value of the `confirmPassword` input
    pub confirm_password: String,
}

impl ViewModel {
    /// Build a view model from all three values.
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        confirm_password: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            confirm_password: confirm_password.into(),
        }
    }

    /// Current value of `field`.
    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Username => &self.username,
            Field::Password => &self.password,
            Field::ConfirmPassword => &self.confirm_password,
        }
    }

    /// Return a copy of this view model with `field` replaced by `value`.
    ///
    /// The receiver is left untouched.
    #[must_use]
    pub fn with_value(&self, field: Field, value: impl Into<String>) -> Self {
        let mut next = self.clone();
        let slot = match field {
            Field::Username => &mut next.username,
            Field::Password => &mut next.password,
            Field::ConfirmPassword => &mut next.confirm_password,
        };
        *slot = value.into();
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_names_round_trip_through_from_str() {
        for field in Field::ALL {
            assert_eq!(field.name().parse::<Field>(), Ok(field));
        }
    }

    #[test]
    fn unknown_field_name_is_rejected() {
        let err = "email".parse::<Field>().unwrap_err();
        assert_eq!(err, UnknownField("email".to_string()));
        assert_eq!(err.to_string(), "unknown form field 'email'");
    }

    #[test]
    fn with_value_replaces_exactly_one_field() {
        let vm = ViewModel::new("octocat", "abcd", "abcd");
        let next = vm.with_value(Field::ConfirmPassword, "abcx");

        assert_eq!(next.username, "octocat");
        assert_eq!(next.password, "abcd");
        assert_eq!(next.confirm_password, "abcx");
        assert_eq!(vm.confirm_password, "abcd");
    }

    #[test]
    fn view_model_uses_ui_field_names_in_json() {
        let vm = ViewModel::new("octocat", "pw", "pw");
        let json = serde_json::to_value(&vm).unwrap();
        assert_eq!(json["confirmPassword"], "pw");

        let parsed: ViewModel = serde_json::from_str(r#"{"username":"a"}"#).unwrap();
        assert_eq!(parsed, ViewModel::new("a", "", ""));
    }

    #[test]
    fn trigger_display() {
        assert_eq!(Trigger::Change.to_string(), "change");
        assert_eq!(Trigger::Blur.to_string(), "blur");
    }
}
