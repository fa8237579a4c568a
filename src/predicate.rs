//! String predicates used by the built-in validators
//!
//! A predicate is a pure check over a borrowed value. Validators pair a
//! predicate with a rule kind and a message to produce a [`FieldOutcome`].
//!
//! ```rust
//! use signup_validation::predicate::*;
//!
//! assert!(not_blank().check("octocat"));
//! assert!(!not_blank().check("   "));
//! assert!(len_min(4).check("abcd"));
//! assert!(!len_min(4).check("abc"));
//! ```
//!
//! [`FieldOutcome`]: crate::FieldOutcome

/// A pure check over values of type `T`.
pub trait Predicate<T: ?Sized>: Send + Sync {
    /// Check if the value satisfies this predicate.
    fn check(&self, value: &T) -> bool;
}

impl<T: ?Sized, F> Predicate<T> for F
where
    F: Fn(&T) -> bool + Send + Sync,
{
    #[inline]
    fn check(&self, value: &T) -> bool {
        self(value)
    }
}

/// Predicate that checks a string has non-whitespace content.
#[derive(Clone, Copy, Default, Debug)]
pub struct NotBlank;

impl Predicate<str> for NotBlank {
    #[inline]
    fn check(&self, value: &str) -> bool {
        !value.trim().is_empty()
    }
}

/// Create a predicate that rejects empty and whitespace-only strings.
pub fn not_blank() -> NotBlank {
    NotBlank
}

/// Predicate that checks a string has at least `min` characters.
///
/// Length is counted in Unicode scalar values, not bytes.
#[derive(Clone, Copy, Debug)]
pub struct LenMin {
    min: usize,
}

impl LenMin {
    /// The minimum accepted length.
    pub fn min(&self) -> usize {
        self.min
    }
}

impl Predicate<str> for LenMin {
    #[inline]
    fn check(&self, value: &str) -> bool {
        value.chars().count() >= self.min
    }
}

/// Create a predicate that checks string length is at least `min`.
pub fn len_min(min: usize) -> LenMin {
    LenMin { min }
}
