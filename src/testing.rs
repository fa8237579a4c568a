//! Testing utilities
//!
//! [`StaticDirectory`] is an in-memory [`UserDirectory`] with fixed answers,
//! useful for exercising the engine without a network. The assertion macros
//! give readable failures for [`FieldOutcome`]s.
//!
//! ```rust
//! use signup_validation::testing::StaticDirectory;
//! use signup_validation::{assert_fails, assert_passes, validators, RuleKind};
//!
//! # tokio_test::block_on(async {
//! let directory = StaticDirectory::with_users(["torvalds"]);
//!
//! assert_fails!(
//!     validators::remote_username_available("torvalds", &directory).await,
//!     RuleKind::RemoteExists
//! );
//! assert_passes!(validators::remote_username_available("octocat", &directory).await);
//! # });
//! ```
//!
//! [`FieldOutcome`]: crate::FieldOutcome

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::directory::{DirectoryError, Lookup, UserDirectory};

/// In-memory directory with a fixed set of existing users.
///
/// Names registered with [`failing_for`](Self::failing_for) answer with a
/// 503 [`DirectoryError::Status`], standing in for an unreachable service.
#[derive(Debug, Default)]
pub struct StaticDirectory {
    users: HashSet<String>,
    failing: HashSet<String>,
    lookups: AtomicUsize,
}

impl StaticDirectory {
    /// A directory in which exactly `users` exist.
    pub fn with_users<I, S>(users: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            users: users.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Make lookups of `names` fail with a transport error.
    #[must_use]
    pub fn failing_for<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.failing.extend(names.into_iter().map(Into::into));
        self
    }

    /// Number of lookups performed so far.
    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

impl UserDirectory for StaticDirectory {
    async fn lookup(&self, username: &str) -> Result<Lookup, DirectoryError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        if self.failing.contains(username) {
            return Err(DirectoryError::Status { status: 503 });
        }
        if self.users.contains(username) {
            Ok(Lookup::Found)
        } else {
            Ok(Lookup::NotFound)
        }
    }
}

/// Assert that a field outcome succeeded.
///
/// # Example
///
/// ```rust
/// use signup_validation::{assert_passes, validators};
///
/// assert_passes!(validators::required("octocat"));
/// ```
#[macro_export]
macro_rules! assert_passes {
    ($outcome:expr) => {{
        let outcome: $crate::FieldOutcome = $outcome;
        if !outcome.succeeded() {
            panic!(
                "Expected {} to pass, got failure: {:?}",
                outcome.kind(),
                outcome.message()
            );
        }
    }};
}

/// Assert that a field outcome failed, optionally with a given kind.
///
/// # Example
///
/// ```rust
/// use signup_validation::{assert_fails, validators, RuleKind};
///
/// assert_fails!(validators::required(""));
/// assert_fails!(validators::min_length("abc", 4), RuleKind::MinLength);
/// ```
#[macro_export]
macro_rules! assert_fails {
    ($outcome:expr) => {{
        let outcome: $crate::FieldOutcome = $outcome;
        if outcome.succeeded() {
            panic!("Expected {} to fail, got success", outcome.kind());
        }
    }};
    ($outcome:expr, $kind:expr) => {{
        let outcome: $crate::FieldOutcome = $outcome;
        $crate::assert_fails!(outcome.clone());
        assert_eq!(outcome.kind(), $kind, "failure came from an unexpected rule");
    }};
}
