//! Remote user directory lookups
//!
//! A [`UserDirectory`] answers one question: does an account with this name
//! already exist? Lookups return an explicit `Result`, so a transport failure
//! is never confused with a negative answer at this layer. Callers that need
//! a plain boolean use [`UserDirectory::exists`], which applies the
//! downgrade policy: an error counts as "not found" and is logged.
//!
//! # Example
//!
//! ```
//! use signup_validation::directory::{Lookup, UserDirectory};
//! use signup_validation::testing::StaticDirectory;
//!
//! # tokio_test::block_on(async {
//! let directory = StaticDirectory::with_users(["torvalds"]);
//!
//! assert_eq!(directory.lookup("torvalds").await.unwrap(), Lookup::Found);
//! assert!(!directory.exists("zzz-definitely-unused-zzz").await);
//! # });
//! ```

mod error;
mod github;

use std::future::Future;
use std::sync::Arc;

use tracing::warn;

pub use error::DirectoryError;
pub use github::GitHubDirectory;

/// Definite answer from a directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    /// An account with that name exists
    Found,
    /// No account with that name exists
    NotFound,
}

impl Lookup {
    /// True for [`Lookup::Found`].
    pub fn is_found(self) -> bool {
        matches!(self, Lookup::Found)
    }
}

/// A remote directory of existing user names.
pub trait UserDirectory: Send + Sync {
    /// Look `username` up.
    ///
    /// Implementations must not panic; every failure is an `Err`.
    fn lookup(
        &self,
        username: &str,
    ) -> impl Future<Output = Result<Lookup, DirectoryError>> + Send;

    /// Whether `username` is known to exist.
    ///
    /// Never fails: errors are downgraded to `false` (see [`downgrade`]).
    fn exists(&self, username: &str) -> impl Future<Output = bool> + Send {
        async move { downgrade(username, self.lookup(username).await).is_found() }
    }
}

/// Collapse a lookup result into a definite answer.
///
/// A [`DirectoryError`] is treated as [`Lookup::NotFound`] and logged at
/// `warn`. Transport problems therefore never block a signup; the directory
/// is expected to reject a duplicate account on its own.
pub fn downgrade(username: &str, result: Result<Lookup, DirectoryError>) -> Lookup {
    match result {
        Ok(lookup) => lookup,
        Err(error) => {
            warn!(username, %error, "directory lookup failed, treating user as not found");
            Lookup::NotFound
        }
    }
}

impl<D: UserDirectory> UserDirectory for Arc<D> {
    fn lookup(
        &self,
        username: &str,
    ) -> impl Future<Output = Result<Lookup, DirectoryError>> + Send {
        (**self).lookup(username)
    }
}

impl<D: UserDirectory> UserDirectory for &D {
    fn lookup(
        &self,
        username: &str,
    ) -> impl Future<Output = Result<Lookup, DirectoryError>> + Send {
        (**self).lookup(username)
    }
}
