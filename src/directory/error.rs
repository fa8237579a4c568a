//! Error types for directory lookups.

use thiserror::Error;

/// Why a directory lookup could not give a definite answer.
///
/// None of these mean "the user does not exist"; that is
/// [`Lookup::NotFound`](super::Lookup::NotFound).
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// The configured base URL cannot have a username appended to it
    #[error("invalid directory base URL '{url}'")]
    InvalidBaseUrl {
        /// The rejected URL
        url: String,
    },

    /// The HTTP client could not be constructed
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// The request failed before a status was received, or timed out
    #[error("request to '{url}' failed: {source}")]
    Request {
        /// URL that was requested
        url: String,
        /// Underlying transport error
        #[source]
        source: reqwest::Error,
    },

    /// The directory answered with a status other than 2xx or 404
    #[error("directory responded with status {status}")]
    Status {
        /// HTTP status code
        status: u16,
    },

    /// A 2xx response whose body is not JSON
    #[error("directory returned a malformed body: {0}")]
    Body(#[from] serde_json::Error),
}
