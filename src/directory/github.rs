//! GitHub-backed user directory.

use reqwest::{Client, StatusCode, Url};
use tracing::debug;

use super::{DirectoryError, Lookup, UserDirectory};
use crate::config::DirectoryConfig;

/// Looks usernames up with `GET {base_url}/{username}`.
///
/// A 2xx response with a JSON body means the user exists and 404 means it
/// does not. Any other status is a [`DirectoryError::Status`]. An empty
/// username is never sent: it would address the user listing itself.
#[derive(Debug, Clone)]
pub struct GitHubDirectory {
    client: Client,
    base_url: Url,
}

impl GitHubDirectory {
    /// Build a client from configuration.
    pub fn new(config: &DirectoryConfig) -> Result<Self, DirectoryError> {
        let base_url = Url::parse(&config.base_url).map_err(|_| DirectoryError::InvalidBaseUrl {
            url: config.base_url.clone(),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(DirectoryError::InvalidBaseUrl {
                url: config.base_url.clone(),
            });
        }

        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout())
            .build()
            .map_err(DirectoryError::Client)?;

        Ok(Self { client, base_url })
    }

    /// The URL that would be requested for `username`.
    ///
    /// The username becomes a single percent-encoded path segment, so it can
    /// never escape the base path.
    pub fn user_url(&self, username: &str) -> Result<Url, DirectoryError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| DirectoryError::InvalidBaseUrl {
                url: self.base_url.to_string(),
            })?
            .pop_if_empty()
            .push(username);
        Ok(url)
    }
}

impl UserDirectory for GitHubDirectory {
    async fn lookup(&self, username: &str) -> Result<Lookup, DirectoryError> {
        if username.is_empty() {
            return Ok(Lookup::NotFound);
        }
        let url = self.user_url(username)?;

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|source| DirectoryError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        debug!(%url, status = status.as_u16(), "directory lookup");

        if status == StatusCode::NOT_FOUND {
            return Ok(Lookup::NotFound);
        }
        if !status.is_success() {
            return Err(DirectoryError::Status {
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|source| DirectoryError::Request {
                url: url.to_string(),
                source,
            })?;
        serde_json::from_slice::<serde_json::Value>(&body)?;

        Ok(Lookup::Found)
    }
}
