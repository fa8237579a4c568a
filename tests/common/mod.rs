//! Shared test utilities and mock infrastructure.

#![allow(dead_code)]

pub mod mock_directory;

use std::net::TcpListener;
use std::time::Duration;

use signup_validation::directory::{DirectoryError, Lookup, UserDirectory};
use signup_validation::testing::StaticDirectory;

/// Find a port with nothing listening on it.
pub fn free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind to free port");
    listener.local_addr().unwrap().port()
}

/// A directory that answers like `StaticDirectory` after a fixed delay.
///
/// Intended for `#[tokio::test(start_paused = true)]`, where the delay costs
/// no wall-clock time.
#[derive(Debug)]
pub struct SlowDirectory {
    pub inner: StaticDirectory,
    pub delay: Duration,
}

impl SlowDirectory {
    pub fn new(inner: StaticDirectory, delay: Duration) -> Self {
        Self { inner, delay }
    }
}

impl UserDirectory for SlowDirectory {
    async fn lookup(&self, username: &str) -> Result<Lookup, DirectoryError> {
        tokio::time::sleep(self.delay).await;
        self.inner.lookup(username).await
    }
}
