//! Mock user directory server for testing the GitHub client.

#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, Response, StatusCode, Uri};
use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::Mutex;

/// A captured request for assertions.
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    /// Raw request path, still percent-encoded
    pub path: String,
    /// Decoded username segment
    pub username: String,
    pub user_agent: Option<String>,
}

/// A mock response to return.
#[derive(Debug, Clone)]
pub struct MockResponse {
    pub status: u16,
    pub body: Vec<u8>,
    pub delay_ms: u64,
}

impl MockResponse {
    pub fn user(login: &str) -> Self {
        Self {
            status: 200,
            body: format!(r#"{{"login": "{}", "id": 1}}"#, login).into_bytes(),
            delay_ms: 0,
        }
    }

    pub fn not_found() -> Self {
        Self {
            status: 404,
            body: br#"{"message": "Not Found"}"#.to_vec(),
            delay_ms: 0,
        }
    }

    pub fn error(status: u16) -> Self {
        Self {
            status,
            body: br#"{"message": "error"}"#.to_vec(),
            delay_ms: 0,
        }
    }

    pub fn malformed() -> Self {
        Self {
            status: 200,
            body: b"<html>not json</html>".to_vec(),
            delay_ms: 0,
        }
    }

    pub fn with_delay(mut self, ms: u64) -> Self {
        self.delay_ms = ms;
        self
    }
}

#[derive(Clone)]
struct MockState {
    requests: Arc<Mutex<Vec<CapturedRequest>>>,
    responses: Arc<Mutex<HashMap<String, MockResponse>>>,
}

/// Mock directory: `GET /users/{name}` answers with the response registered
/// for `name`, or 404 if none. `GET /users/` answers like GitHub's user
/// listing, with 200 and a JSON array.
pub struct MockDirectory {
    pub addr: SocketAddr,
    state: MockState,
    shutdown: tokio::sync::watch::Sender<bool>,
}

impl MockDirectory {
    /// Start a new mock directory server.
    pub async fn start() -> Self {
        let state = MockState {
            requests: Arc::new(Mutex::new(Vec::new())),
            responses: Arc::new(Mutex::new(HashMap::new())),
        };

        let (shutdown_tx, mut shutdown_rx) = tokio::sync::watch::channel(false);

        let app = Router::new()
            .route("/users/", get(handle_listing))
            .route("/users/{name}", get(handle_lookup))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock server");
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    let _ = shutdown_rx.changed().await;
                })
                .await
                .ok();
        });

        Self {
            addr,
            state,
            shutdown: shutdown_tx,
        }
    }

    /// Register the response for `username`.
    pub async fn respond(&self, username: &str, response: MockResponse) {
        self.state
            .responses
            .lock()
            .await
            .insert(username.to_string(), response);
    }

    /// Get all captured requests.
    pub async fn captured_requests(&self) -> Vec<CapturedRequest> {
        self.state.requests.lock().await.clone()
    }

    /// Base URL to configure the client with.
    pub fn base_url(&self) -> String {
        format!("http://{}/users/", self.addr)
    }
}

impl Drop for MockDirectory {
    fn drop(&mut self) {
        let _ = self.shutdown.send(true);
    }
}

async fn handle_listing(
    State(state): State<MockState>,
    uri: Uri,
    headers: HeaderMap,
) -> Response<Body> {
    state.requests.lock().await.push(CapturedRequest {
        path: uri.path().to_string(),
        username: String::new(),
        user_agent: headers
            .get("user-agent")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
    });

    Response::builder()
        .status(StatusCode::OK)
        .header("content-type", "application/json")
        .body(Body::from("[]"))
        .unwrap()
}

async fn handle_lookup(
    State(state): State<MockState>,
    Path(name): Path<String>,
    uri: Uri,
    headers: HeaderMap,
) -> Response<Body> {
    state.requests.lock().await.push(CapturedRequest {
        path: uri.path().to_string(),
        username: name.clone(),
        user_agent: headers
            .get("user-agent")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
    });

    let mock_resp = state
        .responses
        .lock()
        .await
        .get(&name)
        .cloned()
        .unwrap_or_else(MockResponse::not_found);

    if mock_resp.delay_ms > 0 {
        tokio::time::sleep(tokio::time::Duration::from_millis(mock_resp.delay_ms)).await;
    }

    Response::builder()
        .status(StatusCode::from_u16(mock_resp.status).unwrap())
        .header("content-type", "application/json")
        .body(Body::from(mock_resp.body))
        .unwrap()
}
