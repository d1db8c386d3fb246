//! Fake Typesense search server for integration tests.
//!
//! Spins up a minimal `axum` HTTP server on a random TCP port bound to
//! 127.0.0.1. Serves:
//! - `GET /collections/{collection}/documents/search`: replies with the
//!   configured status and body, and records what it was asked.
//!
//! Replies can be delayed per query text (`q`) so tests can make an older
//! search resolve after a newer one.
//!
//! # Example
//!
//! ```rust,no_run
//! # async fn demo() {
//! use common::fake_typesense::FakeTypesense;
//!
//! let server = FakeTypesense::start().await.unwrap();
//! server.respond(200, r#"{"hits":[]}"#).await;
//!
//! // Point the client at server.endpoint("key")
//! let endpoint = server.endpoint("key");
//! # }
//! ```

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::get,
    Router,
};
use sift_core::config::SearchEndpoint;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::Mutex;

/// One request as the server saw it.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub collection: String,
    pub params: HashMap<String, String>,
    pub api_key: Option<String>,
}

struct ServerState {
    status: u16,
    body: String,
    /// Per-`q` reply bodies; falls back to `body`.
    bodies: HashMap<String, String>,
    /// Per-`q` reply delays.
    delays: HashMap<String, Duration>,
    requests: Vec<RecordedRequest>,
}

impl Default for ServerState {
    fn default() -> Self {
        Self {
            status: 200,
            body: r#"{"found":0,"hits":[]}"#.to_string(),
            bodies: HashMap::new(),
            delays: HashMap::new(),
            requests: Vec::new(),
        }
    }
}

type Shared = Arc<Mutex<ServerState>>;

/// Handle to the running fake search server.
pub struct FakeTypesense {
    addr: SocketAddr,
    state: Shared,
}

impl FakeTypesense {
    /// Start the server on a random port. Returns once it is listening.
    pub async fn start() -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let state: Shared = Arc::default();

        let app = Router::new()
            .route("/collections/{collection}/documents/search", get(search))
            .with_state(state.clone());

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Ok(Self { addr, state })
    }

    /// Base URL for the server (e.g. `http://127.0.0.1:PORT`).
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Endpoint for the default `suppliers` collection on this server.
    pub fn endpoint(&self, api_key: &str) -> SearchEndpoint {
        SearchEndpoint::new(self.base_url(), api_key, "suppliers").unwrap()
    }

    /// Reply to every search with `status` and `body`.
    pub async fn respond(&self, status: u16, body: impl Into<String>) {
        let mut state = self.state.lock().await;
        state.status = status;
        state.body = body.into();
    }

    /// Reply to searches for `q` with `body` instead of the default.
    pub async fn respond_to(&self, q: &str, body: impl Into<String>) {
        self.state.lock().await.bodies.insert(q.to_string(), body.into());
    }

    /// Hold replies to searches for `q` for `delay`.
    pub async fn delay(&self, q: &str, delay: Duration) {
        self.state.lock().await.delays.insert(q.to_string(), delay);
    }

    /// Every request received so far, in arrival order.
    pub async fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().await.requests.clone()
    }
}

// ---------------------------------------------------------------------------
// Route handlers
// ---------------------------------------------------------------------------

async fn search(
    Path(collection): Path<String>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
    State(state): State<Shared>,
) -> impl IntoResponse {
    let q = params.get("q").cloned().unwrap_or_default();
    let (status, body, delay) = {
        let mut state = state.lock().await;
        state.requests.push(RecordedRequest {
            collection,
            api_key: headers
                .get("x-typesense-api-key")
                .and_then(|v| v.to_str().ok())
                .map(str::to_string),
            params,
        });
        let body = state.bodies.get(&q).unwrap_or(&state.body).clone();
        (state.status, body, state.delays.get(&q).copied())
    };

    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }

    let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, body)
}
