//! In-process fake of the FinTrack backend.
//!
//! Every request is recorded; responses come from a table of canned
//! `(method, path) -> (status, json)` entries. Unknown routes answer 404.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use fintrack_client::ApiClient;
use fintrack_shared::AppConfig;
use fintrack_shared::config::RouteStyle;
use serde_json::{Value, json};

/// Path prefix the fake mounts everything under, like the real deployment.
pub const API_PREFIX: &str = "/server/v1";

/// A request the fake received.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub body: Option<Value>,
    pub authorization: Option<String>,
}

#[derive(Default)]
struct Inner {
    routes: HashMap<(Method, String), (StatusCode, Value)>,
    requests: Vec<Recorded>,
}

/// Canned-response backend.
#[derive(Clone, Default)]
pub struct FakeBackend {
    inner: Arc<Mutex<Inner>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answers `method path` with `status` and `body`.
    pub fn on(&self, method: Method, path: &str, status: u16, body: Value) -> &Self {
        self.inner.lock().unwrap().routes.insert(
            (method, path.to_string()),
            (StatusCode::from_u16(status).unwrap(), body),
        );
        self
    }

    /// Requests received so far, in arrival order.
    pub fn requests(&self) -> Vec<Recorded> {
        self.inner.lock().unwrap().requests.clone()
    }

    /// Requests received for `path`.
    pub fn requests_to(&self, path: &str) -> Vec<Recorded> {
        self.requests()
            .into_iter()
            .filter(|r| r.path == path)
            .collect()
    }

    /// Serves on an ephemeral port and returns the base URL.
    pub async fn start(&self) -> String {
        let app = Router::new().fallback(handle).with_state(self.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}{API_PREFIX}")
    }

    /// Serves and returns a client for it.
    pub async fn client(&self, style: RouteStyle) -> ApiClient {
        client_for(&self.start().await, style)
    }
}

async fn handle(
    State(backend): State<FakeBackend>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let path = uri
        .path()
        .strip_prefix(API_PREFIX)
        .unwrap_or(uri.path())
        .to_string();
    let recorded = Recorded {
        method: method.clone(),
        path: path.clone(),
        query: uri.query().map(str::to_string),
        body: serde_json::from_slice(&body).ok(),
        authorization: headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
    };

    let mut inner = backend.inner.lock().unwrap();
    inner.requests.push(recorded);
    match inner.routes.get(&(method, path)) {
        Some((status, body)) => (*status, axum::Json(body.clone())).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            axum::Json(json!({"message": "no such route"})),
        )
            .into_response(),
    }
}

/// Client pointed at `base_url`.
pub fn client_for(base_url: &str, style: RouteStyle) -> ApiClient {
    let mut config = AppConfig::with_base_url(base_url);
    config.api.route_style = style;
    ApiClient::new(&config.api).unwrap()
}

/// A base URL nothing listens on.
pub async fn dead_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}{API_PREFIX}")
}
