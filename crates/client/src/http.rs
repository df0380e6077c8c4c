//! HTTP plumbing shared by every backend call.
//!
//! Centralizes URL building (including the verb-prefixed route layout),
//! bearer authentication and status handling, so the resource and report
//! modules only describe requests and map responses.

use std::fmt::Display;
use std::time::Duration;

use fintrack_shared::config::{ApiConfig, RouteStyle};
use fintrack_shared::{AppError, AppResult};
use reqwest::{Method, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// What a resource request does.
///
/// Under [`RouteStyle::Prefixed`] the verb also selects the path prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    /// List or fetch (`GET`, `/g`).
    Read,
    /// Create (`POST`, `/i`).
    Insert,
    /// Update (`PUT`, `/u`).
    Update,
    /// Delete (`DELETE`, `/d`).
    Delete,
}

impl Verb {
    const fn prefix(self) -> &'static str {
        match self {
            Self::Read => "g",
            Self::Insert => "i",
            Self::Update => "u",
            Self::Delete => "d",
        }
    }

    /// HTTP method used for this verb.
    #[must_use]
    pub fn method(self) -> Method {
        match self {
            Self::Read => Method::GET,
            Self::Insert => Method::POST,
            Self::Update => Method::PUT,
            Self::Delete => Method::DELETE,
        }
    }
}

/// Client for the FinTrack REST backend.
///
/// Cheap to share by reference; concurrent requests only need `&self`.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    route_style: RouteStyle,
    token: Option<String>,
}

impl ApiClient {
    /// Builds a client from the API configuration.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if the underlying HTTP client cannot be built.
    pub fn new(config: &ApiConfig) -> AppResult<Self> {
        let mut builder =
            reqwest::Client::builder().user_agent(concat!("fintrack/", env!("CARGO_PKG_VERSION")));
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder
            .build()
            .map_err(|e| AppError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            route_style: config.route_style,
            token: None,
        })
    }

    /// Base URL every path is appended to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Route layout in use.
    #[must_use]
    pub const fn route_style(&self) -> RouteStyle {
        self.route_style
    }

    /// Sets or clears the bearer token sent with every request.
    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    /// Whether a bearer token is attached.
    #[must_use]
    pub const fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// Path of a resource collection for the given verb.
    ///
    /// `resource_path(Verb::Insert, "budget")` is `/budget` for REST routes
    /// and `/i/budget` for prefixed routes.
    #[must_use]
    pub fn resource_path(&self, verb: Verb, resource: &str) -> String {
        let resource = resource.trim_matches('/');
        match self.route_style {
            RouteStyle::Rest => format!("/{resource}"),
            RouteStyle::Prefixed => format!("/{}/{resource}", verb.prefix()),
        }
    }

    /// Path of a single resource item for the given verb.
    #[must_use]
    pub fn item_path(&self, verb: Verb, resource: &str, id: impl Display) -> String {
        format!("{}/{id}", self.resource_path(verb, resource))
    }

    /// Starts a request to `path`, with the bearer token attached.
    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let request = self.http.request(method, format!("{}{path}", self.base_url));
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Sends a request and checks its status.
    pub(crate) async fn send(&self, request: RequestBuilder) -> AppResult<Response> {
        let response = request.send().await.map_err(|e| network_error(&e))?;
        tracing::debug!(
            url = %response.url(),
            status = response.status().as_u16(),
            "backend response"
        );
        check_response(response).await
    }

    /// `GET path` and decode the JSON body.
    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> AppResult<T> {
        let response = self.send(self.request(Method::GET, path)).await?;
        decode(response).await
    }

    /// `GET path?query` and decode the JSON body.
    pub(crate) async fn get_json_with_query<T, Q>(&self, path: &str, query: &Q) -> AppResult<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let response = self
            .send(self.request(Method::GET, path).query(query))
            .await?;
        decode(response).await
    }

    /// Sends `body` as JSON and decodes the JSON response.
    pub(crate) async fn send_json<T, B>(&self, method: Method, path: &str, body: &B) -> AppResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let response = self.send(self.request(method, path).json(body)).await?;
        decode(response).await
    }

    /// Sends an optional JSON body and ignores the response body.
    pub(crate) async fn send_unit<B>(&self, method: Method, path: &str, body: Option<&B>) -> AppResult<()>
    where
        B: Serialize + ?Sized,
    {
        let request = self.request(method, path);
        let request = match body {
            Some(body) => request.json(body),
            None => request,
        };
        self.send(request).await.map(drop)
    }
}

fn network_error(error: &reqwest::Error) -> AppError {
    if error.is_timeout() {
        AppError::Network(format!("request timed out: {error}"))
    } else {
        AppError::Network(error.to_string())
    }
}

/// Maps a non-success status to `AppError::Server`.
///
/// The message is taken from a JSON `message` or `error` field when present,
/// then from the raw body, then from the status reason.
async fn check_response(response: Response) -> AppResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = error_message(&body)
        .or_else(|| status.canonical_reason().map(str::to_string))
        .unwrap_or_else(|| "request failed".to_string());

    tracing::warn!(status = status.as_u16(), %message, "backend rejected request");
    Err(AppError::Server {
        status: status.as_u16(),
        message,
    })
}

fn error_message(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }
    if let Ok(serde_json::Value::Object(map)) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["message", "error", "mensaje"] {
            if let Some(serde_json::Value::String(message)) = map.get(key) {
                return Some(message.clone());
            }
        }
    }
    Some(body.to_string())
}

async fn decode<T: DeserializeOwned>(response: Response) -> AppResult<T> {
    let bytes = response.bytes().await.map_err(|e| network_error(&e))?;
    serde_json::from_slice(&bytes).map_err(|e| AppError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(style: RouteStyle) -> ApiClient {
        let mut config = fintrack_shared::AppConfig::with_base_url("http://localhost:3000/server/v1/");
        config.api.route_style = style;
        ApiClient::new(&config.api).unwrap()
    }

    #[test]
    fn test_rest_paths() {
        let api = client(RouteStyle::Rest);
        assert_eq!(api.base_url(), "http://localhost:3000/server/v1");
        assert_eq!(api.resource_path(Verb::Read, "expense-types"), "/expense-types");
        assert_eq!(api.item_path(Verb::Delete, "budget", 7), "/budget/7");
    }

    #[test]
    fn test_prefixed_paths() {
        let api = client(RouteStyle::Prefixed);
        assert_eq!(api.resource_path(Verb::Read, "expense-types"), "/g/expense-types");
        assert_eq!(api.resource_path(Verb::Insert, "/budget"), "/i/budget");
        assert_eq!(api.item_path(Verb::Update, "monetary-funds", 3), "/u/monetary-funds/3");
        assert_eq!(api.item_path(Verb::Delete, "budget", 7), "/d/budget/7");
    }

    #[test]
    fn test_verb_methods() {
        assert_eq!(Verb::Read.method(), Method::GET);
        assert_eq!(Verb::Insert.method(), Method::POST);
        assert_eq!(Verb::Update.method(), Method::PUT);
        assert_eq!(Verb::Delete.method(), Method::DELETE);
    }

    #[test]
    fn test_error_message_extraction() {
        assert_eq!(
            error_message(r#"{"message":"Monto requerido"}"#).as_deref(),
            Some("Monto requerido")
        );
        assert_eq!(error_message(r#"{"error":"nope"}"#).as_deref(), Some("nope"));
        assert_eq!(error_message("plain failure").as_deref(), Some("plain failure"));
        assert_eq!(error_message("   "), None);
    }

    #[test]
    fn test_token_toggle() {
        let mut api = client(RouteStyle::Rest);
        assert!(!api.has_token());
        api.set_token(Some("abc".to_string()));
        assert!(api.has_token());
        api.set_token(None);
        assert!(!api.has_token());
    }
}
