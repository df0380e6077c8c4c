//! Application state container.
//!
//! `AppState` owns the backend client and the current session. It is
//! created once at startup and changes only through [`AppState::restore`],
//! [`AppState::login`], [`AppState::logout`] and [`AppState::revalidate`].

use fintrack_shared::{AppError, AppResult};
use reqwest::Method;

use crate::http::ApiClient;
use crate::session::{Session, SessionStore, SessionUser};
use crate::wire::{LoginRequest, LoginResponse, ValidateResponse};

const LOGIN_PATH: &str = "/auth/login";
const VALIDATE_PATH: &str = "/auth/validate-token";

/// Backend client plus the session it authenticates with.
pub struct AppState {
    client: ApiClient,
    store: Box<dyn SessionStore>,
    session: Option<Session>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("client", &self.client)
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

impl AppState {
    /// Creates a logged-out state.
    #[must_use]
    pub fn new(client: ApiClient, store: Box<dyn SessionStore>) -> Self {
        Self {
            client,
            store,
            session: None,
        }
    }

    /// Backend client, authenticated when a session is active.
    #[must_use]
    pub const fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Current session.
    #[must_use]
    pub const fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Whether a session is active.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    /// The current session, or `AppError::Unauthorized`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Unauthorized` when nobody is logged in.
    pub fn require_session(&self) -> AppResult<&Session> {
        self.session
            .as_ref()
            .ok_or_else(|| AppError::Unauthorized("not logged in, run `fintrack login`".into()))
    }

    /// Loads a persisted session without contacting the backend.
    ///
    /// An unreadable session file is discarded rather than reported, so a
    /// corrupt file never locks the user out.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Session` only if a corrupt file cannot be removed.
    pub fn restore(&mut self) -> AppResult<Option<&Session>> {
        let session = match self.store.load() {
            Ok(session) => session,
            Err(error) => {
                tracing::warn!(%error, "discarding unreadable session");
                self.store.clear()?;
                None
            }
        };
        Ok(self.activate(session))
    }

    /// Logs in and persists the session.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` for blank credentials, the backend's
    /// error for rejected credentials, or `AppError::Session` if the session
    /// cannot be saved.
    pub async fn login(&mut self, username: &str, password: &str) -> AppResult<&Session> {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            return Err(AppError::Validation(
                "username and password are required".into(),
            ));
        }

        let response: LoginResponse = self
            .client
            .send_json(
                Method::POST,
                LOGIN_PATH,
                &LoginRequest { username, password },
            )
            .await?;

        let session = Session {
            token: response.token,
            user: SessionUser {
                id: response.user.id,
                username: response.user.username,
            },
        };
        self.store.save(&session)?;
        tracing::info!(user = %session.user.username, "logged in");

        self.activate(Some(session))
            .ok_or_else(|| AppError::Session("session lost after login".into()))
    }

    /// Drops the session locally and from the store.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Session` if the stored session cannot be removed.
    pub fn logout(&mut self) -> AppResult<()> {
        if let Some(session) = self.session.take() {
            tracing::info!(user = %session.user.username, "logged out");
        }
        self.activate(None);
        self.store.clear()
    }

    /// Checks the session token with the backend.
    ///
    /// A rejected token (401/403) destroys the session and yields
    /// `AppError::Unauthorized`. Transport failures keep the session, since
    /// nothing was learned about the token.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Unauthorized` without a session or for a rejected
    /// token, and `AppError::Network`/`AppError::Server` otherwise.
    pub async fn revalidate(&mut self) -> AppResult<&Session> {
        let token = self.require_session()?.token.clone();

        let validated = self.client.get_json::<ValidateResponse>(VALIDATE_PATH).await;
        match validated {
            Ok(response) => {
                let session = Session {
                    token,
                    user: SessionUser {
                        id: response.user.id,
                        username: response.user.username,
                    },
                };
                if self.session.as_ref() != Some(&session) {
                    self.store.save(&session)?;
                }
                self.activate(Some(session))
                    .ok_or_else(|| AppError::Session("session lost after validation".into()))
            }
            Err(AppError::Server { status, message }) if matches!(status, 401 | 403) => {
                tracing::warn!(status, %message, "session rejected by backend");
                self.activate(None);
                self.store.clear()?;
                Err(AppError::Unauthorized(message))
            }
            Err(error) => Err(error),
        }
    }

    /// Installs `session` (or none), keeping the client token in sync.
    fn activate(&mut self, session: Option<Session>) -> Option<&Session> {
        self.client
            .set_token(session.as_ref().map(|s| s.token.clone()));
        self.session = session;
        self.session.as_ref()
    }
}
