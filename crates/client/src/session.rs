//! Session persistence.
//!
//! A session is the bearer token plus the user it belongs to. It is written
//! to `~/.fintrack/session.json` (mode 0600 on Unix) after login, read back
//! at startup, and removed on logout or when the backend rejects it.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use fintrack_shared::config::SessionConfig;
use fintrack_shared::types::UserId;
use fintrack_shared::{AppError, AppResult};
use serde::{Deserialize, Serialize};

const SESSION_DIR: &str = ".fintrack";
const SESSION_FILE_NAME: &str = "session.json";

/// The authenticated user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    /// Backend user id.
    pub id: UserId,
    /// Login name.
    pub username: String,
}

/// Token and user of the current login.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Bearer token.
    pub token: String,
    /// User the token was issued to.
    pub user: SessionUser,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("token", &"<redacted>")
            .field("user", &self.user)
            .finish()
    }
}

/// Where sessions live between runs.
pub trait SessionStore: Send + Sync {
    /// Reads the stored session, if any.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Session` if the store exists but cannot be read.
    fn load(&self) -> AppResult<Option<Session>>;

    /// Replaces the stored session.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Session` if the session cannot be written.
    fn save(&self, session: &Session) -> AppResult<()>;

    /// Removes the stored session. Clearing an empty store succeeds.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Session` if the session cannot be removed.
    fn clear(&self) -> AppResult<()>;
}

/// JSON file store.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    /// Store backed by `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the configured path, or `~/.fintrack/session.json`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Session` if no path is configured and the home
    /// directory cannot be determined.
    pub fn from_config(config: &SessionConfig) -> AppResult<Self> {
        match &config.path {
            Some(path) => Ok(Self::new(path)),
            None => Self::default_path().map(Self::new),
        }
    }

    /// `~/.fintrack/session.json`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Session` if the home directory cannot be determined.
    pub fn default_path() -> AppResult<PathBuf> {
        dirs::home_dir()
            .map(|home| home.join(SESSION_DIR).join(SESSION_FILE_NAME))
            .ok_or_else(|| {
                AppError::Session("home directory not found, cannot store session".into())
            })
    }

    /// File this store reads and writes.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> AppResult<Option<Session>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(AppError::Session(format!(
                    "read {}: {e}",
                    self.path.display()
                )));
            }
        };
        if raw.trim().is_empty() {
            return Ok(None);
        }
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| AppError::Session(format!("parse {}: {e}", self.path.display())))
    }

    fn save(&self, session: &Session) -> AppResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| AppError::Session(format!("mkdir {}: {e}", parent.display())))?;
        }
        let json = serde_json::to_string_pretty(session)
            .map_err(|e| AppError::Session(format!("serialize session: {e}")))?;
        fs::write(&self.path, json)
            .map_err(|e| AppError::Session(format!("write {}: {e}", self.path.display())))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&self.path, fs::Permissions::from_mode(0o600)).map_err(|e| {
                AppError::Session(format!("chmod {}: {e}", self.path.display()))
            })?;
        }

        tracing::debug!(path = %self.path.display(), "session saved");
        Ok(())
    }

    fn clear(&self) -> AppResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::Session(format!(
                "delete {}: {e}",
                self.path.display()
            ))),
        }
    }
}

/// In-memory store, for tests and one-shot runs.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    inner: Mutex<Option<Session>>,
}

impl MemorySessionStore {
    /// Store pre-filled with `session`.
    #[must_use]
    pub fn with_session(session: Session) -> Self {
        Self {
            inner: Mutex::new(Some(session)),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> AppResult<Option<Session>> {
        Ok(self
            .inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    fn save(&self, session: &Session) -> AppResult<()> {
        *self.inner.lock().unwrap_or_else(PoisonError::into_inner) = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> AppResult<()> {
        *self.inner.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}
