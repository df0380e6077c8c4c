//! Application configuration management.

use std::path::PathBuf;

use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::format::NumberLocale;

/// Backend used when no configuration source names one.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000/server/v1";

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Backend API configuration.
    pub api: ApiConfig,
    /// Display configuration.
    #[serde(default)]
    pub display: DisplayConfig,
    /// Session persistence configuration.
    #[serde(default)]
    pub session: SessionConfig,
}

/// Backend API configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Base URL every request path is appended to
    /// (e.g. `http://localhost:3000/server/v1`).
    pub base_url: String,
    /// How resource paths are laid out on the backend.
    #[serde(default)]
    pub route_style: RouteStyle,
    /// Optional per-request timeout. Unset means requests never time out.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

/// Path layout used by the backend for resource endpoints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteStyle {
    /// Plain REST paths, verb carried by the HTTP method (`/budget/7`).
    #[default]
    Rest,
    /// Verb-prefixed paths: `/g` read, `/i` insert, `/u` update, `/d` delete.
    Prefixed,
}

/// Display configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DisplayConfig {
    /// Number locale tag (`es-CO`, `en-US`, `de-DE`).
    #[serde(default = "default_locale")]
    pub locale: String,
    /// Symbol printed in front of currency amounts.
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
}

fn default_locale() -> String {
    "es-CO".to_string()
}

fn default_currency_symbol() -> String {
    "$".to_string()
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            locale: default_locale(),
            currency_symbol: default_currency_symbol(),
        }
    }
}

impl DisplayConfig {
    /// Resolves the configured locale tag.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` for an unknown locale tag.
    pub fn number_locale(&self) -> AppResult<NumberLocale> {
        self.locale
            .parse()
            .map_err(|e: String| AppError::Config(e))
    }
}

/// Session persistence configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SessionConfig {
    /// Session file location. Defaults to `~/.fintrack/session.json`.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl AppConfig {
    /// Per-user config file: `<config dir>/fintrack/config.toml`.
    #[must_use]
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("fintrack").join("config.toml"))
    }

    /// Loads configuration from environment and config files.
    ///
    /// Later sources win: built-in defaults, `config/default.toml` and
    /// `config/{RUN_MODE}.toml` relative to the working directory, the
    /// per-user config file, then `FINTRACK__*` variables.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let mut builder = config::Config::builder()
            .set_default("api.base_url", DEFAULT_BASE_URL)?
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false));
        if let Some(path) = Self::user_config_path() {
            builder = builder.add_source(config::File::from(path).required(false));
        }

        builder
            .add_source(config::Environment::with_prefix("FINTRACK").separator("__"))
            .build()?
            .try_deserialize()
    }

    /// Builds a configuration pointing at `base_url` with every other
    /// setting at its default.
    #[must_use]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            api: ApiConfig {
                base_url: base_url.into(),
                route_style: RouteStyle::default(),
                request_timeout_secs: None,
            },
            display: DisplayConfig::default(),
            session: SessionConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_from_env() {
        temp_env::with_vars(
            [
                ("FINTRACK__API__BASE_URL", Some("http://localhost:3000/server/v1")),
                ("FINTRACK__API__ROUTE_STYLE", Some("prefixed")),
                ("FINTRACK__DISPLAY__LOCALE", Some("en-US")),
                ("RUN_MODE", Some("test-nonexistent")),
            ],
            || {
                let config = AppConfig::load().expect("config should load");
                assert_eq!(config.api.base_url, "http://localhost:3000/server/v1");
                assert_eq!(config.api.route_style, RouteStyle::Prefixed);
                assert_eq!(config.api.request_timeout_secs, None);
                assert_eq!(config.display.locale, "en-US");
                assert_eq!(config.display.currency_symbol, "$");
                assert!(config.session.path.is_none());
            },
        );
    }

    #[test]
    fn test_missing_base_url_falls_back_to_default() {
        let home = tempfile::tempdir().unwrap();
        temp_env::with_vars(
            [
                ("FINTRACK__API__BASE_URL", None::<&str>),
                ("RUN_MODE", Some("test-nonexistent")),
                ("XDG_CONFIG_HOME", home.path().to_str()),
            ],
            || {
                let config = AppConfig::load().expect("config should load");
                assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
            },
        );
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_user_config_is_read_outside_the_repo() {
        let home = tempfile::tempdir().unwrap();
        let elsewhere = tempfile::tempdir().unwrap();
        let dir = home.path().join("fintrack");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(
            dir.join("config.toml"),
            "[api]\nbase_url = \"https://fintrack.example.com/server/v1\"\n\n[display]\nlocale = \"de-DE\"\n",
        )
        .unwrap();

        temp_env::with_vars(
            [
                ("FINTRACK__API__BASE_URL", None::<&str>),
                ("FINTRACK__DISPLAY__LOCALE", None),
                ("RUN_MODE", Some("test-nonexistent")),
                ("XDG_CONFIG_HOME", home.path().to_str()),
            ],
            || {
                let previous = std::env::current_dir().unwrap();
                std::env::set_current_dir(elsewhere.path()).unwrap();
                let loaded = AppConfig::load();
                std::env::set_current_dir(previous).unwrap();

                let config = loaded.expect("config should load");
                assert_eq!(config.api.base_url, "https://fintrack.example.com/server/v1");
                assert_eq!(config.display.locale, "de-DE");
                assert_eq!(
                    AppConfig::user_config_path().unwrap(),
                    home.path().join("fintrack").join("config.toml")
                );
            },
        );
    }

    #[test]
    fn test_with_base_url_defaults() {
        let config = AppConfig::with_base_url("http://127.0.0.1:9000");
        assert_eq!(config.api.route_style, RouteStyle::Rest);
        assert_eq!(config.display.locale, "es-CO");
        assert_eq!(
            config.display.number_locale().unwrap(),
            NumberLocale::ES_CO
        );
    }

    #[test]
    fn test_unknown_locale_is_config_error() {
        let display = DisplayConfig {
            locale: "xx-XX".into(),
            currency_symbol: "$".into(),
        };
        assert!(matches!(
            display.number_locale(),
            Err(AppError::Config(_))
        ));
    }
}
