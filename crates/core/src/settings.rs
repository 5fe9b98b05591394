//! Authentication endpoint configuration

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

/// Header sent on every request so tunnelled dev backends skip their
/// browser interstitial page.
pub const TUNNEL_WARNING_HEADER: &str = "ngrok-skip-browser-warning";

/// Where and how the session provider talks to the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Backend origin, without trailing slash
    pub base_url: String,
    /// Path that sets the anti-forgery cookie
    pub csrf_cookie_path: String,
    /// Path that accepts `{email, password}`
    pub login_path: String,
    /// Client-side route unauthenticated users are sent to
    pub redirect_path: String,
    /// Per-request timeout in seconds (ignored on wasm32)
    pub timeout_secs: Option<u64>,
    /// Fixed headers added to every request
    pub headers: BTreeMap<String, String>,
}

impl AuthConfig {
    pub const DEFAULT_BASE_URL: &'static str = "http://localhost:8000";
    pub const DEFAULT_CSRF_COOKIE_PATH: &'static str = "/sanctum/csrf-cookie";
    pub const DEFAULT_LOGIN_PATH: &'static str = "/externalLogin";
    pub const DEFAULT_REDIRECT_PATH: &'static str = "/";

    /// Environment variable prefix, e.g. `SANCTUM__BASE_URL`
    pub const ENV_PREFIX: &'static str = "SANCTUM";

    /// Configuration pointing at `base_url` with every other value defaulted
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Request timeout, if one is configured
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Full URL of the anti-forgery cookie endpoint
    pub fn csrf_cookie_url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), self.csrf_cookie_path)
    }

    /// Full URL of the credential endpoint
    pub fn login_url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), self.login_path)
    }

    /// Check that the URLs and paths are usable
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidConfig`] for a missing or non-http(s) base
    /// URL, or for paths that are not absolute.
    pub fn validate(&self) -> CoreResult<()> {
        if self.base_url.trim().is_empty() {
            return Err(CoreError::invalid_config("base_url is required"));
        }

        let parsed = url::Url::parse(&self.base_url)
            .map_err(|e| CoreError::invalid_config(format!("base_url '{}': {e}", self.base_url)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(CoreError::invalid_config(format!(
                "base_url must use http or https, got '{}'",
                parsed.scheme()
            )));
        }

        for (name, path) in [
            ("csrf_cookie_path", &self.csrf_cookie_path),
            ("login_path", &self.login_path),
            ("redirect_path", &self.redirect_path),
        ] {
            if !path.starts_with('/') {
                return Err(CoreError::invalid_config(format!(
                    "{name} must start with '/', got '{path}'"
                )));
            }
        }

        Ok(())
    }

    /// Load configuration from defaults, an optional file and the environment
    ///
    /// Later sources win: defaults, then `path` (format picked from the file
    /// extension), then `SANCTUM__*` variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be read or parsed, or if the
    /// merged result fails [`AuthConfig::validate`].
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: Option<&std::path::Path>) -> CoreResult<Self> {
        let defaults = config::Config::try_from(&Self::default())?;

        let mut builder = config::Config::builder().add_source(defaults);
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        }

        let settings = builder
            .add_source(
                config::Environment::with_prefix(Self::ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let loaded: Self = settings.try_deserialize()?;
        loaded.validate()?;
        Ok(loaded)
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        let mut headers = BTreeMap::new();
        headers.insert(TUNNEL_WARNING_HEADER.to_string(), "value".to_string());

        Self {
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            csrf_cookie_path: Self::DEFAULT_CSRF_COOKIE_PATH.to_string(),
            login_path: Self::DEFAULT_LOGIN_PATH.to_string(),
            redirect_path: Self::DEFAULT_REDIRECT_PATH.to_string(),
            timeout_secs: None,
            headers,
        }
    }
}
