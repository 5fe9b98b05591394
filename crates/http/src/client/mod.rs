//! Sanctum HTTP client

pub mod auth;
pub mod error;

use error::ClientError;
use reqwest::header::{self, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, ClientBuilder};
use sanctum_core::AuthConfig;
use std::time::Duration;

#[cfg(not(target_arch = "wasm32"))]
use reqwest::cookie::{CookieStore, Jar};
#[cfg(not(target_arch = "wasm32"))]
use std::sync::Arc;

/// Cookie Laravel uses to hand the anti-forgery token to scripts
pub const XSRF_COOKIE: &str = "XSRF-TOKEN";

/// Header Laravel reads the anti-forgery token back from
pub const XSRF_HEADER: &str = "X-XSRF-TOKEN";

/// Client for a Sanctum-protected backend
///
/// Cookies set by the backend are kept for the lifetime of the client: in a
/// private jar on native targets, by the browser on wasm32.
#[derive(Clone)]
pub struct SanctumClient {
    client: Client,
    base_url: String,
    csrf_cookie_path: String,
    login_path: String,
    #[cfg(not(target_arch = "wasm32"))]
    cookies: Arc<Jar>,
}

impl SanctumClient {
    /// Create a new client with default configuration
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        Self::builder().base_url(base_url).build()
    }

    /// Create a client from the shared auth configuration
    pub fn from_config(config: &AuthConfig) -> Result<Self, ClientError> {
        SanctumClientBuilder::from_config(config).build()
    }

    /// Create a new client builder
    pub fn builder() -> SanctumClientBuilder {
        SanctumClientBuilder::default()
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Create a request builder for a path below the base URL
    pub fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let request = self.client.request(method, url);

        #[cfg(target_arch = "wasm32")]
        let request = request.fetch_credentials_include();

        #[cfg(not(target_arch = "wasm32"))]
        let request = match self.xsrf_token() {
            Some(token) => request.header(XSRF_HEADER, token),
            None => request,
        };

        request
    }

    /// Execute a request and decode a JSON body
    pub async fn execute<T: serde::de::DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ClientError> {
        let response = Self::send(request).await?;
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Execute a request whose body is irrelevant
    pub async fn execute_empty(&self, request: reqwest::RequestBuilder) -> Result<(), ClientError> {
        Self::send(request).await.map(|_| ())
    }

    async fn send(request: reqwest::RequestBuilder) -> Result<reqwest::Response, ClientError> {
        let response = request.send().await?;
        let status = response.status();

        if status.is_success() {
            Ok(response)
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(ClientError::from_status(
                status,
                error::error_message(status, &body),
            ))
        }
    }

    /// Current anti-forgery token from the cookie jar, URL-decoded
    #[cfg(not(target_arch = "wasm32"))]
    pub fn xsrf_token(&self) -> Option<String> {
        let url = reqwest::Url::parse(&self.base_url).ok()?;
        let cookies = self.cookies.cookies(&url)?;
        let cookies = cookies.to_str().ok()?;

        cookies
            .split(';')
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, _)| *name == XSRF_COOKIE)
            .map(|(_, value)| {
                url::form_urlencoded::parse(format!("v={value}").as_bytes())
                    .next()
                    .map_or_else(|| value.to_string(), |(_, decoded)| decoded.into_owned())
            })
    }
}

/// Builder for SanctumClient
#[derive(Default)]
pub struct SanctumClientBuilder {
    base_url: Option<String>,
    csrf_cookie_path: Option<String>,
    login_path: Option<String>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
    headers: Vec<(String, String)>,
}

impl SanctumClientBuilder {
    /// Start from the shared auth configuration
    pub fn from_config(config: &AuthConfig) -> Self {
        let mut builder = Self::default()
            .base_url(&config.base_url)
            .csrf_cookie_path(&config.csrf_cookie_path)
            .login_path(&config.login_path);

        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        for (name, value) in &config.headers {
            builder = builder.header(name, value);
        }

        builder
    }

    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Override the anti-forgery cookie path
    pub fn csrf_cookie_path(mut self, path: impl Into<String>) -> Self {
        self.csrf_cookie_path = Some(path.into());
        self
    }

    /// Override the credential submission path
    pub fn login_path(mut self, path: impl Into<String>) -> Self {
        self.login_path = Some(path.into());
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Add a header sent with every request
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Build the client
    pub fn build(self) -> Result<SanctumClient, ClientError> {
        let base_url = self
            .base_url
            .ok_or_else(|| ClientError::Configuration("base_url is required".into()))?;

        // Ensure base_url ends without a trailing slash
        let base_url = base_url.trim_end_matches('/').to_string();

        let mut default_headers = HeaderMap::new();
        default_headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        for (name, value) in &self.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| ClientError::Configuration(format!("header name '{name}': {e}")))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| ClientError::Configuration(format!("header '{name}' value: {e}")))?;
            default_headers.insert(name, value);
        }

        let client_builder = ClientBuilder::new().default_headers(default_headers);

        #[cfg(not(target_arch = "wasm32"))]
        let cookies = Arc::new(Jar::default());

        #[cfg(not(target_arch = "wasm32"))]
        let client = {
            let mut builder = client_builder
                .cookie_provider(Arc::clone(&cookies))
                .user_agent(
                    self.user_agent
                        .unwrap_or_else(|| format!("sanctum-client/{}", env!("CARGO_PKG_VERSION"))),
                );
            if let Some(timeout) = self.timeout {
                builder = builder.timeout(timeout);
            }
            builder.build()?
        };

        #[cfg(target_arch = "wasm32")]
        let client = {
            // Browsers own the user agent and fetch has no timeout knob
            let _ = (self.timeout, self.user_agent);
            client_builder.build()?
        };

        Ok(SanctumClient {
            client,
            base_url,
            csrf_cookie_path: self
                .csrf_cookie_path
                .unwrap_or_else(|| AuthConfig::DEFAULT_CSRF_COOKIE_PATH.to_string()),
            login_path: self
                .login_path
                .unwrap_or_else(|| AuthConfig::DEFAULT_LOGIN_PATH.to_string()),
            #[cfg(not(target_arch = "wasm32"))]
            cookies,
        })
    }
}
