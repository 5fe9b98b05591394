//! Login endpoints

use super::{SanctumClient, error::ClientError};
use async_trait::async_trait;
use reqwest::Method;
use sanctum_core::{AuthTransport, Credentials, LoginPayload, LoginResponse, TransportError};
use tracing::debug;

impl SanctumClient {
    /// Ask the backend to set its anti-forgery cookie
    pub async fn csrf_cookie(&self) -> Result<(), ClientError> {
        debug!(path = %self.csrf_cookie_path, "requesting csrf cookie");
        let request = self.request(Method::GET, &self.csrf_cookie_path);
        self.execute_empty(request).await
    }

    /// Submit credentials and unwrap the `data` envelope of the answer
    pub async fn external_login(
        &self,
        credentials: &Credentials,
    ) -> Result<LoginPayload, ClientError> {
        debug!(path = %self.login_path, email = %credentials.email, "submitting credentials");
        let request = self
            .request(Method::POST, &self.login_path)
            .json(credentials);
        let response: LoginResponse = self.execute(request).await?;
        Ok(response.data)
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl AuthTransport for SanctumClient {
    async fn fetch_csrf_cookie(&self) -> Result<(), TransportError> {
        Ok(self.csrf_cookie().await?)
    }

    async fn submit_credentials(
        &self,
        credentials: &Credentials,
    ) -> Result<LoginPayload, TransportError> {
        Ok(self.external_login(credentials).await?)
    }
}
