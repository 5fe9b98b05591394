//! Network seam between the login flow and the backend

use crate::session::{Credentials, UserProfile};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Body of a successful login, inside the `data` envelope
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginPayload {
    pub token: String,
    pub user: UserProfile,
}

/// Raw response of the login endpoint
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub data: LoginPayload,
}

/// Why a backend call failed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The request never produced a response
    #[error("Network error: {0}")]
    Network(String),

    /// The backend answered with a non-success status
    #[error("Rejected with status {status}: {message}")]
    Rejected { status: u16, message: String },

    /// The response body did not have the expected shape
    #[error("Invalid response body: {0}")]
    Decode(String),

    /// The client could not be set up
    #[error("Invalid configuration: {0}")]
    Configuration(String),
}

impl TransportError {
    /// Status code for rejections, `None` otherwise
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// The two calls a login needs
///
/// Implementations must carry cookies from [`fetch_csrf_cookie`] into
/// [`submit_credentials`].
///
/// [`fetch_csrf_cookie`]: AuthTransport::fetch_csrf_cookie
/// [`submit_credentials`]: AuthTransport::submit_credentials
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait AuthTransport {
    /// Ask the backend to set its anti-forgery cookie
    async fn fetch_csrf_cookie(&self) -> Result<(), TransportError>;

    /// Exchange credentials for a token and user profile
    async fn submit_credentials(
        &self,
        credentials: &Credentials,
    ) -> Result<LoginPayload, TransportError>;
}
