//! Session state and its reducer

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Login form input
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Token half of the authentication state
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: Option<String>,
    pub authenticated: bool,
}

/// User record as returned by the login endpoint
///
/// Every field is nullable; before the first successful login the profile
/// holds nothing but `None` placeholders.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserProfile {
    pub id: Option<u64>,
    pub name: Option<String>,
    pub email: Option<String>,
    #[serde(alias = "emailVerifiedAt")]
    pub email_verified_at: Option<String>,
    pub remember_token: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// Transient UI flags for the login form
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiFlags {
    pub is_loading: bool,
    pub wrong_credentials: bool,
}

/// Everything a consumer of the auth context can read
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthState {
    pub session: Session,
    pub user: UserProfile,
    pub flags: UiFlags,
}

/// Coarse phase derived from [`AuthState`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    Anonymous,
    Authenticating,
    Authenticated,
    CredentialError,
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Anonymous => "anonymous",
            Self::Authenticating => "authenticating",
            Self::Authenticated => "authenticated",
            Self::CredentialError => "credential_error",
        };
        f.write_str(name)
    }
}

/// State transitions
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuthAction {
    /// A login attempt began
    LoginStarted,
    /// The anti-forgery cookie could not be fetched
    CsrfCookieFailed,
    /// The backend accepted the credentials
    LoginSucceeded { token: String, user: UserProfile },
    /// The credential step failed for any reason
    CredentialsRejected,
    /// The user signed out
    Logout,
}

impl AuthAction {
    fn name(&self) -> &'static str {
        match self {
            Self::LoginStarted => "login_started",
            Self::CsrfCookieFailed => "csrf_cookie_failed",
            Self::LoginSucceeded { .. } => "login_succeeded",
            Self::CredentialsRejected => "credentials_rejected",
            Self::Logout => "logout",
        }
    }
}

impl AuthState {
    /// Apply a transition in place
    pub fn apply(&mut self, action: AuthAction) {
        let name = action.name();
        match action {
            AuthAction::LoginStarted => {
                self.flags.is_loading = true;
            }
            AuthAction::CsrfCookieFailed => {
                // wrong_credentials stays as it was
                self.flags.is_loading = false;
            }
            AuthAction::LoginSucceeded { token, user } => {
                self.user = user;
                self.session = Session {
                    access_token: Some(token),
                    authenticated: true,
                };
                self.flags = UiFlags::default();
            }
            AuthAction::CredentialsRejected => {
                self.flags.wrong_credentials = true;
                self.flags.is_loading = false;
            }
            AuthAction::Logout => {
                // Only the session is reset; the profile and flags survive.
                self.session = Session::default();
            }
        }
        debug!(action = name, phase = %self.phase(), "auth state updated");
    }

    /// Owned variant of [`AuthState::apply`]
    #[must_use]
    pub fn reduce(mut self, action: AuthAction) -> Self {
        self.apply(action);
        self
    }

    pub const fn is_authenticated(&self) -> bool {
        self.session.authenticated
    }

    pub fn access_token(&self) -> Option<&str> {
        self.session.access_token.as_deref()
    }

    pub const fn phase(&self) -> SessionPhase {
        if self.flags.is_loading {
            SessionPhase::Authenticating
        } else if self.session.authenticated {
            SessionPhase::Authenticated
        } else if self.flags.wrong_credentials {
            SessionPhase::CredentialError
        } else {
            SessionPhase::Anonymous
        }
    }
}
