//! The two-step login sequence shared by every provider

use crate::session::{AuthAction, Credentials, UserProfile};
use crate::transport::{AuthTransport, LoginPayload};
use serde::Serialize;
use tracing::{info, warn};

/// How a login attempt ended
///
/// Purely informational: every outcome has already been written to the
/// session state by the time the caller sees it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoginOutcome {
    Authenticated,
    CsrfCookieFailed,
    CredentialsRejected,
}

/// Run one login attempt against `transport`
///
/// Every state change goes through `dispatch`. The cookie step failing is
/// logged and only clears the loading flag; any failure of the credential
/// step raises the wrong-credentials flag. `on_success` runs after the
/// authenticated state has been dispatched.
pub async fn login_flow<T, D, F>(
    transport: &T,
    credentials: &Credentials,
    dispatch: D,
    on_success: Option<F>,
) -> LoginOutcome
where
    T: AuthTransport + ?Sized,
    D: Fn(AuthAction),
    F: FnOnce(),
{
    dispatch(AuthAction::LoginStarted);
    info!(email = %credentials.email, "login started");

    if let Err(e) = transport.fetch_csrf_cookie().await {
        warn!(error = %e, "cookie error");
        dispatch(AuthAction::CsrfCookieFailed);
        return LoginOutcome::CsrfCookieFailed;
    }

    match transport.submit_credentials(credentials).await {
        Ok(LoginPayload { token, user }) => {
            info!(user_id = ?user.id, "login succeeded");
            dispatch(AuthAction::LoginSucceeded { token, user });
            if let Some(callback) = on_success {
                callback();
            }
            LoginOutcome::Authenticated
        }
        Err(e) => {
            info!(error = %e, "credentials rejected");
            dispatch(AuthAction::CredentialsRejected);
            LoginOutcome::CredentialsRejected
        }
    }
}

/// Fixed user and token for working on the UI without a backend
pub fn dev_login_payload() -> LoginPayload {
    LoginPayload {
        token: "accessToken".to_string(),
        user: UserProfile {
            id: Some(0),
            name: Some("Jason".to_string()),
            email: Some("test@example.com".to_string()),
            email_verified_at: Some(String::new()),
            remember_token: Some(String::new()),
            created_at: Some(String::new()),
            updated_at: Some(String::new()),
        },
    }
}
