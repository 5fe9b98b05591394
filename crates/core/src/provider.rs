//! Native session provider
//!
//! [`AuthSessionProvider`] owns the [`AuthState`] and hands out read-only
//! snapshots. Consumers that need to react to changes subscribe to the
//! underlying watch channel.

use crate::flow::{LoginOutcome, dev_login_payload, login_flow};
use crate::guard::RouteDecision;
use crate::session::{AuthAction, AuthState, Credentials, SessionPhase};
use crate::settings::AuthConfig;
use crate::transport::{AuthTransport, LoginPayload};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::info;

/// Callback run after a successful login
pub type OnSuccess = Box<dyn FnOnce() + Send + 'static>;

/// Owner of the authentication state for one application tree
///
/// Clones share the same state. Overlapping [`login`](Self::login) calls are
/// not serialized: each response is applied when it arrives, so whichever
/// resolves last determines the final state.
pub struct AuthSessionProvider<T> {
    transport: Arc<T>,
    config: Arc<AuthConfig>,
    state: Arc<watch::Sender<AuthState>>,
}

impl<T> Clone for AuthSessionProvider<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            config: Arc::clone(&self.config),
            state: Arc::clone(&self.state),
        }
    }
}

impl<T> AuthSessionProvider<T> {
    /// Create a provider in the anonymous state
    pub fn new(transport: T, config: AuthConfig) -> Self {
        let (state, _) = watch::channel(AuthState::default());
        Self {
            transport: Arc::new(transport),
            config: Arc::new(config),
            state: Arc::new(state),
        }
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Copy of the current state
    pub fn snapshot(&self) -> AuthState {
        self.state.borrow().clone()
    }

    /// Receiver that observes every state change
    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.state.subscribe()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated()
    }

    pub fn phase(&self) -> SessionPhase {
        self.state.borrow().phase()
    }

    /// Reset the session to unauthenticated
    ///
    /// The user profile and UI flags are left as they are.
    pub fn logout(&self) {
        info!("logout");
        self.dispatch(AuthAction::Logout);
    }

    /// Grant `element` if authenticated, otherwise redirect to the
    /// configured path
    pub fn route_guard<E>(&self, element: E) -> RouteDecision<E> {
        self.state
            .borrow()
            .route_guard(element, &self.config.redirect_path)
    }

    /// Sign in as a fixed development user without touching the network
    pub fn fake_login(&self, on_success: Option<OnSuccess>) {
        let LoginPayload { token, user } = dev_login_payload();
        info!("fake login");
        self.dispatch(AuthAction::LoginSucceeded { token, user });
        if let Some(callback) = on_success {
            callback();
        }
    }

    fn dispatch(&self, action: AuthAction) {
        self.state.send_modify(|state| state.apply(action));
    }
}

impl<T: AuthTransport> AuthSessionProvider<T> {
    /// Fetch the anti-forgery cookie, then submit `credentials`
    ///
    /// Never fails: the outcome is reflected in the state flags and returned
    /// for convenience.
    pub async fn login(
        &self,
        credentials: Credentials,
        on_success: Option<OnSuccess>,
    ) -> LoginOutcome {
        login_flow(
            self.transport.as_ref(),
            &credentials,
            |action| self.dispatch(action),
            on_success,
        )
        .await
    }
}
