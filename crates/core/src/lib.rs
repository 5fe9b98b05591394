//! Sanctum session core types and utilities
//!
//! Holds the in-memory authentication state of a single-page application
//! that logs in against a Sanctum style backend: an anti-forgery cookie
//! fetch followed by a credential submission. The state model, reducer and
//! login flow live here so the Yew provider and the native
//! [`AuthSessionProvider`] behave identically.

pub mod error;
pub mod flow;
pub mod guard;
pub mod provider;
pub mod session;
pub mod settings;
pub mod transport;

pub use error::{CoreError, CoreResult};
pub use flow::{LoginOutcome, dev_login_payload, login_flow};
pub use guard::RouteDecision;
pub use provider::{AuthSessionProvider, OnSuccess};
pub use session::{
    AuthAction, AuthState, Credentials, Session, SessionPhase, UiFlags, UserProfile,
};
pub use settings::AuthConfig;
pub use transport::{AuthTransport, LoginPayload, LoginResponse, TransportError};
