//! Yew bindings for the Sanctum session provider
//!
//! Wrap the application in [`AuthProvider`], read the session with
//! [`use_auth`] and gate views with [`private_route`].

pub mod auth;
pub mod logging;

pub use auth::{
    AuthContext, AuthProvider, AuthProviderProps, AuthStore, private_route, use_auth,
    use_auth_state, use_is_authenticated,
};
pub use logging::init_logging;
pub use sanctum_core::{AuthConfig, AuthState, Credentials, UserProfile};
