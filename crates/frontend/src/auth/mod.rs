//! Authentication module

pub mod context;
pub mod guard;

// Re-export commonly used items
pub use context::{
    AuthContext, AuthProvider, AuthProviderProps, AuthStore, use_auth, use_auth_state,
    use_is_authenticated,
};
pub use guard::private_route;
