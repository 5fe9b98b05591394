//! Sanctum HTTP client
//!
//! Talks to the two endpoints a Sanctum login needs: the anti-forgery
//! cookie endpoint and the credential endpoint. [`SanctumClient`] implements
//! [`sanctum_core::AuthTransport`], so it can be handed straight to
//! [`sanctum_core::AuthSessionProvider`] or the Yew provider.

pub mod client;

pub use client::error::ClientError;
pub use client::{SanctumClient, SanctumClientBuilder};
