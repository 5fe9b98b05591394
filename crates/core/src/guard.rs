//! Route guarding on authentication state

use crate::session::AuthState;

/// Result of guarding a view
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RouteDecision<E> {
    /// Show the guarded element
    Render(E),
    /// Navigate to this client-side path instead
    Redirect(String),
}

impl<E> RouteDecision<E> {
    pub const fn is_redirect(&self) -> bool {
        matches!(self, Self::Redirect(_))
    }

    /// The element, if access was granted
    pub fn into_element(self) -> Option<E> {
        match self {
            Self::Render(element) => Some(element),
            Self::Redirect(_) => None,
        }
    }

    /// Transform the guarded element, keeping a redirect as is
    pub fn map<U>(self, f: impl FnOnce(E) -> U) -> RouteDecision<U> {
        match self {
            Self::Render(element) => RouteDecision::Render(f(element)),
            Self::Redirect(to) => RouteDecision::Redirect(to),
        }
    }
}

impl AuthState {
    /// Let `element` through when authenticated, otherwise redirect
    pub fn route_guard<E>(&self, element: E, redirect_to: &str) -> RouteDecision<E> {
        if self.session.authenticated {
            RouteDecision::Render(element)
        } else {
            RouteDecision::Redirect(redirect_to.to_string())
        }
    }
}
