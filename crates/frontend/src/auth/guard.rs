//! Route guard for authenticated views

use super::AuthContext;
use sanctum_core::RouteDecision;
use tracing::{debug, warn};
use yew::prelude::*;
use yew_router::prelude::*;

/// Render `element` for authenticated users, otherwise redirect
///
/// The redirect target is the provider's configured redirect path resolved
/// against `R`; when no route matches it, `R`'s not-found route is used.
pub fn private_route<R>(auth: &AuthContext, element: Html) -> Html
where
    R: Routable + 'static,
{
    match auth.route_guard(element) {
        RouteDecision::Render(element) => element,
        RouteDecision::Redirect(path) => match redirect_route::<R>(&path) {
            Some(to) => {
                debug!(%path, "redirecting unauthenticated visitor");
                html! { <Redirect<R> to={to} /> }
            }
            None => {
                warn!(%path, "redirect path matches no route");
                Html::default()
            }
        },
    }
}

fn redirect_route<R: Routable>(path: &str) -> Option<R> {
    R::recognize(path).or_else(R::not_found_route)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq, Routable)]
    enum Route {
        #[at("/")]
        Home,
        #[at("/dashboard")]
        Dashboard,
        #[not_found]
        #[at("/404")]
        NotFound,
    }

    #[derive(Clone, Debug, PartialEq, Routable)]
    enum Strict {
        #[at("/only")]
        Only,
    }

    #[test]
    fn redirect_resolves_configured_path() {
        assert_eq!(redirect_route::<Route>("/"), Some(Route::Home));
        assert_eq!(redirect_route::<Route>("/dashboard"), Some(Route::Dashboard));
    }

    #[test]
    fn unknown_redirect_falls_back_to_not_found() {
        assert_eq!(redirect_route::<Route>("/nowhere"), Some(Route::NotFound));
        assert_eq!(redirect_route::<Strict>("/"), None);
    }
}
