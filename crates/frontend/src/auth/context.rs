//! Application-wide authentication context and provider

use sanctum_core::{
    AuthAction, AuthConfig, AuthState, Credentials, LoginPayload, RouteDecision, UserProfile,
    dev_login_payload, login_flow,
};
use sanctum_http::SanctumClient;
use std::rc::Rc;
use tracing::{debug, error, info};
use yew::platform::spawn_local;
use yew::prelude::*;

/// Reducer state held by [`AuthProvider`]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthStore {
    pub state: AuthState,
}

impl Reducible for AuthStore {
    type Action = AuthAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = Rc::unwrap_or_clone(self);
        next.state.apply(action);
        Rc::new(next)
    }
}

/// Handle that descendants of [`AuthProvider`] receive
///
/// Reading goes through [`AuthContext::state`]; every mutation is one of
/// the operations below.
#[derive(Clone)]
pub struct AuthContext {
    store: UseReducerHandle<AuthStore>,
    client: Rc<Result<SanctumClient, String>>,
    redirect_to: Rc<str>,
}

impl PartialEq for AuthContext {
    fn eq(&self, other: &Self) -> bool {
        self.store == other.store
            && Rc::ptr_eq(&self.client, &other.client)
            && self.redirect_to == other.redirect_to
    }
}

impl AuthContext {
    pub fn state(&self) -> &AuthState {
        &self.store.state
    }

    pub fn is_authenticated(&self) -> bool {
        self.store.state.is_authenticated()
    }

    pub fn is_loading(&self) -> bool {
        self.store.state.flags.is_loading
    }

    pub fn wrong_credentials(&self) -> bool {
        self.store.state.flags.wrong_credentials
    }

    pub fn user(&self) -> &UserProfile {
        &self.store.state.user
    }

    pub fn access_token(&self) -> Option<&str> {
        self.store.state.access_token()
    }

    /// Client-side path unauthenticated visitors are sent to
    pub fn redirect_to(&self) -> &str {
        &self.redirect_to
    }

    /// Start a login in the background
    ///
    /// Progress shows up in the state flags; `on_success` fires once the
    /// session is authenticated.
    pub fn login(&self, credentials: Credentials, on_success: Option<Callback<()>>) {
        let client = Rc::clone(&self.client);
        let dispatcher = self.store.dispatcher();

        spawn_local(async move {
            match &*client {
                Ok(client) => {
                    login_flow(
                        client,
                        &credentials,
                        |action| dispatcher.dispatch(action),
                        on_success.map(|callback| move || callback.emit(())),
                    )
                    .await;
                }
                Err(e) => {
                    error!(error = %e, "auth client unavailable");
                    dispatcher.dispatch(AuthAction::LoginStarted);
                    dispatcher.dispatch(AuthAction::CsrfCookieFailed);
                }
            }
        });
    }

    /// Drop the session token; the profile stays until the next login
    pub fn logout(&self) {
        info!("logout");
        self.store.dispatch(AuthAction::Logout);
    }

    /// Sign in as the fixed development user without a backend
    pub fn fake_login(&self, on_success: Option<Callback<()>>) {
        let LoginPayload { token, user } = dev_login_payload();
        info!("fake login");
        self.store.dispatch(AuthAction::LoginSucceeded { token, user });
        if let Some(callback) = on_success {
            callback.emit(());
        }
    }

    /// Let `element` through when authenticated, otherwise ask for a
    /// redirect to [`AuthContext::redirect_to`]
    pub fn route_guard(&self, element: Html) -> RouteDecision<Html> {
        self.store.state.route_guard(element, &self.redirect_to)
    }
}

/// Auth provider props
#[derive(Properties, PartialEq)]
pub struct AuthProviderProps {
    /// Backend location and redirect target
    #[prop_or_default]
    pub config: AuthConfig,
    pub children: Children,
}

/// Auth provider component
///
/// State lives as long as this component stays mounted and is not
/// persisted; a page reload starts anonymous again.
#[function_component(AuthProvider)]
pub fn auth_provider(props: &AuthProviderProps) -> Html {
    let store = use_reducer(AuthStore::default);
    let client = use_memo(props.config.clone(), |config| {
        SanctumClient::from_config(config).map_err(|e| e.to_string())
    });

    {
        let base_url = props.config.base_url.clone();
        use_effect_with((), move |_| {
            debug!(%base_url, "auth provider mounted");
            || debug!("auth provider unmounted")
        });
    }

    let context = AuthContext {
        store,
        client,
        redirect_to: Rc::from(props.config.redirect_path.as_str()),
    };

    html! {
        <ContextProvider<AuthContext> context={context}>
            {props.children.clone()}
        </ContextProvider<AuthContext>>
    }
}

/// Hook to use auth context
#[hook]
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>()
        .expect("AuthContext not found. Make sure to wrap your component with AuthProvider")
}

/// Hook to get current auth state
#[hook]
pub fn use_auth_state() -> AuthState {
    let auth = use_auth();
    auth.state().clone()
}

/// Hook to check if authenticated
#[hook]
pub fn use_is_authenticated() -> bool {
    let auth = use_auth();
    auth.is_authenticated()
}
