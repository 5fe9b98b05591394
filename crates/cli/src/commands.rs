//! CLI commands

use anyhow::{Result, bail};
use clap::Subcommand;
use sanctum_core::{AuthConfig, AuthSessionProvider, AuthState, Credentials, LoginOutcome};
use sanctum_http::SanctumClient;
use serde_json::{Value, json};
use tracing::info;

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch the CSRF cookie, submit credentials and print the session
    Login {
        /// Account email
        #[arg(short = 'e', long)]
        email: String,

        /// Account password
        #[arg(short = 'p', long, env = "SANCTUM_PASSWORD", hide_env_values = true)]
        password: String,

        /// Print the access token instead of redacting it
        #[arg(long)]
        show_token: bool,
    },

    /// Sign in as the built-in development user without a backend
    FakeLogin,

    /// Print the effective configuration
    Config,
}

impl Commands {
    pub async fn execute(self, config: AuthConfig) -> Result<()> {
        match self {
            Self::Login {
                email,
                password,
                show_token,
            } => login(config, Credentials::new(email, password), show_token).await,
            Self::FakeLogin => fake_login(config),
            Self::Config => {
                print!("{}", toml::to_string_pretty(&config)?);
                Ok(())
            }
        }
    }
}

async fn login(config: AuthConfig, credentials: Credentials, show_token: bool) -> Result<()> {
    let cookie_url = config.csrf_cookie_url();
    let client = SanctumClient::from_config(&config)?;
    let provider = AuthSessionProvider::new(client, config);

    let outcome = provider.login(credentials, None).await;
    print_state(&provider.snapshot(), show_token)?;

    match outcome {
        LoginOutcome::Authenticated => {
            info!("Logged in");
            Ok(())
        }
        LoginOutcome::CsrfCookieFailed => bail!("could not fetch the CSRF cookie from {cookie_url}"),
        LoginOutcome::CredentialsRejected => bail!("wrong credentials"),
    }
}

fn fake_login(config: AuthConfig) -> Result<()> {
    let provider = AuthSessionProvider::new((), config);
    provider.fake_login(None);
    print_state(&provider.snapshot(), true)
}

fn print_state(state: &AuthState, show_token: bool) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&render_state(state, show_token)?)?);
    Ok(())
}

fn render_state(state: &AuthState, show_token: bool) -> Result<Value> {
    let mut rendered = serde_json::to_value(state)?;
    if !show_token {
        if let Some(token) = rendered.pointer_mut("/session/access_token") {
            if !token.is_null() {
                *token = json!("<redacted>");
            }
        }
    }
    Ok(json!({ "phase": state.phase(), "state": rendered }))
}
