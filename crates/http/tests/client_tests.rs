//! Integration tests for the Sanctum HTTP client

use sanctum_core::{AuthConfig, AuthSessionProvider, Credentials, LoginOutcome, SessionPhase};
use sanctum_http::{ClientError, SanctumClient};
use serde_json::json;
use wiremock::matchers::{body_json, header, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn credentials() -> Credentials {
    Credentials::new("jason@example.com", "secret")
}

fn login_body() -> serde_json::Value {
    json!({
        "data": {
            "token": "abc",
            "user": {
                "id": 1,
                "name": "Jason",
                "email": "jason@example.com",
                "email_verified_at": null,
                "remember_token": null,
                "created_at": "2024-03-01T10:00:00.000000Z",
                "updated_at": "2024-03-01T10:00:00.000000Z"
            }
        }
    })
}

async fn mount_csrf(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/sanctum/csrf-cookie"))
        .respond_with(
            ResponseTemplate::new(204)
                .append_header("set-cookie", "XSRF-TOKEN=tok%3D%3D; Path=/; SameSite=Lax")
                .append_header("set-cookie", "laravel_session=sess123; Path=/; HttpOnly"),
        )
        .expect(1)
        .mount(server)
        .await;
}

fn client_for(server: &MockServer) -> SanctumClient {
    SanctumClient::from_config(&AuthConfig::with_base_url(server.uri())).unwrap()
}

#[tokio::test]
async fn test_client_builder() {
    let client = SanctumClient::builder()
        .base_url("http://localhost:8000/")
        .header("ngrok-skip-browser-warning", "value")
        .build();

    assert!(client.is_ok());
    let client = client.unwrap();
    assert_eq!(client.base_url(), "http://localhost:8000");
}

#[tokio::test]
async fn test_client_builder_requires_base_url() {
    let result = SanctumClient::builder().build();
    assert!(matches!(result, Err(ClientError::Configuration(_))));
}

#[tokio::test]
async fn test_client_builder_rejects_bad_header() {
    let result = SanctumClient::builder()
        .base_url("http://localhost:8000")
        .header("bad header", "value")
        .build();
    assert!(matches!(result, Err(ClientError::Configuration(_))));
}

#[tokio::test]
async fn test_csrf_cookie_sends_fixed_headers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/sanctum/csrf-cookie"))
        .and(header("ngrok-skip-browser-warning", "value"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    client.csrf_cookie().await.unwrap();
}

#[tokio::test]
async fn test_external_login_posts_credentials() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/externalLogin"))
        .and(header("content-type", "application/json"))
        .and(header("ngrok-skip-browser-warning", "value"))
        .and(body_json(json!({
            "email": "jason@example.com",
            "password": "secret"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(login_body()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let payload = client.external_login(&credentials()).await.unwrap();

    assert_eq!(payload.token, "abc");
    assert_eq!(payload.user.id, Some(1));
    assert_eq!(payload.user.name.as_deref(), Some("Jason"));
}

#[tokio::test]
async fn test_cookie_is_replayed_with_xsrf_header() {
    let mock_server = MockServer::start().await;
    mount_csrf(&mock_server).await;

    Mock::given(method("POST"))
        .and(path("/externalLogin"))
        .and(header("x-xsrf-token", "tok=="))
        .and(header_exists("cookie"))
        .respond_with(ResponseTemplate::new(200).set_body_json(login_body()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    assert_eq!(client.xsrf_token(), None);

    client.csrf_cookie().await.unwrap();
    assert_eq!(client.xsrf_token().as_deref(), Some("tok=="));

    let payload = client.external_login(&credentials()).await.unwrap();
    assert_eq!(payload.token, "abc");
}

#[tokio::test]
async fn test_custom_paths_from_config() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/csrf"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = AuthConfig {
        csrf_cookie_path: "/api/csrf".to_string(),
        ..AuthConfig::with_base_url(mock_server.uri())
    };
    let client = SanctumClient::from_config(&config).unwrap();
    client.csrf_cookie().await.unwrap();
}

#[tokio::test]
async fn test_error_handling() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/externalLogin"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "message": "These credentials do not match our records.",
            "errors": { "email": ["These credentials do not match our records."] }
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let result = client.external_login(&credentials()).await;

    match result {
        Err(ClientError::Validation(message)) => {
            assert_eq!(message, "These credentials do not match our records.");
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_unauthorized_and_csrf_mismatch() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/sanctum/csrf-cookie"))
        .respond_with(ResponseTemplate::new(419).set_body_string("CSRF token mismatch."))
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/externalLogin"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    assert!(matches!(
        client.csrf_cookie().await,
        Err(ClientError::CsrfTokenMismatch(_))
    ));
    assert!(matches!(
        client.external_login(&credentials()).await,
        Err(ClientError::AuthenticationFailed(_))
    ));
}

#[tokio::test]
async fn test_malformed_login_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/externalLogin"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": "abc" })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let result = client.external_login(&credentials()).await;
    assert!(matches!(result, Err(ClientError::Serialization(_))));
}

#[tokio::test]
async fn test_provider_login_over_http() {
    let mock_server = MockServer::start().await;
    mount_csrf(&mock_server).await;

    Mock::given(method("POST"))
        .and(path("/externalLogin"))
        .and(header("x-xsrf-token", "tok=="))
        .respond_with(ResponseTemplate::new(200).set_body_json(login_body()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = AuthConfig::with_base_url(mock_server.uri());
    let provider = AuthSessionProvider::new(SanctumClient::from_config(&config).unwrap(), config);

    let outcome = provider.login(credentials(), None).await;

    let state = provider.snapshot();
    assert_eq!(outcome, LoginOutcome::Authenticated);
    assert!(state.is_authenticated());
    assert_eq!(state.access_token(), Some("abc"));
    assert_eq!(state.user.id, Some(1));
    assert!(!state.flags.is_loading);
    assert!(!state.flags.wrong_credentials);

    provider.logout();
    let state = provider.snapshot();
    assert!(!state.is_authenticated());
    assert_eq!(state.access_token(), None);
}

#[tokio::test]
async fn test_provider_flags_wrong_credentials_over_http() {
    let mock_server = MockServer::start().await;
    mount_csrf(&mock_server).await;

    Mock::given(method("POST"))
        .and(path("/externalLogin"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "message": "The given data was invalid."
        })))
        .mount(&mock_server)
        .await;

    let config = AuthConfig::with_base_url(mock_server.uri());
    let provider = AuthSessionProvider::new(SanctumClient::from_config(&config).unwrap(), config);

    let outcome = provider.login(credentials(), None).await;

    let state = provider.snapshot();
    assert_eq!(outcome, LoginOutcome::CredentialsRejected);
    assert!(!state.is_authenticated());
    assert!(state.flags.wrong_credentials);
    assert!(!state.flags.is_loading);
    assert_eq!(provider.phase(), SessionPhase::CredentialError);
}

#[tokio::test]
async fn test_provider_cookie_failure_sets_no_error_flag() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/sanctum/csrf-cookie"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/externalLogin"))
        .respond_with(ResponseTemplate::new(200).set_body_json(login_body()))
        .expect(0)
        .mount(&mock_server)
        .await;

    let config = AuthConfig::with_base_url(mock_server.uri());
    let provider = AuthSessionProvider::new(SanctumClient::from_config(&config).unwrap(), config);

    let outcome = provider.login(credentials(), None).await;

    let state = provider.snapshot();
    assert_eq!(outcome, LoginOutcome::CsrfCookieFailed);
    assert!(!state.flags.is_loading);
    assert!(!state.flags.wrong_credentials);
    assert!(!state.is_authenticated());
}

#[tokio::test]
async fn test_unreachable_backend_is_a_cookie_failure() {
    // Nothing listens on the discard port
    let config = AuthConfig {
        timeout_secs: Some(5),
        ..AuthConfig::with_base_url("http://127.0.0.1:9")
    };
    let provider = AuthSessionProvider::new(SanctumClient::from_config(&config).unwrap(), config);

    let outcome = provider.login(credentials(), None).await;

    assert_eq!(outcome, LoginOutcome::CsrfCookieFailed);
    assert!(!provider.snapshot().flags.wrong_credentials);
}
