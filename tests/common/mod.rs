use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use http_body_util::BodyExt;
use migration::{Migrator, MigratorTrait};
use tower::ServiceExt;

use vgdb::auth::oauth;
use vgdb::config::{Config, Environment};
use vgdb::render::Renderer;
use vgdb::state::AppState;

/// Secret shared between the test token mint and the app under test.
pub const TEST_JWT_SECRET: &str = "test-secret-key-for-testing-only-32chars";

/// Audience the app under test expects in access tokens.
pub const TEST_AUDIENCE: &str = "catalog-api";

/// Build the application state over a fresh in-memory database.
#[allow(clippy::expect_used)]
pub async fn test_state() -> AppState {
    let db = sea_orm::Database::connect("sqlite::memory:")
        .await
        .unwrap_or_default();
    Migrator::up(&db, None).await.unwrap_or_default();

    let config = Config {
        database_url: String::new(),
        server_host: std::net::IpAddr::from([127, 0, 0, 1]),
        server_port: 0,
        environment: Environment::Development,
        log_level: "warn".to_string(),
        oauth_client_id: "test-client".to_string(),
        oauth_client_secret: "test-secret".to_string(),
        oauth_auth_url: "http://localhost:9999/oauth/authorize".to_string(),
        oauth_token_url: "http://localhost:9999/oauth/token".to_string(),
        oauth_redirect_uri: "http://localhost:8080/oauth/callback".to_string(),
        oauth_audience: TEST_AUDIENCE.to_string(),
        jwt_algorithm: "HS256".to_string(),
        jwt_secret: TEST_JWT_SECRET.to_string(),
    };

    let oauth = oauth::client(&config).expect("test OAuth client should build");
    let renderer =
        Renderer::from_glob("templates/**/*.html").expect("test templates should load");

    AppState {
        db,
        config,
        oauth,
        renderer,
    }
}

/// Build the router plus the state backing it (for direct database access).
pub async fn test_app() -> (Router, AppState) {
    let state = test_state().await;
    let app = vgdb::routes::router().with_state(state.clone());
    (app, state)
}

/// Send a request and return (status, response headers, body).
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    headers: &[(&str, &str)],
    body: Option<Vec<u8>>,
) -> (StatusCode, HeaderMap, String) {
    let mut builder = Request::builder().method(method).uri(uri);
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    let request = builder
        .body(body.map_or_else(Body::empty, Body::from))
        .unwrap_or_default();

    let response = app.clone().oneshot(request).await.unwrap_or_default();

    let status = response.status();
    let response_headers = response.headers().clone();
    let bytes = response
        .into_body()
        .collect()
        .await
        .map(http_body_util::Collected::to_bytes)
        .unwrap_or_default();
    let body_str = String::from_utf8(bytes.to_vec()).unwrap_or_default();

    (status, response_headers, body_str)
}

/// GET with no `Accept` header (the HTML path).
pub async fn get(app: &Router, uri: &str) -> (StatusCode, String) {
    let (status, _, body) = send(app, "GET", uri, &[], None).await;
    (status, body)
}

/// GET with `Accept: application/json`.
pub async fn get_json(app: &Router, uri: &str) -> (StatusCode, String) {
    let (status, _, body) = send(app, "GET", uri, &[("accept", "application/json")], None).await;
    (status, body)
}

/// GET the HTML path carrying a session cookie.
pub async fn get_with_cookie(app: &Router, uri: &str, cookie: &str) -> (StatusCode, String) {
    let (status, _, body) = send(app, "GET", uri, &[("cookie", cookie)], None).await;
    (status, body)
}

/// POST a JSON body.
pub async fn post_json(
    app: &Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, String) {
    let (status, _, response) = send(
        app,
        "POST",
        uri,
        &[
            ("content-type", "application/json"),
            ("accept", "application/json"),
        ],
        Some(body.to_string().into_bytes()),
    )
    .await;
    (status, response)
}

/// PUT a JSON body.
pub async fn put_json(app: &Router, uri: &str, body: &serde_json::Value) -> (StatusCode, String) {
    let (status, _, response) = send(
        app,
        "PUT",
        uri,
        &[
            ("content-type", "application/json"),
            ("accept", "application/json"),
        ],
        Some(body.to_string().into_bytes()),
    )
    .await;
    (status, response)
}

/// POST a form-encoded body; returns headers so redirects can be asserted.
pub async fn post_form(app: &Router, uri: &str, body: &str) -> (StatusCode, HeaderMap, String) {
    send(
        app,
        "POST",
        uri,
        &[("content-type", "application/x-www-form-urlencoded")],
        Some(body.as_bytes().to_vec()),
    )
    .await
}

/// DELETE (no body).
pub async fn delete(app: &Router, uri: &str) -> (StatusCode, String) {
    let (status, _, body) = send(app, "DELETE", uri, &[], None).await;
    (status, body)
}
