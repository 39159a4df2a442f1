use axum::Router;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Json;
use serde_json::json;
use tera::Context;

use crate::error::AppError;
use crate::negotiate::{self, ResponseFormat};
use crate::state::AppState;

/// Static pages: home, API description, cart.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .route("/api", get(api))
        .route("/cart", get(cart))
}

/// `GET /`
async fn home(State(state): State<AppState>) -> Result<Response, AppError> {
    let page = state.renderer.render("pages/home.html", &Context::new())?;
    Ok(page.into_response())
}

/// `GET /api`
async fn api(State(state): State<AppState>) -> Result<Response, AppError> {
    let page = state.renderer.render("pages/api.html", &Context::new())?;
    Ok(page.into_response())
}

/// `GET /cart`
async fn cart(State(state): State<AppState>) -> Result<Response, AppError> {
    let page = state.renderer.render("pages/cart.html", &Context::new())?;
    Ok(page.into_response())
}

/// Catch-all 404 for unmatched paths.
pub async fn not_found(State(state): State<AppState>, headers: HeaderMap) -> Response {
    match negotiate::response_format(&headers) {
        ResponseFormat::Json => {
            (StatusCode::NOT_FOUND, Json(json!({ "error": "Not Found" }))).into_response()
        }
        ResponseFormat::Html => match state.renderer.render("pages/not-found.html", &Context::new())
        {
            Ok(page) => (StatusCode::NOT_FOUND, page).into_response(),
            Err(err) => err.into_response(),
        },
    }
}

/// Content-negotiated 404 for a missing catalog record.
///
/// JSON clients get the entity-specific message; everyone else gets the
/// rendered not-found page.
pub fn missing_record(state: &AppState, headers: &HeaderMap, message: &str) -> Response {
    match negotiate::response_format(headers) {
        ResponseFormat::Json => {
            (StatusCode::NOT_FOUND, Json(json!({ "error": message }))).into_response()
        }
        ResponseFormat::Html => match state.renderer.render("pages/not-found.html", &Context::new())
        {
            Ok(page) => (StatusCode::NOT_FOUND, page).into_response(),
            Err(err) => err.into_response(),
        },
    }
}
