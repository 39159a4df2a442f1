mod auth;
mod games;
mod pages;
mod platforms;

use axum::Router;

use crate::state::AppState;

/// Build the complete application router.
///
/// One consolidated route table: static pages, the two catalog collections,
/// the session/OAuth endpoints, and a content-negotiated catch-all 404.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(pages::router())
        .merge(auth::router())
        .merge(platforms::router())
        .merge(games::router())
        .fallback(pages::not_found)
}
