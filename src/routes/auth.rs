use axum::Router;
use axum::extract::{Query, State};
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::get;
use axum_extra::extract::cookie::CookieJar;
use oauth2::{AuthorizationCode, CsrfToken, Scope, TokenResponse};
use serde::Deserialize;

use crate::error::AppError;
use crate::sessions::{self, SessionStore};
use crate::state::AppState;

/// Login, logout and the OAuth2 callback.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", get(login))
        .route("/logout", get(logout))
        .route("/oauth/callback", get(oauth_callback))
}

#[derive(Debug, Deserialize)]
struct CallbackQuery {
    code: String,
}

/// `GET /login` — redirect to the provider's authorization URL.
async fn login(State(state): State<AppState>) -> Response {
    let (auth_url, _csrf) = state
        .oauth
        .authorize_url(CsrfToken::new_random)
        .add_scope(Scope::new("email".to_string()))
        .url();

    Redirect::to(auth_url.as_str()).into_response()
}

/// `GET /oauth/callback` — exchange the authorization code for an access
/// token and store it in the session.
///
/// Exchange failures are logged and send the visitor home logged out; the
/// provider error never becomes an error response.
async fn oauth_callback(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(query): Query<CallbackQuery>,
) -> Result<Response, AppError> {
    let token_result = state
        .oauth
        .exchange_code(AuthorizationCode::new(query.code))
        .request_async(&reqwest::Client::new())
        .await;

    let token = match token_result {
        Ok(token) => token.access_token().secret().clone(),
        Err(err) => {
            tracing::error!("Failed to exchange authorization code: {err}");
            return Ok(Redirect::to("/").into_response());
        }
    };

    let session = match SessionStore::load(&state.db, &jar).await? {
        Some(session) => session,
        None => SessionStore::create(&state.db).await?,
    };
    let session = SessionStore::set_access_token(&state.db, session, token).await?;

    let jar = jar.add(sessions::session_cookie(&session.id, &state.config));
    Ok((jar, Redirect::to("/")).into_response())
}

/// `GET /logout` — destroy the session and drop the cookie.
///
/// A failed destroy is logged, never surfaced; the visitor still ends up
/// logged out from the browser's point of view.
async fn logout(State(state): State<AppState>, jar: CookieJar) -> Response {
    match SessionStore::load(&state.db, &jar).await {
        Ok(Some(session)) => {
            if let Err(err) = SessionStore::destroy(&state.db, &session.id).await {
                tracing::error!("Failed to destroy session: {err}");
            }
        }
        Ok(None) => {}
        Err(err) => tracing::error!("Failed to load session during logout: {err}"),
    }

    let jar = jar.remove(sessions::removal_cookie());
    (jar, Redirect::to("/")).into_response()
}
