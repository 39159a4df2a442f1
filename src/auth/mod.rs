pub mod jwt;
pub mod oauth;

use axum_extra::extract::cookie::CookieJar;

use crate::sessions::{self, SessionStore};
use crate::state::AppState;

/// Outcome of the per-request session gate for HTML renders.
///
/// Carries the (possibly updated) cookie jar so a cleared session also
/// drops its cookie in the same response.
pub struct PageAuth {
    pub logged_in: bool,
    pub jar: CookieJar,
}

/// Resolve the viewer's login state for a rendered page.
///
/// 1. No session or no stored access token: logged out.
/// 2. Token present: verify it as a JWT. Success renders logged in;
///    failure destroys the session and renders logged out. Verification
///    errors never escape as error responses.
pub async fn page_auth(state: &AppState, jar: CookieJar) -> PageAuth {
    let session = match SessionStore::load(&state.db, &jar).await {
        Ok(Some(session)) => session,
        Ok(None) => {
            return PageAuth {
                logged_in: false,
                jar,
            };
        }
        Err(err) => {
            tracing::error!("Failed to load session: {err}");
            return PageAuth {
                logged_in: false,
                jar,
            };
        }
    };

    let Some(token) = session.access_token else {
        return PageAuth {
            logged_in: false,
            jar,
        };
    };

    match jwt::verify_access_token(&token, &state.config) {
        Ok(_) => PageAuth {
            logged_in: true,
            jar,
        },
        Err(err) => {
            tracing::warn!("Access token verification failed, clearing session: {err}");
            if let Err(destroy_err) = SessionStore::destroy(&state.db, &session.id).await {
                tracing::error!("Failed to destroy session: {destroy_err}");
            }
            PageAuth {
                logged_in: false,
                jar: jar.remove(sessions::removal_cookie()),
            }
        }
    }
}
