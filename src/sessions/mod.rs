//! Database-backed login sessions.
//!
//! A session is one row keyed by the raw `sessionId` cookie value and holds
//! at most one access token. Rows expire a fixed hour after creation;
//! expired rows are treated as absent and removed on the next load.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use uuid::Uuid;

use crate::config::{Config, Environment};
use crate::entities::session;
use crate::error::AppError;

/// Fixed name of the session cookie.
pub const COOKIE_NAME: &str = "sessionId";

/// Sessions live for one hour.
const SESSION_TTL_SECS: i64 = 3600;

pub struct SessionStore;

impl SessionStore {
    /// Load the session referenced by the request's cookie, if any.
    ///
    /// An expired row counts as no session and is deleted on the way out.
    ///
    /// # Errors
    ///
    /// Returns [`AppError`] if a database query fails.
    pub async fn load(
        db: &DatabaseConnection,
        jar: &CookieJar,
    ) -> Result<Option<session::Model>, AppError> {
        let Some(cookie) = jar.get(COOKIE_NAME) else {
            return Ok(None);
        };

        let Some(found) = session::Entity::find_by_id(cookie.value().to_owned())
            .one(db)
            .await?
        else {
            return Ok(None);
        };

        if found.expiry_date < Utc::now().fixed_offset() {
            Self::destroy(db, &found.id).await?;
            return Ok(None);
        }

        Ok(Some(found))
    }

    /// Create a fresh, logged-out session row.
    ///
    /// # Errors
    ///
    /// Returns [`AppError`] if the insert fails.
    pub async fn create(db: &DatabaseConnection) -> Result<session::Model, AppError> {
        let record = session::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            access_token: Set(None),
            expiry_date: Set((Utc::now() + chrono::Duration::seconds(SESSION_TTL_SECS))
                .fixed_offset()),
        };
        let session = record.insert(db).await?;
        Ok(session)
    }

    /// Store the access token obtained from the OAuth2 code exchange.
    ///
    /// # Errors
    ///
    /// Returns [`AppError`] if the update fails.
    pub async fn set_access_token(
        db: &DatabaseConnection,
        session: session::Model,
        token: String,
    ) -> Result<session::Model, AppError> {
        let mut active: session::ActiveModel = session.into();
        active.access_token = Set(Some(token));
        let session = active.update(db).await?;
        Ok(session)
    }

    /// Destroy a session row. Awaited and result-returning; callers decide
    /// whether a failure is fatal.
    ///
    /// # Errors
    ///
    /// Returns [`AppError`] if the delete fails.
    pub async fn destroy(db: &DatabaseConnection, id: &str) -> Result<(), AppError> {
        session::Entity::delete_by_id(id.to_owned()).exec(db).await?;
        Ok(())
    }
}

/// Build the session cookie for a freshly created session.
#[must_use]
pub fn session_cookie(id: &str, config: &Config) -> Cookie<'static> {
    Cookie::build((COOKIE_NAME, id.to_owned()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(config.environment == Environment::Production)
        .max_age(time::Duration::seconds(SESSION_TTL_SECS))
        .build()
}

/// Cookie used to clear the session cookie from the browser.
#[must_use]
pub fn removal_cookie() -> Cookie<'static> {
    Cookie::build((COOKIE_NAME, "")).path("/").build()
}
