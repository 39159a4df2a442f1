use axum::Router;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::get;
use axum::Json;
use axum_extra::extract::cookie::CookieJar;
use serde::{Deserialize, Serialize};
use tera::Context;
use uuid::Uuid;

use crate::auth::{self, PageAuth};
use crate::entities::platform;
use crate::error::AppError;
use crate::negotiate::{self, RequestFormat, ResponseFormat};
use crate::repos::{PlatformDraft, PlatformPatch, PlatformRepo};
use crate::routes::pages;
use crate::slug::slugify;
use crate::state::AppState;

/// Platform catalog router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/platforms", get(index).post(create))
        .route("/platforms/new", get(new_form))
        .route(
            "/platforms/{slug}",
            get(show).put(update).post(update).delete(destroy),
        )
        .route("/platforms/{slug}/edit", get(edit_form))
}

// ─────────────────────────────────────────────────────────────────────────────
// DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// JSON body for create and (partial) update.
#[derive(Debug, Default, Deserialize)]
struct PlatformPayload {
    name: Option<String>,
    platform_logo: Option<LogoPayload>,
}

#[derive(Debug, Default, Deserialize)]
struct LogoPayload {
    url: Option<String>,
    width: Option<f64>,
    height: Option<f64>,
}

/// Form body: logo fields come in flat, numbers as text.
#[derive(Debug, Deserialize)]
struct PlatformFormPayload {
    name: Option<String>,
    platform_logo_url: Option<String>,
    platform_logo_width: Option<String>,
    platform_logo_height: Option<String>,
}

#[derive(Debug, Serialize)]
struct PlatformResponse {
    id: Uuid,
    name: String,
    slug: String,
    platform_logo: LogoResponse,
}

#[derive(Debug, Serialize)]
struct LogoResponse {
    url: String,
    width: f64,
    height: f64,
}

impl From<platform::Model> for PlatformResponse {
    fn from(p: platform::Model) -> Self {
        Self {
            id: p.id,
            name: p.name,
            slug: p.slug,
            platform_logo: LogoResponse {
                url: p.logo_url,
                width: p.logo_width,
                height: p.logo_height,
            },
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Validation
// ─────────────────────────────────────────────────────────────────────────────

/// Collected raw field values, before validation. Both input modes funnel
/// into this shape.
#[derive(Debug, Default)]
struct PlatformFields {
    name: Option<String>,
    logo_url: Option<String>,
    logo_width: Option<f64>,
    logo_height: Option<f64>,
}

impl From<PlatformPayload> for PlatformFields {
    fn from(payload: PlatformPayload) -> Self {
        let logo = payload.platform_logo.unwrap_or_default();
        Self {
            name: payload.name,
            logo_url: logo.url,
            logo_width: logo.width,
            logo_height: logo.height,
        }
    }
}

impl From<PlatformFormPayload> for PlatformFields {
    fn from(payload: PlatformFormPayload) -> Self {
        Self {
            name: payload.name,
            logo_url: payload.platform_logo_url,
            // parse like the form submitted free text; unparseable values
            // fall through as missing and fail validation
            logo_width: payload.platform_logo_width.and_then(|w| w.parse().ok()),
            logo_height: payload.platform_logo_height.and_then(|h| h.parse().ok()),
        }
    }
}

/// Validate the assembled fields and derive the slug from the name.
fn assemble_draft(fields: PlatformFields) -> Result<PlatformDraft, Vec<String>> {
    let mut errors = Vec::new();

    let name = fields.name.unwrap_or_default().trim().to_string();
    if name.is_empty() {
        errors.push("The name field is required.".to_string());
    }

    let logo_url = fields.logo_url.unwrap_or_default().trim().to_string();
    if logo_url.is_empty() {
        errors.push("The platform_logo.url field is required.".to_string());
    }

    let logo_width = fields.logo_width.filter(|w| *w > 0.0);
    if logo_width.is_none() {
        errors.push("The platform_logo.width field must be a positive number.".to_string());
    }

    let logo_height = fields.logo_height.filter(|h| *h > 0.0);
    if logo_height.is_none() {
        errors.push("The platform_logo.height field must be a positive number.".to_string());
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(PlatformDraft {
        slug: slugify(&name),
        name,
        logo_url,
        logo_width: logo_width.unwrap_or_default(),
        logo_height: logo_height.unwrap_or_default(),
    })
}

// ─────────────────────────────────────────────────────────────────────────────
// Handlers
// ─────────────────────────────────────────────────────────────────────────────

/// `GET /platforms`
async fn index(
    State(state): State<AppState>,
    jar: CookieJar,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let platforms: Vec<PlatformResponse> = PlatformRepo::find_all(&state.db)
        .await?
        .into_iter()
        .map(PlatformResponse::from)
        .collect();

    match negotiate::response_format(&headers) {
        ResponseFormat::Json => Ok(Json(platforms).into_response()),
        ResponseFormat::Html => {
            let PageAuth { logged_in, jar } = auth::page_auth(&state, jar).await;
            let mut ctx = Context::new();
            ctx.insert("platforms", &platforms);
            ctx.insert("is_logged_in", &logged_in);
            let page = state.renderer.render("platforms/index.html", &ctx)?;
            Ok((jar, page).into_response())
        }
    }
}

/// `GET /platforms/new`
async fn new_form(State(state): State<AppState>) -> Result<Response, AppError> {
    let mut ctx = Context::new();
    ctx.insert("action", "/platforms");
    ctx.insert("call_to_action", "Create");
    let page = state.renderer.render("platforms/form.html", &ctx)?;
    Ok(page.into_response())
}

/// `GET /platforms/{slug}`
async fn show(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(slug): Path<String>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let Some(found) = PlatformRepo::find_by_slug(&state.db, &slug).await? else {
        return Ok(pages::missing_record(
            &state,
            &headers,
            "This platform does not exist.",
        ));
    };
    let platform = PlatformResponse::from(found);

    match negotiate::response_format(&headers) {
        ResponseFormat::Json => Ok(Json(platform).into_response()),
        ResponseFormat::Html => {
            let PageAuth { logged_in, jar } = auth::page_auth(&state, jar).await;
            let mut ctx = Context::new();
            ctx.insert("platform", &platform);
            ctx.insert("is_logged_in", &logged_in);
            let page = state.renderer.render("platforms/show.html", &ctx)?;
            Ok((jar, page).into_response())
        }
    }
}

/// `GET /platforms/{slug}/edit`
async fn edit_form(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let Some(found) = PlatformRepo::find_by_slug(&state.db, &slug).await? else {
        return Ok(pages::missing_record(
            &state,
            &headers,
            "This platform does not exist.",
        ));
    };
    let platform = PlatformResponse::from(found);

    let mut ctx = Context::new();
    ctx.insert("platform", &platform);
    ctx.insert("action", &format!("/platforms/{}", platform.slug));
    ctx.insert("call_to_action", "Save");
    let page = state.renderer.render("platforms/form.html", &ctx)?;
    Ok(page.into_response())
}

/// `POST /platforms` — create from JSON or a form, selected by `Content-Type`.
async fn create(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, AppError> {
    let (fields, from_form) = match negotiate::request_format(&headers) {
        RequestFormat::Json => {
            let payload: PlatformPayload =
                serde_json::from_slice(&body).map_err(|_| AppError::Malformed)?;
            (PlatformFields::from(payload), false)
        }
        RequestFormat::Form => {
            let payload: PlatformFormPayload =
                serde_urlencoded::from_bytes(&body).map_err(|_| AppError::Malformed)?;
            (PlatformFields::from(payload), true)
        }
        RequestFormat::Unsupported => return Err(AppError::Malformed),
    };

    let draft = assemble_draft(fields).map_err(AppError::Validation)?;

    if PlatformRepo::slug_taken(&state.db, &draft.slug, None).await? {
        return Err(AppError::Validation(vec![
            "A platform with this slug already exists.".to_string(),
        ]));
    }

    let created = PlatformRepo::insert(&state.db, draft).await?;

    if from_form {
        Ok(Redirect::to(&format!("/platforms/{}", created.slug)).into_response())
    } else {
        Ok((StatusCode::CREATED, Json(PlatformResponse::from(created))).into_response())
    }
}

/// `PUT /platforms/{slug}` (JSON) and `POST /platforms/{slug}` (form).
///
/// JSON merges the submitted fields onto the stored record and keeps the
/// slug; a form resubmits the whole record and re-derives the slug from
/// the name. Last write wins either way.
async fn update(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, AppError> {
    let Some(existing) = PlatformRepo::find_by_slug(&state.db, &slug).await? else {
        return Err(AppError::NotFound);
    };

    match negotiate::request_format(&headers) {
        RequestFormat::Json => {
            let payload: PlatformPayload =
                serde_json::from_slice(&body).map_err(|_| AppError::Malformed)?;
            let logo = payload.platform_logo.unwrap_or_default();

            // Validate the merged record, not just the delta.
            let merged = PlatformFields {
                name: payload.name.clone().or_else(|| Some(existing.name.clone())),
                logo_url: logo.url.clone().or_else(|| Some(existing.logo_url.clone())),
                logo_width: logo.width.or(Some(existing.logo_width)),
                logo_height: logo.height.or(Some(existing.logo_height)),
            };
            assemble_draft(merged).map_err(AppError::Validation)?;

            let patch = PlatformPatch {
                name: payload.name,
                slug: None,
                logo_url: logo.url,
                logo_width: logo.width,
                logo_height: logo.height,
            };
            let updated = PlatformRepo::update(&state.db, existing, patch).await?;
            Ok((StatusCode::CREATED, Json(PlatformResponse::from(updated))).into_response())
        }
        RequestFormat::Form => {
            let payload: PlatformFormPayload =
                serde_urlencoded::from_bytes(&body).map_err(|_| AppError::Malformed)?;
            let draft = assemble_draft(PlatformFields::from(payload))
                .map_err(AppError::Validation)?;

            if PlatformRepo::slug_taken(&state.db, &draft.slug, Some(existing.id)).await? {
                return Err(AppError::Validation(vec![
                    "A platform with this slug already exists.".to_string(),
                ]));
            }

            let patch = PlatformPatch {
                name: Some(draft.name),
                slug: Some(draft.slug),
                logo_url: Some(draft.logo_url),
                logo_width: Some(draft.logo_width),
                logo_height: Some(draft.logo_height),
            };
            let updated = PlatformRepo::update(&state.db, existing, patch).await?;
            Ok(Redirect::to(&format!("/platforms/{}", updated.slug)).into_response())
        }
        RequestFormat::Unsupported => Err(AppError::Malformed),
    }
}

/// `DELETE /platforms/{slug}`
async fn destroy(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Response, AppError> {
    let Some(existing) = PlatformRepo::find_by_slug(&state.db, &slug).await? else {
        return Err(AppError::NotFound);
    };

    PlatformRepo::remove(&state.db, existing.id).await?;
    Ok(StatusCode::NO_CONTENT.into_response())
}
