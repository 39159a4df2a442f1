use axum::Json;
use axum::Router;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum_extra::extract::cookie::CookieJar;
use serde::{Deserialize, Serialize};
use tera::Context;
use uuid::Uuid;

use crate::auth::{self, PageAuth};
use crate::entities::cart::LineItem;
use crate::entities::{game, platform};
use crate::error::AppError;
use crate::negotiate::{self, RequestFormat, ResponseFormat};
use crate::repos::{CartRepo, GameDraft, GamePatch, GameRepo, PlatformRepo};
use crate::routes::pages;
use crate::slug::slugify;
use crate::state::AppState;

/// Game catalog router, including the platform-scoped listing and the
/// add-to-cart action.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/games", get(index).post(create))
        .route("/games/new", get(new_form))
        .route(
            "/games/{slug}",
            get(show).put(update).post(update).delete(destroy),
        )
        .route("/games/{slug}/edit", get(edit_form))
        .route("/platforms/{slug}/games", get(by_platform))
        .route("/ajouter/{slug}", post(add_to_cart))
}

// ─────────────────────────────────────────────────────────────────────────────
// DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// JSON body for create and (partial) update.
#[derive(Debug, Default, Deserialize)]
struct GamePayload {
    name: Option<String>,
    platform_slug: Option<String>,
    summary: Option<String>,
    genre: Option<String>,
    release_year: Option<i32>,
    cover_url: Option<String>,
}

/// Form body: everything arrives as text.
#[derive(Debug, Deserialize)]
struct GameFormPayload {
    name: Option<String>,
    platform_slug: Option<String>,
    summary: Option<String>,
    genre: Option<String>,
    release_year: Option<String>,
    cover_url: Option<String>,
}

#[derive(Debug, Serialize)]
struct GameResponse {
    id: Uuid,
    name: String,
    slug: String,
    summary: Option<String>,
    genre: Option<String>,
    release_year: Option<i32>,
    cover_url: Option<String>,
    platform_slug: Option<String>,
}

impl GameResponse {
    fn new(g: game::Model, platform: Option<&platform::Model>) -> Self {
        Self {
            id: g.id,
            name: g.name,
            slug: g.slug,
            summary: g.summary,
            genre: g.genre,
            release_year: g.release_year,
            cover_url: g.cover_url,
            platform_slug: platform.map(|p| p.slug.clone()),
        }
    }
}

#[derive(Debug, Serialize)]
struct CartResponse {
    id: Uuid,
    code: Option<i32>,
    items: Vec<LineItem>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Validation
// ─────────────────────────────────────────────────────────────────────────────

/// Collected raw field values, before validation.
#[derive(Debug, Default)]
struct GameFields {
    name: Option<String>,
    platform_slug: Option<String>,
    summary: Option<String>,
    genre: Option<String>,
    release_year: Option<i32>,
    cover_url: Option<String>,
}

impl From<GamePayload> for GameFields {
    fn from(payload: GamePayload) -> Self {
        Self {
            name: payload.name,
            platform_slug: payload.platform_slug,
            summary: payload.summary,
            genre: payload.genre,
            release_year: payload.release_year,
            cover_url: payload.cover_url,
        }
    }
}

impl From<GameFormPayload> for GameFields {
    fn from(payload: GameFormPayload) -> Self {
        Self {
            name: payload.name,
            platform_slug: payload.platform_slug,
            summary: payload.summary.filter(|s| !s.trim().is_empty()),
            genre: payload.genre.filter(|g| !g.trim().is_empty()),
            // free text; unparseable years fall through as absent
            release_year: payload.release_year.and_then(|y| y.trim().parse().ok()),
            cover_url: payload.cover_url.filter(|u| !u.trim().is_empty()),
        }
    }
}

/// Validate the assembled fields, resolving the platform reference.
///
/// The outer `Result` is for infrastructure failures; the inner one holds
/// either a ready draft or the validation error list.
async fn assemble_draft(
    state: &AppState,
    fields: GameFields,
) -> Result<Result<GameDraft, Vec<String>>, AppError> {
    let mut errors = Vec::new();

    let name = fields.name.unwrap_or_default().trim().to_string();
    if name.is_empty() {
        errors.push("The name field is required.".to_string());
    }

    let platform_slug = fields.platform_slug.unwrap_or_default().trim().to_string();
    let platform_id = if platform_slug.is_empty() {
        errors.push("The platform_slug field is required.".to_string());
        None
    } else {
        let found = PlatformRepo::find_by_slug(&state.db, &platform_slug).await?;
        if found.is_none() {
            errors.push("This platform does not exist.".to_string());
        }
        found.map(|p| p.id)
    };

    if !errors.is_empty() {
        return Ok(Err(errors));
    }

    Ok(Ok(GameDraft {
        slug: slugify(&name),
        name,
        platform_id: platform_id.unwrap_or_default(),
        summary: fields.summary,
        genre: fields.genre,
        release_year: fields.release_year,
        cover_url: fields.cover_url,
    }))
}

/// Reload a game with its platform and shape it for a JSON response.
async fn reload_response(state: &AppState, slug: &str) -> Result<GameResponse, AppError> {
    GameRepo::find_by_slug_with_platform(&state.db, slug)
        .await?
        .map(|(g, p)| GameResponse::new(g, p.as_ref()))
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Game {slug} vanished mid-request")))
}

// ─────────────────────────────────────────────────────────────────────────────
// Handlers
// ─────────────────────────────────────────────────────────────────────────────

/// `GET /games`
async fn index(
    State(state): State<AppState>,
    jar: CookieJar,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let games: Vec<GameResponse> = GameRepo::find_all_with_platforms(&state.db)
        .await?
        .into_iter()
        .map(|(g, p)| GameResponse::new(g, p.as_ref()))
        .collect();

    match negotiate::response_format(&headers) {
        ResponseFormat::Json => Ok(Json(games).into_response()),
        ResponseFormat::Html => {
            let PageAuth { logged_in, jar } = auth::page_auth(&state, jar).await;
            let mut ctx = Context::new();
            ctx.insert("games", &games);
            ctx.insert("is_logged_in", &logged_in);
            let page = state.renderer.render("games/index.html", &ctx)?;
            Ok((jar, page).into_response())
        }
    }
}

/// `GET /games/new`
async fn new_form(State(state): State<AppState>) -> Result<Response, AppError> {
    let mut ctx = Context::new();
    ctx.insert("action", "/games");
    ctx.insert("call_to_action", "Create");
    let page = state.renderer.render("games/form.html", &ctx)?;
    Ok(page.into_response())
}

/// `GET /games/{slug}`
async fn show(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(slug): Path<String>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let Some((found, platform)) = GameRepo::find_by_slug_with_platform(&state.db, &slug).await?
    else {
        return Ok(pages::missing_record(
            &state,
            &headers,
            "This game does not exist.",
        ));
    };
    let game = GameResponse::new(found, platform.as_ref());

    match negotiate::response_format(&headers) {
        ResponseFormat::Json => Ok(Json(game).into_response()),
        ResponseFormat::Html => {
            let PageAuth { logged_in, jar } = auth::page_auth(&state, jar).await;
            let mut ctx = Context::new();
            ctx.insert("game", &game);
            ctx.insert("is_logged_in", &logged_in);
            let page = state.renderer.render("games/show.html", &ctx)?;
            Ok((jar, page).into_response())
        }
    }
}

/// `GET /games/{slug}/edit`
async fn edit_form(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let Some((found, platform)) = GameRepo::find_by_slug_with_platform(&state.db, &slug).await?
    else {
        return Ok(pages::missing_record(
            &state,
            &headers,
            "This game does not exist.",
        ));
    };
    let game = GameResponse::new(found, platform.as_ref());

    let mut ctx = Context::new();
    ctx.insert("game", &game);
    ctx.insert("action", &format!("/games/{}", game.slug));
    ctx.insert("call_to_action", "Save");
    let page = state.renderer.render("games/form.html", &ctx)?;
    Ok(page.into_response())
}

/// `GET /platforms/{slug}/games`
async fn by_platform(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(slug): Path<String>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let Some(platform) = PlatformRepo::find_by_slug(&state.db, &slug).await? else {
        return Ok(pages::missing_record(
            &state,
            &headers,
            "This platform does not exist.",
        ));
    };

    let games: Vec<GameResponse> = GameRepo::find_by_platform(&state.db, platform.id)
        .await?
        .into_iter()
        .map(|g| GameResponse::new(g, Some(&platform)))
        .collect();

    match negotiate::response_format(&headers) {
        ResponseFormat::Json => Ok(Json(games).into_response()),
        ResponseFormat::Html => {
            let PageAuth { logged_in, jar } = auth::page_auth(&state, jar).await;
            let mut ctx = Context::new();
            ctx.insert("games", &games);
            ctx.insert("platform_name", &platform.name);
            ctx.insert("is_logged_in", &logged_in);
            let page = state.renderer.render("games/index.html", &ctx)?;
            Ok((jar, page).into_response())
        }
    }
}

/// `POST /games` — create from JSON or a form, selected by `Content-Type`.
async fn create(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, AppError> {
    let (fields, from_form) = match negotiate::request_format(&headers) {
        RequestFormat::Json => {
            let payload: GamePayload =
                serde_json::from_slice(&body).map_err(|_| AppError::Malformed)?;
            (GameFields::from(payload), false)
        }
        RequestFormat::Form => {
            let payload: GameFormPayload =
                serde_urlencoded::from_bytes(&body).map_err(|_| AppError::Malformed)?;
            (GameFields::from(payload), true)
        }
        RequestFormat::Unsupported => return Err(AppError::Malformed),
    };

    let draft = assemble_draft(&state, fields)
        .await?
        .map_err(AppError::Validation)?;

    if GameRepo::slug_taken(&state.db, &draft.slug, None).await? {
        return Err(AppError::Validation(vec![
            "A game with this slug already exists.".to_string(),
        ]));
    }

    let created = GameRepo::insert(&state.db, draft).await?;

    if from_form {
        Ok(Redirect::to(&format!("/games/{}", created.slug)).into_response())
    } else {
        let response = reload_response(&state, &created.slug).await?;
        Ok((StatusCode::CREATED, Json(response)).into_response())
    }
}

/// `PUT /games/{slug}` (JSON) and `POST /games/{slug}` (form).
///
/// JSON merges the submitted fields onto the stored record and keeps the
/// slug; a form resubmits the whole record and re-derives the slug from
/// the name.
async fn update(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, AppError> {
    let Some(existing) = GameRepo::find_by_slug(&state.db, &slug).await? else {
        return Err(AppError::NotFound);
    };

    match negotiate::request_format(&headers) {
        RequestFormat::Json => {
            let payload: GamePayload =
                serde_json::from_slice(&body).map_err(|_| AppError::Malformed)?;

            let mut errors = Vec::new();
            if payload.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
                errors.push("The name field is required.".to_string());
            }

            // A submitted platform reference must resolve.
            let platform_id = match payload.platform_slug.as_deref() {
                Some(platform_slug) => {
                    let found = PlatformRepo::find_by_slug(&state.db, platform_slug).await?;
                    if found.is_none() {
                        errors.push("This platform does not exist.".to_string());
                    }
                    found.map(|p| p.id)
                }
                None => None,
            };

            if !errors.is_empty() {
                return Err(AppError::Validation(errors));
            }

            let patch = GamePatch {
                name: payload.name,
                slug: None,
                platform_id,
                summary: payload.summary,
                genre: payload.genre,
                release_year: payload.release_year,
                cover_url: payload.cover_url,
            };
            let updated = GameRepo::update(&state.db, existing, patch).await?;
            let response = reload_response(&state, &updated.slug).await?;
            Ok((StatusCode::CREATED, Json(response)).into_response())
        }
        RequestFormat::Form => {
            let payload: GameFormPayload =
                serde_urlencoded::from_bytes(&body).map_err(|_| AppError::Malformed)?;
            let draft = assemble_draft(&state, GameFields::from(payload))
                .await?
                .map_err(AppError::Validation)?;

            if GameRepo::slug_taken(&state.db, &draft.slug, Some(existing.id)).await? {
                return Err(AppError::Validation(vec![
                    "A game with this slug already exists.".to_string(),
                ]));
            }

            let patch = GamePatch {
                name: Some(draft.name),
                slug: Some(draft.slug),
                platform_id: Some(draft.platform_id),
                summary: draft.summary,
                genre: draft.genre,
                release_year: draft.release_year,
                cover_url: draft.cover_url,
            };
            let updated = GameRepo::update(&state.db, existing, patch).await?;
            Ok(Redirect::to(&format!("/games/{}", updated.slug)).into_response())
        }
        RequestFormat::Unsupported => Err(AppError::Malformed),
    }
}

/// `DELETE /games/{slug}`
async fn destroy(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Response, AppError> {
    let Some(existing) = GameRepo::find_by_slug(&state.db, &slug).await? else {
        return Err(AppError::NotFound);
    };

    GameRepo::remove(&state.db, existing.id).await?;
    Ok(StatusCode::NO_CONTENT.into_response())
}

/// `POST /ajouter/{slug}` — add a game to a cart.
///
/// Cart semantics beyond the stored shape are deliberately absent: each
/// call records a fresh single-line cart and hands the client back to the
/// cart page (or the cart as JSON). Games carry no price, so totals stay
/// at zero.
async fn add_to_cart(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let Some(found) = GameRepo::find_by_slug(&state.db, &slug).await? else {
        return Ok(pages::missing_record(
            &state,
            &headers,
            "This game does not exist.",
        ));
    };

    let line = LineItem {
        cover_url: found.cover_url,
        name: found.name,
        slug: found.slug,
        quantity: 1,
        subtotal: 0.0,
        total: 0.0,
    };
    let cart = CartRepo::insert(&state.db, &[line]).await?;

    match negotiate::response_format(&headers) {
        ResponseFormat::Json => {
            let items: Vec<LineItem> = serde_json::from_value(cart.items)?;
            let response = CartResponse {
                id: cart.id,
                code: cart.code,
                items,
            };
            Ok((StatusCode::CREATED, Json(response)).into_response())
        }
        ResponseFormat::Html => Ok(Redirect::to("/cart").into_response()),
    }
}
