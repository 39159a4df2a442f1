use sea_orm::DatabaseConnection;

use crate::auth::oauth::ConfiguredClient;
use crate::config::Config;
use crate::render::Renderer;

/// Shared application state available to all request handlers via Axum's `State` extractor.
///
/// The OAuth client is constructed once at startup and injected here, never
/// looked up from a global.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: Config,
    pub oauth: ConfiguredClient,
    pub renderer: Renderer,
}
