use std::sync::Arc;

use axum::response::Html;
use tera::{Context, Tera};

use crate::error::AppError;

/// Thin wrapper over the template engine.
///
/// Templates are loaded once at startup; handlers only see
/// [`Renderer::render`].
#[derive(Clone)]
pub struct Renderer {
    tera: Arc<Tera>,
}

impl Renderer {
    /// Load every template matching the glob (normally `templates/**/*.html`).
    ///
    /// # Errors
    ///
    /// Returns an error if any template fails to parse.
    pub fn from_glob(glob: &str) -> anyhow::Result<Self> {
        let tera = Tera::new(glob)
            .map_err(|e| anyhow::anyhow!("Failed to load templates from {glob}: {e}"))?;
        Ok(Self {
            tera: Arc::new(tera),
        })
    }

    /// Render a view with the given context.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the view is unknown or rendering fails.
    pub fn render(&self, view: &str, context: &Context) -> Result<Html<String>, AppError> {
        self.tera
            .render(view, context)
            .map(Html)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to render {view}: {e}")))
    }
}
