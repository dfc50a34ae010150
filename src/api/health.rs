//! Health check endpoint.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::server::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub templates: TemplateHealthResponse,
}

#[derive(Debug, Serialize)]
pub struct TemplateHealthResponse {
    pub source: String,
    pub default_locale: String,
    /// Fetch URL or template directory the renderer reads from
    pub location: String,
}

/// GET /health - Liveness and template source summary
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let templates = &state.settings.templates;
    let location = match templates.fetch_url() {
        Some(url) => url.to_string(),
        None => templates.root.join(&templates.directory).display().to_string(),
    };

    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.started_at.elapsed().as_secs(),
        templates: TemplateHealthResponse {
            source: state.renderer.source_kind().to_string(),
            default_locale: state.renderer.default_locale().to_string(),
            location,
        },
    })
}
