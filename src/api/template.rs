//! Template render endpoint.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::server::AppState;
use crate::template::Locals;

#[derive(Debug, Deserialize)]
pub struct RenderRequest {
    /// Template view, `"<id>/<field>"`
    pub view: String,
    /// Locale plus substitution variables
    pub locals: Locals,
}

#[derive(Debug, Serialize)]
pub struct RenderResponse {
    pub content: String,
}

/// POST /api/v1/templates/render - Render a template
#[tracing::instrument(
    name = "http.render_template",
    skip(state, request),
    fields(view = %request.view, locale = %request.locals.locale())
)]
pub async fn render_template(
    State(state): State<AppState>,
    Json(request): Json<RenderRequest>,
) -> Result<Json<RenderResponse>> {
    if request.view.trim().is_empty() {
        return Err(AppError::Validation("view must not be empty".to_string()));
    }

    state
        .renderer
        .render(&request.view, &request.locals)
        .await
        .map(|content| Json(RenderResponse { content }))
        .ok_or_else(|| AppError::NotFound(format!("No template for {}", request.view)))
}
