use std::sync::Arc;
use std::time::Instant;

use crate::config::Settings;
use crate::error::Result;
use crate::template::TemplateRenderer;

#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub renderer: Arc<TemplateRenderer>,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(settings: Settings) -> Result<Self> {
        let renderer = TemplateRenderer::from_config(&settings.templates)?;
        Ok(Self::with_renderer(settings, renderer))
    }

    /// Build state around an already constructed renderer.
    pub fn with_renderer(settings: Settings, renderer: TemplateRenderer) -> Self {
        Self {
            settings: Arc::new(settings),
            renderer: Arc::new(renderer),
            started_at: Instant::now(),
        }
    }
}
