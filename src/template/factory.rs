//! Template source factory

use std::sync::Arc;
use std::time::Duration;

use crate::config::TemplateConfig;

use super::local::LocalSource;
use super::remote::RemoteSource;
use super::source::TemplateSource;
use super::types::TemplateResult;

/// Create a template source based on configuration.
///
/// Returns a [`RemoteSource`] when a non-empty `fetch_url` is configured,
/// otherwise a [`LocalSource`] reading from `root/directory`.
pub fn create_template_source(config: &TemplateConfig) -> TemplateResult<Arc<dyn TemplateSource>> {
    match config.fetch_url() {
        Some(url) => {
            tracing::info!(
                source = "remote",
                url = %url,
                timeout_seconds = config.fetch_timeout_seconds,
                "Creating remote template source"
            );
            let source = RemoteSource::new(url, Duration::from_secs(config.fetch_timeout_seconds))?;
            Ok(Arc::new(source))
        }
        None => {
            let source = LocalSource::new(&config.root, &config.directory);
            tracing::info!(
                source = "local",
                path = %source.base_dir().display(),
                "Creating local template source"
            );
            Ok(Arc::new(source))
        }
    }
}
