//! Template source abstraction.
//!
//! A source knows how to turn a location string (`<locale>/<id>/<file>`)
//! into raw template text. The locale fallback policy lives here, once,
//! so the filesystem and HTTP implementations only deal with retrieval.

use std::time::Instant;

use async_trait::async_trait;

use crate::metrics::TemplateMetrics;

use super::path::template_location;
use super::types::{TemplateError, TemplateResult, TemplateView};

#[async_trait]
pub trait TemplateSource: Send + Sync {
    /// Short identifier used in logs and metrics (`local` or `remote`).
    fn kind(&self) -> &'static str;

    /// Retrieve the raw text stored at a single location.
    async fn fetch(&self, location: &str) -> TemplateResult<String>;

    /// Retrieve the raw text of `view` for `locale`.
    ///
    /// On a miss the default locale is tried exactly once, unless the
    /// requested locale already is the default.
    async fn read(
        &self,
        view: &TemplateView,
        locale: &str,
        default_locale: &str,
    ) -> TemplateResult<String> {
        let mut last_location = String::new();

        for (attempt, candidate) in candidate_locales(locale, default_locale).enumerate() {
            if attempt > 0 {
                tracing::info!(
                    source = self.kind(),
                    view = %view,
                    requested = %locale,
                    fallback = %candidate,
                    "Template missing for requested locale, using default locale"
                );
                TemplateMetrics::record_fallback(self.kind());
            }

            let location = match template_location(view, candidate) {
                Ok(location) => location,
                Err(e) if e.is_retrievable_miss() => {
                    tracing::debug!(source = self.kind(), error = %e, "Skipping unusable locale");
                    last_location = format!("{}/{}/{}", candidate, view.id, view.field.file_name());
                    continue;
                }
                Err(e) => return Err(e),
            };

            let started = Instant::now();
            let result = self.fetch(&location).await;
            TemplateMetrics::observe_fetch(self.kind(), started.elapsed());

            match result {
                Ok(content) => return Ok(content),
                Err(e) if e.is_retrievable_miss() => {
                    tracing::debug!(source = self.kind(), error = %e, "Template attempt failed");
                    last_location = e.location().map(str::to_string).unwrap_or(location);
                }
                Err(e) => return Err(e),
            }
        }

        tracing::warn!(
            source = self.kind(),
            location = %last_location,
            "No template found"
        );

        Err(TemplateError::FallbackExhausted {
            location: last_location,
            requested: locale.to_string(),
            default: default_locale.to_string(),
        })
    }
}

/// Locales to try, in order: the requested one, then the default if it differs.
pub fn candidate_locales<'a>(
    requested: &'a str,
    default_locale: &'a str,
) -> impl Iterator<Item = &'a str> {
    let fallback = (requested != default_locale).then_some(default_locale);
    std::iter::once(requested).chain(fallback)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    use crate::template::TemplateField;

    /// In-memory source that records every location it was asked for.
    struct RecordingSource {
        templates: HashMap<String, String>,
        requested: Mutex<Vec<String>>,
    }

    impl RecordingSource {
        fn new(templates: &[(&str, &str)]) -> Self {
            Self {
                templates: templates
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
                requested: Mutex::new(Vec::new()),
            }
        }

        fn requested(&self) -> Vec<String> {
            self.requested.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl TemplateSource for RecordingSource {
        fn kind(&self) -> &'static str {
            "memory"
        }

        async fn fetch(&self, location: &str) -> TemplateResult<String> {
            self.requested.lock().unwrap().push(location.to_string());
            self.templates
                .get(location)
                .cloned()
                .ok_or_else(|| TemplateError::NotFound {
                    location: location.to_string(),
                })
        }
    }

    fn welcome_html() -> TemplateView {
        TemplateView::new("welcome", TemplateField::Html)
    }

    #[test]
    fn test_candidate_locales() {
        assert_eq!(candidate_locales("fr", "en").collect::<Vec<_>>(), ["fr", "en"]);
        assert_eq!(candidate_locales("en", "en").collect::<Vec<_>>(), ["en"]);
    }

    #[tokio::test]
    async fn test_requested_locale_hit() {
        let source = RecordingSource::new(&[
            ("fr/welcome/body.html", "Bonjour"),
            ("en/welcome/body.html", "Hello"),
        ]);

        let content = source.read(&welcome_html(), "fr", "en").await.unwrap();
        assert_eq!(content, "Bonjour");
        assert_eq!(source.requested(), ["fr/welcome/body.html"]);
    }

    #[tokio::test]
    async fn test_falls_back_once_to_default() {
        let source = RecordingSource::new(&[("en/welcome/body.html", "Hello")]);

        let content = source.read(&welcome_html(), "fr", "en").await.unwrap();
        assert_eq!(content, "Hello");
        assert_eq!(
            source.requested(),
            ["fr/welcome/body.html", "en/welcome/body.html"]
        );
    }

    #[tokio::test]
    async fn test_fallback_exhausted() {
        let source = RecordingSource::new(&[]);

        let err = source.read(&welcome_html(), "fr", "en").await.unwrap_err();
        assert!(matches!(
            err,
            TemplateError::FallbackExhausted { ref location, .. } if location == "en/welcome/body.html"
        ));
        assert_eq!(source.requested().len(), 2);
    }

    #[tokio::test]
    async fn test_default_locale_miss_does_not_retry() {
        let source = RecordingSource::new(&[]);

        let err = source.read(&welcome_html(), "en", "en").await.unwrap_err();
        assert!(matches!(err, TemplateError::FallbackExhausted { .. }));
        assert_eq!(source.requested(), ["en/welcome/body.html"]);
    }

    #[tokio::test]
    async fn test_invalid_requested_locale_falls_back() {
        let source = RecordingSource::new(&[("en/welcome/body.html", "Hello")]);

        let content = source.read(&welcome_html(), "../fr", "en").await.unwrap();
        assert_eq!(content, "Hello");
        assert_eq!(source.requested(), ["en/welcome/body.html"]);
    }
}
