//! Template renderer: source selection, retrieval and substitution.

use std::sync::Arc;

use serde::Serialize;

use crate::config::TemplateConfig;
use crate::metrics::TemplateMetrics;

use super::factory::create_template_source;
use super::locals::Locals;
use super::source::TemplateSource;
use super::substitution::substitute_variables;
use super::types::{TemplateField, TemplateResult, TemplateView};

/// Rendered email parts. A part is `None` when its template could not be resolved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EmailContent {
    pub subject: Option<String>,
    pub html: Option<String>,
    pub text: Option<String>,
}

impl EmailContent {
    /// Whether there is enough to send: a subject and at least one body.
    pub fn is_sendable(&self) -> bool {
        self.subject.is_some() && (self.html.is_some() || self.text.is_some())
    }
}

/// Resolves and renders templates from a single, fixed source.
///
/// The source is chosen when the renderer is built and never changes
/// between calls.
#[derive(Clone)]
pub struct TemplateRenderer {
    source: Arc<dyn TemplateSource>,
    default_locale: String,
}

impl std::fmt::Debug for TemplateRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemplateRenderer")
            .field("source", &self.source.kind())
            .field("default_locale", &self.default_locale)
            .finish()
    }
}

impl TemplateRenderer {
    pub fn new(source: Arc<dyn TemplateSource>, default_locale: impl Into<String>) -> Self {
        Self {
            source,
            default_locale: default_locale.into(),
        }
    }

    /// Build a renderer whose source follows `config`: remote when a fetch
    /// URL is set, the local template directory otherwise.
    pub fn from_config(config: &TemplateConfig) -> TemplateResult<Self> {
        let source = create_template_source(config)?;
        Ok(Self::new(source, config.default_locale.clone()))
    }

    pub fn source_kind(&self) -> &'static str {
        self.source.kind()
    }

    pub fn default_locale(&self) -> &str {
        &self.default_locale
    }

    /// Render `view` (`"<id>/<field>"`) with `locals`.
    ///
    /// Returns `None` when the template cannot be resolved for the requested
    /// or default locale, or when the view is not a known template field.
    /// Failures are logged, never returned.
    pub async fn render(&self, view: &str, locals: &Locals) -> Option<String> {
        let result = self.try_render(view, locals).await;
        self.settle(&view, locals, result)
    }

    /// Same as [`render`](Self::render) but keeps the reason for a miss.
    #[tracing::instrument(
        name = "template.render",
        skip(self, locals),
        fields(source = self.source.kind(), locale = %locals.locale())
    )]
    pub async fn try_render(&self, view: &str, locals: &Locals) -> TemplateResult<String> {
        let view = TemplateView::parse(view)?;
        self.render_view(&view, locals).await
    }

    async fn render_view(&self, view: &TemplateView, locals: &Locals) -> TemplateResult<String> {
        let content = self
            .source
            .read(view, locals.locale(), &self.default_locale)
            .await?;

        Ok(substitute_variables(&content, locals.variables()))
    }

    async fn render_part(&self, id: &str, field: TemplateField, locals: &Locals) -> Option<String> {
        let view = TemplateView::new(id, field);
        let result = self.render_view(&view, locals).await;
        self.settle(&view, locals, result)
    }

    fn settle(
        &self,
        view: &dyn std::fmt::Display,
        locals: &Locals,
        result: TemplateResult<String>,
    ) -> Option<String> {
        match result {
            Ok(content) => {
                TemplateMetrics::record_render(self.source.kind(), true);
                Some(content)
            }
            Err(e) => {
                tracing::debug!(view = %view, locale = %locals.locale(), error = %e, "Template unavailable");
                TemplateMetrics::record_render(self.source.kind(), false);
                None
            }
        }
    }

    /// Render the subject, HTML body and text body of an email template.
    pub async fn render_email(&self, id: &str, locals: &Locals) -> EmailContent {
        let (subject, html, text) = tokio::join!(
            self.render_part(id, TemplateField::Subject, locals),
            self.render_part(id, TemplateField::Html, locals),
            self.render_part(id, TemplateField::Text, locals),
        );

        EmailContent { subject, html, text }
    }

    /// Render the text body of an SMS template.
    pub async fn render_sms(&self, id: &str, locals: &Locals) -> Option<String> {
        self.render_part(id, TemplateField::Text, locals).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    use crate::template::{LocalSource, TemplateError};

    fn write_template(root: &Path, location: &str, content: &str) {
        let path = root.join("email-templates").join(location);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    fn local_renderer(root: &Path) -> TemplateRenderer {
        TemplateRenderer::new(Arc::new(LocalSource::new(root, "email-templates")), "en")
    }

    #[tokio::test]
    async fn test_render_substitutes_locals() {
        let dir = tempfile::tempdir().unwrap();
        write_template(dir.path(), "en/welcome/body.html", "Hello ${name}");

        let renderer = local_renderer(dir.path());
        let locals = Locals::new("en").with("name", "Ann");
        assert_eq!(
            renderer.render("welcome/html", &locals).await.as_deref(),
            Some("Hello Ann")
        );
    }

    #[tokio::test]
    async fn test_locale_placeholder_is_substituted() {
        let dir = tempfile::tempdir().unwrap();
        write_template(dir.path(), "en/welcome/body.txt", "lang=${locale}");

        let renderer = local_renderer(dir.path());
        let rendered = renderer.render("welcome/text", &Locals::new("en")).await;
        assert_eq!(rendered.as_deref(), Some("lang=en"));
    }

    #[tokio::test]
    async fn test_fallback_substitutes_requested_locale() {
        let dir = tempfile::tempdir().unwrap();
        write_template(dir.path(), "en/welcome/body.txt", "lang=${locale}");

        let renderer = local_renderer(dir.path());
        let rendered = renderer.render("welcome/text", &Locals::new("fr")).await;
        assert_eq!(rendered.as_deref(), Some("lang=fr"));
    }

    #[tokio::test]
    async fn test_render_absent_when_missing() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = local_renderer(dir.path());

        assert_eq!(renderer.render("welcome/html", &Locals::new("fr")).await, None);
        assert!(matches!(
            renderer.try_render("welcome/html", &Locals::new("fr")).await,
            Err(TemplateError::FallbackExhausted { .. })
        ));
    }

    #[tokio::test]
    async fn test_unmapped_field_is_absent() {
        let dir = tempfile::tempdir().unwrap();
        write_template(dir.path(), "en/welcome/body.html", "Hello");

        let renderer = local_renderer(dir.path());
        assert_eq!(renderer.render("welcome/attachment", &Locals::new("en")).await, None);
        assert!(matches!(
            renderer.try_render("welcome/attachment", &Locals::new("en")).await,
            Err(TemplateError::UnmappedField(_))
        ));
    }

    #[tokio::test]
    async fn test_render_email_parts() {
        let dir = tempfile::tempdir().unwrap();
        write_template(dir.path(), "en/email-verify/subject.txt", "Verify ${email}");
        write_template(dir.path(), "en/email-verify/body.html", "<a href=\"${link}\">Verify</a>");

        let renderer = local_renderer(dir.path());
        let locals = Locals::new("en")
            .with("email", "ann@example.com")
            .with("link", "https://auth.example.com/v?t=1");

        let email = renderer.render_email("email-verify", &locals).await;
        assert_eq!(email.subject.as_deref(), Some("Verify ann@example.com"));
        assert_eq!(
            email.html.as_deref(),
            Some("<a href=\"https://auth.example.com/v?t=1\">Verify</a>")
        );
        assert_eq!(email.text, None);
        assert!(email.is_sendable());
    }

    #[tokio::test]
    async fn test_render_sms() {
        let dir = tempfile::tempdir().unwrap();
        write_template(dir.path(), "en/sms-passwordless/body.txt", "Your code is ${code}");

        let renderer = local_renderer(dir.path());
        let locals = Locals::new("en").with("code", "482193");
        assert_eq!(
            renderer.render_sms("sms-passwordless", &locals).await.as_deref(),
            Some("Your code is 482193")
        );
    }

    #[test]
    fn test_email_content_sendable() {
        assert!(!EmailContent::default().is_sendable());
        assert!(!EmailContent {
            subject: Some("s".into()),
            ..Default::default()
        }
        .is_sendable());
    }
}
