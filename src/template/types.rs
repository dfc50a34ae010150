//! Template identifiers and error types

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use super::path::RESERVED_SEGMENT_CHARS;

/// Template-specific error type
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Invalid template view: {0}")]
    InvalidView(String),

    #[error("Invalid locale: {0:?}")]
    InvalidLocale(String),

    #[error("No template file is mapped to field: {0}")]
    UnmappedField(String),

    #[error("Template not found: {location}")]
    NotFound { location: String },

    #[error("No template found at {location} (requested locale {requested}, default locale {default})")]
    FallbackExhausted {
        location: String,
        requested: String,
        default: String,
    },

    #[error("Failed to read template {location}: {source}")]
    Io {
        location: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to fetch template {url}: {message}")]
    Http { url: String, message: String },

    #[error("Invalid template fetch URL: {0}")]
    InvalidFetchUrl(String),

    #[error("Failed to create HTTP client: {0}")]
    ClientBuild(String),
}

impl TemplateError {
    /// Whether this error means the template was not available at a location,
    /// which is the condition that triggers locale fallback.
    pub fn is_retrievable_miss(&self) -> bool {
        matches!(
            self,
            TemplateError::NotFound { .. }
                | TemplateError::InvalidLocale(_)
                | TemplateError::Io { .. }
                | TemplateError::Http { .. }
        )
    }

    /// Full path or URL the error refers to, when it carries one.
    pub fn location(&self) -> Option<&str> {
        match self {
            TemplateError::NotFound { location }
            | TemplateError::Io { location, .. }
            | TemplateError::FallbackExhausted { location, .. } => Some(location.as_str()),
            TemplateError::Http { url, .. } => Some(url.as_str()),
            _ => None,
        }
    }
}

/// Result type for template operations
pub type TemplateResult<T> = Result<T, TemplateError>;

/// The artifact of a template family to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateField {
    /// Email subject line
    Subject,
    /// HTML email body
    Html,
    /// Plain-text body (email or SMS)
    Text,
}

impl TemplateField {
    pub const ALL: [TemplateField; 3] = [
        TemplateField::Subject,
        TemplateField::Html,
        TemplateField::Text,
    ];

    /// File name the field is stored under, locally and remotely.
    pub fn file_name(self) -> &'static str {
        match self {
            TemplateField::Subject => "subject.txt",
            TemplateField::Html => "body.html",
            TemplateField::Text => "body.txt",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TemplateField::Subject => "subject",
            TemplateField::Html => "html",
            TemplateField::Text => "text",
        }
    }
}

impl FromStr for TemplateField {
    type Err = TemplateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "subject" => Ok(TemplateField::Subject),
            "html" => Ok(TemplateField::Html),
            "text" => Ok(TemplateField::Text),
            other => Err(TemplateError::UnmappedField(other.to_string())),
        }
    }
}

impl fmt::Display for TemplateField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed `"<id>/<field>"` template view.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TemplateView {
    /// Template family key, e.g. `email-verify` or `sms-passwordless`
    pub id: String,
    pub field: TemplateField,
}

impl TemplateView {
    pub fn new(id: impl Into<String>, field: TemplateField) -> Self {
        Self {
            id: id.into(),
            field,
        }
    }

    /// Parse a view string.
    ///
    /// The view must contain exactly one `/` with a non-empty id before it;
    /// the id may not contain `\`, `%`, `?` or `#`.
    /// A field outside `subject`, `html` and `text` is reported as
    /// [`TemplateError::UnmappedField`].
    pub fn parse(view: &str) -> TemplateResult<Self> {
        let (id, field) = view
            .split_once('/')
            .ok_or_else(|| TemplateError::InvalidView(view.to_string()))?;

        if id.is_empty()
            || id == "."
            || id == ".."
            || id.contains(RESERVED_SEGMENT_CHARS)
            || field.contains('/')
        {
            return Err(TemplateError::InvalidView(view.to_string()));
        }

        Ok(Self {
            id: id.to_string(),
            field: field.parse()?,
        })
    }
}

impl FromStr for TemplateView {
    type Err = TemplateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TemplateView::parse(s)
    }
}

impl fmt::Display for TemplateView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.id, self.field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_file_names() {
        assert_eq!(TemplateField::Subject.file_name(), "subject.txt");
        assert_eq!(TemplateField::Html.file_name(), "body.html");
        assert_eq!(TemplateField::Text.file_name(), "body.txt");
    }

    #[test]
    fn test_field_roundtrips_through_str() {
        for field in TemplateField::ALL {
            assert_eq!(field.as_str().parse::<TemplateField>().unwrap(), field);
        }
    }

    #[test]
    fn test_unknown_field_is_unmapped() {
        assert!(matches!(
            "attachment".parse::<TemplateField>(),
            Err(TemplateError::UnmappedField(f)) if f == "attachment"
        ));
        assert!(matches!(
            "HTML".parse::<TemplateField>(),
            Err(TemplateError::UnmappedField(_))
        ));
    }

    #[test]
    fn test_parse_view() {
        let view = TemplateView::parse("email-verify/html").unwrap();
        assert_eq!(view.id, "email-verify");
        assert_eq!(view.field, TemplateField::Html);
        assert_eq!(view.to_string(), "email-verify/html");
    }

    #[test]
    fn test_parse_view_unmapped_field() {
        assert!(matches!(
            TemplateView::parse("welcome/attachment"),
            Err(TemplateError::UnmappedField(_))
        ));
        assert!(matches!(
            TemplateView::parse("welcome/"),
            Err(TemplateError::UnmappedField(_))
        ));
    }

    #[test]
    fn test_parse_view_malformed() {
        let views = [
            "welcome",
            "/html",
            "a/b/html",
            "../html",
            "",
            "%2e%2e/html",
            "a?b/html",
            "a#b/text",
        ];
        for view in views {
            assert!(
                matches!(TemplateView::parse(view), Err(TemplateError::InvalidView(_))),
                "expected {view:?} to be rejected"
            );
        }
    }

    #[test]
    fn test_retrievable_miss() {
        assert!(TemplateError::NotFound {
            location: "en/a/body.txt".into()
        }
        .is_retrievable_miss());
        assert!(!TemplateError::UnmappedField("x".into()).is_retrievable_miss());
    }

    #[test]
    fn test_error_location() {
        let err = TemplateError::Http {
            url: "https://cdn.example.com/en/a/body.txt".into(),
            message: "unexpected status 404".into(),
        };
        assert_eq!(err.location(), Some("https://cdn.example.com/en/a/body.txt"));
        assert_eq!(TemplateError::InvalidLocale("..".into()).location(), None);
    }
}
