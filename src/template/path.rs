//! Location strings shared by the filesystem and remote sources

use super::types::{TemplateError, TemplateResult, TemplateView};

/// Build the `"<locale>/<id>/<file name>"` location of a template.
///
/// The same string is joined onto the template directory by the local
/// source and onto the fetch URL by the remote source.
pub fn template_location(view: &TemplateView, locale: &str) -> TemplateResult<String> {
    validate_id(&view.id)?;
    validate_locale(locale)?;

    Ok(format!("{}/{}/{}", locale, view.id, view.field.file_name()))
}

/// Parse a raw view string and build its location in one step.
pub fn location_for(view: &str, locale: &str) -> TemplateResult<String> {
    template_location(&TemplateView::parse(view)?, locale)
}

/// Characters that would change the meaning of a path or URL segment.
pub(crate) const RESERVED_SEGMENT_CHARS: [char; 5] = ['/', '\\', '%', '?', '#'];

fn is_plain_segment(segment: &str) -> bool {
    !segment.is_empty()
        && segment != "."
        && segment != ".."
        && !segment.contains(RESERVED_SEGMENT_CHARS)
}

fn validate_id(id: &str) -> TemplateResult<()> {
    if is_plain_segment(id) {
        Ok(())
    } else {
        Err(TemplateError::InvalidView(id.to_string()))
    }
}

fn validate_locale(locale: &str) -> TemplateResult<()> {
    if is_plain_segment(locale) {
        Ok(())
    } else {
        Err(TemplateError::InvalidLocale(locale.to_string()))
    }
}
