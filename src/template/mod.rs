//! Notification template resolution and rendering.
//!
//! This module provides:
//! - Template views (`"<id>/<field>"`) and the field to file name mapping
//! - Local (filesystem) and remote (HTTP) template sources with a single
//!   fallback to the default locale
//! - Variable substitution for `${variable}` placeholders
//! - A renderer that turns every resolution failure into "nothing to send"
//!
//! # Example
//!
//! ```ignore
//! let renderer = TemplateRenderer::from_config(&settings.templates)?;
//!
//! let locals = Locals::new("fr")
//!     .with("displayName", "Ann")
//!     .with("link", "https://auth.example.com/verify?ticket=abc");
//!
//! // Falls back to the default locale when `fr/email-verify/subject.txt` is missing
//! if let Some(subject) = renderer.render("email-verify/subject", &locals).await {
//!     send(subject);
//! }
//! ```

mod factory;
mod local;
mod locals;
mod path;
mod remote;
mod renderer;
mod source;
mod substitution;
mod types;

pub use factory::create_template_source;
pub use local::LocalSource;
pub use locals::{CommonLocals, EmailLocals, Locals, SmsLocals};
pub use path::{location_for, template_location};
pub use remote::RemoteSource;
pub use renderer::{EmailContent, TemplateRenderer};
pub use source::{candidate_locales, TemplateSource};
pub use substitution::substitute_variables;
pub use types::{TemplateError, TemplateField, TemplateResult, TemplateView};
