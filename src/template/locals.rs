//! Render-time data: the locale plus the values available to placeholders

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::types::TemplateError;

const LOCALE_KEY: &str = "locale";

/// Data bag passed to a render call.
///
/// Always carries a `locale`, which selects the template variant and is
/// itself available as the `${locale}` placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<String, String>", into = "BTreeMap<String, String>")]
pub struct Locals {
    values: BTreeMap<String, String>,
}

impl Locals {
    pub fn new(locale: impl Into<String>) -> Self {
        let mut values = BTreeMap::new();
        values.insert(LOCALE_KEY.to_string(), locale.into());
        Self { values }
    }

    /// Add a substitution variable. Setting `locale` changes the locale.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn locale(&self) -> &str {
        self.values
            .get(LOCALE_KEY)
            .map(String::as_str)
            .unwrap_or_default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// All substitution variables, `locale` included.
    pub fn variables(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl TryFrom<BTreeMap<String, String>> for Locals {
    type Error = TemplateError;

    fn try_from(values: BTreeMap<String, String>) -> Result<Self, Self::Error> {
        if !values.contains_key(LOCALE_KEY) {
            return Err(TemplateError::InvalidLocale(
                "locals must contain a locale".to_string(),
            ));
        }

        Ok(Self { values })
    }
}

impl From<Locals> for BTreeMap<String, String> {
    fn from(locals: Locals) -> Self {
        locals.values
    }
}

/// Fields shared by every authentication notification.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommonLocals {
    pub app_name: String,
    pub display_name: String,
    pub locale: String,
}

impl CommonLocals {
    fn into_locals(self) -> Locals {
        Locals::new(self.locale)
            .with("appName", self.app_name)
            .with("displayName", self.display_name)
    }
}

/// Values available to SMS templates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmsLocals {
    #[serde(flatten)]
    pub common: CommonLocals,
    pub code: String,
}

impl From<SmsLocals> for Locals {
    fn from(sms: SmsLocals) -> Self {
        sms.common.into_locals().with("code", sms.code)
    }
}

/// Values available to email templates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailLocals {
    #[serde(flatten)]
    pub common: CommonLocals,
    pub link: String,
    pub email: String,
    #[serde(default)]
    pub new_email: String,
    pub ticket: String,
    pub redirect_to: String,
    pub server_url: String,
    pub client_url: String,
}

impl From<EmailLocals> for Locals {
    fn from(email: EmailLocals) -> Self {
        email
            .common
            .into_locals()
            .with("link", email.link)
            .with("email", email.email)
            .with("newEmail", email.new_email)
            .with("ticket", email.ticket)
            .with("redirectTo", email.redirect_to)
            .with("serverUrl", email.server_url)
            .with("clientUrl", email.client_url)
    }
}
