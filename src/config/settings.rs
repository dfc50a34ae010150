use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub templates: TemplateConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TemplateConfig {
    /// Directory that contains the template directory (process working directory by default)
    #[serde(default = "default_root")]
    pub root: PathBuf,
    /// Template directory name below `root`
    #[serde(default = "default_directory")]
    pub directory: String,
    /// Locale used when a template is missing for the requested locale
    #[serde(default = "default_locale")]
    pub default_locale: String,
    /// Base URL to fetch templates from; local files are used when unset
    #[serde(default)]
    pub fetch_url: Option<String>,
    /// HTTP client timeout in seconds for remote fetches
    #[serde(default = "default_fetch_timeout")]
    pub fetch_timeout_seconds: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8082
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_directory() -> String {
    "email-templates".to_string()
}

fn default_locale() -> String {
    "en".to_string()
}

fn default_fetch_timeout() -> u64 {
    10
}

impl Settings {
    pub fn new() -> crate::error::Result<Self> {
        // Load .env file if exists
        let _ = dotenvy::dotenv();

        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        Self::from_builder(Self::builder(&run_mode)?)
    }

    fn from_builder(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> crate::error::Result<Self> {
        Ok(builder.build()?.try_deserialize()?)
    }

    fn builder(
        run_mode: &str,
    ) -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        Config::builder()
            // Start with default values
            .set_default("server.host", default_host())?
            .set_default("server.port", default_port())?
            .set_default("templates.directory", default_directory())?
            .set_default("templates.default_locale", default_locale())?
            .set_default("templates.fetch_timeout_seconds", default_fetch_timeout())?
            // Load config file if exists
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // APP__TEMPLATES__DEFAULT_LOCALE, APP__SERVER__PORT, ...
            .add_source(
                Environment::with_prefix("APP")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            // Variables the authentication service is already deployed with
            .set_override_option("templates.default_locale", env::var("AUTH_LOCALE_DEFAULT").ok())?
            .set_override_option("templates.fetch_url", env::var("AUTH_TEMPLATE_FETCH_URL").ok())
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl TemplateConfig {
    /// The configured fetch URL, treating a blank value as unset.
    pub fn fetch_url(&self) -> Option<&str> {
        self.fetch_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    pub fn is_remote(&self) -> bool {
        self.fetch_url().is_some()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            directory: default_directory(),
            default_locale: default_locale(),
            fetch_url: None,
            fetch_timeout_seconds: default_fetch_timeout(),
        }
    }
}
