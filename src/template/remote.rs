//! HTTP template source

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use super::source::TemplateSource;
use super::types::{TemplateError, TemplateResult};

/// Fetches templates with `GET <base_url>/<locale>/<id>/<file>`.
///
/// Any transport error or non-2xx status counts as a miss.
#[derive(Debug, Clone)]
pub struct RemoteSource {
    base_url: Url,
    client: Client,
}

impl RemoteSource {
    /// Create a source for `base_url`, using a client with the given request timeout.
    pub fn new(base_url: &str, timeout: Duration) -> TemplateResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TemplateError::ClientBuild(e.to_string()))?;

        Self::with_client(base_url, client)
    }

    /// Create a source that shares an existing HTTP client.
    pub fn with_client(base_url: &str, client: Client) -> TemplateResult<Self> {
        let base_url = base_url.trim();
        let parsed = Url::parse(base_url)
            .map_err(|e| TemplateError::InvalidFetchUrl(format!("{}: {}", base_url, e)))?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(TemplateError::InvalidFetchUrl(format!(
                "{}: unsupported scheme {}",
                base_url,
                parsed.scheme()
            )));
        }

        if parsed.cannot_be_a_base() {
            return Err(TemplateError::InvalidFetchUrl(base_url.to_string()));
        }

        Ok(Self {
            base_url: parsed,
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// Append each location segment to the base URL path.
    ///
    /// Segments are percent-encoded, so they can never climb above the
    /// base path or spill into the query or fragment.
    pub fn url_for(&self, location: &str) -> TemplateResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| TemplateError::InvalidFetchUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(location.trim_start_matches('/').split('/'));
        Ok(url)
    }
}

#[async_trait]
impl TemplateSource for RemoteSource {
    fn kind(&self) -> &'static str {
        "remote"
    }

    async fn fetch(&self, location: &str) -> TemplateResult<String> {
        let url = self.url_for(location)?;
        tracing::debug!(url = %url, "Using template URL");

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| TemplateError::Http {
                url: url.to_string(),
                message: format!("request failed: {}", e),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(TemplateError::Http {
                url: url.to_string(),
                message: format!("unexpected status {}", status.as_u16()),
            });
        }

        response.text().await.map_err(|e| TemplateError::Http {
            url: url.to_string(),
            message: format!("failed to read body: {}", e),
        })
    }
}
