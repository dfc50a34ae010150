//! Filesystem template source

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use super::source::TemplateSource;
use super::types::{TemplateError, TemplateResult};

/// Reads templates from `<root>/<directory>/<locale>/<id>/<file>`.
#[derive(Debug, Clone)]
pub struct LocalSource {
    base_dir: PathBuf,
}

impl LocalSource {
    /// Create a source rooted at `root/directory`.
    pub fn new(root: impl AsRef<Path>, directory: &str) -> Self {
        Self {
            base_dir: root.as_ref().join(directory),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn full_path(&self, location: &str) -> PathBuf {
        location
            .split('/')
            .fold(self.base_dir.clone(), |path, segment| path.join(segment))
    }
}

#[async_trait]
impl TemplateSource for LocalSource {
    fn kind(&self) -> &'static str {
        "local"
    }

    async fn fetch(&self, location: &str) -> TemplateResult<String> {
        let path = self.full_path(location);
        tracing::debug!(path = %path.display(), "Using template file");

        let bytes = tokio::fs::read(&path)
            .await
            .map_err(|source| match source.kind() {
                ErrorKind::NotFound => TemplateError::NotFound {
                    location: path.display().to_string(),
                },
                _ => TemplateError::Io {
                    location: path.display().to_string(),
                    source,
                },
            })?;

        // Invalid UTF-8 is decoded lossily, the same as a remote body.
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}
