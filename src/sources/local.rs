//! Filesystem data source

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::PathBuf;
use tracing::debug;

use super::traits::DataSource;
use crate::errors::{SourceError, SourceResult};

/// Reads documents relative to a local directory (or a single file when the
/// path is empty)
#[derive(Debug, Clone)]
pub struct LocalSource {
    root: PathBuf,
}

impl LocalSource {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, path: &str) -> PathBuf {
        let path = path.trim_start_matches('/');
        if path.is_empty() {
            self.root.clone()
        } else {
            self.root.join(path)
        }
    }
}

#[async_trait]
impl DataSource for LocalSource {
    fn locate(&self, path: &str) -> String {
        self.resolve(path).display().to_string()
    }

    async fn read_text(&self, path: &str) -> SourceResult<String> {
        let file_path = self.resolve(path);
        debug!("Reading local document: {}", file_path.display());

        tokio::fs::read_to_string(&file_path)
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => SourceError::not_found(file_path.display().to_string()),
                _ => SourceError::Io {
                    location: file_path.display().to_string(),
                    source: e,
                },
            })
    }
}
