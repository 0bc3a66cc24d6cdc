//! HTTP data source

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::debug;
use url::Url;

use super::traits::DataSource;
use crate::errors::{SourceError, SourceResult};
use crate::utils::{join_url, sanitize_base_url};

/// Reads documents relative to an http(s) base URL
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
    base_url: String,
}

impl HttpSource {
    /// Create a source over `base_url` using an existing client
    pub fn new(client: Client, base_url: &str) -> SourceResult<Self> {
        let base_url = sanitize_base_url(base_url);
        Url::parse(&base_url)
            .map_err(|e| SourceError::invalid_location(base_url.clone(), e.to_string()))?;

        Ok(Self { client, base_url })
    }

    /// Build the shared HTTP client with the configured timeout and user agent
    pub fn build_client(timeout: Duration, user_agent: &str) -> SourceResult<Client> {
        Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| SourceError::transport("http client", e.to_string()))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl DataSource for HttpSource {
    fn locate(&self, path: &str) -> String {
        join_url(&self.base_url, path)
    }

    async fn read_text(&self, path: &str) -> SourceResult<String> {
        let url = self.locate(path);
        debug!("Fetching remote document: {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| SourceError::transport(url.clone(), e.to_string()))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(SourceError::not_found(url));
        }
        if !status.is_success() {
            return Err(SourceError::Http {
                status: status.as_u16(),
                location: url,
            });
        }

        let text = response
            .text()
            .await
            .map_err(|e| SourceError::transport(url.clone(), e.to_string()))?;

        debug!("Fetched {} bytes from {}", text.len(), url);
        Ok(text)
    }
}
