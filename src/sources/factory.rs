//! Data source factory
//!
//! The only place that decides between filesystem and HTTP retrieval; the
//! rest of the crate sees `Arc<dyn DataSource>`.

use reqwest::Client;
use std::sync::Arc;
use tracing::debug;

use super::http::HttpSource;
use super::local::LocalSource;
use super::traits::DataSource;
use crate::config::HttpConfig;
use crate::errors::{AppResult, SourceResult};
use crate::utils::is_remote_location;

pub struct SourceFactory {
    client: Client,
}

impl SourceFactory {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Create a factory whose HTTP sources share one configured client
    pub fn from_config(http: &HttpConfig) -> AppResult<Self> {
        let client = HttpSource::build_client(http.timeout()?, &http.user_agent)?;
        Ok(Self::new(client))
    }

    /// Open a data source for a configured location
    ///
    /// `http://` and `https://` locations are fetched over HTTP; anything else
    /// is a filesystem path.
    pub fn open(&self, location: &str) -> SourceResult<Arc<dyn DataSource>> {
        if is_remote_location(location) {
            debug!("Opening HTTP source: {}", location);
            Ok(Arc::new(HttpSource::new(self.client.clone(), location)?))
        } else {
            debug!("Opening local source: {}", location);
            Ok(Arc::new(LocalSource::new(location)))
        }
    }
}
