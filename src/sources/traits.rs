//! Source trait definitions
//!
//! Two seams: [`DataSource`] hides where documents live (directory or HTTP
//! base URL), and [`CountryChannelFetcher`] is what the playlist generator
//! consumes to obtain one country's channel records.

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::errors::{SourceError, SourceResult};
use crate::models::DecodedRecord;

/// A root from which text documents are read by relative path
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Human-readable location of `path`, used in logs and errors
    fn locate(&self, path: &str) -> String;

    /// Read the document at `path`. An empty path addresses the root itself
    async fn read_text(&self, path: &str) -> SourceResult<String>;
}

/// Read and decode a JSON document from a data source
pub async fn read_json<T>(source: &dyn DataSource, path: &str) -> SourceResult<T>
where
    T: DeserializeOwned,
{
    let text = source.read_text(path).await?;
    serde_json::from_str(&text).map_err(|e| SourceError::Parse {
        location: source.locate(path),
        source: e,
    })
}

/// Per-country channel retrieval used by the playlist generator
///
/// `Err` fails the whole country. Elements that could not be decoded are
/// returned in place so the generator can report their positions.
#[async_trait]
pub trait CountryChannelFetcher: Send + Sync {
    async fn fetch_country_channels(&self, code: &str) -> SourceResult<Vec<DecodedRecord>>;
}
