//! Channel-list dataset layout
//!
//! ```text
//! channels/raw/countries_metadata.json    country code -> {country, hasChannels}
//! channels/raw/countries/<code>.json      channel records, code lowercased
//! ```

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

use super::traits::{read_json, CountryChannelFetcher, DataSource};
use crate::errors::SourceResult;
use crate::models::{ChannelCatalogEntry, CountryChannelRecord, CountryMetadata, DecodedRecord};

pub const COUNTRIES_METADATA_PATH: &str = "channels/raw/countries_metadata.json";
pub const COUNTRY_CHANNELS_DIR: &str = "channels/raw/countries";

/// Path of a country's channel file relative to the dataset root
pub fn country_channels_path(code: &str) -> String {
    format!("{}/{}.json", COUNTRY_CHANNELS_DIR, code.to_lowercase())
}

/// Typed access to the channel-list dataset over any data source
#[derive(Clone)]
pub struct ChannelListRepository {
    source: Arc<dyn DataSource>,
}

impl ChannelListRepository {
    pub fn new(source: Arc<dyn DataSource>) -> Self {
        Self { source }
    }

    pub async fn countries_metadata(&self) -> SourceResult<CountryMetadata> {
        let metadata: CountryMetadata =
            read_json(self.source.as_ref(), COUNTRIES_METADATA_PATH).await?;
        debug!(
            "Loaded country metadata from {}: {} countries",
            self.source.locate(COUNTRIES_METADATA_PATH),
            metadata.len()
        );
        Ok(metadata)
    }
}

#[async_trait]
impl CountryChannelFetcher for ChannelListRepository {
    async fn fetch_country_channels(&self, code: &str) -> SourceResult<Vec<DecodedRecord>> {
        let values: Vec<Value> = read_json(self.source.as_ref(), &country_channels_path(code)).await?;
        Ok(decode_records(values))
    }
}

/// Decode each element of a country file independently
fn decode_records(values: Vec<Value>) -> Vec<DecodedRecord> {
    values
        .into_iter()
        .map(|value| {
            serde_json::from_value::<CountryChannelRecord>(value).map_err(|e| e.to_string())
        })
        .collect()
}

/// Load the global channel catalog, a JSON array at the source root
pub async fn load_catalog(source: &dyn DataSource) -> SourceResult<Vec<ChannelCatalogEntry>> {
    let catalog: Vec<ChannelCatalogEntry> = read_json(source, "").await?;
    debug!(
        "Loaded channel catalog from {}: {} entries",
        source.locate(""),
        catalog.len()
    );
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::SourceError;
    use crate::sources::LocalSource;

    fn write(root: &std::path::Path, path: &str, contents: &str) {
        let full = root.join(path);
        std::fs::create_dir_all(full.parent().unwrap()).unwrap();
        std::fs::write(full, contents).unwrap();
    }

    #[test]
    fn test_country_path_is_lowercased() {
        assert_eq!(country_channels_path("UK"), "channels/raw/countries/uk.json");
        assert_eq!(country_channels_path("us"), "channels/raw/countries/us.json");
    }

    #[tokio::test]
    async fn test_reads_dataset_layout() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            COUNTRIES_METADATA_PATH,
            r#"{"UK": {"country": "United Kingdom", "hasChannels": true}}"#,
        );
        write(
            dir.path(),
            "channels/raw/countries/uk.json",
            r#"[{"name": "BBC One", "nanoid": "n1", "language": "English",
                 "iptv_urls": ["http://a"], "youtube_urls": []}]"#,
        );

        let repository = ChannelListRepository::new(Arc::new(LocalSource::new(dir.path())));

        let metadata = repository.countries_metadata().await.unwrap();
        assert_eq!(metadata.with_channels().count(), 1);

        let records = repository.fetch_country_channels("UK").await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].as_ref().unwrap().nanoid.as_deref(), Some("n1"));
    }

    #[tokio::test]
    async fn test_invalid_json_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "channels/raw/countries/fr.json", "{not json");

        let repository = ChannelListRepository::new(Arc::new(LocalSource::new(dir.path())));
        let err = repository.fetch_country_channels("fr").await.unwrap_err();
        assert!(matches!(err, SourceError::Parse { .. }));
    }

    #[tokio::test]
    async fn test_wrong_typed_record_is_decoded_in_place() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "channels/raw/countries/de.json",
            r#"[{"name": "One", "iptv_urls": ["http://1"], "youtube_urls": []},
                {"name": 5, "iptv_urls": [], "youtube_urls": []},
                {"name": "Three", "iptv_urls": [], "youtube_urls": ["http://3"]}]"#,
        );

        let repository = ChannelListRepository::new(Arc::new(LocalSource::new(dir.path())));
        let records = repository.fetch_country_channels("DE").await.unwrap();

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].as_ref().unwrap().name.as_deref(), Some("One"));
        assert!(records[1].as_ref().unwrap_err().contains("invalid type"));
        assert_eq!(records[2].as_ref().unwrap().name.as_deref(), Some("Three"));
    }

    #[tokio::test]
    async fn test_load_catalog_from_single_file() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "channels.json",
            r#"[{"id": "bbc1", "name": "BBC One", "alt_names": ["BBC 1"], "categories": ["general"]}]"#,
        );

        let source = LocalSource::new(dir.path().join("channels.json"));
        let catalog = load_catalog(&source).await.unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog[0].alt_names, vec!["BBC 1".to_string()]);
    }
}
