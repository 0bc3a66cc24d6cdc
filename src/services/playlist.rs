//! Playlist service implementation
//!
//! One build run: fetch the catalog, index it, fetch the country metadata,
//! generate the document, then render and publish it. Catalog and metadata
//! failures are fatal; per-country failures are handled by the generator.

use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::info;

use crate::catalog::ChannelIndex;
use crate::config::{AttributeEscaping, Config};
use crate::errors::AppResult;
use crate::generator::{m3u, publish, GeneratorOptions, PlaylistGenerator};
use crate::models::PlaylistDocument;
use crate::sources::{load_catalog, ChannelListRepository, DataSource, SourceFactory};

/// Outcome of one build run
#[derive(Debug, Clone)]
pub struct BuildReport {
    pub document: PlaylistDocument,
    pub started_at: DateTime<Utc>,
    pub duration: Duration,
    pub catalog_entries: usize,
    pub index_keys: usize,
    pub index_collisions: usize,
}

/// Where and how large the published playlist is
#[derive(Debug, Clone)]
pub struct PublishedPlaylist {
    pub report: BuildReport,
    pub path: PathBuf,
    pub bytes_written: u64,
}

pub struct PlaylistService {
    catalog: Arc<dyn DataSource>,
    channel_list: ChannelListRepository,
    options: GeneratorOptions,
    escaping: AttributeEscaping,
}

impl PlaylistService {
    pub fn new(
        catalog: Arc<dyn DataSource>,
        channel_list: ChannelListRepository,
        options: GeneratorOptions,
        escaping: AttributeEscaping,
    ) -> Self {
        Self {
            catalog,
            channel_list,
            options,
            escaping,
        }
    }

    /// Wire sources and generation settings from configuration
    pub fn from_config(config: &Config) -> AppResult<Self> {
        config.validate()?;
        let factory = SourceFactory::from_config(&config.http)?;

        let catalog = factory.open(&config.sources.catalog)?;
        let channel_list = ChannelListRepository::new(factory.open(&config.sources.channel_list)?);

        info!(
            "Sources configured: catalog={} channel_list={}",
            catalog.locate(""),
            config.sources.channel_list
        );

        Ok(Self::new(
            catalog,
            channel_list,
            GeneratorOptions::from(&config.generation),
            config.generation.attribute_escaping,
        ))
    }

    /// Build the playlist document without writing anything
    pub async fn run(&self) -> AppResult<BuildReport> {
        let started_at = Utc::now();
        let start = Instant::now();

        info!("Fetching channel catalog from {}", self.catalog.locate(""));
        let catalog = load_catalog(self.catalog.as_ref()).await?;
        let index = ChannelIndex::build(catalog)?;

        let countries = self.channel_list.countries_metadata().await?;
        info!(
            "Country metadata loaded: countries={} with_channels={}",
            countries.len(),
            countries.with_channels().count()
        );

        let generator = PlaylistGenerator::new(&index, self.options.clone());
        let document = generator.build(&countries, &self.channel_list).await;

        Ok(BuildReport {
            document,
            started_at,
            duration: start.elapsed(),
            catalog_entries: index.catalog_len(),
            index_keys: index.len(),
            index_collisions: index.collisions(),
        })
    }

    /// Serialize a built document with the configured escaping
    pub fn render(&self, document: &PlaylistDocument) -> String {
        m3u::render(document, self.escaping)
    }

    /// Build, render and atomically publish the playlist to `output`
    ///
    /// Nothing is written unless the whole document was built.
    pub async fn publish_to(&self, output: &Path) -> AppResult<PublishedPlaylist> {
        let report = self.run().await?;
        let contents = self.render(&report.document);
        let bytes_written = publish::publish(output, &contents).await?;

        Ok(PublishedPlaylist {
            report,
            path: output.to_path_buf(),
            bytes_written,
        })
    }
}
