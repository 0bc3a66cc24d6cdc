//! Playlist generation
//!
//! [`PlaylistGenerator`] walks the country metadata in document order,
//! fetches each qualifying country's channel records, enriches them from the
//! [`ChannelIndex`] and applies the stream selection policy. The result is an
//! ordered [`PlaylistDocument`]; [`m3u::render`] turns it into text and
//! [`publish::publish`] writes it out.

use futures::StreamExt;
use tracing::{debug, info, warn};

pub mod m3u;
pub mod publish;
pub mod selection;

use crate::catalog::ChannelIndex;
use crate::config::{GenerationConfig, GroupTitleFallback};
use crate::errors::SourceResult;
use crate::models::{
    BuildWarning, CountryChannelRecord, CountryInfo, CountryMetadata, CountryReport,
    DecodedRecord, PlaylistDocument, PlaylistEntry,
};
use crate::sources::CountryChannelFetcher;
use selection::select_stream;

/// Language written when a record does not name one
pub const UNKNOWN_LANGUAGE: &str = "Unknown";

/// Separator used to join catalog categories into a group title
pub const CATEGORY_SEPARATOR: &str = ";";

#[derive(Debug, Clone)]
pub struct GeneratorOptions {
    pub group_title_fallback: GroupTitleFallback,
    /// Country fetches allowed in flight; results are still consumed in order
    pub fetch_concurrency: usize,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            group_title_fallback: GroupTitleFallback::Empty,
            fetch_concurrency: 1,
        }
    }
}

impl From<&GenerationConfig> for GeneratorOptions {
    fn from(config: &GenerationConfig) -> Self {
        Self {
            group_title_fallback: config.group_title_fallback,
            fetch_concurrency: config.fetch_concurrency,
        }
    }
}

pub struct PlaylistGenerator<'a> {
    index: &'a ChannelIndex,
    options: GeneratorOptions,
}

impl<'a> PlaylistGenerator<'a> {
    pub fn new(index: &'a ChannelIndex, options: GeneratorOptions) -> Self {
        Self { index, options }
    }

    /// Build the playlist document for every country flagged as having channels
    ///
    /// A country whose records cannot be fetched is recorded as a warning and
    /// skipped; it never aborts the build.
    pub async fn build(
        &self,
        countries: &CountryMetadata,
        fetcher: &dyn CountryChannelFetcher,
    ) -> PlaylistDocument {
        let mut document = PlaylistDocument::default();

        for (code, _) in countries.iter().filter(|(_, info)| !info.has_channels) {
            debug!("Skipping country {}: no channels", code);
        }

        let fetches = futures::stream::iter(countries.with_channels().map(|(code, info)| async move {
            let result = fetcher.fetch_country_channels(code).await;
            (code, info, result)
        }))
        .buffered(self.options.fetch_concurrency.max(1));
        futures::pin_mut!(fetches);

        while let Some((code, info, result)) = fetches.next().await {
            self.process_country(code, info, result, &mut document);
        }

        info!(
            "Playlist document built: countries={} entries={} warnings={}",
            document.countries.len(),
            document.entries.len(),
            document.warnings.len()
        );

        document
    }

    fn process_country(
        &self,
        code: &str,
        info: &CountryInfo,
        result: SourceResult<Vec<DecodedRecord>>,
        document: &mut PlaylistDocument,
    ) {
        let records = match result {
            Ok(records) => records,
            Err(e) => {
                warn!(
                    "Channel data for {} ({}) unavailable, skipping: {}",
                    info.country, code, e
                );
                document.warnings.push(BuildWarning::CountryFetchFailed {
                    code: code.to_string(),
                    message: e.to_string(),
                });
                document.countries.push(CountryReport {
                    code: code.to_string(),
                    country: info.country.clone(),
                    records: None,
                    entries: 0,
                });
                return;
            }
        };

        info!(
            "Processing {} ({}) - {} channels",
            info.country,
            code,
            records.len()
        );

        let before = document.entries.len();
        for (position, decoded) in records.iter().enumerate() {
            let outcome = match decoded {
                Ok(record) => self
                    .entry_for(code, info, record)
                    .map_err(str::to_string)
                    .map(|entry| (record, entry)),
                Err(reason) => Err(reason.clone()),
            };

            match outcome {
                Ok((_, Some(entry))) => document.entries.push(entry),
                Ok((record, None)) => debug!(
                    "No stream URL for {} record #{} ({})",
                    code,
                    position,
                    record.name.as_deref().unwrap_or_default()
                ),
                Err(reason) => {
                    warn!("Skipping malformed {} record #{}: {}", code, position, reason);
                    document.warnings.push(BuildWarning::MalformedRecord {
                        code: code.to_string(),
                        position,
                        reason,
                    });
                }
            }
        }

        document.countries.push(CountryReport {
            code: code.to_string(),
            country: info.country.clone(),
            records: Some(records.len()),
            entries: document.entries.len() - before,
        });
    }

    /// Turn one channel record into at most one playlist entry
    ///
    /// `Err` carries the reason a record is malformed; `Ok(None)` means the
    /// record is well-formed but has no stream URL.
    pub fn entry_for(
        &self,
        code: &str,
        info: &CountryInfo,
        record: &CountryChannelRecord,
    ) -> Result<Option<PlaylistEntry>, &'static str> {
        let name = record.name.as_deref().ok_or("missing name")?;
        let iptv_urls = record.iptv_urls.as_deref().ok_or("missing iptv_urls")?;
        let youtube_urls = record.youtube_urls.as_deref().ok_or("missing youtube_urls")?;

        let Some(stream) = select_stream(iptv_urls, youtube_urls) else {
            return Ok(None);
        };

        let catalog_entry = self.index.lookup(name);

        let tvg_id = catalog_entry
            .and_then(|entry| entry.id.clone())
            .or_else(|| record.nanoid.clone())
            .unwrap_or_default();
        let tvg_logo = catalog_entry
            .and_then(|entry| entry.logo_url())
            .map(str::to_string);
        let categories = catalog_entry
            .map(|entry| entry.categories.as_slice())
            .unwrap_or_default();

        let group_title = if categories.is_empty() {
            match self.options.group_title_fallback {
                GroupTitleFallback::Empty => String::new(),
                GroupTitleFallback::CountryName => info.country.clone(),
            }
        } else {
            categories.join(CATEGORY_SEPARATOR)
        };

        let tvg_language = record
            .language
            .as_deref()
            .filter(|language| !language.is_empty())
            .unwrap_or(UNKNOWN_LANGUAGE)
            .to_string();

        Ok(Some(PlaylistEntry {
            tvg_id,
            tvg_country: code.to_uppercase(),
            tvg_language,
            group_title,
            tvg_logo,
            display_name: stream.display_name(name),
            stream_url: stream.url.to_string(),
            kind: stream.kind,
        }))
    }
}
