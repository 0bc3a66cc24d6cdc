use tracing::{info, warn};

use crate::models::StreamKind;
use crate::services::{BuildReport, PublishedPlaylist};
use crate::utils::format_duration;

/// Figures reported after a build
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildSummary {
    pub total_entries: usize,
    pub iptv_entries: usize,
    pub youtube_entries: usize,
    pub countries_processed: usize,
    pub countries_failed: usize,
    pub malformed_records: usize,
}

impl BuildSummary {
    pub fn from_report(report: &BuildReport) -> Self {
        let document = &report.document;
        let countries_failed = document.failed_countries();

        Self {
            total_entries: document.len(),
            iptv_entries: document.count_by_kind(StreamKind::Iptv),
            youtube_entries: document.count_by_kind(StreamKind::YouTube),
            countries_processed: document.countries.len() - countries_failed,
            countries_failed,
            malformed_records: document.warnings.len() - countries_failed,
        }
    }
}

/// Build metrics logger
///
/// For now this is structured logging only.
#[derive(Clone, Default)]
pub struct MetricsLogger {}

impl MetricsLogger {
    pub fn new() -> Self {
        Self {}
    }

    /// Log per-country warnings and the overall build summary
    pub fn log_build(&self, report: &BuildReport) -> BuildSummary {
        for warning in &report.document.warnings {
            warn!(country = %warning.country_code(), "Build warning: {}", warning);
        }

        let summary = BuildSummary::from_report(report);
        info!(
            started_at = %report.started_at,
            duration = %format_duration(report.duration.as_millis() as u64),
            catalog_entries = report.catalog_entries,
            index_keys = report.index_keys,
            index_collisions = report.index_collisions,
            countries_processed = summary.countries_processed,
            countries_failed = summary.countries_failed,
            malformed_records = summary.malformed_records,
            iptv_entries = summary.iptv_entries,
            youtube_entries = summary.youtube_entries,
            total_entries = summary.total_entries,
            "Playlist build completed"
        );

        summary
    }

    /// Log a published playlist, including its build summary
    pub fn log_published(&self, published: &PublishedPlaylist) -> BuildSummary {
        let summary = self.log_build(&published.report);
        info!(
            path = %published.path.display(),
            bytes = published.bytes_written,
            "M3U playlist created successfully: {}",
            published.path.display()
        );
        info!("Total number of channels processed: {}", summary.total_entries);
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BuildWarning, CountryReport, PlaylistDocument, PlaylistEntry};
    use chrono::Utc;
    use std::time::Duration;

    fn entry(kind: StreamKind) -> PlaylistEntry {
        PlaylistEntry {
            tvg_id: "id".to_string(),
            tvg_country: "UK".to_string(),
            tvg_language: "English".to_string(),
            group_title: String::new(),
            tvg_logo: None,
            display_name: "Channel".to_string(),
            stream_url: "http://a".to_string(),
            kind,
        }
    }

    #[test]
    fn test_summary_counts() {
        let report = BuildReport {
            document: PlaylistDocument {
                entries: vec![
                    entry(StreamKind::Iptv),
                    entry(StreamKind::Iptv),
                    entry(StreamKind::YouTube),
                ],
                warnings: vec![
                    BuildWarning::CountryFetchFailed {
                        code: "fr".to_string(),
                        message: "Not found".to_string(),
                    },
                    BuildWarning::MalformedRecord {
                        code: "uk".to_string(),
                        position: 3,
                        reason: "missing name".to_string(),
                    },
                ],
                countries: vec![
                    CountryReport {
                        code: "uk".to_string(),
                        country: "United Kingdom".to_string(),
                        records: Some(5),
                        entries: 3,
                    },
                    CountryReport {
                        code: "fr".to_string(),
                        country: "France".to_string(),
                        records: None,
                        entries: 0,
                    },
                ],
            },
            started_at: Utc::now(),
            duration: Duration::from_millis(1200),
            catalog_entries: 10,
            index_keys: 12,
            index_collisions: 0,
        };

        let summary = MetricsLogger::new().log_build(&report);
        assert_eq!(
            summary,
            BuildSummary {
                total_entries: 3,
                iptv_entries: 2,
                youtube_entries: 1,
                countries_processed: 1,
                countries_failed: 1,
                malformed_records: 1,
            }
        );
    }
}
