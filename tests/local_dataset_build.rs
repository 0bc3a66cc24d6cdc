//! End-to-end builds against a channel-list dataset laid out on disk

use std::path::Path;

use m3u_builder::config::{AttributeEscaping, Config, GroupTitleFallback};
use m3u_builder::errors::{AppError, CatalogError, SourceError};
use m3u_builder::metrics::MetricsLogger;
use m3u_builder::models::BuildWarning;
use m3u_builder::services::PlaylistService;

const CATALOG: &str = r#"[
    {"id": "BBCOne.uk", "name": "BBC One", "alt_names": ["BBC 1"], "network": "BBC",
     "categories": ["general", "news"], "logo": "https://logos.example/bbc1.png"},
    {"id": "France2.fr", "name": "France 2", "alt_names": [], "categories": [], "logo": null}
]"#;

const METADATA: &str = r#"{
    "UK": {"country": "United Kingdom", "hasChannels": true},
    "AD": {"country": "Andorra", "hasChannels": false},
    "FR": {"country": "France", "hasChannels": true},
    "IT": {"country": "Italy", "hasChannels": true}
}"#;

const UK_CHANNELS: &str = r#"[
    {"nanoid": "uk1", "name": "bbc 1", "language": "English",
     "iptv_urls": ["https://bbc.example/one.m3u8", "https://bbc.example/one-backup.m3u8"],
     "youtube_urls": ["https://youtube.example/bbc"]},
    {"nanoid": "uk2", "name": "Offline Channel", "language": "English",
     "iptv_urls": [], "youtube_urls": []},
    {"nanoid": "uk3", "name": "Community TV", "language": "",
     "iptv_urls": [], "youtube_urls": ["https://youtube.example/community"]}
]"#;

const FR_CHANNELS: &str = r#"[
    {"nanoid": "fr1", "name": "France 2", "language": "French",
     "iptv_urls": ["https://fr.example/f2.m3u8"], "youtube_urls": []}
]"#;

fn write(root: &Path, path: &str, contents: &str) {
    let full = root.join(path);
    std::fs::create_dir_all(full.parent().unwrap()).unwrap();
    std::fs::write(full, contents).unwrap();
}

/// Dataset with UK and FR channel files; IT is listed but has no file
fn dataset(root: &Path) {
    write(root, "catalog/channels.json", CATALOG);
    write(root, "list/channels/raw/countries_metadata.json", METADATA);
    write(root, "list/channels/raw/countries/uk.json", UK_CHANNELS);
    write(root, "list/channels/raw/countries/fr.json", FR_CHANNELS);
    // Present on disk but must be ignored: hasChannels is false
    write(root, "list/channels/raw/countries/ad.json", FR_CHANNELS);
}

fn config_for(root: &Path) -> Config {
    let mut config = Config::default();
    config.sources.catalog = root.join("catalog/channels.json").display().to_string();
    config.sources.channel_list = root.join("list").display().to_string();
    config.output.path = root.join("out/all_channels.m3u");
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_build_and_publish_from_local_dataset() {
        let dir = tempfile::tempdir().unwrap();
        dataset(dir.path());
        let config = config_for(dir.path());

        let service = PlaylistService::from_config(&config).unwrap();
        let published = service.publish_to(&config.output.path).await.unwrap();

        let written = std::fs::read_to_string(&config.output.path).unwrap();
        assert_eq!(
            written,
            "#EXTM3U\n\
             #EXTINF:-1 tvg-id=\"BBCOne.uk\" tvg-country=\"UK\" tvg-language=\"English\" group-title=\"general;news\" tvg-logo=\"https://logos.example/bbc1.png\" ,bbc 1\n\
             https://bbc.example/one.m3u8\n\
             #EXTINF:-1 tvg-id=\"uk3\" tvg-country=\"UK\" tvg-language=\"Unknown\" group-title=\"\" ,Community TV (YouTube)\n\
             https://youtube.example/community\n\
             #EXTINF:-1 tvg-id=\"France2.fr\" tvg-country=\"FR\" tvg-language=\"French\" group-title=\"\" ,France 2\n\
             https://fr.example/f2.m3u8\n"
        );
        assert_eq!(published.bytes_written, written.len() as u64);

        let summary = MetricsLogger::new().log_published(&published);
        assert_eq!(summary.total_entries, 3);
        assert_eq!(summary.youtube_entries, 1);
        assert_eq!(summary.countries_processed, 2);
        assert_eq!(summary.countries_failed, 1);
        assert_eq!(summary.malformed_records, 0);
        assert_eq!(published.report.catalog_entries, 2);
    }

    #[tokio::test]
    async fn test_country_name_fallback_and_sanitize() {
        let dir = tempfile::tempdir().unwrap();
        dataset(dir.path());
        write(
            dir.path(),
            "list/channels/raw/countries/it.json",
            r#"[{"nanoid": "it1", "name": "Rai \"Uno\"", "language": "Italian",
                 "iptv_urls": ["https://rai.example/1.m3u8"], "youtube_urls": []}]"#,
        );
        let mut config = config_for(dir.path());
        config.generation.group_title_fallback = GroupTitleFallback::CountryName;
        config.generation.attribute_escaping = AttributeEscaping::Sanitize;

        let service = PlaylistService::from_config(&config).unwrap();
        let report = service.run().await.unwrap();
        let text = service.render(&report.document);

        assert!(text.contains(
            "tvg-id=\"it1\" tvg-country=\"IT\" tvg-language=\"Italian\" group-title=\"Italy\" ,Rai \"Uno\"\n"
        ));
        assert!(text.contains("group-title=\"France\" ,France 2\n"));
        assert!(report.document.warnings.is_empty());
    }

    #[tokio::test]
    async fn test_wrong_typed_record_skipped_rest_of_country_kept() {
        let dir = tempfile::tempdir().unwrap();
        dataset(dir.path());
        write(
            dir.path(),
            "list/channels/raw/countries/uk.json",
            r#"[
                {"nanoid": "g1", "name": "Good One", "language": "English",
                 "iptv_urls": ["http://good"], "youtube_urls": []},
                {"nanoid": "b1", "name": "Bad", "language": "English",
                 "iptv_urls": "http://not-a-list", "youtube_urls": []},
                {"nanoid": "g2", "name": "Good Two", "language": 3,
                 "iptv_urls": ["http://good2"], "youtube_urls": []},
                {"nanoid": "g3", "name": "Good Three", "language": "English",
                 "iptv_urls": ["http://good3"], "youtube_urls": []}
            ]"#,
        );
        let config = config_for(dir.path());

        let service = PlaylistService::from_config(&config).unwrap();
        let document = service.run().await.unwrap().document;

        let uk_urls: Vec<&str> = document
            .entries
            .iter()
            .filter(|entry| entry.tvg_country == "UK")
            .map(|entry| entry.stream_url.as_str())
            .collect();
        assert_eq!(uk_urls, vec!["http://good", "http://good3"]);

        let positions: Vec<usize> = document
            .warnings
            .iter()
            .filter_map(|warning| match warning {
                BuildWarning::MalformedRecord { code, position, .. } if code == "UK" => {
                    Some(*position)
                }
                _ => None,
            })
            .collect();
        assert_eq!(positions, vec![1, 2]);
        assert!(!document.warnings.iter().any(|warning| matches!(
            warning,
            BuildWarning::CountryFetchFailed { code, .. } if code == "UK"
        )));

        let uk = document
            .countries
            .iter()
            .find(|report| report.code == "UK")
            .unwrap();
        assert_eq!(uk.records, Some(4));
        assert_eq!(uk.entries, 2);
    }

    #[tokio::test]
    async fn test_missing_catalog_name_aborts_without_output() {
        let dir = tempfile::tempdir().unwrap();
        dataset(dir.path());
        write(
            dir.path(),
            "catalog/channels.json",
            r#"[{"id": "a", "name": "A"}, {"id": "nameless"}]"#,
        );
        let config = config_for(dir.path());

        let service = PlaylistService::from_config(&config).unwrap();
        let result = service.publish_to(&config.output.path).await;

        assert!(matches!(
            result,
            Err(AppError::Catalog(CatalogError::MissingName { position: 1 }))
        ));
        assert!(!config.output.path.exists());
    }

    #[tokio::test]
    async fn test_missing_country_metadata_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "catalog/channels.json", CATALOG);
        let config = config_for(dir.path());

        let service = PlaylistService::from_config(&config).unwrap();
        let result = service.publish_to(&config.output.path).await;

        assert!(matches!(
            result,
            Err(AppError::Source(SourceError::NotFound { .. }))
        ));
        assert!(!config.output.path.exists());
    }
}
