//! Utility functions for the playlist builder
//!
//! This module provides various helper functions including:
//! - Base URL sanitization and location joining
//! - Serde helpers for loosely-typed source documents
//! - Human-readable duration formatting

use serde::{Deserialize, Deserializer};

/// Whether a configured location addresses a remote http(s) resource
pub fn is_remote_location(location: &str) -> bool {
    let lower = location.trim_start().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Sanitize a base URL by removing surrounding whitespace and trailing slashes
pub fn sanitize_base_url(base_url: &str) -> String {
    let mut url = base_url.trim().to_string();

    while url.ends_with('/') {
        url.pop();
    }

    url
}

/// Join a relative document path onto a base URL
///
/// An empty path addresses the base itself.
pub fn join_url(base_url: &str, path: &str) -> String {
    let base = sanitize_base_url(base_url);
    let path = path.trim_start_matches('/');
    if path.is_empty() {
        base
    } else {
        format!("{}/{}", base, path)
    }
}

/// Deserialize a field that may be explicitly `null`, using its default instead
///
/// Use with `#[serde(default, deserialize_with = "null_as_default")]`.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Formats a time duration in milliseconds to a human-readable string
pub fn format_duration(millis: u64) -> String {
    if millis < 1000 {
        format!("{}ms", millis)
    } else if millis < 60_000 {
        let seconds = millis as f64 / 1000.0;
        if seconds >= 10.0 {
            format!("{:.1}s", seconds)
        } else {
            format!("{:.2}s", seconds)
        }
    } else {
        let total_seconds = millis / 1000;
        let minutes = total_seconds / 60;
        let seconds = total_seconds % 60;

        if seconds == 0 {
            format!("{}m", minutes)
        } else {
            format!("{}m{}s", minutes, seconds)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_base_url() {
        assert_eq!(
            sanitize_base_url("https://example.com/list/"),
            "https://example.com/list"
        );
        assert_eq!(
            sanitize_base_url("  https://example.com//  "),
            "https://example.com"
        );
    }

    #[test]
    fn test_join_url() {
        assert_eq!(
            join_url("https://example.com/list/", "/channels/raw/x.json"),
            "https://example.com/list/channels/raw/x.json"
        );
        assert_eq!(
            join_url("https://example.com/api/channels.json", ""),
            "https://example.com/api/channels.json"
        );
    }

    #[test]
    fn test_is_remote_location() {
        assert!(is_remote_location("https://iptv-org.github.io/api/channels.json"));
        assert!(is_remote_location("HTTP://example.com"));
        assert!(!is_remote_location("../tv-garden-channel-list"));
        assert!(!is_remote_location("/data/channels.json"));
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0), "0ms");
        assert_eq!(format_duration(250), "250ms");
        assert_eq!(format_duration(1500), "1.50s");
        assert_eq!(format_duration(12_340), "12.3s");
        assert_eq!(format_duration(120_000), "2m");
        assert_eq!(format_duration(125_000), "2m5s");
    }
}
