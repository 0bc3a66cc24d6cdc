//! Stream URL selection policy
//!
//! The first IPTV URL always wins. Only when a channel has no IPTV URL does
//! the first YouTube URL get used, and the entry is labelled as such. Every
//! other candidate is discarded.

use crate::models::StreamKind;

/// Suffix appended to the display name of YouTube-backed entries
pub const YOUTUBE_SUFFIX: &str = " (YouTube)";

/// The single URL chosen for a channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectedStream<'a> {
    pub url: &'a str,
    pub kind: StreamKind,
}

impl SelectedStream<'_> {
    /// Display name for a channel served by this stream
    pub fn display_name(&self, channel_name: &str) -> String {
        match self.kind {
            StreamKind::Iptv => channel_name.to_string(),
            StreamKind::YouTube => format!("{}{}", channel_name, YOUTUBE_SUFFIX),
        }
    }
}

/// Pick at most one stream from the candidate lists
pub fn select_stream<'a>(iptv_urls: &'a [String], youtube_urls: &'a [String]) -> Option<SelectedStream<'a>> {
    if let Some(url) = iptv_urls.first() {
        return Some(SelectedStream {
            url,
            kind: StreamKind::Iptv,
        });
    }

    youtube_urls.first().map(|url| SelectedStream {
        url,
        kind: StreamKind::YouTube,
    })
}
