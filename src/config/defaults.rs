//! Configuration default values
//!
//! This module contains all the default values for configuration options,
//! making them easily changeable in one central location.

// Source defaults
pub const DEFAULT_CATALOG_LOCATION: &str = "https://iptv-org.github.io/api/channels.json";
pub const DEFAULT_CHANNEL_LIST_LOCATION: &str = "../tv-garden-channel-list";

// HTTP defaults
pub const DEFAULT_REQUEST_TIMEOUT: &str = "30s";
pub const DEFAULT_USER_AGENT: &str = concat!("m3u-builder/", env!("CARGO_PKG_VERSION"));

// Output defaults
pub const DEFAULT_OUTPUT_PATH: &str = "all_channels.m3u";

// Generation defaults
pub const DEFAULT_FETCH_CONCURRENCY: usize = 1;
