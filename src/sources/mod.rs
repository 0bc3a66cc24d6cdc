//! Source data retrieval
//!
//! Catalog and channel-list documents are read through the [`DataSource`]
//! trait, implemented for local directories ([`LocalSource`]) and http(s)
//! base URLs ([`HttpSource`]). [`SourceFactory`] picks the implementation from
//! a configured location; [`ChannelListRepository`] knows the dataset layout
//! and serves per-country records to the playlist generator.

pub mod factory;
pub mod http;
pub mod local;
pub mod repository;
pub mod traits;

pub use factory::SourceFactory;
pub use http::HttpSource;
pub use local::LocalSource;
pub use repository::{load_catalog, ChannelListRepository};
pub use traits::*;
