pub mod playlist;

pub use playlist::{BuildReport, PlaylistService, PublishedPlaylist};
