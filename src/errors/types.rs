//! Error type definitions for the playlist builder
//!
//! Fatal conditions (unreadable catalog, malformed catalog entries, output
//! failures) surface as [`AppError`]. Per-country fetch problems are
//! [`SourceError`]s that the generator downgrades to build warnings.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level application error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Source retrieval errors
    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    /// Catalog precondition violations
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Failure to publish the generated playlist
    #[error("Output error: {} - {source}", path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors raised while retrieving source documents
#[derive(Error, Debug)]
pub enum SourceError {
    /// The document does not exist at the given location
    #[error("Not found: {location}")]
    NotFound { location: String },

    /// Local filesystem failures
    #[error("I/O error reading {location}: {source}")]
    Io {
        location: String,
        #[source]
        source: std::io::Error,
    },

    /// Non-success HTTP status from a remote source
    #[error("HTTP error: {status} - {location}")]
    Http { status: u16, location: String },

    /// Connection, timeout or body read failures
    #[error("Transport error: {location} - {message}")]
    Transport { location: String, message: String },

    /// The document could not be decoded into the expected shape
    #[error("Parse error: {location} - {source}")]
    Parse {
        location: String,
        #[source]
        source: serde_json::Error,
    },

    /// A configured location is not usable
    #[error("Invalid location: {location} - {message}")]
    InvalidLocation { location: String, message: String },
}

/// Global catalog precondition violations
#[derive(Error, Debug)]
pub enum CatalogError {
    /// A catalog entry has no `name`
    #[error("Malformed catalog entry at position {position}: missing name")]
    MissingName { position: usize },
}

impl AppError {
    /// Create a configuration error with a custom message
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create an output error for the given path
    pub fn output<P: Into<PathBuf>>(path: P, source: std::io::Error) -> Self {
        Self::Output {
            path: path.into(),
            source,
        }
    }
}

impl SourceError {
    /// Create a not found error
    pub fn not_found<L: Into<String>>(location: L) -> Self {
        Self::NotFound {
            location: location.into(),
        }
    }

    /// Create a transport error
    pub fn transport<L: Into<String>, M: Into<String>>(location: L, message: M) -> Self {
        Self::Transport {
            location: location.into(),
            message: message.into(),
        }
    }

    /// Create an invalid location error
    pub fn invalid_location<L: Into<String>, M: Into<String>>(location: L, message: M) -> Self {
        Self::InvalidLocation {
            location: location.into(),
            message: message.into(),
        }
    }

    /// Whether the failure means the document is absent rather than unreadable
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
