//! Centralized error handling for the playlist builder
//!
//! # Error Categories
//!
//! - **Source Errors**: retrieval and decoding of catalog and channel-list documents
//! - **Catalog Errors**: malformed global catalog entries (fatal)
//! - **Configuration Errors**: unusable settings
//! - **Output Errors**: publishing the generated playlist
//!
//! # Usage
//!
//! ```rust
//! use m3u_builder::errors::{AppError, AppResult};
//!
//! fn example_function() -> AppResult<String> {
//!     Err(AppError::configuration("fetch_concurrency must be at least 1"))
//! }
//! ```

pub mod types;

pub use types::*;

/// Convenience type alias for Results using AppError
pub type AppResult<T> = Result<T, AppError>;

/// Convenience type alias for Source Results
pub type SourceResult<T> = Result<T, SourceError>;
