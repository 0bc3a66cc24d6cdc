//! Atomic publishing of the rendered playlist
//!
//! Content goes to a hidden sibling temporary file first and is renamed over
//! the target, so readers never observe a partially written playlist.

use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::errors::{AppError, AppResult};

fn temp_path_for(path: &Path) -> PathBuf {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| "playlist".to_string());
    path.with_file_name(format!(".{}.tmp", file_name))
}

/// Write `contents` to `path` atomically, returning the bytes written
pub async fn publish(path: &Path, contents: &str) -> AppResult<u64> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| AppError::output(parent, e))?;
    }

    let temp_path = temp_path_for(path);
    debug!("Writing playlist to temporary file: {}", temp_path.display());

    tokio::fs::write(&temp_path, contents)
        .await
        .map_err(|e| AppError::output(&temp_path, e))?;

    if let Err(e) = tokio::fs::rename(&temp_path, path).await {
        if let Err(cleanup) = tokio::fs::remove_file(&temp_path).await {
            warn!(
                "Failed to remove temporary file {}: {}",
                temp_path.display(),
                cleanup
            );
        }
        return Err(AppError::output(path, e));
    }

    info!(
        "Atomic move completed: {} -> {} ({} bytes)",
        temp_path.display(),
        path.display(),
        contents.len()
    );

    Ok(contents.len() as u64)
}
