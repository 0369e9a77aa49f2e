//! Shared helpers for the JSON documents kept on disk.
//!
//! Documents are written pretty-printed with a trailing newline.  Writes go to
//! a sibling temporary file that is then renamed over the target, so a reader
//! never sees a half-written document.

use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};

use crate::application::ports::StoreError;

/// Reads and parses `path`.  Returns `Ok(None)` when the file does not exist.
///
/// # Errors
///
/// Returns [`StoreError::Io`] for file-system errors other than "not found",
/// and [`StoreError::Parse`] if the content is not the expected JSON.
pub async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, StoreError> {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(StoreError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    // An empty file is treated like a missing one.
    if content.trim().is_empty() {
        return Ok(None);
    }

    serde_json::from_str(&content)
        .map(Some)
        .map_err(|e| StoreError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
}

/// Serializes `document` and atomically replaces `path` with it.
///
/// Creates the parent directory if needed.
///
/// # Errors
///
/// Returns [`StoreError::Serialize`] or [`StoreError::Io`].
pub async fn write_json<T: Serialize>(path: &Path, document: &T) -> Result<(), StoreError> {
    let mut content =
        serde_json::to_string_pretty(document).map_err(|e| StoreError::Serialize(e.to_string()))?;
    content.push('\n');
    write_atomic(path, content.as_bytes()).await
}

/// Writes raw bytes to `path` through a temporary sibling file.
pub async fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), StoreError> {
    let io_err = |source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(dir) = path.parent() {
        tokio::fs::create_dir_all(dir).await.map_err(io_err)?;
    }

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    tokio::fs::write(&tmp, bytes).await.map_err(io_err)?;
    tokio::fs::rename(&tmp, path).await.map_err(io_err)?;
    Ok(())
}
