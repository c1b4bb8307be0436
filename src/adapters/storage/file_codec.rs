//! Shared helpers for the file-backed stores: one file per user holding a
//! serialized list.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::config::StoreFormat;
use crate::domain::foundation::UserId;

#[derive(Debug)]
pub(super) enum CodecError {
    Io(String),
    Format(String),
}

/// File path for a user's list. Characters outside `[A-Za-z0-9_-]` are
/// replaced so that user ids cannot escape the base directory.
pub(super) fn user_file(base: &Path, user_id: &UserId, suffix: &str, format: StoreFormat) -> PathBuf {
    let safe: String = user_id
        .as_str()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    base.join(format!("{}.{}.{}", safe, suffix, format.extension()))
}

/// Reads a list, treating a missing file as empty.
pub(super) async fn read_list<T: DeserializeOwned>(
    path: &Path,
    format: StoreFormat,
) -> Result<Vec<T>, CodecError> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let text = fs::read_to_string(path)
        .await
        .map_err(|e| CodecError::Io(e.to_string()))?;
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }

    match format {
        StoreFormat::Json => serde_json::from_str(&text).map_err(|e| CodecError::Format(e.to_string())),
        StoreFormat::Yaml => serde_yaml::from_str(&text).map_err(|e| CodecError::Format(e.to_string())),
    }
}

/// Replaces the list on disk. Writes a sibling temp file first and renames it
/// over the target so readers never see a half-written file.
pub(super) async fn write_list<T: Serialize>(
    path: &Path,
    format: StoreFormat,
    items: &[T],
) -> Result<(), CodecError> {
    let text = match format {
        StoreFormat::Json => {
            serde_json::to_string_pretty(items).map_err(|e| CodecError::Format(e.to_string()))?
        }
        StoreFormat::Yaml => {
            serde_yaml::to_string(items).map_err(|e| CodecError::Format(e.to_string()))?
        }
    };

    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)
            .await
            .map_err(|e| CodecError::Io(e.to_string()))?;
    }

    let tmp = path.with_extension("tmp");
    fs::write(&tmp, text)
        .await
        .map_err(|e| CodecError::Io(e.to_string()))?;
    fs::rename(&tmp, path)
        .await
        .map_err(|e| CodecError::Io(e.to_string()))?;
    Ok(())
}
