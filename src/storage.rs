use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use serde::{de::DeserializeOwned, Serialize};
use crate::error::NeuroError;

// Distinguishes concurrent writes of the same document within one process
static WRITE_SEQ: AtomicU64 = AtomicU64::new(0);

/// Read a JSON document. `Ok(None)` when the file does not exist.
pub async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, NeuroError> {
    match tokio::fs::read_to_string(path).await {
        Ok(content) => {
            serde_json::from_str(&content)
                .map_err(|e| NeuroError::new(
                    format!("Failed to parse {}: {}", file_name(path), e),
                    "json_parse"
                ).with_context(format!("path: {:?}", path)))
                .map(Some)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Ok(None)
        }
        Err(e) => {
            Err(NeuroError::new(
                format!("Failed to read {}: {}", file_name(path), e),
                "io"
            ).with_context(format!("path: {:?}", path)))
        }
    }
}

/// Replace a JSON document as a whole.
/// The document is written to a sibling temp file and renamed over the target,
/// so readers see either the old or the new content.
pub async fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> Result<(), NeuroError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| NeuroError::new(
                format!("Failed to create directory: {}", e),
                "io"
            ).with_context(format!("path: {:?}", parent)))?;
    }

    let json = serde_json::to_string_pretty(value)
        .map_err(|e| NeuroError::new(
            format!("Failed to serialize {}: {}", file_name(path), e),
            "json_serialize"
        ))?;

    let tmp = temp_path(path);
    if let Err(e) = tokio::fs::write(&tmp, json).await {
        let _ = tokio::fs::remove_file(&tmp).await;
        return Err(NeuroError::new(
            format!("Failed to write {}: {}", file_name(path), e),
            "io"
        ).with_context(format!("path: {:?}", tmp)));
    }

    if let Err(e) = tokio::fs::rename(&tmp, path).await {
        let _ = tokio::fs::remove_file(&tmp).await;
        return Err(NeuroError::new(
            format!("Failed to replace {}: {}", file_name(path), e),
            "io"
        ).with_context(format!("path: {:?}", path)));
    }

    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    let seq = WRITE_SEQ.fetch_add(1, Ordering::Relaxed);
    name.push(format!(".{}.{}.tmp", std::process::id(), seq));
    path.with_file_name(name)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
