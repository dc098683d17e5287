//! Local disk storage for contact photos.
//!
//! Photos live in one flat directory, named `<contact id><extension>`.

use std::path::{Path, PathBuf};

use tokio::fs;

use crate::errors::AppError;

/// Extension used when the uploaded file name does not carry a usable one.
pub const DEFAULT_EXTENSION: &str = ".png";

/// Flat photo directory.
#[derive(Debug, Clone)]
pub struct PhotoStorage {
    dir: PathBuf,
}

impl PhotoStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write `bytes` to `<dir>/<file_name>`, creating the directory if needed.
    /// An existing file with the same name is overwritten.
    pub async fn save(&self, file_name: &str, bytes: &[u8]) -> Result<PathBuf, AppError> {
        fs::create_dir_all(&self.dir).await.map_err(|e| {
            tracing::error!("Failed to create photo directory {:?}: {}", self.dir, e);
            AppError::Io(format!("Unable to create photo directory: {}", e))
        })?;

        let path = self.dir.join(file_name);
        fs::write(&path, bytes).await.map_err(|e| {
            tracing::error!("Failed to write photo {:?}: {}", path, e);
            AppError::Io(format!("Unable to upload image: {}", e))
        })?;

        tracing::debug!("Stored {} bytes at {:?}", bytes.len(), path);
        Ok(path)
    }

    /// Read a stored photo by file name.
    pub async fn read(&self, file_name: &str) -> Result<Vec<u8>, AppError> {
        if !is_plain_file_name(file_name) {
            return Err(AppError::BadRequest(format!(
                "Invalid image name: {}",
                file_name
            )));
        }

        match fs::read(self.dir.join(file_name)).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(AppError::NotFound(
                format!("Image {} not found", file_name),
            )),
            Err(e) => Err(e.into()),
        }
    }
}

/// Derive the stored extension (with its leading dot) from an uploaded file name.
///
/// Takes whatever follows the last `.`, lowercased. Falls back to
/// [`DEFAULT_EXTENSION`] when there is no dot or the suffix is not plain
/// ASCII alphanumerics.
pub fn file_extension(original_filename: &str) -> String {
    match original_filename.rsplit_once('.') {
        Some((_, ext)) if !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()) => {
            format!(".{}", ext.to_ascii_lowercase())
        }
        _ => DEFAULT_EXTENSION.to_string(),
    }
}

/// Content type served for a stored photo.
pub fn content_type(file_name: &str) -> &'static str {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        _ => "application/octet-stream",
    }
}

fn is_plain_file_name(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains(['/', '\\'])
}
