//! On-disk storage for uploaded images.
//!
//! Files are stored under the client-supplied name, sanitized for path safety
//! only. Two uploads with the same name overwrite each other (last write wins).

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use unicode_normalization::UnicodeNormalization;

const WINDOWS_DEVICE_NAMES: &[&str] = &[
    "CON", "AUX", "COM1", "COM2", "COM3", "COM4", "LPT1", "LPT2", "LPT3", "PRN", "NUL",
];

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("invalid upload filename: {0:?}")]
    InvalidFilename(String),

    #[error("upload not found: {0}")]
    NotFound(String),

    #[error("upload storage error: {0}")]
    Io(#[from] io::Error),
}

/// Reduce a client filename to `[A-Za-z0-9_.-]`, with no path components.
///
/// Accented letters are decomposed (NFKD) so `é` keeps its base `e`; other
/// non-ASCII characters are dropped. Returns `None` when nothing usable is left.
pub fn secure_filename(name: &str) -> Option<String> {
    let spaced: String = name
        .nfkd()
        .filter(char::is_ascii)
        .map(|c| if c == '/' || c == '\\' { ' ' } else { c })
        .collect();

    let joined = spaced.split_whitespace().collect::<Vec<_>>().join("_");
    let kept: String = joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
        .collect();
    let trimmed = kept.trim_matches(|c| c == '.' || c == '_');

    if trimmed.is_empty() {
        return None;
    }

    let stem = trimmed.split('.').next().unwrap_or_default().to_ascii_uppercase();
    if WINDOWS_DEVICE_NAMES.contains(&stem.as_str()) {
        return Some(format!("_{trimmed}"));
    }

    Some(trimmed.to_string())
}

/// A file written by [`UploadStore::save`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredUpload {
    pub filename: String,
    pub path: PathBuf,
}

impl StoredUpload {
    /// Path the file is served from.
    pub fn url_path(&self) -> String {
        format!("/uploads/{}", self.filename)
    }
}

#[derive(Debug, Clone)]
pub struct UploadStore {
    dir: PathBuf,
}

impl UploadStore {
    /// Use `dir` for uploads, creating it if needed.
    pub async fn open(dir: impl Into<PathBuf>) -> Result<Self, UploadError> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir).await?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub async fn save(&self, client_name: &str, bytes: &[u8]) -> Result<StoredUpload, UploadError> {
        let filename = secure_filename(client_name)
            .ok_or_else(|| UploadError::InvalidFilename(client_name.to_string()))?;
        let path = self.dir.join(&filename);

        tokio::fs::write(&path, bytes).await?;
        tracing::debug!(file = %path.display(), bytes = bytes.len(), "upload stored");

        Ok(StoredUpload { filename, path })
    }

    pub async fn read(&self, name: &str) -> Result<Vec<u8>, UploadError> {
        let filename = secure_filename(name).ok_or_else(|| UploadError::NotFound(name.to_string()))?;
        match tokio::fs::read(self.dir.join(&filename)).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(UploadError::NotFound(filename)),
            Err(e) => Err(UploadError::Io(e)),
        }
    }
}

/// Content type for a stored upload, from its extension.
pub fn content_type_for(filename: &str) -> &'static str {
    image::ImageFormat::from_path(filename)
        .map(|format| format.to_mime_type())
        .unwrap_or("application/octet-stream")
}
