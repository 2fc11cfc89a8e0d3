//! Photo storage for uploaded session images
//!
//! Uploads are independent of session persistence: the caller wires the
//! returned reference into a later create/update. An uploaded photo that
//! no session ever references is an accepted orphan; there is no garbage
//! collection.

use crate::error::ApiError;
use chrono::Utc;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Upload size cap: 5 MiB
pub const MAX_PHOTO_BYTES: usize = 5 * 1024 * 1024;

const ALLOWED_MIME_TYPES: [&str; 4] = ["image/jpeg", "image/jpg", "image/png", "image/gif"];

/// A stored photo, described for the upload response
#[derive(Debug, Clone)]
pub struct StoredPhoto {
    /// Reference usable in session payloads and for static retrieval
    pub photo_path: String,
    pub filename: String,
    pub size: usize,
    pub mime_type: String,
}

/// Outcome of a best-effort photo file removal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhotoCleanup {
    Removed,
    /// File was already gone; nothing to do
    Missing,
    /// Unlink failed; callers log this and continue
    Failed,
}

/// Filesystem store rooted at the configured uploads directory
#[derive(Clone)]
pub struct PhotoStore {
    dir: PathBuf,
}

impl PhotoStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Root directory served under `/uploads`
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Create the uploads directory if it does not exist yet
    pub async fn ensure_dir(&self) -> anyhow::Result<()> {
        tokio::fs::create_dir_all(&self.dir).await?;
        Ok(())
    }

    /// Persist uploaded bytes under a collision-resistant name
    ///
    /// Accepts JPEG/PNG/GIF up to 5 MiB; the generated name keeps the
    /// original extension so the static file server infers the right
    /// content type.
    pub async fn store(
        &self,
        bytes: &[u8],
        original_name: &str,
        mime_type: &str,
    ) -> Result<StoredPhoto, ApiError> {
        if !ALLOWED_MIME_TYPES.contains(&mime_type) {
            return Err(ApiError::UnsupportedMediaType(
                "Unsupported file type. Use JPG, PNG or GIF".to_string(),
            ));
        }

        if bytes.len() > MAX_PHOTO_BYTES {
            return Err(ApiError::PayloadTooLarge(
                "File too large. Maximum size: 5 MB".to_string(),
            ));
        }

        let filename = format!(
            "session_{}-{}{}",
            Utc::now().timestamp_millis(),
            Uuid::new_v4().simple(),
            extension_for(original_name, mime_type),
        );

        tokio::fs::write(self.dir.join(&filename), bytes)
            .await
            .map_err(|e| ApiError::Internal(anyhow::anyhow!("Failed to store photo: {}", e)))?;

        Ok(StoredPhoto {
            photo_path: format!("/uploads/{}", filename),
            filename,
            size: bytes.len(),
            mime_type: mime_type.to_string(),
        })
    }

    /// Best-effort removal of a stored photo by its reference
    ///
    /// Only the final path component is used, so a reference cannot reach
    /// outside the uploads directory. Never returns an error; callers
    /// decide how loudly to log each outcome.
    pub async fn cleanup(&self, photo_path: &str) -> PhotoCleanup {
        let Some(filename) = Path::new(photo_path).file_name() else {
            return PhotoCleanup::Failed;
        };

        match tokio::fs::remove_file(self.dir.join(filename)).await {
            Ok(()) => PhotoCleanup::Removed,
            Err(e) if e.kind() == ErrorKind::NotFound => PhotoCleanup::Missing,
            Err(_) => PhotoCleanup::Failed,
        }
    }
}

/// Extension for the stored filename: the original one when present,
/// otherwise derived from the declared mime type
fn extension_for(original_name: &str, mime_type: &str) -> String {
    if let Some(ext) = Path::new(original_name).extension().and_then(|e| e.to_str()) {
        return format!(".{}", ext.to_lowercase());
    }

    match mime_type {
        "image/png" => ".png".to_string(),
        "image/gif" => ".gif".to_string(),
        _ => ".jpg".to_string(),
    }
}
