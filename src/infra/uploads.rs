//! Uploaded image storage.
//!
//! Images arrive as multipart uploads and are written under the upload
//! directory with generated names. Removal is best-effort: a file that
//! cannot be deleted is logged and never fails the calling operation.

use std::path::PathBuf;

use tokio::fs;
use uuid::Uuid;

use crate::errors::{AppError, AppResult};

/// File store for uploaded images
pub struct ImageStore {
    root: PathBuf,
}

impl ImageStore {
    /// Create a store rooted at the given directory
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Write image bytes and return the stored path.
    ///
    /// The returned path is relative to the process working directory and
    /// doubles as the public URL path under the static uploads mount.
    pub async fn save(&self, content_type: &str, data: &[u8]) -> AppResult<String> {
        let ext = extension_for(content_type)
            .ok_or_else(|| AppError::validation("Only png and jpeg images are accepted"))?;

        fs::create_dir_all(&self.root)
            .await
            .map_err(|e| AppError::internal(format!("Could not create upload dir: {}", e)))?;

        let path = self.root.join(format!("{}.{}", Uuid::new_v4(), ext));
        fs::write(&path, data)
            .await
            .map_err(|e| AppError::internal(format!("Could not store image: {}", e)))?;

        Ok(path.to_string_lossy().into_owned())
    }

    /// Delete a stored image, logging on failure instead of surfacing it
    pub async fn remove(&self, path: &str) {
        if let Err(e) = fs::remove_file(path).await {
            tracing::warn!("Could not remove image file {}: {}", path, e);
        }
    }
}

/// Map an upload content type to a file extension
fn extension_for(content_type: &str) -> Option<&'static str> {
    match content_type {
        "image/png" => Some("png"),
        "image/jpeg" | "image/jpg" => Some("jpg"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> ImageStore {
        ImageStore::new(std::env::temp_dir().join(format!("placez-test-{}", Uuid::new_v4())))
    }

    #[tokio::test]
    async fn save_writes_file_and_returns_its_path() {
        let store = temp_store();
        let path = store.save("image/png", b"not-really-a-png").await.unwrap();

        assert!(path.ends_with(".png"));
        assert_eq!(fs::read(&path).await.unwrap(), b"not-really-a-png");

        store.remove(&path).await;
        assert!(fs::metadata(&path).await.is_err());
    }

    #[tokio::test]
    async fn save_rejects_unsupported_content_types() {
        let store = temp_store();
        let result = store.save("application/pdf", b"%PDF-").await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn remove_swallows_missing_files() {
        let store = temp_store();
        // Nothing written, nothing to remove; must not panic or error
        store.remove("does/not/exist.png").await;
    }
}
