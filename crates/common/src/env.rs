//! Environment/runtime helpers
//!
//! Sanity checks to ensure expected directories exist at startup.

use std::path::Path;

use tracing::{info, warn};

/// Create the upload directory if missing and make sure it is a directory.
pub async fn ensure_upload_dir(upload_dir: &Path) -> anyhow::Result<()> {
    match tokio::fs::metadata(upload_dir).await {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(anyhow::anyhow!(
            "upload path {} exists but is not a directory",
            upload_dir.display()
        )),
        Err(_) => {
            warn!(upload_dir = %upload_dir.display(), "upload directory missing; creating it");
            tokio::fs::create_dir_all(upload_dir)
                .await
                .map_err(|e| anyhow::anyhow!("cannot create {}: {e}", upload_dir.display()))?;
            info!(upload_dir = %upload_dir.display(), "upload directory created");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn creates_missing_directory() {
        let dir = std::env::temp_dir()
            .join(format!("common-env-{}", uuid::Uuid::new_v4()))
            .join("uploads");
        ensure_upload_dir(&dir).await.unwrap();
        assert!(dir.is_dir());
        // idempotent
        ensure_upload_dir(&dir).await.unwrap();
    }

    #[tokio::test]
    async fn rejects_plain_file() {
        let file = std::env::temp_dir().join(format!("common-env-{}.txt", uuid::Uuid::new_v4()));
        tokio::fs::write(&file, b"x").await.unwrap();
        assert!(ensure_upload_dir(&file).await.is_err());
    }
}
