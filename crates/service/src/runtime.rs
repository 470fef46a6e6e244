//! Runtime environment helpers
//!
//! Thin wrapper around `common::env` so binary crates can prepare the
//! upload directory from the `[uploads]` config section.

use configs::UploadConfig;

/// Ensure the upload directory exists before the first request arrives.
pub async fn ensure_env(uploads: &UploadConfig) -> anyhow::Result<()> {
    common::env::ensure_upload_dir(&uploads.dir).await
}
