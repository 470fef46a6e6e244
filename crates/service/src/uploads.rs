//! Image upload handling for listings.
//!
//! Files whose suffix is not on the allow-list are skipped silently; accepted
//! files are written under a sanitized name into the upload directory.
//! Existing files with the same name are overwritten.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use configs::UploadConfig;
use thiserror::Error;
use tracing::{debug, info, instrument};

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("cannot write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A file part as submitted by the client.
#[derive(Clone, Debug, PartialEq)]
pub struct UploadedFile {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn new(filename: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self { filename: filename.into(), bytes: bytes.into() }
    }
}

#[derive(Clone, Debug)]
pub struct UploadStore {
    dir: PathBuf,
    allowed: HashSet<String>,
}

impl UploadStore {
    pub fn new<I, S>(dir: impl Into<PathBuf>, allowed_extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let allowed = allowed_extensions
            .into_iter()
            .map(|e| e.as_ref().trim_start_matches('.').to_ascii_lowercase())
            .collect();
        Self { dir: dir.into(), allowed }
    }

    pub fn from_config(cfg: &UploadConfig) -> Self {
        Self::new(cfg.dir.clone(), &cfg.allowed_extensions)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// True when the text after the last `.` is on the allow-list, ignoring case.
    pub fn accepts(&self, filename: &str) -> bool {
        match filename.rsplit_once('.') {
            Some((_, ext)) => self.allowed.contains(&ext.to_ascii_lowercase()),
            None => false,
        }
    }

    /// Store one optional file, returning the stored filename.
    ///
    /// `Ok(None)` means nothing was stored: no file, an empty name, a
    /// disallowed suffix, or a name that sanitizes to nothing usable.
    #[instrument(skip(self, file), fields(filename = file.map(|f| f.filename.as_str()).unwrap_or("")))]
    pub async fn store(&self, file: Option<&UploadedFile>) -> Result<Option<String>, UploadError> {
        let Some(file) = file else { return Ok(None) };
        if file.filename.is_empty() || !self.accepts(&file.filename) {
            debug!("upload_skipped");
            return Ok(None);
        }
        let name = sanitize_filename(&file.filename);
        if name.is_empty() || !self.accepts(&name) {
            debug!(sanitized = %name, "upload_skipped");
            return Ok(None);
        }

        let path = self.dir.join(&name);
        tokio::fs::write(&path, &file.bytes)
            .await
            .map_err(|source| UploadError::Io { path: path.clone(), source })?;
        info!(stored = %name, bytes = file.bytes.len(), "upload_stored");
        Ok(Some(name))
    }

    /// Store each file in order, keeping only the ones that were accepted.
    pub async fn store_all(&self, files: &[UploadedFile]) -> Result<Vec<String>, UploadError> {
        let mut stored = Vec::with_capacity(files.len());
        for file in files {
            if let Some(name) = self.store(Some(file)).await? {
                stored.push(name);
            }
        }
        Ok(stored)
    }
}

/// Reduce a client-supplied filename to a flat, ASCII-only name.
///
/// Path separators become word breaks, whitespace runs become `_`, every
/// character outside `[A-Za-z0-9_.-]` is dropped, and leading or trailing
/// `.`/`_` are trimmed. The result may be empty.
pub fn sanitize_filename(filename: &str) -> String {
    let ascii: String = filename.chars().filter(|c| c.is_ascii()).collect();
    let spaced = ascii.replace(['/', '\\'], " ");
    let joined = spaced.split_whitespace().collect::<Vec<_>>().join("_");
    let kept: String = joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
        .collect();
    kept.trim_matches(|c| c == '.' || c == '_').to_string()
}
