use thiserror::Error;

use crate::auth::AccessError;
use crate::uploads::UploadError;

/// Business errors for listing workflows
#[derive(Debug, Error)]
pub enum ListingError {
    #[error("missing field: {0}")]
    MissingField(&'static str),
    #[error("invalid field {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },
    #[error("house {0} not found")]
    NotFound(i32),
    #[error(transparent)]
    Access(#[from] AccessError),
    #[error(transparent)]
    Upload(#[from] UploadError),
    #[error("repository error: {0}")]
    Repository(String),
}

impl ListingError {
    /// Failures the caller recovers from by re-submitting the form.
    pub fn is_validation(&self) -> bool {
        matches!(self, ListingError::MissingField(_) | ListingError::InvalidField { .. })
    }

    /// Short machine-readable code used for flash messages.
    pub fn flash_code(&self) -> Option<String> {
        match self {
            ListingError::MissingField(field) => Some(format!("missing_field:{field}")),
            ListingError::InvalidField { field, .. } => Some(format!("invalid_field:{field}")),
            _ => None,
        }
    }
}

impl From<models::errors::ModelError> for ListingError {
    fn from(e: models::errors::ModelError) -> Self {
        ListingError::Repository(e.to_string())
    }
}
