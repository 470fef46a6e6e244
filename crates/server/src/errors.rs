use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use service::auth::errors::AuthError;
use service::auth::AccessError;
use service::listing::ListingError;
use thiserror::Error;
use tracing::error;

/// Terminal request failures, rendered as `{"error": ...}` with a matching status.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),
    #[error("authentication required")]
    Unauthenticated,
    #[error("admin privileges required")]
    Forbidden,
    #[error("{0}")]
    Conflict(String),
    #[error("{message}")]
    Rejected { status: StatusCode, message: String },
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Unauthenticated => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Rejected { status, .. } => *status,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "request failed");
        }
        (status, Json(serde_json::json!({"error": self.to_string()}))).into_response()
    }
}

impl From<AccessError> for ApiError {
    fn from(e: AccessError) -> Self {
        match e {
            AccessError::Unauthenticated => ApiError::Unauthenticated,
            AccessError::Forbidden => ApiError::Forbidden,
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::Unauthorized => ApiError::Unauthenticated,
            AuthError::Conflict => ApiError::Conflict(e.to_string()),
            AuthError::Validation(msg) => ApiError::Rejected { status: StatusCode::BAD_REQUEST, message: msg },
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<ListingError> for ApiError {
    fn from(e: ListingError) -> Self {
        match e {
            ListingError::NotFound(_) => ApiError::NotFound(e.to_string()),
            ListingError::Access(access) => access.into(),
            ListingError::MissingField(_) | ListingError::InvalidField { .. } => {
                ApiError::Rejected { status: StatusCode::BAD_REQUEST, message: e.to_string() }
            }
            ListingError::Upload(_) | ListingError::Repository(_) => ApiError::Internal(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listing_errors_map_to_statuses() {
        assert_eq!(ApiError::from(ListingError::NotFound(3)).status(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::from(ListingError::Access(AccessError::Unauthenticated)).status(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::from(ListingError::Access(AccessError::Forbidden)).status(), StatusCode::FORBIDDEN);
        assert_eq!(ApiError::from(ListingError::MissingField("title")).status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::from(ListingError::Repository("boom".into())).status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn auth_errors_map_to_statuses() {
        assert_eq!(ApiError::from(AuthError::Conflict).status(), StatusCode::CONFLICT);
        assert_eq!(ApiError::from(AuthError::Unauthorized).status(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::from(AuthError::HashError("x".into())).status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
