use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ToyError {
    /// Path id is not a 24-character hex ObjectId
    #[error("Invalid toy id: '{0}'")]
    InvalidId(String),

    #[error("Toy {0} not found")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(String),
}

pub type ToyResult<T> = Result<T, ToyError>;

/// Convert ToyError to AppError for standardized error responses
impl From<ToyError> for AppError {
    fn from(err: ToyError) -> Self {
        match err {
            ToyError::InvalidId(_) => AppError::InvalidId(err.to_string()),
            ToyError::NotFound(_) => AppError::NotFound(err.to_string()),
            ToyError::Database(msg) => AppError::Database(msg),
        }
    }
}

impl IntoResponse for ToyError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<mongodb::error::Error> for ToyError {
    fn from(err: mongodb::error::Error) -> Self {
        ToyError::Database(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_invalid_id_is_400() {
        let response = ToyError::InvalidId("abc".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_not_found_is_404() {
        let response = ToyError::NotFound("64b7f0c2a1d3e4f5a6b7c8d9".into()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_database_is_500() {
        let response = ToyError::Database("connection refused".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
