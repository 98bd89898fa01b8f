use crate::model::ErrorResponse;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use rangelink_core::{ShortenerError, StorageError};
use tracing::{error, warn};

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug)]
pub enum AppError {
    NotFound,
    Shortener(ShortenerError),
}

impl From<ShortenerError> for AppError {
    fn from(value: ShortenerError) -> Self {
        AppError::Shortener(value)
    }
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Shortener(ShortenerError::InvalidUrl(_)) => StatusCode::BAD_REQUEST,
            AppError::Shortener(ShortenerError::DuplicateKey(_)) => StatusCode::CONFLICT,
            AppError::Shortener(ShortenerError::Storage(
                StorageError::Unavailable(_) | StorageError::Timeout(_),
            )) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Shortener(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            AppError::NotFound => "link not found".to_string(),
            AppError::Shortener(err) => {
                if status.is_server_error() {
                    error!(error = %err, "request failed");
                } else if status == StatusCode::CONFLICT {
                    warn!(error = %err, "conflicting write");
                }
                err.to_string()
            }
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: ShortenerError) -> StatusCode {
        AppError::from(err).status()
    }

    #[test]
    fn maps_shortener_errors_to_status_codes() {
        assert_eq!(
            status_of(ShortenerError::InvalidUrl("ftp://x".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(ShortenerError::DuplicateKey("4c92".into())),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(ShortenerError::Storage(StorageError::Unavailable(
                "pool closed".into()
            ))),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            status_of(ShortenerError::Storage(StorageError::Timeout("slow".into()))),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            status_of(ShortenerError::Storage(StorageError::Query("syntax".into()))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status_of(ShortenerError::Allocation("exhausted".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(AppError::NotFound.status(), StatusCode::NOT_FOUND);
    }
}
