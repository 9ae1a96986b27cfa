use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use cinepaw_core::error::{ApiError, ErrorEnvelope};
use cinepaw_metadata::SearchError;

/// Newtype wrapper so we can implement `IntoResponse` in this crate.
#[derive(Debug)]
pub struct AppError(pub ApiError);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let envelope = ErrorEnvelope::from(&self.0);
        (status, Json(envelope)).into_response()
    }
}

impl From<ApiError> for AppError {
    fn from(e: ApiError) -> Self {
        Self(e)
    }
}

impl From<SearchError> for AppError {
    fn from(e: SearchError) -> Self {
        let message = e.to_string();
        Self(match e {
            SearchError::EmptyQuery | SearchError::InvalidYear(_) => ApiError::BadRequest(message),
            SearchError::NoResults(_) => ApiError::NotFound(message),
            SearchError::Network(_) => ApiError::BadGateway(message),
            // Startup-only: raised by `OmdbClient::new`, on which `main` exits.
            SearchError::Configuration(_) => ApiError::ServiceUnavailable(message),
        })
    }
}
