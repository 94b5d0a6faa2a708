//! Mapping of item errors onto HTTP responses

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use items_core::ItemError;

/// Error returned by every fallible handler
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Item(#[from] ItemError),

    /// Body was not JSON, or did not decode into the request type
    #[error("Invalid request body: {}", .0.body_text())]
    Rejection(#[from] JsonRejection),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Item(ItemError::NotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Item(ItemError::Validation(_)) | ApiError::Rejection(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::debug!(%status, error = %self, "request failed");
        let body = Json(serde_json::json!({ "detail": self.to_string() }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        let err: ApiError = ItemError::NotFound("x".into()).into();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);

        let err: ApiError = ItemError::Validation("name must not be empty".into()).into();
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.to_string(), "Validation error: name must not be empty");
    }
}
