// ABOUTME: Shared API error response types and status mapping
// ABOUTME: Translates storage errors into HTTP statuses with message bodies

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json as ResponseJson},
};
use serde::Serialize;

use stockroom_storage::StorageError;

/// Error body returned for every failed request
#[derive(Serialize)]
pub struct ErrorBody {
    pub message: String,
}

/// Wrapper that carries a storage error out of a handler. Handlers
/// return `Result<_, ApiError>` and use `?` on storage calls.
pub struct ApiError(pub StorageError);

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = if self.0.is_not_found() {
            StatusCode::NOT_FOUND
        } else if self.0.is_conflict() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };

        let body = ErrorBody {
            message: self.0.to_string(),
        };

        (status, ResponseJson(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let resp = ApiError(StorageError::TagNotFound(1)).into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let resp = ApiError(StorageError::DuplicateTagName {
            store_id: 1,
            name: "fragile".to_string(),
        })
        .into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let resp = ApiError(StorageError::TagInUse {
            tag_id: 1,
            links: 2,
        })
        .into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let resp = ApiError(StorageError::Database("boom".to_string())).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
