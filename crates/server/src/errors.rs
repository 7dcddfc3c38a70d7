use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Local;
use serde::Serialize;
use tracing::{error, warn};

use service::errors::ServiceError;

use crate::validation::{self, FieldError};

/// JSON error body returned for every failed request:
/// `{status, message, timestamp}` with a `yyyy-MM-dd HH:mm:ss` timestamp.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub status: u16,
    pub message: String,
    pub timestamp: String,
}

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

/// Pure mapping from a domain error kind to an HTTP status.
pub fn status_for(err: &ServiceError) -> StatusCode {
    match err {
        ServiceError::UserNotFound(_) | ServiceError::SubscriptionNotFound(_) => StatusCode::NOT_FOUND,
        ServiceError::SubscriptionNotOwned { .. } => StatusCode::FORBIDDEN,
        ServiceError::DuplicateSubscription => StatusCode::CONFLICT,
        ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
        ServiceError::Db(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl ApiError {
    /// Aggregate every failing field into a single 400 response.
    pub fn validation(errors: &[FieldError]) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: validation::format_errors(errors),
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        Self { status: status_for(&e), message: e.to_string() }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(status = %self.status, message = %self.message, "request failed");
        } else {
            warn!(status = %self.status, message = %self.message, "request rejected");
        }
        let body = ErrorBody {
            status: self.status.as_u16(),
            message: self.message,
            timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        };
        (self.status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping_matches_error_taxonomy() {
        assert_eq!(status_for(&ServiceError::UserNotFound(1)), StatusCode::NOT_FOUND);
        assert_eq!(status_for(&ServiceError::SubscriptionNotFound(2)), StatusCode::NOT_FOUND);
        assert_eq!(
            status_for(&ServiceError::SubscriptionNotOwned { user_id: 1, sub_id: 2 }),
            StatusCode::FORBIDDEN
        );
        assert_eq!(status_for(&ServiceError::DuplicateSubscription), StatusCode::CONFLICT);
        assert_eq!(status_for(&ServiceError::Validation("x".into())), StatusCode::BAD_REQUEST);
        assert_eq!(status_for(&ServiceError::Db("boom".into())), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn not_found_message_carries_the_id() {
        let e = ApiError::from(ServiceError::UserNotFound(999));
        assert!(e.message.contains("999"));
        let e = ApiError::from(ServiceError::SubscriptionNotOwned { user_id: 7, sub_id: 42 });
        assert!(e.message.contains('7') && e.message.contains("42"));
    }

    #[test]
    fn duplicate_message_is_fixed() {
        let e = ApiError::from(ServiceError::DuplicateSubscription);
        assert_eq!(e.message, "user is already subscribed to this service");
    }
}
