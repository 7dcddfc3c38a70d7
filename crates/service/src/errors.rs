use models::errors::ModelError;
use thiserror::Error;

/// Domain failures. Services never catch these; they propagate unchanged
/// to the API boundary, which owns the status mapping.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("user with id {0} not found")]
    UserNotFound(i64),
    #[error("subscription with id {0} not found")]
    SubscriptionNotFound(i64),
    #[error("subscription {sub_id} does not belong to user {user_id}")]
    SubscriptionNotOwned { user_id: i64, sub_id: i64 },
    /// Fixed user-facing message, independent of the store's error detail.
    #[error("user is already subscribed to this service")]
    DuplicateSubscription,
    #[error("validation error: {0}")]
    Validation(String),
    #[error("database error: {0}")]
    Db(String),
}

impl From<ModelError> for ServiceError {
    fn from(e: ModelError) -> Self {
        match e {
            // The only unique constraint in the schema is
            // (user_id, service_name) on subscriptions.
            ModelError::Conflict(_) => ServiceError::DuplicateSubscription,
            ModelError::Db(msg) => ServiceError::Db(msg),
        }
    }
}
