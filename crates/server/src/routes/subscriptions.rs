use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use service::subscription_service::{self, TopSubscription, DEFAULT_TOP_LIMIT};

use crate::errors::ApiError;
use crate::routes::ServerState;
use crate::validation::{self, FieldError};

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscribeInput {
    pub service_name: String,
    #[serde(default)]
    pub notification_enabled: bool,
}

#[utoipa::path(
    post, path = "/users/{userId}/subscriptions", tag = "subscriptions",
    params(("userId" = i64, Path, description = "User id")),
    request_body = crate::openapi::SubscribeInputDoc,
    responses(
        (status = 200, description = "Subscription created"),
        (status = 400, description = "Validation error"),
        (status = 404, description = "User not found"),
        (status = 409, description = "Already subscribed to this service")
    )
)]
pub async fn subscribe(
    State(state): State<ServerState>,
    Path(user_id): Path<i64>,
    Json(input): Json<SubscribeInput>,
) -> Result<Json<models::subscription::Model>, ApiError> {
    info!(user_id, service_name = %input.service_name, "POST /users/:id/subscriptions");
    let errors: Vec<FieldError> = validation::validate_service_name(&input.service_name)
        .into_iter()
        .collect();
    if !errors.is_empty() {
        return Err(ApiError::validation(&errors));
    }
    let created = subscription_service::subscribe(
        &state.db,
        user_id,
        &input.service_name,
        input.notification_enabled,
    )
    .await?;
    Ok(Json(created))
}

#[utoipa::path(
    get, path = "/users/{userId}/subscriptions", tag = "subscriptions",
    params(("userId" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "The user's subscriptions"),
        (status = 404, description = "User not found")
    )
)]
pub async fn list(
    State(state): State<ServerState>,
    Path(user_id): Path<i64>,
) -> Result<Json<Vec<models::subscription::Model>>, ApiError> {
    info!(user_id, "GET /users/:id/subscriptions");
    let subs = subscription_service::list_subscriptions(&state.db, user_id).await?;
    Ok(Json(subs))
}

#[utoipa::path(
    delete, path = "/users/{userId}/subscriptions/{subId}", tag = "subscriptions",
    params(
        ("userId" = i64, Path, description = "User id"),
        ("subId" = i64, Path, description = "Subscription id")
    ),
    responses(
        (status = 204, description = "Subscription deleted"),
        (status = 403, description = "Subscription belongs to another user"),
        (status = 404, description = "Subscription not found")
    )
)]
pub async fn unsubscribe(
    State(state): State<ServerState>,
    Path((user_id, sub_id)): Path<(i64, i64)>,
) -> Result<StatusCode, ApiError> {
    info!(user_id, sub_id, "DELETE /users/:id/subscriptions/:sub_id");
    subscription_service::unsubscribe(&state.db, user_id, sub_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get, path = "/subscriptions/top", tag = "subscriptions",
    responses((status = 200, description = "Most popular services by subscriber count"))
)]
pub async fn top(State(state): State<ServerState>) -> Result<Json<Vec<TopSubscription>>, ApiError> {
    info!("GET /subscriptions/top");
    let top = subscription_service::top_subscriptions(&state.db, DEFAULT_TOP_LIMIT).await?;
    Ok(Json(top))
}
