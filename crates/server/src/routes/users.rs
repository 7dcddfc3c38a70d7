use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use service::user_service;

use crate::errors::ApiError;
use crate::routes::ServerState;
use crate::validation::{self, FieldError};

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserInput {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserInput {
    pub name: Option<String>,
    pub email: Option<String>,
}

#[utoipa::path(
    post, path = "/users", tag = "users",
    request_body = crate::openapi::CreateUserInputDoc,
    responses(
        (status = 201, description = "User created"),
        (status = 400, description = "Validation error")
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    Json(input): Json<CreateUserInput>,
) -> Result<(StatusCode, Json<models::user::Model>), ApiError> {
    info!(name = %input.name, "POST /users");
    let mut errors: Vec<FieldError> = Vec::new();
    errors.extend(validation::validate_user_name(&input.name));
    errors.extend(validation::validate_email(&input.email));
    if !errors.is_empty() {
        return Err(ApiError::validation(&errors));
    }
    let created = user_service::create_user(&state.db, &input.name, &input.email).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get, path = "/users/{id}", tag = "users",
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "User found"),
        (status = 404, description = "User not found")
    )
)]
pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> Result<Json<models::user::Model>, ApiError> {
    info!(id, "GET /users/:id");
    let user = user_service::get_user(&state.db, id).await?;
    Ok(Json(user))
}

#[utoipa::path(
    put, path = "/users/{id}", tag = "users",
    params(("id" = i64, Path, description = "User id")),
    request_body = crate::openapi::UpdateUserInputDoc,
    responses(
        (status = 200, description = "User updated"),
        (status = 400, description = "Validation error"),
        (status = 404, description = "User not found")
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(input): Json<UpdateUserInput>,
) -> Result<Json<models::user::Model>, ApiError> {
    info!(id, "PUT /users/:id");
    // only the fields actually supplied are validated and overwritten
    let mut errors: Vec<FieldError> = Vec::new();
    if let Some(name) = &input.name {
        errors.extend(validation::validate_user_name(name));
    }
    if let Some(email) = &input.email {
        errors.extend(validation::validate_email(email));
    }
    if !errors.is_empty() {
        return Err(ApiError::validation(&errors));
    }
    let updated =
        user_service::update_user(&state.db, id, input.name.as_deref(), input.email.as_deref()).await?;
    Ok(Json(updated))
}

#[utoipa::path(
    delete, path = "/users/{id}", tag = "users",
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 404, description = "User not found")
    )
)]
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    info!(id, "DELETE /users/:id");
    user_service::delete_user(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get, path = "/users", tag = "users",
    responses((status = 200, description = "All users"))
)]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<models::user::Model>>, ApiError> {
    info!("GET /users");
    let users = user_service::list_users(&state.db).await?;
    Ok(Json(users))
}
