use utoipa::{OpenApi, ToSchema};

#[derive(ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(ToSchema)]
pub struct UserDoc {
    pub id: i64,
    pub name: String,
    pub email: String,
}

#[derive(ToSchema)]
pub struct SubscriptionDoc {
    pub id: i64,
    pub user_id: i64,
    pub service_name: String,
    pub notification_enabled: bool,
    pub created_at: String,
}

#[derive(ToSchema)]
pub struct TopSubscriptionDoc {
    pub service_name: String,
    pub count: u64,
}

#[derive(ToSchema)]
pub struct CreateUserInputDoc {
    pub name: String,
    pub email: String,
}

#[derive(ToSchema)]
pub struct UpdateUserInputDoc {
    pub name: Option<String>,
    pub email: Option<String>,
}

#[derive(ToSchema)]
pub struct SubscribeInputDoc {
    pub service_name: String,
    pub notification_enabled: bool,
}

#[derive(ToSchema)]
pub struct ErrorBodyDoc {
    pub status: u16,
    pub message: String,
    pub timestamp: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::users::create,
        crate::routes::users::get,
        crate::routes::users::update,
        crate::routes::users::delete,
        crate::routes::users::list,
        crate::routes::subscriptions::subscribe,
        crate::routes::subscriptions::list,
        crate::routes::subscriptions::unsubscribe,
        crate::routes::subscriptions::top,
    ),
    components(
        schemas(
            HealthResponse,
            UserDoc,
            SubscriptionDoc,
            TopSubscriptionDoc,
            CreateUserInputDoc,
            UpdateUserInputDoc,
            SubscribeInputDoc,
            ErrorBodyDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "users"),
        (name = "subscriptions")
    )
)]
pub struct ApiDoc;
