use chrono::Utc;
use sea_orm::{
    entity::prelude::*, ColumnTrait, ConnectionTrait, Order, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::user;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "subscriptions")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Owning user, fixed at creation time.
    pub user_id: i64,
    pub service_name: String,
    pub notification_enabled: bool,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    User,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::User => Entity::belongs_to(user::Entity)
                .from(Column::UserId)
                .to(user::Column::Id)
                .into(),
        }
    }
}

impl Related<user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Persist a new subscription, timestamped at creation.
///
/// A unique-constraint violation on (user_id, service_name) comes back as
/// `ModelError::Conflict`.
pub async fn insert<C: ConnectionTrait>(
    conn: &C,
    user_id: i64,
    service_name: &str,
    notification_enabled: bool,
) -> Result<Model, ModelError> {
    let am = ActiveModel {
        user_id: Set(user_id),
        service_name: Set(service_name.to_string()),
        notification_enabled: Set(notification_enabled),
        created_at: Set(Utc::now().into()),
        ..Default::default()
    };
    Ok(am.insert(conn).await?)
}

pub async fn find_by_id<C: ConnectionTrait>(conn: &C, id: i64) -> Result<Option<Model>, ModelError> {
    Ok(Entity::find_by_id(id).one(conn).await?)
}

pub async fn exists_by_id<C: ConnectionTrait>(conn: &C, id: i64) -> Result<bool, ModelError> {
    let n = Entity::find_by_id(id).count(conn).await?;
    Ok(n > 0)
}

pub async fn exists_by_user_and_service<C: ConnectionTrait>(
    conn: &C,
    user_id: i64,
    service_name: &str,
) -> Result<bool, ModelError> {
    let n = Entity::find()
        .filter(Column::UserId.eq(user_id))
        .filter(Column::ServiceName.eq(service_name))
        .count(conn)
        .await?;
    Ok(n > 0)
}

pub async fn exists_by_id_and_user<C: ConnectionTrait>(
    conn: &C,
    id: i64,
    user_id: i64,
) -> Result<bool, ModelError> {
    let n = Entity::find()
        .filter(Column::Id.eq(id))
        .filter(Column::UserId.eq(user_id))
        .count(conn)
        .await?;
    Ok(n > 0)
}

pub async fn find_by_user<C: ConnectionTrait>(conn: &C, user_id: i64) -> Result<Vec<Model>, ModelError> {
    Ok(Entity::find().filter(Column::UserId.eq(user_id)).all(conn).await?)
}

pub async fn find_by_service_names<C: ConnectionTrait>(
    conn: &C,
    names: &[String],
) -> Result<Vec<Model>, ModelError> {
    Ok(Entity::find()
        .filter(Column::ServiceName.is_in(names.iter().cloned()))
        .all(conn)
        .await?)
}

/// Distinct service names ordered by descending subscriber count,
/// aggregated store-side.
pub async fn top_service_names<C: ConnectionTrait>(conn: &C) -> Result<Vec<String>, ModelError> {
    let names = Entity::find()
        .select_only()
        .column(Column::ServiceName)
        .group_by(Column::ServiceName)
        .order_by(Column::ServiceName.count(), Order::Desc)
        .into_tuple::<String>()
        .all(conn)
        .await?;
    Ok(names)
}

/// Delete by id; returns true if a row was removed.
pub async fn delete_by_id<C: ConnectionTrait>(conn: &C, id: i64) -> Result<bool, ModelError> {
    let res = Entity::delete_by_id(id).exec(conn).await?;
    Ok(res.rows_affected > 0)
}
