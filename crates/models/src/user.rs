use sea_orm::{entity::prelude::*, ConnectionTrait, PaginatorTrait, Set};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::subscription;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub email: String,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Subscriptions,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Subscriptions => Entity::has_many(subscription::Entity).into(),
        }
    }
}

impl Related<subscription::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Subscriptions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Persist a new user; the store assigns the id.
pub async fn insert<C: ConnectionTrait>(conn: &C, name: &str, email: &str) -> Result<Model, ModelError> {
    let am = ActiveModel {
        name: Set(name.to_string()),
        email: Set(email.to_string()),
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

pub async fn find_all<C: ConnectionTrait>(conn: &C) -> Result<Vec<Model>, ModelError> {
    Ok(Entity::find().all(conn).await?)
}

/// Delete by id; returns true if a row was removed.
pub async fn delete_by_id<C: ConnectionTrait>(conn: &C, id: i64) -> Result<bool, ModelError> {
    let res = Entity::delete_by_id(id).exec(conn).await?;
    Ok(res.rows_affected > 0)
}
