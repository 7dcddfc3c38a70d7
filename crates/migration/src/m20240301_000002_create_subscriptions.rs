//! Create `subscriptions` table with FK to `users`.
//!
//! Deleting a user cascades to their subscriptions.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Subscriptions::Table)
                    .if_not_exists()
                    .col(big_integer(Subscriptions::Id).primary_key().auto_increment())
                    .col(big_integer(Subscriptions::UserId).not_null())
                    .col(string_len(Subscriptions::ServiceName, 100).not_null())
                    .col(boolean(Subscriptions::NotificationEnabled).not_null())
                    .col(timestamp_with_time_zone(Subscriptions::CreatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_subscriptions_user")
                            .from(Subscriptions::Table, Subscriptions::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Subscriptions::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Subscriptions { Table, Id, UserId, ServiceName, NotificationEnabled, CreatedAt }

#[derive(DeriveIden)]
enum Users { Table, Id }
