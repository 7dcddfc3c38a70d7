use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Subscriptions: one subscription per (user, service). Concurrent
        // duplicate inserts lose here and surface as a unique violation.
        manager
            .create_index(
                Index::create()
                    .name("uniq_subscription_user_service")
                    .table(Subscriptions::Table)
                    .col(Subscriptions::UserId)
                    .col(Subscriptions::ServiceName)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Subscriptions: index on service_name for the grouped top-N query
        manager
            .create_index(
                Index::create()
                    .name("idx_subscription_service_name")
                    .table(Subscriptions::Table)
                    .col(Subscriptions::ServiceName)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("uniq_subscription_user_service")
                    .table(Subscriptions::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_subscription_service_name")
                    .table(Subscriptions::Table)
                    .to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
enum Subscriptions { Table, UserId, ServiceName }
