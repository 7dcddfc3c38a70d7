use std::collections::HashMap;

use sea_orm::{DatabaseConnection, TransactionTrait};
use serde::Serialize;
use tracing::{info, warn};

use models::subscription;

use crate::errors::ServiceError;
use crate::user_service;

/// Number of entries returned by the top-subscriptions aggregate.
pub const DEFAULT_TOP_LIMIT: usize = 3;

/// One entry of the top-subscriptions aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopSubscription {
    pub service_name: String,
    pub count: u64,
}

/// Subscribe a user to a service.
///
/// Resolves the user, rejects a duplicate (user, service) pair, then
/// persists a timestamped subscription. Runs as one transaction; the
/// unique index on (user_id, service_name) resolves the
/// check-then-insert race, and a losing insert also surfaces as
/// `DuplicateSubscription`.
pub async fn subscribe(
    db: &DatabaseConnection,
    user_id: i64,
    service_name: &str,
    notification_enabled: bool,
) -> Result<subscription::Model, ServiceError> {
    info!(user_id, service_name, "subscribe requested");
    let txn = db.begin().await.map_err(|e| ServiceError::Db(e.to_string()))?;

    user_service::resolve_user(&txn, user_id).await?;

    if subscription::exists_by_user_and_service(&txn, user_id, service_name).await? {
        warn!(user_id, service_name, "duplicate subscription rejected");
        return Err(ServiceError::DuplicateSubscription);
    }

    let created = subscription::insert(&txn, user_id, service_name, notification_enabled).await?;
    txn.commit().await.map_err(|e| ServiceError::Db(e.to_string()))?;

    info!(id = created.id, user_id, "subscription created");
    Ok(created)
}

/// List a user's subscriptions; fails with `UserNotFound` if the user is absent.
pub async fn list_subscriptions(
    db: &DatabaseConnection,
    user_id: i64,
) -> Result<Vec<subscription::Model>, ServiceError> {
    user_service::resolve_user(db, user_id).await?;
    let subs = subscription::find_by_user(db, user_id).await?;
    info!(user_id, count = subs.len(), "listed subscriptions");
    Ok(subs)
}

/// Remove a subscription on behalf of a user.
///
/// Existence is checked before ownership: an id absent everywhere is
/// `SubscriptionNotFound`, an id owned by someone else is
/// `SubscriptionNotOwned`. Runs as one transaction.
pub async fn unsubscribe(db: &DatabaseConnection, user_id: i64, sub_id: i64) -> Result<(), ServiceError> {
    info!(user_id, sub_id, "unsubscribe requested");
    let txn = db.begin().await.map_err(|e| ServiceError::Db(e.to_string()))?;

    if !subscription::exists_by_id(&txn, sub_id).await? {
        warn!(sub_id, "subscription does not exist");
        return Err(ServiceError::SubscriptionNotFound(sub_id));
    }
    if !subscription::exists_by_id_and_user(&txn, sub_id, user_id).await? {
        warn!(user_id, sub_id, "subscription owned by another user");
        return Err(ServiceError::SubscriptionNotOwned { user_id, sub_id });
    }

    subscription::delete_by_id(&txn, sub_id).await?;
    txn.commit().await.map_err(|e| ServiceError::Db(e.to_string()))?;

    info!(user_id, sub_id, "subscription deleted");
    Ok(())
}

/// The `limit` most popular services by subscriber count.
///
/// Two passes: a store-side grouped query ranks the names cheaply, then
/// only rows belonging to the winning names are loaded and re-aggregated
/// client-side. Ties are broken by service name ascending so the result
/// is deterministic.
pub async fn top_subscriptions(
    db: &DatabaseConnection,
    limit: usize,
) -> Result<Vec<TopSubscription>, ServiceError> {
    let names: Vec<String> = subscription::top_service_names(db)
        .await?
        .into_iter()
        .take(limit)
        .collect();

    let rows = subscription::find_by_service_names(db, &names).await?;
    Ok(rank_by_count(rows.into_iter().map(|s| s.service_name)))
}

fn rank_by_count(names: impl IntoIterator<Item = String>) -> Vec<TopSubscription> {
    let mut counts: HashMap<String, u64> = HashMap::new();
    for name in names {
        *counts.entry(name).or_insert(0) += 1;
    }
    let mut ranked: Vec<TopSubscription> = counts
        .into_iter()
        .map(|(service_name, count)| TopSubscription { service_name, count })
        .collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.service_name.cmp(&b.service_name)));
    ranked
}
