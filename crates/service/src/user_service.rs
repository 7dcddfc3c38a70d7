use sea_orm::{ActiveModelTrait, ConnectionTrait, DatabaseConnection, Set};
use tracing::{info, warn};

use models::user;

use crate::errors::ServiceError;

/// Create a new user; the store assigns the id.
pub async fn create_user(db: &DatabaseConnection, name: &str, email: &str) -> Result<user::Model, ServiceError> {
    let created = user::insert(db, name, email).await?;
    info!(id = created.id, "user created");
    Ok(created)
}

/// Get a user by id.
pub async fn get_user(db: &DatabaseConnection, id: i64) -> Result<user::Model, ServiceError> {
    resolve_user(db, id).await
}

/// Look up a user, translating absence into `UserNotFound`.
///
/// The single source of truth for "does this user exist"; generic over the
/// connection so the subscription service can call it inside a transaction.
pub async fn resolve_user<C: ConnectionTrait>(conn: &C, id: i64) -> Result<user::Model, ServiceError> {
    user::find_by_id(conn, id)
        .await?
        .ok_or(ServiceError::UserNotFound(id))
}

/// Partial update: only the supplied fields overwrite existing ones.
pub async fn update_user(
    db: &DatabaseConnection,
    id: i64,
    name: Option<&str>,
    email: Option<&str>,
) -> Result<user::Model, ServiceError> {
    let existing = match resolve_user(db, id).await {
        Ok(u) => u,
        Err(e) => {
            warn!(id, "update of missing user");
            return Err(e);
        }
    };
    if name.is_none() && email.is_none() {
        return Ok(existing);
    }
    let mut am: user::ActiveModel = existing.into();
    if let Some(n) = name {
        am.name = Set(n.to_string());
    }
    if let Some(e) = email {
        am.email = Set(e.to_string());
    }
    let updated = am.update(db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
    info!(id, "user updated");
    Ok(updated)
}

/// Delete a user by id; fails with `UserNotFound` if absent. Dependent
/// subscriptions go with it (FK cascade).
pub async fn delete_user(db: &DatabaseConnection, id: i64) -> Result<(), ServiceError> {
    if !user::exists_by_id(db, id).await? {
        warn!(id, "delete of missing user");
        return Err(ServiceError::UserNotFound(id));
    }
    user::delete_by_id(db, id).await?;
    info!(id, "user deleted");
    Ok(())
}

/// List all users, store order.
pub async fn list_users(db: &DatabaseConnection) -> Result<Vec<user::Model>, ServiceError> {
    let users = user::find_all(db).await?;
    info!(count = users.len(), "listed users");
    Ok(users)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;
    use uuid::Uuid;

    #[tokio::test]
    async fn user_crud_service() -> Result<(), anyhow::Error> {
        if std::env::var("SKIP_DB_TESTS").is_ok() {
            return Ok(());
        }
        let db = match get_db().await {
            Ok(db) => db,
            Err(e) => {
                eprintln!("skip: cannot connect to db: {}", e);
                return Ok(());
            }
        };

        let email = format!("svc_{}@example.com", Uuid::new_v4());
        let u = create_user(&db, "Svc User", &email).await?;
        assert!(u.id > 0);
        assert_eq!(u.email, email);

        let found = get_user(&db, u.id).await?;
        assert_eq!(found.id, u.id);

        // merge semantics: only the supplied field changes
        let updated = update_user(&db, u.id, Some("New Name"), None).await?;
        assert_eq!(updated.name, "New Name");
        assert_eq!(updated.email, email);

        let listed = list_users(&db).await?;
        assert!(listed.iter().any(|x| x.id == u.id));

        delete_user(&db, u.id).await?;
        let after = get_user(&db, u.id).await;
        assert!(matches!(after, Err(ServiceError::UserNotFound(id)) if id == u.id));
        Ok(())
    }

    #[tokio::test]
    async fn missing_user_operations_fail_with_not_found() -> Result<(), anyhow::Error> {
        if std::env::var("SKIP_DB_TESTS").is_ok() {
            return Ok(());
        }
        let db = match get_db().await {
            Ok(db) => db,
            Err(e) => {
                eprintln!("skip: cannot connect to db: {}", e);
                return Ok(());
            }
        };

        let missing = i64::MAX - 7;
        assert!(matches!(get_user(&db, missing).await, Err(ServiceError::UserNotFound(_))));
        assert!(matches!(
            update_user(&db, missing, Some("X"), None).await,
            Err(ServiceError::UserNotFound(_))
        ));
        assert!(matches!(delete_user(&db, missing).await, Err(ServiceError::UserNotFound(_))));
        Ok(())
    }
}
