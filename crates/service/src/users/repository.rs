use async_trait::async_trait;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use super::domain::{User, UserInput};
use crate::errors::StoreError;

/// Persistence gateway for users: the single choke point for store access.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, input: UserInput) -> Result<User, StoreError>;
    async fn list(&self) -> Result<Vec<User>, StoreError>;
    /// `Ok(None)` when no user has this id.
    async fn delete(&self, id: Uuid) -> Result<Option<User>, StoreError>;
}

/// SeaORM-backed repository implementation.
pub struct SeaOrmUserRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmUserRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn create(&self, input: UserInput) -> Result<User, StoreError> {
        let created = models::user::create(&self.db, &input.name, input.age).await?;
        Ok(created.into())
    }

    async fn list(&self) -> Result<Vec<User>, StoreError> {
        let users = models::user::list(&self.db).await?;
        Ok(users.into_iter().map(User::from).collect())
    }

    async fn delete(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let removed = models::user::delete(&self.db, id).await?;
        Ok(removed.map(User::from))
    }
}

/// Stand-in used when the startup connection failed: every call reports the
/// original connection problem.
pub struct UnavailableUserRepository {
    reason: String,
}

impl UnavailableUserRepository {
    pub fn new(reason: impl Into<String>) -> Self { Self { reason: reason.into() } }
}

#[async_trait]
impl UserRepository for UnavailableUserRepository {
    async fn create(&self, _input: UserInput) -> Result<User, StoreError> {
        Err(StoreError::unavailable(self.reason.clone()))
    }

    async fn list(&self) -> Result<Vec<User>, StoreError> {
        Err(StoreError::unavailable(self.reason.clone()))
    }

    async fn delete(&self, _id: Uuid) -> Result<Option<User>, StoreError> {
        Err(StoreError::unavailable(self.reason.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, DbErr, MockDatabase, MockExecResult};

    fn row(name: &str, age: i32) -> models::user::Model {
        models::user::Model { id: Uuid::new_v4(), name: name.into(), age, created_at: Utc::now().into() }
    }

    #[tokio::test]
    async fn seaorm_repository_maps_rows_to_users() -> anyhow::Result<()> {
        let stored = row("Ana", 40);
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![stored.clone()]])
            .append_query_results([vec![stored.clone()]])
            .append_query_results([vec![stored.clone()]])
            .append_exec_results([MockExecResult { last_insert_id: 0, rows_affected: 1 }])
            .into_connection();
        let repo = SeaOrmUserRepository::new(db);

        let created = repo.create(UserInput { name: "Ana".into(), age: 40 }).await?;
        assert_eq!(created.id, stored.id);
        assert_eq!(created.name, "Ana");

        let listed = repo.list().await?;
        assert_eq!(listed, vec![created.clone()]);

        let removed = repo.delete(stored.id).await?;
        assert_eq!(removed, Some(created));
        Ok(())
    }

    #[tokio::test]
    async fn seaorm_repository_surfaces_store_errors() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Custom("duplicate key".into())])
            .into_connection();
        let repo = SeaOrmUserRepository::new(db);

        let err = repo.create(UserInput { name: "Ana".into(), age: 40 }).await.unwrap_err();
        assert!(matches!(err, StoreError::Model(_)));
        assert!(err.to_string().contains("duplicate key"));
    }

    #[tokio::test]
    async fn unavailable_repository_fails_every_call() {
        let repo = UnavailableUserRepository::new("cannot connect to database: refused");
        assert!(matches!(repo.list().await, Err(StoreError::Unavailable(_))));
        assert!(matches!(repo.delete(Uuid::new_v4()).await, Err(StoreError::Unavailable(_))));
        let err = repo.create(UserInput { name: "Ana".into(), age: 40 }).await.unwrap_err();
        assert!(err.to_string().contains("refused"));
    }
}
