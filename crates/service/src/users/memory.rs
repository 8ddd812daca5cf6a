use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::domain::{User, UserInput};
use super::repository::UserRepository;
use crate::errors::StoreError;

/// Process-local user store. Used as a test double and for database-less runs.
#[derive(Clone, Default)]
pub struct InMemoryUserRepository {
    inner: Arc<RwLock<Vec<User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self { Self::default() }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, input: UserInput) -> Result<User, StoreError> {
        let user = User { id: Uuid::new_v4(), name: input.name, age: input.age, created_at: Utc::now() };
        let mut users = self.inner.write().await;
        users.push(user.clone());
        Ok(user)
    }

    async fn list(&self) -> Result<Vec<User>, StoreError> {
        let users = self.inner.read().await;
        Ok(users.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let mut users = self.inner.write().await;
        let removed = users.iter().position(|u| u.id == id).map(|idx| users.remove(idx));
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn input(name: &str, age: i32) -> UserInput {
        UserInput { name: name.into(), age }
    }

    #[tokio::test]
    async fn created_users_are_listed_with_unique_ids() -> anyhow::Result<()> {
        let repo = InMemoryUserRepository::new();
        let mut ids = HashSet::new();
        for (name, age) in [("Jefferson", 32), ("Maria Rayssa", 29), ("Jefferson", 32)] {
            let u = repo.create(input(name, age)).await?;
            assert_eq!((u.name.as_str(), u.age), (name, age));
            assert!(ids.insert(u.id), "identifier reused");
        }

        let listed = repo.list().await?;
        assert_eq!(listed.len(), 3);
        let names: Vec<_> = listed.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, ["Jefferson", "Maria Rayssa", "Jefferson"]);
        Ok(())
    }

    #[tokio::test]
    async fn delete_removes_exactly_one_and_is_idempotent() -> anyhow::Result<()> {
        let repo = InMemoryUserRepository::new();
        let keep = repo.create(input("Jefferson", 32)).await?;
        let gone = repo.create(input("Ana", 40)).await?;

        assert_eq!(repo.delete(gone.id).await?, Some(gone.clone()));
        assert_eq!(repo.delete(gone.id).await?, None);

        let listed = repo.list().await?;
        assert_eq!(listed, vec![keep]);
        Ok(())
    }

    #[tokio::test]
    async fn delete_of_unknown_id_is_none() -> anyhow::Result<()> {
        let repo = InMemoryUserRepository::new();
        assert_eq!(repo.delete(Uuid::new_v4()).await?, None);
        assert!(repo.is_empty().await);
        Ok(())
    }

    #[tokio::test]
    async fn listing_is_a_snapshot() -> anyhow::Result<()> {
        let repo = InMemoryUserRepository::new();
        repo.create(input("Ana", 40)).await?;
        let snapshot = repo.list().await?;
        repo.create(input("Bia", 22)).await?;
        assert_eq!(snapshot.len(), 1);
        assert_eq!(repo.len().await, 2);
        Ok(())
    }
}
