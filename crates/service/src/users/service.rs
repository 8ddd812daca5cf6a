use std::sync::Arc;

use tracing::{debug, instrument};
use uuid::Uuid;

use super::domain::{User, UserInput};
use super::repository::UserRepository;
use crate::errors::StoreError;

/// Application service for the user resource, independent of the web layer.
///
/// Holds the repository chosen at startup; cloning shares it.
#[derive(Clone)]
pub struct UserService {
    repo: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(repo: Arc<dyn UserRepository>) -> Self { Self { repo } }

    /// Store a new user and return it with its assigned identifier.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use service::{InMemoryUserRepository, UserInput, UserService};
    /// let svc = UserService::new(Arc::new(InMemoryUserRepository::new()));
    /// let user = tokio_test::block_on(svc.create(UserInput { name: "Ana".into(), age: 40 })).unwrap();
    /// assert_eq!(user.name, "Ana");
    /// ```
    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create(&self, input: UserInput) -> Result<User, StoreError> {
        self.repo.create(input).await
    }

    pub async fn list(&self) -> Result<Vec<User>, StoreError> {
        self.repo.list().await
    }

    /// Delete by the identifier as it appears in a request path.
    ///
    /// Only the canonical hyphenated lowercase form names a user. Any other
    /// text, including other spellings of the same uuid, is reported as
    /// absent rather than as a failure.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<Option<User>, StoreError> {
        let parsed = match Uuid::try_parse(id) {
            Ok(parsed) if parsed.hyphenated().to_string() == id => parsed,
            _ => {
                debug!("identifier is not a canonical uuid; treating as absent");
                return Ok(None);
            }
        };
        self.repo.delete(parsed).await
    }
}
