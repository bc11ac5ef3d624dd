use async_trait::async_trait;

use super::{NewUser, User};
use crate::domain::DomainResult;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<User>>;
    async fn exists_by_id(&self, id: i64) -> DomainResult<bool>;
    async fn find_by_username(&self, username: &str) -> DomainResult<Option<User>>;
    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>>;
    async fn find_all(&self) -> DomainResult<Vec<User>>;

    async fn insert(&self, user: NewUser) -> DomainResult<User>;
    /// Overwrite an existing user row; a missing row is `NotFound`
    async fn update(&self, user: User) -> DomainResult<User>;
    async fn delete_by_id(&self, id: i64) -> DomainResult<()>;
}
