//! User management service: application-layer orchestration
//!
//! HTTP handlers should be thin wrappers that delegate to this service.

use std::sync::Arc;

use tracing::info;

use crate::domain::{
    CreateUserDto, DomainError, DomainResult, EntityKind, NewUser, RepositoryProvider, UnitOfWork,
    UpdateUserDto, User,
};
use crate::infrastructure::crypto::password::hash_password;

use crate::application::services::unit_of_work::{finish, finish_read};

/// User service: orchestrates all user-management use-cases.
pub struct UserService {
    repos: Arc<dyn RepositoryProvider>,
}

impl UserService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    // ── Queries ─────────────────────────────────────────────────

    pub async fn list_users(&self) -> DomainResult<Vec<User>> {
        let uow = self.repos.begin().await?;
        let result = uow.users().find_all().await;
        finish_read(uow, result).await
    }

    /// Get a single user by ID.
    pub async fn get_user(&self, id: i64) -> DomainResult<Option<User>> {
        let uow = self.repos.begin().await?;
        let result = uow.users().find_by_id(id).await;
        finish_read(uow, result).await
    }

    /// Get user by username.
    pub async fn find_by_username(&self, username: &str) -> DomainResult<Option<User>> {
        let uow = self.repos.begin().await?;
        let result = uow.users().find_by_username(username).await;
        finish_read(uow, result).await
    }

    // ── Commands (mutations) ────────────────────────────────────

    /// Register a user. The order counter always starts at zero.
    pub async fn add_user(&self, dto: CreateUserDto) -> DomainResult<User> {
        if dto.password.is_empty() {
            return Err(DomainError::Validation("Password must not be empty".into()));
        }
        let password_hash = hash(&dto.password)?;

        let new_user = NewUser {
            first_name: dto.first_name,
            last_name: dto.last_name,
            username: dto.username,
            phone: dto.phone,
            email: dto.email,
            password_hash,
            no_of_orders: 0,
            role: dto.role.unwrap_or_default(),
        };

        let uow = self.repos.begin().await?;
        let result = Self::add_in(uow.as_ref(), new_user).await;
        let user = finish(uow, result).await?;

        info!(user_id = user.id, username = %user.username, role = %user.role, "New user registered");
        Ok(user)
    }

    async fn add_in(uow: &dyn UnitOfWork, new_user: NewUser) -> DomainResult<User> {
        ensure_unique(uow, None, &new_user.username, &new_user.email).await?;
        uow.users().insert(new_user).await
    }

    /// Update profile fields. The order counter and role are preserved.
    pub async fn update_user(&self, id: i64, dto: UpdateUserDto) -> DomainResult<User> {
        let password_hash = match dto.password.as_deref() {
            Some(password) if !password.is_empty() => Some(hash(password)?),
            _ => None,
        };

        let uow = self.repos.begin().await?;
        let result = Self::update_in(uow.as_ref(), id, dto, password_hash).await;
        let user = finish(uow, result).await?;

        info!(user_id = user.id, "User updated");
        Ok(user)
    }

    async fn update_in(
        uow: &dyn UnitOfWork,
        id: i64,
        dto: UpdateUserDto,
        password_hash: Option<String>,
    ) -> DomainResult<User> {
        let Some(mut user) = uow.users().find_by_id(id).await? else {
            return Err(DomainError::not_found(EntityKind::User, id));
        };
        ensure_unique(uow, Some(id), &dto.username, &dto.email).await?;

        user.first_name = dto.first_name;
        user.last_name = dto.last_name;
        user.username = dto.username;
        user.phone = dto.phone;
        user.email = dto.email;
        if let Some(password_hash) = password_hash {
            user.password_hash = password_hash;
        }

        uow.users().update(user).await
    }

    /// Delete a user by ID.
    pub async fn delete_user(&self, id: i64) -> DomainResult<()> {
        let uow = self.repos.begin().await?;
        let result = Self::delete_in(uow.as_ref(), id).await;
        finish(uow, result).await?;

        info!(user_id = id, "User deleted");
        Ok(())
    }

    async fn delete_in(uow: &dyn UnitOfWork, id: i64) -> DomainResult<()> {
        if !uow.users().exists_by_id(id).await? {
            return Err(DomainError::not_found(EntityKind::User, id));
        }
        uow.users().delete_by_id(id).await
    }
}

// ── Helpers ─────────────────────────────────────────────────────

fn hash(password: &str) -> DomainResult<String> {
    hash_password(password).map_err(hashing_failed)
}

/// A hashing failure is internal, never the caller's input.
fn hashing_failed(e: bcrypt::BcryptError) -> DomainError {
    DomainError::Storage(format!("Failed to hash password: {}", e))
}

/// Username and email must not belong to another user.
async fn ensure_unique(
    uow: &dyn UnitOfWork,
    own_id: Option<i64>,
    username: &str,
    email: &str,
) -> DomainResult<()> {
    let is_other = |user: &User| Some(user.id) != own_id;

    if let Some(existing) = uow.users().find_by_username(username).await? {
        if is_other(&existing) {
            return Err(DomainError::Conflict("Username already exists".into()));
        }
    }
    if let Some(existing) = uow.users().find_by_email(email).await? {
        if is_other(&existing) {
            return Err(DomainError::Conflict("Email already exists".into()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserRole;
    use crate::infrastructure::crypto::password::verify_password;
    use crate::infrastructure::InMemoryRepositoryProvider;

    #[test]
    fn hashing_failure_is_internal() {
        let err = hashing_failed(bcrypt::BcryptError::CostNotAllowed(2));
        assert!(matches!(err, DomainError::Storage(_)));
    }

    fn create_dto(username: &str) -> CreateUserDto {
        CreateUserDto {
            first_name: "Erik".into(),
            last_name: "Lund".into(),
            username: username.into(),
            phone: "0709876543".into(),
            email: format!("{}@example.com", username),
            password: "hunter22".into(),
            role: None,
        }
    }

    fn update_dto(username: &str, password: Option<&str>) -> UpdateUserDto {
        UpdateUserDto {
            first_name: "Erika".into(),
            last_name: "Lund".into(),
            username: username.into(),
            phone: "0700000000".into(),
            email: format!("{}@example.com", username),
            password: password.map(String::from),
        }
    }

    fn service() -> UserService {
        UserService::new(Arc::new(InMemoryRepositoryProvider::new()))
    }

    #[tokio::test]
    async fn add_user_hashes_password_and_defaults_role() {
        let svc = service();
        let user = svc.add_user(create_dto("erik")).await.unwrap();

        assert_eq!(user.no_of_orders, 0);
        assert_eq!(user.role, UserRole::Customer);
        assert_ne!(user.password_hash, "hunter22");
        assert!(verify_password("hunter22", &user.password_hash).unwrap());
        assert_eq!(svc.find_by_username("erik").await.unwrap().unwrap().id, user.id);
    }

    #[tokio::test]
    async fn add_user_keeps_admin_role() {
        let mut dto = create_dto("boss");
        dto.role = Some(UserRole::parse("admin"));
        let user = service().add_user(dto).await.unwrap();
        assert_eq!(user.role, UserRole::Admin);
    }

    #[tokio::test]
    async fn duplicate_username_is_conflict() {
        let svc = service();
        svc.add_user(create_dto("erik")).await.unwrap();

        let mut dto = create_dto("erik");
        dto.email = "other@example.com".into();
        let err = svc.add_user(dto).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
        assert_eq!(svc.list_users().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn update_preserves_counter_and_password_when_blank() {
        let svc = service();
        let user = svc.add_user(create_dto("erik")).await.unwrap();

        let updated = svc
            .update_user(user.id, update_dto("erik", Some("")))
            .await
            .unwrap();

        assert_eq!(updated.first_name, "Erika");
        assert_eq!(updated.no_of_orders, 0);
        assert_eq!(updated.password_hash, user.password_hash);
    }

    #[tokio::test]
    async fn update_rehashes_new_password() {
        let svc = service();
        let user = svc.add_user(create_dto("erik")).await.unwrap();

        let updated = svc
            .update_user(user.id, update_dto("erik", Some("n3w-pass")))
            .await
            .unwrap();

        assert!(verify_password("n3w-pass", &updated.password_hash).unwrap());
    }

    #[tokio::test]
    async fn update_and_delete_missing_user_are_not_found() {
        let svc = service();
        let err = svc.update_user(9, update_dto("x", None)).await.unwrap_err();
        assert!(matches!(
            err,
            DomainError::NotFound { entity: EntityKind::User, id: 9 }
        ));
        assert!(svc.delete_user(9).await.unwrap_err().is_not_found());
    }
}
