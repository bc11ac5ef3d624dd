//! SeaORM implementation of UserRepository

use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, ConnectionTrait, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use tracing::debug;

use crate::domain::{DomainError, DomainResult, EntityKind, NewUser, User, UserRepository, UserRole};
use crate::infrastructure::database::entities::user;

/// User repository over any SeaORM connection (pool or open transaction).
pub struct SeaOrmUserRepository<C> {
    conn: Arc<C>,
}

impl<C> SeaOrmUserRepository<C> {
    pub fn new(conn: Arc<C>) -> Self {
        Self { conn }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn entity_role_to_domain(role: user::UserRole) -> UserRole {
    match role {
        user::UserRole::Admin => UserRole::Admin,
        user::UserRole::User => UserRole::Customer,
    }
}

fn domain_role_to_entity(role: UserRole) -> user::UserRole {
    match role {
        UserRole::Admin => user::UserRole::Admin,
        UserRole::Customer => user::UserRole::User,
    }
}

fn model_to_domain(m: user::Model) -> User {
    User {
        id: m.id,
        first_name: m.first_name,
        last_name: m.last_name,
        username: m.username,
        phone: m.phone,
        email: m.email,
        password_hash: m.password_hash,
        no_of_orders: m.no_of_orders,
        role: entity_role_to_domain(m.role),
    }
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl<C> UserRepository for SeaOrmUserRepository<C>
where
    C: ConnectionTrait + Send + Sync + 'static,
{
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<User>> {
        let model = user::Entity::find_by_id(id).one(&*self.conn).await?;
        Ok(model.map(model_to_domain))
    }

    async fn exists_by_id(&self, id: i64) -> DomainResult<bool> {
        let count = user::Entity::find()
            .filter(user::Column::Id.eq(id))
            .count(&*self.conn)
            .await?;
        Ok(count > 0)
    }

    async fn find_by_username(&self, username: &str) -> DomainResult<Option<User>> {
        let model = user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .one(&*self.conn)
            .await?;
        Ok(model.map(model_to_domain))
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        let model = user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .one(&*self.conn)
            .await?;
        Ok(model.map(model_to_domain))
    }

    async fn find_all(&self) -> DomainResult<Vec<User>> {
        let models = user::Entity::find()
            .order_by_asc(user::Column::Id)
            .all(&*self.conn)
            .await?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn insert(&self, u: NewUser) -> DomainResult<User> {
        debug!("Inserting user: {}", u.username);

        let model = user::ActiveModel {
            id: NotSet,
            first_name: Set(u.first_name),
            last_name: Set(u.last_name),
            username: Set(u.username),
            phone: Set(u.phone),
            email: Set(u.email),
            password_hash: Set(u.password_hash),
            no_of_orders: Set(u.no_of_orders),
            role: Set(domain_role_to_entity(u.role)),
        };
        let inserted = model.insert(&*self.conn).await?;
        Ok(model_to_domain(inserted))
    }

    async fn update(&self, u: User) -> DomainResult<User> {
        debug!("Updating user: {}", u.id);

        let existing = user::Entity::find_by_id(u.id).one(&*self.conn).await?;
        if existing.is_none() {
            return Err(DomainError::not_found(EntityKind::User, u.id));
        }

        let model = user::ActiveModel {
            id: Set(u.id),
            first_name: Set(u.first_name),
            last_name: Set(u.last_name),
            username: Set(u.username),
            phone: Set(u.phone),
            email: Set(u.email),
            password_hash: Set(u.password_hash),
            no_of_orders: Set(u.no_of_orders),
            role: Set(domain_role_to_entity(u.role)),
        };
        let updated = model.update(&*self.conn).await?;
        Ok(model_to_domain(updated))
    }

    async fn delete_by_id(&self, id: i64) -> DomainResult<()> {
        user::Entity::delete_by_id(id).exec(&*self.conn).await?;
        Ok(())
    }
}
