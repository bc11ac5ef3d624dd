//! SeaORM implementation of BookingRepository

use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use tracing::debug;

use crate::domain::{Booking, BookingDraft, BookingRepository, DomainError, DomainResult, EntityKind};
use crate::infrastructure::database::entities::booking;

pub struct SeaOrmBookingRepository<C> {
    conn: Arc<C>,
}

impl<C> SeaOrmBookingRepository<C> {
    pub fn new(conn: Arc<C>) -> Self {
        Self { conn }
    }
}

fn model_to_domain(m: booking::Model) -> Booking {
    Booking {
        id: m.id,
        from_date: m.from_date,
        to_date: m.to_date,
        user_id: m.user_id,
        car_id: m.car_id,
        active: m.active,
    }
}

#[async_trait]
impl<C> BookingRepository for SeaOrmBookingRepository<C>
where
    C: ConnectionTrait + Send + Sync + 'static,
{
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Booking>> {
        let model = booking::Entity::find_by_id(id).one(&*self.conn).await?;
        Ok(model.map(model_to_domain))
    }

    async fn insert(&self, b: BookingDraft) -> DomainResult<Booking> {
        debug!("Inserting booking for user {} car {}", b.user_id, b.car_id);

        let model = booking::ActiveModel {
            id: NotSet,
            from_date: Set(b.from_date),
            to_date: Set(b.to_date),
            user_id: Set(b.user_id),
            car_id: Set(b.car_id),
            active: Set(b.active),
        };
        let inserted = model.insert(&*self.conn).await?;
        Ok(model_to_domain(inserted))
    }

    async fn update(&self, b: Booking) -> DomainResult<Booking> {
        debug!("Updating booking: {}", b.id);

        let existing = booking::Entity::find_by_id(b.id).one(&*self.conn).await?;
        if existing.is_none() {
            return Err(DomainError::not_found(EntityKind::Booking, b.id));
        }

        let model = booking::ActiveModel {
            id: Set(b.id),
            from_date: Set(b.from_date),
            to_date: Set(b.to_date),
            user_id: Set(b.user_id),
            car_id: Set(b.car_id),
            active: Set(b.active),
        };
        let updated = model.update(&*self.conn).await?;
        Ok(model_to_domain(updated))
    }

    async fn delete_by_id(&self, id: i64) -> DomainResult<()> {
        booking::Entity::delete_by_id(id).exec(&*self.conn).await?;
        Ok(())
    }

    async fn find_all(&self) -> DomainResult<Vec<Booking>> {
        let models = booking::Entity::find()
            .order_by_asc(booking::Column::Id)
            .all(&*self.conn)
            .await?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn find_all_by_user_id(&self, user_id: i64) -> DomainResult<Vec<Booking>> {
        let models = booking::Entity::find()
            .filter(booking::Column::UserId.eq(user_id))
            .order_by_asc(booking::Column::Id)
            .all(&*self.conn)
            .await?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn find_by_active(&self, active: bool) -> DomainResult<Vec<Booking>> {
        let models = booking::Entity::find()
            .filter(booking::Column::Active.eq(active))
            .order_by_asc(booking::Column::Id)
            .all(&*self.conn)
            .await?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }
}
