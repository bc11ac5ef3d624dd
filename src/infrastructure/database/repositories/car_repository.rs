//! SeaORM implementation of CarRepository

use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, ConnectionTrait, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use tracing::debug;

use crate::domain::{Car, CarRepository, DomainError, DomainResult, EntityKind, NewCar};
use crate::infrastructure::database::entities::car;

pub struct SeaOrmCarRepository<C> {
    conn: Arc<C>,
}

impl<C> SeaOrmCarRepository<C> {
    pub fn new(conn: Arc<C>) -> Self {
        Self { conn }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(m: car::Model) -> Car {
    Car {
        id: m.id,
        name: m.name,
        model: m.model,
        feature1: m.feature1,
        feature2: m.feature2,
        feature3: m.feature3,
        car_type: m.car_type,
        price: m.price,
        booked: m.booked,
        version: m.version,
    }
}

// ── CarRepository impl ──────────────────────────────────────────

#[async_trait]
impl<C> CarRepository for SeaOrmCarRepository<C>
where
    C: ConnectionTrait + Send + Sync + 'static,
{
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Car>> {
        let model = car::Entity::find_by_id(id).one(&*self.conn).await?;
        Ok(model.map(model_to_domain))
    }

    async fn exists_by_id(&self, id: i64) -> DomainResult<bool> {
        let count = car::Entity::find()
            .filter(car::Column::Id.eq(id))
            .count(&*self.conn)
            .await?;
        Ok(count > 0)
    }

    async fn find_all(&self) -> DomainResult<Vec<Car>> {
        let models = car::Entity::find()
            .order_by_asc(car::Column::Id)
            .all(&*self.conn)
            .await?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn insert(&self, c: NewCar) -> DomainResult<Car> {
        debug!("Inserting car: {} {}", c.name, c.model);

        let model = car::ActiveModel {
            id: NotSet,
            name: Set(c.name),
            model: Set(c.model),
            feature1: Set(c.feature1),
            feature2: Set(c.feature2),
            feature3: Set(c.feature3),
            car_type: Set(c.car_type),
            price: Set(c.price),
            booked: Set(c.booked),
            version: Set(0),
        };
        let inserted = model.insert(&*self.conn).await?;
        Ok(model_to_domain(inserted))
    }

    async fn update(&self, c: Car) -> DomainResult<Car> {
        debug!("Updating car {} at version {}", c.id, c.version);

        let next_version = c.version + 1;
        let changes = car::ActiveModel {
            id: NotSet,
            name: Set(c.name.clone()),
            model: Set(c.model.clone()),
            feature1: Set(c.feature1.clone()),
            feature2: Set(c.feature2.clone()),
            feature3: Set(c.feature3.clone()),
            car_type: Set(c.car_type.clone()),
            price: Set(c.price),
            booked: Set(c.booked),
            version: Set(next_version),
        };

        // Compare-and-swap on the version column
        let result = car::Entity::update_many()
            .set(changes)
            .filter(car::Column::Id.eq(c.id))
            .filter(car::Column::Version.eq(c.version))
            .exec(&*self.conn)
            .await?;

        if result.rows_affected == 0 {
            let current = car::Entity::find_by_id(c.id).one(&*self.conn).await?;
            return Err(match current {
                None => DomainError::not_found(EntityKind::Car, c.id),
                Some(current) => DomainError::Conflict(format!(
                    "Car {} was modified concurrently (expected version {}, found {})",
                    c.id, c.version, current.version
                )),
            });
        }

        Ok(Car {
            version: next_version,
            ..c
        })
    }

    async fn delete_by_id(&self, id: i64) -> DomainResult<()> {
        car::Entity::delete_by_id(id).exec(&*self.conn).await?;
        Ok(())
    }
}
