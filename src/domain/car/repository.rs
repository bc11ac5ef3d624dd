//! Car repository interface

use async_trait::async_trait;

use super::model::{Car, NewCar};
use crate::domain::DomainResult;

#[async_trait]
pub trait CarRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Car>>;

    async fn exists_by_id(&self, id: i64) -> DomainResult<bool>;

    async fn find_all(&self) -> DomainResult<Vec<Car>>;

    /// Insert a new car at version 0
    async fn insert(&self, car: NewCar) -> DomainResult<Car>;

    /// Persist `car` if the stored version still equals `car.version`.
    ///
    /// Returns the car with its bumped version. A stale version fails with
    /// `DomainError::Conflict`, a missing row with `DomainError::NotFound`.
    async fn update(&self, car: Car) -> DomainResult<Car>;

    async fn delete_by_id(&self, id: i64) -> DomainResult<()>;
}
