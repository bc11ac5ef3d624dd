//! Repository access for the domain layer
//!
//! Contains:
//! - `UnitOfWork`: the user, car and booking repositories bound to one
//!   transaction
//! - `RepositoryProvider`: opens units of work

use async_trait::async_trait;

use super::booking::BookingRepository;
use super::car::CarRepository;
use super::user::UserRepository;
use super::DomainResult;

/// One atomic scope over all three stores.
///
/// Writes made through the repositories become visible together on
/// [`commit`](UnitOfWork::commit). [`rollback`](UnitOfWork::rollback) and
/// dropping the unit of work without committing both discard them.
///
/// ```ignore
/// let uow = repos.begin().await?;
/// let mut car = uow.cars().find_by_id(1).await?.ok_or(..)?;
/// car.mark_booked();
/// uow.cars().update(car).await?;
/// uow.commit().await?;
/// ```
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    fn users(&self) -> &dyn UserRepository;
    fn cars(&self) -> &dyn CarRepository;
    fn bookings(&self) -> &dyn BookingRepository;

    async fn commit(self: Box<Self>) -> DomainResult<()>;
    async fn rollback(self: Box<Self>) -> DomainResult<()>;
}

/// Opens units of work against a backing store.
#[async_trait]
pub trait RepositoryProvider: Send + Sync {
    async fn begin(&self) -> DomainResult<Box<dyn UnitOfWork>>;
}
