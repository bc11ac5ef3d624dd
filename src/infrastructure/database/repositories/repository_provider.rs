//! SeaORM implementation of RepositoryProvider

use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{DatabaseConnection, DatabaseTransaction, TransactionTrait};
use tracing::debug;

use crate::domain::{
    BookingRepository, CarRepository, DomainError, DomainResult, RepositoryProvider, UnitOfWork,
    UserRepository,
};

use super::booking_repository::SeaOrmBookingRepository;
use super::car_repository::SeaOrmCarRepository;
use super::user_repository::SeaOrmUserRepository;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool; every unit of work is one database
/// transaction.
///
/// ```ignore
/// let repos = SeaOrmRepositoryProvider::new(db.clone());
/// let uow = repos.begin().await?;
/// let car = uow.cars().find_by_id(1).await?;
/// uow.commit().await?;
/// ```
#[derive(Clone)]
pub struct SeaOrmRepositoryProvider {
    db: DatabaseConnection,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RepositoryProvider for SeaOrmRepositoryProvider {
    async fn begin(&self) -> DomainResult<Box<dyn UnitOfWork>> {
        let txn = Arc::new(self.db.begin().await?);
        Ok(Box::new(SeaOrmUnitOfWork {
            users: SeaOrmUserRepository::new(txn.clone()),
            cars: SeaOrmCarRepository::new(txn.clone()),
            bookings: SeaOrmBookingRepository::new(txn.clone()),
            txn,
        }))
    }
}

/// Repositories sharing one open transaction.
///
/// Dropping without [`commit`](UnitOfWork::commit) rolls the transaction
/// back (SeaORM rolls back un-finished transactions on drop).
pub struct SeaOrmUnitOfWork {
    users: SeaOrmUserRepository<DatabaseTransaction>,
    cars: SeaOrmCarRepository<DatabaseTransaction>,
    bookings: SeaOrmBookingRepository<DatabaseTransaction>,
    txn: Arc<DatabaseTransaction>,
}

impl SeaOrmUnitOfWork {
    /// Release the repositories' handles and take sole ownership of the
    /// transaction.
    fn into_transaction(self) -> DomainResult<DatabaseTransaction> {
        let Self {
            users,
            cars,
            bookings,
            txn,
        } = self;
        drop((users, cars, bookings));
        Arc::try_unwrap(txn).map_err(|_| {
            DomainError::Storage("transaction is still referenced by a repository".into())
        })
    }
}

#[async_trait]
impl UnitOfWork for SeaOrmUnitOfWork {
    fn users(&self) -> &dyn UserRepository {
        &self.users
    }

    fn cars(&self) -> &dyn CarRepository {
        &self.cars
    }

    fn bookings(&self) -> &dyn BookingRepository {
        &self.bookings
    }

    async fn commit(self: Box<Self>) -> DomainResult<()> {
        self.into_transaction()?.commit().await?;
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> DomainResult<()> {
        debug!("Rolling back database transaction");
        self.into_transaction()?.rollback().await?;
        Ok(())
    }
}
