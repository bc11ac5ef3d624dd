//! In-memory storage implementation
//!
//! Units of work are serialized: `begin` takes an exclusive lock on the
//! tables and works on a staged copy, which replaces the tables on commit.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use tokio::sync::OwnedMutexGuard;
use tracing::debug;

use crate::domain::{
    Booking, BookingDraft, BookingRepository, Car, CarRepository, DomainError, DomainResult,
    EntityKind, NewCar, NewUser, RepositoryProvider, UnitOfWork, User, UserRepository,
};

#[derive(Debug, Clone, Default)]
struct Tables {
    users: BTreeMap<i64, User>,
    cars: BTreeMap<i64, Car>,
    bookings: BTreeMap<i64, Booking>,
    last_user_id: i64,
    last_car_id: i64,
    last_booking_id: i64,
}

/// In-memory storage for development and testing
#[derive(Clone, Default)]
pub struct InMemoryRepositoryProvider {
    tables: Arc<tokio::sync::Mutex<Tables>>,
}

impl InMemoryRepositoryProvider {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RepositoryProvider for InMemoryRepositoryProvider {
    async fn begin(&self) -> DomainResult<Box<dyn UnitOfWork>> {
        let committed = self.tables.clone().lock_owned().await;
        let staged = Mutex::new(committed.clone());
        Ok(Box::new(InMemoryUnitOfWork { committed, staged }))
    }
}

/// Exclusive access to the tables for the lifetime of one unit of work.
pub struct InMemoryUnitOfWork {
    committed: OwnedMutexGuard<Tables>,
    staged: Mutex<Tables>,
}

impl InMemoryUnitOfWork {
    fn staged(&self) -> MutexGuard<'_, Tables> {
        // A panic while holding the lock leaves the staged copy unusable
        // only for this unit of work, which is never committed afterwards.
        self.staged.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl UnitOfWork for InMemoryUnitOfWork {
    fn users(&self) -> &dyn UserRepository {
        self
    }

    fn cars(&self) -> &dyn CarRepository {
        self
    }

    fn bookings(&self) -> &dyn BookingRepository {
        self
    }

    async fn commit(self: Box<Self>) -> DomainResult<()> {
        let Self {
            mut committed,
            staged,
        } = *self;
        *committed = staged
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> DomainResult<()> {
        debug!("Discarding staged in-memory changes");
        Ok(())
    }
}

// ── UserRepository ──────────────────────────────────────────────

#[async_trait]
impl UserRepository for InMemoryUnitOfWork {
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<User>> {
        Ok(self.staged().users.get(&id).cloned())
    }

    async fn exists_by_id(&self, id: i64) -> DomainResult<bool> {
        Ok(self.staged().users.contains_key(&id))
    }

    async fn find_by_username(&self, username: &str) -> DomainResult<Option<User>> {
        Ok(self
            .staged()
            .users
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        Ok(self
            .staged()
            .users
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn find_all(&self) -> DomainResult<Vec<User>> {
        Ok(self.staged().users.values().cloned().collect())
    }

    async fn insert(&self, user: NewUser) -> DomainResult<User> {
        let mut tables = self.staged();
        tables.last_user_id += 1;
        let user = User {
            id: tables.last_user_id,
            first_name: user.first_name,
            last_name: user.last_name,
            username: user.username,
            phone: user.phone,
            email: user.email,
            password_hash: user.password_hash,
            no_of_orders: user.no_of_orders,
            role: user.role,
        };
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update(&self, user: User) -> DomainResult<User> {
        let mut tables = self.staged();
        let Some(slot) = tables.users.get_mut(&user.id) else {
            return Err(DomainError::not_found(EntityKind::User, user.id));
        };
        *slot = user.clone();
        Ok(user)
    }

    async fn delete_by_id(&self, id: i64) -> DomainResult<()> {
        self.staged().users.remove(&id);
        Ok(())
    }
}

// ── CarRepository ───────────────────────────────────────────────

#[async_trait]
impl CarRepository for InMemoryUnitOfWork {
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Car>> {
        Ok(self.staged().cars.get(&id).cloned())
    }

    async fn exists_by_id(&self, id: i64) -> DomainResult<bool> {
        Ok(self.staged().cars.contains_key(&id))
    }

    async fn find_all(&self) -> DomainResult<Vec<Car>> {
        Ok(self.staged().cars.values().cloned().collect())
    }

    async fn insert(&self, car: NewCar) -> DomainResult<Car> {
        let mut tables = self.staged();
        tables.last_car_id += 1;
        let car = Car {
            id: tables.last_car_id,
            name: car.name,
            model: car.model,
            feature1: car.feature1,
            feature2: car.feature2,
            feature3: car.feature3,
            car_type: car.car_type,
            price: car.price,
            booked: car.booked,
            version: 0,
        };
        tables.cars.insert(car.id, car.clone());
        Ok(car)
    }

    async fn update(&self, mut car: Car) -> DomainResult<Car> {
        let mut tables = self.staged();
        let Some(slot) = tables.cars.get_mut(&car.id) else {
            return Err(DomainError::not_found(EntityKind::Car, car.id));
        };
        if slot.version != car.version {
            return Err(DomainError::Conflict(format!(
                "Car {} was modified concurrently (expected version {}, found {})",
                car.id, car.version, slot.version
            )));
        }
        car.version += 1;
        *slot = car.clone();
        Ok(car)
    }

    async fn delete_by_id(&self, id: i64) -> DomainResult<()> {
        self.staged().cars.remove(&id);
        Ok(())
    }
}

// ── BookingRepository ───────────────────────────────────────────

#[async_trait]
impl BookingRepository for InMemoryUnitOfWork {
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Booking>> {
        Ok(self.staged().bookings.get(&id).cloned())
    }

    async fn insert(&self, draft: BookingDraft) -> DomainResult<Booking> {
        let mut tables = self.staged();
        tables.last_booking_id += 1;
        let booking = draft.with_id(tables.last_booking_id);
        tables.bookings.insert(booking.id, booking.clone());
        Ok(booking)
    }

    async fn update(&self, booking: Booking) -> DomainResult<Booking> {
        let mut tables = self.staged();
        let Some(slot) = tables.bookings.get_mut(&booking.id) else {
            return Err(DomainError::not_found(EntityKind::Booking, booking.id));
        };
        *slot = booking.clone();
        Ok(booking)
    }

    async fn delete_by_id(&self, id: i64) -> DomainResult<()> {
        self.staged().bookings.remove(&id);
        Ok(())
    }

    async fn find_all(&self) -> DomainResult<Vec<Booking>> {
        Ok(self.staged().bookings.values().cloned().collect())
    }

    async fn find_all_by_user_id(&self, user_id: i64) -> DomainResult<Vec<Booking>> {
        Ok(self
            .staged()
            .bookings
            .values()
            .filter(|b| b.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn find_by_active(&self, active: bool) -> DomainResult<Vec<Booking>> {
        Ok(self
            .staged()
            .bookings
            .values()
            .filter(|b| b.active == active)
            .cloned()
            .collect())
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CarDetails;

    fn new_car() -> NewCar {
        CarDetails {
            name: "Volvo".into(),
            model: "V70".into(),
            feature1: None,
            feature2: None,
            feature3: None,
            car_type: "Estate".into(),
            price: 500.0,
            booked: false,
        }
    }

    #[tokio::test]
    async fn committed_writes_are_visible_to_the_next_unit() {
        let repos = InMemoryRepositoryProvider::new();

        let uow = repos.begin().await.unwrap();
        let car = uow.cars().insert(new_car()).await.unwrap();
        uow.commit().await.unwrap();

        let uow = repos.begin().await.unwrap();
        assert!(uow.cars().exists_by_id(car.id).await.unwrap());
    }

    #[tokio::test]
    async fn dropped_unit_discards_writes() {
        let repos = InMemoryRepositoryProvider::new();

        {
            let uow = repos.begin().await.unwrap();
            uow.cars().insert(new_car()).await.unwrap();
        }

        let uow = repos.begin().await.unwrap();
        assert!(uow.cars().find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn rollback_discards_writes() {
        let repos = InMemoryRepositoryProvider::new();

        let uow = repos.begin().await.unwrap();
        uow.cars().insert(new_car()).await.unwrap();
        uow.rollback().await.unwrap();

        let uow = repos.begin().await.unwrap();
        assert!(uow.cars().find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn stale_car_version_is_rejected() {
        let repos = InMemoryRepositoryProvider::new();

        let uow = repos.begin().await.unwrap();
        let car = uow.cars().insert(new_car()).await.unwrap();
        uow.commit().await.unwrap();
        let stale = car.clone();

        let uow = repos.begin().await.unwrap();
        let mut fresh = car;
        fresh.mark_booked();
        let saved = uow.cars().update(fresh).await.unwrap();
        assert_eq!(saved.version, 1);
        uow.commit().await.unwrap();

        let uow = repos.begin().await.unwrap();
        let err = uow.cars().update(stale).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn booking_ids_are_assigned_sequentially() {
        let repos = InMemoryRepositoryProvider::new();
        let uow = repos.begin().await.unwrap();
        let date = chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let draft = BookingDraft {
            from_date: date,
            to_date: date,
            user_id: 1,
            car_id: 1,
            active: true,
        };
        let first = uow.bookings().insert(draft.clone()).await.unwrap();
        let second = uow.bookings().insert(draft).await.unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(uow.bookings().find_by_active(true).await.unwrap().len(), 2);
    }
}
