//! Booking lifecycle service
//!
//! Keeps a booking, its user's order counter and its car's `booked` flag
//! consistent. Every operation runs in one unit of work: it either commits
//! all of its writes or none of them.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::{
    Booking, BookingPatch, DomainError, DomainResult, EntityKind, NewBooking, RepositoryProvider,
    UnitOfWork,
};

use super::unit_of_work::{finish, finish_read};

/// Service for creating, returning, editing and deleting bookings
pub struct BookingService {
    repos: Arc<dyn RepositoryProvider>,
}

impl BookingService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    // ── Lifecycle ───────────────────────────────────────────────

    /// Book a car.
    ///
    /// Marks the car booked, counts one more order for the user and inserts
    /// an active booking. Fails with `NotFound` if the user or car is
    /// missing, and with `Conflict` if the car changed under us.
    pub async fn create_booking(&self, request: NewBooking) -> DomainResult<Booking> {
        request.validate()?;

        let uow = self.repos.begin().await?;
        let result = Self::create_in(uow.as_ref(), request).await;
        let booking = finish(uow, result).await?;

        info!(
            booking_id = booking.id,
            user_id = booking.user_id,
            car_id = booking.car_id,
            "New booking created"
        );
        Ok(booking)
    }

    async fn create_in(uow: &dyn UnitOfWork, request: NewBooking) -> DomainResult<Booking> {
        let Some(mut user) = uow.users().find_by_id(request.user_id).await? else {
            warn!(user_id = request.user_id, "User not found");
            return Err(DomainError::not_found(EntityKind::User, request.user_id));
        };
        let Some(mut car) = uow.cars().find_by_id(request.car_id).await? else {
            warn!(car_id = request.car_id, "Car not found");
            return Err(DomainError::not_found(EntityKind::Car, request.car_id));
        };

        user.record_order();
        car.mark_booked();

        uow.users().update(user).await?;
        uow.cars().update(car).await?;
        uow.bookings().insert(request.into_draft()).await
    }

    /// Apply a partial edit to a booking row.
    ///
    /// Only the booking is written; the referenced user and car are not
    /// re-synchronised when `user_id` or `car_id` change.
    pub async fn update_booking(&self, id: i64, patch: BookingPatch) -> DomainResult<Booking> {
        patch.validate()?;

        let uow = self.repos.begin().await?;
        let result = Self::update_in(uow.as_ref(), id, &patch).await;
        let booking = finish(uow, result).await?;

        info!(booking_id = booking.id, "Booking updated");
        Ok(booking)
    }

    async fn update_in(uow: &dyn UnitOfWork, id: i64, patch: &BookingPatch) -> DomainResult<Booking> {
        let Some(mut booking) = uow.bookings().find_by_id(id).await? else {
            warn!(booking_id = id, "Booking not found");
            return Err(DomainError::not_found(EntityKind::Booking, id));
        };

        booking.apply_patch(patch);
        booking.validate_dates()?;

        uow.bookings().update(booking).await
    }

    /// End a booking: the booking becomes inactive and its car available.
    pub async fn return_car(&self, booking_id: i64) -> DomainResult<Booking> {
        let uow = self.repos.begin().await?;
        let result = Self::return_in(uow.as_ref(), booking_id).await;
        let booking = finish(uow, result).await?;

        info!(
            booking_id = booking.id,
            car_id = booking.car_id,
            "Car returned, booking no longer active"
        );
        Ok(booking)
    }

    async fn return_in(uow: &dyn UnitOfWork, booking_id: i64) -> DomainResult<Booking> {
        let Some(mut booking) = uow.bookings().find_by_id(booking_id).await? else {
            return Err(DomainError::not_found(EntityKind::Booking, booking_id));
        };
        let Some(mut car) = uow.cars().find_by_id(booking.car_id).await? else {
            return Err(DomainError::not_found(EntityKind::Car, booking.car_id));
        };

        booking.mark_returned();
        car.release();

        uow.cars().update(car).await?;
        uow.bookings().update(booking).await
    }

    /// Delete a booking and forget it in the owner's order count.
    ///
    /// Deleting a missing booking is a no-op. A missing owner is logged and
    /// skipped. The car's `booked` flag is left as it is.
    pub async fn delete_booking_by_id(&self, id: i64) -> DomainResult<()> {
        let uow = self.repos.begin().await?;
        let result = Self::delete_in(uow.as_ref(), id).await;
        let deleted = finish(uow, result).await?;

        if deleted {
            info!(booking_id = id, "Booking deleted");
        }
        Ok(())
    }

    async fn delete_in(uow: &dyn UnitOfWork, id: i64) -> DomainResult<bool> {
        let Some(booking) = uow.bookings().find_by_id(id).await? else {
            warn!(booking_id = id, "Attempt to delete non-existing booking");
            return Ok(false);
        };

        match uow.users().find_by_id(booking.user_id).await? {
            Some(mut user) => {
                let before = user.no_of_orders;
                user.release_order();
                let after = user.no_of_orders;
                uow.users().update(user).await?;
                info!(
                    user_id = booking.user_id,
                    "Decremented no_of_orders: {} -> {}", before, after
                );
            }
            None => {
                warn!(
                    booking_id = id,
                    user_id = booking.user_id,
                    "User not found when deleting booking"
                );
            }
        }

        uow.bookings().delete_by_id(id).await?;
        Ok(true)
    }

    // ── Queries ─────────────────────────────────────────────────

    pub async fn get_all_bookings(&self) -> DomainResult<Vec<Booking>> {
        let uow = self.repos.begin().await?;
        let result = uow.bookings().find_all().await;
        finish_read(uow, result).await
    }

    pub async fn get_booking_by_id(&self, id: i64) -> DomainResult<Option<Booking>> {
        let uow = self.repos.begin().await?;
        let result = uow.bookings().find_by_id(id).await;
        finish_read(uow, result).await
    }

    pub async fn get_active_bookings(&self) -> DomainResult<Vec<Booking>> {
        let uow = self.repos.begin().await?;
        let result = uow.bookings().find_by_active(true).await;
        finish_read(uow, result).await
    }

    /// Bookings of one user; fails with `NotFound` if the user is unknown.
    pub async fn get_my_orders(&self, user_id: i64) -> DomainResult<Vec<Booking>> {
        let uow = self.repos.begin().await?;
        let result = Self::orders_in(uow.as_ref(), user_id).await;
        finish_read(uow, result).await
    }

    async fn orders_in(uow: &dyn UnitOfWork, user_id: i64) -> DomainResult<Vec<Booking>> {
        if !uow.users().exists_by_id(user_id).await? {
            return Err(DomainError::not_found(EntityKind::User, user_id));
        }
        uow.bookings().find_all_by_user_id(user_id).await
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::NaiveDate;

    use crate::domain::{
        BookingDraft, BookingRepository, CarDetails, CarRepository, NewUser, User, UserRepository,
        UserRole,
    };
    use crate::infrastructure::InMemoryRepositoryProvider;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn new_user(username: &str, no_of_orders: i32) -> NewUser {
        NewUser {
            first_name: "Anna".into(),
            last_name: "Berg".into(),
            username: username.into(),
            phone: "0701234567".into(),
            email: format!("{}@example.com", username),
            password_hash: "hash".into(),
            no_of_orders,
            role: UserRole::Customer,
        }
    }

    fn new_car(name: &str) -> CarDetails {
        CarDetails {
            name: name.into(),
            model: "XC60".into(),
            feature1: None,
            feature2: None,
            feature3: None,
            car_type: "SUV".into(),
            price: 899.0,
            booked: false,
        }
    }

    /// Seeds one user and one car, returning their ids.
    async fn seed(repos: &InMemoryRepositoryProvider, no_of_orders: i32) -> (i64, i64) {
        let uow = repos.begin().await.unwrap();
        let user = uow.users().insert(new_user("anna", no_of_orders)).await.unwrap();
        let car = uow.cars().insert(new_car("Volvo")).await.unwrap();
        uow.commit().await.unwrap();
        (user.id, car.id)
    }

    async fn load_user(repos: &InMemoryRepositoryProvider, id: i64) -> User {
        let uow = repos.begin().await.unwrap();
        uow.users().find_by_id(id).await.unwrap().unwrap()
    }

    async fn car_booked(repos: &InMemoryRepositoryProvider, id: i64) -> bool {
        let uow = repos.begin().await.unwrap();
        uow.cars().find_by_id(id).await.unwrap().unwrap().booked
    }

    fn service(repos: &InMemoryRepositoryProvider) -> BookingService {
        BookingService::new(Arc::new(repos.clone()))
    }

    #[tokio::test]
    async fn create_books_car_and_counts_order() {
        let repos = InMemoryRepositoryProvider::new();
        let (user_id, car_id) = seed(&repos, 0).await;

        let booking = service(&repos)
            .create_booking(NewBooking::new(date(2024, 1, 1), date(2024, 1, 5), user_id, car_id))
            .await
            .unwrap();

        assert!(booking.active);
        assert!(booking.id > 0);
        assert!(car_booked(&repos, car_id).await);
        assert_eq!(load_user(&repos, user_id).await.no_of_orders, 1);
    }

    #[tokio::test]
    async fn create_with_unknown_user_changes_nothing() {
        let repos = InMemoryRepositoryProvider::new();
        let (user_id, car_id) = seed(&repos, 0).await;

        let err = service(&repos)
            .create_booking(NewBooking::new(date(2024, 1, 1), date(2024, 1, 5), 999, car_id))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            DomainError::NotFound { entity: EntityKind::User, id: 999 }
        ));
        assert!(!car_booked(&repos, car_id).await);
        assert_eq!(load_user(&repos, user_id).await.no_of_orders, 0);
        assert!(service(&repos).get_all_bookings().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn create_with_unknown_car_changes_nothing() {
        let repos = InMemoryRepositoryProvider::new();
        let (user_id, _) = seed(&repos, 2).await;

        let err = service(&repos)
            .create_booking(NewBooking::new(date(2024, 1, 1), date(2024, 1, 5), user_id, 404))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            DomainError::NotFound { entity: EntityKind::Car, id: 404 }
        ));
        assert_eq!(load_user(&repos, user_id).await.no_of_orders, 2);
        assert!(service(&repos).get_all_bookings().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn create_rejects_reversed_dates() {
        let repos = InMemoryRepositoryProvider::new();
        let (user_id, car_id) = seed(&repos, 0).await;

        let err = service(&repos)
            .create_booking(NewBooking::new(date(2024, 1, 5), date(2024, 1, 1), user_id, car_id))
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::Validation(_)));
        assert!(!car_booked(&repos, car_id).await);
    }

    #[tokio::test]
    async fn return_releases_car() {
        let repos = InMemoryRepositoryProvider::new();
        let (user_id, car_id) = seed(&repos, 0).await;
        let svc = service(&repos);
        let booking = svc
            .create_booking(NewBooking::new(date(2024, 1, 1), date(2024, 1, 5), user_id, car_id))
            .await
            .unwrap();

        let returned = svc.return_car(booking.id).await.unwrap();

        assert!(!returned.active);
        assert!(!car_booked(&repos, car_id).await);
        let stored = svc.get_booking_by_id(booking.id).await.unwrap().unwrap();
        assert!(!stored.active);
        assert!(svc.get_active_bookings().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn return_unknown_booking_is_not_found() {
        let repos = InMemoryRepositoryProvider::new();
        let err = service(&repos).return_car(12).await.unwrap_err();
        assert!(matches!(
            err,
            DomainError::NotFound { entity: EntityKind::Booking, id: 12 }
        ));
    }

    #[tokio::test]
    async fn return_with_deleted_car_leaves_booking_active() {
        let repos = InMemoryRepositoryProvider::new();
        let (user_id, car_id) = seed(&repos, 0).await;
        let svc = service(&repos);
        let booking = svc
            .create_booking(NewBooking::new(date(2024, 1, 1), date(2024, 1, 5), user_id, car_id))
            .await
            .unwrap();

        let uow = repos.begin().await.unwrap();
        uow.cars().delete_by_id(car_id).await.unwrap();
        uow.commit().await.unwrap();

        let err = svc.return_car(booking.id).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { entity: EntityKind::Car, .. }));
        assert!(svc.get_booking_by_id(booking.id).await.unwrap().unwrap().active);
    }

    #[tokio::test]
    async fn delete_decrements_and_is_idempotent() {
        let repos = InMemoryRepositoryProvider::new();
        let (user_id, car_id) = seed(&repos, 0).await;
        let svc = service(&repos);
        let booking = svc
            .create_booking(NewBooking::new(date(2024, 1, 1), date(2024, 1, 5), user_id, car_id))
            .await
            .unwrap();

        svc.delete_booking_by_id(booking.id).await.unwrap();
        assert_eq!(load_user(&repos, user_id).await.no_of_orders, 0);
        assert!(svc.get_booking_by_id(booking.id).await.unwrap().is_none());
        // Car flag is left untouched by delete
        assert!(car_booked(&repos, car_id).await);

        svc.delete_booking_by_id(booking.id).await.unwrap();
        assert_eq!(load_user(&repos, user_id).await.no_of_orders, 0);
    }

    #[tokio::test]
    async fn delete_never_drives_counter_negative() {
        let repos = InMemoryRepositoryProvider::new();
        let (user_id, car_id) = seed(&repos, 0).await;

        let uow = repos.begin().await.unwrap();
        let draft = BookingDraft {
            from_date: date(2024, 3, 1),
            to_date: date(2024, 3, 2),
            user_id,
            car_id,
            active: true,
        };
        let first = uow.bookings().insert(draft.clone()).await.unwrap();
        let second = uow.bookings().insert(draft).await.unwrap();
        uow.commit().await.unwrap();

        let svc = service(&repos);
        svc.delete_booking_by_id(first.id).await.unwrap();
        svc.delete_booking_by_id(second.id).await.unwrap();
        assert_eq!(load_user(&repos, user_id).await.no_of_orders, 0);
    }

    #[tokio::test]
    async fn delete_with_missing_owner_still_removes_booking() {
        let repos = InMemoryRepositoryProvider::new();
        let (user_id, car_id) = seed(&repos, 0).await;
        let svc = service(&repos);
        let booking = svc
            .create_booking(NewBooking::new(date(2024, 1, 1), date(2024, 1, 5), user_id, car_id))
            .await
            .unwrap();

        let uow = repos.begin().await.unwrap();
        uow.users().delete_by_id(user_id).await.unwrap();
        uow.commit().await.unwrap();

        svc.delete_booking_by_id(booking.id).await.unwrap();
        assert!(svc.get_all_bookings().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_follows_merge_policy() {
        let repos = InMemoryRepositoryProvider::new();
        let (user_id, car_id) = seed(&repos, 0).await;
        let svc = service(&repos);
        let booking = svc
            .create_booking(NewBooking::new(date(2024, 1, 1), date(2024, 1, 5), user_id, car_id))
            .await
            .unwrap();

        let patch = BookingPatch {
            to_date: Some(date(2024, 1, 8)),
            user_id: Some(0),
            car_id: Some(0),
            ..Default::default()
        };
        svc.update_booking(booking.id, patch).await.unwrap();

        let stored = svc.get_booking_by_id(booking.id).await.unwrap().unwrap();
        assert_eq!(stored.from_date, date(2024, 1, 1));
        assert_eq!(stored.to_date, date(2024, 1, 8));
        assert_eq!(stored.user_id, user_id);
        assert_eq!(stored.car_id, car_id);
        assert!(stored.active);
    }

    #[tokio::test]
    async fn update_does_not_touch_user_or_car() {
        let repos = InMemoryRepositoryProvider::new();
        let (user_id, car_id) = seed(&repos, 0).await;
        let svc = service(&repos);
        let booking = svc
            .create_booking(NewBooking::new(date(2024, 1, 1), date(2024, 1, 5), user_id, car_id))
            .await
            .unwrap();

        let patch = BookingPatch {
            active: Some(false),
            ..Default::default()
        };
        let updated = svc.update_booking(booking.id, patch).await.unwrap();

        assert!(!updated.active);
        assert!(car_booked(&repos, car_id).await);
        assert_eq!(load_user(&repos, user_id).await.no_of_orders, 1);
    }

    #[tokio::test]
    async fn update_unknown_booking_is_not_found() {
        let repos = InMemoryRepositoryProvider::new();
        let err = service(&repos)
            .update_booking(3, BookingPatch::default())
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn update_rejects_merged_reversed_range() {
        let repos = InMemoryRepositoryProvider::new();
        let (user_id, car_id) = seed(&repos, 0).await;
        let svc = service(&repos);
        let booking = svc
            .create_booking(NewBooking::new(date(2024, 1, 1), date(2024, 1, 5), user_id, car_id))
            .await
            .unwrap();

        let patch = BookingPatch {
            from_date: Some(date(2024, 2, 1)),
            ..Default::default()
        };
        let err = svc.update_booking(booking.id, patch).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        let stored = svc.get_booking_by_id(booking.id).await.unwrap().unwrap();
        assert_eq!(stored.from_date, date(2024, 1, 1));
    }

    #[tokio::test]
    async fn my_orders_requires_known_user() {
        let repos = InMemoryRepositoryProvider::new();
        let (user_id, car_id) = seed(&repos, 0).await;
        let svc = service(&repos);
        svc.create_booking(NewBooking::new(date(2024, 1, 1), date(2024, 1, 5), user_id, car_id))
            .await
            .unwrap();

        assert_eq!(svc.get_my_orders(user_id).await.unwrap().len(), 1);
        let err = svc.get_my_orders(77).await.unwrap_err();
        assert!(matches!(
            err,
            DomainError::NotFound { entity: EntityKind::User, id: 77 }
        ));
    }

    #[tokio::test]
    async fn rental_scenario() {
        let repos = InMemoryRepositoryProvider::new();
        let (u1, c1) = seed(&repos, 0).await;
        let svc = service(&repos);

        let first = svc
            .create_booking(NewBooking::new(date(2024, 1, 1), date(2024, 1, 5), u1, c1))
            .await
            .unwrap();
        assert!(first.active);
        assert!(car_booked(&repos, c1).await);
        assert_eq!(load_user(&repos, u1).await.no_of_orders, 1);

        let returned = svc.return_car(first.id).await.unwrap();
        assert!(!returned.active);
        assert!(!car_booked(&repos, c1).await);

        // A second booking that is never returned, then deleted
        let uow = repos.begin().await.unwrap();
        let c2 = uow.cars().insert(new_car("Saab")).await.unwrap();
        uow.commit().await.unwrap();
        let second = svc
            .create_booking(NewBooking::new(date(2024, 2, 1), date(2024, 2, 3), u1, c2.id))
            .await
            .unwrap();
        assert_eq!(load_user(&repos, u1).await.no_of_orders, 2);

        svc.delete_booking_by_id(second.id).await.unwrap();
        assert_eq!(load_user(&repos, u1).await.no_of_orders, 1);
        assert!(car_booked(&repos, c2.id).await);
        assert!(!car_booked(&repos, c1).await);
    }

    // ── Rollback on a failing write ─────────────────────────────

    /// Provider whose booking inserts always fail.
    struct FailingInsertProvider {
        inner: InMemoryRepositoryProvider,
    }

    struct FailingInsertUnitOfWork {
        inner: Box<dyn UnitOfWork>,
    }

    #[async_trait]
    impl RepositoryProvider for FailingInsertProvider {
        async fn begin(&self) -> DomainResult<Box<dyn UnitOfWork>> {
            let inner = self.inner.begin().await?;
            Ok(Box::new(FailingInsertUnitOfWork { inner }))
        }
    }

    #[async_trait]
    impl UnitOfWork for FailingInsertUnitOfWork {
        fn users(&self) -> &dyn UserRepository {
            self.inner.users()
        }

        fn cars(&self) -> &dyn CarRepository {
            self.inner.cars()
        }

        fn bookings(&self) -> &dyn BookingRepository {
            self
        }

        async fn commit(self: Box<Self>) -> DomainResult<()> {
            self.inner.commit().await
        }

        async fn rollback(self: Box<Self>) -> DomainResult<()> {
            self.inner.rollback().await
        }
    }

    #[async_trait]
    impl BookingRepository for FailingInsertUnitOfWork {
        async fn find_by_id(&self, id: i64) -> DomainResult<Option<Booking>> {
            self.inner.bookings().find_by_id(id).await
        }

        async fn insert(&self, _draft: BookingDraft) -> DomainResult<Booking> {
            Err(DomainError::Storage("disk full".into()))
        }

        async fn update(&self, booking: Booking) -> DomainResult<Booking> {
            self.inner.bookings().update(booking).await
        }

        async fn delete_by_id(&self, id: i64) -> DomainResult<()> {
            self.inner.bookings().delete_by_id(id).await
        }

        async fn find_all(&self) -> DomainResult<Vec<Booking>> {
            self.inner.bookings().find_all().await
        }

        async fn find_all_by_user_id(&self, user_id: i64) -> DomainResult<Vec<Booking>> {
            self.inner.bookings().find_all_by_user_id(user_id).await
        }

        async fn find_by_active(&self, active: bool) -> DomainResult<Vec<Booking>> {
            self.inner.bookings().find_by_active(active).await
        }
    }

    #[tokio::test]
    async fn failed_insert_rolls_back_user_and_car() {
        let repos = InMemoryRepositoryProvider::new();
        let (user_id, car_id) = seed(&repos, 0).await;
        let svc = BookingService::new(Arc::new(FailingInsertProvider {
            inner: repos.clone(),
        }));

        let err = svc
            .create_booking(NewBooking::new(date(2024, 1, 1), date(2024, 1, 5), user_id, car_id))
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::Storage(_)));
        assert!(!car_booked(&repos, car_id).await);
        assert_eq!(load_user(&repos, user_id).await.no_of_orders, 0);
    }
}
