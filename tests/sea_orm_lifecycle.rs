//! Booking lifecycle against SQLite through the SeaORM provider.

use std::sync::Arc;

use chrono::NaiveDate;
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;

use car_rental::application::{BookingService, CarService, UserService};
use car_rental::domain::{
    BookingPatch, CarDetails, CreateUserDto, DomainError, EntityKind, NewBooking,
    RepositoryProvider,
};
use car_rental::infrastructure::database::migrator::Migrator;
use car_rental::{init_database, DatabaseConfig, SeaOrmRepositoryProvider};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

async fn setup() -> (DatabaseConnection, Arc<dyn RepositoryProvider>) {
    let db = init_database(&DatabaseConfig::sqlite_in_memory())
        .await
        .unwrap();
    Migrator::up(&db, None).await.unwrap();
    let repos: Arc<dyn RepositoryProvider> = Arc::new(SeaOrmRepositoryProvider::new(db.clone()));
    (db, repos)
}

fn car(name: &str) -> CarDetails {
    CarDetails {
        name: name.into(),
        model: "240".into(),
        feature1: Some("Radio".into()),
        feature2: None,
        feature3: None,
        car_type: "Sedan".into(),
        price: 350.0,
        booked: false,
    }
}

fn user(username: &str) -> CreateUserDto {
    CreateUserDto {
        first_name: "Sara".into(),
        last_name: "Holm".into(),
        username: username.into(),
        phone: "0705551234".into(),
        email: format!("{}@example.com", username),
        password: "pa55word".into(),
        role: None,
    }
}

#[tokio::test]
async fn full_rental_cycle() {
    let (_db, repos) = setup().await;
    let bookings = BookingService::new(repos.clone());
    let cars = CarService::new(repos.clone());
    let users = UserService::new(repos.clone());

    let u1 = users.add_user(user("sara")).await.unwrap();
    let c1 = cars.add_car(car("Volvo")).await.unwrap();
    let c2 = cars.add_car(car("Saab")).await.unwrap();

    // Book
    let b1 = bookings
        .create_booking(NewBooking::new(date(2024, 1, 1), date(2024, 1, 5), u1.id, c1.id))
        .await
        .unwrap();
    assert!(b1.active);
    assert!(cars.get_car(c1.id).await.unwrap().unwrap().booked);
    assert_eq!(users.get_user(u1.id).await.unwrap().unwrap().no_of_orders, 1);

    // Return
    let returned = bookings.return_car(b1.id).await.unwrap();
    assert!(!returned.active);
    assert!(!cars.get_car(c1.id).await.unwrap().unwrap().booked);
    assert!(bookings.get_active_bookings().await.unwrap().is_empty());

    // Book again, then delete without returning
    let b2 = bookings
        .create_booking(NewBooking::new(date(2024, 2, 1), date(2024, 2, 3), u1.id, c2.id))
        .await
        .unwrap();
    assert_eq!(users.get_user(u1.id).await.unwrap().unwrap().no_of_orders, 2);

    bookings.delete_booking_by_id(b2.id).await.unwrap();
    assert_eq!(users.get_user(u1.id).await.unwrap().unwrap().no_of_orders, 1);
    assert!(cars.get_car(c2.id).await.unwrap().unwrap().booked);
    assert!(bookings.get_booking_by_id(b2.id).await.unwrap().is_none());

    // Deleting again is a no-op
    bookings.delete_booking_by_id(b2.id).await.unwrap();
    assert_eq!(users.get_user(u1.id).await.unwrap().unwrap().no_of_orders, 1);

    let mine = bookings.get_my_orders(u1.id).await.unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].id, b1.id);
}

#[tokio::test]
async fn failed_create_leaves_rows_untouched() {
    let (_db, repos) = setup().await;
    let bookings = BookingService::new(repos.clone());
    let cars = CarService::new(repos.clone());
    let users = UserService::new(repos.clone());

    let u1 = users.add_user(user("sara")).await.unwrap();
    let c1 = cars.add_car(car("Volvo")).await.unwrap();

    let err = bookings
        .create_booking(NewBooking::new(date(2024, 1, 1), date(2024, 1, 5), u1.id, 999))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::NotFound { entity: EntityKind::Car, id: 999 }
    ));

    assert_eq!(users.get_user(u1.id).await.unwrap().unwrap().no_of_orders, 0);
    assert!(!cars.get_car(c1.id).await.unwrap().unwrap().booked);
    assert!(bookings.get_all_bookings().await.unwrap().is_empty());
}

#[tokio::test]
async fn partial_update_round_trips_dates() {
    let (_db, repos) = setup().await;
    let bookings = BookingService::new(repos.clone());
    let cars = CarService::new(repos.clone());
    let users = UserService::new(repos.clone());

    let u1 = users.add_user(user("sara")).await.unwrap();
    let c1 = cars.add_car(car("Volvo")).await.unwrap();
    let b1 = bookings
        .create_booking(NewBooking::new(date(2024, 1, 1), date(2024, 1, 5), u1.id, c1.id))
        .await
        .unwrap();

    let updated = bookings
        .update_booking(
            b1.id,
            BookingPatch {
                to_date: Some(date(2024, 1, 10)),
                user_id: Some(0),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let stored = bookings.get_booking_by_id(b1.id).await.unwrap().unwrap();
    assert_eq!(stored, updated);
    assert_eq!(stored.from_date, date(2024, 1, 1));
    assert_eq!(stored.to_date, date(2024, 1, 10));
    assert_eq!(stored.user_id, u1.id);
    assert!(stored.active);
}

#[tokio::test]
async fn stale_car_version_is_a_conflict() {
    let (_db, repos) = setup().await;
    let cars = CarService::new(repos.clone());
    let c1 = cars.add_car(car("Volvo")).await.unwrap();
    let stale = c1.clone();

    let mut edit = car("Volvo");
    edit.price = 400.0;
    let updated = cars.update_car(c1.id, edit).await.unwrap();
    assert_eq!(updated.version, stale.version + 1);

    let uow = repos.begin().await.unwrap();
    let err = uow.cars().update(stale).await.unwrap_err();
    assert!(matches!(err, DomainError::Conflict(_)));
    uow.rollback().await.unwrap();

    assert_eq!(cars.get_car(c1.id).await.unwrap().unwrap().price, 400.0);
}

#[tokio::test]
async fn duplicate_email_is_a_conflict() {
    let (_db, repos) = setup().await;
    let users = UserService::new(repos);

    users.add_user(user("sara")).await.unwrap();
    let mut dup = user("sara2");
    dup.email = "sara@example.com".into();
    let err = users.add_user(dup).await.unwrap_err();
    assert!(matches!(err, DomainError::Conflict(_)));
}
