pub mod bookings;
pub mod cars;
pub mod health;
pub mod users;
