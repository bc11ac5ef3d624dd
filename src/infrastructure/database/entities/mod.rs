//! Database entities module

pub mod booking;
pub mod car;
pub mod user;

pub use booking::Entity as Booking;
pub use car::Entity as Car;
pub use user::Entity as User;
