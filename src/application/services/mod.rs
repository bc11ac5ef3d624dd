//! Application services

mod booking;
mod car;
pub(crate) mod unit_of_work;

pub use booking::BookingService;
pub use car::CarService;
