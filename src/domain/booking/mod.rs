//! Booking aggregate
//!
//! Contains the Booking entity, its create/patch value types, and the
//! repository interface.

pub mod model;
pub mod repository;

pub use model::{Booking, BookingDraft, BookingPatch, NewBooking};
pub use repository::BookingRepository;
