pub mod booking;
pub mod car;
pub mod repositories;
pub mod user;

// Re-export commonly used types
pub use booking::{Booking, BookingDraft, BookingPatch, BookingRepository, NewBooking};
pub use car::{Car, CarDetails, CarRepository, NewCar};
pub use repositories::{RepositoryProvider, UnitOfWork};
pub use user::{CreateUserDto, NewUser, UpdateUserDto, User, UserRepository, UserRole};

// Re-export errors from support for convenience
pub use crate::support::errors::{DomainError, DomainResult, EntityKind};
