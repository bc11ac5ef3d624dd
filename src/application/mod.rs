pub mod identity;
pub mod services;

// Re-export key types for convenience
pub use identity::UserService;
pub use services::{BookingService, CarService};
