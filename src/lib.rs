//! # Car Rental Service
//!
//! Booking lifecycle for a car rental business: customers book cars,
//! return them, and administrators manage cars, users and bookings.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Entities, partial-update types, repository and unit-of-work traits
//! - **application**: Booking, car and user services
//! - **infrastructure**: SeaORM and in-memory stores, password hashing
//! - **interfaces**: REST API with Swagger documentation
//! - **support**: Errors and graceful shutdown

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod support;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::{
    init_database, DatabaseConfig, InMemoryRepositoryProvider, SeaOrmRepositoryProvider,
};

// Re-export API router
pub use interfaces::http::{create_api_router, AppState};
