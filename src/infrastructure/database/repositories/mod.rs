//! Database repository implementations
//!
//! Per-aggregate SeaORM repositories + the transactional RepositoryProvider.

pub mod booking_repository;
pub mod car_repository;
pub mod repository_provider;
pub mod user_repository;

pub use repository_provider::{SeaOrmRepositoryProvider, SeaOrmUnitOfWork};
