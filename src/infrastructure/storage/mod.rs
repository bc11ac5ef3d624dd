//! In-memory repository provider

mod memory;

pub use memory::{InMemoryRepositoryProvider, InMemoryUnitOfWork};
