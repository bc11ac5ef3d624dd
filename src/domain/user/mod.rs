//! User aggregate
//!
//! Contains the User entity, DTOs, and repository interface.

pub mod model;
pub mod repository;

mod dto;

pub use model::{NewUser, User, UserRole};

pub use dto::{CreateUserDto, UpdateUserDto};

pub use repository::UserRepository;
