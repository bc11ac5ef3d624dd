//! Identity module: user management
//!
//! Contains the `UserService` which orchestrates user registration,
//! profile updates and removal.

pub mod service;

pub use service::UserService;
