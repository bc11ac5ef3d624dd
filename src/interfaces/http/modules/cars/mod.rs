//! Cars module: car catalogue administration

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
