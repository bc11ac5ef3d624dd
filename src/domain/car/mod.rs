//! Car aggregate

pub mod model;
pub mod repository;

pub use model::{Car, CarDetails, NewCar};
pub use repository::CarRepository;
