//! Car DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::{Car, CarDetails};

/// Car API representation
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CarDto {
    pub id: i64,
    pub name: String,
    pub model: String,
    pub feature1: Option<String>,
    pub feature2: Option<String>,
    pub feature3: Option<String>,
    /// Body type, e.g. "SUV"
    #[serde(rename = "type")]
    pub car_type: String,
    pub price: f64,
    pub booked: bool,
    /// Bumped on every change to the car
    pub version: i32,
}

impl From<Car> for CarDto {
    fn from(c: Car) -> Self {
        Self {
            id: c.id,
            name: c.name,
            model: c.model,
            feature1: c.feature1,
            feature2: c.feature2,
            feature3: c.feature3,
            car_type: c.car_type,
            price: c.price,
            booked: c.booked,
            version: c.version,
        }
    }
}

/// Create or replace a car. `booked` is ignored on create.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CarRequest {
    #[validate(length(min = 1, max = 50))]
    pub name: String,
    #[validate(length(min = 1, max = 50))]
    pub model: String,
    #[validate(length(max = 50))]
    pub feature1: Option<String>,
    #[validate(length(max = 50))]
    pub feature2: Option<String>,
    #[validate(length(max = 50))]
    pub feature3: Option<String>,
    #[serde(rename = "type")]
    #[validate(length(min = 1, max = 20))]
    pub car_type: String,
    #[validate(range(min = 0.0))]
    pub price: f64,
    #[serde(default)]
    pub booked: bool,
}

impl From<CarRequest> for CarDetails {
    fn from(r: CarRequest) -> Self {
        CarDetails {
            name: r.name,
            model: r.model,
            feature1: r.feature1,
            feature2: r.feature2,
            feature3: r.feature3,
            car_type: r.car_type,
            price: r.price,
            booked: r.booked,
        }
    }
}
