//! Booking DTOs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::domain::{Booking, BookingPatch, NewBooking};

/// Booking API representation
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BookingDto {
    pub id: i64,
    /// First day of the rental (YYYY-MM-DD)
    pub from_date: NaiveDate,
    /// Last day of the rental (YYYY-MM-DD)
    pub to_date: NaiveDate,
    pub user_id: i64,
    pub car_id: i64,
    /// `true` until the car is returned
    pub active: bool,
}

impl From<Booking> for BookingDto {
    fn from(b: Booking) -> Self {
        Self {
            id: b.id,
            from_date: b.from_date,
            to_date: b.to_date,
            user_id: b.user_id,
            car_id: b.car_id,
            active: b.active,
        }
    }
}

/// Request to book a car
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_create_range"))]
pub struct CreateBookingRequest {
    pub from_date: NaiveDate,
    pub to_date: NaiveDate,
    #[validate(range(min = 1))]
    pub user_id: i64,
    #[validate(range(min = 1))]
    pub car_id: i64,
}

impl From<CreateBookingRequest> for NewBooking {
    fn from(r: CreateBookingRequest) -> Self {
        NewBooking::new(r.from_date, r.to_date, r.user_id, r.car_id)
    }
}

/// Partial booking edit; omitted fields keep their value, `0` ids are ignored
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_patch_range"))]
pub struct UpdateBookingRequest {
    pub from_date: Option<NaiveDate>,
    pub to_date: Option<NaiveDate>,
    #[validate(range(min = 0))]
    pub user_id: Option<i64>,
    #[validate(range(min = 0))]
    pub car_id: Option<i64>,
    pub active: Option<bool>,
}

impl From<UpdateBookingRequest> for BookingPatch {
    fn from(r: UpdateBookingRequest) -> Self {
        BookingPatch {
            from_date: r.from_date,
            to_date: r.to_date,
            user_id: r.user_id,
            car_id: r.car_id,
            active: r.active,
        }
    }
}

fn reversed_range() -> ValidationError {
    ValidationError::new("date_range").with_message("from_date must not be after to_date".into())
}

fn validate_create_range(r: &CreateBookingRequest) -> Result<(), ValidationError> {
    if r.from_date > r.to_date {
        return Err(reversed_range());
    }
    Ok(())
}

/// Only checks ranges that are complete in the request itself; the merged
/// range is checked again against the stored booking.
fn validate_patch_range(r: &UpdateBookingRequest) -> Result<(), ValidationError> {
    if let (Some(from), Some(to)) = (r.from_date, r.to_date) {
        if from > to {
            return Err(reversed_range());
        }
    }
    Ok(())
}
