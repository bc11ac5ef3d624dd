//! Booking domain entity

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, DomainResult};

/// A reservation of one car by one user over a date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    /// Identity assigned by the store on insert
    pub id: i64,
    pub from_date: NaiveDate,
    pub to_date: NaiveDate,
    pub user_id: i64,
    pub car_id: i64,
    /// `true` while the car is out
    pub active: bool,
}

impl Booking {
    /// Return the car: the booking stops being in effect.
    pub fn mark_returned(&mut self) {
        self.active = false;
    }

    /// Merge a partial update into this booking.
    ///
    /// Dates overwrite when present. Ids overwrite when present and
    /// non-zero. `active` overwrites only when present.
    pub fn apply_patch(&mut self, patch: &BookingPatch) {
        if let Some(from_date) = patch.from_date {
            self.from_date = from_date;
        }
        if let Some(to_date) = patch.to_date {
            self.to_date = to_date;
        }
        if let Some(user_id) = patch.user_id.filter(|id| *id != 0) {
            self.user_id = user_id;
        }
        if let Some(car_id) = patch.car_id.filter(|id| *id != 0) {
            self.car_id = car_id;
        }
        if let Some(active) = patch.active {
            self.active = active;
        }
    }

    pub fn validate_dates(&self) -> DomainResult<()> {
        validate_range(self.from_date, self.to_date)
    }
}

/// Request to book a car.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBooking {
    pub from_date: NaiveDate,
    pub to_date: NaiveDate,
    pub user_id: i64,
    pub car_id: i64,
}

impl NewBooking {
    pub fn new(from_date: NaiveDate, to_date: NaiveDate, user_id: i64, car_id: i64) -> Self {
        Self {
            from_date,
            to_date,
            user_id,
            car_id,
        }
    }

    pub fn validate(&self) -> DomainResult<()> {
        validate_range(self.from_date, self.to_date)?;
        validate_id("user_id", self.user_id)?;
        validate_id("car_id", self.car_id)
    }

    /// Row to insert for this request, already in effect.
    pub fn into_draft(self) -> BookingDraft {
        BookingDraft {
            from_date: self.from_date,
            to_date: self.to_date,
            user_id: self.user_id,
            car_id: self.car_id,
            active: true,
        }
    }
}

/// A booking row without identity, handed to the store for insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingDraft {
    pub from_date: NaiveDate,
    pub to_date: NaiveDate,
    pub user_id: i64,
    pub car_id: i64,
    pub active: bool,
}

impl BookingDraft {
    pub fn with_id(self, id: i64) -> Booking {
        Booking {
            id,
            from_date: self.from_date,
            to_date: self.to_date,
            user_id: self.user_id,
            car_id: self.car_id,
            active: self.active,
        }
    }
}

/// Partial update of a booking; `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingPatch {
    pub from_date: Option<NaiveDate>,
    pub to_date: Option<NaiveDate>,
    pub user_id: Option<i64>,
    pub car_id: Option<i64>,
    pub active: Option<bool>,
}

impl BookingPatch {
    pub fn validate(&self) -> DomainResult<()> {
        if let Some(user_id) = self.user_id {
            if user_id < 0 {
                return Err(DomainError::Validation(format!(
                    "user_id must not be negative, got {}",
                    user_id
                )));
            }
        }
        if let Some(car_id) = self.car_id {
            if car_id < 0 {
                return Err(DomainError::Validation(format!(
                    "car_id must not be negative, got {}",
                    car_id
                )));
            }
        }
        Ok(())
    }
}

fn validate_range(from_date: NaiveDate, to_date: NaiveDate) -> DomainResult<()> {
    if from_date > to_date {
        return Err(DomainError::Validation(format!(
            "from_date {} is after to_date {}",
            from_date, to_date
        )));
    }
    Ok(())
}

fn validate_id(field: &str, id: i64) -> DomainResult<()> {
    if id <= 0 {
        return Err(DomainError::Validation(format!(
            "{} must be positive, got {}",
            field, id
        )));
    }
    Ok(())
}

// ── Tests ──────────────────────────────────────────────────────
