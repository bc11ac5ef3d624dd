//! Car domain entity

use serde::{Deserialize, Serialize};

/// A rentable car.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Car {
    pub id: i64,
    pub name: String,
    pub model: String,
    pub feature1: Option<String>,
    pub feature2: Option<String>,
    pub feature3: Option<String>,
    /// Body type, e.g. "SUV" (at most 20 characters)
    pub car_type: String,
    pub price: f64,
    /// Currently unavailable; a flag, not a calendar
    pub booked: bool,
    /// Optimistic concurrency token, bumped by every successful update
    pub version: i32,
}

impl Car {
    pub fn mark_booked(&mut self) {
        self.booked = true;
    }

    pub fn release(&mut self) {
        self.booked = false;
    }

    /// Overwrite descriptive fields and the booked flag from an admin edit.
    /// Identity and version are kept.
    pub fn apply_details(&mut self, details: CarDetails) {
        self.name = details.name;
        self.model = details.model;
        self.feature1 = details.feature1;
        self.feature2 = details.feature2;
        self.feature3 = details.feature3;
        self.car_type = details.car_type;
        self.price = details.price;
        self.booked = details.booked;
    }
}

/// Car fields supplied by an administrator, used for both insert and edit.
#[derive(Debug, Clone, PartialEq)]
pub struct CarDetails {
    pub name: String,
    pub model: String,
    pub feature1: Option<String>,
    pub feature2: Option<String>,
    pub feature3: Option<String>,
    pub car_type: String,
    pub price: f64,
    pub booked: bool,
}

/// A car row without identity, handed to the store for insertion.
pub type NewCar = CarDetails;

#[cfg(test)]
mod tests {
    use super::*;

    fn details() -> CarDetails {
        CarDetails {
            name: "Volvo".into(),
            model: "XC60".into(),
            feature1: Some("AWD".into()),
            feature2: None,
            feature3: None,
            car_type: "SUV".into(),
            price: 899.0,
            booked: false,
        }
    }

    #[test]
    fn booked_flag_toggles() {
        let d = details();
        let mut car = Car {
            id: 1,
            name: d.name,
            model: d.model,
            feature1: d.feature1,
            feature2: d.feature2,
            feature3: d.feature3,
            car_type: d.car_type,
            price: d.price,
            booked: false,
            version: 3,
        };
        car.mark_booked();
        assert!(car.booked);
        car.release();
        assert!(!car.booked);

        let mut edit = details();
        edit.price = 950.0;
        edit.booked = true;
        car.apply_details(edit);
        assert_eq!(car.price, 950.0);
        assert!(car.booked);
        assert_eq!(car.version, 3);
        assert_eq!(car.id, 1);
    }
}
