use serde::{Deserialize, Serialize};

/// User role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum UserRole {
    Admin,
    #[default]
    Customer,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "ROLE_ADMIN",
            Self::Customer => "ROLE_USER",
        }
    }

    /// Parse a role name as entered by an administrator.
    ///
    /// Accepts the stored authority names as well as the short forms
    /// `admin`/`user`; blank or unknown input yields the default role.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" | "role_admin" => Self::Admin,
            _ => Self::Customer,
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User model
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub phone: String,
    pub email: String,
    pub password_hash: String,
    /// Bookings made by this user; never negative
    pub no_of_orders: i32,
    pub role: UserRole,
}

impl User {
    /// Count one more booking for this user.
    pub fn record_order(&mut self) {
        self.no_of_orders = self.no_of_orders.saturating_add(1);
    }

    /// Forget one booking, never going below zero.
    pub fn release_order(&mut self) {
        self.no_of_orders = (self.no_of_orders - 1).max(0);
    }
}

/// A user row without identity, handed to the store for insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub phone: String,
    pub email: String,
    pub password_hash: String,
    pub no_of_orders: i32,
    pub role: UserRole,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(no_of_orders: i32) -> User {
        User {
            id: 1,
            first_name: "Anna".into(),
            last_name: "Berg".into(),
            username: "anna".into(),
            phone: "0701234567".into(),
            email: "anna@example.com".into(),
            password_hash: "x".into(),
            no_of_orders,
            role: UserRole::Customer,
        }
    }

    #[test]
    fn release_order_floors_at_zero() {
        let mut u = user(1);
        u.release_order();
        assert_eq!(u.no_of_orders, 0);
        u.release_order();
        assert_eq!(u.no_of_orders, 0);
    }

    #[test]
    fn record_order_increments_by_one() {
        let mut u = user(4);
        u.record_order();
        assert_eq!(u.no_of_orders, 5);
    }

    #[test]
    fn role_parsing() {
        assert_eq!(UserRole::parse("admin"), UserRole::Admin);
        assert_eq!(UserRole::parse("ROLE_ADMIN"), UserRole::Admin);
        assert_eq!(UserRole::parse(""), UserRole::Customer);
        assert_eq!(UserRole::parse("ROLE_USER"), UserRole::Customer);
        assert_eq!(UserRole::Customer.to_string(), "ROLE_USER");
    }
}
