//! User DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::{CreateUserDto, UpdateUserDto, User, UserRole};

/// User API representation. The password hash never leaves the service.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserDto {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub phone: String,
    pub email: String,
    /// Number of bookings made by this user
    pub no_of_orders: i32,
    /// `ROLE_USER` or `ROLE_ADMIN`
    pub role: String,
}

impl From<User> for UserDto {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            first_name: u.first_name,
            last_name: u.last_name,
            username: u.username,
            phone: u.phone,
            email: u.email,
            no_of_orders: u.no_of_orders,
            role: u.role.as_str().to_string(),
        }
    }
}

/// Create user request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, max = 50))]
    pub first_name: String,
    #[validate(length(min = 1, max = 50))]
    pub last_name: String,
    #[validate(length(min = 3, max = 50))]
    pub username: String,
    #[validate(length(min = 1, max = 20))]
    pub phone: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
    /// `admin` for an administrator; anything else is a customer
    pub role: Option<String>,
}

impl From<CreateUserRequest> for CreateUserDto {
    fn from(r: CreateUserRequest) -> Self {
        CreateUserDto {
            first_name: r.first_name,
            last_name: r.last_name,
            username: r.username,
            phone: r.phone,
            email: r.email,
            password: r.password,
            role: r.role.as_deref().map(UserRole::parse),
        }
    }
}

/// Update user request. An empty or missing password keeps the current one.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, max = 50))]
    pub first_name: String,
    #[validate(length(min = 1, max = 50))]
    pub last_name: String,
    #[validate(length(min = 3, max = 50))]
    pub username: String,
    #[validate(length(min = 1, max = 20))]
    pub phone: String,
    #[validate(email)]
    pub email: String,
    pub password: Option<String>,
}

impl From<UpdateUserRequest> for UpdateUserDto {
    fn from(r: UpdateUserRequest) -> Self {
        UpdateUserDto {
            first_name: r.first_name,
            last_name: r.last_name,
            username: r.username,
            phone: r.phone,
            email: r.email,
            password: r.password,
        }
    }
}
