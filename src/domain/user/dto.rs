use super::UserRole;

#[derive(Debug, Clone)]
pub struct CreateUserDto {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub phone: String,
    pub email: String,
    /// Plain-text password; hashed before it reaches the store
    pub password: String,
    pub role: Option<UserRole>,
}

/// Profile edit. The order counter is never part of an edit.
#[derive(Debug, Clone)]
pub struct UpdateUserDto {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub phone: String,
    pub email: String,
    /// Re-hashed and stored only when present and non-empty
    pub password: Option<String>,
}
