use std::fmt;

use sea_orm::{sqlx, DbErr, RuntimeErr};
use thiserror::Error;

/// The kind of record a lookup failed to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    User,
    Car,
    Booking,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "User",
            Self::Car => "Car",
            Self::Booking => "Booking",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("{entity} {id} not found")]
    NotFound { entity: EntityKind, id: i64 },

    #[error("Validation: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl DomainError {
    pub fn not_found(entity: EntityKind, id: i64) -> Self {
        Self::NotFound { entity, id }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, DomainError::NotFound { .. })
    }
}

impl From<DbErr> for DomainError {
    fn from(e: DbErr) -> Self {
        if is_lock_contention(&e) {
            return DomainError::Conflict(format!("Concurrent write rejected: {}", e));
        }
        DomainError::Storage(e.to_string())
    }
}

/// SQLite refuses a second writer with SQLITE_BUSY (5) or SQLITE_LOCKED (6),
/// possibly carried in an extended result code such as BUSY_SNAPSHOT (517).
fn is_lock_contention(e: &DbErr) -> bool {
    let sqlx_err = match e {
        DbErr::Conn(RuntimeErr::SqlxError(err))
        | DbErr::Exec(RuntimeErr::SqlxError(err))
        | DbErr::Query(RuntimeErr::SqlxError(err)) => err,
        _ => return false,
    };
    match sqlx_err {
        sqlx::Error::Database(db) => db
            .code()
            .and_then(|code| code.parse::<i32>().ok())
            .is_some_and(|code| matches!(code & 0xff, 5 | 6)),
        _ => false,
    }
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_entity_and_id() {
        let e = DomainError::not_found(EntityKind::Car, 42);
        assert_eq!(e.to_string(), "Car 42 not found");
        assert!(e.is_not_found());
    }

    #[test]
    fn non_database_errors_stay_storage() {
        let e: DomainError = DbErr::Custom("disk full".into()).into();
        assert!(matches!(e, DomainError::Storage(_)));

        let e: DomainError = DbErr::RecordNotInserted.into();
        assert!(matches!(e, DomainError::Storage(_)));
    }
}
