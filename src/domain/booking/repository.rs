//! Booking repository interface

use async_trait::async_trait;

use super::model::{Booking, BookingDraft};
use crate::domain::DomainResult;

#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Find booking by ID
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Booking>>;

    /// Insert a new booking; the store assigns its identity
    async fn insert(&self, draft: BookingDraft) -> DomainResult<Booking>;

    /// Overwrite an existing booking row
    async fn update(&self, booking: Booking) -> DomainResult<Booking>;

    /// Remove a booking; removing a missing id is not an error
    async fn delete_by_id(&self, id: i64) -> DomainResult<()>;

    async fn find_all(&self) -> DomainResult<Vec<Booking>>;

    async fn find_all_by_user_id(&self, user_id: i64) -> DomainResult<Vec<Booking>>;

    async fn find_by_active(&self, active: bool) -> DomainResult<Vec<Booking>>;
}
