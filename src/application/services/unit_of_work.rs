//! Unit-of-work finalisation shared by the services

use tracing::warn;

use crate::domain::{DomainResult, UnitOfWork};

/// Commit on success, roll back on failure. The operation's own error wins
/// over a failed rollback.
pub(crate) async fn finish<T>(uow: Box<dyn UnitOfWork>, result: DomainResult<T>) -> DomainResult<T> {
    match result {
        Ok(value) => {
            uow.commit().await?;
            Ok(value)
        }
        Err(e) => {
            if let Err(rollback_err) = uow.rollback().await {
                warn!("Rollback failed after '{}': {}", e, rollback_err);
            }
            Err(e)
        }
    }
}

/// Read-only units never commit.
pub(crate) async fn finish_read<T>(
    uow: Box<dyn UnitOfWork>,
    result: DomainResult<T>,
) -> DomainResult<T> {
    if let Err(e) = uow.rollback().await {
        warn!("Failed to close read-only unit of work: {}", e);
    }
    result
}
