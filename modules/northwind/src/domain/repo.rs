use async_trait::async_trait;

use crate::domain::error::DomainError;
use crate::domain::record::Record;

/// Result of a whole-record save.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved,
    /// No row matched the record's key; the version the caller held is gone.
    Stale,
}

/// Result of a remove.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    Removed,
    Missing,
    /// Dependent rows still point at the record; nothing was removed.
    Referenced,
}

/// Persistence port for one record kind.
///
/// Each call is its own unit of work: it either commits or leaves the store untouched.
#[async_trait]
pub trait Gateway<R: Record>: Send + Sync {
    /// All records, ascending by id.
    async fn list(&self) -> Result<Vec<R>, DomainError>;

    async fn find(&self, id: i32) -> Result<Option<R>, DomainError>;

    async fn exists(&self, id: i32) -> Result<bool, DomainError>;

    /// Insert; an unassigned id is picked by the store. Returns the stored record.
    async fn add(&self, record: R) -> Result<R, DomainError>;

    async fn save(&self, record: R) -> Result<SaveOutcome, DomainError>;

    async fn remove(&self, id: i32) -> Result<RemoveOutcome, DomainError>;
}
