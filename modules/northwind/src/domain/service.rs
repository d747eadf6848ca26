use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use crate::domain::error::DomainError;
use crate::domain::record::Record;
use crate::domain::repo::{Gateway, RemoveOutcome, SaveOutcome};

/// CRUD rules shared by every record kind.
pub struct ResourceService<R: Record> {
    gateway: Arc<dyn Gateway<R>>,
}

impl<R: Record> Clone for ResourceService<R> {
    fn clone(&self) -> Self {
        Self {
            gateway: Arc::clone(&self.gateway),
        }
    }
}

impl<R: Record> ResourceService<R> {
    pub fn new(gateway: Arc<dyn Gateway<R>>) -> Self {
        Self { gateway }
    }

    #[instrument(skip(self), fields(kind = R::KIND))]
    pub async fn list(&self) -> Result<Vec<R>, DomainError> {
        let items = self.gateway.list().await?;
        debug!("Listed {} records", items.len());
        Ok(items)
    }

    #[instrument(skip(self), fields(kind = R::KIND))]
    pub async fn get(&self, id: i32) -> Result<R, DomainError> {
        self.gateway
            .find(id)
            .await?
            .ok_or_else(|| DomainError::not_found(R::KIND, id))
    }

    #[instrument(skip(self, record), fields(kind = R::KIND, requested_id = record.id()))]
    pub async fn create(&self, record: R) -> Result<R, DomainError> {
        info!("Creating record");
        let created = self.gateway.add(record).await?;
        info!("Created record with id={}", created.id());
        Ok(created)
    }

    /// Replace the whole record stored under `id`.
    ///
    /// Conflict is only decided after the save came back stale: a record that
    /// vanished is `NotFound`, one that is still there is `Conflict`.
    #[instrument(skip(self, record), fields(kind = R::KIND, body_id = record.id()))]
    pub async fn update(&self, id: i32, record: R) -> Result<(), DomainError> {
        if record.id() != id {
            return Err(DomainError::id_mismatch(id, record.id()));
        }

        match self.gateway.save(record).await? {
            SaveOutcome::Saved => {
                info!("Updated record");
                Ok(())
            }
            SaveOutcome::Stale => {
                if self.gateway.exists(id).await? {
                    warn!("Save was stale but record still exists");
                    Err(DomainError::conflict(R::KIND, id))
                } else {
                    Err(DomainError::not_found(R::KIND, id))
                }
            }
        }
    }

    #[instrument(skip(self), fields(kind = R::KIND))]
    pub async fn delete(&self, id: i32) -> Result<(), DomainError> {
        match self.gateway.remove(id).await? {
            RemoveOutcome::Removed => {
                info!("Deleted record");
                Ok(())
            }
            RemoveOutcome::Missing => Err(DomainError::not_found(R::KIND, id)),
            RemoveOutcome::Referenced => {
                debug!("Delete blocked by dependent rows");
                Err(DomainError::referenced(R::KIND, id))
            }
        }
    }
}
