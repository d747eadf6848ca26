#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::collections::{BTreeMap, HashSet};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use sea_orm::{Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;

use crate::domain::error::DomainError;
use crate::domain::record::Record;
use crate::domain::repo::{Gateway, RemoveOutcome, SaveOutcome};

pub async fn inmem_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to connect to in-memory database");

    crate::infra::storage::migrations::Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

/// Map-backed gateway with knobs for the paths SQLite can't easily reproduce.
pub struct InMemoryGateway<R: Record> {
    rows: Mutex<BTreeMap<i32, R>>,
    dependents: Mutex<HashSet<i32>>,
    stale_saves: AtomicBool,
}

impl<R: Record> InMemoryGateway<R> {
    pub fn new() -> Self {
        Self {
            rows: Mutex::new(BTreeMap::new()),
            dependents: Mutex::new(HashSet::new()),
            stale_saves: AtomicBool::new(false),
        }
    }

    /// Every subsequent save reports `Stale`, as if another writer got there first.
    pub fn force_stale_saves(&self) {
        self.stale_saves.store(true, Ordering::SeqCst);
    }

    pub fn add_dependent(&self, id: i32) {
        self.dependents.lock().unwrap().insert(id);
    }
}

#[async_trait]
impl<R: Record> Gateway<R> for InMemoryGateway<R> {
    async fn list(&self) -> Result<Vec<R>, DomainError> {
        Ok(self.rows.lock().unwrap().values().cloned().collect())
    }

    async fn find(&self, id: i32) -> Result<Option<R>, DomainError> {
        Ok(self.rows.lock().unwrap().get(&id).cloned())
    }

    async fn exists(&self, id: i32) -> Result<bool, DomainError> {
        Ok(self.rows.lock().unwrap().contains_key(&id))
    }

    async fn add(&self, record: R) -> Result<R, DomainError> {
        let mut rows = self.rows.lock().unwrap();
        let record = if record.has_assigned_id() {
            if rows.contains_key(&record.id()) {
                return Err(DomainError::already_exists(R::KIND, record.id()));
            }
            record
        } else {
            let next = rows.keys().next_back().map_or(1, |max| max + 1);
            record.with_id(next)
        };
        rows.insert(record.id(), record.clone());
        Ok(record)
    }

    async fn save(&self, record: R) -> Result<SaveOutcome, DomainError> {
        if self.stale_saves.load(Ordering::SeqCst) {
            return Ok(SaveOutcome::Stale);
        }
        let mut rows = self.rows.lock().unwrap();
        match rows.get_mut(&record.id()) {
            Some(slot) => {
                *slot = record;
                Ok(SaveOutcome::Saved)
            }
            None => Ok(SaveOutcome::Stale),
        }
    }

    async fn remove(&self, id: i32) -> Result<RemoveOutcome, DomainError> {
        if self.dependents.lock().unwrap().contains(&id) {
            return Ok(if self.rows.lock().unwrap().contains_key(&id) {
                RemoveOutcome::Referenced
            } else {
                RemoveOutcome::Missing
            });
        }
        Ok(match self.rows.lock().unwrap().remove(&id) {
            Some(_) => RemoveOutcome::Removed,
            None => RemoveOutcome::Missing,
        })
    }
}
