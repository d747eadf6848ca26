use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection,
    DatabaseTransaction, DbBackend, DbErr, EntityName, EntityTrait, IdenStatic, IntoActiveModel,
    QueryFilter, QueryOrder, SqlErr, Statement, TransactionTrait,
};
use tracing::debug;

use crate::domain::error::DomainError;
use crate::domain::record::Record;
use crate::domain::repo::{Gateway, RemoveOutcome, SaveOutcome};

/// Binds a domain record to its `SeaORM` entity.
pub trait StoredRecord: Record {
    type Entity: EntityTrait;
    type ActiveModel: ActiveModelTrait<Entity = Self::Entity> + ActiveModelBehavior + Send + 'static;

    fn id_column() -> <Self::Entity as EntityTrait>::Column;

    fn from_model(model: <Self::Entity as EntityTrait>::Model) -> Self;

    /// Every column set; the key stays `NotSet` while unassigned.
    fn to_active_model(&self) -> Self::ActiveModel;
}

/// Counts rows that would be orphaned by deleting a record.
#[async_trait]
pub trait DependentsProbe: Send + Sync {
    fn name(&self) -> &'static str;

    async fn count(&self, txn: &DatabaseTransaction, id: i32) -> Result<u64, DbErr>;
}

pub(crate) fn db_err(e: DbErr) -> DomainError {
    DomainError::database(e.to_string())
}

fn is_unique_violation(e: &DbErr) -> bool {
    matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

fn is_foreign_key_violation(e: &DbErr) -> bool {
    matches!(e.sql_err(), Some(SqlErr::ForeignKeyConstraintViolation(_)))
}

/// Moves a Postgres identity sequence past the highest stored key.
///
/// Rows inserted with an explicit key do not advance the sequence, so the next
/// generated key could collide with them. The sequence never moves backwards.
/// Other backends derive the next key from the table itself and need nothing.
fn id_sequence_sync(backend: DbBackend, table: &str, column: &str) -> Option<Statement> {
    if backend != DbBackend::Postgres {
        return None;
    }
    let seq = format!("pg_get_serial_sequence('{table}', '{column}')");
    Some(Statement::from_string(
        backend,
        format!(
            r#"SELECT setval({seq}, GREATEST((SELECT MAX("{column}") FROM "{table}"), nextval({seq}) - 1, 1))"#
        ),
    ))
}

pub(crate) async fn sync_id_sequence<R, C>(conn: &C) -> Result<(), DbErr>
where
    R: StoredRecord,
    C: ConnectionTrait,
{
    let entity = R::Entity::default();
    let column = R::id_column();
    let backend = conn.get_database_backend();
    if let Some(stmt) = id_sequence_sync(backend, entity.table_name(), column.as_str()) {
        conn.execute(stmt).await?;
    }
    Ok(())
}

/// `SeaORM` implementation of [`Gateway`] for any [`StoredRecord`].
pub struct SeaGateway<R: StoredRecord> {
    db: DatabaseConnection,
    dependents: Vec<Arc<dyn DependentsProbe>>,
    _record: PhantomData<fn() -> R>,
}

impl<R: StoredRecord> SeaGateway<R> {
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            dependents: Vec::new(),
            _record: PhantomData,
        }
    }

    /// Deletes are refused while `probe` finds rows pointing at the record.
    #[must_use]
    pub fn with_dependents(mut self, probe: Arc<dyn DependentsProbe>) -> Self {
        self.dependents.push(probe);
        self
    }

    async fn find_in<C>(conn: &C, id: i32) -> Result<Option<R>, DbErr>
    where
        C: sea_orm::ConnectionTrait,
    {
        let found = R::Entity::find()
            .filter(R::id_column().eq(id))
            .one(conn)
            .await?;
        Ok(found.map(R::from_model))
    }
}

#[async_trait]
impl<R> Gateway<R> for SeaGateway<R>
where
    R: StoredRecord,
    <R::Entity as EntityTrait>::Model: IntoActiveModel<R::ActiveModel>,
{
    async fn list(&self) -> Result<Vec<R>, DomainError> {
        let rows = R::Entity::find()
            .order_by_asc(R::id_column())
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(rows.into_iter().map(R::from_model).collect())
    }

    async fn find(&self, id: i32) -> Result<Option<R>, DomainError> {
        Self::find_in(&self.db, id).await.map_err(db_err)
    }

    async fn exists(&self, id: i32) -> Result<bool, DomainError> {
        Ok(self.find(id).await?.is_some())
    }

    async fn add(&self, record: R) -> Result<R, DomainError> {
        let requested = record.id();
        let txn = self.db.begin().await.map_err(db_err)?;

        let model = match record.to_active_model().insert(&txn).await {
            Ok(model) => model,
            Err(e) if is_unique_violation(&e) => {
                return Err(DomainError::already_exists(R::KIND, requested));
            }
            Err(e) => return Err(db_err(e)),
        };
        if record.has_assigned_id() {
            sync_id_sequence::<R, _>(&txn).await.map_err(db_err)?;
        }

        txn.commit().await.map_err(db_err)?;
        Ok(R::from_model(model))
    }

    async fn save(&self, record: R) -> Result<SaveOutcome, DomainError> {
        let id = record.id();
        let mut am = record.to_active_model();
        am.not_set(R::id_column());

        let res = R::Entity::update_many()
            .set(am)
            .filter(R::id_column().eq(id))
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        if res.rows_affected == 0 {
            debug!(kind = R::KIND, id, "Save matched no rows");
            Ok(SaveOutcome::Stale)
        } else {
            Ok(SaveOutcome::Saved)
        }
    }

    async fn remove(&self, id: i32) -> Result<RemoveOutcome, DomainError> {
        // Uncommitted transactions roll back on drop.
        let txn = self.db.begin().await.map_err(db_err)?;

        if Self::find_in(&txn, id).await.map_err(db_err)?.is_none() {
            return Ok(RemoveOutcome::Missing);
        }

        for probe in &self.dependents {
            let count = probe.count(&txn, id).await.map_err(db_err)?;
            if count > 0 {
                debug!(kind = R::KIND, id, probe = probe.name(), count, "Delete blocked");
                return Ok(RemoveOutcome::Referenced);
            }
        }

        let res = R::Entity::delete_many()
            .filter(R::id_column().eq(id))
            .exec(&txn)
            .await;

        match res {
            Ok(r) if r.rows_affected == 0 => Ok(RemoveOutcome::Missing),
            Ok(_) => {
                txn.commit().await.map_err(db_err)?;
                Ok(RemoveOutcome::Removed)
            }
            Err(e) if is_foreign_key_violation(&e) => Ok(RemoveOutcome::Referenced),
            Err(e) => Err(db_err(e)),
        }
    }
}
