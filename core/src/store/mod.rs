use async_trait::async_trait;

use crate::batch::runner::BatchResult;
use crate::record::{FieldMap, Record, RecordId};

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PostgresStore;

use postgres::client::{PostgresConnectionError, PostgresError};

/// A failure of the storage layer itself. Aborts the batch and rolls the
/// whole transaction back.
#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("{0}")]
    PostgresConnection(#[from] PostgresConnectionError),

    #[error("{0}")]
    Postgres(#[from] PostgresError),

    #[error("Storage backend rejected the batch: {0}")]
    Backend(String),
}

/// Outcome of a single upsert that did not go through.
#[derive(thiserror::Error, Debug)]
pub enum UpsertError {
    /// One record was rejected. The batch keeps going without it.
    #[error("{message}")]
    Record { message: String },

    /// The storage layer failed. The batch aborts.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl UpsertError {
    pub fn record(message: impl Into<String>) -> Self {
        UpsertError::Record { message: message.into() }
    }
}

/// A store view scoped to one in-flight batch. Every upsert runs inside the
/// batch's transaction.
#[async_trait]
pub trait UpsertScope: Send {
    /// Writes `fields` under `id`, wholly replacing any existing row.
    /// Returns true when a new row was created.
    async fn upsert(&mut self, id: &RecordId, fields: &FieldMap) -> Result<bool, UpsertError>;
}

/// A persistence backend able to apply record batches atomically.
#[async_trait]
pub trait BatchStore {
    /// Applies one batch under a single transaction scope. Record-level
    /// rejections are collected in the result; a `StoreError` means nothing
    /// from this batch was persisted.
    async fn run_batch(&self, records: &[Record]) -> Result<BatchResult, StoreError>;
}
