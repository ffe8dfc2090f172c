use std::sync::Arc;

use async_trait::async_trait;
use tokio_postgres::types::Json;
use tokio_postgres::{Statement, Transaction};

use crate::batch::runner::{apply_records, BatchResult};
use crate::record::{FieldMap, Record, RecordId};
use crate::store::{BatchStore, StoreError, UpsertError, UpsertScope};

pub mod client;
pub mod generate;
pub mod setup;

use client::{PostgresClient, PostgresError};
use generate::{generate_count_records_sql, generate_upsert_record_sql};

/// Postgres-backed record store. One transaction per batch, one savepoint
/// per record so a rejected record rolls back alone while the batch's
/// transaction survives.
pub struct PostgresStore {
    client: Arc<PostgresClient>,
    table_name: String,
    upsert_sql: String,
}

impl PostgresStore {
    pub fn new(client: Arc<PostgresClient>, table_name: impl Into<String>) -> Self {
        let table_name = table_name.into();
        let upsert_sql = generate_upsert_record_sql(&table_name);
        PostgresStore { client, table_name, upsert_sql }
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    pub async fn count(&self) -> Result<i64, PostgresError> {
        let row =
            self.client.query_one(&generate_count_records_sql(&self.table_name), &[]).await?;
        Ok(row.get(0))
    }
}

fn store_error(error: tokio_postgres::Error) -> StoreError {
    StoreError::Postgres(PostgresError::PgError(error))
}

/// Splits a statement failure into the two tiers the batch contract needs:
/// data exceptions and integrity violations (SQLSTATE classes 22 and 23) are
/// scoped to the offending record, everything else takes the batch down.
fn classify_upsert_error(error: tokio_postgres::Error) -> UpsertError {
    let record_message = error.as_db_error().and_then(|db_error| {
        let code = db_error.code().code();
        if code.starts_with("22") || code.starts_with("23") {
            Some(db_error.message().to_string())
        } else {
            None
        }
    });

    match record_message {
        Some(message) => UpsertError::Record { message },
        None => UpsertError::Store(store_error(error)),
    }
}

struct PostgresScope<'a> {
    transaction: Transaction<'a>,
    statement: Statement,
    savepoints: u32,
}

#[async_trait]
impl UpsertScope for PostgresScope<'_> {
    async fn upsert(&mut self, id: &RecordId, fields: &FieldMap) -> Result<bool, UpsertError> {
        self.savepoints += 1;
        let savepoint = self
            .transaction
            .savepoint(format!("record_{}", self.savepoints))
            .await
            .map_err(store_error)?;

        let id_text = id.to_string();
        match savepoint.query_one(&self.statement, &[&id_text, &Json(fields)]).await {
            Ok(row) => {
                savepoint.commit().await.map_err(store_error)?;
                Ok(row.get::<_, bool>(0))
            }
            Err(e) => match classify_upsert_error(e) {
                UpsertError::Record { message } => {
                    savepoint.rollback().await.map_err(store_error)?;
                    Err(UpsertError::Record { message })
                }
                fatal => Err(fatal),
            },
        }
    }
}

#[async_trait]
impl BatchStore for PostgresStore {
    async fn run_batch(&self, records: &[Record]) -> Result<BatchResult, StoreError> {
        if records.is_empty() {
            return Ok(BatchResult::default());
        }

        let mut conn = self.client.connection().await?;
        let transaction = conn.transaction().await.map_err(store_error)?;
        let statement = transaction.prepare(&self.upsert_sql).await.map_err(store_error)?;

        let mut scope = PostgresScope { transaction, statement, savepoints: 0 };
        // an error drops the transaction, rolling every savepoint back
        let result = apply_records(&mut scope, records).await?;

        scope.transaction.commit().await.map_err(store_error)?;
        Ok(result)
    }
}
