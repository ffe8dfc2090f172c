use std::sync::Arc;

use tracing::{debug, info};

use crate::manifest::core::Manifest;
use crate::store::postgres::client::{PostgresClient, PostgresConnectionError, PostgresError};
use crate::store::postgres::generate::generate_record_table_sql;
use crate::store::postgres::PostgresStore;

#[derive(thiserror::Error, Debug)]
pub enum SetupPostgresError {
    #[error("{0}")]
    PostgresConnection(#[from] PostgresConnectionError),

    #[error("{0}")]
    PostgresError(#[from] PostgresError),
}

pub async fn setup_postgres(manifest: &Manifest) -> Result<PostgresStore, SetupPostgresError> {
    info!("Setting up postgres");
    let client = PostgresClient::new().await?;

    let table_name = manifest.table_name();
    if !manifest.storage.postgres_disable_create_tables() {
        let sql = generate_record_table_sql(&table_name);
        debug!("{}", sql);
        client.batch_execute(&sql).await?;
        info!("Created record table for {}", manifest.name);
    }

    Ok(PostgresStore::new(Arc::new(client), table_name))
}
