use tracing::warn;

use crate::record::{Record, RecordId};
use crate::store::{StoreError, UpsertError, UpsertScope};

/// One record the store turned away, with the reason it gave.
#[derive(Debug, Clone, PartialEq)]
pub struct FailedRecord {
    pub id: RecordId,
    pub error: String,
}

/// Aggregate outcome of one batch run.
///
/// `succeeded() + failed.len()` always equals `attempted`, and `attempted`
/// always equals the number of records handed to the store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchResult {
    pub attempted: usize,
    pub created: usize,
    pub updated: usize,
    pub failed: Vec<FailedRecord>,
}

impl BatchResult {
    pub fn succeeded(&self) -> usize {
        self.created + self.updated
    }

    pub fn summary(&self) -> String {
        format!(
            "Successfully imported {}/{} records ({} created, {} updated, {} failed)",
            self.succeeded(),
            self.attempted,
            self.created,
            self.updated,
            self.failed.len()
        )
    }
}

/// Drives one batch through an open scope: upsert each record exactly once,
/// in order, with no retries. Record-level rejections are logged and
/// collected; a store-level failure returns immediately so the caller can
/// abandon the transaction.
pub(crate) async fn apply_records<S>(
    scope: &mut S,
    records: &[Record],
) -> Result<BatchResult, StoreError>
where
    S: UpsertScope + ?Sized,
{
    let mut result = BatchResult { attempted: records.len(), ..Default::default() };

    for record in records {
        match scope.upsert(&record.id, &record.fields).await {
            Ok(true) => result.created += 1,
            Ok(false) => result.updated += 1,
            Err(UpsertError::Record { message }) => {
                warn!("Error importing record {}: {}", record.id, message);
                result.failed.push(FailedRecord { id: record.id.clone(), error: message });
            }
            Err(UpsertError::Store(e)) => return Err(e),
        }
    }

    Ok(result)
}
