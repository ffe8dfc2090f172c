use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::batch::runner::{apply_records, BatchResult};
use crate::record::{FieldMap, Record, RecordId};
use crate::store::{BatchStore, StoreError, UpsertError, UpsertScope};

/// In-memory backend. Backs `--dry-run` imports and doubles as the reference
/// implementation of the upsert contract in tests.
///
/// A batch is applied to a staged copy of the rows and only swapped in once
/// the whole batch went through, so store-level failures leave the previous
/// state visible just like a rolled-back transaction would.
#[derive(Debug, Default)]
pub struct MemoryStore {
    rows: Mutex<HashMap<RecordId, FieldMap>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn count(&self) -> usize {
        self.rows.lock().await.len()
    }

    pub async fn get(&self, id: &RecordId) -> Option<FieldMap> {
        self.rows.lock().await.get(id).cloned()
    }
}

struct MemoryScope<'a> {
    staged: &'a mut HashMap<RecordId, FieldMap>,
}

#[async_trait]
impl UpsertScope for MemoryScope<'_> {
    async fn upsert(&mut self, id: &RecordId, fields: &FieldMap) -> Result<bool, UpsertError> {
        if matches!(id, RecordId::Text(text) if text.is_empty()) {
            return Err(UpsertError::record("record id must not be empty"));
        }

        Ok(self.staged.insert(id.clone(), fields.clone()).is_none())
    }
}

#[async_trait]
impl BatchStore for MemoryStore {
    async fn run_batch(&self, records: &[Record]) -> Result<BatchResult, StoreError> {
        if records.is_empty() {
            return Ok(BatchResult::default());
        }

        let mut rows = self.rows.lock().await;
        let mut staged = rows.clone();

        let result = apply_records(&mut MemoryScope { staged: &mut staged }, records).await?;

        *rows = staged;
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(pairs: &[(&str, &str)]) -> FieldMap {
        let mut map = FieldMap::new();
        for (key, value) in pairs {
            map.insert(key.to_string(), json!(value));
        }
        map
    }

    #[tokio::test]
    async fn inserts_new_records_with_given_fields() {
        let store = MemoryStore::new();
        let records = vec![
            Record::new(1, fields(&[("q", "x")])),
            Record::new(2, fields(&[("q", "y")])),
        ];

        let result = store.run_batch(&records).await.unwrap();

        assert_eq!(result.attempted, 2);
        assert_eq!(result.succeeded(), 2);
        assert!(result.failed.is_empty());
        assert_eq!(store.get(&RecordId::Number(1)).await, Some(fields(&[("q", "x")])));
        assert_eq!(store.get(&RecordId::Number(2)).await, Some(fields(&[("q", "y")])));
    }

    #[tokio::test]
    async fn existing_record_is_wholly_replaced_not_merged() {
        let store = MemoryStore::new();
        store
            .run_batch(&[Record::new(1, fields(&[("q", "old"), ("stale", "keep?")]))])
            .await
            .unwrap();

        let result = store.run_batch(&[Record::new(1, fields(&[("q", "x")]))]).await.unwrap();

        assert_eq!(result.created, 0);
        assert_eq!(result.updated, 1);
        // no merge: the stale field is gone
        assert_eq!(store.get(&RecordId::Number(1)).await, Some(fields(&[("q", "x")])));
    }

    #[tokio::test]
    async fn rerunning_a_batch_changes_nothing() {
        let store = MemoryStore::new();
        let records = vec![
            Record::new(1, fields(&[("q", "x")])),
            Record::new(2, fields(&[("q", "y")])),
        ];

        let first = store.run_batch(&records).await.unwrap();
        assert_eq!(first.created, 2);

        let second = store.run_batch(&records).await.unwrap();
        assert_eq!(second.created, 0);
        assert_eq!(second.updated, 2);

        assert_eq!(store.count().await, 2);
        assert_eq!(store.get(&RecordId::Number(1)).await, Some(fields(&[("q", "x")])));
        assert_eq!(store.get(&RecordId::Number(2)).await, Some(fields(&[("q", "y")])));
    }

    #[tokio::test]
    async fn rejected_record_does_not_stop_the_rest() {
        let store = MemoryStore::new();
        let records = vec![
            Record::new(1, fields(&[("q", "x")])),
            Record::new("", fields(&[("q", "broken")])),
            Record::new(3, fields(&[("q", "z")])),
        ];

        let result = store.run_batch(&records).await.unwrap();

        assert_eq!(result.attempted, 3);
        assert_eq!(result.succeeded(), 2);
        assert_eq!(result.failed.len(), 1);
        assert_eq!(result.failed[0].id, RecordId::Text(String::new()));
        assert_eq!(store.count().await, 2);
        assert_eq!(store.get(&RecordId::Number(3)).await, Some(fields(&[("q", "z")])));
    }

    #[tokio::test]
    async fn string_and_number_ids_are_distinct_keys() {
        let store = MemoryStore::new();
        let records = vec![
            Record::new(7, fields(&[("q", "number")])),
            Record::new("7", fields(&[("q", "text")])),
        ];

        let result = store.run_batch(&records).await.unwrap();

        assert_eq!(result.created, 2);
        assert_eq!(store.count().await, 2);
    }

    #[tokio::test]
    async fn empty_batch_leaves_the_store_untouched() {
        let store = MemoryStore::new();
        store.run_batch(&[Record::new(1, fields(&[("q", "x")]))]).await.unwrap();

        let result = store.run_batch(&[]).await.unwrap();

        assert_eq!(result, BatchResult::default());
        assert_eq!(store.count().await, 1);
    }
}
