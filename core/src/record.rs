use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Field payload of a single record. The loader never looks inside it.
pub type FieldMap = Map<String, Value>;

/// Caller-supplied identifier. Fixture exports carry primary keys either as
/// JSON strings ("99993310") or as plain integers, both must round-trip
/// unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Number(i64),
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Number(value) => write!(f, "{}", value),
            RecordId::Text(value) => write!(f, "{}", value),
        }
    }
}

impl From<i64> for RecordId {
    fn from(value: i64) -> Self {
        RecordId::Number(value)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        RecordId::Text(value.to_string())
    }
}

impl From<String> for RecordId {
    fn from(value: String) -> Self {
        RecordId::Text(value)
    }
}

/// One record of a batch: identifier plus opaque fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    pub fields: FieldMap,
}

impl Record {
    pub fn new(id: impl Into<RecordId>, fields: FieldMap) -> Self {
        Record { id: id.into(), fields }
    }
}

/// One entry of a fixture file as the question bank exports them:
/// `{"model": "mcq.mcq", "pk": ..., "fields": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixtureEntry {
    pub model: String,
    pub pk: RecordId,
    pub fields: FieldMap,
}

impl FixtureEntry {
    pub fn into_record(self) -> Record {
        Record { id: self.pk, fields: self.fields }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn record_id_deserializes_from_string_and_number() {
        let text: RecordId = serde_json::from_value(json!("99993310")).unwrap();
        assert_eq!(text, RecordId::Text("99993310".to_string()));

        let number: RecordId = serde_json::from_value(json!(42)).unwrap();
        assert_eq!(number, RecordId::Number(42));
    }

    #[test]
    fn record_id_round_trips() {
        let id = RecordId::Text("99993310".to_string());
        let encoded = serde_json::to_value(&id).unwrap();
        assert_eq!(encoded, json!("99993310"));

        let id = RecordId::Number(7);
        let encoded = serde_json::to_value(&id).unwrap();
        assert_eq!(encoded, json!(7));
    }

    #[test]
    fn fixture_entry_parses_exported_shape() {
        let entry: FixtureEntry = serde_json::from_value(json!({
            "model": "mcq.mcq",
            "pk": "99993310",
            "fields": {
                "question_text": "Site of lesion in weber syndrome",
                "options": {"A": "Base of midbrain", "B": "tegmentum"},
                "correct_answer": "A"
            }
        }))
        .unwrap();

        assert_eq!(entry.model, "mcq.mcq");
        assert_eq!(entry.pk, RecordId::Text("99993310".to_string()));

        let record = entry.into_record();
        assert_eq!(
            record.fields.get("correct_answer"),
            Some(&Value::String("A".to_string()))
        );
    }

    #[test]
    fn fixture_entry_without_fields_is_rejected() {
        let result: Result<FixtureEntry, _> =
            serde_json::from_value(json!({"model": "mcq.mcq", "pk": 1}));
        assert!(result.is_err());
    }
}
