use serde::{Deserialize, Serialize};

use crate::helpers::camel_to_snake;
use crate::manifest::storage::Storage;

fn default_model() -> String {
    "mcq.mcq".to_string()
}

fn default_batches_path() -> String {
    "./batches".to_string()
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct BatchesDetails {
    /// Directory of batch files, relative to the project root.
    #[serde(default = "default_batches_path")]
    pub path: String,
}

impl Default for BatchesDetails {
    fn default() -> Self {
        BatchesDetails { path: default_batches_path() }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Manifest {
    pub name: String,

    /// Fixture model this project imports. Entries carrying any other model
    /// are skipped, not failed.
    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    pub storage: Storage,

    #[serde(default)]
    pub batches: BatchesDetails,
}

impl Manifest {
    pub fn table_name(&self) -> String {
        match self.storage.postgres_table_name() {
            Some(table_name) => table_name.to_string(),
            None => camel_to_snake(&self.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_name_defaults_to_snake_case_project_name() {
        let manifest: Manifest =
            serde_yaml::from_str("name: NeurologyQbank").expect("manifest parses");
        assert_eq!(manifest.table_name(), "neurology_qbank");
        assert_eq!(manifest.model, "mcq.mcq");
        assert_eq!(manifest.batches.path, "./batches");
    }

    #[test]
    fn explicit_table_name_wins() {
        let manifest: Manifest = serde_yaml::from_str(
            r#"
name: qbank
storage:
  postgres:
    enabled: true
    table_name: mcqs
"#,
        )
        .expect("manifest parses");
        assert_eq!(manifest.table_name(), "mcqs");
    }
}
