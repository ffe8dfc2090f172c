/// DDL for the record table. `fields` holds the whole payload as JSONB, the
/// upsert overwrites it wholesale so no per-field columns are needed.
pub fn generate_record_table_sql(table_name: &str) -> String {
    format!(
        r#"
        CREATE TABLE IF NOT EXISTS {table_name} (
            id TEXT PRIMARY KEY,
            fields JSONB NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
        );
        "#
    )
}

/// Upsert keyed on the primary key. `xmax = 0` distinguishes a fresh insert
/// from a conflict-overwrite in the returned row.
pub fn generate_upsert_record_sql(table_name: &str) -> String {
    format!(
        "INSERT INTO {table_name} (id, fields) VALUES ($1, $2) \
         ON CONFLICT (id) DO UPDATE SET fields = EXCLUDED.fields, updated_at = now() \
         RETURNING (xmax = 0) AS created"
    )
}

pub fn generate_count_records_sql(table_name: &str) -> String {
    format!("SELECT COUNT(*) FROM {table_name}")
}

pub fn generate_drop_record_table_sql(table_name: &str) -> String {
    format!("DROP TABLE IF EXISTS {table_name};")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_sql_keys_on_id() {
        let sql = generate_record_table_sql("mcqs");
        assert!(sql.contains("CREATE TABLE IF NOT EXISTS mcqs"));
        assert!(sql.contains("id TEXT PRIMARY KEY"));
        assert!(sql.contains("fields JSONB NOT NULL"));
    }

    #[test]
    fn upsert_sql_overwrites_on_conflict() {
        let sql = generate_upsert_record_sql("mcqs");
        assert!(sql.starts_with("INSERT INTO mcqs (id, fields)"));
        assert!(sql.contains("ON CONFLICT (id) DO UPDATE SET fields = EXCLUDED.fields"));
        assert!(sql.ends_with("RETURNING (xmax = 0) AS created"));
    }
}
