use std::path::PathBuf;

use mcqload::manifest::yaml::{read_manifest, YAML_CONFIG_NAME};
use mcqload::{setup_info_logger, setup_postgres};

use crate::console::{print_error_message, print_success_message, print_warn_message};

pub async fn handle_status_command(
    project_path: PathBuf,
) -> Result<(), Box<dyn std::error::Error>> {
    setup_info_logger();

    let manifest = read_manifest(&project_path.join(YAML_CONFIG_NAME)).map_err(|e| {
        print_error_message(&format!("Could not read the {} file: {}", YAML_CONFIG_NAME, e));
        e
    })?;

    if !manifest.storage.postgres_enabled() {
        print_warn_message("Postgres is not enabled for this project, there is nothing to count.");
        return Ok(());
    }

    let store = setup_postgres(&manifest).await.map_err(|e| {
        print_error_message(&format!(
            "Could not connect to Postgres, make sure your connection string is mapped in the .env correctly: {}",
            e
        ));
        e
    })?;

    let count = store.count().await.map_err(|e| {
        print_error_message(&format!("Could not count records: {}", e));
        e
    })?;

    print_success_message(&format!(
        "{} records stored in table {} for {}.",
        count,
        store.table_name(),
        manifest.name
    ));

    Ok(())
}
