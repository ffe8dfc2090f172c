use std::path::PathBuf;

use mcqload::batch::{discover_batch_files, read_batch_file, BatchResult};
use mcqload::manifest::yaml::{read_manifest, YAML_CONFIG_NAME};
use mcqload::{
    mcqload_info, setup_info_logger, setup_postgres, BatchStore, MemoryStore,
};

use crate::console::{print_error_message, print_success_message, print_warn_message};

pub async fn handle_import_command(
    project_path: PathBuf,
    file: Option<String>,
    dry_run: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    setup_info_logger();

    let manifest = read_manifest(&project_path.join(YAML_CONFIG_NAME)).map_err(|e| {
        print_error_message(&format!("Could not read the {} file: {}", YAML_CONFIG_NAME, e));
        e
    })?;

    let store: Box<dyn BatchStore + Send + Sync> =
        if dry_run || !manifest.storage.postgres_enabled() {
            if !dry_run {
                print_warn_message(
                    "Postgres is not enabled for this project, records will only be parsed and counted.",
                );
            }
            Box::new(MemoryStore::new())
        } else {
            Box::new(setup_postgres(&manifest).await.map_err(|e| {
                print_error_message(&format!("Could not set up postgres: {}", e));
                e
            })?)
        };

    let batch_files = match file {
        Some(file) => vec![project_path.join(file)],
        None => discover_batch_files(&project_path.join(&manifest.batches.path))?,
    };

    if batch_files.is_empty() {
        print_warn_message(&format!(
            "No batch files found in {}, nothing to import.",
            manifest.batches.path
        ));
        return Ok(());
    }

    let mut totals = BatchResult::default();
    let mut skipped = 0;
    let mut aborted: Vec<String> = vec![];

    for path in &batch_files {
        let batch_name = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());

        let batch = match read_batch_file(path, &manifest.model) {
            Ok(batch) => batch,
            Err(e) => {
                print_error_message(&format!("Batch {} could not be read: {}", batch_name, e));
                aborted.push(batch_name);
                continue;
            }
        };
        skipped += batch.skipped;

        match store.run_batch(&batch.records).await {
            Ok(result) => {
                mcqload_info!("Batch {}: {}", batch_name, result.summary());
                totals.attempted += result.attempted;
                totals.created += result.created;
                totals.updated += result.updated;
                totals.failed.extend(result.failed);
            }
            Err(e) => {
                print_error_message(&format!(
                    "Batch {} failed and was rolled back: {}",
                    batch_name, e
                ));
                aborted.push(batch_name);
            }
        }
    }

    if skipped > 0 {
        mcqload_info!("Skipped {} entries not matching model {}", skipped, manifest.model);
    }

    print_success_message(&format!(
        "{} across {} batches{}",
        totals.summary(),
        batch_files.len() - aborted.len(),
        if dry_run { " (dry run, nothing persisted)" } else { "" }
    ));

    if !aborted.is_empty() {
        return Err(format!(
            "{} of {} batches were not applied: {}",
            aborted.len(),
            batch_files.len(),
            aborted.join(", ")
        )
        .into());
    }

    Ok(())
}
