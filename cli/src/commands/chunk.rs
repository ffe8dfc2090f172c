use std::path::PathBuf;

use mcqload::batch::{read_fixture_file, write_chunk_files};
use mcqload::manifest::yaml::{read_manifest, YAML_CONFIG_NAME};
use mcqload::setup_info_logger;

use crate::console::{print_error_message, print_success_message, print_warn_message};

pub fn handle_chunk_command(
    project_path: PathBuf,
    source: String,
    chunk_size: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    setup_info_logger();

    let manifest = read_manifest(&project_path.join(YAML_CONFIG_NAME)).map_err(|e| {
        print_error_message(&format!("Could not read the {} file: {}", YAML_CONFIG_NAME, e));
        e
    })?;

    let entries = read_fixture_file(&project_path.join(&source)).map_err(|e| {
        print_error_message(&format!("Could not read the consolidated export: {}", e));
        e
    })?;

    if entries.is_empty() {
        print_warn_message("The consolidated export holds no entries, nothing to chunk.");
        return Ok(());
    }

    let written =
        write_chunk_files(&entries, &project_path.join(&manifest.batches.path), chunk_size)
            .map_err(|e| {
                print_error_message(&format!("Could not write chunk files: {}", e));
                e
            })?;

    print_success_message(&format!(
        "Split {} entries into {} batch files in {}.",
        entries.len(),
        written.len(),
        manifest.batches.path
    ));

    Ok(())
}
