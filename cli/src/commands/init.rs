use std::{fs, path::PathBuf};

use mcqload::manifest::core::{BatchesDetails, Manifest};
use mcqload::manifest::storage::{PostgresDetails, Storage};
use mcqload::manifest::yaml::{write_manifest, YAML_CONFIG_NAME};
use mcqload::write_file;

use crate::console::{
    print_error_message, print_success_message, prompt_for_input, prompt_for_input_list,
    prompt_for_optional_input,
};

fn write_env_file(path: &PathBuf) -> Result<(), mcqload::WriteFileError> {
    write_file(
        &path.join(".env"),
        r#"DATABASE_URL=postgresql://[user[:password]@][host][:port][/dbname]
"#,
    )
}

fn write_gitignore(path: &PathBuf) -> Result<(), mcqload::WriteFileError> {
    write_file(&path.join(".gitignore"), ".env\n")
}

pub fn handle_init_command(project_path: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    print_success_message("Initializing new mcqload project...");

    let project_name = prompt_for_input(
        "Project Name",
        Some(r"^[a-zA-Z][a-zA-Z0-9_]*$"),
        Some("No spaces or special characters are allowed, and the first letter cannot be a number"),
        None,
    );

    let project_path = project_path.join(&project_name);
    if project_path.exists() {
        print_error_message("Directory already exists. Please choose a different project name.");
        return Err("Directory already exists.".into());
    }

    let project_description = prompt_for_optional_input::<String>("Project Description", None);
    let storage_choice = prompt_for_input_list(
        "What Storage To Use?",
        &["postgres".to_string(), "none".to_string()],
        None,
    );
    let postgres_enabled = storage_choice == "postgres";

    if let Err(err) = fs::create_dir_all(&project_path) {
        print_error_message(&format!("Failed to create directory: {}", err));
        return Err(err.into());
    }

    let batches = BatchesDetails::default();
    if let Err(err) = fs::create_dir_all(project_path.join(&batches.path)) {
        print_error_message(&format!("Failed to create batches directory: {}", err));
        return Err(err.into());
    }

    let manifest = Manifest {
        name: project_name,
        model: "mcq.mcq".to_string(),
        description: project_description,
        storage: Storage {
            postgres: postgres_enabled.then(|| PostgresDetails {
                enabled: true,
                table_name: None,
                disable_create_tables: None,
            }),
        },
        batches,
    };

    write_manifest(&manifest, &project_path.join(YAML_CONFIG_NAME)).map_err(|e| {
        print_error_message(&format!("Failed to write the {} file: {}", YAML_CONFIG_NAME, e));
        e
    })?;

    if postgres_enabled {
        write_env_file(&project_path).map_err(|e| {
            print_error_message(&format!("Failed to write the .env file: {}", e));
            e
        })?;
        write_gitignore(&project_path).map_err(|e| {
            print_error_message(&format!("Failed to write the .gitignore file: {}", e));
            e
        })?;
    }

    print_success_message(&format!(
        "Project created. Drop batch files into {}/ then run `mcqload import`.",
        manifest.batches.path
    ));

    Ok(())
}
