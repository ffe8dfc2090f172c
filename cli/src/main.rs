use std::{path::PathBuf, str::FromStr};

use clap::Parser;
use mcqload::load_env_from_project_path;

use crate::cli_interface::{Commands, CLI};
use crate::commands::{
    chunk::handle_chunk_command, import::handle_import_command, init::handle_init_command,
    status::handle_status_command,
};
use crate::console::print_error_message;

mod cli_interface;
mod commands;
mod console;

fn resolve_path(override_path: &Option<String>) -> Result<PathBuf, String> {
    match override_path {
        Some(path) => {
            let path = PathBuf::from_str(path).map_err(|_| "Invalid path provided.".to_string())?;
            Ok(path)
        }
        None => {
            Ok(std::env::current_dir().map_err(|_| "Failed to get current directory.".to_string())?)
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CLI::parse();

    match &cli.command {
        Commands::Init { path } => {
            let resolved_path = resolve_path(path).map_err(|e| {
                print_error_message(&e);
                e
            })?;

            handle_init_command(resolved_path)
        }
        Commands::Import { path, file, dry_run } => {
            let resolved_path = resolve_path(path).map_err(|e| {
                print_error_message(&e);
                e
            })?;
            load_env_from_project_path(&resolved_path);

            handle_import_command(resolved_path, file.clone(), *dry_run).await
        }
        Commands::Chunk { source, path, size } => {
            let resolved_path = resolve_path(path).map_err(|e| {
                print_error_message(&e);
                e
            })?;
            load_env_from_project_path(&resolved_path);

            handle_chunk_command(resolved_path, source.clone(), *size)
        }
        Commands::Status { path } => {
            let resolved_path = resolve_path(path).map_err(|e| {
                print_error_message(&e);
                e
            })?;
            load_env_from_project_path(&resolved_path);

            handle_status_command(resolved_path).await
        }
    }
}
