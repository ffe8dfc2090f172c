use std::{
    fs,
    fs::File,
    io::Write,
    path::{Path, PathBuf},
};

use dotenv::{dotenv, from_path};

/// Loads `.env` from the project directory, falling back to the process
/// environment when the project has none.
pub fn load_env_from_project_path(project_path: &Path) {
    let env_path = project_path.join(".env");
    if from_path(&env_path).is_err() {
        dotenv().ok();
    }
}

#[derive(thiserror::Error, Debug)]
pub enum WriteFileError {
    #[error("Could not create directory: {0}")]
    CouldNotCreateDir(std::io::Error),

    #[error("Could not create the file: {0}")]
    CouldNotCreateFile(std::io::Error),

    #[error("Could not write to the file: {0}")]
    CouldNotWriteToFile(std::io::Error),
}

pub fn write_file(path: &PathBuf, contents: &str) -> Result<(), WriteFileError> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).map_err(WriteFileError::CouldNotCreateDir)?;
    }

    let mut file = File::create(path).map_err(WriteFileError::CouldNotCreateFile)?;
    file.write_all(contents.as_bytes()).map_err(WriteFileError::CouldNotWriteToFile)?;

    Ok(())
}

pub fn camel_to_snake(s: &str) -> String {
    let mut snake_case = String::new();
    let mut previous_was_uppercase = false;

    for (i, c) in s.chars().enumerate() {
        if c.is_alphanumeric() || c == '_' {
            if c.is_uppercase() {
                if i > 0
                    && (!previous_was_uppercase
                        || s.chars().nth(i + 1).map_or(false, |next| next.is_lowercase()))
                {
                    snake_case.push('_');
                }
                snake_case.push(c.to_ascii_lowercase());
                previous_was_uppercase = true;
            } else {
                snake_case.push(c);
                previous_was_uppercase = false;
            }
        }
    }

    snake_case
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camel_to_snake() {
        assert_eq!(camel_to_snake("CamelCase"), "camel_case");
        assert_eq!(camel_to_snake("Camel-Case"), "camel_case");
        assert_eq!(camel_to_snake("camelCase"), "camel_case");
        assert_eq!(camel_to_snake("camel_case"), "camel_case");
        assert_eq!(camel_to_snake("Camel"), "camel");
        assert_eq!(camel_to_snake("camel"), "camel");
        assert_eq!(camel_to_snake("NeurologyQbank"), "neurology_qbank");
    }

    #[test]
    fn test_write_file_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("file.txt");

        write_file(&path, "contents").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "contents");
    }
}
