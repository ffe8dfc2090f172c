use std::{
    env,
    fs::File,
    io::{Read, Write},
    path::Path,
};

use lazy_static::lazy_static;
use regex::{Captures, Regex};

use crate::manifest::core::Manifest;

pub const YAML_CONFIG_NAME: &str = "mcqload.yaml";

lazy_static! {
    static ref ENV_VARIABLE_REGEX: Regex =
        Regex::new(r"\$\{([^}]+)\}").expect("env variable regex is valid");
    static ref PROJECT_NAME_REGEX: Regex =
        Regex::new(r"^[a-zA-Z][a-zA-Z0-9_]*$").expect("project name regex is valid");
    static ref MODEL_REGEX: Regex =
        Regex::new(r"^[a-z_][a-z0-9_]*\.[a-z_][a-z0-9_]*$").expect("model regex is valid");
    static ref TABLE_NAME_REGEX: Regex =
        Regex::new(r"^[a-zA-Z_][a-zA-Z0-9_]*$").expect("table name regex is valid");
}

#[derive(thiserror::Error, Debug)]
pub enum ValidateManifestError {
    #[error("Invalid project name '{0}': letters, digits and underscores only, and it can not start with a digit")]
    InvalidProjectName(String),

    #[error("Invalid model '{0}': expected the app.model shape like mcq.mcq")]
    InvalidModel(String),

    #[error("Invalid table name '{0}': letters, digits and underscores only")]
    InvalidTableName(String),
}

#[derive(thiserror::Error, Debug)]
pub enum ReadManifestError {
    #[error("Could not open file: {0}")]
    CouldNotOpenFile(#[from] std::io::Error),

    #[error("Could not parse manifest: {0}")]
    CouldNotParseManifest(#[from] serde_yaml::Error),

    #[error("Environment variable {0} not found")]
    MissingEnvVariable(String),

    #[error("Could not validate manifest: {0}")]
    CouldNotValidateManifest(#[from] ValidateManifestError),
}

#[derive(thiserror::Error, Debug)]
pub enum WriteManifestError {
    #[error("Could not parse manifest to yaml: {0}")]
    CouldNotTurnManifestToYamlString(#[from] serde_yaml::Error),

    #[error("Could not create file: {0}")]
    CouldNotCreateFile(#[from] std::io::Error),
}

fn substitute_env_variables(contents: &str) -> Result<String, ReadManifestError> {
    for captures in ENV_VARIABLE_REGEX.captures_iter(contents) {
        let name = &captures[1];
        if env::var(name).is_err() {
            return Err(ReadManifestError::MissingEnvVariable(name.to_string()));
        }
    }

    let result = ENV_VARIABLE_REGEX
        .replace_all(contents, |captures: &Captures| {
            // every variable was checked above
            env::var(&captures[1]).unwrap_or_default()
        })
        .into_owned();

    Ok(result)
}

fn validate_manifest(manifest: &Manifest) -> Result<(), ValidateManifestError> {
    if !PROJECT_NAME_REGEX.is_match(&manifest.name) {
        return Err(ValidateManifestError::InvalidProjectName(manifest.name.clone()));
    }

    if !MODEL_REGEX.is_match(&manifest.model) {
        return Err(ValidateManifestError::InvalidModel(manifest.model.clone()));
    }

    if let Some(table_name) = manifest.storage.postgres_table_name() {
        if !TABLE_NAME_REGEX.is_match(table_name) {
            return Err(ValidateManifestError::InvalidTableName(table_name.to_string()));
        }
    }

    Ok(())
}

pub fn read_manifest(file_path: &Path) -> Result<Manifest, ReadManifestError> {
    let mut file = File::open(file_path)?;
    let mut contents = String::new();

    file.read_to_string(&mut contents)?;

    let contents = substitute_env_variables(&contents)?;

    let manifest: Manifest = serde_yaml::from_str(&contents)?;
    validate_manifest(&manifest)?;

    Ok(manifest)
}

pub fn write_manifest(data: &Manifest, file_path: &Path) -> Result<(), WriteManifestError> {
    let yaml_string = serde_yaml::to_string(data)?;

    let mut file = File::create(file_path)?;
    file.write_all(yaml_string.as_bytes())?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::storage::{PostgresDetails, Storage};

    fn manifest(name: &str) -> Manifest {
        Manifest {
            name: name.to_string(),
            model: "mcq.mcq".to_string(),
            description: None,
            storage: Storage {
                postgres: Some(PostgresDetails {
                    enabled: true,
                    table_name: Some("mcqs".to_string()),
                    disable_create_tables: None,
                }),
            },
            batches: Default::default(),
        }
    }

    #[test]
    fn manifest_round_trips_through_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(YAML_CONFIG_NAME);

        write_manifest(&manifest("qbank"), &path).unwrap();
        let read_back = read_manifest(&path).unwrap();

        assert_eq!(read_back.name, "qbank");
        assert_eq!(read_back.model, "mcq.mcq");
        assert_eq!(read_back.table_name(), "mcqs");
        assert!(read_back.storage.postgres_enabled());
    }

    #[test]
    fn env_variables_are_substituted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(YAML_CONFIG_NAME);

        env::set_var("MCQLOAD_TEST_TABLE", "mcqs_from_env");
        std::fs::write(
            &path,
            r#"
name: qbank
storage:
  postgres:
    enabled: true
    table_name: ${MCQLOAD_TEST_TABLE}
"#,
        )
        .unwrap();

        let read_back = read_manifest(&path).unwrap();
        assert_eq!(read_back.table_name(), "mcqs_from_env");
    }

    #[test]
    fn missing_env_variable_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(YAML_CONFIG_NAME);

        std::fs::write(&path, "name: ${MCQLOAD_TEST_DOES_NOT_EXIST}").unwrap();

        let error = read_manifest(&path).unwrap_err();
        assert!(matches!(error, ReadManifestError::MissingEnvVariable(_)));
    }

    #[test]
    fn invalid_names_fail_validation() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(YAML_CONFIG_NAME);

        write_manifest(&manifest("1bad name"), &path).unwrap();
        let error = read_manifest(&path).unwrap_err();
        assert!(matches!(
            error,
            ReadManifestError::CouldNotValidateManifest(
                ValidateManifestError::InvalidProjectName(_)
            )
        ));

        let mut bad_model = manifest("qbank");
        bad_model.model = "not-a-model".to_string();
        write_manifest(&bad_model, &path).unwrap();
        let error = read_manifest(&path).unwrap_err();
        assert!(matches!(
            error,
            ReadManifestError::CouldNotValidateManifest(ValidateManifestError::InvalidModel(_))
        ));

        let mut bad_table = manifest("qbank");
        bad_table.storage.postgres.as_mut().unwrap().table_name =
            Some("mcqs; drop table".to_string());
        write_manifest(&bad_table, &path).unwrap();
        let error = read_manifest(&path).unwrap_err();
        assert!(matches!(
            error,
            ReadManifestError::CouldNotValidateManifest(
                ValidateManifestError::InvalidTableName(_)
            )
        ));
    }
}
