use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::{debug, info};

use crate::record::{FixtureEntry, Record};

#[derive(thiserror::Error, Debug)]
pub enum BatchSourceError {
    #[error("Could not read batch file {path}: {source}")]
    CouldNotReadFile { path: PathBuf, source: std::io::Error },

    #[error("Could not parse batch file {path}: {source}")]
    CouldNotParseFile { path: PathBuf, source: serde_json::Error },

    #[error("Could not read batches directory {path}: {source}")]
    CouldNotReadDirectory { path: PathBuf, source: std::io::Error },

    #[error("Could not write chunk file {path}: {source}")]
    CouldNotWriteChunk { path: PathBuf, source: std::io::Error },

    #[error("Could not serialize chunk file {path}: {source}")]
    CouldNotSerializeChunk { path: PathBuf, source: serde_json::Error },
}

/// One batch as read from disk: the records to import plus the count of
/// entries skipped because their model did not match the project's.
#[derive(Debug)]
pub struct Batch {
    pub source: PathBuf,
    pub records: Vec<Record>,
    pub skipped: usize,
}

/// Reads a whole fixture file without filtering. Used when re-chunking a
/// consolidated export.
pub fn read_fixture_file(path: &Path) -> Result<Vec<FixtureEntry>, BatchSourceError> {
    let contents = fs::read_to_string(path).map_err(|source| {
        BatchSourceError::CouldNotReadFile { path: path.to_path_buf(), source }
    })?;

    serde_json::from_str(&contents).map_err(|source| BatchSourceError::CouldNotParseFile {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads one batch file, keeping only entries of `model`. Entries for other
/// models are counted and skipped, the exports mix models occasionally.
pub fn read_batch_file(path: &Path, model: &str) -> Result<Batch, BatchSourceError> {
    let entries = read_fixture_file(path)?;

    let total = entries.len();
    let records: Vec<Record> = entries
        .into_iter()
        .filter(|entry| entry.model == model)
        .map(FixtureEntry::into_record)
        .collect();
    let skipped = total - records.len();

    if skipped > 0 {
        debug!("Skipped {} entries in {} not matching model {}", skipped, path.display(), model);
    }

    Ok(Batch { source: path.to_path_buf(), records, skipped })
}

/// Lists every `*.json` file in the batches directory, sorted by file name
/// so chunked exports import in a stable order.
pub fn discover_batch_files(dir: &Path) -> Result<Vec<PathBuf>, BatchSourceError> {
    let entries = fs::read_dir(dir).map_err(|source| {
        BatchSourceError::CouldNotReadDirectory { path: dir.to_path_buf(), source }
    })?;

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.extension().map_or(false, |extension| extension == "json"))
        .collect();

    files.sort();
    Ok(files)
}

/// Splits a consolidated export into batch files of `chunk_size` entries,
/// written as compact JSON under `out_dir`. Returns the paths written.
pub fn write_chunk_files(
    entries: &[FixtureEntry],
    out_dir: &Path,
    chunk_size: usize,
) -> Result<Vec<PathBuf>, BatchSourceError> {
    if let Err(source) = fs::create_dir_all(out_dir) {
        return Err(BatchSourceError::CouldNotWriteChunk { path: out_dir.to_path_buf(), source });
    }

    let chunk_size = chunk_size.max(1);
    let total_chunks = entries.len().div_ceil(chunk_size);
    let mut written = Vec::with_capacity(total_chunks);

    for (index, chunk) in entries.chunks(chunk_size).enumerate() {
        let path = out_dir.join(format!("chunk_{:03}_of_{}.json", index + 1, total_chunks));

        let contents = serde_json::to_string(chunk).map_err(|source| {
            BatchSourceError::CouldNotSerializeChunk { path: path.clone(), source }
        })?;
        fs::write(&path, &contents).map_err(|source| BatchSourceError::CouldNotWriteChunk {
            path: path.clone(),
            source,
        })?;

        info!(
            "Created {}: {} records, {:.1}KB",
            path.display(),
            chunk.len(),
            contents.len() as f64 / 1024.0
        );
        written.push(path);
    }

    Ok(written)
}
