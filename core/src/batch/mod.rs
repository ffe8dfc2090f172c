pub mod runner;
pub mod source;

pub use runner::{BatchResult, FailedRecord};
pub use source::{
    discover_batch_files, read_batch_file, read_fixture_file, write_chunk_files, Batch,
    BatchSourceError,
};
