// public
pub mod batch;
pub mod manifest;
pub mod store;

mod record;
pub use record::{FieldMap, FixtureEntry, Record, RecordId};

mod helpers;
pub use helpers::{camel_to_snake, load_env_from_project_path, write_file, WriteFileError};

mod logger;
pub use logger::{setup_info_logger, setup_logger};

pub use store::postgres::{client::PostgresClient, setup::setup_postgres};
pub use store::{BatchStore, MemoryStore, PostgresStore, StoreError, UpsertError, UpsertScope};

// export 3rd party dependencies
pub use async_trait::async_trait;
pub use tracing::{
    error as mcqload_error, info as mcqload_info, warn as mcqload_warn,
};
