use clap::Parser;

#[allow(clippy::upper_case_acronyms)]
#[derive(Parser, Debug)]
#[clap(name = "mcqload", about, version)]
pub struct CLI {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Parser, Debug)]
#[clap(version = "1.0", about = "Batch importer for MCQ fixture records", long_about = None)]
pub enum Commands {
    /// Creates a new mcqload project.
    ///
    /// This command initialises a project directory with a mcqload.yaml
    /// manifest, a batches directory and a .env template when postgres
    /// storage is chosen.
    ///
    /// Example:
    /// `mcqload init`
    #[clap(name = "init")]
    Init {
        /// optional - The path to create the project in, default will be where the command is run.
        #[clap(long, short)]
        path: Option<String>,
    },
    /// Imports every batch file found in the project's batches directory.
    ///
    /// Each file is one atomic batch: rejected records are logged and
    /// skipped, a storage failure rolls the whole batch back. Re-running an
    /// import overwrites records in place, it never duplicates them.
    ///
    /// Example:
    /// `mcqload import` or `mcqload import --file batches/chunk_001_of_17.json`
    #[clap(name = "import")]
    Import {
        /// optional - The path to run the command in, default will be where the command is run.
        #[clap(long, short)]
        path: Option<String>,

        /// optional - Import a single batch file instead of the whole batches directory.
        #[clap(long)]
        file: Option<String>,

        /// Run the batches against an in-memory store without touching postgres.
        #[clap(long)]
        dry_run: bool,
    },
    /// Splits a consolidated fixture export into batch files.
    ///
    /// Example:
    /// `mcqload chunk all_mcqs_consolidated.json --size 25`
    #[clap(name = "chunk")]
    Chunk {
        /// The consolidated JSON export to split.
        source: String,

        /// optional - The path to run the command in, default will be where the command is run.
        #[clap(long, short)]
        path: Option<String>,

        /// Records per batch file.
        #[clap(long, default_value_t = 25)]
        size: usize,
    },
    /// Reports how many records are currently stored.
    ///
    /// Example:
    /// `mcqload status`
    #[clap(name = "status")]
    Status {
        /// optional - The path to run the command in, default will be where the command is run.
        #[clap(long, short)]
        path: Option<String>,
    },
}
