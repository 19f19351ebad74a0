use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "collate",
    about = "Collate: iterate, count, filter, flatten and merge homogeneous collections",
    version
)]
pub struct Cli {
    /// Handler configuration (TOML); defaults apply when absent
    #[arg(long, global = true, env = "COLLATE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log handler decisions to stderr (overrides COLLATE_LOG)
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print each element as `key<TAB>json`
    Iterate {
        /// Path to a JSON document holding one collection
        input: String,
    },

    /// Print the element count
    Count {
        /// Path to a JSON document holding one collection
        input: String,
    },

    /// Keep the elements whose field equals a JSON value
    Filter {
        /// Path to a JSON document holding one collection
        input: String,

        /// Field read from each element
        #[arg(long)]
        field: String,

        /// JSON value the field must equal
        #[arg(long)]
        equals: String,
    },

    /// Map every element to one of its fields and concatenate the results
    Flatten {
        /// Path to a JSON document holding one collection
        input: String,

        /// Field read from each element; elements without it contribute nothing
        #[arg(long)]
        field: String,
    },

    /// Merge several documents into one value, each named by its file stem
    Merge {
        /// Paths to JSON documents, in candidate order
        #[arg(required = true)]
        inputs: Vec<String>,
    },

    /// Print the effective handler configuration as TOML
    Config,
}
