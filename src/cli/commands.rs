//! CLI command definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "storyset")]
#[command(about = "Collect image + sentence pairs for graded reading datasets", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new workspace
    Init {
        /// Directory to initialize (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Application id used to namespace the collection
        #[arg(long)]
        app_id: Option<String>,
    },

    /// Save a new entry
    Add {
        /// Image file to attach
        #[arg(short, long)]
        image: PathBuf,

        /// The sentence written for the image
        #[arg(short, long)]
        sentence: String,

        /// Grade level (e.g. "Grade 2" or 2); defaults to the configured grade
        #[arg(short, long)]
        grade: Option<String>,
    },

    /// List entries, newest first
    List {
        /// Show at most this many entries
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },

    /// Delete an entry by id
    Delete {
        /// Entry id as shown by `list`
        id: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Export all entries (json or csv)
    Export {
        /// Output format: json, csv
        format: String,

        /// Directory to write into (default: workspace root)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Print the entry list every time it changes
    Watch {
        /// Stop after this many updates
        #[arg(short, long)]
        count: Option<usize>,
    },

    /// View or modify configuration
    Config {
        /// Config key to get or set
        key: Option<String>,

        /// Value to set (if provided, sets the key)
        value: Option<String>,

        /// List all configuration
        #[arg(short, long)]
        list: bool,
    },
}
