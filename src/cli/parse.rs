//! CLI parse: clap types for merklehash. No behavior; definitions only.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// merklehash - Merkle digests of directory trees
#[derive(Parser, Debug)]
#[command(name = "merklehash")]
#[command(about = "Generate a single digest for an arbitrarily deep directory hierarchy")]
#[command(args_conflicts_with_subcommands = true)]
#[command(after_help = "Run `merklehash algorithms` to list supported algorithms.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub hash: HashArgs,

    /// Configuration file path (overrides default config loading)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable logging at debug level on stderr (default: off)
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off); enables logging
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    /// Log output (stderr, stdout, file)
    #[arg(long, global = true)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Hash a directory (default when no subcommand is given)
    Hash(HashArgs),
    /// List supported algorithms
    Algorithms {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct HashArgs {
    /// Directory to hash
    pub path: Option<PathBuf>,

    /// Hashing algorithm to use (default: sha256)
    #[arg(short, long)]
    pub algorithm: Option<String>,

    /// Print only the hex digest, without the path
    #[arg(long)]
    pub raw: bool,

    /// Output format (text or json)
    #[arg(long, default_value = "text")]
    pub format: String,

    /// Hash one entry at a time instead of concurrently
    #[arg(long)]
    pub serial: bool,

    /// Maximum number of files open at once (0 = unbounded)
    #[arg(long)]
    pub max_open_files: Option<usize>,

    /// Cancel hashing after this many milliseconds
    #[arg(long)]
    pub timeout_ms: Option<u64>,
}

impl Cli {
    /// The command to run; a bare path means `hash`.
    pub fn resolved_command(&self) -> Commands {
        match &self.command {
            Some(Commands::Hash(args)) => Commands::Hash(args.clone()),
            Some(Commands::Algorithms { format }) => Commands::Algorithms {
                format: format.clone(),
            },
            None => Commands::Hash(self.hash.clone()),
        }
    }
}
