//! CLI argument definitions using clap
//!
//! Commands:
//! - recordbook serve [--config <path>] [--data-file <path>] [--host <host>] [--port <port>]
//! - recordbook init [--config <path>] [--data-file <path>]
//! - recordbook list [--config <path>] [--data-file <path>]

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// recordbook - person records kept in a single XML document
#[derive(Parser, Debug)]
#[command(name = "recordbook")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Options locating the configuration and the data document
#[derive(Args, Debug, Clone, Default)]
pub struct StorageArgs {
    /// Path to a JSON configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Path to the XML data document (overrides the configuration)
    #[arg(long)]
    pub data_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP server
    Serve {
        #[command(flatten)]
        storage: StorageArgs,

        /// Host to bind to (overrides the configuration)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to (overrides the configuration)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Create an empty data document
    Init {
        #[command(flatten)]
        storage: StorageArgs,
    },

    /// Print every record as JSON and exit
    List {
        #[command(flatten)]
        storage: StorageArgs,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
