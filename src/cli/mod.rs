//! CLI module for recordbook
//!
//! Provides command-line interface for:
//! - serve: Start the HTTP server
//! - init: Create an empty data document
//! - list: Print every record as JSON

mod args;
mod commands;
mod config;
mod errors;
mod io;

pub use args::{Cli, Command, StorageArgs};
pub use commands::{init, init_logging, list, run, run_command, serve};
pub use config::Config;
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{write_response, write_response_to};
