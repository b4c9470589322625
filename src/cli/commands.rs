//! CLI command implementations

use std::sync::Arc;

use serde_json::json;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::http_server::HttpServer;
use crate::storage::{DocumentBackend, FileBackend, RecordStore};

use super::args::{Command, StorageArgs};
use super::config::Config;
use super::errors::{CliError, CliResult};
use super::io::write_response;

/// Main CLI entry point
///
/// Parses arguments, installs logging and dispatches to the command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    init_logging();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Serve {
            storage,
            host,
            port,
        } => serve(&storage, host, port),
        Command::Init { storage } => init(&storage),
        Command::List { storage } => list(&storage),
    }
}

/// Install the tracing subscriber. Logs go to stderr so command output on
/// stdout stays machine-readable. `RUST_LOG` overrides the default `info`.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Create an empty data document
///
/// Fails if the document already exists.
pub fn init(args: &StorageArgs) -> CliResult<()> {
    let config = Config::resolve(args)?;
    let backend = FileBackend::new(&config.data_file);

    if backend.exists() {
        return Err(CliError::already_initialized(&backend.location()));
    }

    let store = RecordStore::new(backend);
    store.reset()?;
    info!(data_file = %config.data_file.display(), "data document created");

    write_response(json!({
        "initialized": true,
        "data_file": config.data_file.display().to_string(),
    }))
}

/// Print every record
pub fn list(args: &StorageArgs) -> CliResult<()> {
    let config = Config::resolve(args)?;
    let store = RecordStore::open_file(&config.data_file);

    let records = store.list()?;

    write_response(serde_json::to_value(records)?)
}

/// Start the HTTP server
///
/// Flags override the configuration file; the server runs until the
/// process is stopped.
pub fn serve(args: &StorageArgs, host: Option<String>, port: Option<u16>) -> CliResult<()> {
    let mut config = Config::resolve(args)?;
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }

    let store = Arc::new(RecordStore::open_file(&config.data_file));
    info!(
        data_file = %store.location(),
        addr = %config.server.socket_addr(),
        "starting record server"
    );

    let server = HttpServer::with_config(config.server, store);

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::server_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::server_failed(format!("HTTP server failed: {}", e)))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::RecordFields;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn args_for(path: PathBuf) -> StorageArgs {
        StorageArgs {
            config: None,
            data_file: Some(path),
        }
    }

    #[test]
    fn test_init_creates_empty_document() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("public").join("data.xml");

        init(&args_for(path.clone())).unwrap();

        assert!(path.exists());
        assert!(RecordStore::open_file(&path).list().unwrap().is_empty());
    }

    #[test]
    fn test_init_twice_fails() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("data.xml");

        init(&args_for(path.clone())).unwrap();
        let err = init(&args_for(path)).unwrap_err();

        assert_eq!(err.code_str(), "CLI_ALREADY_INITIALIZED");
    }

    #[test]
    fn test_list_reads_document() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("data.xml");
        RecordStore::open_file(&path)
            .create(RecordFields::new("A", "B", "a@b.com", "100", "555"))
            .unwrap();

        list(&args_for(path)).unwrap();
    }

    #[test]
    fn test_list_malformed_document_is_storage_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("data.xml");
        std::fs::write(&path, "<people/>").unwrap();

        let err = list(&args_for(path)).unwrap_err();

        assert_eq!(err.code_str(), "CLI_STORAGE_ERROR");
    }
}
