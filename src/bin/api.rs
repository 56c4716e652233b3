//! Todo API server binary.
//!
//! This binary creates the concrete database implementation and passes it
//! to the API server. The API layer remains agnostic of the storage backend.

use std::net::IpAddr;
use std::path::PathBuf;

use clap::Parser;
use miette::Diagnostic;
use thiserror::Error;
use todo_agenda::api::{self, Config, ServeError};
use todo_agenda::db::{Database, DbError, SqliteDatabase};
use tracing::info;

#[derive(Error, Diagnostic, Debug)]
enum BinaryError {
    #[error("Database error: {0}")]
    #[diagnostic(code(todo_api::binary::database))]
    Database(#[from] DbError),

    #[error("API server error: {0}")]
    #[diagnostic(code(todo_api::binary::api))]
    Api(#[from] ServeError),
}

#[derive(Parser)]
#[command(name = "todo-api")]
#[command(author, version, about = "Todo API server", long_about = None)]
struct Cli {
    /// Host address to bind to (overrides TODO_API_HOST, default 0.0.0.0)
    #[arg(long)]
    host: Option<IpAddr>,

    /// Port to listen on (overrides TODO_API_PORT, default 3000)
    #[arg(short, long)]
    port: Option<u16>,

    /// Database file path
    #[arg(long, default_value = "todoApplication.db")]
    db: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), BinaryError> {
    let cli = Cli::parse();
    api::init_tracing();

    let mut config = Config::new();
    if let Some(host) = cli.host {
        config = config.with_host(host);
    }
    if let Some(port) = cli.port {
        config = config.with_port(port);
    }

    // The store must be reachable before the listener binds
    let db = SqliteDatabase::open(&cli.db).await?;
    db.init_schema().await?;
    info!(path = %cli.db.display(), "Database ready");

    api::run(config, db).await?;

    Ok(())
}
