mod error;
pub mod guard;
mod handlers;
pub mod routes;
mod state;
pub mod v1;


use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub use error::{ApiError, ServeError, ValidationError};
pub use state::AppState;

use crate::db::Database;

/// Environment variable overriding the bind address.
pub const HOST_ENV: &str = "TODO_API_HOST";
/// Environment variable overriding the port.
pub const PORT_ENV: &str = "TODO_API_PORT";

/// API server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Host address to bind to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 3000,
        }
    }
}

impl Config {
    /// Defaults overridden by `TODO_API_HOST` / `TODO_API_PORT` when they parse.
    pub fn new() -> Self {
        let defaults = Self::default();
        Self {
            host: env_or(HOST_ENV, defaults.host),
            port: env_or(PORT_ENV, defaults.port),
        }
    }

    pub fn with_host(mut self, host: IpAddr) -> Self {
        self.host = host;
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    match std::env::var(key) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            warn!(key, value = %raw, "Ignoring unparseable environment override");
            default
        }),
        Err(_) => default,
    }
}

/// Initialize tracing subscriber with env filter
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "todo_agenda=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Run the API server until Ctrl-C, then close the store.
pub async fn run<D: Database + 'static>(config: Config, db: D) -> Result<(), ServeError> {
    let state = AppState::new(db);
    let app = routes::create_router(state.clone()).layer(TraceLayer::new_for_http());

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("API server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    state.db().close().await;
    info!("Database closed, server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => {
            warn!(error = %e, "Unable to listen for Ctrl-C, serving until killed");
            std::future::pending::<()>().await;
        }
    }
}
