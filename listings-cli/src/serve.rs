//! Startup sequence: read configuration, initialize the store, serve.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use anyhow::{Context, Result};
use clap::Args;

use listings_server::http::{run_server, ServerConfig, DEFAULT_PORT};
use listings_server::{InMemoryListings, PgListings};

/// Arguments for running the API server
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, env = "LISTINGS_HOST", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub host: IpAddr,

    /// Port to listen on
    #[arg(long, short = 'p', env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Database connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,

    /// Keep listings in memory instead of Postgres (lost on exit)
    #[arg(long)]
    pub in_memory: bool,

    /// Do not send CORS headers (same-origin clients only)
    #[arg(long)]
    pub no_cors: bool,
}

impl ServeArgs {
    fn server_config(&self) -> ServerConfig {
        ServerConfig {
            bind_addr: SocketAddr::new(self.host, self.port),
            cors_permissive: !self.no_cors,
        }
    }
}

/// Initialize the store, then serve until shutdown.
///
/// Nothing is bound if the database is unreachable.
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let config = args.server_config();

    if args.in_memory {
        if args.database_url.is_some() {
            tracing::warn!("--in-memory set, ignoring DATABASE_URL");
        }
        tracing::warn!("Using in-memory store - listings are lost on exit");
        return run_server(InMemoryListings::new(), config)
            .await
            .context("Server error");
    }

    let database_url = args
        .database_url
        .context("DATABASE_URL not set. Set via --database-url, DATABASE_URL env, or .env")?;

    let store = PgListings::initialize(&database_url)
        .await
        .context("Failed to initialize listings store")?;
    tracing::info!("Database connected");

    run_server(store, config).await.context("Server error")?;

    Ok(())
}
