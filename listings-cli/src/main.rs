//! listings - HTTP API for a listings collection
//!
//! Reads configuration from flags, the environment and an optional `.env`
//! file, connects to the database and serves `/api/listings`. A failed
//! database connection is fatal: the port is never bound.

use clap::Parser;

mod serve;
mod tracing_setup;

use tracing_setup::TracingConfig;

#[derive(Parser, Debug)]
#[command(
    name = "listings",
    author,
    version,
    about = "Serve a listings collection over a JSON HTTP API"
)]
struct Cli {
    /// Enable debug logging
    #[arg(long)]
    debug: bool,

    #[command(flatten)]
    serve: serve::ServeArgs,
}

#[tokio::main]
async fn main() {
    // Load .env before parsing so clap sees its values; a missing file is fine
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    if let Err(err) = tracing_setup::init(&TracingConfig { debug: cli.debug }) {
        eprintln!("Failed to initialize tracing: {err}");
    }

    if let Err(err) = serve::run_serve(cli.serve).await {
        tracing::error!("Unable to start the server: {:#}", err);
        std::process::exit(1);
    }
}
