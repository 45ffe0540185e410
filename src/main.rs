//! Application server entry point.
//!
//! # Startup sequence
//!
//! ```text
//!   process env ──┐
//!                 ├─▶ Startup ──▶ validate ──┬─▶ Ready ──▶ bind ──▶ serve
//!   --env-file ───┘                          │
//!                                            └─▶ Failed ──▶ diagnostic ──▶ exit(1)
//! ```
//!
//! Nothing is bound until the configuration is valid.

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use app_env::http::HttpServer;
use app_env::lifecycle::{signals, Shutdown, Startup};
use app_env::observability::init_logging;

#[derive(Parser)]
#[command(name = "app-env")]
#[command(about = "Serve the application with a validated environment", long_about = None)]
struct Cli {
    /// Address to listen on.
    #[arg(short, long, env = "BIND_ADDRESS", default_value = "0.0.0.0:3000")]
    bind: String,

    /// Dotenv file to fill in variables the environment does not set.
    #[arg(long)]
    env_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let startup = Startup::from_process(cli.env_file.as_deref())?;
    init_logging(startup.mode());

    tracing::info!(mode = %startup.mode(), "app-env v{} starting", env!("CARGO_PKG_VERSION"));

    let config = startup.finish()?;

    let listener = TcpListener::bind(&cli.bind).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    tokio::spawn(signals::shutdown_on_signal(shutdown.clone()));

    HttpServer::new(config).run(listener, shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
