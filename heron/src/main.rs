use clap::{Parser, Subcommand};
use tokio_util::sync::CancellationToken;

use crate::error::Result;
use crate::serve::ServeArgs;

mod error;
mod serve;
mod telemetry;

#[derive(Parser)]
#[command(name = "heron")]
#[command(about = "Heron ingestion service CLI")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the ingestion service
    Serve {
        #[clap(flatten)]
        inner: ServeArgs,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    telemetry::init_telemetry();

    let cli = Cli::parse();

    let ct = CancellationToken::new();

    let ct_clone = ct.clone();
    tokio::spawn(async move {
        let _ = tokio::signal::ctrl_c().await;
        ct_clone.cancel();
    });

    match cli.command {
        Commands::Serve { inner } => inner.run(ct).await,
    }
}
