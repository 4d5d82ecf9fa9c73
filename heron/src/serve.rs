use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use clap::Args;
use heron_core::{
    BatchQueue, BatchScheduler, IngestionOptions, IngestionService, IngestionStore,
    SchedulerOptions, SimulatedProcessor, run_background_scheduler,
};
use heron_server_http::HttpServer;
use snafu::ResultExt;
use tokio_util::sync::CancellationToken;

use crate::error::{BindSnafu, InvalidServerAddressSnafu, Result, ServeSnafu};

#[derive(Debug, Args)]
pub struct ServeArgs {
    /// The address of the HTTP server.
    #[arg(long, default_value = "127.0.0.1:7780")]
    address: String,
    /// Maximum number of records per batch.
    #[arg(long, default_value_t = 3)]
    batch_size: usize,
    /// Minimum spacing between consecutive batches, in milliseconds.
    #[arg(long, default_value_t = 5000)]
    throttle_interval_ms: u64,
    /// Simulated per-batch processing time, in milliseconds.
    #[arg(long, default_value_t = 2000)]
    processing_delay_ms: u64,
}

impl ServeArgs {
    pub async fn run(self, ct: CancellationToken) -> Result<()> {
        let address = self
            .address
            .parse::<SocketAddr>()
            .context(InvalidServerAddressSnafu {})?;

        let store = Arc::new(IngestionStore::new());
        let queue = Arc::new(BatchQueue::new());
        let processor = Arc::new(SimulatedProcessor::new(Duration::from_millis(
            self.processing_delay_ms,
        )));

        // Exactly one scheduler instance, started here at initialization.
        let scheduler = BatchScheduler::new(
            queue.clone(),
            store.clone(),
            processor,
            SchedulerOptions {
                throttle_interval: Duration::from_millis(self.throttle_interval_ms),
            },
        );

        let service = Arc::new(IngestionService::new(
            store,
            queue,
            IngestionOptions {
                batch_size: self.batch_size,
            },
        ));

        println!("Starting heron ingestion service");
        println!("HTTP server listening on {}", address);

        let _ct_guard = ct.child_token().drop_guard();

        let http_server_fut = run_http_server(service, address, ct.clone());
        let scheduler_fut = run_background_scheduler(scheduler, ct);

        tokio::select! {
            res = http_server_fut => {
                println!("HTTP server exited with {:?}", res);
            },
            res = scheduler_fut => {
                println!("Batch scheduler exited with {:?}", res);
            },
        }

        Ok(())
    }
}

async fn run_http_server(
    service: Arc<IngestionService>,
    address: SocketAddr,
    ct: CancellationToken,
) -> Result<()> {
    let router = HttpServer::new(service).into_router();
    let listener = tokio::net::TcpListener::bind(address)
        .await
        .context(BindSnafu {})?;

    axum::serve(listener, router)
        .with_graceful_shutdown(async move { ct.cancelled().await })
        .await
        .context(ServeSnafu {})?;

    Ok(())
}
