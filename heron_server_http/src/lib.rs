//! HTTP server for the heron ingestion service.
//!
//! The server is built using axum and provides a `POST /ingest` endpoint
//! for record submission and a `GET /status/{ingestion_id}` endpoint for
//! polling ingestion state.

pub mod error;
pub mod ingest;
pub mod status;
pub mod types;

// Re-export the main types for easier importing
pub use error::{HttpServerError, Result};
pub use types::{
    BatchStatusResponse, ErrorResponse, IngestRequest, IngestResponse, StatusResponse,
};

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use heron_core::IngestionService;

use crate::ingest::ingest_handler;
use crate::status::status_handler;

/// HTTP server that accepts ingestion requests and serves status queries.
pub struct HttpServer {
    state: HttpServerState,
}

#[derive(Clone)]
pub struct HttpServerState {
    service: Arc<IngestionService>,
}

impl HttpServerState {
    pub fn service(&self) -> &IngestionService {
        &self.service
    }
}

impl HttpServer {
    /// Create a new HTTP server over the given ingestion service.
    pub fn new(service: Arc<IngestionService>) -> Self {
        let state = HttpServerState { service };

        Self { state }
    }

    pub fn into_router(self) -> Router {
        Router::new()
            .route("/ingest", post(ingest_handler))
            .route("/status/{ingestion_id}", get(status_handler))
            .with_state(self.state)
    }
}
