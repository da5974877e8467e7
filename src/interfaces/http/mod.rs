//! REST API for RideWise
//!
//! - POST /predict/day  - daily rental count
//! - POST /predict/hour - hourly rental count
//! - POST /pdf/day      - extract day-prediction inputs from an uploaded PDF
//! - POST /pdf/hour     - extract hour-prediction inputs from an uploaded PDF
//! - GET  /             - liveness

mod handlers;

use crate::application::pdf_features::PdfFeaturePipeline;
use crate::application::prediction::ServiceContext;
use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

/// Server state shared across all requests. Read-only after startup.
pub struct AppState {
    pub context: ServiceContext,
    pub pdf: PdfFeaturePipeline,
}

impl AppState {
    pub fn new(context: ServiceContext, pdf: PdfFeaturePipeline) -> Self {
        Self { context, pdf }
    }
}

/// Create the REST API router
pub fn create_router(state: Arc<AppState>, max_upload_bytes: usize) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::root))
        .route("/predict/day", post(handlers::predict_day))
        .route("/predict/hour", post(handlers::predict_hour))
        .route("/pdf/day", post(handlers::pdf_day))
        .route("/pdf/hour", post(handlers::pdf_hour))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(cors)
        .with_state(state)
}

/// Run the REST API server until the listener fails or `shutdown` resolves.
pub async fn run_server<F>(
    addr: SocketAddr,
    router: Router,
    shutdown: F,
) -> anyhow::Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("RideWise API listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await?;

    Ok(())
}
