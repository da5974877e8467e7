//! RideWise Server - bike rental demand prediction API
//!
//! Serves model-backed predictions with a heuristic fallback, plus PDF
//! feature extraction through Gemini. Starts even when no model artifact can
//! be loaded.
//!
//! # Usage
//! ```sh
//! MODEL_DIR=data/models GEMINI_API_KEY=... cargo run --bin server
//! ```
//!
//! # Environment Variables
//! - `SERVER_BIND_ADDRESS` / `SERVER_PORT` - listen address (default: 0.0.0.0:8000)
//! - `MODEL_DIR` - directory with day/hour models and feature lists (default: data/models)
//! - `GEMINI_API_KEY` - key for PDF feature extraction (optional)

use anyhow::Result;
use ridewise::application::pdf_features::PdfFeaturePipeline;
use ridewise::application::prediction::ServiceContext;
use ridewise::config::Config;
use ridewise::infrastructure::{GeminiFeatureExtractor, PdfTextExtractor};
use ridewise::interfaces::{AppState, create_router, run_server};
use std::sync::Arc;
use tracing::{Level, info, warn};
use tracing_subscriber::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let stdout_layer = tracing_subscriber::fmt::layer().with_target(false);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with(stdout_layer)
        .init();

    info!("RideWise Server {} starting...", env!("CARGO_PKG_VERSION"));

    let config = Config::from_env()?;
    let addr = config.socket_addr()?;

    info!("Loading models from {:?}", config.models.day_model_path.parent());
    let context = ServiceContext::load(&config.models);

    if config.llm.api_key.is_none() {
        warn!("GEMINI_API_KEY not set: /pdf endpoints will report an error");
    }
    let pdf = PdfFeaturePipeline::new(
        Arc::new(PdfTextExtractor),
        Arc::new(GeminiFeatureExtractor::new(&config.llm)),
    );

    let state = Arc::new(AppState::new(context, pdf));
    let router = create_router(state, config.server.max_upload_bytes);

    run_server(addr, router, async {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Shutdown signal received. Exiting...");
        }
    })
    .await
}
