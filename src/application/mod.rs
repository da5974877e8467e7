// Trained model capability, adapters and artifact loading
pub mod ml;

// Heuristic estimate, model-or-fallback routing and the startup context
pub mod prediction;

// PDF upload to prediction input
pub mod pdf_features;
