use thiserror::Error;

/// Errors raised while running a trained model on one input row
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Inference failed: {0}")]
    Inference(String),

    #[error("Model returned a non-finite value: {0}")]
    NonFinite(f64),

    #[error("Model panicked during inference")]
    Panicked,
}

/// Errors from a single artifact decoding strategy
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("JSON decode failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("bincode decode failed: {0}")]
    Bincode(#[from] bincode::Error),

    #[error("Text decode failed: {0}")]
    Text(String),
}

/// Errors on the PDF -> text -> LLM feature extraction path.
///
/// The display string is returned to API callers verbatim.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Failed to extract text from PDF")]
    EmptyPdfText,

    #[error("No PDF file uploaded")]
    MissingUpload,

    #[error("Invalid upload: {0}")]
    InvalidUpload(String),

    #[error("Missing GEMINI_API_KEY")]
    MissingApiKey,

    #[error("Gemini API error: {status} {body}")]
    Api { status: u16, body: String },

    #[error("Gemini request failed: {0}")]
    Request(String),

    #[error("Gemini returned no parseable JSON object")]
    MalformedResponse,
}
