use crate::domain::errors::ExtractionError;
use crate::domain::extraction::{ExtractionMode, FeatureExtractor, MappedInput, TextExtractor};
use serde::Serialize;
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{info, warn};

/// Successful `/pdf/*` response body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PdfExtraction {
    pub features: Map<String, Value>,
    pub missing_fields: Vec<String>,
    pub mapped_input: MappedInput,
}

/// Failed `/pdf/*` response body. Empty `features` and `missing_fields` keep
/// the shape stable for clients.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PdfFailure {
    pub error: String,
    pub features: Map<String, Value>,
    pub missing_fields: Vec<String>,
}

impl From<&ExtractionError> for PdfFailure {
    fn from(e: &ExtractionError) -> Self {
        Self {
            error: e.to_string(),
            features: Map::new(),
            missing_fields: Vec::new(),
        }
    }
}

/// PDF bytes -> text -> LLM features -> prediction-shaped input.
#[derive(Clone)]
pub struct PdfFeaturePipeline {
    text: Arc<dyn TextExtractor>,
    features: Arc<dyn FeatureExtractor>,
}

impl PdfFeaturePipeline {
    pub fn new(text: Arc<dyn TextExtractor>, features: Arc<dyn FeatureExtractor>) -> Self {
        Self { text, features }
    }

    pub async fn run(
        &self,
        pdf: Vec<u8>,
        mode: ExtractionMode,
    ) -> Result<PdfExtraction, ExtractionError> {
        let extractor = self.text.clone();
        // PDF parsing is CPU-bound; keep it off the request executor
        let text = tokio::task::spawn_blocking(move || extractor.extract_text(&pdf))
            .await
            .unwrap_or_default();

        if text.trim().is_empty() {
            warn!("No text extracted from uploaded PDF ({} mode)", mode);
            return Err(ExtractionError::EmptyPdfText);
        }
        info!("Extracted {} chars of PDF text ({} mode)", text.len(), mode);

        let extracted = self
            .features
            .extract_features(&text, mode)
            .await
            .inspect_err(|e| warn!("Feature extraction failed ({} mode): {}", mode, e))?;

        let mapped_input = MappedInput::from_features(&extracted.features, mode);
        Ok(PdfExtraction {
            features: extracted.features,
            missing_fields: extracted.missing_fields,
            mapped_input,
        })
    }
}
