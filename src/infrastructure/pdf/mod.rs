use crate::domain::extraction::TextExtractor;
use std::panic::{AssertUnwindSafe, catch_unwind};
use tracing::warn;

/// Text extraction over `pdf-extract`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfTextExtractor;

impl TextExtractor for PdfTextExtractor {
    fn extract_text(&self, pdf: &[u8]) -> String {
        // the parser can panic on malformed cross-reference tables
        match catch_unwind(AssertUnwindSafe(|| pdf_extract::extract_text_from_mem(pdf))) {
            Ok(Ok(text)) => text.trim().to_string(),
            Ok(Err(e)) => {
                warn!("PDF text extraction failed: {}", e);
                String::new()
            }
            Err(_) => {
                warn!("PDF text extraction panicked");
                String::new()
            }
        }
    }
}
