pub mod core;
pub mod gemini;
pub mod pdf;

pub use gemini::GeminiFeatureExtractor;
pub use pdf::PdfTextExtractor;
