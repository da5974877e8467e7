//! Gemini LLM adapter for document feature extraction.

pub mod client;
pub mod payload;

pub use client::GeminiFeatureExtractor;
