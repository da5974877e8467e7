// Prediction inputs and outputs
pub mod prediction;

// Feature construction for trained models
pub mod ml;

// Document feature extraction ports
pub mod extraction;

// Domain-specific error types
pub mod errors;
