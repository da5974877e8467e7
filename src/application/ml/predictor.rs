use crate::domain::errors::ModelError;
use crate::domain::ml::FeatureVector;

/// A trained rental-count regressor.
///
/// Implementations are loaded once at startup and shared read-only between
/// requests, so `predict` takes `&self` and must not mutate.
pub trait RentalModel: Send + Sync {
    /// Predict the rental count for a single input row
    fn predict(&self, features: &FeatureVector) -> Result<f64, ModelError>;

    /// Get model name/type
    fn name(&self) -> &str;
}
