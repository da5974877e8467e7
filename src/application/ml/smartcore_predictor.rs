use super::predictor::RentalModel;
use crate::domain::errors::ModelError;
use crate::domain::ml::FeatureVector;
use serde::{Deserialize, Serialize};
use smartcore::ensemble::random_forest_regressor::RandomForestRegressor;
use smartcore::linalg::basic::matrix::DenseMatrix;

pub type Forest = RandomForestRegressor<f64, f64, DenseMatrix<f64>, Vec<f64>>;

/// On-disk model blob. smartcore does not expose the training width, so the
/// exporter records it next to the forest.
#[derive(Serialize, Deserialize)]
pub struct ModelArtifact {
    pub n_features: usize,
    pub forest: Forest,
}

/// Random forest regressor trained offline and shipped as a serialized blob.
pub struct ForestModel {
    forest: Forest,
    n_features: usize,
    name: String,
}

impl ForestModel {
    pub fn new(artifact: ModelArtifact, name: impl Into<String>) -> Self {
        Self {
            forest: artifact.forest,
            n_features: artifact.n_features,
            name: name.into(),
        }
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }
}

impl RentalModel for ForestModel {
    fn predict(&self, features: &FeatureVector) -> Result<f64, ModelError> {
        // Trees only touch the columns they split on, so a short row can
        // still produce a number.
        if features.len() != self.n_features {
            return Err(ModelError::Inference(format!(
                "expected {} features, got {}",
                self.n_features,
                features.len()
            )));
        }

        let input_matrix = DenseMatrix::from_2d_vec(&vec![features.to_vec()])
            .map_err(|e| ModelError::Inference(format!("Matrix creation failed: {}", e)))?;

        let predictions = self
            .forest
            .predict(&input_matrix)
            .map_err(|e| ModelError::Inference(format!("Prediction failed: {}", e)))?;

        predictions
            .first()
            .copied()
            .ok_or_else(|| ModelError::Inference("No prediction returned".to_string()))
    }

    fn name(&self) -> &str {
        &self.name
    }
}
