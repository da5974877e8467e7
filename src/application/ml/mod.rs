pub mod model_loader;
pub mod predictor;
pub mod smartcore_predictor;

pub use model_loader::{load_model, load_schema};
pub use predictor::RentalModel;
pub use smartcore_predictor::ModelArtifact;
