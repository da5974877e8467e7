use super::heuristic;
use crate::application::ml::RentalModel;
use crate::domain::errors::ModelError;
use crate::domain::ml::{FeatureSchema, build_vector};
use crate::domain::prediction::{Granularity, Prediction, PredictionRequest};
use std::panic::{AssertUnwindSafe, catch_unwind};
use tracing::{debug, warn};

/// Predicts a rental count, preferring the trained model.
///
/// Without a model or schema the heuristic answers directly. Otherwise the
/// model runs on a row built from `schema` (padded to the schema width for
/// daily predictions only); any model failure, including a panic or a
/// non-finite output, falls back to the heuristic for this call. Never fails.
pub fn predict(
    req: &PredictionRequest,
    granularity: Granularity,
    model: Option<&dyn RentalModel>,
    schema: &FeatureSchema,
) -> Prediction {
    let model = match model {
        Some(model) if !schema.is_empty() => model,
        _ => {
            warn!(
                "Using {} fallback - model loaded: {}, schema features: {}",
                granularity,
                model.is_some(),
                schema.len()
            );
            return Prediction::fallback(heuristic::estimate(req, granularity));
        }
    };

    match run_model(req, granularity, model, schema) {
        Ok(count) => {
            debug!("{} prediction from '{}': {}", granularity, model.name(), count);
            Prediction::model(count)
        }
        Err(e) => {
            warn!("{} prediction with '{}' failed: {}", granularity, model.name(), e);
            Prediction::fallback(heuristic::estimate(req, granularity))
        }
    }
}

fn run_model(
    req: &PredictionRequest,
    granularity: Granularity,
    model: &dyn RentalModel,
    schema: &FeatureSchema,
) -> Result<i64, ModelError> {
    let target_len = granularity.pads_to_schema().then(|| schema.len());

    let output = catch_unwind(AssertUnwindSafe(|| {
        let row = build_vector(req, schema, target_len);
        debug!("{} model input: {} features", granularity, row.len());
        model.predict(&row)
    }))
    .map_err(|_| ModelError::Panicked)??;

    if !output.is_finite() {
        return Err(ModelError::NonFinite(output));
    }
    Ok(output.round_ties_even() as i64)
}
