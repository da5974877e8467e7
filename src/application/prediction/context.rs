use super::router;
use crate::application::ml::{RentalModel, load_model, load_schema};
use crate::config::ModelEnvConfig;
use crate::domain::ml::FeatureSchema;
use crate::domain::prediction::{Granularity, Prediction, PredictionRequest};
use std::sync::Arc;
use tracing::info;

/// Models and feature lists loaded at startup.
///
/// Built once and handed to request handlers; nothing mutates it afterwards,
/// so concurrent requests read it without locking.
#[derive(Clone, Default)]
pub struct ServiceContext {
    pub day_model: Option<Arc<dyn RentalModel>>,
    pub hour_model: Option<Arc<dyn RentalModel>>,
    pub day_schema: FeatureSchema,
    pub hour_schema: FeatureSchema,
}

impl ServiceContext {
    /// A context with no models: every prediction uses the heuristic.
    pub fn fallback_only() -> Self {
        Self::default()
    }

    /// Loads all artifacts named by `config`. Never fails; missing artifacts
    /// leave the matching granularity on the heuristic.
    pub fn load(config: &ModelEnvConfig) -> Self {
        let ctx = Self {
            day_model: load_model(&config.day_model_path),
            hour_model: load_model(&config.hour_model_path),
            day_schema: load_schema(&config.day_features_path),
            hour_schema: load_schema(&config.hour_features_path),
        };

        info!(
            "day model: {}, day_features: {} features",
            ctx.day_model.as_ref().map(|m| m.name()).unwrap_or("none"),
            ctx.day_schema.len()
        );
        info!(
            "hour model: {}, hour_features: {} features",
            ctx.hour_model.as_ref().map(|m| m.name()).unwrap_or("none"),
            ctx.hour_schema.len()
        );
        ctx
    }

    pub fn predict(&self, req: &PredictionRequest, granularity: Granularity) -> Prediction {
        let (model, schema) = match granularity {
            Granularity::Daily => (&self.day_model, &self.day_schema),
            Granularity::Hourly => (&self.hour_model, &self.hour_schema),
        };
        router::predict(req, granularity, model.as_deref(), schema)
    }
}
