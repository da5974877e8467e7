pub mod feature_registry;

pub use feature_registry::{Feature, FeatureSchema, FeatureVector, build_vector};
