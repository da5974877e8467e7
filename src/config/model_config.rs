//! Model artifact locations.

use std::env;
use std::path::{Path, PathBuf};

pub const DEFAULT_MODEL_DIR: &str = "data/models";

/// Paths of the two trained models and their feature lists
#[derive(Debug, Clone)]
pub struct ModelEnvConfig {
    pub day_model_path: PathBuf,
    pub hour_model_path: PathBuf,
    pub day_features_path: PathBuf,
    pub hour_features_path: PathBuf,
}

impl Default for ModelEnvConfig {
    fn default() -> Self {
        Self::in_dir(Path::new(DEFAULT_MODEL_DIR))
    }
}

impl ModelEnvConfig {
    /// Standard artifact names inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            day_model_path: dir.join("day_model.bin"),
            hour_model_path: dir.join("hour_model.bin"),
            day_features_path: dir.join("day_features.bin"),
            hour_features_path: dir.join("hour_features.bin"),
        }
    }

    /// `MODEL_DIR` sets the directory; each `*_PATH` variable overrides one file.
    pub fn from_env() -> Self {
        let dir = env::var("MODEL_DIR").unwrap_or_else(|_| DEFAULT_MODEL_DIR.to_string());
        let base = Self::in_dir(Path::new(&dir));
        let path =
            |key: &str, default: PathBuf| env::var(key).map(PathBuf::from).unwrap_or(default);

        Self {
            day_model_path: path("DAY_MODEL_PATH", base.day_model_path),
            hour_model_path: path("HOUR_MODEL_PATH", base.hour_model_path),
            day_features_path: path("DAY_FEATURES_PATH", base.day_features_path),
            hour_features_path: path("HOUR_FEATURES_PATH", base.hour_features_path),
        }
    }
}
