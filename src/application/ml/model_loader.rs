//! Startup loading of model and feature-list artifacts.
//!
//! Artifacts may have been written by several generations of the training
//! tooling, so each is decoded by trying a fixed list of strategies in order
//! and keeping the first success. Nothing here fails startup: an unreadable
//! model becomes `None` and an unreadable feature list becomes an empty schema,
//! which routes every request to the heuristic.

use super::predictor::RentalModel;
use super::smartcore_predictor::{ForestModel, ModelArtifact};
use crate::domain::errors::DecodeError;
use crate::domain::ml::FeatureSchema;
use regex::Regex;
use serde::de::DeserializeOwned;
use std::path::Path;
use std::sync::{Arc, OnceLock};
use tracing::{debug, info, warn};

/// A named way of decoding an artifact.
pub struct Strategy<T> {
    pub name: &'static str,
    pub decode: fn(&[u8]) -> Result<T, DecodeError>,
}

fn decode_json<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, DecodeError> {
    Ok(serde_json::from_slice(bytes)?)
}

/// Text that went through a non-UTF-8 editor or exporter: drop the BOM and
/// replace invalid sequences before parsing.
fn decode_json_lossy<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, DecodeError> {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    let text = String::from_utf8_lossy(bytes);
    Ok(serde_json::from_str(text.trim())?)
}

fn decode_bincode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, DecodeError> {
    Ok(bincode::deserialize(bytes)?)
}

fn identifier() -> &'static Regex {
    static IDENT: OnceLock<Regex> = OnceLock::new();
    IDENT.get_or_init(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("valid regex"))
}

/// One column name per line, as exported by the oldest training notebooks.
fn decode_name_lines(bytes: &[u8]) -> Result<Vec<String>, DecodeError> {
    let text = std::str::from_utf8(bytes).map_err(|e| DecodeError::Text(e.to_string()))?;
    let names: Vec<String> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();

    if names.is_empty() {
        return Err(DecodeError::Text("no feature names".to_string()));
    }
    if let Some(bad) = names.iter().find(|n| !identifier().is_match(n)) {
        return Err(DecodeError::Text(format!("not a feature name: {:?}", bad)));
    }
    Ok(names)
}

pub const MODEL_STRATEGIES: &[Strategy<ModelArtifact>] = &[
    Strategy {
        name: "json",
        decode: decode_json::<ModelArtifact>,
    },
    Strategy {
        name: "json-lossy",
        decode: decode_json_lossy::<ModelArtifact>,
    },
    Strategy {
        name: "bincode",
        decode: decode_bincode::<ModelArtifact>,
    },
];

pub const SCHEMA_STRATEGIES: &[Strategy<Vec<String>>] = &[
    Strategy {
        name: "json",
        decode: decode_json::<Vec<String>>,
    },
    Strategy {
        name: "json-lossy",
        decode: decode_json_lossy::<Vec<String>>,
    },
    Strategy {
        name: "bincode",
        decode: decode_bincode::<Vec<String>>,
    },
    Strategy {
        name: "lines",
        decode: decode_name_lines,
    },
];

/// Returns the first strategy result that succeeds, with the strategy name.
pub fn decode_first<T>(bytes: &[u8], strategies: &[Strategy<T>]) -> Option<(&'static str, T)> {
    strategies.iter().find_map(|strategy| match (strategy.decode)(bytes) {
        Ok(value) => Some((strategy.name, value)),
        Err(e) => {
            debug!("Strategy '{}' failed: {}", strategy.name, e);
            None
        }
    })
}

fn load_with<T>(path: &Path, strategies: &[Strategy<T>]) -> Option<T> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!("Failed to read {:?}: {}. Using fallback predictions.", path, e);
            return None;
        }
    };

    match decode_first(&bytes, strategies) {
        Some((name, value)) => {
            debug!("Decoded {:?} with strategy '{}'", path, name);
            Some(value)
        }
        None => {
            warn!("Failed to decode {:?} with all strategies. Using fallback predictions.", path);
            None
        }
    }
}

/// Loads a trained model, or `None` if the artifact is missing or unreadable.
pub fn load_model(path: &Path) -> Option<Arc<dyn RentalModel>> {
    let artifact = load_with(path, MODEL_STRATEGIES)?;
    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "model".to_string());

    info!(
        "Successfully loaded model '{}' ({} features) from {:?}",
        name, artifact.n_features, path
    );
    Some(Arc::new(ForestModel::new(artifact, name)))
}

/// Loads a model's ordered feature names; empty if unavailable.
pub fn load_schema(path: &Path) -> FeatureSchema {
    load_with(path, SCHEMA_STRATEGIES)
        .map(FeatureSchema::new)
        .unwrap_or_default()
}
