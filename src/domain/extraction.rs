//! Ports and value types for pulling prediction inputs out of uploaded documents.

use crate::domain::errors::ExtractionError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Which prediction form the extracted features are meant to fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractionMode {
    Day,
    Hour,
}

const DAY_KEYS: &[&str] = &[
    "season",
    "month",
    "day_of_week",
    "temperature",
    "humidity",
    "wind_speed",
    "weather",
    "holiday",
    "working_day",
];

const HOUR_KEYS: &[&str] = &[
    "season",
    "month",
    "day_of_week",
    "temperature",
    "humidity",
    "wind_speed",
    "weather",
    "holiday",
    "working_day",
    "hour",
];

impl ExtractionMode {
    /// Keys the LLM must return, in response order.
    pub fn expected_keys(&self) -> &'static [&'static str] {
        match self {
            ExtractionMode::Day => DAY_KEYS,
            ExtractionMode::Hour => HOUR_KEYS,
        }
    }

    fn default_hour(&self) -> i64 {
        match self {
            ExtractionMode::Day => 12,
            ExtractionMode::Hour => 0,
        }
    }
}

impl fmt::Display for ExtractionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractionMode::Day => write!(f, "day"),
            ExtractionMode::Hour => write!(f, "hour"),
        }
    }
}

/// Features returned by the LLM: exactly the expected keys, `null` where the
/// document did not say.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractedFeatures {
    pub features: Map<String, Value>,
    pub missing_fields: Vec<String>,
}

impl ExtractedFeatures {
    /// Keeps only the expected keys of `mode`, in order, and records the ones
    /// that are absent or null.
    pub fn from_parsed(parsed: &Map<String, Value>, mode: ExtractionMode) -> Self {
        let mut features = Map::new();
        let mut missing_fields = Vec::new();

        for key in mode.expected_keys() {
            let value = parsed.get(*key).cloned().unwrap_or(Value::Null);
            if value.is_null() {
                missing_fields.push(key.to_string());
            }
            features.insert(key.to_string(), value);
        }

        Self {
            features,
            missing_fields,
        }
    }
}

/// Extracted features reshaped into the `/predict/*` request body. Not
/// validated: callers are expected to review and complete it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MappedInput {
    pub season: String,
    pub month: i64,
    pub day_of_week: i64,
    pub hour: i64,
    pub temp: f64,
    pub hum: f64,
    pub wind: f64,
    pub weather: String,
    pub holiday: i64,
    pub workingday: i64,
}

impl MappedInput {
    pub fn from_features(features: &Map<String, Value>, mode: ExtractionMode) -> Self {
        let int = |key: &str| features.get(key).and_then(coerce_int).unwrap_or(0);
        let float = |key: &str| features.get(key).and_then(coerce_float).unwrap_or(0.0);
        let text = |key: &str| match features.get(key) {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        };

        let hour = features
            .get("hour")
            .and_then(coerce_int)
            .filter(|h| *h != 0)
            .unwrap_or_else(|| mode.default_hour());

        Self {
            season: text("season"),
            month: int("month"),
            day_of_week: int("day_of_week"),
            hour,
            temp: float("temperature"),
            hum: float("humidity"),
            wind: float("wind_speed"),
            weather: text("weather"),
            holiday: int("holiday"),
            workingday: int("working_day"),
        }
    }
}

fn coerce_int(value: &Value) -> Option<i64> {
    match value {
        Value::Bool(b) => Some(i64::from(*b)),
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().map(|f| f.trunc() as i64))
        }
        _ => None,
    }
}

fn coerce_float(value: &Value) -> Option<f64> {
    match value {
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// Pulls readable text out of a PDF. Returns an empty string on any failure.
pub trait TextExtractor: Send + Sync {
    fn extract_text(&self, pdf: &[u8]) -> String;
}

/// Turns free text into prediction features.
#[async_trait]
pub trait FeatureExtractor: Send + Sync {
    async fn extract_features(
        &self,
        text: &str,
        mode: ExtractionMode,
    ) -> Result<ExtractedFeatures, ExtractionError>;
}
