use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Season of the year. Unrecognised names deserialize to `Unknown`, which
/// behaves like the neutral case everywhere downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    Spring,
    Summer,
    Fall,
    Winter,
    #[serde(other)]
    Unknown,
}

impl Season {
    /// Integer code used by the training data. Winter (1) is the baseline;
    /// unknown seasons share it.
    pub fn code(&self) -> u8 {
        match self {
            Season::Spring => 2,
            Season::Summer => 3,
            Season::Fall => 4,
            Season::Winter | Season::Unknown => 1,
        }
    }
}

impl FromStr for Season {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "spring" => Ok(Season::Spring),
            "summer" => Ok(Season::Summer),
            "fall" => Ok(Season::Fall),
            "winter" => Ok(Season::Winter),
            _ => anyhow::bail!(
                "Invalid season: {}. Must be 'spring', 'summer', 'fall' or 'winter'",
                s
            ),
        }
    }
}

/// Weather situation. `Rain` and `Storm` are distinct for the heuristic but
/// collapse into one indicator for the trained models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weather {
    Clear,
    Cloudy,
    Rain,
    Storm,
    #[serde(other)]
    Unknown,
}

impl Weather {
    pub fn code(&self) -> u8 {
        match self {
            Weather::Clear | Weather::Unknown => 1,
            Weather::Cloudy => 2,
            Weather::Rain => 3,
            Weather::Storm => 4,
        }
    }
}

impl FromStr for Weather {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "clear" => Ok(Weather::Clear),
            "cloudy" => Ok(Weather::Cloudy),
            "rain" => Ok(Weather::Rain),
            "storm" => Ok(Weather::Storm),
            _ => anyhow::bail!(
                "Invalid weather: {}. Must be 'clear', 'cloudy', 'rain' or 'storm'",
                s
            ),
        }
    }
}

/// One prediction request as received on `/predict/day` and `/predict/hour`.
///
/// Field names on the wire follow the public API (`temp`, `hum`, `wind`,
/// `workingday`); the flags accept either JSON booleans or 0/1 integers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRequest {
    pub season: Season,
    pub weather: Weather,
    pub month: u32,
    /// 0 = Sunday
    pub day_of_week: u32,
    /// Only meaningful for hourly predictions.
    #[serde(default)]
    pub hour: u32,
    #[serde(rename = "temp")]
    pub temperature: f64,
    #[serde(rename = "hum")]
    pub humidity: f64,
    #[serde(rename = "wind")]
    pub wind_speed: f64,
    #[serde(deserialize_with = "deserialize_flag")]
    pub holiday: bool,
    #[serde(rename = "workingday", deserialize_with = "deserialize_flag")]
    pub working_day: bool,
}

fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(i64),
        Float(f64),
    }

    Ok(match Flag::deserialize(deserializer)? {
        Flag::Bool(b) => b,
        Flag::Int(i) => i != 0,
        Flag::Float(f) => f != 0.0,
    })
}

/// Whether a prediction targets a full day's total or a single hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Daily,
    Hourly,
}

impl Granularity {
    /// Base count the heuristic scales from.
    pub fn base_count(&self) -> f64 {
        match self {
            Granularity::Daily => 4500.0,
            Granularity::Hourly => 180.0,
        }
    }

    /// Only the day model gets its input padded to the schema width. The hour
    /// path has always been built without a target width.
    pub fn pads_to_schema(&self) -> bool {
        matches!(self, Granularity::Daily)
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Granularity::Daily => write!(f, "daily"),
            Granularity::Hourly => write!(f, "hourly"),
        }
    }
}

impl FromStr for Granularity {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "daily" | "day" => Ok(Granularity::Daily),
            "hourly" | "hour" => Ok(Granularity::Hourly),
            _ => anyhow::bail!("Invalid granularity: {}. Must be 'daily' or 'hourly'", s),
        }
    }
}

/// Where a predicted count came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PredictionSource {
    Model,
    Fallback,
}

/// Response body of the prediction endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prediction {
    pub count: i64,
    pub source: PredictionSource,
}

impl Prediction {
    pub fn model(count: i64) -> Self {
        Self {
            count,
            source: PredictionSource::Model,
        }
    }

    pub fn fallback(count: i64) -> Self {
        Self {
            count,
            source: PredictionSource::Fallback,
        }
    }
}
