use crate::domain::prediction::PredictionRequest;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Placeholder for every lag/rolling count feature. The serving process keeps
/// no history, so these are pinned to the historical daily average.
pub const HISTORICAL_AVERAGE_COUNT: f64 = 4500.0;

/// Calendar year fed to the `year` column.
pub const REFERENCE_YEAR: f64 = 2024.0;

pub const TEMPERATURE_SCALE: f64 = 50.0;
pub const HUMIDITY_SCALE: f64 = 100.0;
pub const WIND_SCALE: f64 = 40.0;

/// Every feature the models were ever trained on.
///
/// Declaration order is the default dictionary order: it is the column order
/// used when a model ships without a feature list. Any change here is a
/// breaking change for such models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    Yr,
    Mnth,
    Holiday,
    WorkingDay,
    Temp,
    ATemp,
    Hum,
    WindSpeed,
    DayOfWeek,
    Month,
    Year,
    CntLag1,
    CntLag7,
    CntLag14,
    CntRoll7,
    TempHum,
    TempWind,
    Season2,
    Season3,
    Season4,
    WeatherSit2,
    WeatherSit3,
    Weekday1,
    Weekday2,
    Weekday3,
    Weekday4,
    Weekday5,
    Weekday6,
}

impl Feature {
    pub const COUNT: usize = 28;

    pub const ALL: [Feature; Feature::COUNT] = [
        Feature::Yr,
        Feature::Mnth,
        Feature::Holiday,
        Feature::WorkingDay,
        Feature::Temp,
        Feature::ATemp,
        Feature::Hum,
        Feature::WindSpeed,
        Feature::DayOfWeek,
        Feature::Month,
        Feature::Year,
        Feature::CntLag1,
        Feature::CntLag7,
        Feature::CntLag14,
        Feature::CntRoll7,
        Feature::TempHum,
        Feature::TempWind,
        Feature::Season2,
        Feature::Season3,
        Feature::Season4,
        Feature::WeatherSit2,
        Feature::WeatherSit3,
        Feature::Weekday1,
        Feature::Weekday2,
        Feature::Weekday3,
        Feature::Weekday4,
        Feature::Weekday5,
        Feature::Weekday6,
    ];

    /// Column name as written in the trained models' feature lists.
    pub fn name(&self) -> &'static str {
        match self {
            Feature::Yr => "yr",
            Feature::Mnth => "mnth",
            Feature::Holiday => "holiday",
            Feature::WorkingDay => "workingday",
            Feature::Temp => "temp",
            Feature::ATemp => "atemp",
            Feature::Hum => "hum",
            Feature::WindSpeed => "windspeed",
            Feature::DayOfWeek => "day_of_week",
            Feature::Month => "month",
            Feature::Year => "year",
            Feature::CntLag1 => "cnt_lag_1",
            Feature::CntLag7 => "cnt_lag_7",
            Feature::CntLag14 => "cnt_lag_14",
            Feature::CntRoll7 => "cnt_roll_7",
            Feature::TempHum => "temp_hum",
            Feature::TempWind => "temp_wind",
            Feature::Season2 => "season_2",
            Feature::Season3 => "season_3",
            Feature::Season4 => "season_4",
            Feature::WeatherSit2 => "weathersit_2",
            Feature::WeatherSit3 => "weathersit_3",
            Feature::Weekday1 => "weekday_1",
            Feature::Weekday2 => "weekday_2",
            Feature::Weekday3 => "weekday_3",
            Feature::Weekday4 => "weekday_4",
            Feature::Weekday5 => "weekday_5",
            Feature::Weekday6 => "weekday_6",
        }
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

impl FromStr for Feature {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Feature::ALL
            .iter()
            .copied()
            .find(|f| f.name() == s)
            .ok_or(())
    }
}

/// Ordered column names a trained model expects. Empty means "no usable model".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureSchema(Vec<String>);

impl FeatureSchema {
    pub fn new(names: Vec<String>) -> Self {
        Self(names)
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn names(&self) -> &[String] {
        &self.0
    }
}

impl<S: Into<String>> FromIterator<S> for FeatureSchema {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Model input row, one value per schema column.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector(Vec<f64>);

impl FeatureVector {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn to_vec(&self) -> Vec<f64> {
        self.0.clone()
    }
}

/// Values for every known feature, indexed by `Feature` declaration order.
pub fn feature_values(req: &PredictionRequest) -> [f64; Feature::COUNT] {
    let temp = req.temperature / TEMPERATURE_SCALE;
    let hum = req.humidity / HUMIDITY_SCALE;
    let wind = req.wind_speed / WIND_SCALE;
    let season = req.season.code();
    let weather = req.weather.code();
    let indicator = |on: bool| if on { 1.0 } else { 0.0 };

    let mut values = [0.0; Feature::COUNT];
    for feature in Feature::ALL {
        values[feature.index()] = match feature {
            Feature::Yr => 0.0,
            Feature::Mnth | Feature::Month => req.month as f64,
            Feature::Holiday => indicator(req.holiday),
            Feature::WorkingDay => indicator(req.working_day),
            Feature::Temp | Feature::ATemp => temp,
            Feature::Hum => hum,
            Feature::WindSpeed => wind,
            Feature::DayOfWeek => req.day_of_week as f64,
            Feature::Year => REFERENCE_YEAR,
            Feature::CntLag1 | Feature::CntLag7 | Feature::CntLag14 | Feature::CntRoll7 => {
                HISTORICAL_AVERAGE_COUNT
            }
            Feature::TempHum => temp * hum,
            Feature::TempWind => temp * wind,
            Feature::Season2 => indicator(season == 2),
            Feature::Season3 => indicator(season == 3),
            Feature::Season4 => indicator(season == 4),
            Feature::WeatherSit2 => indicator(weather == 2),
            // rain and storm share one indicator
            Feature::WeatherSit3 => indicator(weather >= 3),
            Feature::Weekday1 => indicator(req.day_of_week == 1),
            Feature::Weekday2 => indicator(req.day_of_week == 2),
            Feature::Weekday3 => indicator(req.day_of_week == 3),
            Feature::Weekday4 => indicator(req.day_of_week == 4),
            Feature::Weekday5 => indicator(req.day_of_week == 5),
            Feature::Weekday6 => indicator(req.day_of_week == 6),
        };
    }
    values
}

/// Builds the model input row for `req`.
///
/// With a non-empty schema, values follow the schema order and unknown column
/// names resolve to 0. With an empty schema every known feature is emitted in
/// declaration order. If `target_len` exceeds the natural length the row is
/// right-padded with zeros; it is never truncated. No input makes this fail:
/// out-of-range readings pass through unclamped.
pub fn build_vector(
    req: &PredictionRequest,
    schema: &FeatureSchema,
    target_len: Option<usize>,
) -> FeatureVector {
    let values = feature_values(req);

    let mut row: Vec<f64> = if schema.is_empty() {
        tracing::warn!("Feature schema empty, using all default features");
        values.to_vec()
    } else {
        schema
            .names()
            .iter()
            .map(|name| {
                name.parse::<Feature>()
                    .map(|f| values[f.index()])
                    .unwrap_or(0.0)
            })
            .collect()
    };

    if let Some(target) = target_len {
        if row.len() < target {
            row.resize(target, 0.0);
        }
    }

    FeatureVector(row)
}
