use crate::domain::prediction::{Granularity, PredictionRequest, Season, Weather};

fn season_multiplier(season: Season) -> f64 {
    match season {
        Season::Spring => 1.1,
        Season::Summer => 1.3,
        Season::Fall => 1.0,
        Season::Winter => 0.7,
        Season::Unknown => 1.0,
    }
}

fn weather_multiplier(weather: Weather) -> f64 {
    match weather {
        Weather::Clear => 1.2,
        Weather::Cloudy => 1.0,
        Weather::Rain => 0.7,
        Weather::Storm => 0.4,
        Weather::Unknown => 1.0,
    }
}

/// Rental count from a fixed multiplicative model, used whenever no trained
/// model is usable. Output is not clamped: freezing temperatures give zero or
/// negative counts.
pub fn estimate(req: &PredictionRequest, granularity: Granularity) -> i64 {
    let day_type = if req.working_day { 1.2 } else { 0.8 };
    let holiday = if req.holiday { 0.9 } else { 1.0 };

    let predicted = granularity.base_count()
        * season_multiplier(req.season)
        * weather_multiplier(req.weather)
        * (req.temperature / 20.0)
        * day_type
        * holiday;

    predicted.round_ties_even() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::prediction::tests::sample_request;

    #[test]
    fn test_hourly_winter_clear_working_day() {
        let req = PredictionRequest {
            season: Season::Winter,
            weather: Weather::Clear,
            temperature: 20.0,
            working_day: true,
            holiday: false,
            ..sample_request()
        };
        // 180 * 0.7 * 1.2 * 1.0 * 1.2 * 1.0 = 181.44
        assert_eq!(estimate(&req, Granularity::Hourly), 181);
    }

    #[test]
    fn test_daily_summer_storm_holiday() {
        let req = PredictionRequest {
            season: Season::Summer,
            weather: Weather::Storm,
            temperature: 20.0,
            working_day: false,
            holiday: true,
            ..sample_request()
        };
        // 4500 * 1.3 * 0.4 * 1.0 * 0.8 * 0.9 = 1684.8
        assert_eq!(estimate(&req, Granularity::Daily), 1685);
    }

    #[test]
    fn test_unknown_categories_are_neutral() {
        let req = PredictionRequest {
            season: Season::Unknown,
            weather: Weather::Unknown,
            temperature: 20.0,
            working_day: true,
            holiday: false,
            ..sample_request()
        };
        // 4500 * 1.0 * 1.0 * 1.0 * 1.2
        assert_eq!(estimate(&req, Granularity::Daily), 5400);
    }

    #[test]
    fn test_monotonic_in_positive_temperature() {
        let mut previous = i64::MIN;
        for t in 1..=45 {
            let req = PredictionRequest {
                temperature: t as f64,
                ..sample_request()
            };
            let count = estimate(&req, Granularity::Daily);
            assert!(count > previous, "count did not rise at {}C", t);
            previous = count;
        }
    }

    #[test]
    fn test_negative_temperature_is_not_clamped() {
        let req = PredictionRequest {
            temperature: -10.0,
            ..sample_request()
        };
        assert!(estimate(&req, Granularity::Hourly) < 0);
    }
}
