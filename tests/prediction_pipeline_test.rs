use ridewise::application::ml::{ModelArtifact, RentalModel};
use ridewise::application::prediction::{ServiceContext, heuristic, predict};
use ridewise::config::ModelEnvConfig;
use ridewise::domain::errors::ModelError;
use ridewise::domain::ml::{Feature, FeatureSchema, FeatureVector, build_vector};
use ridewise::domain::prediction::{
    Granularity, Prediction, PredictionRequest, PredictionSource, Season, Weather,
};
use smartcore::ensemble::random_forest_regressor::{
    RandomForestRegressor, RandomForestRegressorParameters,
};
use smartcore::linalg::basic::matrix::DenseMatrix;
use std::path::Path;
use std::sync::Arc;

fn request(season: Season, weather: Weather, temperature: f64) -> PredictionRequest {
    PredictionRequest {
        season,
        weather,
        month: 7,
        day_of_week: 5,
        hour: 17,
        temperature,
        humidity: 45.0,
        wind_speed: 8.0,
        holiday: false,
        working_day: true,
    }
}

/// Forest over (temp, hum, workingday) where demand grows with temperature.
fn write_day_artifacts(dir: &Path) {
    let x: Vec<Vec<f64>> = (0..60)
        .map(|i| {
            let temp = i as f64 / 60.0;
            vec![temp, 0.5, (i % 2) as f64]
        })
        .collect();
    let y: Vec<f64> = x.iter().map(|row| 2000.0 + row[0] * 5000.0).collect();

    let matrix = DenseMatrix::from_2d_vec(&x).unwrap();
    let params = RandomForestRegressorParameters::default()
        .with_n_trees(8)
        .with_max_depth(6);
    let artifact = ModelArtifact {
        n_features: 3,
        forest: RandomForestRegressor::fit(&matrix, &y, params).unwrap(),
    };

    std::fs::write(dir.join("day_model.bin"), serde_json::to_vec(&artifact).unwrap()).unwrap();
    std::fs::write(
        dir.join("day_features.bin"),
        serde_json::to_vec(&["temp", "hum", "workingday"]).unwrap(),
    )
    .unwrap();
}

#[test]
fn test_trained_day_model_serves_and_hour_falls_back() {
    let dir = tempfile::tempdir().unwrap();
    write_day_artifacts(dir.path());

    let ctx = ServiceContext::load(&ModelEnvConfig::in_dir(dir.path()));
    assert!(ctx.day_model.is_some());
    assert_eq!(ctx.day_schema.len(), 3);
    assert!(ctx.hour_model.is_none());

    let req = request(Season::Summer, Weather::Clear, 25.0);

    let day = ctx.predict(&req, Granularity::Daily);
    assert_eq!(day.source, PredictionSource::Model);
    assert!((2000..=7000).contains(&day.count), "count {}", day.count);

    let hour = ctx.predict(&req, Granularity::Hourly);
    assert_eq!(
        hour,
        Prediction::fallback(heuristic::estimate(&req, Granularity::Hourly))
    );
}

#[test]
fn test_corrupt_artifacts_never_block_startup() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("day_model.bin"), b"\x80\x04corrupt").unwrap();
    std::fs::write(dir.path().join("day_features.bin"), b"").unwrap();

    let ctx = ServiceContext::load(&ModelEnvConfig::in_dir(dir.path()));
    assert!(ctx.day_model.is_none());
    assert!(ctx.day_schema.is_empty());

    let req = request(Season::Fall, Weather::Rain, 18.0);
    let pred = ctx.predict(&req, Granularity::Daily);
    assert_eq!(pred.source, PredictionSource::Fallback);
}

#[test]
fn test_model_without_schema_is_unusable() {
    let dir = tempfile::tempdir().unwrap();
    write_day_artifacts(dir.path());
    std::fs::remove_file(dir.path().join("day_features.bin")).unwrap();

    let ctx = ServiceContext::load(&ModelEnvConfig::in_dir(dir.path()));
    assert!(ctx.day_model.is_some());

    let pred = ctx.predict(&request(Season::Spring, Weather::Cloudy, 15.0), Granularity::Daily);
    assert_eq!(pred.source, PredictionSource::Fallback);
}

struct AlwaysFails;

impl RentalModel for AlwaysFails {
    fn predict(&self, _features: &FeatureVector) -> Result<f64, ModelError> {
        Err(ModelError::Inference("expected 28 features, got 3".to_string()))
    }

    fn name(&self) -> &str {
        "always-fails"
    }
}

#[test]
fn test_throwing_model_still_yields_well_formed_response() {
    let schema: FeatureSchema = Feature::ALL.iter().map(|f| f.name()).collect();
    let req = request(Season::Winter, Weather::Storm, 4.0);

    for granularity in [Granularity::Daily, Granularity::Hourly] {
        let pred = predict(&req, granularity, Some(&AlwaysFails), &schema);
        assert_eq!(pred.source, PredictionSource::Fallback);
        assert_eq!(pred.count, heuristic::estimate(&req, granularity));

        let body = serde_json::to_value(pred).unwrap();
        assert!(body["count"].is_i64());
        assert_eq!(body["source"], "fallback");
    }
}

#[test]
fn test_absent_model_falls_back_for_any_schema() {
    let req = request(Season::Summer, Weather::Cloudy, 22.0);
    let schemas = [
        FeatureSchema::empty(),
        FeatureSchema::from_iter(["temp"]),
        Feature::ALL.iter().map(|f| f.name()).collect(),
    ];

    for schema in &schemas {
        let pred = predict(&req, Granularity::Daily, None, schema);
        assert_eq!(pred.source, PredictionSource::Fallback);
    }
}

#[test]
fn test_schema_narrower_than_model_falls_back() {
    let dir = tempfile::tempdir().unwrap();
    write_day_artifacts(dir.path());
    // one column where the forest was trained on three
    std::fs::write(
        dir.path().join("day_features.bin"),
        serde_json::to_vec(&["temp"]).unwrap(),
    )
    .unwrap();

    let ctx = ServiceContext::load(&ModelEnvConfig::in_dir(dir.path()));
    assert!(ctx.day_model.is_some());
    assert_eq!(ctx.day_schema.len(), 1);

    let req = request(Season::Summer, Weather::Clear, 30.0);
    assert_eq!(
        ctx.predict(&req, Granularity::Daily),
        Prediction::fallback(heuristic::estimate(&req, Granularity::Daily))
    );
}

#[test]
fn test_schema_wider_than_model_falls_back() {
    let dir = tempfile::tempdir().unwrap();
    write_day_artifacts(dir.path());
    std::fs::write(
        dir.path().join("day_features.bin"),
        serde_json::to_vec(&["temp", "hum", "workingday", "yr"]).unwrap(),
    )
    .unwrap();

    let ctx = ServiceContext::load(&ModelEnvConfig::in_dir(dir.path()));
    let req = request(Season::Winter, Weather::Cloudy, 5.0);
    assert_eq!(
        ctx.predict(&req, Granularity::Daily),
        Prediction::fallback(heuristic::estimate(&req, Granularity::Daily))
    );
}

#[test]
fn test_day_pads_to_schema_width_but_hour_does_not() {
    // The day path asks for len(schema) values and the hour path asks for
    // none; for schema-ordered rows both come out at the schema width.
    let schema = FeatureSchema::from_iter(["temp", "unknown_a", "unknown_b"]);
    let req = request(Season::Summer, Weather::Clear, 25.0);

    let day = build_vector(&req, &schema, Some(schema.len()));
    let hour = build_vector(&req, &schema, None);
    assert_eq!(day, hour);
    assert_eq!(day.as_slice(), &[0.5, 0.0, 0.0]);

    let shared: Arc<dyn RentalModel> = Arc::new(AlwaysFails);
    let ctx = ServiceContext {
        day_model: Some(shared.clone()),
        hour_model: Some(shared),
        day_schema: schema.clone(),
        hour_schema: schema,
    };
    assert_eq!(ctx.predict(&req, Granularity::Daily).source, PredictionSource::Fallback);
    assert_eq!(ctx.predict(&req, Granularity::Hourly).source, PredictionSource::Fallback);
}
