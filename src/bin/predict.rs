//! One-shot rental prediction from the command line.
//!
//! Uses the same artifacts and fallback rules as the server, so it works with
//! no model files at all (heuristic only).

use anyhow::Result;
use clap::Parser;
use ridewise::application::prediction::ServiceContext;
use ridewise::config::Config;
use ridewise::domain::prediction::{Granularity, PredictionRequest, Season, Weather};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// daily or hourly
    #[arg(long, default_value = "hourly")]
    granularity: Granularity,

    /// spring, summer, fall or winter
    #[arg(long, default_value = "summer")]
    season: Season,

    /// clear, cloudy, rain or storm
    #[arg(long, default_value = "clear")]
    weather: Weather,

    #[arg(long, default_value_t = 6, value_parser = clap::value_parser!(u32).range(1..=12))]
    month: u32,

    /// 0 = Sunday
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(0..=6))]
    day_of_week: u32,

    #[arg(long, default_value_t = 12, value_parser = clap::value_parser!(u32).range(0..=23))]
    hour: u32,

    /// Temperature in °C
    #[arg(long, default_value_t = 25.0, allow_negative_numbers = true)]
    temp: f64,

    /// Relative humidity in %
    #[arg(long, default_value_t = 50.0)]
    hum: f64,

    /// Wind speed in km/h
    #[arg(long, default_value_t = 10.0)]
    wind: f64,

    #[arg(long)]
    holiday: bool,

    /// Mark the day as a non-working day
    #[arg(long)]
    non_working_day: bool,

    /// Override MODEL_DIR
    #[arg(long)]
    model_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut config = Config::from_env()?;
    if let Some(dir) = &args.model_dir {
        config.models = ridewise::config::ModelEnvConfig::in_dir(dir);
    }
    let context = ServiceContext::load(&config.models);

    let request = PredictionRequest {
        season: args.season,
        weather: args.weather,
        month: args.month,
        day_of_week: args.day_of_week,
        hour: args.hour,
        temperature: args.temp,
        humidity: args.hum,
        wind_speed: args.wind,
        holiday: args.holiday,
        working_day: !args.non_working_day,
    };

    let prediction = context.predict(&request, args.granularity);
    println!("{}", serde_json::to_string_pretty(&prediction)?);

    Ok(())
}
