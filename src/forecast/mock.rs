use crate::forecast::horizon_dates;
use crate::output::{ForecastPoint, PredictionResult};
use chrono::{Datelike, NaiveDateTime, Weekday};
use rand::Rng;
use tracing::info;

/// Typical daily appointment volume per known branch
pub const BRANCH_BASE_VALUES: &[(&str, f64)] = &[
    ("Colombo Branch", 8.0),
    ("Kandy Branch", 6.0),
    ("Galle Branch", 4.0),
    ("Jaffna Branch", 3.0),
];

pub const DEFAULT_BASE_VALUE: f64 = 5.0;

const WEEKEND_FACTOR: f64 = 1.5;
const WEEKDAY_FACTOR: f64 = 1.0;
const RANDOM_FACTOR_MIN: f64 = 0.7;
const RANDOM_FACTOR_MAX: f64 = 1.3;
const LOWER_BOUND_RATIO: f64 = 0.8;
const UPPER_BOUND_RATIO: f64 = 1.2;

pub fn base_value(branch: &str) -> f64 {
    BRANCH_BASE_VALUES
        .iter()
        .find(|(name, _)| *name == branch)
        .map(|(_, value)| *value)
        .unwrap_or(DEFAULT_BASE_VALUE)
}

pub fn day_factor(ds: NaiveDateTime) -> f64 {
    match ds.weekday() {
        Weekday::Sat | Weekday::Sun => WEEKEND_FACTOR,
        _ => WEEKDAY_FACTOR,
    }
}

/// Builds a synthetic forecast for when the store cannot be reached
///
/// # Arguments
///
/// * `branch` - Branch identifier, selects the base volume
/// * `pet_type` - Echoed into the result
/// * `start` - First forecast day
/// * `horizon` - Number of days to generate
/// * `rng` - Source of the per-day random factor
///
pub fn mock_forecast<R: Rng>(
    branch: &str,
    pet_type: Option<&str>,
    start: NaiveDateTime,
    horizon: usize,
    rng: &mut R,
) -> PredictionResult {
    let base = base_value(branch);

    let forecast: Vec<ForecastPoint> = horizon_dates(start, horizon)
        .into_iter()
        .map(|ds| {
            let random_factor = rng.gen_range(RANDOM_FACTOR_MIN..RANDOM_FACTOR_MAX);
            let yhat = base * day_factor(ds) * random_factor;
            ForecastPoint {
                ds,
                yhat,
                yhat_lower: yhat * LOWER_BOUND_RATIO,
                yhat_upper: yhat * UPPER_BOUND_RATIO,
            }
        })
        .collect();

    let total_predicted = forecast.iter().map(|point| point.yhat).sum::<f64>().round() as i64;

    info!("Prediction generated.");

    PredictionResult::new(branch, pet_type, forecast, total_predicted).mark_mock()
}
