pub mod mock;
pub mod model;

use crate::loader::series::DailySeries;
use crate::output::{ForecastPoint, PredictionResult};
use chrono::{Duration, NaiveDateTime};
use model::{forecast_daily, ForecastError, ModelOptions, MIN_OBSERVATIONS};
use tracing::{error, info};

/// Number of future days every forecast covers
pub const FORECAST_HORIZON_DAYS: usize = 30;

pub const INSUFFICIENT_DATA_MESSAGE: &str = "Not enough historical data for prediction.";

/// `horizon` consecutive days starting at `start`
pub fn horizon_dates(start: NaiveDateTime, horizon: usize) -> Vec<NaiveDateTime> {
    (0..horizon as i64)
        .map(|i| start + Duration::days(i))
        .collect()
}

pub fn zero_forecast(start: NaiveDateTime, horizon: usize) -> Vec<ForecastPoint> {
    horizon_dates(start, horizon)
        .into_iter()
        .map(ForecastPoint::zero)
        .collect()
}

/// Sum of the point estimates, floored at zero and rounded
pub fn total_predicted(forecast: &[ForecastPoint]) -> i64 {
    forecast
        .iter()
        .map(|point| point.yhat)
        .sum::<f64>()
        .max(0.0)
        .round() as i64
}

/// Fits the model on the series and forecasts the next `horizon` days
///
/// # Arguments
///
/// * `series` - Daily appointment counts
/// * `branch` - Echoed into the result
/// * `pet_type` - Echoed into the result
/// * `horizon` - Days to forecast past the last observed day
/// * `options` - Model options, including the log level for the fit
/// * `now` - Start of the zero forecast used when no fit is possible
///
/// # Returns
///
/// * `PredictionResult` - A zero forecast with `message` when there are too
///   few days, a zero forecast with `error` when the model fails
pub fn train_and_predict(
    series: &DailySeries,
    branch: &str,
    pet_type: Option<&str>,
    horizon: usize,
    options: ModelOptions,
    now: NaiveDateTime,
) -> PredictionResult {
    if series.len() < MIN_OBSERVATIONS {
        return PredictionResult::new(branch, pet_type, zero_forecast(now, horizon), 0)
            .with_message(INSUFFICIENT_DATA_MESSAGE);
    }

    match forecast_series(series, horizon, options) {
        Ok(forecast) => {
            info!("Prediction generated.");
            let total = total_predicted(&forecast);
            PredictionResult::new(branch, pet_type, forecast, total)
        }
        Err(e) => {
            error!("Failed to generate forecast: {}", e);
            PredictionResult::new(branch, pet_type, zero_forecast(now, horizon), 0)
                .with_error(e.to_string())
        }
    }
}

fn forecast_series(
    series: &DailySeries,
    horizon: usize,
    options: ModelOptions,
) -> Result<Vec<ForecastPoint>, ForecastError> {
    Ok(forecast_daily(series, horizon, options)?
        .into_iter()
        .map(|prediction| ForecastPoint {
            ds: prediction.ds,
            yhat: prediction.yhat,
            yhat_lower: prediction.yhat_lower,
            yhat_upper: prediction.yhat_upper,
        })
        .collect())
}
