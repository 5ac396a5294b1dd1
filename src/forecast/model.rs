//! Daily appointment forecasting on augurs (MSTL + ETS).
//!
//! The observed days are laid out on a dense calendar from the first to the
//! last observed day. Days without bookings are left missing and filled by
//! linear interpolation inside the forecaster, so gaps never count as zero.
//!
//! # Model Selection
//!
//! - At least two weeks of calendar: MSTL with weekly seasonality (period 7)
//!   and AutoETS on the trend.
//! - Shorter histories: non-seasonal AutoETS.
//!
//! # Prediction Intervals
//!
//! Bounds come from the model's prediction intervals at `interval_width`.
//! When a model reports none, the bounds are 0.8x and 1.2x the point estimate.

use crate::loader::series::DailySeries;
use augurs::{
    ets::AutoETS,
    forecaster::{transforms::LinearInterpolator, Forecaster},
    mstl::MSTLModel,
};
use chrono::{Duration, NaiveDateTime};
use thiserror::Error;
use tracing::{debug, Level};

/// Minimum number of observed days for a fit
pub const MIN_OBSERVATIONS: usize = 2;

/// Calendar days needed before weekly seasonality is modelled
const MIN_SEASONAL_DAYS: usize = 14;

const WEEKLY_PERIOD: usize = 7;

pub const DEFAULT_INTERVAL_WIDTH: f64 = 0.80;

const FALLBACK_LOWER_RATIO: f64 = 0.8;
const FALLBACK_UPPER_RATIO: f64 = 1.2;

#[derive(Debug, Error)]
pub enum ForecastError {
    #[error("Insufficient data: need at least {MIN_OBSERVATIONS} days, got {0}")]
    InsufficientData(usize),

    #[error("Invalid interval width {0}: must be between 0 and 1")]
    InvalidIntervalWidth(f64),

    #[error("Invalid forecast horizon: {0}")]
    InvalidHorizon(usize),

    #[error("Forecast model error: {0}")]
    Model(String),

    #[error("Model produced a non-finite {0}")]
    NonFinite(&'static str),
}

/// Options passed to every fit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelOptions {
    pub interval_width: f64,
    /// Fit diagnostics are emitted only when this level enables `debug`
    pub log_level: Level,
}

impl Default for ModelOptions {
    fn default() -> Self {
        Self {
            interval_width: DEFAULT_INTERVAL_WIDTH,
            log_level: Level::INFO,
        }
    }
}

impl ModelOptions {
    fn diagnostics_enabled(&self) -> bool {
        self.log_level >= Level::DEBUG
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// MSTL with weekly seasonality, AutoETS trend
    Seasonal,
    /// AutoETS without seasonal decomposition
    NonSeasonal,
}

impl Strategy {
    pub fn for_days(days: usize) -> Self {
        if days >= MIN_SEASONAL_DAYS {
            Strategy::Seasonal
        } else {
            Strategy::NonSeasonal
        }
    }
}

/// One predicted day
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    pub ds: NaiveDateTime,
    pub yhat: f64,
    pub yhat_lower: f64,
    pub yhat_upper: f64,
}

/// Observed counts on a dense calendar, NaN where a day had no bookings
///
/// # Returns
///
/// * `(Vec<f64>, NaiveDateTime)` - One value per calendar day, and the last observed day
pub fn calendar_values(series: &DailySeries) -> Option<(Vec<f64>, NaiveDateTime)> {
    let first = series.points().first()?;
    let last = series.points().last()?;

    let days = (last.day - first.day).num_days() as usize + 1;
    let mut values = vec![f64::NAN; days];
    for point in series.points() {
        values[(point.day - first.day).num_days() as usize] = f64::from(point.count);
    }

    Some((values, last.timestamp()))
}

/// Forecasts the `horizon` days following the last observed day
///
/// # Arguments
///
/// * `series` - Observed days, at least `MIN_OBSERVATIONS` of them
/// * `horizon` - Number of future days
/// * `options` - Interval width and log level for this fit
///
/// # Returns
///
/// * `Result<Vec<Prediction>, ForecastError>` - One prediction per future day
pub fn forecast_daily(
    series: &DailySeries,
    horizon: usize,
    options: ModelOptions,
) -> Result<Vec<Prediction>, ForecastError> {
    if series.len() < MIN_OBSERVATIONS {
        return Err(ForecastError::InsufficientData(series.len()));
    }

    if horizon == 0 {
        return Err(ForecastError::InvalidHorizon(horizon));
    }

    if !(options.interval_width > 0.0 && options.interval_width < 1.0) {
        return Err(ForecastError::InvalidIntervalWidth(options.interval_width));
    }

    let (values, last) =
        calendar_values(series).ok_or(ForecastError::InsufficientData(series.len()))?;
    let strategy = Strategy::for_days(values.len());

    let forecast = match strategy {
        Strategy::Seasonal => forecast_with_mstl(&values, horizon, options.interval_width),
        Strategy::NonSeasonal => forecast_with_ets(&values, horizon, options.interval_width),
    }?;

    if options.diagnostics_enabled() {
        debug!(
            "Fitted {:?} model on {} calendar days ({} observed)",
            strategy,
            values.len(),
            series.len()
        );
    }

    if forecast.point.len() != horizon {
        return Err(ForecastError::Model(format!(
            "expected {} predictions, got {}",
            horizon,
            forecast.point.len()
        )));
    }

    let (lower, upper) = match forecast.intervals {
        Some(intervals) => (intervals.lower, intervals.upper),
        None => (
            forecast.point.iter().map(|v| v * FALLBACK_LOWER_RATIO).collect(),
            forecast.point.iter().map(|v| v * FALLBACK_UPPER_RATIO).collect(),
        ),
    };

    forecast
        .point
        .iter()
        .zip(lower.iter().zip(upper.iter()))
        .enumerate()
        .map(|(i, (&yhat, (&yhat_lower, &yhat_upper)))| {
            let prediction = Prediction {
                ds: last + Duration::days(i as i64 + 1),
                yhat,
                yhat_lower,
                yhat_upper,
            };

            if [yhat, yhat_lower, yhat_upper].iter().all(|v| v.is_finite()) {
                Ok(prediction)
            } else {
                Err(ForecastError::NonFinite("prediction"))
            }
        })
        .collect()
}

fn forecast_with_mstl(
    values: &[f64],
    horizon: usize,
    level: f64,
) -> Result<augurs::Forecast, ForecastError> {
    let ets = AutoETS::non_seasonal().into_trend_model();
    let mstl = MSTLModel::new(vec![WEEKLY_PERIOD], ets);

    let transformers: Vec<Box<dyn augurs::forecaster::Transformer>> =
        vec![Box::new(LinearInterpolator::default())];
    let mut forecaster = Forecaster::new(mstl).with_transformers(transformers);

    forecaster
        .fit(values)
        .map_err(|e| ForecastError::Model(format!("MSTL fit error: {e}")))?;

    forecaster
        .predict(horizon, level)
        .map_err(|e| ForecastError::Model(format!("MSTL predict error: {e}")))
}

fn forecast_with_ets(
    values: &[f64],
    horizon: usize,
    level: f64,
) -> Result<augurs::Forecast, ForecastError> {
    let ets = AutoETS::non_seasonal();

    let transformers: Vec<Box<dyn augurs::forecaster::Transformer>> =
        vec![Box::new(LinearInterpolator::default())];
    let mut forecaster = Forecaster::new(ets).with_transformers(transformers);

    forecaster
        .fit(values)
        .map_err(|e| ForecastError::Model(format!("ETS fit error: {e}")))?;

    forecaster
        .predict(horizon, level)
        .map_err(|e| ForecastError::Model(format!("ETS predict error: {e}")))
}
