pub mod args;
pub mod config;
pub mod forecast;
pub mod loader;
pub mod logging;
pub mod output;
pub mod sql;
pub mod store;

use args::PredictArgs;
use chrono::NaiveDateTime;
use config::ForecastConfig;
use forecast::mock::mock_forecast;
use forecast::model::ModelOptions;
use forecast::{train_and_predict, FORECAST_HORIZON_DAYS};
use output::PredictionResult;
use sql::postgres::PostgresClient;
use store::AppointmentStore;

/// Forecast from an already opened store
pub async fn predict_from_store(
    store: &AppointmentStore,
    collection: &str,
    args: &PredictArgs,
    options: ModelOptions,
    now: NaiveDateTime,
) -> PredictionResult {
    let series = loader::load_daily_series(store, collection, &args.branch, args.pet_type.as_deref())
        .await
        .into_series();

    train_and_predict(
        &series,
        &args.branch,
        args.pet_type.as_deref(),
        FORECAST_HORIZON_DAYS,
        options,
        now,
    )
}

/// Runs one prediction end to end
///
/// Falls back to mock data when the database cannot be reached.
pub async fn run(args: &PredictArgs, config: &ForecastConfig, now: NaiveDateTime) -> PredictionResult {
    let Some(client) = PostgresClient::connect(&config.database).await else {
        return mock_forecast(
            &args.branch,
            args.pet_type.as_deref(),
            now,
            FORECAST_HORIZON_DAYS,
            &mut rand::thread_rng(),
        );
    };

    let options = ModelOptions {
        log_level: config.log_level,
        ..ModelOptions::default()
    };

    predict_from_store(
        &AppointmentStore::Postgres(client),
        &config.collection,
        args,
        options,
        now,
    )
    .await
}
