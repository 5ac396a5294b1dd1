pub mod resolver;
pub mod series;

use crate::store::AppointmentStore;
use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use resolver::{resolve_collection, ResolvedFields};
use series::{parse_timestamp, DailySeries};
use thiserror::Error;
use tracing::debug;

/// Why the loader produced no series
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EmptyReason {
    #[error("no collections available")]
    NoCollections,
    #[error("collection {collection} has no documents")]
    NoSampleDocument { collection: String },
    #[error("no {role} field found in sample document")]
    MissingField { role: &'static str },
    #[error("no documents matched the filter")]
    NoMatchingDocuments,
    #[error("no document had a parseable date")]
    NoParseableDates,
    #[error("store failure: {0}")]
    StoreFailure(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded {
        collection: String,
        series: DailySeries,
    },
    Empty(EmptyReason),
}

impl LoadOutcome {
    pub fn into_series(self) -> DailySeries {
        match self {
            LoadOutcome::Loaded { series, .. } => series,
            LoadOutcome::Empty(_) => DailySeries::default(),
        }
    }
}

/// Loads the daily appointment series for a branch
///
/// # Arguments
///
/// * `store` - Store to read from
/// * `configured_collection` - Preferred collection name
/// * `branch` - Branch identifier matched exactly
/// * `pet_type` - Optional pet type matched exactly when the collection has such a field
///
/// # Returns
///
/// * `LoadOutcome` - Never an error; store failures become `Empty(StoreFailure)`
pub async fn load_daily_series(
    store: &AppointmentStore,
    configured_collection: &str,
    branch: &str,
    pet_type: Option<&str>,
) -> LoadOutcome {
    let outcome = match try_load(store, configured_collection, branch, pet_type).await {
        Ok(outcome) => outcome,
        Err(e) => LoadOutcome::Empty(EmptyReason::StoreFailure(format!("{:#}", e))),
    };

    match &outcome {
        LoadOutcome::Loaded { collection, series } => {
            debug!(
                "Loaded {} days of appointments for {} from {}",
                series.len(),
                branch,
                collection
            );
        }
        LoadOutcome::Empty(reason) => {
            debug!("No appointment series for {}: {}", branch, reason);
        }
    }

    outcome
}

async fn try_load(
    store: &AppointmentStore,
    configured_collection: &str,
    branch: &str,
    pet_type: Option<&str>,
) -> Result<LoadOutcome> {
    let collections = store
        .list_collections()
        .await
        .context("error listing collections")?;

    let Some(collection) = resolve_collection(configured_collection, &collections) else {
        return Ok(LoadOutcome::Empty(EmptyReason::NoCollections));
    };

    let sample = store
        .sample_document(&collection)
        .await
        .with_context(|| format!("error sampling collection {}", collection))?;

    let Some(sample) = sample else {
        return Ok(LoadOutcome::Empty(EmptyReason::NoSampleDocument { collection }));
    };

    let fields = match ResolvedFields::from_sample(&sample) {
        Ok(fields) => fields,
        Err(reason) => return Ok(LoadOutcome::Empty(reason)),
    };

    let documents = store
        .find_documents(
            &collection,
            &fields.filter(branch, pet_type),
            &fields.projection(),
        )
        .await
        .with_context(|| format!("error fetching appointments from {}", collection))?;

    if documents.is_empty() {
        return Ok(LoadOutcome::Empty(EmptyReason::NoMatchingDocuments));
    }

    let timestamps: Vec<NaiveDateTime> = documents
        .iter()
        .filter_map(|document| document.get(fields.date))
        .filter_map(parse_timestamp)
        .collect();

    if timestamps.is_empty() {
        return Ok(LoadOutcome::Empty(EmptyReason::NoParseableDates));
    }

    Ok(LoadOutcome::Loaded {
        collection,
        series: DailySeries::from_timestamps(timestamps),
    })
}
