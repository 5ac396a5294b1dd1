use chrono::NaiveDateTime;
use serde::ser::Error as _;
use serde::{Serialize, Serializer};
use thiserror::Error;

/// `2024-01-01T00:00:00.000000Z`
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6fZ";

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastPoint {
    #[serde(serialize_with = "serialize_timestamp")]
    pub ds: NaiveDateTime,
    #[serde(serialize_with = "serialize_finite")]
    pub yhat: f64,
    #[serde(serialize_with = "serialize_finite")]
    pub yhat_lower: f64,
    #[serde(serialize_with = "serialize_finite")]
    pub yhat_upper: f64,
}

impl ForecastPoint {
    pub fn zero(ds: NaiveDateTime) -> Self {
        Self {
            ds,
            yhat: 0.0,
            yhat_lower: 0.0,
            yhat_upper: 0.0,
        }
    }
}

/// The document printed on stdout
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionResult {
    pub branch: String,
    #[serde(rename = "petType")]
    pub pet_type: Option<String>,
    pub forecast: Vec<ForecastPoint>,
    pub total_predicted: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_mock_data: Option<bool>,
}

impl PredictionResult {
    pub fn new(
        branch: &str,
        pet_type: Option<&str>,
        forecast: Vec<ForecastPoint>,
        total_predicted: i64,
    ) -> Self {
        Self {
            branch: branch.to_string(),
            pet_type: pet_type.map(str::to_string),
            forecast,
            total_predicted,
            message: None,
            error: None,
            is_mock_data: None,
        }
    }

    pub fn with_message(mut self, message: &str) -> Self {
        self.message = Some(message.to_string());
        self
    }

    pub fn with_error(mut self, error: String) -> Self {
        self.error = Some(error);
        self
    }

    pub fn mark_mock(mut self) -> Self {
        self.is_mock_data = Some(true);
        self
    }
}

fn serialize_timestamp<S>(ds: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(&ds.format(TIMESTAMP_FORMAT))
}

// JSON has no NaN or infinity; refuse rather than emit null
fn serialize_finite<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    if value.is_finite() {
        serializer.serialize_f64(*value)
    } else {
        Err(S::Error::custom(format!(
            "Out of range float value is not JSON compliant: {}",
            value
        )))
    }
}

/// Renders the result as a single line of JSON
pub fn render(result: &PredictionResult) -> Result<String, OutputError> {
    Ok(serde_json::to_string(result)?)
}

pub fn error_document(message: &str) -> String {
    serde_json::json!({ "error": message }).to_string()
}
