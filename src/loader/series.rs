use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde_json::Value;
use std::collections::BTreeMap;

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

/// Appointments booked on one calendar day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyCount {
    pub day: NaiveDate,
    pub count: u32,
}

impl DailyCount {
    pub fn timestamp(&self) -> NaiveDateTime {
        self.day.and_time(NaiveTime::MIN)
    }
}

/// Per-day appointment counts, ordered by day
///
/// Only days with at least one appointment are present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DailySeries {
    points: Vec<DailyCount>,
}

impl DailySeries {
    pub fn from_timestamps<I>(timestamps: I) -> Self
    where
        I: IntoIterator<Item = NaiveDateTime>,
    {
        let mut counts: BTreeMap<NaiveDate, u32> = BTreeMap::new();
        for timestamp in timestamps {
            *counts.entry(timestamp.date()).or_insert(0) += 1;
        }

        Self {
            points: counts
                .into_iter()
                .map(|(day, count)| DailyCount { day, count })
                .collect(),
        }
    }

    pub fn points(&self) -> &[DailyCount] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Reads a date-like JSON value as a UTC timestamp
///
/// Strings may be RFC 3339, naive ISO date-times or bare dates. Numbers are
/// epoch milliseconds. Extended-JSON `{"$date": ...}` and
/// `{"$numberLong": "..."}` wrappers are unwrapped.
pub fn parse_timestamp(value: &Value) -> Option<NaiveDateTime> {
    match value {
        Value::String(text) => parse_timestamp_str(text.trim()),
        Value::Number(number) => {
            let millis = match number.as_i64() {
                Some(millis) => millis,
                None => {
                    let millis = number.as_f64()?;
                    if !millis.is_finite() {
                        return None;
                    }
                    millis.round() as i64
                }
            };
            DateTime::<Utc>::from_timestamp_millis(millis).map(|dt| dt.naive_utc())
        }
        Value::Object(map) => {
            if let Some(inner) = map.get("$date") {
                return parse_timestamp(inner);
            }
            map.get("$numberLong")
                .and_then(Value::as_str)
                .and_then(|text| text.parse::<i64>().ok())
                .and_then(DateTime::<Utc>::from_timestamp_millis)
                .map(|dt| dt.naive_utc())
        }
        _ => None,
    }
}

fn parse_timestamp_str(text: &str) -> Option<NaiveDateTime> {
    if text.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.naive_utc());
    }

    NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
                .map(|day| day.and_time(NaiveTime::MIN))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ts(text: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    fn day(text: &str) -> NaiveDate {
        NaiveDate::parse_from_str(text, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_counts_every_record() {
        let series = DailySeries::from_timestamps(vec![
            ts("2024-01-02 16:00:00"),
            ts("2024-01-01 09:00:00"),
            ts("2024-01-01 11:30:00"),
            ts("2024-01-01 15:45:00"),
        ]);

        assert_eq!(
            series.points(),
            &[
                DailyCount {
                    day: day("2024-01-01"),
                    count: 3
                },
                DailyCount {
                    day: day("2024-01-02"),
                    count: 1
                },
            ]
        );
    }

    #[test]
    fn test_gaps_stay_absent() {
        let series = DailySeries::from_timestamps(vec![
            ts("2024-01-01 09:00:00"),
            ts("2024-01-05 09:00:00"),
        ]);

        assert_eq!(series.len(), 2);
        assert_eq!(series.points()[1].day, day("2024-01-05"));
        assert_eq!(series.points()[1].timestamp(), ts("2024-01-05 00:00:00"));
        assert!(DailySeries::from_timestamps(Vec::new()).is_empty());
    }

    #[test]
    fn test_parse_strings() {
        assert_eq!(
            parse_timestamp(&json!("2024-03-01T09:30:00.000Z")),
            Some(ts("2024-03-01 09:30:00"))
        );
        assert_eq!(
            parse_timestamp(&json!("2024-03-01T23:30:00-02:00")),
            Some(ts("2024-03-02 01:30:00"))
        );
        assert_eq!(
            parse_timestamp(&json!("2024-03-01T09:30:00.25")),
            Some(ts("2024-03-01 09:30:00") + chrono::Duration::milliseconds(250))
        );
        assert_eq!(
            parse_timestamp(&json!("2024-03-01 09:30:00")),
            Some(ts("2024-03-01 09:30:00"))
        );
        assert_eq!(
            parse_timestamp(&json!("2024-03-01")),
            Some(ts("2024-03-01 00:00:00"))
        );
        assert_eq!(
            parse_timestamp(&json!("2024/03/01")),
            Some(ts("2024-03-01 00:00:00"))
        );
    }

    #[test]
    fn test_parse_numbers_and_wrappers() {
        // 2024-01-01T00:00:00Z
        let millis = 1_704_067_200_000_i64;

        assert_eq!(parse_timestamp(&json!(millis)), Some(ts("2024-01-01 00:00:00")));
        assert_eq!(
            parse_timestamp(&json!({"$date": "2024-01-01T00:00:00Z"})),
            Some(ts("2024-01-01 00:00:00"))
        );
        assert_eq!(
            parse_timestamp(&json!({"$date": {"$numberLong": millis.to_string()}})),
            Some(ts("2024-01-01 00:00:00"))
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse_timestamp(&json!("next tuesday")), None);
        assert_eq!(parse_timestamp(&json!("")), None);
        assert_eq!(parse_timestamp(&json!(null)), None);
        assert_eq!(parse_timestamp(&json!(true)), None);
        assert_eq!(parse_timestamp(&json!(["2024-01-01"])), None);
        assert_eq!(parse_timestamp(&json!({"when": "2024-01-01"})), None);
    }
}
