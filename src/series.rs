//! The series builder: turns a list of raw slots into an ordered [`ForecastSeries`].

use crate::normalizer::normalize_slot;
use crate::types::forecast_row::{ForecastRow, NormalizedSlot};
use crate::types::raw_slot::{RawForecast, RawSlot};
use bon::bon;
use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use serde::Serialize;

/// How rows sharing the exact same timestamp are treated when a series is built.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum DuplicatePolicy {
    /// Keep every row. Rows with equal timestamps stay in input order.
    #[default]
    KeepAll,
    /// Keep only the first row (in input order) for each timestamp.
    KeepFirst,
}

/// An ordered, immutable sequence of [`ForecastRow`]s for one location.
///
/// Rows are sorted ascending by timestamp. A series may be empty, which is how
/// "no usable data" is represented; check [`ForecastSeries::is_empty`] before
/// summarizing or rendering.
///
/// # Examples
///
/// ```rust
/// use forecast_digest::{ForecastSeries, RawSlot};
///
/// let slots: Vec<RawSlot> = serde_json::from_str(
///     r#"[{"dt_txt": "2024-01-01 06:00:00", "main": {"temp": 25}},
///         {"dt_txt": "2024-01-01 00:00:00", "main": {"temp": 5}},
///         {"dt_txt": "not a time", "main": {"temp": 99}}]"#,
/// ).unwrap();
///
/// let series = ForecastSeries::builder()
///     .location("Lisbon")
///     .slots(&slots)
///     .build();
///
/// assert_eq!(series.len(), 2);
/// assert_eq!(series.rows()[0].reading.temperature, 5.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastSeries {
    location: String,
    rows: Vec<ForecastRow>,
}

#[bon]
impl ForecastSeries {
    /// Builds a series from raw slots.
    ///
    /// Every slot is normalized in input order; slots without a usable timestamp are
    /// dropped, the rest are stably sorted by timestamp and `duplicates` is applied
    /// (defaults to [`DuplicatePolicy::KeepAll`]).
    #[builder]
    pub fn new(
        #[builder(into)] location: String,
        slots: &[RawSlot],
        #[builder(default)] duplicates: DuplicatePolicy,
    ) -> Self {
        let mut rows: Vec<ForecastRow> = slots
            .iter()
            .map(normalize_slot)
            .filter_map(NormalizedSlot::into_row)
            .collect();

        let dropped = slots.len() - rows.len();
        if dropped > 0 {
            warn!(
                "Dropped {} of {} forecast slots for '{}' without a usable timestamp",
                dropped,
                slots.len(),
                location
            );
        }

        rows.sort_by_key(|row| row.timestamp);

        if duplicates == DuplicatePolicy::KeepFirst {
            let before = rows.len();
            rows.dedup_by_key(|row| row.timestamp);
            if rows.len() < before {
                debug!(
                    "Removed {} rows with duplicate timestamps for '{}'",
                    before - rows.len(),
                    location
                );
            }
        }

        match (rows.first(), rows.last()) {
            (Some(first), Some(last)) => info!(
                "Extracted {} rows for '{}' ({} -> {})",
                rows.len(),
                location,
                first.timestamp.date_naive(),
                last.timestamp.date_naive()
            ),
            _ => warn!("No usable forecast rows for '{}'", location),
        }

        Self { location, rows }
    }

    /// An explicitly empty series for `location`.
    pub fn empty(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            rows: Vec::new(),
        }
    }

    /// Builds a series from a whole provider response, using its city name as location.
    pub fn from_forecast(forecast: &RawForecast) -> Self {
        Self::builder()
            .location(forecast.city_name())
            .slots(&forecast.list)
            .build()
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn rows(&self) -> &[ForecastRow] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ForecastRow> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// First and last timestamp, or `None` for an empty series.
    pub fn period(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        Some((self.rows.first()?.timestamp, self.rows.last()?.timestamp))
    }
}

impl<'a> IntoIterator for &'a ForecastSeries {
    type Item = &'a ForecastRow;
    type IntoIter = std::slice::Iter<'a, ForecastRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn slots(value: serde_json::Value) -> Vec<RawSlot> {
        serde_json::from_value(value).unwrap()
    }

    fn shuffled_slots() -> Vec<RawSlot> {
        slots(json!([
            {"dt_txt": "2024-01-02 00:00:00", "main": {"temp": 4}},
            {"dt_txt": "2024-01-01 03:00:00", "main": {"temp": 2}},
            {"main": {"temp": 100}},
            {"dt_txt": "2024-01-01 21:00:00", "main": {"temp": 3}},
            {"dt_txt": "2024-01-01 00:00:00", "main": {"temp": 1}},
        ]))
    }

    #[test]
    fn test_rows_are_sorted_and_unparseable_dropped() {
        let series = ForecastSeries::builder()
            .location("Bergen")
            .slots(&shuffled_slots())
            .build();

        let temps: Vec<f64> = series.iter().map(|row| row.reading.temperature).collect();
        assert_eq!(temps, vec![1.0, 2.0, 3.0, 4.0]);
        assert!(series
            .rows()
            .windows(2)
            .all(|pair| pair[0].timestamp <= pair[1].timestamp));
        assert_eq!(series.location(), "Bergen");
    }

    #[test]
    fn test_order_does_not_depend_on_input_order() {
        let forward = shuffled_slots();
        let mut reversed = forward.clone();
        reversed.reverse();

        let a = ForecastSeries::builder().location("x").slots(&forward).build();
        let b = ForecastSeries::builder().location("x").slots(&reversed).build();
        assert_eq!(a, b);
    }

    #[test]
    fn test_empty_input_gives_empty_series() {
        let series = ForecastSeries::builder().location("Nowhere").slots(&[]).build();
        assert!(series.is_empty());
        assert_eq!(series.period(), None);
        assert_eq!(series, ForecastSeries::empty("Nowhere"));
    }

    #[test]
    fn test_all_rows_dropped_gives_empty_series() {
        let series = ForecastSeries::builder()
            .location("Nowhere")
            .slots(&slots(json!([{"dt_txt": ""}, {"dt_txt": null}, {}])))
            .build();
        assert!(series.is_empty());
    }

    #[test]
    fn test_duplicate_timestamps_kept_by_default_in_input_order() {
        let input = slots(json!([
            {"dt_txt": "2024-01-01 03:00:00", "main": {"temp": 10}},
            {"dt_txt": "2024-01-01 00:00:00", "main": {"temp": 1}},
            {"dt_txt": "2024-01-01 03:00:00", "main": {"temp": 20}},
        ]));

        let kept = ForecastSeries::builder().location("x").slots(&input).build();
        let temps: Vec<f64> = kept.iter().map(|row| row.reading.temperature).collect();
        assert_eq!(temps, vec![1.0, 10.0, 20.0]);

        let first_only = ForecastSeries::builder()
            .location("x")
            .slots(&input)
            .duplicates(DuplicatePolicy::KeepFirst)
            .build();
        let temps: Vec<f64> = first_only
            .iter()
            .map(|row| row.reading.temperature)
            .collect();
        assert_eq!(temps, vec![1.0, 10.0]);
    }

    #[test]
    fn test_from_forecast_uses_city_name() {
        let forecast: RawForecast = serde_json::from_value(json!({
            "city": {"name": "Tromsø"},
            "list": [{"dt_txt": "2024-01-01 00:00:00"}],
        }))
        .unwrap();

        let series = ForecastSeries::from_forecast(&forecast);
        assert_eq!(series.location(), "Tromsø");
        assert_eq!(
            series.period(),
            Some((
                Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
                Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
            ))
        );
    }
}
