//! Aggregate statistics over a [`ForecastSeries`].

use crate::series::ForecastSeries;
use crate::types::forecast_row::{ForecastRow, DAY_LABEL_FORMAT};
use crate::utils::{mean, round_to};
use chrono::NaiveDate;
use ordered_float::OrderedFloat;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Scalar statistics over a whole series.
///
/// All values are rounded to one decimal, except `wind_max` (two decimals) and the
/// integer counts. A digest only exists for a non-empty series; see [`summarize`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryDigest {
    /// Mean of `temperature`.
    pub temp_avg: f64,
    /// Maximum of the per-slot `temperature_max`.
    pub temp_max: f64,
    /// Minimum of the per-slot `temperature_min`.
    pub temp_min: f64,
    pub humidity_avg: f64,
    pub pressure_avg: f64,
    /// Maximum `wind_speed` in m/s.
    pub wind_max: f64,
    /// Maximum probability of precipitation in percent.
    pub pop_max: f64,
    pub dew_point_avg: f64,
    pub total_slots: usize,
    /// Number of distinct calendar dates among the row timestamps.
    pub days_covered: usize,
}

impl SummaryDigest {
    /// The digest as a flat, name-keyed mapping.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use forecast_digest::{ForecastSeries, RawSlot};
    ///
    /// let slots: Vec<RawSlot> = serde_json::from_str(
    ///     r#"[{"dt_txt": "2024-01-01 00:00:00", "main": {"temp": 4.0}}]"#,
    /// ).unwrap();
    /// let series = ForecastSeries::builder().location("Riga").slots(&slots).build();
    ///
    /// let map = series.summarize().unwrap().to_map();
    /// assert_eq!(map["temp_avg"], 4.0);
    /// assert_eq!(map["total_slots"], 1.0);
    /// assert_eq!(map.len(), 10);
    /// ```
    pub fn to_map(&self) -> BTreeMap<&'static str, f64> {
        BTreeMap::from([
            ("temp_avg", self.temp_avg),
            ("temp_max", self.temp_max),
            ("temp_min", self.temp_min),
            ("humidity_avg", self.humidity_avg),
            ("pressure_avg", self.pressure_avg),
            ("wind_max", self.wind_max),
            ("pop_max", self.pop_max),
            ("dew_point_avg", self.dew_point_avg),
            ("total_slots", self.total_slots as f64),
            ("days_covered", self.days_covered as f64),
        ])
    }
}

fn max_of(values: impl Iterator<Item = f64>) -> Option<f64> {
    values.map(OrderedFloat).max().map(|value| value.0)
}

fn min_of(values: impl Iterator<Item = f64>) -> Option<f64> {
    values.map(OrderedFloat).min().map(|value| value.0)
}

fn field_mean(rows: &[ForecastRow], field: impl Fn(&ForecastRow) -> f64) -> Option<f64> {
    mean(rows.iter().map(field))
}

/// Computes the [`SummaryDigest`] of a series.
///
/// Returns `None` for an empty series: "no data" is distinct from zero-valued data.
pub fn summarize(series: &ForecastSeries) -> Option<SummaryDigest> {
    let rows = series.rows();
    if rows.is_empty() {
        return None;
    }

    let days: BTreeSet<NaiveDate> = rows.iter().map(|row| row.timestamp.date_naive()).collect();

    Some(SummaryDigest {
        temp_avg: round_to(field_mean(rows, |row| row.reading.temperature)?, 1),
        temp_max: round_to(max_of(rows.iter().map(|row| row.reading.temperature_max))?, 1),
        temp_min: round_to(min_of(rows.iter().map(|row| row.reading.temperature_min))?, 1),
        humidity_avg: round_to(field_mean(rows, |row| row.reading.humidity)?, 1),
        pressure_avg: round_to(field_mean(rows, |row| row.reading.pressure)?, 1),
        wind_max: round_to(max_of(rows.iter().map(|row| row.reading.wind_speed))?, 2),
        pop_max: round_to(
            max_of(rows.iter().map(|row| row.reading.precipitation_probability))?,
            1,
        ),
        dew_point_avg: round_to(field_mean(rows, |row| row.reading.dew_point)?, 1),
        total_slots: rows.len(),
        days_covered: days.len(),
    })
}

/// Aggregates for one calendar day of a series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyDigest {
    pub date: NaiveDate,
    /// Same format as [`ForecastRow::day_label`].
    pub day_label: String,
    pub temp_min: f64,
    pub temp_max: f64,
    pub humidity_avg: f64,
    pub wind_max: f64,
    pub pop_max: f64,
    /// Description of the day's first slot.
    pub description: String,
    pub slots: usize,
}

/// Groups a series by calendar date (UTC), in chronological order.
///
/// Values are left unrounded; callers format them for display.
pub fn daily_digests(series: &ForecastSeries) -> Vec<DailyDigest> {
    let mut days: BTreeMap<NaiveDate, Vec<&ForecastRow>> = BTreeMap::new();
    for row in series {
        days.entry(row.timestamp.date_naive()).or_default().push(row);
    }

    days.into_iter()
        .filter_map(|(date, rows)| {
            let first = rows.first()?;
            Some(DailyDigest {
                date,
                day_label: date.format(DAY_LABEL_FORMAT).to_string(),
                temp_min: min_of(rows.iter().map(|row| row.reading.temperature_min))?,
                temp_max: max_of(rows.iter().map(|row| row.reading.temperature_max))?,
                humidity_avg: mean(rows.iter().map(|row| row.reading.humidity))?,
                wind_max: max_of(rows.iter().map(|row| row.reading.wind_speed))?,
                pop_max: max_of(rows.iter().map(|row| row.reading.precipitation_probability))?,
                description: first.reading.description.clone(),
                slots: rows.len(),
            })
        })
        .collect()
}

impl ForecastSeries {
    /// See [`summarize`].
    pub fn summarize(&self) -> Option<SummaryDigest> {
        summarize(self)
    }

    /// See [`daily_digests`].
    pub fn daily_digests(&self) -> Vec<DailyDigest> {
        daily_digests(self)
    }
}
