//! End-to-end entry points: raw input in, series or export file out.

use crate::error::ForecastError;
use crate::series::ForecastSeries;
use crate::source::local_csv::LocalCsvSource;
use crate::types::raw_slot::RawForecast;
use std::path::{Path, PathBuf};

/// Parses a provider JSON document and builds its series.
///
/// # Examples
///
/// ```rust
/// use forecast_digest::build_from_json;
///
/// let series = build_from_json(
///     r#"{"city": {"name": "Ghent"},
///         "list": [{"dt_txt": "2024-01-01 00:00:00", "main": {"temp": 3.5}}]}"#,
/// ).unwrap();
/// assert_eq!(series.location(), "Ghent");
/// assert_eq!(series.summarize().unwrap().temp_avg, 3.5);
/// ```
pub fn build_from_json(document: &str) -> Result<ForecastSeries, ForecastError> {
    let forecast = RawForecast::from_json(document)?;
    Ok(ForecastSeries::from_forecast(&forecast))
}

/// Builds the series for `city` from a local CSV file, if one is available.
pub fn build_from_local_csv(
    source: &LocalCsvSource,
    city: &str,
) -> Result<Option<ForecastSeries>, ForecastError> {
    Ok(source
        .load(city)?
        .map(|forecast| ForecastSeries::from_forecast(&forecast)))
}

/// Writes `series` to `directory` under its conventional file name and returns the path.
pub fn export_csv(series: &ForecastSeries, directory: &Path) -> Result<PathBuf, ForecastError> {
    let path = directory.join(series.export_file_name());
    series.write_csv(&path)?;
    Ok(path)
}
