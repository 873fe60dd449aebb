use crate::source::error::SourceError;
use crate::types::raw_slot::{CloudGroup, MainGroup, RawForecast, RawSlot, WeatherTag, WindGroup};
use bon::bon;
use log::{info, warn};
use polars::prelude::*;
use serde_json::Value;
use std::path::{Path, PathBuf};

/// File name prefix shared by exported series and local fallback files.
pub const FILE_PREFIX: &str = "weather_data_";
pub const FILE_EXTENSION: &str = ".csv";

const METERS_PER_KILOMETER: f64 = 1000.0;

/// Reads forecast data from `weather_data_<city>.csv` files in a directory.
///
/// The files use the column layout produced by [`ForecastSeries::write_csv`]. Each row
/// is turned back into a [`RawSlot`] so it flows through the same normalizer as a
/// provider response.
///
/// [`ForecastSeries::write_csv`]: crate::ForecastSeries::write_csv
#[derive(Debug, Clone)]
pub struct LocalCsvSource {
    directory: PathBuf,
}

#[bon]
impl LocalCsvSource {
    /// Creates a source over `directory`, defaulting to the current working directory.
    #[builder]
    pub fn new(#[builder(into)] directory: Option<PathBuf>) -> Self {
        Self {
            directory: directory.unwrap_or_else(|| PathBuf::from(".")),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Loads the first matching, readable, non-empty file for `city`.
    ///
    /// Returns `Ok(None)` when no such file exists. Candidates are tried in file name
    /// order; a candidate that cannot be parsed as CSV is skipped with a warning. Only
    /// failing to list the directory itself is an error.
    pub fn load(&self, city: &str) -> Result<Option<RawForecast>, SourceError> {
        for path in self.candidates(city)? {
            let slots = match read_csv_slots(&path) {
                Ok(slots) => slots,
                Err(e) => {
                    warn!("Skipping unreadable forecast file {:?}: {}", path, e);
                    continue;
                }
            };
            if slots.is_empty() {
                warn!("Forecast file {:?} has no rows, skipping", path);
                continue;
            }
            info!(
                "Loaded local forecast fallback {:?} ({} rows) for '{}'",
                path,
                slots.len(),
                city
            );
            return Ok(Some(RawForecast::new(city, slots)));
        }

        info!(
            "No local forecast file for '{}' in {:?}",
            city, self.directory
        );
        Ok(None)
    }

    /// Files in the directory whose name matches `city`, sorted by name.
    fn candidates(&self, city: &str) -> Result<Vec<PathBuf>, SourceError> {
        let entries = std::fs::read_dir(&self.directory)
            .map_err(|e| SourceError::DirectoryRead(self.directory.clone(), e))?;

        let mut paths: Vec<PathBuf> = entries
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| path.is_file())
            .filter(|path| {
                path.file_name()
                    .and_then(|name| name.to_str())
                    .is_some_and(|name| matches_city(name, city))
            })
            .collect();
        paths.sort();
        Ok(paths)
    }
}

impl Default for LocalCsvSource {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Whether `file_name` is a forecast file for `city`. Case-insensitive; the city only
/// needs to appear somewhere in the name.
pub fn matches_city(file_name: &str, city: &str) -> bool {
    let name = file_name.to_lowercase();
    name.starts_with(FILE_PREFIX)
        && name.ends_with(FILE_EXTENSION)
        && name.contains(&city.trim().to_lowercase())
}

/// Column only present in files written by [`ForecastSeries::write_csv`], whose `pop`
/// column is always a percentage.
///
/// [`ForecastSeries::write_csv`]: crate::ForecastSeries::write_csv
const EXPORT_MARKER_COLUMN: &str = "wind_kmh";

/// Scales a percentage back to a fraction.
///
/// With `always_percent` every value is divided by 100. Otherwise only values above 1
/// are; values at or below 1 are taken as fractions already.
fn pop_fraction(pop: Option<f64>, always_percent: bool) -> f64 {
    match pop {
        Some(value) if always_percent || value > 1.0 => value / 100.0,
        Some(value) => value,
        None => 0.0,
    }
}

fn float_column(df: &DataFrame, name: &str) -> PolarsResult<Vec<Option<f64>>> {
    match df.column(name) {
        Ok(column) => {
            let series = column.as_materialized_series().cast(&DataType::Float64)?;
            Ok(series.f64()?.into_iter().collect())
        }
        Err(_) => Ok(vec![None; df.height()]),
    }
}

fn text_column(df: &DataFrame, name: &str) -> PolarsResult<Vec<Option<String>>> {
    match df.column(name) {
        Ok(column) => {
            let series = column.as_materialized_series().cast(&DataType::String)?;
            Ok(series
                .str()?
                .into_iter()
                .map(|value| value.map(str::to_string))
                .collect())
        }
        Err(_) => Ok(vec![None; df.height()]),
    }
}

fn number(value: Option<f64>) -> Option<Value> {
    value.map(Value::from)
}

fn text(value: Option<&String>) -> Option<Value> {
    value.map(|text| Value::from(text.as_str()))
}

/// Reads one CSV file into raw slots, one per row.
///
/// Missing columns and empty cells become absent fields. `visibility` is stored in
/// kilometers and converted back to meters.
fn read_csv_slots(path: &Path) -> Result<Vec<RawSlot>, SourceError> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| SourceError::CsvRead(path.to_path_buf(), e))?
        .finish()
        .map_err(|e| SourceError::CsvRead(path.to_path_buf(), e))?;

    let floats = |name: &str| {
        float_column(&df, name).map_err(|e| SourceError::CsvColumn {
            path: path.to_path_buf(),
            column: name.to_string(),
            source: e,
        })
    };
    let texts = |name: &str| {
        text_column(&df, name).map_err(|e| SourceError::CsvColumn {
            path: path.to_path_buf(),
            column: name.to_string(),
            source: e,
        })
    };

    let time = texts("time")?;
    let temp = floats("temp")?;
    let temp_min = floats("temp_min")?;
    let temp_max = floats("temp_max")?;
    let feels_like = floats("feels_like")?;
    let humidity = floats("humidity")?;
    let pressure = floats("pressure")?;
    let wind_speed = floats("wind_speed")?;
    let wind_deg = floats("wind_deg")?;
    let clouds = floats("clouds")?;
    let pop = floats("pop")?;
    let pop_is_percent = df.column(EXPORT_MARKER_COLUMN).is_ok();
    let visibility = floats("visibility")?;
    let description = texts("description")?;
    let icon = texts("icon")?;

    let slots = (0..df.height())
        .map(|i| RawSlot {
            dt_txt: text(time[i].as_ref()),
            dt: None,
            main: Some(MainGroup {
                temp: number(temp[i]),
                feels_like: number(feels_like[i]),
                temp_min: number(temp_min[i]),
                temp_max: number(temp_max[i]),
                humidity: number(humidity[i]),
                pressure: number(pressure[i]),
            }),
            wind: Some(WindGroup {
                speed: number(wind_speed[i]),
                deg: number(wind_deg[i]),
            }),
            clouds: Some(CloudGroup {
                all: number(clouds[i]),
            }),
            weather: Some(vec![WeatherTag {
                description: text(description[i].as_ref()),
                icon: text(icon[i].as_ref()),
            }]),
            pop: Some(Value::from(pop_fraction(pop[i], pop_is_percent))),
            visibility: number(visibility[i].map(|km| km * METERS_PER_KILOMETER)),
        })
        .collect();
    Ok(slots)
}
