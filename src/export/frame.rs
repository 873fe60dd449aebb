use crate::export::error::ExportError;
use crate::series::ForecastSeries;
use crate::source::local_csv::{FILE_EXTENSION, FILE_PREFIX};
use crate::types::forecast_row::{ForecastRow, SlotReading};
use log::info;
use polars::prelude::*;
use std::fs::File;
use std::path::Path;

/// Layout of the `time` column.
pub const EXPORT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

fn float_column(name: &str, readings: &[SlotReading], field: fn(&SlotReading) -> f64) -> Column {
    Column::new(name.into(), readings.iter().map(field).collect::<Vec<f64>>())
}

fn text_column(name: &str, values: Vec<String>) -> Column {
    Column::new(name.into(), values)
}

impl ForecastSeries {
    /// Converts the series into a [`DataFrame`] with one row per forecast slot.
    ///
    /// Numeric columns carry the display precision of [`SlotReading::rounded`]. The
    /// frame for an empty series has all columns and zero rows.
    pub fn to_dataframe(&self) -> Result<DataFrame, ExportError> {
        let readings: Vec<SlotReading> = self.iter().map(|row| row.reading.rounded()).collect();
        let labels = |label: fn(&ForecastRow) -> String| -> Vec<String> {
            self.iter().map(label).collect()
        };

        let columns = vec![
            text_column(
                "time",
                self.iter()
                    .map(|row| row.timestamp.format(EXPORT_TIME_FORMAT).to_string())
                    .collect(),
            ),
            float_column("temp", &readings, |r| r.temperature),
            float_column("temp_min", &readings, |r| r.temperature_min),
            float_column("temp_max", &readings, |r| r.temperature_max),
            float_column("feels_like", &readings, |r| r.feels_like),
            float_column("humidity", &readings, |r| r.humidity),
            float_column("pressure", &readings, |r| r.pressure),
            float_column("wind_speed", &readings, |r| r.wind_speed),
            float_column("wind_kmh", &readings, |r| r.wind_speed_kmh),
            float_column("wind_deg", &readings, |r| r.wind_direction),
            float_column("pop", &readings, |r| r.precipitation_probability),
            float_column("clouds", &readings, |r| r.cloud_cover),
            float_column("visibility", &readings, |r| r.visibility_km),
            text_column(
                "description",
                readings.iter().map(|r| r.description.clone()).collect(),
            ),
            text_column("icon", readings.iter().map(|r| r.icon_code.clone()).collect()),
            float_column("heat_index", &readings, |r| r.heat_index),
            float_column("wind_chill", &readings, |r| r.wind_chill),
            float_column("dew_point", &readings, |r| r.dew_point),
            text_column("day_label", labels(ForecastRow::day_label)),
            text_column("hour_label", labels(ForecastRow::hour_label)),
            text_column("datetime_str", labels(ForecastRow::display_label)),
        ];

        DataFrame::new(columns).map_err(ExportError::DataFrame)
    }

    /// Conventional export file name, `weather_data_<location>.csv`.
    pub fn export_file_name(&self) -> String {
        format!("{}{}{}", FILE_PREFIX, self.location(), FILE_EXTENSION)
    }

    /// Writes the series as CSV with a header row to `path`, replacing any existing file.
    pub fn write_csv(&self, path: &Path) -> Result<(), ExportError> {
        let mut df = self.to_dataframe()?;
        let mut file =
            File::create(path).map_err(|e| ExportError::FileCreate(path.to_path_buf(), e))?;
        CsvWriter::new(&mut file)
            .include_header(true)
            .finish(&mut df)
            .map_err(|e| ExportError::CsvWrite(path.to_path_buf(), e))?;
        info!(
            "Exported {} rows for '{}' to {:?}",
            df.height(),
            self.location(),
            path
        );
        Ok(())
    }
}
