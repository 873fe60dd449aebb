//! Normalized forecast rows.

use crate::utils::round_to;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// `strftime` pattern of [`ForecastRow::day_label`], e.g. `Mon 01 Jan`.
pub const DAY_LABEL_FORMAT: &str = "%a %d %b";
/// `strftime` pattern of [`ForecastRow::hour_label`], e.g. `03:00`.
pub const HOUR_LABEL_FORMAT: &str = "%H:%M";
/// `strftime` pattern of [`ForecastRow::display_label`], e.g. `Mon 01 Jan 03:00`.
pub const DISPLAY_LABEL_FORMAT: &str = "%a %d %b %H:%M";

/// The measured and derived values of one forecast slot, in metric units.
///
/// Values are kept at full precision. Use [`SlotReading::rounded`] to obtain the
/// presentation copy with the fixed per-field precision used for display and export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotReading {
    /// Air temperature in °C.
    pub temperature: f64,
    /// Perceived temperature in °C as reported by the provider.
    pub feels_like: f64,
    /// Minimum temperature in °C within the slot.
    pub temperature_min: f64,
    /// Maximum temperature in °C within the slot.
    pub temperature_max: f64,
    /// Relative humidity in percent.
    pub humidity: f64,
    /// Sea-level pressure in hPa.
    pub pressure: f64,
    /// Wind speed in m/s.
    pub wind_speed: f64,
    /// Wind speed in km/h, always `wind_speed * 3.6`.
    pub wind_speed_kmh: f64,
    /// Wind direction in whole degrees.
    pub wind_direction: f64,
    /// Cloud cover in percent.
    pub cloud_cover: f64,
    /// Probability of precipitation in percent (0-100).
    pub precipitation_probability: f64,
    /// Visibility in kilometres.
    pub visibility_km: f64,
    pub description: String,
    pub icon_code: String,
    /// Heat index in °C (equals `temperature` outside the hot and humid regime).
    pub heat_index: f64,
    /// Wind chill in °C (equals `temperature` outside the cold and windy regime).
    pub wind_chill: f64,
    /// Dew point in °C.
    pub dew_point: f64,
}

impl SlotReading {
    /// Returns a copy rounded to the display precision of each field: one decimal for
    /// temperatures, humidity, pressure, precipitation probability and km/h wind speed,
    /// two decimals for m/s wind speed and visibility, whole numbers for wind direction
    /// and cloud cover.
    pub fn rounded(&self) -> SlotReading {
        SlotReading {
            temperature: round_to(self.temperature, 1),
            feels_like: round_to(self.feels_like, 1),
            temperature_min: round_to(self.temperature_min, 1),
            temperature_max: round_to(self.temperature_max, 1),
            humidity: round_to(self.humidity, 1),
            pressure: round_to(self.pressure, 1),
            wind_speed: round_to(self.wind_speed, 2),
            wind_speed_kmh: round_to(self.wind_speed_kmh, 1),
            wind_direction: round_to(self.wind_direction, 0),
            cloud_cover: round_to(self.cloud_cover, 0),
            precipitation_probability: round_to(self.precipitation_probability, 1),
            visibility_km: round_to(self.visibility_km, 2),
            description: self.description.clone(),
            icon_code: self.icon_code.clone(),
            heat_index: round_to(self.heat_index, 1),
            wind_chill: round_to(self.wind_chill, 1),
            dew_point: round_to(self.dew_point, 1),
        }
    }
}

/// Output of the normalizer for one raw slot. A `None` timestamp marks the slot for
/// removal when the series is built.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedSlot {
    pub timestamp: Option<DateTime<Utc>>,
    pub reading: SlotReading,
}

impl NormalizedSlot {
    /// Converts into a [`ForecastRow`], or `None` if the slot has no usable timestamp.
    pub fn into_row(self) -> Option<ForecastRow> {
        let timestamp = self.timestamp?;
        Some(ForecastRow {
            timestamp,
            reading: self.reading,
        })
    }
}

/// One normalized, time-indexed forecast slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastRow {
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub reading: SlotReading,
}

impl ForecastRow {
    /// Day label of the timestamp, e.g. `Mon 01 Jan`.
    pub fn day_label(&self) -> String {
        self.timestamp.format(DAY_LABEL_FORMAT).to_string()
    }

    /// Clock label of the timestamp, e.g. `03:00`.
    pub fn hour_label(&self) -> String {
        self.timestamp.format(HOUR_LABEL_FORMAT).to_string()
    }

    /// Combined day and clock label, e.g. `Mon 01 Jan 03:00`.
    pub fn display_label(&self) -> String {
        self.timestamp.format(DISPLAY_LABEL_FORMAT).to_string()
    }
}
