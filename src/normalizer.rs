//! The record normalizer: one [`RawSlot`] in, one [`NormalizedSlot`] out.
//!
//! Field extraction never fails. A numeric leaf is coerced to `f64` when it is a JSON
//! number, a numeric string or a boolean; anything else (missing, null, non-finite,
//! unparseable) is replaced by the field's fallback constant below.

use crate::derived::{dew_point, heat_index, ms_to_kmh, precipitation_percent, wind_chill};
use crate::timestamp::slot_timestamp;
use crate::types::forecast_row::{NormalizedSlot, SlotReading};
use crate::types::raw_slot::RawSlot;
use serde_json::Value;

pub const DEFAULT_TEMPERATURE_C: f64 = 0.0;
pub const DEFAULT_HUMIDITY_PERCENT: f64 = 0.0;
/// Standard sea-level pressure.
pub const DEFAULT_PRESSURE_HPA: f64 = 1013.0;
pub const DEFAULT_WIND_SPEED_MS: f64 = 0.0;
pub const DEFAULT_WIND_DIRECTION_DEG: f64 = 0.0;
pub const DEFAULT_CLOUD_COVER_PERCENT: f64 = 0.0;
pub const DEFAULT_PRECIPITATION_PROBABILITY: f64 = 0.0;
/// The provider's maximum reported visibility.
pub const DEFAULT_VISIBILITY_M: f64 = 10_000.0;
pub const DEFAULT_DESCRIPTION: &str = "";
/// Clear sky, day.
pub const DEFAULT_ICON_CODE: &str = "01d";

const METERS_PER_KILOMETER: f64 = 1000.0;

/// Coerces a raw JSON leaf into a finite `f64`.
pub(crate) fn coerce_f64(value: Option<&Value>) -> Option<f64> {
    let number = match value? {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        Value::Bool(flag) => Some(if *flag { 1.0 } else { 0.0 }),
        _ => None,
    }?;
    number.is_finite().then_some(number)
}

fn numeric_or(value: Option<&Value>, fallback: f64) -> f64 {
    coerce_f64(value).unwrap_or(fallback)
}

fn text_or(value: Option<&Value>, fallback: &str) -> String {
    match value {
        Some(Value::String(text)) => text.clone(),
        Some(Value::Number(number)) => number.to_string(),
        _ => fallback.to_string(),
    }
}

/// Normalizes one raw slot.
///
/// This is a pure function of its input: calling it twice on the same slot yields equal
/// results. A slot whose timestamp cannot be resolved is returned with
/// `timestamp: None`; the series builder drops it.
///
/// # Examples
///
/// ```rust
/// use forecast_digest::{normalize_slot, RawSlot};
///
/// let slot: RawSlot = serde_json::from_str(
///     r#"{"dt_txt": "2024-01-01 12:00:00", "main": {"temp": 31.0, "humidity": 60},
///         "wind": {"speed": 2.5}, "pop": 0.45}"#,
/// ).unwrap();
///
/// let normalized = normalize_slot(&slot);
/// assert!(normalized.timestamp.is_some());
/// assert_eq!(normalized.reading.pressure, 1013.0);
/// assert_eq!(normalized.reading.wind_speed_kmh, 9.0);
/// assert!(normalized.reading.heat_index > 31.0);
/// ```
pub fn normalize_slot(slot: &RawSlot) -> NormalizedSlot {
    let main = slot.main.as_ref();
    let wind = slot.wind.as_ref();
    let weather = slot.primary_weather();

    let temperature = numeric_or(main.and_then(|m| m.temp.as_ref()), DEFAULT_TEMPERATURE_C);
    let feels_like = numeric_or(main.and_then(|m| m.feels_like.as_ref()), temperature);
    let temperature_min = numeric_or(main.and_then(|m| m.temp_min.as_ref()), temperature);
    let temperature_max = numeric_or(main.and_then(|m| m.temp_max.as_ref()), temperature);
    let humidity = numeric_or(
        main.and_then(|m| m.humidity.as_ref()),
        DEFAULT_HUMIDITY_PERCENT,
    );
    let pressure = numeric_or(main.and_then(|m| m.pressure.as_ref()), DEFAULT_PRESSURE_HPA);

    let wind_speed = numeric_or(wind.and_then(|w| w.speed.as_ref()), DEFAULT_WIND_SPEED_MS);
    let wind_direction = numeric_or(
        wind.and_then(|w| w.deg.as_ref()),
        DEFAULT_WIND_DIRECTION_DEG,
    );
    let cloud_cover = numeric_or(
        slot.clouds.as_ref().and_then(|c| c.all.as_ref()),
        DEFAULT_CLOUD_COVER_PERCENT,
    );
    let raw_pop = numeric_or(slot.pop.as_ref(), DEFAULT_PRECIPITATION_PROBABILITY);
    let visibility_m = numeric_or(slot.visibility.as_ref(), DEFAULT_VISIBILITY_M);

    let wind_speed_kmh = ms_to_kmh(wind_speed);

    NormalizedSlot {
        timestamp: slot_timestamp(slot),
        reading: SlotReading {
            temperature,
            feels_like,
            temperature_min,
            temperature_max,
            humidity,
            pressure,
            wind_speed,
            wind_speed_kmh,
            wind_direction: wind_direction.round(),
            cloud_cover,
            precipitation_probability: precipitation_percent(raw_pop),
            visibility_km: visibility_m / METERS_PER_KILOMETER,
            description: text_or(
                weather.and_then(|w| w.description.as_ref()),
                DEFAULT_DESCRIPTION,
            ),
            icon_code: text_or(weather.and_then(|w| w.icon.as_ref()), DEFAULT_ICON_CODE),
            heat_index: heat_index(temperature, humidity),
            wind_chill: wind_chill(temperature, wind_speed_kmh),
            dew_point: dew_point(temperature, humidity),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::derived::{jag_ti_wind_chill, rothfusz_heat_index};
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    fn slot(value: Value) -> RawSlot {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_empty_slot_uses_every_fallback() {
        let normalized = normalize_slot(&RawSlot::default());
        let reading = normalized.reading;

        assert_eq!(normalized.timestamp, None);
        assert_eq!(reading.temperature, DEFAULT_TEMPERATURE_C);
        assert_eq!(reading.feels_like, DEFAULT_TEMPERATURE_C);
        assert_eq!(reading.humidity, DEFAULT_HUMIDITY_PERCENT);
        assert_eq!(reading.pressure, DEFAULT_PRESSURE_HPA);
        assert_eq!(reading.wind_speed, 0.0);
        assert_eq!(reading.wind_direction, 0.0);
        assert_eq!(reading.cloud_cover, 0.0);
        assert_eq!(reading.precipitation_probability, 0.0);
        assert_eq!(reading.visibility_km, 10.0);
        assert_eq!(reading.description, "");
        assert_eq!(reading.icon_code, DEFAULT_ICON_CODE);
        assert_eq!(reading.heat_index, 0.0);
        assert_eq!(reading.wind_chill, 0.0);
        assert!(reading.dew_point.is_finite());
    }

    #[test]
    fn test_secondary_temperatures_fall_back_to_primary() {
        let reading = normalize_slot(&slot(json!({
            "main": {"temp": 12.5, "feels_like": null, "temp_min": "n/a"},
        })))
        .reading;

        assert_eq!(reading.feels_like, 12.5);
        assert_eq!(reading.temperature_min, 12.5);
        assert_eq!(reading.temperature_max, 12.5);
    }

    #[test]
    fn test_malformed_numbers_degrade_to_fallbacks() {
        let reading = normalize_slot(&slot(json!({
            "main": {"temp": "21.5", "humidity": [], "pressure": "high"},
            "wind": {"speed": true, "deg": {"x": 1}},
            "clouds": {"all": "NaN"},
            "visibility": "far",
        })))
        .reading;

        assert_eq!(reading.temperature, 21.5);
        assert_eq!(reading.humidity, DEFAULT_HUMIDITY_PERCENT);
        assert_eq!(reading.pressure, DEFAULT_PRESSURE_HPA);
        assert_eq!(reading.wind_speed, 1.0);
        assert_eq!(reading.wind_direction, DEFAULT_WIND_DIRECTION_DEG);
        assert_eq!(reading.cloud_cover, DEFAULT_CLOUD_COVER_PERCENT);
        assert_eq!(reading.visibility_km, 10.0);
    }

    #[test]
    fn test_units_are_converted() {
        let reading = normalize_slot(&slot(json!({
            "main": {"temp": 15.0},
            "wind": {"speed": 5.0, "deg": 271.6},
            "visibility": 7500,
        })))
        .reading;

        assert_eq!(reading.wind_speed_kmh, 18.0);
        assert_eq!(reading.wind_direction, 272.0);
        assert_eq!(reading.visibility_km, 7.5);
    }

    #[test]
    fn test_precipitation_probability_scaling() {
        let fraction = normalize_slot(&slot(json!({"pop": 0.45}))).reading;
        let percent = normalize_slot(&slot(json!({"pop": 45}))).reading;

        assert!((fraction.precipitation_probability - 45.0).abs() < 1e-9);
        assert_eq!(percent.precipitation_probability, 45.0);
    }

    #[test]
    fn test_derived_quantities_use_unrounded_inputs() {
        let hot = normalize_slot(&slot(json!({
            "main": {"temp": 30.04, "humidity": 70.04},
        })))
        .reading;
        assert_eq!(hot.heat_index, rothfusz_heat_index(30.04, 70.04));

        let cold = normalize_slot(&slot(json!({
            "main": {"temp": 2.04},
            "wind": {"speed": 5.55},
        })))
        .reading;
        assert_eq!(cold.wind_chill, jag_ti_wind_chill(2.04, 5.55 * 3.6));
    }

    #[test]
    fn test_description_and_icon_come_from_first_weather_entry() {
        let reading = normalize_slot(&slot(json!({
            "weather": [{"description": "light snow", "icon": "13n"}],
        })))
        .reading;
        assert_eq!(reading.description, "light snow");
        assert_eq!(reading.icon_code, "13n");

        let empty_list = normalize_slot(&slot(json!({"weather": []}))).reading;
        assert_eq!(empty_list.description, DEFAULT_DESCRIPTION);
        assert_eq!(empty_list.icon_code, DEFAULT_ICON_CODE);
    }

    #[test]
    fn test_timestamp_matches_source() {
        let normalized = normalize_slot(&slot(json!({"dt_txt": "2024-06-01 21:00:00"})));
        assert_eq!(
            normalized.timestamp,
            Some(Utc.with_ymd_and_hms(2024, 6, 1, 21, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_normalization_is_idempotent() {
        let raw = slot(json!({
            "dt_txt": "2024-01-01 00:00:00",
            "main": {"temp": 28.3, "humidity": 65, "pressure": 1009},
            "wind": {"speed": 3.2, "deg": 45},
            "clouds": {"all": 20},
            "weather": [{"description": "few clouds", "icon": "02d"}],
            "pop": 0.2,
            "visibility": 9000,
        }));
        assert_eq!(normalize_slot(&raw), normalize_slot(&raw));
    }
}
