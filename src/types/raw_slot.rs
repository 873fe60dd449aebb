//! Raw forecast shapes as delivered by an OpenWeatherMap-style provider (or synthesized
//! from a local CSV file).
//!
//! Every field is optional and deserialization is lenient: a nested group of the wrong
//! JSON type is treated as absent instead of failing the whole document. Numeric leaves
//! are kept as raw [`Value`]s so the normalizer can apply its own coercion and fallbacks.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Location name used when a response carries no usable `city.name`.
pub const UNKNOWN_CITY: &str = "Unknown City";

/// Deserializes `T` if the value has the expected shape, otherwise yields `None`.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Deserializes a slot list, keeping one entry per element. Elements that are not
/// objects become an empty slot, which is later dropped for lacking a timestamp.
fn lenient_slots<'de, D>(deserializer: D) -> Result<Vec<RawSlot>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => items
            .into_iter()
            .map(|item| serde_json::from_value(item).unwrap_or_default())
            .collect(),
        _ => Vec::new(),
    })
}

/// The `main` group of a slot: temperatures, humidity and pressure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MainGroup {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temp: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feels_like: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temp_min: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temp_max: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub humidity: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pressure: Option<Value>,
}

/// The `wind` group of a slot. Speed is in m/s, direction in degrees.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WindGroup {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deg: Option<Value>,
}

/// The `clouds` group of a slot. `all` is the cloud cover in percent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CloudGroup {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub all: Option<Value>,
}

/// One entry of the `weather` array. Only the first entry of a slot is used.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeatherTag {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<Value>,
}

/// A single forecast time slot, exactly as received.
///
/// `dt_txt` is the primary timestamp (e.g. `"2024-01-01 03:00:00"`); the numeric `dt`
/// (unix seconds) is used when `dt_txt` is missing or unparseable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawSlot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dt_txt: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dt: Option<Value>,
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub main: Option<MainGroup>,
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub wind: Option<WindGroup>,
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub clouds: Option<CloudGroup>,
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub weather: Option<Vec<WeatherTag>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pop: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<Value>,
}

impl RawSlot {
    /// The first `weather` entry, which carries the description and icon code.
    pub fn primary_weather(&self) -> Option<&WeatherTag> {
        self.weather.as_ref().and_then(|tags| tags.first())
    }
}

/// The `city` block of a forecast response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawCity {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<Value>,
}

/// A complete forecast response: the city block and the list of slots.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawForecast {
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub city: Option<RawCity>,
    #[serde(default, deserialize_with = "lenient_slots")]
    pub list: Vec<RawSlot>,
}

impl RawForecast {
    /// Builds a forecast document for `city` from already-shaped slots.
    pub fn new(city: &str, list: Vec<RawSlot>) -> Self {
        Self {
            city: Some(RawCity {
                name: Some(Value::from(city)),
            }),
            list,
        }
    }

    /// The location name, or [`UNKNOWN_CITY`] when the response has none.
    pub fn city_name(&self) -> String {
        match self.city.as_ref().and_then(|city| city.name.as_ref()) {
            Some(Value::String(name)) if !name.trim().is_empty() => name.clone(),
            _ => UNKNOWN_CITY.to_string(),
        }
    }
}
