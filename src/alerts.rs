//! Rule-based weather alerts over a forecast series.

use crate::series::ForecastSeries;
use crate::types::forecast_row::ForecastRow;
use ordered_float::OrderedFloat;
use serde::Serialize;
use std::fmt;

/// Heat alert when the highest `temperature_max` reaches this value (°C).
pub const HEAT_ALERT_TEMPERATURE: f64 = 35.0;
/// Frost alert when the lowest `temperature_min` falls to this value (°C).
pub const FROST_ALERT_TEMPERATURE: f64 = 0.0;
/// Wind alert when the highest wind speed reaches this value (m/s).
pub const WIND_ALERT_SPEED_MS: f64 = 14.0;
/// Heavy rain risk when the highest probability of precipitation reaches this value (%).
pub const RAIN_ALERT_PROBABILITY: f64 = 70.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AlertKind {
    Heat,
    Frost,
    Wind,
    HeavyRain,
}

impl AlertKind {
    pub fn title(&self) -> &'static str {
        match self {
            AlertKind::Heat => "HEAT ALERT",
            AlertKind::Frost => "FROST ALERT",
            AlertKind::Wind => "WIND ALERT",
            AlertKind::HeavyRain => "HEAVY RAIN RISK",
        }
    }
}

/// A triggered alert with the observed extreme and the threshold it crossed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherAlert {
    pub kind: AlertKind,
    pub value: f64,
    pub threshold: f64,
}

impl fmt::Display for WeatherAlert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            AlertKind::Heat => write!(
                f,
                "Max temp {:.1}°C ≥ {:.0}°C",
                self.value, self.threshold
            ),
            AlertKind::Frost => write!(
                f,
                "Min temp {:.1}°C ≤ {:.0}°C",
                self.value, self.threshold
            ),
            AlertKind::Wind => write!(
                f,
                "Max wind {:.1} m/s, strong gusts likely",
                self.value
            ),
            AlertKind::HeavyRain => write!(
                f,
                "Precipitation probability peaks at {:.0}%",
                self.value
            ),
        }
    }
}

/// Evaluates the alert rules, in the order heat, frost, wind, heavy rain.
///
/// An empty series triggers nothing.
pub fn detect_alerts(series: &ForecastSeries) -> Vec<WeatherAlert> {
    let extreme = |pick: fn(&ForecastRow) -> f64, highest: bool| -> Option<f64> {
        let values = series.iter().map(|row| OrderedFloat(pick(row)));
        let found = if highest { values.max() } else { values.min() };
        found.map(|value| value.0)
    };

    let rules = [
        (
            AlertKind::Heat,
            extreme(|row| row.reading.temperature_max, true),
            HEAT_ALERT_TEMPERATURE,
        ),
        (
            AlertKind::Frost,
            extreme(|row| row.reading.temperature_min, false),
            FROST_ALERT_TEMPERATURE,
        ),
        (
            AlertKind::Wind,
            extreme(|row| row.reading.wind_speed, true),
            WIND_ALERT_SPEED_MS,
        ),
        (
            AlertKind::HeavyRain,
            extreme(|row| row.reading.precipitation_probability, true),
            RAIN_ALERT_PROBABILITY,
        ),
    ];

    rules
        .into_iter()
        .filter_map(|(kind, value, threshold)| {
            let value = value?;
            let triggered = match kind {
                AlertKind::Frost => value <= threshold,
                _ => value >= threshold,
            };
            triggered.then_some(WeatherAlert {
                kind,
                value,
                threshold,
            })
        })
        .collect()
}

impl ForecastSeries {
    /// See [`detect_alerts`].
    pub fn alerts(&self) -> Vec<WeatherAlert> {
        detect_alerts(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::raw_slot::RawSlot;
    use serde_json::json;

    fn series(value: serde_json::Value) -> ForecastSeries {
        let slots: Vec<RawSlot> = serde_json::from_value(value).unwrap();
        ForecastSeries::builder().location("Alertville").slots(&slots).build()
    }

    #[test]
    fn test_calm_series_has_no_alerts() {
        let series = series(json!([
            {"dt_txt": "2024-05-01 12:00:00", "main": {"temp": 18},
             "wind": {"speed": 4}, "pop": 0.1},
        ]));
        assert!(series.alerts().is_empty());
        assert!(detect_alerts(&ForecastSeries::empty("x")).is_empty());
    }

    #[test]
    fn test_every_rule_triggers_at_its_threshold() {
        let series = series(json!([
            {"dt_txt": "2024-07-01 12:00:00", "main": {"temp": 30, "temp_max": 35},
             "wind": {"speed": 14}, "pop": 70},
            {"dt_txt": "2024-07-02 03:00:00", "main": {"temp": 2, "temp_min": 0}},
        ]));
        let kinds: Vec<AlertKind> = series.alerts().iter().map(|alert| alert.kind).collect();
        assert_eq!(
            kinds,
            vec![
                AlertKind::Heat,
                AlertKind::Frost,
                AlertKind::Wind,
                AlertKind::HeavyRain
            ]
        );
    }

    #[test]
    fn test_alert_messages() {
        let heat = WeatherAlert {
            kind: AlertKind::Heat,
            value: 36.24,
            threshold: HEAT_ALERT_TEMPERATURE,
        };
        assert_eq!(heat.to_string(), "Max temp 36.2°C ≥ 35°C");
        assert_eq!(heat.kind.title(), "HEAT ALERT");

        let rain = WeatherAlert {
            kind: AlertKind::HeavyRain,
            value: 84.0,
            threshold: RAIN_ALERT_PROBABILITY,
        };
        assert_eq!(rain.to_string(), "Precipitation probability peaks at 84%");
    }
}
