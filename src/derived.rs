//! Derived meteorological quantities.
//!
//! All functions are pure and operate on unrounded inputs in metric units. The gated
//! variants ([`heat_index`], [`wind_chill`]) fall back to the plain air temperature
//! outside the regime their regression was fitted for.

/// Conversion factor from m/s to km/h.
pub const MS_TO_KMH: f64 = 3.6;

/// Lowest air temperature (°C, inclusive) at which the heat index regression applies.
pub const HEAT_INDEX_MIN_TEMPERATURE: f64 = 27.0;
/// Lowest relative humidity (%, inclusive) at which the heat index regression applies.
pub const HEAT_INDEX_MIN_HUMIDITY: f64 = 40.0;

/// Highest air temperature (°C, inclusive) at which the wind chill formula applies.
pub const WIND_CHILL_MAX_TEMPERATURE: f64 = 10.0;
/// Lowest wind speed (km/h, inclusive) at which the wind chill formula applies.
pub const WIND_CHILL_MIN_WIND_KMH: f64 = 4.8;

/// Floor applied to relative humidity before the dew point logarithm.
pub const DEW_POINT_MIN_HUMIDITY: f64 = 1.0;

// Magnus coefficients
const MAGNUS_A: f64 = 17.27;
const MAGNUS_B: f64 = 237.7;

pub fn ms_to_kmh(speed_ms: f64) -> f64 {
    speed_ms * MS_TO_KMH
}

pub fn celsius_to_fahrenheit(temp_c: f64) -> f64 {
    temp_c * 9.0 / 5.0 + 32.0
}

pub fn fahrenheit_to_celsius(temp_f: f64) -> f64 {
    (temp_f - 32.0) * 5.0 / 9.0
}

/// The Rothfusz heat index regression, without any gating.
///
/// The nine-term polynomial is evaluated in °F and the result converted back to °C.
/// Terms are summed in the published order so results are reproducible to the bit.
pub fn rothfusz_heat_index(temp_c: f64, humidity: f64) -> f64 {
    let t = celsius_to_fahrenheit(temp_c);
    let rh = humidity;
    let t2 = t * t;
    let rh2 = rh * rh;
    let hi = -42.379 + 2.04901523 * t + 10.14333127 * rh
        - 0.22475541 * t * rh
        - 0.00683783 * t2
        - 0.05481717 * rh2
        + 0.00122874 * t2 * rh
        + 0.00085282 * t * rh2
        - 0.00000199 * t2 * rh2;
    fahrenheit_to_celsius(hi)
}

/// Heat index in °C.
///
/// Applies [`rothfusz_heat_index`] when `temp_c >= 27` and `humidity >= 40`; otherwise
/// returns `temp_c` unchanged.
///
/// # Examples
///
/// ```rust
/// use forecast_digest::derived::heat_index;
///
/// assert_eq!(heat_index(26.9, 90.0), 26.9);
/// assert!(heat_index(32.0, 60.0) > 32.0);
/// ```
pub fn heat_index(temp_c: f64, humidity: f64) -> f64 {
    if temp_c >= HEAT_INDEX_MIN_TEMPERATURE && humidity >= HEAT_INDEX_MIN_HUMIDITY {
        rothfusz_heat_index(temp_c, humidity)
    } else {
        temp_c
    }
}

/// The JAG/TI wind chill formula, without any gating. `wind_kmh` is in km/h.
pub fn jag_ti_wind_chill(temp_c: f64, wind_kmh: f64) -> f64 {
    let v = wind_kmh.powf(0.16);
    13.12 + 0.6215 * temp_c - 11.37 * v + 0.3965 * temp_c * v
}

/// Wind chill in °C.
///
/// Applies [`jag_ti_wind_chill`] when `temp_c <= 10` and `wind_kmh >= 4.8`; otherwise
/// returns `temp_c` unchanged.
pub fn wind_chill(temp_c: f64, wind_kmh: f64) -> f64 {
    if temp_c <= WIND_CHILL_MAX_TEMPERATURE && wind_kmh >= WIND_CHILL_MIN_WIND_KMH {
        jag_ti_wind_chill(temp_c, wind_kmh)
    } else {
        temp_c
    }
}

/// Dew point in °C using the Magnus approximation.
///
/// Humidity is floored at 1 % so the logarithm stays finite for dry or missing readings.
pub fn dew_point(temp_c: f64, humidity: f64) -> f64 {
    let rh = humidity.max(DEW_POINT_MIN_HUMIDITY);
    let gamma = (MAGNUS_A * temp_c / (MAGNUS_B + temp_c)) + (rh / 100.0).ln();
    (MAGNUS_B * gamma) / (MAGNUS_A - gamma)
}

/// Converts a raw probability of precipitation to percent.
///
/// Values `<= 1` are read as a fraction and scaled by 100; anything above 1 is assumed
/// to already be a percentage. Exactly `1.0` therefore means 100 %.
pub fn precipitation_percent(raw: f64) -> f64 {
    if raw <= 1.0 {
        raw * 100.0
    } else {
        raw
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < EPSILON,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_heat_index_below_temperature_gate_is_identity() {
        assert_eq!(heat_index(26.9, 90.0), 26.9);
        assert_eq!(heat_index(-5.0, 100.0), -5.0);
    }

    #[test]
    fn test_heat_index_below_humidity_gate_is_identity() {
        assert_eq!(heat_index(35.0, 39.9), 35.0);
    }

    #[test]
    fn test_heat_index_regression_at_lower_boundary() {
        // Both gates are inclusive, so the regression is used at exactly 27 °C / 40 %.
        let value = heat_index(27.0, 40.0);
        assert_close(value, rothfusz_heat_index(27.0, 40.0));
        assert_close(value, 26.863173119555594);
    }

    #[test]
    fn test_heat_index_matches_reference_values() {
        assert_close(heat_index(30.0, 70.0), 35.038017555555435);
        assert_close(heat_index(27.0, 90.0), 30.735121408444456);
        assert_close(heat_index(32.0, 60.0), 37.07428412177793);
        assert!(heat_index(30.0, 70.0) >= 30.0);
    }

    #[test]
    fn test_wind_chill_above_temperature_gate_is_identity() {
        for wind in [0.0, 4.8, 20.0, 120.0] {
            assert_eq!(wind_chill(10.1, wind), 10.1);
        }
    }

    #[test]
    fn test_wind_chill_below_wind_gate_is_identity() {
        assert_eq!(wind_chill(-10.0, 4.79), -10.0);
    }

    #[test]
    fn test_wind_chill_formula_applies_at_boundary() {
        assert_close(wind_chill(10.0, 20.0), 7.376137784804066);
        assert_close(wind_chill(-5.0, 30.0), -12.996724811921073);
        assert!(wind_chill(10.0, 20.0) < 10.0);
    }

    #[test]
    fn test_dew_point_reference() {
        let dp = dew_point(20.0, 50.0);
        assert!((dp - 9.3).abs() <= 0.1, "dew point was {dp}");
        assert_close(dp, 9.254294282076941);
    }

    #[test]
    fn test_dew_point_floors_humidity() {
        assert_eq!(dew_point(15.0, 0.0), dew_point(15.0, 1.0));
        assert!(dew_point(15.0, 0.0).is_finite());
    }

    #[test]
    fn test_dew_point_at_saturation_equals_temperature() {
        assert_close(dew_point(12.5, 100.0), 12.5);
    }

    #[test]
    fn test_precipitation_scaling_converges() {
        assert_close(precipitation_percent(0.45), 45.0);
        assert_eq!(precipitation_percent(45.0), 45.0);
        assert_eq!(precipitation_percent(1.0), 100.0);
        assert_eq!(precipitation_percent(0.0), 0.0);
        assert_eq!(precipitation_percent(1.5), 1.5);
    }

    #[test]
    fn test_unit_conversions() {
        assert_eq!(ms_to_kmh(10.0), 36.0);
        assert_eq!(celsius_to_fahrenheit(100.0), 212.0);
        assert_eq!(fahrenheit_to_celsius(32.0), 0.0);
    }
}
