//! Categorical views of wind measurements: the Beaufort scale and the 16-point compass.
//!
//! These are labels for display layers. They never feed back into the numeric values of
//! a [`ForecastRow`].

use crate::types::forecast_row::ForecastRow;
use serde::Serialize;
use std::fmt;

/// Wind strength on the Beaufort scale, derived from a speed in m/s.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, PartialOrd, Ord, Serialize)]
pub enum Beaufort {
    /// Force 0: below 0.5 m/s.
    Calm = 0,
    /// Force 1: below 1.5 m/s.
    LightAir = 1,
    /// Force 2: below 3.3 m/s.
    LightBreeze = 2,
    /// Force 3: below 5.5 m/s.
    GentleBreeze = 3,
    /// Force 4: below 7.9 m/s.
    ModerateBreeze = 4,
    /// Force 5: below 10.7 m/s.
    FreshBreeze = 5,
    /// Force 6: below 13.8 m/s.
    StrongBreeze = 6,
    /// Force 7: below 17.1 m/s.
    NearGale = 7,
    /// Force 8: below 20.7 m/s.
    Gale = 8,
    /// Force 9: below 24.4 m/s.
    SevereGale = 9,
    /// Force 10: below 28.4 m/s.
    Storm = 10,
    /// Force 11: below 32.6 m/s.
    ViolentStorm = 11,
    /// Force 12: 32.6 m/s and above.
    Hurricane = 12,
}

/// Exclusive upper speed limits (m/s) for every force below [`Beaufort::Hurricane`].
const BEAUFORT_LIMITS: [(f64, Beaufort); 12] = [
    (0.5, Beaufort::Calm),
    (1.5, Beaufort::LightAir),
    (3.3, Beaufort::LightBreeze),
    (5.5, Beaufort::GentleBreeze),
    (7.9, Beaufort::ModerateBreeze),
    (10.7, Beaufort::FreshBreeze),
    (13.8, Beaufort::StrongBreeze),
    (17.1, Beaufort::NearGale),
    (20.7, Beaufort::Gale),
    (24.4, Beaufort::SevereGale),
    (28.4, Beaufort::Storm),
    (32.6, Beaufort::ViolentStorm),
];

impl Beaufort {
    /// Classifies a wind speed given in m/s.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use forecast_digest::Beaufort;
    ///
    /// assert_eq!(Beaufort::from_speed(0.2), Beaufort::Calm);
    /// assert_eq!(Beaufort::from_speed(6.0), Beaufort::ModerateBreeze);
    /// assert_eq!(Beaufort::from_speed(40.0), Beaufort::Hurricane);
    /// ```
    pub fn from_speed(speed_ms: f64) -> Self {
        BEAUFORT_LIMITS
            .iter()
            .find(|(limit, _)| speed_ms < *limit)
            .map(|(_, force)| *force)
            .unwrap_or(Beaufort::Hurricane)
    }

    /// The force number, 0 to 12.
    pub fn force(&self) -> u8 {
        *self as u8
    }

    pub fn label(&self) -> &'static str {
        match self {
            Beaufort::Calm => "Calm",
            Beaufort::LightAir => "Light air",
            Beaufort::LightBreeze => "Light breeze",
            Beaufort::GentleBreeze => "Gentle breeze",
            Beaufort::ModerateBreeze => "Moderate breeze",
            Beaufort::FreshBreeze => "Fresh breeze",
            Beaufort::StrongBreeze => "Strong breeze",
            Beaufort::NearGale => "Near gale",
            Beaufort::Gale => "Gale",
            Beaufort::SevereGale => "Severe gale",
            Beaufort::Storm => "Storm",
            Beaufort::ViolentStorm => "Violent storm",
            Beaufort::Hurricane => "Hurricane",
        }
    }
}

impl fmt::Display for Beaufort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One of the 16 compass points, clockwise from north in 22.5° sectors.
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize)]
pub enum CompassPoint {
    N,
    NNE,
    NE,
    ENE,
    E,
    ESE,
    SE,
    SSE,
    S,
    SSW,
    SW,
    WSW,
    W,
    WNW,
    NW,
    NNW,
}

const COMPASS_POINTS: [CompassPoint; 16] = [
    CompassPoint::N,
    CompassPoint::NNE,
    CompassPoint::NE,
    CompassPoint::ENE,
    CompassPoint::E,
    CompassPoint::ESE,
    CompassPoint::SE,
    CompassPoint::SSE,
    CompassPoint::S,
    CompassPoint::SSW,
    CompassPoint::SW,
    CompassPoint::WSW,
    CompassPoint::W,
    CompassPoint::WNW,
    CompassPoint::NW,
    CompassPoint::NNW,
];

const SECTOR_DEGREES: f64 = 22.5;

impl CompassPoint {
    /// Maps a direction in degrees to its sector. Sectors start at the named bearing,
    /// so 0° to <22.5° is `N`. Any finite angle is accepted, including negative ones.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use forecast_digest::CompassPoint;
    ///
    /// assert_eq!(CompassPoint::from_degrees(0.0), CompassPoint::N);
    /// assert_eq!(CompassPoint::from_degrees(90.0), CompassPoint::E);
    /// assert_eq!(CompassPoint::from_degrees(359.0), CompassPoint::NNW);
    /// ```
    pub fn from_degrees(degrees: f64) -> Self {
        let normalized = degrees.rem_euclid(360.0);
        let index = (normalized / SECTOR_DEGREES) as usize % COMPASS_POINTS.len();
        COMPASS_POINTS[index]
    }

    pub fn abbreviation(&self) -> &'static str {
        match self {
            CompassPoint::N => "N",
            CompassPoint::NNE => "NNE",
            CompassPoint::NE => "NE",
            CompassPoint::ENE => "ENE",
            CompassPoint::E => "E",
            CompassPoint::ESE => "ESE",
            CompassPoint::SE => "SE",
            CompassPoint::SSE => "SSE",
            CompassPoint::S => "S",
            CompassPoint::SSW => "SSW",
            CompassPoint::SW => "SW",
            CompassPoint::WSW => "WSW",
            CompassPoint::W => "W",
            CompassPoint::WNW => "WNW",
            CompassPoint::NW => "NW",
            CompassPoint::NNW => "NNW",
        }
    }
}

impl fmt::Display for CompassPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbreviation())
    }
}

impl ForecastRow {
    pub fn beaufort(&self) -> Beaufort {
        Beaufort::from_speed(self.reading.wind_speed)
    }

    pub fn compass_point(&self) -> CompassPoint {
        CompassPoint::from_degrees(self.reading.wind_direction)
    }
}
