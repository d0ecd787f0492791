//! Core data models for route briefings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::reports::TafOutlook;
use crate::spatial::normalize_lon_deg;

/// A geographic position in decimal degrees.
///
/// Longitude is kept in [-180, 180).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum CoordinateError {
    #[error("coordinates must be finite (lat={lat}, lon={lon})")]
    NotFinite { lat: f64, lon: f64 },
    #[error("latitude {0} is outside [-90, 90]")]
    LatitudeOutOfRange(f64),
    #[error("longitude {0} is outside [-180, 180]")]
    LongitudeOutOfRange(f64),
}

impl GeoPoint {
    /// Create a point, normalising the longitude into [-180, 180).
    pub fn new(lat: f64, lon: f64) -> Self {
        Self {
            lat,
            lon: normalize_lon_deg(lon),
        }
    }

    /// Create a point from untrusted input.
    pub fn try_new(lat: f64, lon: f64) -> Result<Self, CoordinateError> {
        if !lat.is_finite() || !lon.is_finite() {
            return Err(CoordinateError::NotFinite { lat, lon });
        }
        if !(-90.0..=90.0).contains(&lat) {
            return Err(CoordinateError::LatitudeOutOfRange(lat));
        }
        if !(-180.0..=180.0).contains(&lon) {
            return Err(CoordinateError::LongitudeOutOfRange(lon));
        }
        Ok(Self::new(lat, lon))
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4},{:.4}", self.lat, self.lon)
    }
}

/// Reported surface wind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wind {
    /// Direction the wind blows from, degrees true. `None` when variable.
    #[serde(default)]
    pub direction_deg: Option<f64>,
    pub speed_kt: f64,
    #[serde(default)]
    pub gust_kt: Option<f64>,
}

impl Wind {
    pub fn new(direction_deg: f64, speed_kt: f64) -> Self {
        Self {
            direction_deg: Some(direction_deg),
            speed_kt,
            gust_kt: None,
        }
    }

    pub fn variable(speed_kt: f64) -> Self {
        Self {
            direction_deg: None,
            speed_kt,
            gust_kt: None,
        }
    }
}

/// Flight category derived from ceiling and visibility.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FlightCategory {
    #[default]
    Vfr,
    Mvfr,
    Ifr,
    Lifr,
}

impl FlightCategory {
    /// Map a reported category string. Only the exact upper-case codes are
    /// recognised; anything else is VFR.
    pub fn from_report(value: Option<&str>) -> Self {
        match value {
            Some("MVFR") => Self::Mvfr,
            Some("IFR") => Self::Ifr,
            Some("LIFR") => Self::Lifr,
            _ => Self::Vfr,
        }
    }

    /// IFR and LIFR are treated as adverse for alternative routing.
    pub fn is_adverse(self) -> bool {
        matches!(self, Self::Ifr | Self::Lifr)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Vfr => "VFR",
            Self::Mvfr => "MVFR",
            Self::Ifr => "IFR",
            Self::Lifr => "LIFR",
        }
    }
}

impl fmt::Display for FlightCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Observed surface conditions used for the weather charts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    #[serde(default)]
    pub observed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub temperature_c: Option<f64>,
    #[serde(default)]
    pub dewpoint_c: Option<f64>,
    #[serde(default)]
    pub visibility_sm: Option<f64>,
    #[serde(default)]
    pub altimeter_inhg: Option<f64>,
}

/// One airport stop on the briefed route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteLeg {
    pub icao: String,
    #[serde(default)]
    pub name: Option<String>,
    /// Absent when the report carried no usable coordinates.
    #[serde(default)]
    pub position: Option<GeoPoint>,
    #[serde(default)]
    pub wind: Option<Wind>,
    #[serde(default)]
    pub category: FlightCategory,
    #[serde(default)]
    pub observation: Option<Observation>,
    #[serde(default)]
    pub raw_metar: Option<String>,
    #[serde(default)]
    pub raw_taf: Option<String>,
    #[serde(default)]
    pub taf_outlook: TafOutlook,
}

impl RouteLeg {
    /// A bare leg with no position, wind or reports.
    pub fn new(icao: impl Into<String>) -> Self {
        Self {
            icao: icao.into(),
            name: None,
            position: None,
            wind: None,
            category: FlightCategory::Vfr,
            observation: None,
            raw_metar: None,
            raw_taf: None,
            taf_outlook: TafOutlook::Unavailable,
        }
    }

    pub fn with_position(mut self, position: GeoPoint) -> Self {
        self.position = Some(position);
        self
    }

    pub fn with_wind(mut self, wind: Wind) -> Self {
        self.wind = Some(wind);
        self
    }

    pub fn with_category(mut self, category: FlightCategory) -> Self {
        self.category = category;
        self
    }
}

/// Static cruise performance for a supported aircraft type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AircraftProfile {
    pub code: &'static str,
    pub name: &'static str,
    pub cruise_tas_kt: f64,
    /// Burn per hour, expressed in `fuel_unit`.
    pub fuel_burn_per_hour: f64,
    pub fuel_unit: &'static str,
}

/// Whole hours plus remaining minutes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrouteTime {
    pub hours: u32,
    pub minutes: u32,
}

impl EnrouteTime {
    /// Round to the nearest whole minute, then split.
    pub fn from_hours(hours: f64) -> Self {
        if !hours.is_finite() || hours <= 0.0 {
            return Self::default();
        }
        let total_minutes = (hours * 60.0).round() as u32;
        Self {
            hours: total_minutes / 60,
            minutes: total_minutes % 60,
        }
    }
}

impl fmt::Display for EnrouteTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}h {}m", self.hours, self.minutes)
    }
}

/// Aggregate distance, time and fuel for a route.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PerformanceResult {
    pub total_distance_nm: f64,
    pub total_time: EnrouteTime,
    pub total_time_hours: f64,
    pub total_fuel: f64,
    pub aircraft: AircraftProfile,
}

impl PerformanceResult {
    pub fn zero(aircraft: AircraftProfile) -> Self {
        Self {
            total_distance_nm: 0.0,
            total_time: EnrouteTime::default(),
            total_time_hours: 0.0,
            total_fuel: 0.0,
            aircraft,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flight_category_defaults_to_vfr() {
        assert_eq!(FlightCategory::from_report(Some("IFR")), FlightCategory::Ifr);
        assert_eq!(FlightCategory::from_report(Some("LIFR")), FlightCategory::Lifr);
        assert_eq!(FlightCategory::from_report(Some("ifr")), FlightCategory::Vfr);
        assert_eq!(FlightCategory::from_report(Some(" lifr ")), FlightCategory::Vfr);
        assert_eq!(FlightCategory::from_report(Some(" LIFR ")), FlightCategory::Vfr);
        assert_eq!(FlightCategory::from_report(Some("MVFR")), FlightCategory::Mvfr);
        assert_eq!(FlightCategory::from_report(Some("UNKN")), FlightCategory::Vfr);
        assert_eq!(FlightCategory::from_report(None), FlightCategory::Vfr);
        assert!(FlightCategory::Lifr.is_adverse());
        assert!(!FlightCategory::Mvfr.is_adverse());
    }

    #[test]
    fn enroute_time_rounds_to_minute() {
        let t = EnrouteTime::from_hours(1.0);
        assert_eq!(t, EnrouteTime { hours: 1, minutes: 0 });
        assert_eq!(t.to_string(), "1h 0m");

        // 2h 29.6m rounds up to 2h 30m
        let t = EnrouteTime::from_hours(2.0 + 29.6 / 60.0);
        assert_eq!(t, EnrouteTime { hours: 2, minutes: 30 });

        // 59.7 minutes rolls over into the hour
        let t = EnrouteTime::from_hours(59.7 / 60.0);
        assert_eq!(t, EnrouteTime { hours: 1, minutes: 0 });
    }

    #[test]
    fn try_new_rejects_bad_coordinates() {
        assert!(GeoPoint::try_new(91.0, 0.0).is_err());
        assert!(GeoPoint::try_new(0.0, 181.0).is_err());
        assert!(GeoPoint::try_new(f64::NAN, 0.0).is_err());

        let p = GeoPoint::try_new(10.0, 180.0).unwrap();
        assert_eq!(p.lon, -180.0);
    }

    #[test]
    fn flight_category_serializes_uppercase() {
        let json = serde_json::to_string(&FlightCategory::Mvfr).unwrap();
        assert_eq!(json, "\"MVFR\"");
    }
}
