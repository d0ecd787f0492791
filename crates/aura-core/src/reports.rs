//! Weather report parsing contract.
//!
//! Reports are accepted in exactly one schema, the aviationweather.gov JSON
//! data API (`/api/data/metar?format=json`, `/api/data/taf?format=json`).
//! Records are validated when parsed and canonicalised into [`RouteLeg`]s in
//! a single step by [`map_reports_to_legs`].

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::LazyLock;
use thiserror::Error;

use crate::models::{CoordinateError, FlightCategory, GeoPoint, Observation, RouteLeg, Wind};

/// hPa to inches of mercury.
const HPA_TO_INHG: f64 = 0.029_529_983;

/// Schema versions understood by the parser.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportSchema {
    #[default]
    AviationWeatherV1,
}

impl ReportSchema {
    pub fn name(self) -> &'static str {
        match self {
            Self::AviationWeatherV1 => "aviationweather-v1",
        }
    }
}

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("malformed report payload: {0}")]
    Json(#[from] serde_json::Error),
    #[error("report #{index} has no station identifier")]
    MissingStation { index: usize },
    #[error("report for {station} has invalid coordinates")]
    InvalidCoordinates {
        station: String,
        #[source]
        source: CoordinateError,
    },
}

/// Wind direction as reported: degrees, or text such as `"VRB"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WindDirection {
    Degrees(f64),
    Text(String),
}

impl WindDirection {
    /// Direction in degrees true; `None` for variable winds.
    pub fn degrees(&self) -> Option<f64> {
        match self {
            Self::Degrees(deg) => Some(*deg),
            Self::Text(text) => text.trim().parse().ok(),
        }
    }
}

/// Prevailing visibility as reported: statute miles, or text such as `"10+"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Visibility {
    Miles(f64),
    Text(String),
}

impl Visibility {
    pub fn statute_miles(&self) -> Option<f64> {
        match self {
            Self::Miles(sm) => Some(*sm),
            Self::Text(text) => text.trim().trim_end_matches('+').parse().ok(),
        }
    }
}

/// One METAR record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetarRecord {
    pub icao_id: String,
    #[serde(default)]
    pub name: Option<String>,
    /// Observation time, unix seconds.
    #[serde(default)]
    pub obs_time: Option<i64>,
    #[serde(default)]
    pub temp: Option<f64>,
    #[serde(default)]
    pub dewp: Option<f64>,
    #[serde(default)]
    pub wdir: Option<WindDirection>,
    #[serde(default)]
    pub wspd: Option<f64>,
    #[serde(default)]
    pub wgst: Option<f64>,
    #[serde(default)]
    pub visib: Option<Visibility>,
    /// Altimeter setting, hPa.
    #[serde(default)]
    pub altim: Option<f64>,
    #[serde(default)]
    pub flt_cat: Option<String>,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
    #[serde(default)]
    pub raw_ob: Option<String>,
}

/// One TAF record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TafRecord {
    #[serde(rename = "icaoId")]
    pub icao_id: String,
    #[serde(rename = "rawTAF", default)]
    pub raw_taf: Option<String>,
    #[serde(rename = "issueTime", default)]
    pub issue_time: Option<String>,
}

impl MetarRecord {
    pub fn station(&self) -> String {
        self.icao_id.trim().to_ascii_uppercase()
    }

    /// Validated position; `None` when either coordinate is missing.
    pub fn position(&self) -> Result<Option<GeoPoint>, CoordinateError> {
        match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => GeoPoint::try_new(lat, lon).map(Some),
            _ => Ok(None),
        }
    }

    pub fn wind(&self) -> Option<Wind> {
        let speed_kt = self.wspd?;
        Some(Wind {
            direction_deg: self.wdir.as_ref().and_then(WindDirection::degrees),
            speed_kt,
            gust_kt: self.wgst,
        })
    }

    pub fn observation(&self) -> Observation {
        Observation {
            observed_at: self
                .obs_time
                .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0)),
            temperature_c: self.temp,
            dewpoint_c: self.dewp,
            visibility_sm: self.visib.as_ref().and_then(Visibility::statute_miles),
            altimeter_inhg: self.altim.map(|hpa| hpa * HPA_TO_INHG),
        }
    }
}

impl TafRecord {
    pub fn station(&self) -> String {
        self.icao_id.trim().to_ascii_uppercase()
    }
}

/// Parse a METAR JSON array, rejecting records without a station or with
/// out-of-range coordinates.
pub fn parse_metar_reports(json: &str) -> Result<Vec<MetarRecord>, ReportError> {
    let records: Vec<MetarRecord> = serde_json::from_str(json)?;
    validate_metar_records(&records)?;
    Ok(records)
}

/// Validate already-deserialised METAR records.
pub fn validate_metar_records(records: &[MetarRecord]) -> Result<(), ReportError> {
    for (index, record) in records.iter().enumerate() {
        if record.icao_id.trim().is_empty() {
            return Err(ReportError::MissingStation { index });
        }
        record
            .position()
            .map_err(|source| ReportError::InvalidCoordinates {
                station: record.station(),
                source,
            })?;
    }
    Ok(())
}

/// Parse a TAF JSON array, rejecting records without a station.
pub fn parse_taf_reports(json: &str) -> Result<Vec<TafRecord>, ReportError> {
    let records: Vec<TafRecord> = serde_json::from_str(json)?;
    validate_taf_records(&records)?;
    Ok(records)
}

pub fn validate_taf_records(records: &[TafRecord]) -> Result<(), ReportError> {
    match records.iter().position(|r| r.icao_id.trim().is_empty()) {
        Some(index) => Err(ReportError::MissingStation { index }),
        None => Ok(()),
    }
}

/// Canonicalise reports into legs: one per METAR, in METAR order, with the
/// matching TAF attached by station.
pub fn map_reports_to_legs(metars: &[MetarRecord], tafs: &[TafRecord]) -> Vec<RouteLeg> {
    let taf_by_station: HashMap<String, &TafRecord> = tafs
        .iter()
        .filter(|taf| !taf.icao_id.trim().is_empty())
        .map(|taf| (taf.station(), taf))
        .collect();

    metars
        .iter()
        .map(|metar| {
            let icao = metar.station();
            let position = metar.position().unwrap_or_else(|err| {
                tracing::warn!(station = %icao, error = %err, "dropping invalid report coordinates");
                None
            });
            let raw_taf = taf_by_station
                .get(&icao)
                .and_then(|taf| taf.raw_taf.clone())
                .filter(|raw| !raw.trim().is_empty());

            RouteLeg {
                name: metar.name.clone(),
                position,
                wind: metar.wind(),
                category: FlightCategory::from_report(metar.flt_cat.as_deref()),
                observation: Some(metar.observation()),
                raw_metar: metar.raw_ob.clone(),
                taf_outlook: TafOutlook::from_raw(raw_taf.as_deref()),
                raw_taf,
                icao,
            }
        })
        .collect()
}

/// Arrange legs in route order.
///
/// Stations in the route without a report become bare legs so the briefing
/// still lists them; legs for stations outside the route are dropped. An
/// empty route keeps the legs as given.
pub fn order_legs_by_route(legs: &[RouteLeg], route: &[String]) -> Vec<RouteLeg> {
    if route.is_empty() {
        return legs.to_vec();
    }

    let mut by_station: HashMap<&str, &RouteLeg> = HashMap::new();
    for leg in legs {
        by_station.entry(leg.icao.as_str()).or_insert(leg);
    }

    route
        .iter()
        .map(|ident| {
            by_station.get(ident.as_str()).map_or_else(
                || {
                    tracing::debug!(station = %ident, "no report for route station");
                    RouteLeg::new(ident.clone())
                },
                |leg| (*leg).clone(),
            )
        })
        .collect()
}

static LOW_CEILINGS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"OVC00\d|BKN00\d").unwrap());
static SHOWERS_OR_STORMS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"SHRA|TS").unwrap());
static REDUCED_VISIBILITY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"BR|FG").unwrap());

/// Coarse forecast outlook derived from raw TAF text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TafOutlook {
    LowCeilings,
    ShowersOrStorms,
    ReducedVisibility,
    NoSignificantChange,
    #[default]
    Unavailable,
}

impl TafOutlook {
    /// Classify raw TAF text. Earlier rules win.
    pub fn from_raw(raw: Option<&str>) -> Self {
        let Some(raw) = raw.map(str::trim).filter(|raw| !raw.is_empty()) else {
            return Self::Unavailable;
        };
        if LOW_CEILINGS.is_match(raw) {
            Self::LowCeilings
        } else if SHOWERS_OR_STORMS.is_match(raw) {
            Self::ShowersOrStorms
        } else if REDUCED_VISIBILITY.is_match(raw) {
            Self::ReducedVisibility
        } else {
            Self::NoSignificantChange
        }
    }

    pub fn summary(self) -> &'static str {
        match self {
            Self::LowCeilings => "Low ceilings likely",
            Self::ShowersOrStorms => "Showers or storms possible",
            Self::ReducedVisibility => "Reduced visibility possible",
            Self::NoSignificantChange => "No significant changes expected",
            Self::Unavailable => "No forecast available",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const METARS: &str = r#"[
        {
            "icaoId": "KJFK",
            "name": "New York/JF Kennedy Intl, NY, US",
            "obsTime": 1760688000,
            "temp": 14.4,
            "dewp": 12.2,
            "wdir": 40,
            "wspd": 12,
            "wgst": 20,
            "visib": "10+",
            "altim": 1013.2,
            "fltCat": "VFR",
            "lat": 40.6392,
            "lon": -73.7639,
            "rawOb": "KJFK 171751Z 04012G20KT 10SM FEW050 14/12 A2992"
        },
        {
            "icaoId": "kbos",
            "wdir": "VRB",
            "wspd": 3,
            "visib": 0.5,
            "fltCat": "LIFR",
            "lat": 42.3606,
            "lon": -71.0097,
            "rawOb": "KBOS 171754Z VRB03KT 1/2SM FG VV002 11/11 A2990"
        },
        {
            "icaoId": "KXYZ",
            "fltCat": "SOMETHING"
        }
    ]"#;

    const TAFS: &str = r#"[
        {"icaoId": "KBOS", "rawTAF": "TAF KBOS 171720Z 1718/1824 VRB03KT 1/2SM FG OVC002", "issueTime": "2025-10-17T17:20:00.000Z"},
        {"icaoId": "KJFK", "rawTAF": "TAF KJFK 171720Z 1718/1824 04012KT P6SM FEW050"}
    ]"#;

    #[test]
    fn parses_and_canonicalises_reports() {
        let metars = parse_metar_reports(METARS).unwrap();
        let tafs = parse_taf_reports(TAFS).unwrap();
        let legs = map_reports_to_legs(&metars, &tafs);

        assert_eq!(legs.len(), 3);
        assert_eq!(legs[0].icao, "KJFK");
        assert_eq!(legs[0].category, FlightCategory::Vfr);
        assert_eq!(legs[0].wind, Some(Wind { direction_deg: Some(40.0), speed_kt: 12.0, gust_kt: Some(20.0) }));
        assert_eq!(legs[0].taf_outlook, TafOutlook::NoSignificantChange);
        let obs = legs[0].observation.as_ref().unwrap();
        assert_eq!(obs.visibility_sm, Some(10.0));
        assert!((obs.altimeter_inhg.unwrap() - 29.92).abs() < 0.01);
        assert!(obs.observed_at.is_some());

        assert_eq!(legs[1].icao, "KBOS");
        assert_eq!(legs[1].category, FlightCategory::Lifr);
        assert_eq!(legs[1].wind.unwrap().direction_deg, None);
        assert_eq!(legs[1].taf_outlook, TafOutlook::LowCeilings);

        assert_eq!(legs[2].category, FlightCategory::Vfr);
        assert_eq!(legs[2].position, None);
        assert_eq!(legs[2].wind, None);
        assert_eq!(legs[2].taf_outlook, TafOutlook::Unavailable);
    }

    #[test]
    fn lowercase_category_is_not_adverse() {
        let metars = parse_metar_reports(r#"[{"icaoId": "KJFK", "fltCat": "ifr"}]"#).unwrap();
        let legs = map_reports_to_legs(&metars, &[]);
        assert_eq!(legs[0].category, FlightCategory::Vfr);
        assert!(crate::alternates::suggest_alternative(&legs).is_none());
    }

    #[test]
    fn rejects_missing_station() {
        let err = parse_metar_reports(r#"[{"icaoId": "KJFK"}, {"icaoId": "  "}]"#).unwrap_err();
        assert!(matches!(err, ReportError::MissingStation { index: 1 }));

        let err = parse_taf_reports(r#"[{"icaoId": ""}]"#).unwrap_err();
        assert!(matches!(err, ReportError::MissingStation { index: 0 }));
    }

    #[test]
    fn rejects_out_of_range_coordinates() {
        let err = parse_metar_reports(r#"[{"icaoId": "KJFK", "lat": 140.0, "lon": 10.0}]"#).unwrap_err();
        assert!(matches!(err, ReportError::InvalidCoordinates { ref station, .. } if station == "KJFK"));
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(parse_metar_reports("{not json"), Err(ReportError::Json(_))));
        // A record missing the required station field is a schema failure
        assert!(matches!(parse_metar_reports(r#"[{"lat": 1.0}]"#), Err(ReportError::Json(_))));
    }

    #[test]
    fn taf_outlook_rules_in_order() {
        assert_eq!(TafOutlook::from_raw(Some("BKN004 TSRA")), TafOutlook::LowCeilings);
        assert_eq!(TafOutlook::from_raw(Some("BKN040 -SHRA")), TafOutlook::ShowersOrStorms);
        assert_eq!(TafOutlook::from_raw(Some("3SM BR SCT010")), TafOutlook::ReducedVisibility);
        assert_eq!(TafOutlook::from_raw(Some("P6SM SKC")), TafOutlook::NoSignificantChange);
        assert_eq!(TafOutlook::from_raw(Some("   ")), TafOutlook::Unavailable);
        assert_eq!(TafOutlook::from_raw(None), TafOutlook::Unavailable);
    }

    #[test]
    fn orders_legs_by_route_with_placeholders() {
        let legs = vec![
            RouteLeg::new("KBOS"),
            RouteLeg::new("KJFK").with_position(GeoPoint::new(40.6, -73.8)),
            RouteLeg::new("KPHL"),
        ];
        let route = vec!["KJFK".to_string(), "KORD".to_string(), "KBOS".to_string(), "KJFK".to_string()];
        let ordered = order_legs_by_route(&legs, &route);

        let idents: Vec<_> = ordered.iter().map(|l| l.icao.as_str()).collect();
        assert_eq!(idents, ["KJFK", "KORD", "KBOS", "KJFK"]);
        assert!(ordered[0].position.is_some());
        assert!(ordered[1].position.is_none());
        assert!(ordered[3].position.is_some());
    }
}
