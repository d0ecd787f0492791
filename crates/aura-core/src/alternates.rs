//! Alternative routing around adverse weather.

use serde::Serialize;

use crate::models::{AircraftProfile, PerformanceResult, RouteLeg};
use crate::performance::estimate_with_profile;

/// Nearby airports suggested when a major airport reports IFR or LIFR.
pub const NEARBY_ALTERNATES: &[(&str, &str)] = &[
    ("KJFK", "KPHL"),
    ("KORD", "KMDW"),
    ("KLAX", "KSNA"),
    ("KATL", "KPDK"),
    ("KDFW", "KDAL"),
    ("KSFO", "KOAK"),
    ("KLAS", "KHND"),
    ("KDEN", "KBJC"),
];

/// Look up the nearby alternate for a station.
pub fn alternate_for(icao: &str) -> Option<&'static str> {
    NEARBY_ALTERNATES
        .iter()
        .find(|(station, _)| station.eq_ignore_ascii_case(icao))
        .map(|(_, alternate)| *alternate)
}

/// A route with one adverse stop swapped for its alternate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlternativeRoute {
    pub adverse_index: usize,
    pub adverse_icao: String,
    pub alternate_icao: String,
    pub route: Vec<String>,
    pub reason: String,
}

/// Suggest an alternative for the first IFR/LIFR stop on the route.
///
/// Only the first adverse stop is considered. Returns `None` if no stop is
/// adverse or the adverse stop has no known alternate.
pub fn suggest_alternative(legs: &[RouteLeg]) -> Option<AlternativeRoute> {
    let (adverse_index, adverse) = legs
        .iter()
        .enumerate()
        .find(|(_, leg)| leg.category.is_adverse())?;

    let Some(alternate) = alternate_for(&adverse.icao) else {
        tracing::debug!(station = %adverse.icao, category = %adverse.category, "no alternate known");
        return None;
    };

    let mut route: Vec<String> = legs.iter().map(|leg| leg.icao.clone()).collect();
    route[adverse_index] = alternate.to_string();

    Some(AlternativeRoute {
        adverse_index,
        adverse_icao: adverse.icao.clone(),
        alternate_icao: alternate.to_string(),
        route,
        reason: format!("Adverse weather at {}", adverse.icao),
    })
}

/// Side-by-side performance of the primary and alternative routes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RouteComparison {
    pub primary: PerformanceResult,
    pub alternative: PerformanceResult,
}

impl RouteComparison {
    /// Extra distance flown on the alternative, NM (negative if shorter).
    pub fn distance_delta_nm(&self) -> f64 {
        self.alternative.total_distance_nm - self.primary.total_distance_nm
    }

    /// Extra fuel burned on the alternative, in the aircraft's fuel unit.
    pub fn fuel_delta(&self) -> f64 {
        self.alternative.total_fuel - self.primary.total_fuel
    }
}

pub fn compare_routes(
    primary: &[RouteLeg],
    alternative: &[RouteLeg],
    aircraft: &AircraftProfile,
) -> RouteComparison {
    RouteComparison {
        primary: estimate_with_profile(primary, aircraft),
        alternative: estimate_with_profile(alternative, aircraft),
    }
}
