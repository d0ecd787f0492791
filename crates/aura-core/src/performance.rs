//! Route performance estimation: distance, time en route and fuel burn.
//!
//! Each pair of consecutive legs that both carry a position contributes a
//! haversine distance. Time is distance over groundspeed, where groundspeed is
//! cruise TAS less the headwind component of the departure leg's reported
//! wind. Fuel is total time multiplied by the aircraft's hourly burn.

use serde::Serialize;

use crate::models::{AircraftProfile, EnrouteTime, GeoPoint, PerformanceResult, RouteLeg, Wind};
use crate::spatial::{haversine_nm, initial_bearing_deg};

/// Fallback aircraft type for unknown codes.
pub const DEFAULT_AIRCRAFT: &str = "C172";

/// Supported aircraft types. The first entry is the fallback.
pub static AIRCRAFT_PROFILES: [AircraftProfile; 3] = [
    AircraftProfile {
        code: "C172",
        name: "Cessna 172",
        cruise_tas_kt: 120.0,
        fuel_burn_per_hour: 8.0,
        fuel_unit: "GPH",
    },
    AircraftProfile {
        code: "B737",
        name: "Boeing 737",
        cruise_tas_kt: 450.0,
        fuel_burn_per_hour: 5000.0,
        fuel_unit: "PPH",
    },
    AircraftProfile {
        code: "A320",
        name: "Airbus A320",
        cruise_tas_kt: 470.0,
        fuel_burn_per_hour: 5300.0,
        fuel_unit: "PPH",
    },
];

/// Look up an aircraft type, falling back to the Cessna 172.
pub fn resolve_aircraft(code: &str) -> &'static AircraftProfile {
    let wanted = code.trim();
    AIRCRAFT_PROFILES
        .iter()
        .find(|profile| profile.code.eq_ignore_ascii_case(wanted))
        .unwrap_or_else(|| {
            tracing::debug!(aircraft_type = %wanted, "unknown aircraft type, using {}", DEFAULT_AIRCRAFT);
            &AIRCRAFT_PROFILES[0]
        })
}

/// Headwind component in knots for a given true course.
///
/// Positive is headwind, negative tailwind. Missing wind counts as calm; a
/// variable direction is taken as 000 at the reported speed.
pub fn headwind_component(wind: Option<&Wind>, course_deg: f64) -> f64 {
    let Some(wind) = wind else {
        return 0.0;
    };
    let direction = wind.direction_deg.unwrap_or(0.0);
    let angle = (course_deg - direction).abs();
    wind.speed_kt * angle.to_radians().cos()
}

/// Estimate for a single pair of consecutive positioned legs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegEstimate {
    pub from: String,
    pub to: String,
    pub distance_nm: f64,
    pub true_course_deg: f64,
    pub headwind_kt: f64,
    pub groundspeed_kt: f64,
    /// `None` when groundspeed is zero or negative; the leg adds no time.
    pub time_hours: Option<f64>,
}

/// Per-leg estimates for every consecutive pair with both positions known.
pub fn leg_breakdown(legs: &[RouteLeg], aircraft: &AircraftProfile) -> Vec<LegEstimate> {
    legs.windows(2)
        .filter_map(|pair| {
            let (departure, arrival) = (&pair[0], &pair[1]);
            let (Some(from), Some(to)) = (departure.position, arrival.position) else {
                return None;
            };
            Some(estimate_leg(departure, arrival, from, to, aircraft))
        })
        .collect()
}

fn estimate_leg(
    departure: &RouteLeg,
    arrival: &RouteLeg,
    from: GeoPoint,
    to: GeoPoint,
    aircraft: &AircraftProfile,
) -> LegEstimate {
    let distance_nm = haversine_nm(from, to);
    let true_course_deg = initial_bearing_deg(from, to);
    let headwind_kt = headwind_component(departure.wind.as_ref(), true_course_deg);
    let groundspeed_kt = aircraft.cruise_tas_kt - headwind_kt;

    let time_hours = if groundspeed_kt > 0.0 {
        Some(distance_nm / groundspeed_kt)
    } else {
        tracing::debug!(
            from = %departure.icao,
            to = %arrival.icao,
            groundspeed_kt,
            "non-positive groundspeed, leg adds no time"
        );
        None
    };

    LegEstimate {
        from: departure.icao.clone(),
        to: arrival.icao.clone(),
        distance_nm,
        true_course_deg,
        headwind_kt,
        groundspeed_kt,
        time_hours,
    }
}

/// Estimate route performance for an aircraft type code.
///
/// Unknown codes use the default profile. Fewer than two legs, or no pair of
/// consecutive positioned legs, yields a zero result.
pub fn estimate_performance(legs: &[RouteLeg], aircraft_type: &str) -> PerformanceResult {
    estimate_with_profile(legs, resolve_aircraft(aircraft_type))
}

/// Estimate route performance for an explicit profile.
pub fn estimate_with_profile(legs: &[RouteLeg], aircraft: &AircraftProfile) -> PerformanceResult {
    if legs.len() < 2 {
        return PerformanceResult::zero(*aircraft);
    }

    let breakdown = leg_breakdown(legs, aircraft);
    summarize(&breakdown, aircraft)
}

/// Fold per-leg estimates into route totals.
pub fn summarize(breakdown: &[LegEstimate], aircraft: &AircraftProfile) -> PerformanceResult {
    if breakdown.is_empty() {
        return PerformanceResult::zero(*aircraft);
    }

    let total_distance_nm: f64 = breakdown.iter().map(|leg| leg.distance_nm).sum();
    let total_time_hours: f64 = breakdown.iter().filter_map(|leg| leg.time_hours).sum();

    PerformanceResult {
        total_distance_nm,
        total_time: EnrouteTime::from_hours(total_time_hours),
        total_time_hours,
        total_fuel: total_time_hours * aircraft.fuel_burn_per_hour,
        aircraft: *aircraft,
    }
}
