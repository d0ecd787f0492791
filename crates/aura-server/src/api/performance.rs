//! Aircraft table and performance estimation endpoints.

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use aura_core::{
    estimate_with_profile, leg_breakdown, resolve_aircraft, AircraftProfile, LegEstimate,
    PerformanceResult, RouteLeg, AIRCRAFT_PROFILES,
};

use crate::api::error::ApiError;
use crate::api::geodesic::checked_point;
use crate::state::AppState;

pub async fn list_aircraft() -> Json<Vec<AircraftProfile>> {
    Json(AIRCRAFT_PROFILES.to_vec())
}

#[derive(Debug, Deserialize)]
pub struct PerformanceRequest {
    pub legs: Vec<RouteLeg>,
    pub aircraft_type: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PerformanceResponse {
    pub result: PerformanceResult,
    pub breakdown: Vec<LegEstimate>,
}

pub async fn estimate(
    State(state): State<Arc<AppState>>,
    Json(mut req): Json<PerformanceRequest>,
) -> Result<Json<PerformanceResponse>, ApiError> {
    normalize_legs(&mut req.legs)?;
    let aircraft = aircraft_for(&state, req.aircraft_type.as_deref());

    let result = estimate_with_profile(&req.legs, aircraft);
    let breakdown = leg_breakdown(&req.legs, aircraft);

    tracing::info!(
        aircraft = aircraft.code,
        legs = req.legs.len(),
        distance_nm = result.total_distance_nm,
        "performance estimated"
    );

    Ok(Json(PerformanceResponse { result, breakdown }))
}

/// Reject legs whose positions are out of range and normalise the rest in
/// place; deserialised points bypass `GeoPoint::new`.
pub(crate) fn normalize_legs(legs: &mut [RouteLeg]) -> Result<(), ApiError> {
    for leg in legs.iter_mut() {
        if let Some(position) = leg.position {
            leg.position = Some(checked_point(&leg.icao, position)?);
        }
    }
    Ok(())
}

/// Requested aircraft, or the configured default when none is given.
pub(crate) fn aircraft_for(state: &AppState, requested: Option<&str>) -> &'static AircraftProfile {
    let code = requested
        .map(str::trim)
        .filter(|code| !code.is_empty())
        .unwrap_or(&state.rules().default_aircraft);
    resolve_aircraft(code)
}
