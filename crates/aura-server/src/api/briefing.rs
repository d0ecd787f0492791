//! Briefing and alternative-route endpoints.

use std::sync::Arc;

use axum::{extract::State, Extension, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use aura_core::{
    parse_route, reduce, suggest_alternative, validate_metar_records, validate_taf_records,
    AlternativeRoute, Briefing, BriefingAction, BriefingState, MetarRecord, RouteLeg, TafRecord,
};

use crate::api::error::ApiError;
use crate::api::performance::{aircraft_for, normalize_legs};
use crate::api::request_id::RequestId;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct BriefingRequest {
    /// Whitespace or comma separated identifiers, e.g. `"KJFK KBOS"`.
    pub route: String,
    pub aircraft_type: Option<String>,
    #[serde(default)]
    pub metar_reports: Vec<MetarRecord>,
    #[serde(default)]
    pub taf_reports: Vec<TafRecord>,
}

#[derive(Debug, Serialize)]
pub struct BriefingResponse {
    pub generated_at: DateTime<Utc>,
    #[serde(flatten)]
    pub briefing: Briefing,
}

pub async fn create_briefing(
    State(state): State<Arc<AppState>>,
    request_id: Option<Extension<RequestId>>,
    Json(req): Json<BriefingRequest>,
) -> Result<Json<BriefingResponse>, ApiError> {
    let route = parse_route(&req.route)?;
    validate_metar_records(&req.metar_reports)?;
    validate_taf_records(&req.taf_reports)?;
    let aircraft = aircraft_for(&state, req.aircraft_type.as_deref());

    let actions = [
        BriefingAction::SetRoute(route),
        BriefingAction::SelectAircraft(aircraft.code.to_string()),
        BriefingAction::ReportsLoaded {
            metars: req.metar_reports,
            tafs: req.taf_reports,
        },
    ];
    let briefing_state = actions.into_iter().fold(BriefingState::default(), reduce);
    let briefing = Briefing::assemble(&briefing_state, state.rules());

    let request_id = request_id.map(|Extension(id)| id.0).unwrap_or_default();
    tracing::info!(
        request_id = %request_id,
        route = %briefing.route.join(" "),
        aircraft = briefing.aircraft.code,
        distance_nm = briefing.performance.total_distance_nm,
        alternative = briefing.alternative.is_some(),
        "briefing assembled"
    );

    Ok(Json(BriefingResponse {
        generated_at: Utc::now(),
        briefing,
    }))
}

#[derive(Debug, Deserialize)]
pub struct AlternativesRequest {
    pub legs: Vec<RouteLeg>,
}

pub async fn suggest_alternatives(
    Json(mut req): Json<AlternativesRequest>,
) -> Result<Json<Option<AlternativeRoute>>, ApiError> {
    normalize_legs(&mut req.legs)?;
    let suggestion = suggest_alternative(&req.legs);
    if let Some(ref alt) = suggestion {
        tracing::info!(adverse = %alt.adverse_icao, alternate = %alt.alternate_icao, "alternative suggested");
    }
    Ok(Json(suggestion))
}
