//! Great-circle arc endpoint.

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use aura_core::{build_great_circle, initial_bearing_deg, split_at_antimeridian, GeoPoint};
use aura_core::geodesic::arc_length_nm;

use crate::api::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ArcRequest {
    pub start: GeoPoint,
    pub end: GeoPoint,
    /// Defaults to the configured map sampling.
    pub samples: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct ArcResponse {
    pub samples: usize,
    pub distance_nm: f64,
    pub initial_bearing_deg: f64,
    pub points: Vec<GeoPoint>,
    /// `points` split where the arc crosses the antimeridian.
    pub segments: Vec<Vec<GeoPoint>>,
}

pub async fn build_arc(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ArcRequest>,
) -> Result<Json<ArcResponse>, ApiError> {
    let start = checked_point("start", req.start)?;
    let end = checked_point("end", req.end)?;
    let rules = state.rules();
    let samples = rules.clamp_samples(req.samples.unwrap_or(rules.arc_samples));

    let arc = build_great_circle(start, end, samples);
    let points = arc.to_vec();
    let segments = split_at_antimeridian(points.iter().copied());

    tracing::debug!(%start, %end, samples, segments = segments.len(), "built arc");

    Ok(Json(ArcResponse {
        samples: points.len() - 1,
        distance_nm: arc_length_nm(&arc),
        initial_bearing_deg: initial_bearing_deg(start, end),
        points,
        segments,
    }))
}

/// Re-validate a client-supplied point.
pub(crate) fn checked_point(label: &str, point: GeoPoint) -> Result<GeoPoint, ApiError> {
    GeoPoint::try_new(point.lat, point.lon).map_err(|source| ApiError::Coordinates {
        subject: label.to_string(),
        source,
    })
}
