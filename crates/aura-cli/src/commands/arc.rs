use std::fmt::Write;

use anyhow::Result;
use aura_core::geodesic::arc_length_nm;
use aura_core::{build_great_circle, initial_bearing_deg, split_at_antimeridian, GeoPoint};
use serde_json::json;

/// Great-circle points between two positions, grouped by map segment.
pub fn run(from: GeoPoint, to: GeoPoint, samples: usize, as_json: bool) -> Result<String> {
    let arc = build_great_circle(from, to, samples);
    let segments = split_at_antimeridian(&arc);

    if as_json {
        let body = json!({
            "distance_nm": arc_length_nm(&arc),
            "initial_bearing_deg": initial_bearing_deg(from, to),
            "points": arc.to_vec(),
            "segments": segments,
        });
        return Ok(serde_json::to_string_pretty(&body)?);
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{from} -> {to}: {:.1} NM, initial course {:03.0}, {} points",
        arc_length_nm(&arc),
        initial_bearing_deg(from, to),
        arc.len()
    );
    for (index, segment) in segments.iter().enumerate() {
        let _ = writeln!(out, "segment {}:", index + 1);
        for point in segment {
            let _ = writeln!(out, "  {:>9.4} {:>10.4}", point.lat, point.lon);
        }
    }
    Ok(out)
}
