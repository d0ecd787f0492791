//! Map overlay data for a briefed route: arc polylines, direction arrows and
//! airport markers.

use serde::Serialize;

use crate::geodesic::{build_great_circle, split_at_antimeridian};
use crate::models::{FlightCategory, GeoPoint, RouteLeg};

/// Drawable geometry between two consecutive positioned stops.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteSegment {
    pub from_icao: String,
    pub to_icao: String,
    pub from: GeoPoint,
    pub to: GeoPoint,
    /// Antimeridian-safe polylines making up the arc.
    pub paths: Vec<Vec<GeoPoint>>,
    /// Where to place the direction arrow.
    pub arrow: GeoPoint,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MarkerRole {
    Departure,
    Stop { number: usize },
    Arrival,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteMarker {
    pub icao: String,
    pub position: GeoPoint,
    pub role: MarkerRole,
    pub label: String,
    pub category: FlightCategory,
}

/// Build the polylines for the whole route.
///
/// Stops without a position are left out and their neighbours joined
/// directly, so the drawn route stays connected.
pub fn route_geometry(legs: &[RouteLeg], sample_count: usize, arrow_fraction: f64) -> Vec<RouteSegment> {
    let positioned: Vec<(&RouteLeg, GeoPoint)> = legs
        .iter()
        .filter_map(|leg| leg.position.map(|position| (leg, position)))
        .collect();

    positioned
        .windows(2)
        .map(|pair| {
            let (from_leg, from) = pair[0];
            let (to_leg, to) = pair[1];
            let arc = build_great_circle(from, to, sample_count);
            RouteSegment {
                from_icao: from_leg.icao.clone(),
                to_icao: to_leg.icao.clone(),
                from,
                to,
                paths: split_at_antimeridian(&arc),
                arrow: interpolate_linear(from, to, arrow_fraction),
            }
        })
        .collect()
}

/// Straight lat/lon interpolation, used for marker placement only.
fn interpolate_linear(from: GeoPoint, to: GeoPoint, fraction: f64) -> GeoPoint {
    let f = fraction.clamp(0.0, 1.0);
    GeoPoint::new(
        from.lat + (to.lat - from.lat) * f,
        from.lon + (to.lon - from.lon) * f,
    )
}

/// One marker per positioned stop. Roles follow each stop's place in the
/// full route, including stops that have no position.
pub fn route_markers(legs: &[RouteLeg]) -> Vec<RouteMarker> {
    let last = legs.len().saturating_sub(1);
    legs.iter()
        .enumerate()
        .filter_map(|(index, leg)| {
            let position = leg.position?;
            let role = if index == 0 {
                MarkerRole::Departure
            } else if index == last {
                MarkerRole::Arrival
            } else {
                MarkerRole::Stop { number: index + 1 }
            };
            let label = match role {
                MarkerRole::Departure => "D".to_string(),
                MarkerRole::Arrival => "A".to_string(),
                MarkerRole::Stop { number } => number.to_string(),
            };
            Some(RouteMarker {
                icao: leg.icao.clone(),
                position,
                role,
                label,
                category: leg.category,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn positioned(icao: &str, lat: f64, lon: f64) -> RouteLeg {
        RouteLeg::new(icao).with_position(GeoPoint::new(lat, lon))
    }

    #[test]
    fn geometry_joins_positioned_neighbours() {
        let legs = vec![
            positioned("KRIC", 37.5052, -77.3197),
            RouteLeg::new("KXXX"),
            positioned("KJFK", 40.6398, -73.7789),
            positioned("KORD", 41.9786, -87.9048),
        ];
        let segments = route_geometry(&legs, 16, 0.75);
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].from_icao, "KRIC");
        assert_eq!(segments[0].to_icao, "KJFK");
        assert_eq!(segments[0].paths.len(), 1);
        assert_eq!(segments[0].paths[0].len(), 17);
    }

    #[test]
    fn arrow_sits_three_quarters_along() {
        let legs = vec![positioned("AAAA", 0.0, 0.0), positioned("BBBB", 4.0, 8.0)];
        let segments = route_geometry(&legs, 4, 0.75);
        assert_eq!(segments[0].arrow, GeoPoint::new(3.0, 6.0));
    }

    #[test]
    fn date_line_segment_is_split() {
        let legs = vec![positioned("RJTT", 35.5494, 139.7798), positioned("KSFO", 37.6213, -122.3790)];
        let segments = route_geometry(&legs, 64, 0.75);
        assert_eq!(segments[0].paths.len(), 2);
    }

    #[test]
    fn marker_roles_follow_route_index() {
        let legs = vec![
            positioned("KRIC", 37.5, -77.3),
            RouteLeg::new("KXXX"),
            positioned("KJFK", 40.6, -73.8),
            positioned("KORD", 41.9, -87.9),
        ];
        let markers = route_markers(&legs);
        assert_eq!(markers.len(), 3);
        assert_eq!(markers[0].role, MarkerRole::Departure);
        assert_eq!(markers[0].label, "D");
        assert_eq!(markers[1].role, MarkerRole::Stop { number: 3 });
        assert_eq!(markers[1].label, "3");
        assert_eq!(markers[2].role, MarkerRole::Arrival);
        assert_eq!(markers[2].label, "A");
    }

    #[test]
    fn single_stop_is_departure() {
        let markers = route_markers(&[positioned("KRIC", 37.5, -77.3)]);
        assert_eq!(markers[0].role, MarkerRole::Departure);
        assert!(route_geometry(&[positioned("KRIC", 37.5, -77.3)], 8, 0.75).is_empty());
    }
}
