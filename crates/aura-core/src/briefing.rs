//! Briefing state and view-model assembly.
//!
//! State changes go through [`reduce`]; the read-only [`Briefing`] is then
//! derived from a state snapshot with [`Briefing::assemble`].

use serde::Serialize;

use crate::alternates::{compare_routes, suggest_alternative, AlternativeRoute, RouteComparison};
use crate::models::{AircraftProfile, PerformanceResult, RouteLeg};
use crate::performance::{leg_breakdown, resolve_aircraft, summarize, LegEstimate, DEFAULT_AIRCRAFT};
use crate::reports::{map_reports_to_legs, order_legs_by_route, MetarRecord, TafRecord};
use crate::route_map::{route_geometry, route_markers, RouteMarker, RouteSegment};
use crate::rules::BriefingRules;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    #[default]
    Landing,
    Plan,
    Briefing,
}

/// Everything the briefing view depends on.
#[derive(Debug, Clone, PartialEq)]
pub struct BriefingState {
    pub view: View,
    pub route: Vec<String>,
    pub aircraft_type: String,
    /// Every station that came back with a report, in report order.
    pub reports: Vec<RouteLeg>,
    /// Legs in route order.
    pub legs: Vec<RouteLeg>,
}

impl Default for BriefingState {
    fn default() -> Self {
        Self {
            view: View::Landing,
            route: Vec::new(),
            aircraft_type: DEFAULT_AIRCRAFT.to_string(),
            reports: Vec::new(),
            legs: Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub enum BriefingAction {
    Navigate(View),
    SetRoute(Vec<String>),
    SelectAircraft(String),
    ReportsLoaded {
        metars: Vec<MetarRecord>,
        tafs: Vec<TafRecord>,
    },
    Reset,
}

/// Apply one action to the state.
pub fn reduce(mut state: BriefingState, action: BriefingAction) -> BriefingState {
    match action {
        BriefingAction::Navigate(view) => {
            state.view = view;
        }
        BriefingAction::SetRoute(route) => {
            state.route = route;
            state.legs = order_legs_by_route(&state.reports, &state.route);
        }
        BriefingAction::SelectAircraft(code) => {
            state.aircraft_type = resolve_aircraft(&code).code.to_string();
        }
        BriefingAction::ReportsLoaded { metars, tafs } => {
            state.reports = map_reports_to_legs(&metars, &tafs);
            state.legs = order_legs_by_route(&state.reports, &state.route);
            state.view = View::Briefing;
            tracing::debug!(
                reports = state.reports.len(),
                legs = state.legs.len(),
                "reports loaded"
            );
        }
        BriefingAction::Reset => return BriefingState::default(),
    }
    state
}

/// Per-station chart data. Each series is aligned with `stations`; gaps are
/// `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WeatherSeries {
    pub stations: Vec<String>,
    pub temperature_c: Vec<Option<f64>>,
    pub dewpoint_c: Vec<Option<f64>>,
    pub wind_speed_kt: Vec<Option<f64>>,
    pub wind_gust_kt: Vec<Option<f64>>,
    pub visibility_sm: Vec<Option<f64>>,
    pub altimeter_inhg: Vec<Option<f64>>,
}

impl WeatherSeries {
    pub fn from_legs(legs: &[RouteLeg]) -> Self {
        let mut series = Self::default();
        for leg in legs {
            let obs = leg.observation.as_ref();
            series.stations.push(leg.icao.clone());
            series.temperature_c.push(obs.and_then(|o| o.temperature_c));
            series.dewpoint_c.push(obs.and_then(|o| o.dewpoint_c));
            series.wind_speed_kt.push(leg.wind.map(|w| w.speed_kt));
            series.wind_gust_kt.push(leg.wind.and_then(|w| w.gust_kt));
            series.visibility_sm.push(obs.and_then(|o| o.visibility_sm));
            series.altimeter_inhg.push(obs.and_then(|o| o.altimeter_inhg));
        }
        series
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlternativeBriefing {
    pub suggestion: AlternativeRoute,
    /// Present only when a report for the alternate station is loaded.
    pub comparison: Option<RouteComparison>,
}

/// Read-only view model for one briefing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Briefing {
    pub route: Vec<String>,
    pub aircraft: AircraftProfile,
    pub legs: Vec<RouteLeg>,
    pub performance: PerformanceResult,
    pub breakdown: Vec<LegEstimate>,
    pub segments: Vec<RouteSegment>,
    pub markers: Vec<RouteMarker>,
    pub weather: WeatherSeries,
    pub alternative: Option<AlternativeBriefing>,
}

impl Briefing {
    pub fn assemble(state: &BriefingState, rules: &BriefingRules) -> Self {
        let aircraft_type = if state.aircraft_type.trim().is_empty() {
            rules.default_aircraft.as_str()
        } else {
            state.aircraft_type.as_str()
        };
        let aircraft = resolve_aircraft(aircraft_type);

        let breakdown = if state.legs.len() < 2 {
            Vec::new()
        } else {
            leg_breakdown(&state.legs, aircraft)
        };
        let performance = summarize(&breakdown, aircraft);

        let segments = route_geometry(
            &state.legs,
            rules.clamp_samples(rules.arc_samples),
            rules.arrow_fraction,
        );

        Self {
            route: state.legs.iter().map(|leg| leg.icao.clone()).collect(),
            aircraft: *aircraft,
            legs: state.legs.clone(),
            performance,
            breakdown,
            segments,
            markers: route_markers(&state.legs),
            weather: WeatherSeries::from_legs(&state.legs),
            alternative: alternative_briefing(state, aircraft),
        }
    }
}

fn alternative_briefing(state: &BriefingState, aircraft: &AircraftProfile) -> Option<AlternativeBriefing> {
    let suggestion = suggest_alternative(&state.legs)?;

    let has_alternate_report = state
        .reports
        .iter()
        .any(|leg| leg.icao == suggestion.alternate_icao);
    let comparison = has_alternate_report.then(|| {
        let alternative_legs = order_legs_by_route(&state.reports, &suggestion.route);
        compare_routes(&state.legs, &alternative_legs, aircraft)
    });

    Some(AlternativeBriefing {
        suggestion,
        comparison,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FlightCategory, GeoPoint};
    use crate::route_map::MarkerRole;

    fn metar(icao: &str, lat: f64, lon: f64, category: &str) -> MetarRecord {
        MetarRecord {
            icao_id: icao.to_string(),
            lat: Some(lat),
            lon: Some(lon),
            flt_cat: Some(category.to_string()),
            wspd: Some(10.0),
            temp: Some(15.0),
            ..MetarRecord::default()
        }
    }

    fn loaded_state(route: &[&str], metars: Vec<MetarRecord>) -> BriefingState {
        let state = reduce(
            BriefingState::default(),
            BriefingAction::SetRoute(route.iter().map(|s| s.to_string()).collect()),
        );
        let state = reduce(state, BriefingAction::SelectAircraft("b737".into()));
        reduce(state, BriefingAction::ReportsLoaded { metars, tafs: Vec::new() })
    }

    #[test]
    fn reports_loaded_orders_legs_and_switches_view() {
        let state = loaded_state(
            &["KRIC", "KJFK"],
            vec![metar("KJFK", 40.6398, -73.7789, "VFR"), metar("KRIC", 37.5052, -77.3197, "VFR")],
        );
        assert_eq!(state.view, View::Briefing);
        assert_eq!(state.aircraft_type, "B737");
        let idents: Vec<_> = state.legs.iter().map(|l| l.icao.as_str()).collect();
        assert_eq!(idents, ["KRIC", "KJFK"]);
    }

    #[test]
    fn unknown_aircraft_selection_resolves_to_default() {
        let state = reduce(BriefingState::default(), BriefingAction::SelectAircraft("F22".into()));
        assert_eq!(state.aircraft_type, "C172");
    }

    #[test]
    fn reset_returns_default_state() {
        let state = loaded_state(&["KRIC"], vec![metar("KRIC", 37.5, -77.3, "VFR")]);
        assert_eq!(reduce(state, BriefingAction::Reset), BriefingState::default());
    }

    #[test]
    fn assemble_builds_full_view_model() {
        let state = loaded_state(
            &["KRIC", "KJFK", "KORD"],
            vec![
                metar("KRIC", 37.5052, -77.3197, "VFR"),
                metar("KJFK", 40.6398, -73.7789, "IFR"),
                metar("KORD", 41.9786, -87.9048, "MVFR"),
                metar("KPHL", 39.8719, -75.2411, "VFR"),
            ],
        );
        let briefing = Briefing::assemble(&state, &BriefingRules::default());

        assert_eq!(briefing.route, vec!["KRIC", "KJFK", "KORD"]);
        assert_eq!(briefing.aircraft.code, "B737");
        assert_eq!(briefing.breakdown.len(), 2);
        assert!(briefing.performance.total_distance_nm > 0.0);
        assert_eq!(briefing.segments.len(), 2);
        assert_eq!(briefing.segments[0].paths[0].len(), 65);
        assert_eq!(briefing.markers[2].role, MarkerRole::Arrival);
        assert_eq!(briefing.weather.temperature_c, vec![Some(15.0); 3]);
        assert_eq!(briefing.weather.visibility_sm, vec![None; 3]);

        let alternative = briefing.alternative.unwrap();
        assert_eq!(alternative.suggestion.route, vec!["KRIC", "KPHL", "KORD"]);
        let comparison = alternative.comparison.unwrap();
        assert_eq!(comparison.primary, briefing.performance);
        assert!(comparison.alternative.total_distance_nm > 0.0);
    }

    #[test]
    fn alternative_without_alternate_report_has_no_comparison() {
        let state = loaded_state(
            &["KJFK", "KBOS"],
            vec![metar("KJFK", 40.6398, -73.7789, "LIFR"), metar("KBOS", 42.3606, -71.0097, "VFR")],
        );
        let briefing = Briefing::assemble(&state, &BriefingRules::default());
        let alternative = briefing.alternative.unwrap();
        assert_eq!(alternative.suggestion.alternate_icao, "KPHL");
        assert!(alternative.comparison.is_none());
    }

    #[test]
    fn empty_state_assembles_zero_briefing() {
        let briefing = Briefing::assemble(&BriefingState::default(), &BriefingRules::default());
        assert_eq!(briefing.performance.total_distance_nm, 0.0);
        assert!(briefing.segments.is_empty());
        assert!(briefing.markers.is_empty());
        assert!(briefing.alternative.is_none());
    }

    #[test]
    fn legs_built_by_hand_assemble_too() {
        let state = BriefingState {
            legs: vec![
                RouteLeg::new("AAAA").with_position(GeoPoint::new(0.0, 0.0)),
                RouteLeg::new("BBBB")
                    .with_position(GeoPoint::new(0.0, 1.0))
                    .with_category(FlightCategory::Lifr),
            ],
            ..BriefingState::default()
        };
        let briefing = Briefing::assemble(&state, &BriefingRules::default());
        assert_eq!(briefing.aircraft.code, "C172");
        assert_eq!(briefing.breakdown.len(), 1);
        assert!(briefing.alternative.is_none());
    }
}
