pub mod alternates;
pub mod briefing;
pub mod geodesic;
pub mod models;
pub mod performance;
pub mod reports;
pub mod route;
pub mod route_map;
pub mod rules;
pub mod spatial;

pub use alternates::{alternate_for, compare_routes, suggest_alternative, AlternativeRoute, RouteComparison};
pub use briefing::{reduce, AlternativeBriefing, Briefing, BriefingAction, BriefingState, View, WeatherSeries};
pub use geodesic::{build_great_circle, split_at_antimeridian, GreatCircle, GreatCirclePoints, MAX_ARC_SAMPLES};
pub use models::{
    AircraftProfile, CoordinateError, EnrouteTime, FlightCategory, GeoPoint, Observation,
    PerformanceResult, RouteLeg, Wind,
};
pub use performance::{
    estimate_performance, estimate_with_profile, headwind_component, leg_breakdown,
    resolve_aircraft, LegEstimate, AIRCRAFT_PROFILES, DEFAULT_AIRCRAFT,
};
pub use reports::{
    map_reports_to_legs, order_legs_by_route, parse_metar_reports, parse_taf_reports,
    validate_metar_records, validate_taf_records, MetarRecord, ReportError, ReportSchema, TafOutlook, TafRecord,
};
pub use route::{parse_route, RouteError, MAX_ROUTE_STOPS};
pub use route_map::{route_geometry, route_markers, MarkerRole, RouteMarker, RouteSegment};
pub use rules::BriefingRules;
pub use spatial::{haversine_nm, initial_bearing_deg};
