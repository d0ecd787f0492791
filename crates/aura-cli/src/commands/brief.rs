use std::fmt::Write;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use aura_core::{
    parse_metar_reports, parse_route, parse_taf_reports, reduce, Briefing, BriefingAction,
    BriefingRules, BriefingState, TafRecord,
};

pub struct BriefArgs<'a> {
    pub route: &'a str,
    pub metars: &'a Path,
    pub tafs: Option<&'a Path>,
    pub aircraft: Option<&'a str>,
    pub json: bool,
}

/// Load reports from disk and assemble the briefing.
pub fn assemble(args: &BriefArgs<'_>, rules: &BriefingRules) -> Result<Briefing> {
    let route = parse_route(args.route).context("invalid route")?;

    let metar_json = fs::read_to_string(args.metars)
        .with_context(|| format!("reading {}", args.metars.display()))?;
    let metars = parse_metar_reports(&metar_json)
        .with_context(|| format!("parsing METARs from {}", args.metars.display()))?;

    let tafs: Vec<TafRecord> = match args.tafs {
        Some(path) => {
            let taf_json = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
            parse_taf_reports(&taf_json).with_context(|| format!("parsing TAFs from {}", path.display()))?
        }
        None => Vec::new(),
    };

    tracing::debug!(stops = route.len(), metars = metars.len(), tafs = tafs.len(), "reports loaded");

    let aircraft = args.aircraft.unwrap_or(rules.default_aircraft.as_str()).to_string();
    let state = [
        BriefingAction::SetRoute(route),
        BriefingAction::SelectAircraft(aircraft),
        BriefingAction::ReportsLoaded { metars, tafs },
    ]
    .into_iter()
    .fold(BriefingState::default(), reduce);

    Ok(Briefing::assemble(&state, rules))
}

pub fn run(args: &BriefArgs<'_>, rules: &BriefingRules) -> Result<String> {
    let briefing = assemble(args, rules)?;
    if args.json {
        return Ok(serde_json::to_string_pretty(&briefing)?);
    }
    Ok(render(&briefing))
}

/// Plain-text briefing.
pub fn render(briefing: &Briefing) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Route: {}", briefing.route.join(" -> "));
    let _ = writeln!(out, "Aircraft: {} ({})", briefing.aircraft.name, briefing.aircraft.code);
    let _ = writeln!(out);

    for (leg, marker) in briefing.legs.iter().zip(1..) {
        let wind = match leg.wind {
            Some(wind) => match (wind.direction_deg, wind.gust_kt) {
                (Some(dir), Some(gust)) => format!("{dir:03.0}@{:.0}G{gust:.0}kt", wind.speed_kt),
                (Some(dir), None) => format!("{dir:03.0}@{:.0}kt", wind.speed_kt),
                (None, _) => format!("VRB@{:.0}kt", wind.speed_kt),
            },
            None => "wind n/a".to_string(),
        };
        let _ = writeln!(out, "{marker:>2}. {} [{}] {}", leg.icao, leg.category, wind);
        if let Some(raw) = &leg.raw_metar {
            let _ = writeln!(out, "    METAR {raw}");
        }
        let _ = writeln!(out, "    TAF: {}", leg.taf_outlook.summary());
    }

    let perf = &briefing.performance;
    let _ = writeln!(out);
    let _ = writeln!(out, "Distance: {:.0} NM", perf.total_distance_nm);
    let _ = writeln!(out, "Time en route: {}", perf.total_time);
    let _ = writeln!(out, "Fuel: {:.1} {}", perf.total_fuel, perf.aircraft.fuel_unit);
    for leg in &briefing.breakdown {
        let time = leg
            .time_hours
            .map(|hours| format!("{:.2} h", hours))
            .unwrap_or_else(|| "no time (groundspeed <= 0)".to_string());
        let _ = writeln!(
            out,
            "  {} -> {}: {:.0} NM, course {:03.0}, GS {:.0} kt, {}",
            leg.from, leg.to, leg.distance_nm, leg.true_course_deg, leg.groundspeed_kt, time
        );
    }

    if let Some(alternative) = &briefing.alternative {
        let suggestion = &alternative.suggestion;
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "{}: consider {} instead of {} ({})",
            suggestion.reason,
            suggestion.alternate_icao,
            suggestion.adverse_icao,
            suggestion.route.join(" -> ")
        );
        if let Some(comparison) = &alternative.comparison {
            let _ = writeln!(
                out,
                "  alternative: {:.0} NM ({:+.0}), {}, fuel {:+.1} {}",
                comparison.alternative.total_distance_nm,
                comparison.distance_delta_nm(),
                comparison.alternative.total_time,
                comparison.fuel_delta(),
                comparison.alternative.aircraft.fuel_unit
            );
        }
    }
    out
}
