use std::fmt::Write;

use aura_core::{AIRCRAFT_PROFILES, DEFAULT_AIRCRAFT};

/// Table of supported aircraft profiles.
pub fn run() -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:<6} {:<14} {:>8} {:>10}", "CODE", "NAME", "TAS (kt)", "BURN");
    for profile in &AIRCRAFT_PROFILES {
        let marker = if profile.code == DEFAULT_AIRCRAFT { " (default)" } else { "" };
        let _ = writeln!(
            out,
            "{:<6} {:<14} {:>8.0} {:>6.0} {}{}",
            profile.code, profile.name, profile.cruise_tas_kt, profile.fuel_burn_per_hour, profile.fuel_unit, marker
        );
    }
    out
}
