//! Aura CLI - route weather briefings from the command line.
//!
//! The `aura-brief` binary wraps these commands:
//! - brief: weather, performance and alternates for a route
//! - arc: great-circle points between two coordinates
//! - aircraft: supported aircraft profiles

pub mod commands;

use anyhow::{bail, Context, Result};
use aura_core::GeoPoint;

/// Parse `"LAT,LON"` into a validated point.
pub fn parse_lat_lon(value: &str) -> Result<GeoPoint> {
    let Some((lat, lon)) = value.split_once(',') else {
        bail!("expected LAT,LON but got '{value}'");
    };
    let lat: f64 = lat.trim().parse().with_context(|| format!("invalid latitude in '{value}'"))?;
    let lon: f64 = lon.trim().parse().with_context(|| format!("invalid longitude in '{value}'"))?;
    Ok(GeoPoint::try_new(lat, lon)?)
}
