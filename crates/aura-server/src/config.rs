//! Server configuration from environment.

use std::env;
use std::str::FromStr;

use aura_core::BriefingRules;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_port: u16,
    /// Great-circle samples per map segment
    pub arc_samples: usize,
    /// Cap applied to any sample count a client requests
    pub max_arc_samples: usize,
    pub default_aircraft: String,
    pub body_limit_bytes: usize,
    pub cors_permissive: bool,
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = BriefingRules::default();
        Self {
            server_port: parse_var("AURA_PORT").unwrap_or(3000),
            arc_samples: parse_var("AURA_ARC_SAMPLES").unwrap_or(defaults.arc_samples),
            max_arc_samples: parse_var("AURA_MAX_ARC_SAMPLES").unwrap_or(defaults.max_arc_samples),
            default_aircraft: env::var("AURA_DEFAULT_AIRCRAFT")
                .ok()
                .map(|s| s.trim().to_ascii_uppercase())
                .filter(|s| !s.is_empty())
                .unwrap_or(defaults.default_aircraft),
            body_limit_bytes: parse_var("AURA_BODY_LIMIT_BYTES").unwrap_or(1024 * 1024),
            cors_permissive: env::var("AURA_CORS_PERMISSIVE")
                .ok()
                .and_then(|s| parse_bool(&s))
                .unwrap_or(true),
        }
    }

    /// Briefing tunables derived from this configuration.
    pub fn rules(&self) -> BriefingRules {
        let defaults = BriefingRules::default();
        let mut rules = BriefingRules {
            arc_samples: self.arc_samples,
            max_arc_samples: self.max_arc_samples,
            default_aircraft: self.default_aircraft.clone(),
            ..defaults
        };
        rules.max_arc_samples = rules.clamp_samples(rules.max_arc_samples);
        rules.arc_samples = rules.clamp_samples(rules.arc_samples);
        rules
    }
}

impl Default for Config {
    fn default() -> Self {
        let defaults = BriefingRules::default();
        Self {
            server_port: 3000,
            arc_samples: defaults.arc_samples,
            max_arc_samples: defaults.max_arc_samples,
            default_aircraft: defaults.default_aircraft,
            body_limit_bytes: 1024 * 1024,
            cors_permissive: true,
        }
    }
}

fn parse_var<T: FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|s| s.trim().parse().ok())
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rules_clamp_configured_samples() {
        let config = Config {
            arc_samples: 0,
            max_arc_samples: 1_000_000,
            ..Config::default()
        };
        let rules = config.rules();
        assert_eq!(rules.arc_samples, 1);
        assert_eq!(rules.max_arc_samples, aura_core::MAX_ARC_SAMPLES);
    }

    #[test]
    fn parses_boolean_flags() {
        assert_eq!(parse_bool(" TRUE "), Some(true));
        assert_eq!(parse_bool("off"), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }
}
