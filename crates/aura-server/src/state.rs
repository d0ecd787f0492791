//! Shared application state.

use aura_core::BriefingRules;

use crate::config::Config;

/// Read-only state handed to every handler.
pub struct AppState {
    config: Config,
    rules: BriefingRules,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let rules = config.rules();
        Self { config, rules }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn rules(&self) -> &BriefingRules {
        &self.rules
    }
}
