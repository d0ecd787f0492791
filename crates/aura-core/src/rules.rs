//! Tunables for briefing assembly.

use serde::{Deserialize, Serialize};

use crate::geodesic::MAX_ARC_SAMPLES;
use crate::performance::DEFAULT_AIRCRAFT;

/// Configuration for briefing assembly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BriefingRules {
    /// Great-circle samples per route segment
    pub arc_samples: usize,
    /// Upper bound applied to any requested sample count
    pub max_arc_samples: usize,
    /// Position of the direction arrow along each segment (0 = start, 1 = end)
    pub arrow_fraction: f64,
    /// Aircraft type used when none is selected
    pub default_aircraft: String,
}

impl Default for BriefingRules {
    fn default() -> Self {
        Self {
            arc_samples: 64,
            max_arc_samples: MAX_ARC_SAMPLES,
            arrow_fraction: 0.75,
            default_aircraft: DEFAULT_AIRCRAFT.to_string(),
        }
    }
}

impl BriefingRules {
    /// Clamp a requested sample count into `1..=max_arc_samples`.
    pub fn clamp_samples(&self, requested: usize) -> usize {
        let max = self.max_arc_samples.clamp(1, MAX_ARC_SAMPLES);
        requested.clamp(1, max)
    }
}
