//! Possession and phase-progression rates

use serde::{Deserialize, Serialize};

/// Possession tilt and the open-play funnel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhaseConfig {
    /// Possession shift per unit of tactical bias (default: 0.04)
    pub tilt_step: f64,
    /// Lower bound of side A's possession chance (default: 0.30)
    pub tilt_min: f64,
    /// Upper bound of side A's possession chance (default: 0.70)
    pub tilt_max: f64,
    /// Chance a possession reaches the final third (default: 0.55)
    pub final_third_rate: f64,
    /// Open-play shot chance after a won duel (default: 0.42)
    pub open_play_shot_rate: f64,
}

impl Default for PhaseConfig {
    fn default() -> Self {
        Self {
            tilt_step: 0.04,
            tilt_min: 0.30,
            tilt_max: 0.70,
            final_third_rate: 0.55,
            open_play_shot_rate: 0.42,
        }
    }
}
