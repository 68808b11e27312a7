//! Fouls, cards and penalties

use serde::{Deserialize, Serialize};

use crate::models::Aggression;

/// How readily the referee shows cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RefereeProfile {
    Lenient,
    #[default]
    Neutral,
    Strict,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisciplineConfig {
    /// Foul chance per open-play minute before aggression (default: 0.06)
    pub foul_rate: f64,

    // === Foul multipliers by defensive aggression ===
    pub aggression_low: f64,
    pub aggression_med: f64,
    pub aggression_high: f64,

    /// Yellow card chance per foul (default: 0.25)
    pub yellow_rate: f64,
    /// Straight red chance per foul (default: 0.02)
    pub red_rate: f64,
    /// Chance a foul is in the box (default: 0.08)
    pub penalty_rate: f64,

    pub referee: RefereeProfile,
    pub lenient_multiplier: f64,
    pub strict_multiplier: f64,
}

impl Default for DisciplineConfig {
    fn default() -> Self {
        Self {
            foul_rate: 0.06,

            aggression_low: 0.8,
            aggression_med: 1.0,
            aggression_high: 1.25,

            yellow_rate: 0.25,
            red_rate: 0.02,
            penalty_rate: 0.08,

            referee: RefereeProfile::Neutral,
            lenient_multiplier: 0.8,
            strict_multiplier: 1.25,
        }
    }
}

impl DisciplineConfig {
    pub fn foul_rate_for(&self, aggression: Aggression) -> f64 {
        let mult = match aggression {
            Aggression::Low => self.aggression_low,
            Aggression::Med => self.aggression_med,
            Aggression::High => self.aggression_high,
        };
        (self.foul_rate * mult).clamp(0.0, 1.0)
    }

    pub fn card_multiplier(&self) -> f64 {
        match self.referee {
            RefereeProfile::Lenient => self.lenient_multiplier,
            RefereeProfile::Neutral => 1.0,
            RefereeProfile::Strict => self.strict_multiplier,
        }
    }

    /// `(yellow, red)` after the referee multiplier, with `yellow + red <= 1`.
    pub fn card_rates(&self) -> (f64, f64) {
        let m = self.card_multiplier();
        let yellow = (self.yellow_rate * m).clamp(0.0, 1.0);
        let red = (self.red_rate * m).clamp(0.0, 1.0 - yellow);
        (yellow, red)
    }
}
