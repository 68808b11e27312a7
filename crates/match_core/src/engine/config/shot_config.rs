//! Shot and set-piece parameters

use serde::{Deserialize, Serialize};

use crate::models::{AttackFocus, CornerScheme, FreekickScheme};

/// Set-piece diversion rates and per-scheme direct-shot chances.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SetPieceConfig {
    /// Freekick diversion chance (default: 0.07)
    pub freekick_rate: f64,
    /// Before the attack-focus multiplier (default: 0.08)
    pub corner_rate: f64,

    // === Direct shot chance by freekick scheme ===
    pub freekick_shot_long: f64,
    pub freekick_shot_short: f64,

    // === Shot chance by corner scheme ===
    pub corner_shot_short: f64,
    pub corner_shot_near_post: f64,
    pub corner_shot_far_post: f64,
    pub corner_shot_crowd_keeper: f64,

    // === Corner-rate multipliers by attack focus ===
    pub focus_wings: f64,
    pub focus_center: f64,
    pub focus_mixed: f64,
}

impl Default for SetPieceConfig {
    fn default() -> Self {
        Self {
            freekick_rate: 0.07,
            corner_rate: 0.08,

            freekick_shot_long: 0.30,
            freekick_shot_short: 0.24,

            corner_shot_short: 0.18,
            corner_shot_near_post: 0.34,
            corner_shot_far_post: 0.32,
            corner_shot_crowd_keeper: 0.28,

            focus_wings: 1.15,
            focus_center: 0.90,
            focus_mixed: 1.0,
        }
    }
}

impl SetPieceConfig {
    pub fn corner_rate_for(&self, focus: AttackFocus) -> f64 {
        let mult = match focus {
            AttackFocus::Wings => self.focus_wings,
            AttackFocus::Center => self.focus_center,
            AttackFocus::Mixed => self.focus_mixed,
        };
        (self.corner_rate * mult).clamp(0.0, 1.0)
    }

    pub fn corner_shot_chance(&self, scheme: CornerScheme) -> f64 {
        match scheme {
            CornerScheme::Short => self.corner_shot_short,
            CornerScheme::NearPost => self.corner_shot_near_post,
            CornerScheme::FarPost => self.corner_shot_far_post,
            CornerScheme::CrowdKeeper => self.corner_shot_crowd_keeper,
        }
    }

    pub fn freekick_shot_chance(&self, scheme: FreekickScheme) -> f64 {
        match scheme {
            FreekickScheme::Long => self.freekick_shot_long,
            FreekickScheme::Short => self.freekick_shot_short,
        }
    }
}

/// Shot resolution: on-target rates and sampled geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShotConfig {
    pub on_target_open_play: f64,
    pub on_target_set_piece: f64,
    pub on_target_penalty: f64,

    /// Distance = base + uniform [0, spread) metres
    pub distance_base_m: i32,
    pub distance_spread_m: i32,
    /// Angle = base + uniform [0, spread) degrees
    pub angle_base_deg: i32,
    pub angle_spread_deg: i32,

    // === Penalties (fixed geometry) ===
    /// xG credited for a penalty on target (default: 0.76). Bypasses the shot-quality
    /// model, so it is not held to that model's `XG_MIN..=XG_MAX` band.
    pub penalty_xg: f64,
    pub penalty_distance_m: f64,
    pub penalty_angle_deg: f64,
}

impl Default for ShotConfig {
    fn default() -> Self {
        Self {
            on_target_open_play: 0.48,
            on_target_set_piece: 0.55,
            on_target_penalty: 0.85,

            distance_base_m: 12,
            distance_spread_m: 13,
            angle_base_deg: 20,
            angle_spread_deg: 61,

            penalty_xg: 0.76,
            penalty_distance_m: 11.0,
            penalty_angle_deg: 37.0,
        }
    }
}
