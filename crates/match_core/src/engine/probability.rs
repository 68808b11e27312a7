//! Probability models for match simulation
//!
//! All functions are pure - they take attributes and geometry as input and return
//! probabilities clamped to their playable band.

use crate::models::{Attr, PlayerAttributes};

// ============================================================================
// Constants
// ============================================================================

/// Neutral attribute value used when a role map cannot supply a player.
pub const PLACEHOLDER_ATTR: f64 = 70.0;

pub const XG_MIN: f64 = 0.01;
pub const XG_MAX: f64 = 0.7;
pub const SAVE_MIN: f64 = 0.05;
pub const SAVE_MAX: f64 = 0.95;
pub const DUEL_MIN: f64 = 0.1;
pub const DUEL_MAX: f64 = 0.9;
pub const FATIGUE_FLOOR: f64 = 0.75;

const DISTANCE_RANGE_M: (f64, f64) = (5.0, 35.0);
const ANGLE_RANGE_DEG: (f64, f64) = (5.0, 90.0);

// ============================================================================
// Data Structures
// ============================================================================

/// Goalkeeper attributes read by the save model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeeperProfile {
    pub agility: f64,
    pub positioning: f64,
    pub composure: f64,
}

impl KeeperProfile {
    pub fn from_attributes(attrs: &PlayerAttributes) -> Self {
        Self {
            agility: attrs.get(Attr::Agility) as f64,
            positioning: attrs.get(Attr::Positioning) as f64,
            composure: attrs.get(Attr::Composure) as f64,
        }
    }

    pub fn placeholder() -> Self {
        Self { agility: PLACEHOLDER_ATTR, positioning: PLACEHOLDER_ATTR, composure: PLACEHOLDER_ATTR }
    }

    /// Multiplier in `[0.8, 1.2]`.
    pub fn quality(&self) -> f64 {
        0.8 + (self.agility + self.positioning + self.composure) / 300.0 * 0.4
    }
}

/// Attributes that decide a physical duel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DuelProfile {
    pub strength: f64,
    pub balance: f64,
    pub work_rate: f64,
    pub aggression: f64,
}

impl DuelProfile {
    pub fn from_attributes(attrs: &PlayerAttributes) -> Self {
        Self {
            strength: attrs.get(Attr::Strength) as f64,
            balance: attrs.get(Attr::Balance) as f64,
            work_rate: attrs.get(Attr::WorkRate) as f64,
            aggression: attrs.get(Attr::Aggression) as f64,
        }
    }

    pub fn placeholder() -> Self {
        Self {
            strength: PLACEHOLDER_ATTR,
            balance: PLACEHOLDER_ATTR,
            work_rate: PLACEHOLDER_ATTR,
            aggression: PLACEHOLDER_ATTR,
        }
    }

    pub fn rating(&self) -> f64 {
        0.35 * self.strength + 0.25 * self.balance + 0.20 * self.work_rate + 0.20 * self.aggression
    }
}

// ============================================================================
// Shot Quality
// ============================================================================

/// Expected goals for a shot from `distance_m` at an opening of `angle_deg`.
///
/// Decreasing in distance, increasing in angle; set pieces use the lower base rate.
pub fn shot_xg(distance_m: f64, angle_deg: f64, set_piece: bool) -> f64 {
    let base = if set_piece { 0.06 } else { 0.08 };
    let dist = distance_m.clamp(DISTANCE_RANGE_M.0, DISTANCE_RANGE_M.1);
    let ang = angle_deg.clamp(ANGLE_RANGE_DEG.0, ANGLE_RANGE_DEG.1);

    let distance_factor = 1.2 - (dist - 5.0) / 40.0;
    let angle_factor = ang / 90.0;
    (base * distance_factor * (0.6 + 0.4 * angle_factor)).clamp(XG_MIN, XG_MAX)
}

// ============================================================================
// Goalkeeper
// ============================================================================

/// Probability that the keeper saves an on-target shot of quality `xg`.
pub fn save_probability(xg: f64, keeper: &KeeperProfile, distance_m: f64, angle_deg: f64) -> f64 {
    let goal_prob = (xg * 0.9).clamp(0.05, 0.85);
    let d = distance_m.clamp(DISTANCE_RANGE_M.0, DISTANCE_RANGE_M.1);
    let a = angle_deg.clamp(ANGLE_RANGE_DEG.0, ANGLE_RANGE_DEG.1);

    // Longer range and tighter angle each add up to +0.15.
    let geometry = (d - 5.0) / 30.0 * 0.15 + (90.0 - a) / 85.0 * 0.15;
    ((1.0 - goal_prob) * keeper.quality() + geometry).clamp(SAVE_MIN, SAVE_MAX)
}

// ============================================================================
// Duels
// ============================================================================

/// Attacker's chance of winning a duel: logistic in the rating gap, damped by fatigue.
#[inline]
pub fn duel_win_probability(attacker: &DuelProfile, defender: &DuelProfile, fatigue: f64) -> f64 {
    let delta = (attacker.rating() - defender.rating()) * fatigue;
    let p = 1.0 / (1.0 + (-delta / 8.0).exp());
    p.clamp(DUEL_MIN, DUEL_MAX)
}

/// Fatigue multiplier in `[0.75, 1.0]`: decays over the match, slower for high stamina.
pub fn fatigue_factor(minute: u32, minutes: u32, stamina: f64) -> f64 {
    let progress = if minutes == 0 { 1.0 } else { (minute as f64 / minutes as f64).min(1.0) };
    let endurance = (stamina / 100.0).clamp(0.0, 1.0);
    (1.0 - 0.25 * progress * (1.0 - endurance)).clamp(FATIGUE_FLOOR, 1.0)
}

// ============================================================================
// Tests
// ============================================================================
