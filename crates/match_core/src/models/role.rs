//! Starting-XI roles and their attribute weightings.

use serde::{Deserialize, Serialize};

use super::attributes::{Attr, PlayerAttributes};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Role {
    GK,
    FB,
    CB,
    DM,
    CM,
    AM,
    W,
    ST,
}

impl Role {
    pub const ALL: [Role; 8] =
        [Role::GK, Role::FB, Role::CB, Role::DM, Role::CM, Role::AM, Role::W, Role::ST];

    /// Attribute weights used for the role overall. Weights need not sum to 1;
    /// [`role_overall`] normalises them.
    pub fn weights(self) -> &'static [(Attr, f64)] {
        use Attr::*;
        match self {
            // No keeper-specific attributes; approximated from the shared set.
            Role::GK => &[
                (Positioning, 0.20),
                (Composure, 0.15),
                (Decision, 0.12),
                (Anticipation, 0.12),
                (Jumping, 0.10),
                (Strength, 0.08),
                (Vision, 0.05),
                (Leadership, 0.06),
                (Teamwork, 0.06),
                (FirstTouch, 0.06),
            ],
            Role::CB => &[
                (Tackling, 0.18),
                (Marking, 0.18),
                (Interceptions, 0.12),
                (Positioning, 0.12),
                (Strength, 0.10),
                (Heading, 0.12),
                (Aggression, 0.06),
                (Bravery, 0.06),
                (Pace, 0.06),
            ],
            Role::FB => &[
                (Pace, 0.14),
                (Accel, 0.12),
                (Stamina, 0.10),
                (Tackling, 0.12),
                (Marking, 0.08),
                (Crossing, 0.12),
                (ShortPass, 0.10),
                (Dribbling, 0.10),
                (Positioning, 0.12),
            ],
            Role::DM => &[
                (Tackling, 0.16),
                (Interceptions, 0.16),
                (Positioning, 0.14),
                (ShortPass, 0.12),
                (LongPass, 0.12),
                (Decision, 0.10),
                (Aggression, 0.10),
                (Strength, 0.10),
            ],
            Role::CM => &[
                (ShortPass, 0.18),
                (LongPass, 0.14),
                (FirstTouch, 0.12),
                (Vision, 0.14),
                (Decision, 0.12),
                (WorkRate, 0.10),
                (Stamina, 0.10),
                (Dribbling, 0.10),
            ],
            Role::AM => &[
                (FirstTouch, 0.16),
                (Vision, 0.16),
                (Composure, 0.12),
                (Dribbling, 0.14),
                (ShortPass, 0.14),
                (LongShots, 0.10),
                (OffBall, 0.10),
                (Decision, 0.08),
            ],
            Role::W => &[
                (Pace, 0.18),
                (Accel, 0.14),
                (Dribbling, 0.16),
                (Crossing, 0.14),
                (FirstTouch, 0.10),
                (OffBall, 0.10),
                (Composure, 0.08),
                (Stamina, 0.10),
            ],
            Role::ST => &[
                (Finishing, 0.30),
                (FirstTouch, 0.14),
                (OffBall, 0.16),
                (Composure, 0.14),
                (Heading, 0.10),
                (Pace, 0.08),
                (Accel, 0.04),
                (Strength, 0.04),
            ],
        }
    }
}

/// Weighted mean `Σ(attr·w) / Σw` for `role`.
pub fn role_overall(attrs: &PlayerAttributes, role: Role) -> f64 {
    let (num, den) = role
        .weights()
        .iter()
        .fold((0.0, 0.0), |(num, den), (attr, w)| (num + attrs.get(*attr) as f64 * w, den + w));
    if den > 0.0 {
        num / den
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_attributes_give_uniform_overall() {
        let attrs = PlayerAttributes::uniform(73);
        for role in Role::ALL {
            assert!((role_overall(&attrs, role) - 73.0).abs() < 1e-9, "{:?}", role);
        }
    }

    #[test]
    fn test_weights_sum_to_one() {
        for role in Role::ALL {
            let sum: f64 = role.weights().iter().map(|(_, w)| w).sum();
            assert!((sum - 1.0).abs() < 1e-9, "{:?} sums to {}", role, sum);
        }
    }

    #[test]
    fn test_striker_driven_by_finishing() {
        let base = PlayerAttributes::uniform(50);
        let sharp = base.clone().with(Attr::Finishing, 90);
        let delta = role_overall(&sharp, Role::ST) - role_overall(&base, Role::ST);
        assert!((delta - 12.0).abs() < 1e-9);
        // Finishing carries no weight for a centre-back.
        assert!((role_overall(&sharp, Role::CB) - 50.0).abs() < 1e-9);
    }
}
