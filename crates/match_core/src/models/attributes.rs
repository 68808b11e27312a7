//! Player attributes (physical / technical / mental), each held in `[0, 100]`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Lower bound of every attribute.
pub const ATTR_MIN: u8 = 0;
/// Upper bound of every attribute.
pub const ATTR_MAX: u8 = 100;
/// Value of an attribute nobody set.
pub const ATTR_DEFAULT: u8 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Attr {
    // Physical
    Pace,
    Accel,
    Stamina,
    Strength,
    Jumping,
    Agility,
    Balance,
    // Technical
    FirstTouch,
    Dribbling,
    Crossing,
    ShortPass,
    LongPass,
    Finishing,
    Heading,
    Tackling,
    Marking,
    Interceptions,
    SetPieces,
    Penalties,
    LongShots,
    // Mental
    Vision,
    Decision,
    Anticipation,
    Composure,
    OffBall,
    Positioning,
    Bravery,
    Aggression,
    Leadership,
    Teamwork,
    WorkRate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttrGroup {
    Physical,
    Technical,
    Mental,
}

impl Attr {
    pub const COUNT: usize = 31;

    pub const ALL: [Attr; Attr::COUNT] = [
        Attr::Pace,
        Attr::Accel,
        Attr::Stamina,
        Attr::Strength,
        Attr::Jumping,
        Attr::Agility,
        Attr::Balance,
        Attr::FirstTouch,
        Attr::Dribbling,
        Attr::Crossing,
        Attr::ShortPass,
        Attr::LongPass,
        Attr::Finishing,
        Attr::Heading,
        Attr::Tackling,
        Attr::Marking,
        Attr::Interceptions,
        Attr::SetPieces,
        Attr::Penalties,
        Attr::LongShots,
        Attr::Vision,
        Attr::Decision,
        Attr::Anticipation,
        Attr::Composure,
        Attr::OffBall,
        Attr::Positioning,
        Attr::Bravery,
        Attr::Aggression,
        Attr::Leadership,
        Attr::Teamwork,
        Attr::WorkRate,
    ];

    /// Serialised key (snake_case).
    pub fn name(self) -> &'static str {
        match self {
            Attr::Pace => "pace",
            Attr::Accel => "accel",
            Attr::Stamina => "stamina",
            Attr::Strength => "strength",
            Attr::Jumping => "jumping",
            Attr::Agility => "agility",
            Attr::Balance => "balance",
            Attr::FirstTouch => "first_touch",
            Attr::Dribbling => "dribbling",
            Attr::Crossing => "crossing",
            Attr::ShortPass => "short_pass",
            Attr::LongPass => "long_pass",
            Attr::Finishing => "finishing",
            Attr::Heading => "heading",
            Attr::Tackling => "tackling",
            Attr::Marking => "marking",
            Attr::Interceptions => "interceptions",
            Attr::SetPieces => "set_pieces",
            Attr::Penalties => "penalties",
            Attr::LongShots => "long_shots",
            Attr::Vision => "vision",
            Attr::Decision => "decision",
            Attr::Anticipation => "anticipation",
            Attr::Composure => "composure",
            Attr::OffBall => "off_ball",
            Attr::Positioning => "positioning",
            Attr::Bravery => "bravery",
            Attr::Aggression => "aggression",
            Attr::Leadership => "leadership",
            Attr::Teamwork => "teamwork",
            Attr::WorkRate => "work_rate",
        }
    }

    /// Accepts the snake_case key and the CamelCase variant name, case-insensitively.
    pub fn from_name(name: &str) -> Option<Attr> {
        let normalized: String =
            name.chars().filter(|c| *c != '_' && *c != '-').flat_map(char::to_lowercase).collect();
        Attr::ALL
            .iter()
            .copied()
            .find(|a| a.name().replace('_', "") == normalized)
    }

    pub fn group(self) -> AttrGroup {
        match self as usize {
            0..=6 => AttrGroup::Physical,
            7..=19 => AttrGroup::Technical,
            _ => AttrGroup::Mental,
        }
    }

    #[inline]
    fn index(self) -> usize {
        self as usize
    }
}

/// Fixed-size attribute block. Every write is clamped, so reads are always in range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, i64>", into = "BTreeMap<String, i64>")]
pub struct PlayerAttributes {
    values: [u8; Attr::COUNT],
}

impl Default for PlayerAttributes {
    fn default() -> Self {
        Self { values: [ATTR_DEFAULT; Attr::COUNT] }
    }
}

impl PlayerAttributes {
    /// Every attribute at `value` (clamped).
    pub fn uniform(value: i64) -> Self {
        Self { values: [clamp_attr(value); Attr::COUNT] }
    }

    #[inline]
    pub fn get(&self, attr: Attr) -> u8 {
        self.values[attr.index()]
    }

    /// Stores `value` clamped to `[0, 100]`.
    pub fn set(&mut self, attr: Attr, value: i64) {
        self.values[attr.index()] = clamp_attr(value);
    }

    /// Builder form of [`set`](Self::set).
    pub fn with(mut self, attr: Attr, value: i64) -> Self {
        self.set(attr, value);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (Attr, u8)> + '_ {
        Attr::ALL.iter().map(move |a| (*a, self.get(*a)))
    }

    /// Mean of one attribute group.
    pub fn group_average(&self, group: AttrGroup) -> f64 {
        let (sum, n) = self
            .iter()
            .filter(|(a, _)| a.group() == group)
            .fold((0.0, 0usize), |(s, n), (_, v)| (s + v as f64, n + 1));
        if n == 0 {
            0.0
        } else {
            sum / n as f64
        }
    }
}

#[inline]
fn clamp_attr(value: i64) -> u8 {
    value.clamp(ATTR_MIN as i64, ATTR_MAX as i64) as u8
}

impl From<BTreeMap<String, i64>> for PlayerAttributes {
    /// Missing keys keep the default, unknown keys are ignored.
    fn from(map: BTreeMap<String, i64>) -> Self {
        let mut attrs = PlayerAttributes::default();
        for (key, value) in map {
            if let Some(attr) = Attr::from_name(&key) {
                attrs.set(attr, value);
            }
        }
        attrs
    }
}

impl From<PlayerAttributes> for BTreeMap<String, i64> {
    fn from(attrs: PlayerAttributes) -> Self {
        attrs.iter().map(|(a, v)| (a.name().to_string(), v as i64)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_fifty() {
        let attrs = PlayerAttributes::default();
        assert!(attrs.iter().all(|(_, v)| v == ATTR_DEFAULT));
    }

    #[test]
    fn test_set_clamps() {
        let mut attrs = PlayerAttributes::default();
        attrs.set(Attr::Pace, 140);
        attrs.set(Attr::Strength, -12);
        assert_eq!(attrs.get(Attr::Pace), 100);
        assert_eq!(attrs.get(Attr::Strength), 0);
    }

    #[test]
    fn test_name_lookup_accepts_both_spellings() {
        assert_eq!(Attr::from_name("first_touch"), Some(Attr::FirstTouch));
        assert_eq!(Attr::from_name("FirstTouch"), Some(Attr::FirstTouch));
        assert_eq!(Attr::from_name("WORK_RATE"), Some(Attr::WorkRate));
        assert_eq!(Attr::from_name("throw_ins"), None);
        for attr in Attr::ALL {
            assert_eq!(Attr::from_name(attr.name()), Some(attr));
        }
    }

    #[test]
    fn test_groups_partition_attributes() {
        let physical = Attr::ALL.iter().filter(|a| a.group() == AttrGroup::Physical).count();
        let technical = Attr::ALL.iter().filter(|a| a.group() == AttrGroup::Technical).count();
        let mental = Attr::ALL.iter().filter(|a| a.group() == AttrGroup::Mental).count();
        assert_eq!((physical, technical, mental), (7, 13, 11));
        assert_eq!(Attr::LongShots.group(), AttrGroup::Technical);
        assert_eq!(Attr::Vision.group(), AttrGroup::Mental);
    }

    #[test]
    fn test_deserialize_normalizes() {
        let json = r#"{"pace": 250, "finishing": 77, "tackling": -3, "juggling": 99}"#;
        let attrs: PlayerAttributes = serde_json::from_str(json).unwrap();
        assert_eq!(attrs.get(Attr::Pace), 100);
        assert_eq!(attrs.get(Attr::Finishing), 77);
        assert_eq!(attrs.get(Attr::Tackling), 0);
        assert_eq!(attrs.get(Attr::Vision), ATTR_DEFAULT);
    }

    #[test]
    fn test_serializes_as_named_map() {
        let attrs = PlayerAttributes::default().with(Attr::OffBall, 81);
        let value = serde_json::to_value(&attrs).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.len(), Attr::COUNT);
        assert_eq!(obj["off_ball"], 81);
    }
}
