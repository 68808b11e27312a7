//! Team tactics: coarse enumerations that bias the minute model.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Style {
    Attacking,
    #[default]
    Balanced,
    Defensive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tempo {
    Slow,
    #[default]
    Normal,
    Fast,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Width {
    Narrow,
    #[default]
    Normal,
    Wide,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineHeight {
    Low,
    #[default]
    Mid,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pressing {
    Low,
    #[default]
    Med,
    High,
}

/// Defensive aggression (how readily the side commits fouls).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Aggression {
    Low,
    #[default]
    Med,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttackFocus {
    Center,
    Wings,
    #[default]
    Mixed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CornerScheme {
    Short,
    #[default]
    #[serde(alias = "near-post")]
    NearPost,
    #[serde(alias = "far-post")]
    FarPost,
    #[serde(alias = "crowd-keeper")]
    CrowdKeeper,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FreekickScheme {
    Short,
    #[default]
    Long,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SetPieces {
    #[serde(default)]
    pub corners: CornerScheme,
    #[serde(default)]
    pub freekicks: FreekickScheme,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Tactics {
    pub style: Style,
    pub tempo: Tempo,
    pub width: Width,
    pub line_height: LineHeight,
    pub pressing: Pressing,
    pub aggression: Aggression,
    pub attack_focus: AttackFocus,
    pub set_pieces: SetPieces,
}

impl Tactics {
    /// Possession bias in "tilt steps": style (±1) plus pressing (±0.5).
    pub fn possession_bias(&self) -> f64 {
        let style = match self.style {
            Style::Attacking => 1.0,
            Style::Balanced => 0.0,
            Style::Defensive => -1.0,
        };
        let pressing = match self.pressing {
            Pressing::High => 0.5,
            Pressing::Med => 0.0,
            Pressing::Low => -0.5,
        };
        style + pressing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_possession_bias_extremes() {
        let gung_ho = Tactics { style: Style::Attacking, pressing: Pressing::High, ..Default::default() };
        let bus = Tactics { style: Style::Defensive, pressing: Pressing::Low, ..Default::default() };
        assert_eq!(gung_ho.possession_bias(), 1.5);
        assert_eq!(bus.possession_bias(), -1.5);
        assert_eq!(Tactics::default().possession_bias(), 0.0);
    }

    #[test]
    fn test_scheme_aliases() {
        let sp: SetPieces =
            serde_json::from_str(r#"{"corners": "far-post", "freekicks": "short"}"#).unwrap();
        assert_eq!(sp.corners, CornerScheme::FarPost);
        assert_eq!(sp.freekicks, FreekickScheme::Short);

        let t: Tactics = serde_json::from_str(r#"{"style": "attacking"}"#).unwrap();
        assert_eq!(t.style, Style::Attacking);
        assert_eq!(t.attack_focus, AttackFocus::Mixed);
    }
}
