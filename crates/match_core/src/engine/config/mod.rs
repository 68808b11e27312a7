//! # Engine Configuration
//!
//! Every tuning constant of the minute model lives here instead of in the simulator.
//!
//! ## Presets
//! - `realistic()`: the default calibration
//! - `arcade()`: more final-third entries, shots and goals
//! - `strict_referee()`: more fouls punished, higher card rates
//!
//! ## Usage
//! ```rust
//! use match_core::engine::config::EngineConfig;
//!
//! let config = EngineConfig::default();
//! let arcade = EngineConfig::arcade();
//! assert!(arcade.phase.open_play_shot_rate > config.phase.open_play_shot_rate);
//! ```
//!
//! Files may be partial: missing fields keep their defaults.

mod commentary_config;
mod discipline_config;
mod phase_config;
mod shot_config;

pub use commentary_config::CommentaryConfig;
pub use discipline_config::{DisciplineConfig, RefereeProfile};
pub use phase_config::PhaseConfig;
pub use shot_config::{SetPieceConfig, ShotConfig};

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EngineConfig {
    /// Possession tilt and phase progression
    pub phase: PhaseConfig,
    /// Freekick / corner diversion
    pub set_pieces: SetPieceConfig,
    /// Shot resolution
    pub shots: ShotConfig,
    /// Fouls, cards, penalties
    pub discipline: DisciplineConfig,
    /// Commentary selection
    pub commentary: CommentaryConfig,
}

impl EngineConfig {
    pub fn realistic() -> Self {
        Self::default()
    }

    pub fn arcade() -> Self {
        let mut cfg = Self::default();
        cfg.phase.final_third_rate = 0.65;
        cfg.phase.open_play_shot_rate = 0.55;
        cfg.set_pieces.corner_rate = 0.10;
        cfg.shots.on_target_open_play = 0.56;
        cfg.shots.distance_base_m = 8; // closer shots
        cfg.discipline.penalty_rate = 0.12;
        cfg
    }

    pub fn strict_referee() -> Self {
        let mut cfg = Self::default();
        cfg.discipline.referee = RefereeProfile::Strict;
        cfg.discipline.foul_rate = 0.08;
        cfg
    }

    /// Preset by name (`realistic`, `arcade`, `strict_referee`).
    pub fn preset(name: &str) -> Result<Self> {
        match name.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "realistic" | "default" => Ok(Self::realistic()),
            "arcade" => Ok(Self::arcade()),
            "strict_referee" | "strict" => Ok(Self::strict_referee()),
            _ => Err(CoreError::UnknownPreset(name.to_string())),
        }
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let cfg: Self = serde_yaml::from_str(yaml)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Loads by extension: `.json` as JSON, anything else as YAML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));

        let cfg = if is_json { Self::from_json_str(&text)? } else { Self::from_yaml_str(&text)? };
        log::info!("Loaded engine config from {}", path.display());
        Ok(cfg)
    }

    pub fn to_yaml_string(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Rejects rates outside `[0, 1]`, an inverted tilt band, negative multipliers and
    /// empty sampling ranges.
    pub fn validate(&self) -> Result<()> {
        let rates = [
            ("phase.tilt_min", self.phase.tilt_min),
            ("phase.tilt_max", self.phase.tilt_max),
            ("phase.final_third_rate", self.phase.final_third_rate),
            ("phase.open_play_shot_rate", self.phase.open_play_shot_rate),
            ("set_pieces.freekick_rate", self.set_pieces.freekick_rate),
            ("set_pieces.corner_rate", self.set_pieces.corner_rate),
            ("set_pieces.freekick_shot_long", self.set_pieces.freekick_shot_long),
            ("set_pieces.freekick_shot_short", self.set_pieces.freekick_shot_short),
            ("set_pieces.corner_shot_short", self.set_pieces.corner_shot_short),
            ("set_pieces.corner_shot_near_post", self.set_pieces.corner_shot_near_post),
            ("set_pieces.corner_shot_far_post", self.set_pieces.corner_shot_far_post),
            ("set_pieces.corner_shot_crowd_keeper", self.set_pieces.corner_shot_crowd_keeper),
            ("shots.on_target_open_play", self.shots.on_target_open_play),
            ("shots.on_target_set_piece", self.shots.on_target_set_piece),
            ("shots.on_target_penalty", self.shots.on_target_penalty),
            ("shots.penalty_xg", self.shots.penalty_xg),
            ("discipline.foul_rate", self.discipline.foul_rate),
            ("discipline.yellow_rate", self.discipline.yellow_rate),
            ("discipline.red_rate", self.discipline.red_rate),
            ("discipline.penalty_rate", self.discipline.penalty_rate),
        ];
        for (name, value) in rates {
            if !(0.0..=1.0).contains(&value) {
                return Err(CoreError::InvalidConfig(format!("{name} = {value} is outside [0, 1]")));
            }
        }

        if self.phase.tilt_min > self.phase.tilt_max {
            return Err(CoreError::InvalidConfig(format!(
                "tilt band inverted: {} > {}",
                self.phase.tilt_min, self.phase.tilt_max
            )));
        }

        let multipliers = [
            ("phase.tilt_step", self.phase.tilt_step),
            ("set_pieces.focus_wings", self.set_pieces.focus_wings),
            ("set_pieces.focus_center", self.set_pieces.focus_center),
            ("set_pieces.focus_mixed", self.set_pieces.focus_mixed),
            ("discipline.aggression_low", self.discipline.aggression_low),
            ("discipline.aggression_med", self.discipline.aggression_med),
            ("discipline.aggression_high", self.discipline.aggression_high),
            ("discipline.lenient_multiplier", self.discipline.lenient_multiplier),
            ("discipline.strict_multiplier", self.discipline.strict_multiplier),
        ];
        for (name, value) in multipliers {
            if !value.is_finite() || value < 0.0 {
                return Err(CoreError::InvalidConfig(format!("{name} = {value} must be >= 0")));
            }
        }

        if self.shots.distance_spread_m <= 0 || self.shots.angle_spread_deg <= 0 {
            return Err(CoreError::InvalidConfig(
                "shot distance and angle spreads must be positive".to_string(),
            ));
        }

        for (kind, policy) in &self.commentary.overrides {
            if !(0.0..=1.0).contains(&policy.trigger_rate) {
                return Err(CoreError::InvalidConfig(format!(
                    "commentary.overrides.{kind}.trigger_rate = {} is outside [0, 1]",
                    policy.trigger_rate
                )));
            }
        }
        if self.commentary.max_per_minute == 0 {
            return Err(CoreError::InvalidConfig(
                "commentary.max_per_minute must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

// ========== Tests ==========

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EventKind;

    #[test]
    fn test_default_config() {
        let cfg = EngineConfig::default();
        assert_eq!(cfg.phase.final_third_rate, 0.55);
        assert_eq!(cfg.phase.open_play_shot_rate, 0.42);
        assert_eq!(cfg.set_pieces.freekick_rate, 0.07);
        assert_eq!(cfg.shots.distance_base_m, 12);
        assert_eq!(cfg.commentary.cooldown_size, 6);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_presets_validate() {
        for name in ["realistic", "arcade", "strict-referee"] {
            let cfg = EngineConfig::preset(name).unwrap();
            assert!(cfg.validate().is_ok(), "{}", name);
        }
        assert!(matches!(EngineConfig::preset("chaos"), Err(CoreError::UnknownPreset(_))));
    }

    #[test]
    fn test_arcade_is_more_attacking() {
        let realistic = EngineConfig::realistic();
        let arcade = EngineConfig::arcade();
        assert!(arcade.phase.final_third_rate > realistic.phase.final_third_rate);
        assert!(arcade.shots.on_target_open_play > realistic.shots.on_target_open_play);
        assert_eq!(
            EngineConfig::strict_referee().discipline.referee,
            RefereeProfile::Strict
        );
    }

    #[test]
    fn test_partial_yaml_merges_over_defaults() {
        let yaml = r#"
phase:
  final_third_rate: 0.6
discipline:
  referee: strict
commentary:
  tone: fun
  overrides:
    Shot:
      trigger_rate: 0.5
"#;
        let cfg = EngineConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(cfg.phase.final_third_rate, 0.6);
        assert_eq!(cfg.phase.open_play_shot_rate, 0.42);
        assert_eq!(cfg.discipline.referee, RefereeProfile::Strict);
        assert_eq!(cfg.commentary.tone, "fun");
        assert_eq!(cfg.commentary.locale, "en");
        assert_eq!(cfg.commentary.overrides[&EventKind::Shot].trigger_rate, 0.5);
        assert_eq!(cfg.commentary.overrides[&EventKind::Shot].minute_cooldown, 0);
    }

    #[test]
    fn test_out_of_range_rate_rejected() {
        let err = EngineConfig::from_json_str(r#"{"shots": {"on_target_penalty": 1.4}}"#)
            .unwrap_err();
        assert!(matches!(err, CoreError::InvalidConfig(ref m) if m.contains("on_target_penalty")));
    }

    #[test]
    fn test_inverted_band_rejected() {
        let mut cfg = EngineConfig::default();
        cfg.phase.tilt_min = 0.8;
        assert!(cfg.validate().is_err());

        let mut cfg = EngineConfig::default();
        cfg.shots.angle_spread_deg = 0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_load_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let json_path = dir.path().join("engine.json");
        std::fs::write(&json_path, r#"{"set_pieces": {"corner_rate": 0.1}}"#).unwrap();
        assert_eq!(EngineConfig::load(&json_path).unwrap().set_pieces.corner_rate, 0.1);

        let yaml_path = dir.path().join("engine.yml");
        std::fs::write(&yaml_path, EngineConfig::arcade().to_yaml_string().unwrap()).unwrap();
        assert_eq!(EngineConfig::load(&yaml_path).unwrap(), EngineConfig::arcade());

        let missing = EngineConfig::load(dir.path().join("nope.yaml")).unwrap_err();
        assert!(matches!(missing, CoreError::Io(_)));
    }
}
