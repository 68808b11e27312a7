//! Commentary selection settings

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::commentary::{CommentaryPolicy, KindPolicy};
use crate::models::EventKind;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommentaryConfig {
    /// Master switch; `false` leaves every description empty.
    pub enabled: bool,
    pub locale: String,
    /// Falls back to `neutral` for kinds the tone does not cover.
    pub tone: String,
    /// Recent selections a template may not repeat within (default: 6)
    pub cooldown_size: usize,
    /// Minimum timeline distance between two micro lines (default: 2)
    pub global_cooldown_events: u32,
    /// Micro lines allowed per minute (default: 1)
    pub max_per_minute: u32,
    /// Replaces the built-in policy for the listed kinds.
    pub overrides: BTreeMap<EventKind, KindPolicy>,
}

impl Default for CommentaryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            locale: "en".to_string(),
            tone: "neutral".to_string(),
            cooldown_size: 6,
            global_cooldown_events: CommentaryPolicy::DEFAULT_GLOBAL_COOLDOWN_EVENTS,
            max_per_minute: CommentaryPolicy::DEFAULT_MAX_PER_MINUTE,
            overrides: BTreeMap::new(),
        }
    }
}

impl CommentaryConfig {
    pub fn policy(&self) -> CommentaryPolicy {
        CommentaryPolicy::from_config(self)
    }
}
