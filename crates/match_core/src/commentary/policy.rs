//! Per-kind trigger rates and cooldowns, fixed for the lifetime of a composer.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::engine::config::CommentaryConfig;
use crate::models::EventKind;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KindPolicy {
    /// Chance in `[0, 1]` that an eligible event gets a line.
    pub trigger_rate: f64,
    /// Minimum minutes between two lines for the same kind; `0` disables the check.
    #[serde(default)]
    pub minute_cooldown: u32,
}

impl KindPolicy {
    pub const ALWAYS: KindPolicy = KindPolicy { trigger_rate: 1.0, minute_cooldown: 0 };

    pub const fn new(trigger_rate: f64, minute_cooldown: u32) -> Self {
        Self { trigger_rate, minute_cooldown }
    }

    fn normalized(self) -> Self {
        let rate = if self.trigger_rate.is_nan() { 0.0 } else { self.trigger_rate.clamp(0.0, 1.0) };
        Self { trigger_rate: rate, ..self }
    }
}

/// Immutable kind → policy table plus the global micro-event throttles.
#[derive(Debug, Clone, PartialEq)]
pub struct CommentaryPolicy {
    table: [KindPolicy; EventKind::COUNT],
    /// Minimum distance in timeline positions between two micro lines.
    pub global_cooldown_events: u32,
    /// Micro lines allowed per minute.
    pub max_per_minute: u32,
}

impl CommentaryPolicy {
    pub const DEFAULT_GLOBAL_COOLDOWN_EVENTS: u32 = 2;
    pub const DEFAULT_MAX_PER_MINUTE: u32 = 1;

    /// Built-in policy for `kind`: key events always, micro events sparsely.
    pub fn default_for(kind: EventKind) -> KindPolicy {
        match kind {
            EventKind::BuildUp => KindPolicy::new(0.05, 4),
            EventKind::FinalThird => KindPolicy::new(0.08, 3),
            EventKind::DuelWon | EventKind::DuelLost => KindPolicy::new(0.06, 3),
            EventKind::Shot => KindPolicy::new(0.10, 2),
            _ => KindPolicy::ALWAYS,
        }
    }

    pub fn new(
        overrides: &BTreeMap<EventKind, KindPolicy>,
        global_cooldown_events: u32,
        max_per_minute: u32,
    ) -> Self {
        let mut table = [KindPolicy::ALWAYS; EventKind::COUNT];
        for kind in EventKind::ALL {
            let policy = overrides.get(&kind).copied().unwrap_or_else(|| Self::default_for(kind));
            table[kind.index()] = policy.normalized();
        }
        Self { table, global_cooldown_events, max_per_minute }
    }

    pub fn from_config(config: &CommentaryConfig) -> Self {
        Self::new(&config.overrides, config.global_cooldown_events, config.max_per_minute)
    }

    #[inline]
    pub fn get(&self, kind: EventKind) -> KindPolicy {
        self.table[kind.index()]
    }
}

impl Default for CommentaryPolicy {
    fn default() -> Self {
        Self::new(
            &BTreeMap::new(),
            Self::DEFAULT_GLOBAL_COOLDOWN_EVENTS,
            Self::DEFAULT_MAX_PER_MINUTE,
        )
    }
}
