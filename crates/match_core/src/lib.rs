//! # match_core - Deterministic Minute-Based Football Match Simulation
//!
//! Simulates a football match between two squads one minute at a time and
//! produces a self-contained report: score, per-team statistics, a goal list,
//! the full event timeline and an NDJSON serialization of it.
//!
//! ## Features
//! - 100% deterministic simulation (same teams + seed = byte-identical report)
//! - Independent named random streams per concern (possession, duels, shots, ...)
//! - Attribute-driven shot, save and duel probabilities
//! - Optional commentary drawn from locale/tone template packs
//! - Parallel batch simulation for calibration runs
//!
//! ## Usage
//! ```rust
//! use match_core::data::presets;
//!
//! let home = presets::red_433_attacking();
//! let away = presets::blue_4141_balanced();
//! let report = match_core::simulate(&home, &away, 42, 90);
//! assert_eq!(report.seed, 42);
//! assert!(report.stats.funnel_holds());
//! ```

// Doc formatting lints - purely cosmetic, fix incrementally
#![allow(clippy::doc_lazy_continuation)]
// Struct initialization pattern used intentionally
#![allow(clippy::field_reassign_with_default)]
// Batch entry points take the full simulation context
#![allow(clippy::too_many_arguments)]

pub mod commentary;
pub mod data;
pub mod engine;
pub mod error;
pub mod models;
pub mod rng;

pub use commentary::{CommentaryComposer, TemplateLibrary, TemplateRepository};
pub use engine::{simulate_batch, BatchSummary, EngineConfig, MatchEngine, DEFAULT_MINUTES};
pub use error::{CoreError, Result};
pub use models::{EventKind, GoalRecord, MatchEvent, MatchReport, MatchStats, Player, Role, Team};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Version of the serialized [`MatchReport`] layout.
pub const SCHEMA_VERSION: u32 = 1;

/// Simulates one match with the default configuration and embedded English commentary.
pub fn simulate(team_a: &Team, team_b: &Team, seed: i32, minutes: u32) -> MatchReport {
    MatchEngine::new(team_a, team_b).simulate(seed, minutes)
}
