//! Simulation engine: configuration, probability model, per-minute pipeline and orchestrator.

pub mod config;
pub mod match_engine;
pub mod match_state;
pub mod minute_simulator;
pub mod probability;


pub use config::EngineConfig;
pub use match_engine::{simulate_batch, BatchSummary, MatchEngine, DEFAULT_MINUTES};
pub use match_state::MatchState;
pub use minute_simulator::{Lineup, MinuteSimulator, ShotKind};
