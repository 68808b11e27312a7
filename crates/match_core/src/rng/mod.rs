//! Deterministic randomness: the MT19937 core and the per-match stream registry.

mod mt19937;
mod registry;

pub use mt19937::Mt19937;
pub use registry::{derive_seed, fnv1a, RngStream, StreamRegistry};

/// Stream names. Each decision family draws only from its own stream.
pub mod streams {
    pub const POSSESSION: &str = "possession";
    pub const PHASES: &str = "phases";
    pub const DUELS: &str = "duels";
    pub const SETPIECES: &str = "setpieces";
    pub const SHOTS: &str = "shots";
    pub const GK_SAVES: &str = "gk_saves";
    pub const CARDS: &str = "cards";
    pub const PENALTIES: &str = "penalties";
    pub const COMMENTARY: &str = "commentary";

    pub const ALL: [&str; 9] =
        [POSSESSION, PHASES, DUELS, SETPIECES, SHOTS, GK_SAVES, CARDS, PENALTIES, COMMENTARY];
}
