pub mod attributes;
pub mod events;
pub mod player;
pub mod report;
pub mod role;
pub mod stats;
pub mod tactics;
pub mod team;

pub use attributes::{Attr, AttrGroup, PlayerAttributes};
pub use events::{EventKind, GoalRecord, MatchEvent, REFEREE};
pub use player::{Footedness, Player, Trait};
pub use report::{write_ndjson, MatchReport};
pub use role::{role_overall, Role};
pub use stats::{MatchStats, Side, TeamStats};
pub use tactics::{
    Aggression, AttackFocus, CornerScheme, FreekickScheme, LineHeight, Pressing, SetPieces, Style,
    Tactics, Tempo, Width,
};
pub use team::{Team, STARTERS};
