use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Acting team of whistle events that belong to no side.
pub const REFEREE: &str = "referee";

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[cfg_attr(test, derive(strum_macros::EnumIter))]
pub enum EventKind {
    Kickoff,
    BuildUp,
    FinalThird,
    Shot,
    ShotOnTarget,
    Goal,
    CornerAwarded,
    FreekickAwarded,
    PenaltyAwarded,
    FoulCommitted,
    YellowCard,
    RedCard,
    DuelWon,
    DuelLost,
    SaveMade,
    HalfTime,
    FinalWhistle,
}

impl EventKind {
    pub const COUNT: usize = 17;

    pub const ALL: [EventKind; EventKind::COUNT] = [
        EventKind::Kickoff,
        EventKind::BuildUp,
        EventKind::FinalThird,
        EventKind::Shot,
        EventKind::ShotOnTarget,
        EventKind::Goal,
        EventKind::CornerAwarded,
        EventKind::FreekickAwarded,
        EventKind::PenaltyAwarded,
        EventKind::FoulCommitted,
        EventKind::YellowCard,
        EventKind::RedCard,
        EventKind::DuelWon,
        EventKind::DuelLost,
        EventKind::SaveMade,
        EventKind::HalfTime,
        EventKind::FinalWhistle,
    ];

    /// Canonical name, identical to the serialised form and the template-file keys.
    pub fn name(self) -> &'static str {
        match self {
            EventKind::Kickoff => "Kickoff",
            EventKind::BuildUp => "BuildUp",
            EventKind::FinalThird => "FinalThird",
            EventKind::Shot => "Shot",
            EventKind::ShotOnTarget => "ShotOnTarget",
            EventKind::Goal => "Goal",
            EventKind::CornerAwarded => "CornerAwarded",
            EventKind::FreekickAwarded => "FreekickAwarded",
            EventKind::PenaltyAwarded => "PenaltyAwarded",
            EventKind::FoulCommitted => "FoulCommitted",
            EventKind::YellowCard => "YellowCard",
            EventKind::RedCard => "RedCard",
            EventKind::DuelWon => "DuelWon",
            EventKind::DuelLost => "DuelLost",
            EventKind::SaveMade => "SaveMade",
            EventKind::HalfTime => "HalfTime",
            EventKind::FinalWhistle => "FinalWhistle",
        }
    }

    /// Case-insensitive inverse of [`name`](Self::name).
    pub fn from_name(name: &str) -> Option<EventKind> {
        let name = name.trim();
        EventKind::ALL.iter().copied().find(|k| k.name().eq_ignore_ascii_case(name))
    }

    /// Low-salience kinds whose commentary is probabilistic and throttled.
    pub fn is_micro(self) -> bool {
        matches!(
            self,
            EventKind::BuildUp
                | EventKind::FinalThird
                | EventKind::DuelWon
                | EventKind::DuelLost
                | EventKind::Shot
        )
    }

    /// Crowd-relevant kinds: always narrated and kept in the report's key timeline.
    pub fn is_key(self) -> bool {
        !self.is_micro()
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One timeline entry. The commentary pass may replace an event with a copy that carries
/// a description; nothing else changes an event once appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct MatchEvent {
    pub minute: u32,
    #[serde(rename = "type")]
    pub kind: EventKind,
    /// Acting team name, or [`REFEREE`].
    pub team: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl MatchEvent {
    pub fn new(minute: u32, kind: EventKind, team: impl Into<String>) -> Self {
        Self { minute, kind, team: team.into(), description: None }
    }

    /// Copy of this event carrying `description`.
    pub fn with_description(&self, description: impl Into<String>) -> Self {
        Self { description: Some(description.into()), ..self.clone() }
    }
}

/// Scorer record for a goal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct GoalRecord {
    pub minute: u32,
    pub team: String,
    pub scorer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assist: Option<String>,
}
