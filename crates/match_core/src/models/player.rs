use serde::{Deserialize, Serialize};

use super::attributes::PlayerAttributes;
use super::role::{role_overall, Role};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Footedness {
    #[default]
    Right,
    Left,
    Both,
}

/// Descriptive tags. Carried through for presentation; the match model does not read them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trait {
    FinesseShot,
    PowerHeader,
    PressingMonster,
    Playmaker,
    BoxToBox,
}

/// Squad member as consumed by the engine (read-only during a match).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub foot: Footedness,
    #[serde(default)]
    pub traits: Vec<Trait>,
    #[serde(default)]
    pub attributes: PlayerAttributes,
}

impl Player {
    pub fn new(id: u32, name: impl Into<String>, attributes: PlayerAttributes) -> Self {
        Self { id, name: name.into(), foot: Footedness::default(), traits: Vec::new(), attributes }
    }

    /// Role-specific overall in `[0, 100]`.
    pub fn overall(&self, role: Role) -> f64 {
        role_overall(&self.attributes, role)
    }
}
