//! Team input: squad, tactics and the role → starter map.

use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use super::player::Player;
use super::role::Role;
use super::tactics::Tactics;

/// Players on the pitch at kickoff.
pub const STARTERS: usize = 11;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_starting_xi", skip_on_field_errors = false))]
pub struct Team {
    #[validate(length(min = 1, message = "team name must not be empty"))]
    pub name: String,
    /// Display code such as `4-3-3`. Informational only.
    #[serde(default)]
    pub formation: String,
    #[serde(default)]
    pub tactics: Tactics,
    #[validate(length(min = 11, message = "squad needs at least 11 players"))]
    pub players: Vec<Player>,
    /// Role → indices into `players`.
    pub role_map: BTreeMap<Role, Vec<usize>>,
}

impl Team {
    /// `(role, player)` pairs for every starter whose index resolves, in role order.
    pub fn starters(&self) -> impl Iterator<Item = (Role, &Player)> + '_ {
        self.role_map.iter().flat_map(move |(role, indices)| {
            indices.iter().filter_map(move |&i| self.players.get(i).map(|p| (*role, p)))
        })
    }

    /// First starter found among `roles`, trying the roles in the given order.
    pub fn lead_player(&self, roles: &[Role]) -> Option<&Player> {
        roles.iter().find_map(|role| {
            self.role_map
                .get(role)
                .and_then(|indices| indices.iter().find_map(|&i| self.players.get(i)))
        })
    }

    /// Mean role overall of the starting XI, `0.0` for an empty role map.
    pub fn average_overall(&self) -> f64 {
        let (sum, n) = self
            .starters()
            .fold((0.0, 0usize), |(s, n), (role, p)| (s + p.overall(role), n + 1));
        if n == 0 {
            0.0
        } else {
            sum / n as f64
        }
    }

    fn role_count(&self, role: Role) -> usize {
        self.role_map.get(&role).map_or(0, Vec::len)
    }
}

fn xi_error(code: &'static str, message: String) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Owned(message));
    err
}

/// Exactly 11 unique, in-range starters including at least one GK and two CBs.
fn validate_starting_xi(team: &Team) -> Result<(), ValidationError> {
    let mut seen = BTreeSet::new();
    let mut count = 0usize;

    for (role, indices) in &team.role_map {
        for &idx in indices {
            if idx >= team.players.len() {
                return Err(xi_error(
                    "starter_out_of_range",
                    format!("role {:?}: index {} out of range", role, idx),
                ));
            }
            if !seen.insert(idx) {
                return Err(xi_error(
                    "duplicate_starter",
                    format!("player index {} is assigned more than once", idx),
                ));
            }
            count += 1;
        }
    }

    if count != STARTERS {
        return Err(xi_error(
            "starter_count",
            format!("role map must reference exactly {} starters, got {}", STARTERS, count),
        ));
    }
    if team.role_count(Role::GK) < 1 {
        return Err(xi_error("missing_goalkeeper", "formation requires at least 1 GK".into()));
    }
    if team.role_count(Role::CB) < 2 {
        return Err(xi_error("missing_centre_backs", "formation requires at least 2 CBs".into()));
    }
    Ok(())
}
