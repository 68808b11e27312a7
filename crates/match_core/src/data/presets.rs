//! Built-in preset teams.
//!
//! All three share the same 16-player squad shape; only names, role maps and tactics
//! differ, so preset matchups are decided by tactics.

use std::collections::BTreeMap;

use crate::error::{CoreError, Result};
use crate::models::{
    Aggression, Attr, AttackFocus, CornerScheme, Footedness, FreekickScheme, LineHeight, Player,
    PlayerAttributes, Pressing, Role, SetPieces, Style, Tactics, Team, Tempo, Width,
};

pub const SQUAD_SIZE: usize = 16;

pub const PRESET_NAMES: [&str; 3] = ["red_433_attacking", "blue_4141_balanced", "grey_541_defensive"];

/// 4-3-3, attacking, wide and high-pressing.
pub fn red_433_attacking() -> Team {
    Team {
        name: "Red FC".into(),
        formation: "4-3-3".into(),
        tactics: Tactics {
            style: Style::Attacking,
            tempo: Tempo::Fast,
            width: Width::Wide,
            line_height: LineHeight::High,
            pressing: Pressing::High,
            aggression: Aggression::High,
            attack_focus: AttackFocus::Wings,
            set_pieces: SetPieces { corners: CornerScheme::NearPost, freekicks: FreekickScheme::Long },
        },
        players: build_squad("RED"),
        role_map: role_map(&[
            (Role::GK, &[0]),
            (Role::FB, &[1, 4]),
            (Role::CB, &[2, 3]),
            (Role::CM, &[5, 6, 7]),
            (Role::W, &[8, 9]),
            (Role::ST, &[10]),
        ]),
    }
}

/// 4-1-4-1, balanced.
pub fn blue_4141_balanced() -> Team {
    Team {
        name: "Blue United".into(),
        formation: "4-1-4-1".into(),
        tactics: Tactics {
            style: Style::Balanced,
            tempo: Tempo::Normal,
            width: Width::Normal,
            line_height: LineHeight::Mid,
            pressing: Pressing::Med,
            aggression: Aggression::Med,
            attack_focus: AttackFocus::Mixed,
            set_pieces: SetPieces { corners: CornerScheme::Short, freekicks: FreekickScheme::Short },
        },
        players: build_squad("BLUE"),
        role_map: role_map(&[
            (Role::GK, &[0]),
            (Role::FB, &[1, 4]),
            (Role::CB, &[2, 3]),
            (Role::DM, &[5]),
            (Role::CM, &[6, 7]),
            (Role::W, &[8, 9]),
            (Role::ST, &[10]),
        ]),
    }
}

/// 5-4-1, deep and narrow.
pub fn grey_541_defensive() -> Team {
    Team {
        name: "Grey Town".into(),
        formation: "5-4-1".into(),
        tactics: Tactics {
            style: Style::Defensive,
            tempo: Tempo::Slow,
            width: Width::Narrow,
            line_height: LineHeight::Low,
            pressing: Pressing::Low,
            aggression: Aggression::Low,
            attack_focus: AttackFocus::Center,
            set_pieces: SetPieces { corners: CornerScheme::FarPost, freekicks: FreekickScheme::Long },
        },
        players: build_squad("GREY"),
        role_map: role_map(&[
            (Role::GK, &[0]),
            (Role::FB, &[1, 5]),
            (Role::CB, &[2, 3, 4]),
            (Role::CM, &[6, 7]),
            (Role::W, &[8, 9]),
            (Role::ST, &[10]),
        ]),
    }
}

pub fn all() -> Vec<Team> {
    vec![red_433_attacking(), blue_4141_balanced(), grey_541_defensive()]
}

/// Looks a preset up by key (`red_433_attacking`), short key (`red`) or team name.
pub fn by_name(name: &str) -> Result<Team> {
    let key = name.trim().to_ascii_lowercase();
    match key.as_str() {
        "red_433_attacking" | "red" | "red fc" => Ok(red_433_attacking()),
        "blue_4141_balanced" | "blue" | "blue united" => Ok(blue_4141_balanced()),
        "grey_541_defensive" | "grey" | "grey town" => Ok(grey_541_defensive()),
        _ => Err(CoreError::UnknownPreset(name.to_string())),
    }
}

fn role_map(entries: &[(Role, &[usize])]) -> BTreeMap<Role, Vec<usize>> {
    entries.iter().map(|(role, idx)| (*role, idx.to_vec())).collect()
}

/// Base values cycle 60..=85 in steps of 5 with small per-attribute offsets.
fn build_squad(prefix: &str) -> Vec<Player> {
    (0..SQUAD_SIZE)
        .map(|i| {
            let base = 60 + (i % 6) as i64 * 5;
            let mut attrs = PlayerAttributes::uniform(base);
            for attr in [Attr::FirstTouch, Attr::ShortPass, Attr::Vision] {
                attrs.set(attr, base + 5);
            }
            for attr in [Attr::Stamina, Attr::Jumping, Attr::Crossing, Attr::Heading, Attr::Leadership]
            {
                attrs.set(attr, base - 5);
            }

            let mut player = Player::new(i as u32 + 1, format!("{}-Player-{}", prefix, i + 1), attrs);
            player.foot = match i % 3 {
                0 => Footedness::Right,
                1 => Footedness::Left,
                _ => Footedness::Both,
            };
            player
        })
        .collect()
}
