//! One minute of play as an ordered pipeline.
//!
//! ```text
//! possession ─► final third ─► duel ─► set piece ──────────► shot
//!                                  └─► open-play shot ─► foul ─► card / penalty
//! ```
//!
//! Each gate draws from its own named stream. A shot draws on-target, distance and angle
//! from `shots` in that order; the keeper's roll comes from `gk_saves`.

use tracing::trace;

use super::config::EngineConfig;
use super::match_state::MatchState;
use super::probability::{
    duel_win_probability, fatigue_factor, save_probability, shot_xg, DuelProfile, KeeperProfile,
    PLACEHOLDER_ATTR,
};
use crate::models::{Attr, EventKind, GoalRecord, MatchStats, Role, Side, Team};
use crate::rng::streams;

/// Roles searched, in order, for the side's duel attacker.
pub const ATTACKER_ROLES: [Role; 4] = [Role::ST, Role::W, Role::AM, Role::CM];
/// Roles searched, in order, for the side's duel defender.
pub const DEFENDER_ROLES: [Role; 3] = [Role::CB, Role::FB, Role::DM];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShotKind {
    OpenPlay,
    SetPiece,
    Penalty,
}

/// Per-side values the minute model reads, resolved once from the role map.
#[derive(Debug, Clone)]
pub struct Lineup<'a> {
    pub attacker: DuelProfile,
    pub attacker_stamina: f64,
    pub defender: DuelProfile,
    pub keeper: KeeperProfile,
    /// Candidate scorers, rotated through as goals are scored.
    pub forwards: Vec<&'a str>,
}

impl<'a> Lineup<'a> {
    pub fn from_team(team: &'a Team) -> Self {
        let attacker = team.lead_player(&ATTACKER_ROLES);
        let defender = team.lead_player(&DEFENDER_ROLES);
        let keeper = team.lead_player(&[Role::GK]);

        let forwards: Vec<&'a str> = ATTACKER_ROLES
            .iter()
            .filter_map(|role| team.role_map.get(role))
            .flatten()
            .filter_map(|&i| team.players.get(i))
            .map(|p| p.name.as_str())
            .collect();

        Self {
            attacker: attacker
                .map_or_else(DuelProfile::placeholder, |p| DuelProfile::from_attributes(&p.attributes)),
            attacker_stamina: attacker
                .map_or(PLACEHOLDER_ATTR, |p| p.attributes.get(Attr::Stamina) as f64),
            defender: defender
                .map_or_else(DuelProfile::placeholder, |p| DuelProfile::from_attributes(&p.attributes)),
            keeper: keeper
                .map_or_else(KeeperProfile::placeholder, |p| KeeperProfile::from_attributes(&p.attributes)),
            forwards,
        }
    }

    fn scorer(&self, goals_so_far: u32) -> Option<&'a str> {
        if self.forwards.is_empty() {
            None
        } else {
            Some(self.forwards[goals_so_far as usize % self.forwards.len()])
        }
    }
}

/// Stateless driver of the per-minute pipeline for one fixture.
pub struct MinuteSimulator<'a> {
    config: &'a EngineConfig,
    lineup_a: Lineup<'a>,
    lineup_b: Lineup<'a>,
}

impl<'a> MinuteSimulator<'a> {
    pub fn new(config: &'a EngineConfig, team_a: &'a Team, team_b: &'a Team) -> Self {
        Self { config, lineup_a: Lineup::from_team(team_a), lineup_b: Lineup::from_team(team_b) }
    }

    pub fn lineup(&self, side: Side) -> &Lineup<'a> {
        match side {
            Side::A => &self.lineup_a,
            Side::B => &self.lineup_b,
        }
    }

    /// Side A's chance to own the ball this minute. An inverted band is read as `[max, min]`.
    pub fn possession_tilt(&self, team_a: &Team, team_b: &Team) -> f64 {
        let phase = &self.config.phase;
        let tilt = 0.5 + team_a.tactics.possession_bias() * phase.tilt_step
            - team_b.tactics.possession_bias() * phase.tilt_step;
        let lo = phase.tilt_min.min(phase.tilt_max);
        let hi = phase.tilt_min.max(phase.tilt_max);
        tilt.max(lo).min(hi)
    }

    /// Runs the pipeline for `state.minute`, appending to the state's timeline.
    pub fn step(&self, state: &mut MatchState<'_>, stats: &mut MatchStats, goals: &mut Vec<GoalRecord>) {
        let cfg = self.config;

        // 1) Possession
        let tilt = self.possession_tilt(state.team_a, state.team_b);
        let side = if state.registry.get(streams::POSSESSION).chance(tilt) { Side::A } else { Side::B };
        state.record_possession(side);
        state.push(EventKind::BuildUp, side);

        // 2) Final third
        if !state.registry.get(streams::PHASES).chance(cfg.phase.final_third_rate) {
            trace!("minute {}: {:?} build-up broke down", state.minute, side);
            return;
        }
        state.push(EventKind::FinalThird, side);

        // 3) Duel
        if !self.duel(state, stats, side) {
            trace!("minute {}: {:?} lost the duel", state.minute, side);
            return;
        }

        // 4) Set pieces
        let attacking = state.team(side).tactics;
        if state.registry.get(streams::SETPIECES).chance(cfg.set_pieces.freekick_rate) {
            stats.side_mut(side).freekicks += 1;
            state.push(EventKind::FreekickAwarded, side);
            let chance = cfg.set_pieces.freekick_shot_chance(attacking.set_pieces.freekicks);
            if state.registry.get(streams::SHOTS).chance(chance) {
                self.resolve_shot(state, stats, goals, side, ShotKind::SetPiece);
            }
            return;
        }
        let corner_rate = cfg.set_pieces.corner_rate_for(attacking.attack_focus);
        if state.registry.get(streams::SETPIECES).chance(corner_rate) {
            stats.side_mut(side).corners += 1;
            state.push(EventKind::CornerAwarded, side);
            let chance = cfg.set_pieces.corner_shot_chance(attacking.set_pieces.corners);
            if state.registry.get(streams::SHOTS).chance(chance) {
                self.resolve_shot(state, stats, goals, side, ShotKind::SetPiece);
            }
            return;
        }

        // 5) Open play
        if state.registry.get(streams::SHOTS).chance(cfg.phase.open_play_shot_rate) {
            self.resolve_shot(state, stats, goals, side, ShotKind::OpenPlay);
        }

        // 6) Fouls by the defending side
        self.discipline(state, stats, goals, side);
    }

    /// Returns `true` when the attacking side wins the duel.
    fn duel(&self, state: &mut MatchState<'_>, stats: &mut MatchStats, side: Side) -> bool {
        let attacker = self.lineup(side);
        let defender = self.lineup(side.opponent());
        let fatigue = fatigue_factor(state.minute, state.minutes, attacker.attacker_stamina);
        let p = duel_win_probability(&attacker.attacker, &defender.defender, fatigue);

        let own = stats.side_mut(side);
        own.duels_total += 1;
        if state.registry.get(streams::DUELS).chance(p) {
            own.duels_won += 1;
            state.push(EventKind::DuelWon, side);
            true
        } else {
            state.push(EventKind::DuelLost, side);
            false
        }
    }

    fn discipline(
        &self,
        state: &mut MatchState<'_>,
        stats: &mut MatchStats,
        goals: &mut Vec<GoalRecord>,
        side: Side,
    ) {
        let cfg = &self.config.discipline;
        let fouler = side.opponent();
        let foul_rate = cfg.foul_rate_for(state.team(fouler).tactics.aggression);
        if !state.registry.get(streams::CARDS).chance(foul_rate) {
            return;
        }
        stats.side_mut(fouler).fouls += 1;
        state.push(EventKind::FoulCommitted, fouler);

        let (yellow, red) = cfg.card_rates();
        let u = state.registry.get(streams::CARDS).next_double();
        if u < yellow {
            stats.side_mut(fouler).yellow_cards += 1;
            state.push(EventKind::YellowCard, fouler);
        } else if u < yellow + red {
            stats.side_mut(fouler).red_cards += 1;
            state.push(EventKind::RedCard, fouler);
        }

        if state.registry.get(streams::PENALTIES).chance(cfg.penalty_rate) {
            stats.side_mut(side).penalties += 1;
            state.push(EventKind::PenaltyAwarded, side);
            self.resolve_shot(state, stats, goals, side, ShotKind::Penalty);
        }
    }

    /// Shot funnel: shot → on target → save or goal.
    fn resolve_shot(
        &self,
        state: &mut MatchState<'_>,
        stats: &mut MatchStats,
        goals: &mut Vec<GoalRecord>,
        side: Side,
        kind: ShotKind,
    ) {
        let cfg = &self.config.shots;
        stats.side_mut(side).shots += 1;
        state.push(EventKind::Shot, side);

        let on_target_rate = match kind {
            ShotKind::OpenPlay => cfg.on_target_open_play,
            ShotKind::SetPiece => cfg.on_target_set_piece,
            ShotKind::Penalty => cfg.on_target_penalty,
        };
        let shots = state.registry.get(streams::SHOTS);
        if !shots.chance(on_target_rate) {
            return;
        }

        let (distance, angle, xg) = match kind {
            ShotKind::Penalty => (cfg.penalty_distance_m, cfg.penalty_angle_deg, cfg.penalty_xg),
            ShotKind::OpenPlay | ShotKind::SetPiece => {
                // spreads below 1 collapse to the base value
                let distance = (cfg.distance_base_m + shots.next_int(0, cfg.distance_spread_m.max(1))) as f64;
                let angle = (cfg.angle_base_deg + shots.next_int(0, cfg.angle_spread_deg.max(1))) as f64;
                (distance, angle, shot_xg(distance, angle, kind == ShotKind::SetPiece))
            }
        };

        let own = stats.side_mut(side);
        own.shots_on_target += 1;
        own.xg += xg;
        state.push(EventKind::ShotOnTarget, side);

        let keeper = &self.lineup(side.opponent()).keeper;
        let save_p = save_probability(xg, keeper, distance, angle);
        if state.registry.get(streams::GK_SAVES).chance(save_p) {
            stats.side_mut(side.opponent()).saves += 1;
            state.push(EventKind::SaveMade, side.opponent());
            return;
        }

        let scored_before = stats.side(side).goals;
        stats.side_mut(side).goals += 1;
        state.push(EventKind::Goal, side);
        let scorer = self.lineup(side).scorer(scored_before).unwrap_or("unknown");
        goals.push(GoalRecord {
            minute: state.minute,
            team: state.team_name(side).to_string(),
            scorer: scorer.to_string(),
            assist: None,
        });
        trace!("minute {}: goal for {}", state.minute, state.team_name(side));
    }
}
