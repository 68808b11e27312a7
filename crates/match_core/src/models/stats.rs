//! Aggregate per-side counters. Written only by the minute simulator.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Which of the two match sides. `A` kicks off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum Side {
    A,
    B,
}

impl Side {
    #[inline]
    pub fn opponent(self) -> Side {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TeamStats {
    /// Share of minutes in possession, percent.
    pub possession: f64,
    pub shots: u32,
    pub shots_on_target: u32,
    pub goals: u32,
    /// Sum of xG over on-target shots.
    pub xg: f64,
    pub corners: u32,
    pub freekicks: u32,
    pub penalties: u32,
    pub fouls: u32,
    pub yellow_cards: u32,
    pub red_cards: u32,
    pub duels_won: u32,
    pub duels_total: u32,
    /// Saves made by this side's goalkeeper.
    pub saves: u32,
}

impl TeamStats {
    pub fn duels_lost(&self) -> u32 {
        self.duels_total - self.duels_won
    }

    pub fn cards(&self) -> u32 {
        self.yellow_cards + self.red_cards
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct MatchStats {
    pub team_a: TeamStats,
    pub team_b: TeamStats,
}

impl MatchStats {
    #[inline]
    pub fn side(&self, side: Side) -> &TeamStats {
        match side {
            Side::A => &self.team_a,
            Side::B => &self.team_b,
        }
    }

    #[inline]
    pub fn side_mut(&mut self, side: Side) -> &mut TeamStats {
        match side {
            Side::A => &mut self.team_a,
            Side::B => &mut self.team_b,
        }
    }

    /// Converts minute tallies to percentages; an empty tally leaves both at zero.
    pub fn set_possession(&mut self, minutes_a: u32, minutes_b: u32) {
        let total = (minutes_a + minutes_b).max(1) as f64;
        self.team_a.possession = 100.0 * minutes_a as f64 / total;
        self.team_b.possession = 100.0 * minutes_b as f64 / total;
    }

    /// `0 ≤ goals ≤ on target ≤ shots` and `on target = goals + opponent saves`, both sides.
    pub fn funnel_holds(&self) -> bool {
        [Side::A, Side::B].iter().all(|&s| {
            let own = self.side(s);
            let opp = self.side(s.opponent());
            own.goals <= own.shots_on_target
                && own.shots_on_target <= own.shots
                && own.shots_on_target == own.goals + opp.saves
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_possession_percentages() {
        let mut stats = MatchStats::default();
        stats.set_possession(54, 36);
        assert!((stats.team_a.possession - 60.0).abs() < 1e-9);
        assert!((stats.team_a.possession + stats.team_b.possession - 100.0).abs() < 1e-9);

        let mut empty = MatchStats::default();
        empty.set_possession(0, 0);
        assert_eq!(empty.team_a.possession, 0.0);
    }

    #[test]
    fn test_funnel_check() {
        let mut stats = MatchStats::default();
        stats.team_a = TeamStats { shots: 5, shots_on_target: 3, goals: 1, ..Default::default() };
        stats.team_b.saves = 2;
        assert!(stats.funnel_holds());

        stats.team_b.saves = 1;
        assert!(!stats.funnel_holds());
    }

    #[test]
    fn test_side_mut_routes() {
        let mut stats = MatchStats::default();
        stats.side_mut(Side::B).corners += 2;
        assert_eq!(stats.team_b.corners, 2);
        assert_eq!(stats.side(Side::A).corners, 0);
        assert_eq!(Side::A.opponent(), Side::B);
    }
}
