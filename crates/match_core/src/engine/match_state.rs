use crate::models::{EventKind, MatchEvent, Side, Team};
use crate::rng::StreamRegistry;

/// Mutable state of one simulation call. Created by the orchestrator, dropped with it.
#[derive(Debug)]
pub struct MatchState<'a> {
    pub team_a: &'a Team,
    pub team_b: &'a Team,
    /// Current minute; `0` before kickoff.
    pub minute: u32,
    /// Scheduled length of the match.
    pub minutes: u32,
    pub possession_a: u32,
    pub possession_b: u32,
    pub registry: StreamRegistry,
    /// Full timeline in generation order.
    pub events: Vec<MatchEvent>,
}

impl<'a> MatchState<'a> {
    pub fn new(team_a: &'a Team, team_b: &'a Team, seed: i32, minutes: u32) -> Self {
        Self {
            team_a,
            team_b,
            minute: 0,
            minutes,
            possession_a: 0,
            possession_b: 0,
            registry: StreamRegistry::new(seed),
            events: Vec::with_capacity(minutes as usize * 4 + 3),
        }
    }

    #[inline]
    pub fn team(&self, side: Side) -> &'a Team {
        match side {
            Side::A => self.team_a,
            Side::B => self.team_b,
        }
    }

    #[inline]
    pub fn team_name(&self, side: Side) -> &'a str {
        &self.team(side).name
    }

    pub fn record_possession(&mut self, side: Side) {
        match side {
            Side::A => self.possession_a += 1,
            Side::B => self.possession_b += 1,
        }
    }

    /// Appends an event for `side` at the current minute.
    pub fn push(&mut self, kind: EventKind, side: Side) {
        let team = self.team_name(side);
        self.events.push(MatchEvent::new(self.minute, kind, team));
    }

    /// Appends an event credited to a non-side actor (the referee).
    pub fn push_as(&mut self, kind: EventKind, actor: &str) {
        self.events.push(MatchEvent::new(self.minute, kind, actor));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::presets;

    #[test]
    fn test_push_uses_current_minute_and_side_name() {
        let a = presets::red_433_attacking();
        let b = presets::blue_4141_balanced();
        let mut state = MatchState::new(&a, &b, 1, 90);
        state.minute = 17;
        state.push(EventKind::CornerAwarded, Side::B);
        state.record_possession(Side::B);

        assert_eq!(state.events[0], MatchEvent::new(17, EventKind::CornerAwarded, "Blue United"));
        assert_eq!((state.possession_a, state.possession_b), (0, 1));
        assert_eq!(state.team_name(Side::A), "Red FC");
    }
}
