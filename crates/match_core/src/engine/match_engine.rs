//! Match orchestrator: kickoff, the minute loop, whistles, commentary and the report.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use validator::Validate;

use super::config::EngineConfig;
use super::match_state::MatchState;
use super::minute_simulator::MinuteSimulator;
use crate::commentary::{CommentaryComposer, TemplateLibrary, TemplateRepository};
use crate::error::Result;
use crate::models::{write_ndjson, EventKind, MatchReport, MatchStats, Side, Team, REFEREE};
use crate::rng::streams;
use crate::SCHEMA_VERSION;

pub const DEFAULT_MINUTES: u32 = 90;

/// Simulates fixtures between two read-only teams.
///
/// The engine holds no per-match state: every [`simulate`](Self::simulate) call builds a
/// fresh stream registry, so one engine can run many seeds, including from several threads.
pub struct MatchEngine<'a> {
    team_a: &'a Team,
    team_b: &'a Team,
    config: EngineConfig,
    templates: &'a dyn TemplateRepository,
}

impl<'a> MatchEngine<'a> {
    /// Default configuration and the embedded English templates. Teams are not validated.
    pub fn new(team_a: &'a Team, team_b: &'a Team) -> Self {
        Self { team_a, team_b, config: EngineConfig::default(), templates: TemplateLibrary::embedded() }
    }

    /// Like [`new`](Self::new), but rejects teams that fail validation.
    pub fn try_new(team_a: &'a Team, team_b: &'a Team) -> Result<Self> {
        team_a.validate()?;
        team_b.validate()?;
        Ok(Self::new(team_a, team_b))
    }

    /// Out-of-range values are tolerated: the minute model orders inverted bands and floors
    /// empty spreads. Use [`try_with_config`](Self::try_with_config) to reject them instead.
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn try_with_config(self, config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(self.with_config(config))
    }

    pub fn with_templates(mut self, templates: &'a dyn TemplateRepository) -> Self {
        self.templates = templates;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Runs one match. `minutes == 0` is treated as 1.
    pub fn simulate(&self, seed: i32, minutes: u32) -> MatchReport {
        let minutes = minutes.max(1);
        let sim = MinuteSimulator::new(&self.config, self.team_a, self.team_b);
        let mut state = MatchState::new(self.team_a, self.team_b, seed, minutes);
        let mut stats = MatchStats::default();
        let mut goals = Vec::new();

        state.push(EventKind::Kickoff, Side::A);
        let half = minutes / 2;
        for minute in 1..=minutes {
            state.minute = minute;
            sim.step(&mut state, &mut stats, &mut goals);
            if minutes >= 2 && minute == half {
                state.push_as(EventKind::HalfTime, REFEREE);
            }
        }
        state.push_as(EventKind::FinalWhistle, REFEREE);

        stats.set_possession(state.possession_a, state.possession_b);

        let MatchState { events, registry, .. } = state;
        let events_ndjson = write_ndjson(&events);
        let events_full = if self.config.commentary.enabled {
            let rng = registry.into_stream(streams::COMMENTARY);
            let mut composer = CommentaryComposer::new(rng, self.templates, &self.config.commentary);
            composer.annotate(&events, &self.team_a.name, &self.team_b.name)
        } else {
            events
        };
        let key_events = events_full.iter().filter(|e| e.kind.is_key()).cloned().collect();

        debug!(
            "{} {}-{} {} (seed {}, {} minutes, {} events)",
            self.team_a.name,
            stats.team_a.goals,
            stats.team_b.goals,
            self.team_b.name,
            seed,
            minutes,
            events_full.len()
        );

        MatchReport {
            schema_version: SCHEMA_VERSION,
            seed,
            minutes,
            team_a: self.team_a.name.clone(),
            team_b: self.team_b.name.clone(),
            score_a: stats.team_a.goals,
            score_b: stats.team_b.goals,
            stats,
            goals,
            events: key_events,
            events_full,
            events_ndjson,
        }
    }

    /// Runs one match per seed in parallel. Output order follows `seeds`.
    pub fn simulate_batch(&self, seeds: &[i32], minutes: u32) -> Vec<MatchReport> {
        info!(
            "Simulating batch of {} matches: {} vs {}",
            seeds.len(),
            self.team_a.name,
            self.team_b.name
        );
        seeds.par_iter().map(|&seed| self.simulate(seed, minutes)).collect()
    }
}

/// Free-function form of [`MatchEngine::simulate_batch`].
pub fn simulate_batch(
    team_a: &Team,
    team_b: &Team,
    seeds: &[i32],
    minutes: u32,
    config: &EngineConfig,
    templates: &dyn TemplateRepository,
) -> Vec<MatchReport> {
    MatchEngine::new(team_a, team_b)
        .with_config(config.clone())
        .with_templates(templates)
        .simulate_batch(seeds, minutes)
}

// ============================================================================
// Batch summary
// ============================================================================

/// Averages over a set of reports for the same fixture.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub matches: usize,
    pub wins_a: usize,
    pub draws: usize,
    pub wins_b: usize,
    pub avg_goals_a: f64,
    pub avg_goals_b: f64,
    pub avg_shots_a: f64,
    pub avg_shots_b: f64,
    pub avg_xg_a: f64,
    pub avg_xg_b: f64,
    pub avg_cards_a: f64,
    pub avg_cards_b: f64,
    pub avg_possession_a: f64,
}

impl BatchSummary {
    pub fn from_reports(reports: &[MatchReport]) -> Self {
        let mut summary = BatchSummary { matches: reports.len(), ..Default::default() };
        if reports.is_empty() {
            return summary;
        }

        for r in reports {
            match r.winner() {
                Some(Side::A) => summary.wins_a += 1,
                Some(Side::B) => summary.wins_b += 1,
                None => summary.draws += 1,
            }
            let (a, b) = (&r.stats.team_a, &r.stats.team_b);
            summary.avg_goals_a += a.goals as f64;
            summary.avg_goals_b += b.goals as f64;
            summary.avg_shots_a += a.shots as f64;
            summary.avg_shots_b += b.shots as f64;
            summary.avg_xg_a += a.xg;
            summary.avg_xg_b += b.xg;
            summary.avg_cards_a += a.cards() as f64;
            summary.avg_cards_b += b.cards() as f64;
            summary.avg_possession_a += a.possession;
        }

        let n = reports.len() as f64;
        for avg in [
            &mut summary.avg_goals_a,
            &mut summary.avg_goals_b,
            &mut summary.avg_shots_a,
            &mut summary.avg_shots_b,
            &mut summary.avg_xg_a,
            &mut summary.avg_xg_b,
            &mut summary.avg_cards_a,
            &mut summary.avg_cards_b,
            &mut summary.avg_possession_a,
        ] {
            *avg /= n;
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commentary::NoTemplates;
    use crate::data::presets;

    #[test]
    fn test_invalid_config_rejected_or_tolerated() {
        let a = presets::red_433_attacking();
        let b = presets::blue_4141_balanced();

        let mut inverted = EngineConfig::default();
        inverted.phase.tilt_min = 0.8;
        let mut flat = EngineConfig::default();
        flat.shots.distance_spread_m = 0;
        flat.shots.angle_spread_deg = 0;

        for config in [inverted, flat] {
            assert!(MatchEngine::new(&a, &b).try_with_config(config.clone()).is_err());
            let report = MatchEngine::new(&a, &b).with_config(config).simulate(1, 90);
            assert!(report.stats.funnel_holds());
            assert_eq!(report.events_full.last().map(|e| e.kind), Some(EventKind::FinalWhistle));
        }
        assert!(MatchEngine::new(&a, &b).try_with_config(EngineConfig::arcade()).is_ok());
    }

    #[test]
    fn test_seed_42_scenario() {
        let a = presets::red_433_attacking();
        let b = presets::blue_4141_balanced();
        let report = MatchEngine::new(&a, &b).simulate(42, 90);

        let kickoffs: Vec<_> = report.events_full.iter().filter(|e| e.kind == EventKind::Kickoff).collect();
        let whistles: Vec<_> =
            report.events_full.iter().filter(|e| e.kind == EventKind::FinalWhistle).collect();
        assert_eq!(kickoffs.len(), 1);
        assert_eq!(kickoffs[0].minute, 0);
        assert_eq!(kickoffs[0].team, "Red FC");
        assert_eq!(whistles.len(), 1);
        assert_eq!(whistles[0].minute, 90);
        assert_eq!(whistles[0].team, REFEREE);
        assert_eq!(report.events_full.last().map(|e| e.kind), Some(EventKind::FinalWhistle));
        assert!(report.stats.funnel_holds());
        assert_eq!(report.score_a, report.stats.team_a.goals);
        assert_eq!(report.goals.len() as u32, report.score_a + report.score_b);
        assert_eq!(report.schema_version, SCHEMA_VERSION);
    }

    #[test]
    fn test_half_time_placement() {
        let a = presets::red_433_attacking();
        let b = presets::grey_541_defensive();
        let report = MatchEngine::new(&a, &b).simulate(7, 90);
        let pos = report.events_full.iter().position(|e| e.kind == EventKind::HalfTime).unwrap();
        let ht = &report.events_full[pos];
        assert_eq!(ht.minute, 45);
        assert!(report.events_full[pos + 1..].iter().all(|e| e.minute > 45 || e.kind == EventKind::FinalWhistle));

        let short = MatchEngine::new(&a, &b).simulate(7, 1);
        assert!(short.events_full.iter().all(|e| e.kind != EventKind::HalfTime));
    }

    #[test]
    fn test_zero_minutes_normalized() {
        let a = presets::red_433_attacking();
        let b = presets::blue_4141_balanced();
        let report = MatchEngine::new(&a, &b).simulate(1, 0);
        assert_eq!(report.minutes, 1);
        assert_eq!(report.events_full.last().unwrap().minute, 1);
    }

    #[test]
    fn test_commentary_does_not_change_timeline() {
        let a = presets::red_433_attacking();
        let b = presets::blue_4141_balanced();
        let narrated = MatchEngine::new(&a, &b).simulate(99, 90);
        let silent = MatchEngine::new(&a, &b).with_templates(&NoTemplates).simulate(99, 90);

        assert_eq!(narrated.events_ndjson, silent.events_ndjson);
        assert_eq!(narrated.stats, silent.stats);
        assert!(narrated.events.iter().any(|e| e.description.is_some()));
        assert!(silent.events_full.iter().all(|e| e.description.is_none()));
    }

    #[test]
    fn test_key_events_are_filtered_full_events() {
        let a = presets::grey_541_defensive();
        let b = presets::blue_4141_balanced();
        let report = MatchEngine::new(&a, &b).simulate(2024, 90);
        let expected: Vec<_> = report.events_full.iter().filter(|e| e.kind.is_key()).cloned().collect();
        assert_eq!(report.events, expected);
        assert!(report.events.iter().all(|e| e.kind.is_key()));
    }

    #[test]
    fn test_try_new_rejects_invalid_team() {
        let a = presets::red_433_attacking();
        let mut b = presets::blue_4141_balanced();
        b.role_map.remove(&crate::models::Role::GK);
        assert!(MatchEngine::try_new(&a, &b).is_err());
        assert!(MatchEngine::try_new(&a, &a).is_ok());
    }

    #[test]
    fn test_batch_preserves_order_and_matches_sequential() {
        let a = presets::red_433_attacking();
        let b = presets::grey_541_defensive();
        let config = EngineConfig::default();
        let seeds: Vec<i32> = (100..116).collect();

        let batch = simulate_batch(&a, &b, &seeds, 90, &config, TemplateLibrary::embedded());
        assert_eq!(batch.len(), seeds.len());
        let engine = MatchEngine::new(&a, &b);
        for (report, &seed) in batch.iter().zip(&seeds) {
            assert_eq!(report.seed, seed);
            assert_eq!(report, &engine.simulate(seed, 90));
        }

        let summary = BatchSummary::from_reports(&batch);
        assert_eq!(summary.matches, 16);
        assert_eq!(summary.wins_a + summary.draws + summary.wins_b, 16);
        assert!(summary.avg_possession_a > 50.0);
    }

    #[test]
    fn test_empty_batch_summary() {
        let summary = BatchSummary::from_reports(&[]);
        assert_eq!(summary, BatchSummary::default());
    }
}
