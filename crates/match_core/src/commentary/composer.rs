//! Turns timeline events into commentary lines.
//!
//! Two gates decide whether an event is narrated:
//! - key events pass the per-kind policy (trigger rate, minute cooldown);
//! - micro events additionally need a free slot in their minute and enough timeline
//!   distance from the previous micro line.
//!
//! Selection draws from the `commentary` stream only, so narration never disturbs the
//! match itself.

use std::borrow::Cow;
use std::collections::HashMap;

use super::policy::CommentaryPolicy;
use super::recency::RecencyWindow;
use super::repository::TemplateRepository;
use crate::engine::config::CommentaryConfig;
use crate::models::{EventKind, MatchEvent};
use crate::rng::RngStream;

const NEUTRAL_TONE: &str = "neutral";

/// Random picks tried before falling back to a scan.
const MAX_PICK_ATTEMPTS: usize = 4;

pub struct CommentaryComposer<'a> {
    rng: RngStream,
    repo: &'a dyn TemplateRepository,
    locale: String,
    tone: String,
    cooldown_size: usize,
    policy: CommentaryPolicy,
    key_recent: RecencyWindow,
    micro_recent: RecencyWindow,
    last_minute: [Option<u32>; EventKind::COUNT],
    micro_per_minute: HashMap<u32, u32>,
    last_micro_index: Option<usize>,
}

impl<'a> CommentaryComposer<'a> {
    pub fn new(rng: RngStream, repo: &'a dyn TemplateRepository, config: &CommentaryConfig) -> Self {
        let locale = if config.locale.trim().is_empty() { "en" } else { config.locale.trim() };
        let tone = if config.tone.trim().is_empty() { NEUTRAL_TONE } else { config.tone.trim() };
        Self {
            rng,
            repo,
            locale: locale.to_string(),
            tone: tone.to_string(),
            cooldown_size: config.cooldown_size,
            policy: config.policy(),
            key_recent: RecencyWindow::new(config.cooldown_size),
            micro_recent: RecencyWindow::new(config.cooldown_size),
            last_minute: [None; EventKind::COUNT],
            micro_per_minute: HashMap::new(),
            last_micro_index: None,
        }
    }

    /// Key-event line, or `None` when the policy declines or no template exists.
    pub fn compose(&mut self, kind: EventKind, minute: u32, team: &str, opponent: &str) -> Option<String> {
        if !self.should_comment(kind, minute) {
            return None;
        }
        let pool = self.pool(kind);
        let chosen = pick(&mut self.rng, &mut self.key_recent, &pool)?;
        self.last_minute[kind.index()] = Some(minute);
        Some(fill_placeholders(&chosen, minute, team, opponent))
    }

    /// Micro-event line for the event at timeline position `index`.
    pub fn compose_micro(
        &mut self,
        kind: EventKind,
        minute: u32,
        team: &str,
        opponent: &str,
        index: usize,
    ) -> Option<String> {
        if !kind.is_micro() {
            return None;
        }
        let used = self.micro_per_minute.get(&minute).copied().unwrap_or(0);
        if used >= self.policy.max_per_minute {
            return None;
        }
        if let Some(last) = self.last_micro_index {
            if index.saturating_sub(last) < self.policy.global_cooldown_events as usize {
                return None;
            }
        }
        if !self.should_comment(kind, minute) {
            return None;
        }

        let pool = self.pool(kind);
        let chosen = pick(&mut self.rng, &mut self.micro_recent, &pool)?;
        self.last_minute[kind.index()] = Some(minute);
        *self.micro_per_minute.entry(minute).or_insert(0) += 1;
        self.last_micro_index = Some(index);
        Some(fill_placeholders(&chosen, minute, team, opponent))
    }

    /// Post-pass over a finished timeline: returns the events with descriptions attached
    /// where a line was composed. The opponent is resolved by name against the two sides.
    pub fn annotate(&mut self, events: &[MatchEvent], team_a: &str, team_b: &str) -> Vec<MatchEvent> {
        events
            .iter()
            .enumerate()
            .map(|(index, ev)| {
                let opponent = if ev.team == team_a {
                    team_b
                } else if ev.team == team_b {
                    team_a
                } else {
                    ""
                };
                let line = if ev.kind.is_micro() {
                    self.compose_micro(ev.kind, ev.minute, &ev.team, opponent, index)
                } else {
                    self.compose(ev.kind, ev.minute, &ev.team, opponent)
                };
                match line {
                    Some(text) => ev.with_description(text),
                    None => ev.clone(),
                }
            })
            .collect()
    }

    /// Minute cooldown, then one trigger-rate draw. The minute is recorded by the caller
    /// once a line is actually produced.
    fn should_comment(&mut self, kind: EventKind, minute: u32) -> bool {
        let policy = self.policy.get(kind);
        if policy.minute_cooldown > 0 {
            if let Some(last) = self.last_minute[kind.index()] {
                if minute.saturating_sub(last) < policy.minute_cooldown {
                    return false;
                }
            }
        }
        if self.rng.next_double() >= policy.trigger_rate {
            return false;
        }
        true
    }

    /// Tone pool (neutral fallback), extended with the generic pool when it cannot cover
    /// the cooldown window on its own.
    fn pool(&self, kind: EventKind) -> Cow<'a, [String]> {
        let repo = self.repo;
        let mut tone = self.tone.as_str();
        let mut own = repo.get(&self.locale, tone, kind);
        if own.is_empty() && !tone.eq_ignore_ascii_case(NEUTRAL_TONE) {
            tone = NEUTRAL_TONE;
            own = repo.get(&self.locale, tone, kind);
        }
        if own.is_empty() || own.len() > self.cooldown_size {
            return Cow::Borrowed(own);
        }

        let mut generic = repo.generic(&self.locale, tone);
        if generic.is_empty() {
            generic = repo.generic(&self.locale, NEUTRAL_TONE);
        }
        if generic.is_empty() {
            return Cow::Borrowed(own);
        }

        let mut merged = own.to_vec();
        for t in generic {
            if !merged.contains(t) {
                merged.push(t.clone());
            }
        }
        Cow::Owned(merged)
    }
}

/// Random pick avoiding the recency window, then the first non-recent template, then the
/// first template. The choice is recorded in `recent`.
fn pick(rng: &mut RngStream, recent: &mut RecencyWindow, pool: &[String]) -> Option<String> {
    if pool.is_empty() {
        return None;
    }

    let len = pool.len() as i32;
    let mut chosen = None;
    for _ in 0..MAX_PICK_ATTEMPTS {
        let candidate = &pool[rng.next_int(0, len) as usize];
        if !recent.contains(candidate) {
            chosen = Some(candidate);
            break;
        }
    }
    let chosen = chosen
        .or_else(|| pool.iter().find(|t| !recent.contains(t)))
        .unwrap_or(&pool[0])
        .clone();

    recent.push(&chosen);
    Some(chosen)
}

/// Replaces `{minute}`, `{team}` and `{opponent}` in one pass; other braces are kept.
pub fn fill_placeholders(template: &str, minute: u32, team: &str, opponent: &str) -> String {
    let mut out = String::with_capacity(template.len() + 16);
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let tail = &rest[open..];
        if let Some(after) = tail.strip_prefix("{minute}") {
            out.push_str(&minute.to_string());
            rest = after;
        } else if let Some(after) = tail.strip_prefix("{team}") {
            out.push_str(team);
            rest = after;
        } else if let Some(after) = tail.strip_prefix("{opponent}") {
            out.push_str(opponent);
            rest = after;
        } else {
            out.push('{');
            rest = &tail[1..];
        }
    }
    out.push_str(rest);
    out
}
