//! Final match report and its line-delimited event form.

use schemars::schema::RootSchema;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::events::{EventKind, GoalRecord, MatchEvent};
use super::stats::{MatchStats, Side};
use crate::error::Result;

/// Immutable result of one simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct MatchReport {
    pub schema_version: u32,
    pub seed: i32,
    pub minutes: u32,
    pub team_a: String,
    pub team_b: String,
    pub score_a: u32,
    pub score_b: u32,
    pub stats: MatchStats,
    pub goals: Vec<GoalRecord>,
    /// Key events only, in timeline order.
    pub events: Vec<MatchEvent>,
    /// Every event, in timeline order.
    pub events_full: Vec<MatchEvent>,
    /// `events_full` as one `{minute, type, team}` JSON object per line.
    pub events_ndjson: String,
}

impl MatchReport {
    pub fn team_name(&self, side: Side) -> &str {
        match side {
            Side::A => &self.team_a,
            Side::B => &self.team_b,
        }
    }

    /// `Some(side)` for a winner, `None` for a draw.
    pub fn winner(&self) -> Option<Side> {
        match self.score_a.cmp(&self.score_b) {
            std::cmp::Ordering::Greater => Some(Side::A),
            std::cmp::Ordering::Less => Some(Side::B),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// SHA-256 hex digest of the line-delimited event form.
    pub fn digest(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.events_ndjson.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn json_schema() -> RootSchema {
        schemars::schema_for!(MatchReport)
    }
}

#[derive(Serialize)]
struct EventLine<'a> {
    minute: u32,
    #[serde(rename = "type")]
    kind: EventKind,
    team: &'a str,
}

/// One line per event, `\n`-terminated. Descriptions are left out.
pub fn write_ndjson(events: &[MatchEvent]) -> String {
    let mut out = String::with_capacity(events.len() * 48);
    for ev in events {
        let line = EventLine { minute: ev.minute, kind: ev.kind, team: &ev.team };
        // derived impls over plain fields never fail
        out.push_str(&serde_json::to_string(&line).unwrap_or_default());
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_events() -> Vec<MatchEvent> {
        vec![
            MatchEvent::new(0, EventKind::Kickoff, "Red FC"),
            MatchEvent::new(1, EventKind::BuildUp, "Blue \"United\"")
                .with_description("dropped from the line form"),
            MatchEvent::new(90, EventKind::FinalWhistle, "referee"),
        ]
    }

    #[test]
    fn test_ndjson_lines() {
        let ndjson = write_ndjson(&sample_events());
        insta::assert_snapshot!(ndjson.trim_end(), @r###"
        {"minute":0,"type":"Kickoff","team":"Red FC"}
        {"minute":1,"type":"BuildUp","team":"Blue \"United\""}
        {"minute":90,"type":"FinalWhistle","team":"referee"}
        "###);
    }

    #[test]
    fn test_ndjson_lines_parse_back() {
        let ndjson = write_ndjson(&sample_events());
        for (line, ev) in ndjson.lines().zip(sample_events()) {
            let parsed: MatchEvent = serde_json::from_str(line).unwrap();
            assert_eq!(parsed.kind, ev.kind);
            assert_eq!(parsed.team, ev.team);
            assert!(parsed.description.is_none());
        }
        assert!(write_ndjson(&[]).is_empty());
    }

    #[test]
    fn test_ndjson_escapes_awkward_team_names() {
        let team = "Tab\tRovers \\ \u{1}Ünited\n";
        let ndjson = write_ndjson(&[MatchEvent::new(7, EventKind::Goal, team)]);
        assert_eq!(ndjson.lines().count(), 1);
        let parsed: MatchEvent = serde_json::from_str(ndjson.trim_end()).unwrap();
        assert_eq!(parsed.minute, 7);
        assert_eq!(parsed.kind, EventKind::Goal);
        assert_eq!(parsed.team, team);
    }

    #[test]
    fn test_digest_is_sha256_hex() {
        let report = MatchReport {
            schema_version: 1,
            seed: 0,
            minutes: 90,
            team_a: "A".into(),
            team_b: "B".into(),
            score_a: 0,
            score_b: 0,
            stats: MatchStats::default(),
            goals: vec![],
            events: vec![],
            events_full: vec![],
            events_ndjson: String::new(),
        };
        assert_eq!(
            report.digest(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        assert_eq!(report.winner(), None);
    }
}
