//! Commentary behaviour over complete simulated matches.

use std::collections::HashMap;

use crate::commentary::{KindPolicy, TemplateLibrary};
use crate::data::presets;
use crate::engine::{EngineConfig, MatchEngine};
use crate::models::{EventKind, MatchReport};

/// Placeholder-free pack: a description is exactly the chosen template.
fn plain_library(per_kind: usize) -> TemplateLibrary {
    let mut lib = TemplateLibrary::new();
    for kind in EventKind::ALL {
        let lines: Vec<String> = (0..per_kind).map(|i| format!("{} line {}", kind, i)).collect();
        lib.insert("en", "neutral", kind, lines);
    }
    lib
}

fn run(lib: &TemplateLibrary, config: EngineConfig, seed: i32) -> MatchReport {
    let a = presets::red_433_attacking();
    let b = presets::blue_4141_balanced();
    MatchEngine::new(&a, &b).with_config(config).with_templates(lib).simulate(seed, 90)
}

#[test]
fn test_key_descriptions_never_repeat_within_window() {
    let lib = plain_library(8);
    let config = EngineConfig::default();
    let window = config.commentary.cooldown_size;

    for seed in [1, 42, 777, -3, 31337] {
        let report = run(&lib, config.clone(), seed);
        let lines: Vec<&str> = report.events.iter().filter_map(|e| e.description.as_deref()).collect();
        assert!(lines.len() >= 3, "seed {}: key events should all be narrated", seed);

        for (i, line) in lines.iter().enumerate() {
            let start = i.saturating_sub(window);
            assert!(
                !lines[start..i].contains(line),
                "seed {}: '{}' repeated within {} key lines",
                seed,
                line,
                window
            );
        }
    }
}

#[test]
fn test_every_key_event_is_narrated_by_default() {
    let lib = plain_library(8);
    let report = run(&lib, EngineConfig::default(), 2024);
    assert!(report.events.iter().all(|e| e.description.is_some()));
}

#[test]
fn test_micro_lines_respect_minute_cap() {
    let lib = plain_library(8);
    let mut config = EngineConfig::default();
    for kind in EventKind::ALL.iter().filter(|k| k.is_micro()) {
        config.commentary.overrides.insert(*kind, KindPolicy::ALWAYS);
    }
    config.commentary.global_cooldown_events = 0;
    config.commentary.max_per_minute = 1;

    let report = run(&lib, config, 5);
    let mut per_minute: HashMap<u32, u32> = HashMap::new();
    for e in report.events_full.iter().filter(|e| e.kind.is_micro() && e.description.is_some()) {
        *per_minute.entry(e.minute).or_default() += 1;
    }
    assert!(!per_minute.is_empty());
    assert!(per_minute.values().all(|&n| n == 1));
}

#[test]
fn test_micro_lines_respect_global_cooldown() {
    let lib = plain_library(8);
    let mut config = EngineConfig::default();
    for kind in EventKind::ALL.iter().filter(|k| k.is_micro()) {
        config.commentary.overrides.insert(*kind, KindPolicy::ALWAYS);
    }
    config.commentary.global_cooldown_events = 4;
    config.commentary.max_per_minute = 10;

    let report = run(&lib, config, 11);
    let narrated: Vec<usize> = report
        .events_full
        .iter()
        .enumerate()
        .filter(|(_, e)| e.kind.is_micro() && e.description.is_some())
        .map(|(i, _)| i)
        .collect();
    assert!(narrated.len() > 1);
    assert!(narrated.windows(2).all(|w| w[1] - w[0] >= 4));
}

#[test]
fn test_zero_rate_override_silences_kind() {
    let lib = plain_library(8);
    let mut config = EngineConfig::default();
    config.commentary.overrides.insert(EventKind::Kickoff, KindPolicy::new(0.0, 0));

    let report = run(&lib, config, 42);
    let kickoff = report.events.iter().find(|e| e.kind == EventKind::Kickoff).unwrap();
    assert!(kickoff.description.is_none());
}

#[test]
fn test_disabled_commentary_leaves_descriptions_empty() {
    let lib = plain_library(8);
    let mut config = EngineConfig::default();
    config.commentary.enabled = false;

    let silent = run(&lib, config, 42);
    let narrated = run(&lib, EngineConfig::default(), 42);
    assert!(silent.events_full.iter().all(|e| e.description.is_none()));
    assert_eq!(silent.events_ndjson, narrated.events_ndjson);
    assert_eq!(silent.stats, narrated.stats);
    assert_eq!(silent.goals, narrated.goals);
}

#[test]
fn test_tone_changes_text_not_match() {
    let mut config = EngineConfig::default();
    config.commentary.tone = "fun".into();
    let lib = TemplateLibrary::embedded();

    let fun = run(lib, config, 8);
    let neutral = run(lib, EngineConfig::default(), 8);
    assert_eq!(fun.events_ndjson, neutral.events_ndjson);
    // tones missing a kind fall back to neutral, so every key event still gets a line
    assert!(fun.events.iter().all(|e| e.description.is_some()));
}
