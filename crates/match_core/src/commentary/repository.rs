//! Commentary template storage.
//!
//! Templates are keyed by `(locale, tone, event kind)`. Each `(locale, tone)` pack can also
//! carry a `"Generic"` pool the composer borrows from when a kind's own pool is too small
//! to honour the cooldown window.
//!
//! On disk a pack is one JSON object per file, `<dir>/<locale>/<tone>.json`:
//!
//! ```json
//! { "Goal": ["{minute}' GOAL for {team}!"], "Generic": ["{team} keep at it."] }
//! ```

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use once_cell::sync::Lazy;

use crate::error::Result;
use crate::models::EventKind;

/// Key of the shared pool inside a pack file.
pub const GENERIC_KEY: &str = "Generic";

// ============================================================================
// Embedded packs
// ============================================================================

pub const EN_NEUTRAL_JSON: &str = include_str!("../../assets/comments/en/neutral.json");
pub const EN_FUN_JSON: &str = include_str!("../../assets/comments/en/fun.json");

static EMBEDDED: Lazy<TemplateLibrary> = Lazy::new(|| {
    let mut lib = TemplateLibrary::new();
    for (tone, json) in [("neutral", EN_NEUTRAL_JSON), ("fun", EN_FUN_JSON)] {
        if let Err(e) = lib.load_json_str("en", tone, json) {
            log::warn!("Embedded commentary pack en/{} is malformed: {}", tone, e);
        }
    }
    lib
});

// ============================================================================
// Repository contract
// ============================================================================

/// Read-only template lookup. Shared between concurrently running matches.
pub trait TemplateRepository: Send + Sync {
    /// Templates for an exact `(locale, tone, kind)`; empty when there are none.
    fn get(&self, locale: &str, tone: &str, kind: EventKind) -> &[String];

    /// Shared pool of the `(locale, tone)` pack.
    fn generic(&self, _locale: &str, _tone: &str) -> &[String] {
        &[]
    }
}

/// Repository with no templates; every lookup is empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTemplates;

impl TemplateRepository for NoTemplates {
    fn get(&self, _locale: &str, _tone: &str, _kind: EventKind) -> &[String] {
        &[]
    }
}

// ============================================================================
// TemplateLibrary
// ============================================================================

#[derive(Debug, Clone, Default)]
struct TonePack {
    by_kind: BTreeMap<EventKind, Vec<String>>,
    generic: Vec<String>,
}

/// In-memory template store, loadable from JSON files or strings.
#[derive(Debug, Clone, Default)]
pub struct TemplateLibrary {
    /// `(locale, tone)` in lowercase.
    packs: HashMap<(String, String), TonePack>,
}

fn pack_key(locale: &str, tone: &str) -> (String, String) {
    (locale.trim().to_lowercase(), tone.trim().to_lowercase())
}

/// Trims, drops blanks and case-insensitive duplicates (already present or repeated).
fn merge_templates<I, S>(pool: &mut Vec<String>, templates: I) -> usize
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let before = pool.len();
    for raw in templates {
        let t = raw.as_ref().trim();
        if t.is_empty() || pool.iter().any(|p| p.eq_ignore_ascii_case(t)) {
            continue;
        }
        pool.push(t.to_string());
    }
    pool.len() - before
}

impl TemplateLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in English pack (`neutral` and `fun` tones), parsed once.
    pub fn embedded() -> &'static TemplateLibrary {
        &EMBEDDED
    }

    /// Adds templates for one kind; returns how many were new.
    pub fn insert<I, S>(&mut self, locale: &str, tone: &str, kind: EventKind, templates: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let pack = self.packs.entry(pack_key(locale, tone)).or_default();
        merge_templates(pack.by_kind.entry(kind).or_default(), templates)
    }

    /// Adds templates to the pack's generic pool; returns how many were new.
    pub fn insert_generic<I, S>(&mut self, locale: &str, tone: &str, templates: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let pack = self.packs.entry(pack_key(locale, tone)).or_default();
        merge_templates(&mut pack.generic, templates)
    }

    /// Merges one pack object. Unknown keys are skipped with a warning.
    /// Returns the number of templates added.
    pub fn load_json_str(&mut self, locale: &str, tone: &str, json: &str) -> Result<usize> {
        let doc: BTreeMap<String, Vec<String>> = serde_json::from_str(json)?;
        let mut added = 0;
        for (key, templates) in doc {
            if key.trim().eq_ignore_ascii_case(GENERIC_KEY) {
                added += self.insert_generic(locale, tone, templates);
            } else if let Some(kind) = EventKind::from_name(&key) {
                added += self.insert(locale, tone, kind, templates);
            } else {
                log::warn!("Skipping unknown commentary key '{}' in {}/{}", key, locale, tone);
            }
        }
        Ok(added)
    }

    /// Loads every `<dir>/<locale>/<tone>.json`. A directory without sub-directories is read
    /// as a single locale named after itself. Unreadable or malformed files are skipped.
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let mut locale_dirs = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            if path.is_dir() {
                locale_dirs.push(path);
            }
        }
        if locale_dirs.is_empty() {
            locale_dirs.push(dir.to_path_buf());
        }
        // Directory iteration order is platform-dependent; pool order must not be.
        locale_dirs.sort();

        let mut lib = TemplateLibrary::new();
        for locale_dir in locale_dirs {
            let Some(locale) = locale_dir.file_name().and_then(|n| n.to_str()).map(str::to_string)
            else {
                continue;
            };

            let mut files: Vec<_> = std::fs::read_dir(&locale_dir)?
                .filter_map(|e| e.ok().map(|e| e.path()))
                .filter(|p| {
                    p.is_file()
                        && p.extension().and_then(|e| e.to_str()).is_some_and(|e| e.eq_ignore_ascii_case("json"))
                })
                .collect();
            files.sort();

            for file in files {
                let Some(tone) = file.file_stem().and_then(|s| s.to_str()) else {
                    continue;
                };
                let loaded = std::fs::read_to_string(&file)
                    .map_err(Into::into)
                    .and_then(|text| lib.load_json_str(&locale, tone, &text));
                match loaded {
                    Ok(n) => log::debug!("Loaded {} templates from {}", n, file.display()),
                    Err(e) => log::warn!("Skipping commentary file {}: {}", file.display(), e),
                }
            }
        }

        log::info!("Loaded {} commentary packs from {}", lib.packs.len(), dir.display());
        Ok(lib)
    }

    pub fn locales(&self) -> Vec<&str> {
        let mut locales: Vec<&str> = self.packs.keys().map(|(l, _)| l.as_str()).collect();
        locales.sort_unstable();
        locales.dedup();
        locales
    }

    pub fn tones(&self, locale: &str) -> Vec<&str> {
        let locale = locale.trim().to_lowercase();
        let mut tones: Vec<&str> =
            self.packs.keys().filter(|(l, _)| *l == locale).map(|(_, t)| t.as_str()).collect();
        tones.sort_unstable();
        tones
    }

    /// Total templates across all packs, generic pools included.
    pub fn len(&self) -> usize {
        self.packs
            .values()
            .map(|p| p.generic.len() + p.by_kind.values().map(Vec::len).sum::<usize>())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn pack(&self, locale: &str, tone: &str) -> Option<&TonePack> {
        self.packs.get(&pack_key(locale, tone))
    }
}

impl TemplateRepository for TemplateLibrary {
    fn get(&self, locale: &str, tone: &str, kind: EventKind) -> &[String] {
        self.pack(locale, tone)
            .and_then(|p| p.by_kind.get(&kind))
            .map_or(&[], Vec::as_slice)
    }

    fn generic(&self, locale: &str, tone: &str) -> &[String] {
        self.pack(locale, tone).map_or(&[], |p| p.generic.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_trims_and_dedupes() {
        let mut lib = TemplateLibrary::new();
        let added = lib.insert("en", "neutral", EventKind::Goal, ["  Goal!  ", "", "goal!", "Score"]);
        assert_eq!(added, 2);
        assert_eq!(lib.get("EN", "Neutral", EventKind::Goal), ["Goal!", "Score"]);
        assert!(lib.get("en", "neutral", EventKind::SaveMade).is_empty());
        assert!(lib.get("pl", "neutral", EventKind::Goal).is_empty());
    }

    #[test]
    fn test_load_json_str_routes_generic_and_skips_unknown() {
        let mut lib = TemplateLibrary::new();
        let json = r#"{"goal": ["In!"], "Generic": ["Play on."], "Throwin": ["ignored"]}"#;
        assert_eq!(lib.load_json_str("en", "fun", json).unwrap(), 2);
        assert_eq!(lib.get("en", "fun", EventKind::Goal), ["In!"]);
        assert_eq!(lib.generic("en", "fun"), ["Play on."]);
        assert!(lib.load_json_str("en", "fun", "[1, 2]").is_err());
    }

    #[test]
    fn test_embedded_pack_covers_key_events() {
        let lib = TemplateLibrary::embedded();
        for kind in EventKind::ALL.iter().filter(|k| k.is_key()) {
            assert!(
                lib.get("en", "neutral", *kind).len() >= 7,
                "neutral pool for {} too small",
                kind
            );
        }
        assert!(!lib.generic("en", "neutral").is_empty());
        assert!(!lib.get("en", "fun", EventKind::Goal).is_empty());
        assert_eq!(lib.locales(), vec!["en"]);
        assert_eq!(lib.tones("en"), vec!["fun", "neutral"]);
    }

    #[test]
    fn test_from_dir_locale_layout() {
        let dir = tempfile::tempdir().unwrap();
        let en = dir.path().join("en");
        let pl = dir.path().join("pl");
        std::fs::create_dir_all(&en).unwrap();
        std::fs::create_dir_all(&pl).unwrap();
        std::fs::write(en.join("neutral.json"), r#"{"Goal": ["Goal by {team}"]}"#).unwrap();
        std::fs::write(en.join("broken.json"), "{not json").unwrap();
        std::fs::write(en.join("notes.txt"), "ignored").unwrap();
        std::fs::write(pl.join("neutral.json"), r#"{"Goal": ["Gol dla {team}"]}"#).unwrap();

        let lib = TemplateLibrary::from_dir(dir.path()).unwrap();
        assert_eq!(lib.get("en", "neutral", EventKind::Goal), ["Goal by {team}"]);
        assert_eq!(lib.get("pl", "neutral", EventKind::Goal), ["Gol dla {team}"]);
        assert!(lib.tones("en").contains(&"neutral"));
        assert!(!lib.tones("en").contains(&"broken"));
    }

    #[test]
    fn test_from_dir_flat_layout_is_single_locale() {
        let dir = tempfile::tempdir().unwrap();
        let flat = dir.path().join("de");
        std::fs::create_dir_all(&flat).unwrap();
        std::fs::write(flat.join("neutral.json"), r#"{"Kickoff": ["Anpfiff!"]}"#).unwrap();

        let lib = TemplateLibrary::from_dir(&flat).unwrap();
        assert_eq!(lib.get("de", "neutral", EventKind::Kickoff), ["Anpfiff!"]);
    }

    #[test]
    fn test_from_dir_missing_is_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(TemplateLibrary::from_dir(dir.path().join("absent")).is_err());
    }

    #[test]
    fn test_no_templates_is_empty() {
        assert!(NoTemplates.get("en", "neutral", EventKind::Goal).is_empty());
        assert!(NoTemplates.generic("en", "neutral").is_empty());
    }
}
