//! match_cli
//!
//! Runs single matches or seed batches from the command line and dumps the report schema.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use match_core::commentary::{TemplateLibrary, TemplateRepository};
use match_core::data::presets;
use match_core::{BatchSummary, EngineConfig, MatchEngine, MatchReport, Team, DEFAULT_MINUTES};

#[derive(Parser)]
#[command(name = "match_cli")]
#[command(about = "Deterministic football match simulator", long_about = None)]
struct Cli {
    /// Log engine progress (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args)]
struct MatchArgs {
    /// Home team: preset name or path to a team JSON file
    #[arg(long, default_value = "red_433_attacking")]
    home: String,

    /// Away team: preset name or path to a team JSON file
    #[arg(long, default_value = "blue_4141_balanced")]
    away: String,

    /// Match length in minutes
    #[arg(long, default_value_t = DEFAULT_MINUTES)]
    minutes: u32,

    /// Engine preset (realistic, arcade, strict_referee)
    #[arg(long, conflicts_with = "config")]
    preset: Option<String>,

    /// Engine config file (.yaml or .json)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Commentary directory laid out as <locale>/<tone>.json
    #[arg(long)]
    templates: Option<PathBuf>,

    /// Commentary locale
    #[arg(long)]
    locale: Option<String>,

    /// Commentary tone
    #[arg(long)]
    tone: Option<String>,

    /// Skip commentary entirely
    #[arg(long, default_value = "false")]
    no_commentary: bool,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    /// Scoreline, goals, stats and narrated key events
    Summary,
    /// Full report as compact JSON
    Json,
    /// Full report as indented JSON
    Pretty,
    /// Event timeline, one JSON object per line
    Ndjson,
    /// SHA-256 of the event timeline
    Digest,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate one match and print the report
    Simulate {
        #[command(flatten)]
        args: MatchArgs,

        /// Master seed
        #[arg(long, default_value_t = 42, allow_negative_numbers = true)]
        seed: i32,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Summary)]
        format: OutputFormat,

        /// Write output to a file instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Simulate consecutive seeds in parallel and print a summary
    Batch {
        #[command(flatten)]
        args: MatchArgs,

        /// First seed
        #[arg(long = "from", default_value_t = 1, allow_negative_numbers = true)]
        start_seed: i32,

        /// Number of matches
        #[arg(long, default_value_t = 100)]
        count: u32,

        /// Also write every report as one JSON line to this file
        #[arg(long)]
        reports: Option<PathBuf>,
    },

    /// Print the JSON Schema of the match report
    Schema {
        /// Write to a file instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// List the built-in team presets
    Presets,

    /// Print the effective engine configuration as YAML
    Config {
        /// Engine preset (realistic, arcade, strict_referee)
        #[arg(long, default_value = "realistic")]
        preset: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Simulate { args, seed, format, out } => {
            let (home, away) = load_teams(&args)?;
            let config = load_config(&args)?;
            let owned_templates = load_templates(&args)?;
            let templates = templates_ref(&owned_templates);

            let engine = MatchEngine::try_new(&home, &away)
                .context("team validation failed")?
                .try_with_config(config)
                .context("engine config rejected")?
                .with_templates(templates);
            let report = engine.simulate(seed, args.minutes);

            let text = match format {
                OutputFormat::Summary => render_summary(&report),
                OutputFormat::Json => report.to_json()?,
                OutputFormat::Pretty => report.to_json_pretty()?,
                OutputFormat::Ndjson => report.events_ndjson.clone(),
                OutputFormat::Digest => format!("{}\n", report.digest()),
            };
            emit(&text, out.as_deref())?;
        }

        Commands::Batch { args, start_seed, count, reports } => {
            let (home, away) = load_teams(&args)?;
            let config = load_config(&args)?;
            let owned_templates = load_templates(&args)?;
            let templates = templates_ref(&owned_templates);

            let seeds: Vec<i32> = (0..count as i64)
                .map(|i| (start_seed as i64 + i) as i32)
                .collect();
            let engine = MatchEngine::try_new(&home, &away)
                .context("team validation failed")?
                .try_with_config(config)
                .context("engine config rejected")?
                .with_templates(templates);
            let results = engine.simulate_batch(&seeds, args.minutes);

            if let Some(path) = reports {
                write_reports(&path, &results)?;
            }
            let summary = BatchSummary::from_reports(&results);
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }

        Commands::Schema { out } => {
            let schema = serde_json::to_string_pretty(&MatchReport::json_schema())?;
            emit(&schema, out.as_deref())?;
        }

        Commands::Presets => {
            for (key, team) in presets::PRESET_NAMES.iter().zip(presets::all()) {
                println!(
                    "{:<20} {:<12} {:<6} overall {:.1}",
                    key,
                    team.name,
                    team.formation,
                    team.average_overall()
                );
            }
        }

        Commands::Config { preset } => {
            let config = EngineConfig::preset(&preset)?;
            print!("{}", config.to_yaml_string()?);
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));
    tracing_subscriber::fmt().with_writer(std::io::stderr).with_env_filter(filter).init();
}

/// A spec that names an existing file is read as team JSON; anything else is a preset name.
fn load_team(spec: &str) -> Result<Team> {
    let path = Path::new(spec);
    if path.is_file() {
        let text =
            std::fs::read_to_string(path).with_context(|| format!("reading team file {}", path.display()))?;
        let team: Team =
            serde_json::from_str(&text).with_context(|| format!("parsing team file {}", path.display()))?;
        tracing::debug!("Loaded team '{}' from {}", team.name, path.display());
        Ok(team)
    } else {
        presets::by_name(spec).with_context(|| format!("'{}' is neither a file nor a preset", spec))
    }
}

fn load_teams(args: &MatchArgs) -> Result<(Team, Team)> {
    Ok((load_team(&args.home)?, load_team(&args.away)?))
}

fn load_config(args: &MatchArgs) -> Result<EngineConfig> {
    let mut config = match (&args.config, &args.preset) {
        (Some(path), _) => EngineConfig::load(path)
            .with_context(|| format!("loading engine config {}", path.display()))?,
        (None, Some(name)) => EngineConfig::preset(name)?,
        (None, None) => EngineConfig::default(),
    };
    if let Some(locale) = &args.locale {
        config.commentary.locale = locale.clone();
    }
    if let Some(tone) = &args.tone {
        config.commentary.tone = tone.clone();
    }
    if args.no_commentary {
        config.commentary.enabled = false;
    }
    Ok(config)
}

fn load_templates(args: &MatchArgs) -> Result<Option<TemplateLibrary>> {
    args.templates
        .as_ref()
        .map(|dir| {
            TemplateLibrary::from_dir(dir).with_context(|| format!("loading templates from {}", dir.display()))
        })
        .transpose()
}

fn templates_ref(owned: &Option<TemplateLibrary>) -> &dyn TemplateRepository {
    match owned {
        Some(lib) => lib,
        None => TemplateLibrary::embedded(),
    }
}

fn emit(text: &str, out: Option<&Path>) -> Result<()> {
    match out {
        Some(path) => {
            std::fs::write(path, text).with_context(|| format!("writing {}", path.display()))?;
            eprintln!("Wrote {}", path.display());
        }
        None => {
            print!("{}", text);
            if !text.ends_with('\n') {
                println!();
            }
        }
    }
    Ok(())
}

fn render_summary(report: &MatchReport) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{} {} - {} {}   (seed {}, {}')\n",
        report.team_a, report.score_a, report.score_b, report.team_b, report.seed, report.minutes
    ));
    for goal in &report.goals {
        out.push_str(&format!("  {:>3}' {} ({})\n", goal.minute, goal.scorer, goal.team));
    }

    let (a, b) = (&report.stats.team_a, &report.stats.team_b);
    out.push('\n');
    let rows: [(&str, String, String); 9] = [
        ("Possession", format!("{:.1}%", a.possession), format!("{:.1}%", b.possession)),
        ("Shots", a.shots.to_string(), b.shots.to_string()),
        ("On target", a.shots_on_target.to_string(), b.shots_on_target.to_string()),
        ("xG", format!("{:.2}", a.xg), format!("{:.2}", b.xg)),
        ("Saves", a.saves.to_string(), b.saves.to_string()),
        ("Corners", a.corners.to_string(), b.corners.to_string()),
        ("Fouls", a.fouls.to_string(), b.fouls.to_string()),
        ("Cards (Y/R)", format!("{}/{}", a.yellow_cards, a.red_cards), format!("{}/{}", b.yellow_cards, b.red_cards)),
        ("Duels won", format!("{}/{}", a.duels_won, a.duels_total), format!("{}/{}", b.duels_won, b.duels_total)),
    ];
    for (label, left, right) in rows {
        out.push_str(&format!("  {:<12} {:>8} {:>8}\n", label, left, right));
    }

    out.push('\n');
    for ev in &report.events {
        match &ev.description {
            Some(text) => out.push_str(&format!("  {}\n", text)),
            None => out.push_str(&format!("  {:>3}' {} ({})\n", ev.minute, ev.kind, ev.team)),
        }
    }
    out
}

fn write_reports(path: &Path, reports: &[MatchReport]) -> Result<()> {
    let mut lines = String::new();
    for report in reports {
        lines.push_str(&report.to_json()?);
        lines.push('\n');
    }
    std::fs::write(path, lines).with_context(|| format!("writing {}", path.display()))?;
    eprintln!("Wrote {} reports to {}", reports.len(), path.display());
    Ok(())
}
