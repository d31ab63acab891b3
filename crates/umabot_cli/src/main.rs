//! umabot CLI
//!
//! 기록된 스캔 → 점수표 + 결정
//! Config / preset / JSON schema 출력

#[cfg(feature = "cli")]
use anyhow::{Context, Result};
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "umabot")]
#[command(about = "Replay recorded training scans through the decision engine", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Score a scan and print the decision with its rule trace
    Decide {
        /// Recorded scan (.json / .yaml)
        #[arg(long)]
        scan: PathBuf,

        /// Bot config file (.json / .yaml); overrides --profile
        #[arg(long)]
        config: Option<PathBuf>,

        /// Preset name (default, hint_hunter, conservative, aggressive)
        #[arg(long)]
        profile: Option<String>,

        /// Print the full report as JSON
        #[arg(long, default_value = "false")]
        json: bool,
    },

    /// Score a scan without deciding
    Score {
        /// Recorded scan (.json / .yaml)
        #[arg(long)]
        scan: PathBuf,

        /// Bot config file (.json / .yaml); overrides --profile
        #[arg(long)]
        config: Option<PathBuf>,

        /// Preset name
        #[arg(long)]
        profile: Option<String>,

        /// Include per-card scorer notes
        #[arg(long, default_value = "false")]
        notes: bool,
    },

    /// Print a preset as YAML
    Profile {
        #[arg(long, default_value = "default")]
        name: String,
    },

    /// Print the JSON schema of a turn request
    Schema,
}

#[cfg(feature = "cli")]
fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Decide { scan, config, profile, json } => {
            let record = umabot_cli::load_scan(&scan)?;
            let engine = umabot_cli::load_engine(config.as_deref(), profile.as_deref())?;
            let report = engine.evaluate(&record.tiles, record.observation);

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", umabot_cli::render_scores(&report.scores));
                println!();
                print!("{}", umabot_cli::render_decision(&report.decision));
            }
        }

        Commands::Score { scan, config, profile, notes } => {
            let record = umabot_cli::load_scan(&scan)?;
            let engine = umabot_cli::load_engine(config.as_deref(), profile.as_deref())?;
            let scores = engine.score(&record.tiles);

            print!("{}", umabot_cli::render_scores(&scores));
            if notes {
                println!();
                print!("{}", umabot_cli::render_score_notes(&scores));
            }
        }

        Commands::Profile { name } => {
            let engine = umabot_cli::load_engine(None, Some(&name))?;
            let yaml = serde_yaml::to_string(engine.config())
                .with_context(|| format!("Failed to serialize profile '{}'", name))?;
            print!("{}", yaml);
        }

        Commands::Schema => {
            let schema = umabot_core::request_schema();
            println!("{}", serde_json::to_string_pretty(&schema)?);
        }
    }

    Ok(())
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("umabot CLI is not available. Enable the 'cli' feature to use it.");
    std::process::exit(1);
}
