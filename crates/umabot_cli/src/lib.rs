//! Scan replay helpers
//!
//! 기록된 스캔 파일 (JSON/YAML) → 엔진 입력, 결과 → 터미널 출력.
//! The binary stays a thin clap layer over these functions.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::path::Path;

use umabot_core::config::PRESET_NAMES;
use umabot_core::{BotConfig, Decision, TileScore, TrainingEngine, TrainingTile, TurnObservation};

/// One recorded turn: what the scanner read off the training screen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanRecord {
    pub tiles: Vec<TrainingTile>,
    #[serde(default)]
    pub observation: TurnObservation,
}

/// Load a scan from `.json`, `.yaml` or `.yml`.
pub fn load_scan(path: &Path) -> Result<ScanRecord> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read scan {}", path.display()))?;
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or_default();
    let scan: ScanRecord = match ext.to_ascii_lowercase().as_str() {
        "json" => serde_json::from_str(&text)
            .with_context(|| format!("Invalid scan JSON in {}", path.display()))?,
        "yaml" | "yml" => serde_yaml::from_str(&text)
            .with_context(|| format!("Invalid scan YAML in {}", path.display()))?,
        other => bail!("Unsupported scan format '{}' ({})", other, path.display()),
    };
    if scan.tiles.is_empty() {
        bail!("Scan {} has no tiles", path.display());
    }
    log::debug!("Loaded scan with {} tiles from {}", scan.tiles.len(), path.display());
    Ok(scan)
}

/// Engine from a config file, a preset name, or `UMABOT_PROFILE`, in that order.
pub fn load_engine(config: Option<&Path>, profile: Option<&str>) -> Result<TrainingEngine> {
    if let Some(path) = config {
        let cfg = BotConfig::from_path(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?;
        return Ok(TrainingEngine::new(cfg)?);
    }
    if let Some(name) = profile {
        let Some(cfg) = BotConfig::preset(name) else {
            bail!("Unknown profile '{}' (known: {})", name, PRESET_NAMES.join(", "));
        };
        return Ok(TrainingEngine::new(cfg)?);
    }
    Ok(TrainingEngine::from_env())
}

/// Fixed-width score table, one row per tile.
pub fn render_scores(scores: &[TileScore]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<4} {:<5} {:>6} {:>6} {:>6} {:<8} flags",
        "tile", "stat", "sv", "fail", "limit", "risk"
    );
    for s in scores {
        let stat = s.stat.map(|st| st.to_string()).unwrap_or_else(|| "-".to_string());
        let mut flags = Vec::new();
        if s.greedy_hit {
            flags.push("greedy".to_string());
        }
        if s.has_hint {
            flags.push("hint".to_string());
        }
        if s.rainbow_count > 0 {
            flags.push(format!("rainbow x{}", s.rainbow_count));
        }
        if let Some(color) = s.director_color {
            let max = if s.director_is_max { " max" } else { "" };
            flags.push(format!("director {color}{max}"));
        }
        let _ = writeln!(
            out,
            "{:<4} {:<5} {:>6.2} {:>5}% {:>5}% {:<8} {}",
            s.tile_idx,
            stat,
            s.sv_total,
            s.failure_pct,
            s.risk_limit_pct,
            if s.allowed_by_risk { "ok" } else { "blocked" },
            flags.join(", ")
        );
    }
    out
}

/// Per-tile scorer notes.
pub fn render_score_notes(scores: &[TileScore]) -> String {
    let mut out = String::new();
    for s in scores {
        let _ = writeln!(out, "{}", s.label());
        for note in &s.notes {
            let _ = writeln!(out, "  - {note}");
        }
    }
    out
}

/// Decision headline followed by the rule trace.
pub fn render_decision(decision: &Decision) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{decision}");
    for note in &decision.notes {
        let _ = writeln!(out, "  {note}");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;
    use umabot_core::{Action, RuleId};

    const SCAN_JSON: &str = r#"{
        "tiles": [
            {"tile_idx": 0, "failure_pct": 8, "supports": [{"bar_color": "blue"}, {"bar_color": "blue", "has_hint": true}, {"bar_color": "green"}]},
            {"tile_idx": 1, "failure_pct": 4},
            {"tile_idx": 2, "failure_pct": 4},
            {"tile_idx": 3, "failure_pct": 4},
            {"tile_idx": 4, "failure_pct": 0}
        ],
        "observation": {"mood": "GOOD", "career_date": {"year_code": 2, "month": 3, "half": 1}, "energy_pct": 70}
    }"#;

    fn write_temp(suffix: &str, body: &str) -> tempfile::NamedTempFile {
        let mut file = Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(body.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_scan_json_and_decide() {
        let file = write_temp(".json", SCAN_JSON);
        let scan = load_scan(file.path()).unwrap();
        assert_eq!(scan.tiles.len(), 5);

        let engine = load_engine(None, Some("default")).unwrap();
        let report = engine.evaluate(&scan.tiles, scan.observation);
        assert_eq!(report.decision.action, Action::Train(0));
        assert_eq!(report.decision.rule, RuleId::Greedy);
    }

    #[test]
    fn test_load_scan_yaml() {
        let yaml = "tiles:\n  - tile_idx: 0\n    failure_pct: 10\n  - tile_idx: 4\n    failure_pct: 0\n    supports:\n      - bar_color: green\n";
        let file = write_temp(".yaml", yaml);
        let scan = load_scan(file.path()).unwrap();
        assert_eq!(scan.tiles[1].supports.len(), 1);
    }

    #[test]
    fn test_load_scan_rejects_unknown_extension() {
        let file = write_temp(".txt", SCAN_JSON);
        let err = load_scan(file.path()).unwrap_err();
        assert!(err.to_string().contains("Unsupported scan format"));
    }

    #[test]
    fn test_load_engine_from_config_file() {
        let file = write_temp(".yaml", "scoring:\n  max_failure: 15\n");
        let engine = load_engine(Some(file.path()), None).unwrap();
        assert_eq!(engine.config().scoring.max_failure, 15);
    }

    #[test]
    fn test_load_engine_unknown_profile() {
        assert!(load_engine(None, Some("turbo")).is_err());
    }

    #[test]
    fn test_render_outputs() {
        let file = write_temp(".json", SCAN_JSON);
        let scan = load_scan(file.path()).unwrap();
        let report = TrainingEngine::default().evaluate(&scan.tiles, scan.observation);

        let table = render_scores(&report.scores);
        assert_eq!(table.lines().count(), 6);
        assert!(table.contains("greedy"));

        let notes = render_score_notes(&report.scores);
        assert!(notes.contains("hint on blue/green support (tile-capped): +0.75"));

        let decision = render_decision(&report.decision);
        assert!(decision.starts_with("TRAIN(0) via greedy"));
    }
}
