//! # Bot Configuration
//!
//! 모든 튜닝 값을 한 곳에서 관리하는 설정 시스템.
//! Scorer and policy receive this as an immutable value; nothing reads
//! process-wide settings during a decision.
//!
//! ## 사용법
//! ```rust
//! use umabot_core::config::BotConfig;
//!
//! let config = BotConfig::default();
//! let hints = BotConfig::hint_hunter();
//! assert!(hints.scoring.hint_is_important);
//! ```
//!
//! ## Environment Variables
//!
//! - `UMABOT_PROFILE`: preset name (default, hint_hunter, conservative, aggressive)

mod career_config;
mod policy_config;
mod scoring_config;

pub use career_config::{CareerSettings, TOP_STATS_FOCUS_RANGE, UNDERTRAIN_THRESHOLD_RANGE};
pub use policy_config::PolicyConfig;
pub use scoring_config::{DirectorScores, RiskStep, ScoringConfig};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;
use validator::Validate;

use crate::error::{CoreError, Result};
use crate::training::{Mood, TileLayout};

pub const PROFILE_ENV: &str = "UMABOT_PROFILE";
pub const PRESET_NAMES: [&str; 4] = ["default", "hint_hunter", "conservative", "aggressive"];

/// Scorer + policy + career goals
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Default)]
#[serde(default)]
pub struct BotConfig {
    /// tile_idx -> stat
    pub layout: TileLayout,
    pub scoring: ScoringConfig,
    pub policy: PolicyConfig,
    pub career: CareerSettings,
}

impl BotConfig {
    /// 힌트 수집 우선
    pub fn hint_hunter() -> Self {
        let mut cfg = Self::default();
        cfg.scoring.hint_is_important = true;
        cfg
    }

    /// Lower failure ceiling, rests earlier
    pub fn conservative() -> Self {
        let mut cfg = Self::default();
        cfg.scoring.max_failure = 15;
        cfg.policy.low_energy_rest = 45;
        cfg.policy.terminal_rest_energy = 75;
        cfg.policy.race_min_energy = 60;
        cfg.career.minimal_mood = Mood::Good;
        cfg
    }

    /// Higher failure ceiling, races when training is poor
    pub fn aggressive() -> Self {
        let mut cfg = Self::default();
        cfg.scoring.max_failure = 25;
        cfg.policy.low_energy_rest = 30;
        cfg.policy.terminal_rest_energy = 60;
        cfg.career.race_if_no_good_value = true;
        cfg
    }

    pub fn preset(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "default" | "" => Some(Self::default()),
            "hint_hunter" | "hints" => Some(Self::hint_hunter()),
            "conservative" | "safe" => Some(Self::conservative()),
            "aggressive" => Some(Self::aggressive()),
            _ => None,
        }
    }

    /// Load preset from `UMABOT_PROFILE` or use default
    pub fn from_env_or_default() -> Self {
        let name = env::var(PROFILE_ENV).unwrap_or_default();
        Self::preset(&name).unwrap_or_else(|| {
            log::warn!("Unknown {} '{}', using default profile", PROFILE_ENV, name);
            Self::default()
        })
    }

    pub fn from_json_str(s: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(s)?;
        cfg.validated()
    }

    pub fn from_yaml_str(s: &str) -> Result<Self> {
        let cfg: Self = serde_yaml::from_str(s)?;
        cfg.validated()
    }

    /// Load `.json`, `.yaml` or `.yml`.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();
        let text = std::fs::read_to_string(path)?;
        log::debug!("Loaded {} bytes of config from {:?}", text.len(), path);
        match ext.as_str() {
            "json" => Self::from_json_str(&text),
            "yaml" | "yml" => Self::from_yaml_str(&text),
            _ => Err(CoreError::UnsupportedFormat { path: path.display().to_string() }),
        }
    }

    /// Clamp soft knobs, reject values that cannot be clamped meaningfully.
    pub fn validated(mut self) -> Result<Self> {
        for field in self.career.clamp_knobs() {
            log::warn!("career.{} out of range, clamped", field);
        }
        if self.career.dedup_priorities() {
            log::warn!("career.priority_stats had duplicates, kept first occurrences");
        }

        self.scoring.validate()?;
        self.policy.validate()?;

        if self.layout.is_empty() {
            return Err(CoreError::InvalidConfig("layout must map at least one tile".into()));
        }
        if (self.scoring.greedy_sv - self.policy.greedy_sv).abs() > 1e-9 {
            return Err(CoreError::InvalidConfig(format!(
                "scoring.greedy_sv ({}) and policy.greedy_sv ({}) must match",
                self.scoring.greedy_sv, self.policy.greedy_sv
            )));
        }
        if let Some(step) = self.scoring.risk_steps.iter().find(|s| s.multiplier <= 0.0) {
            return Err(CoreError::InvalidConfig(format!(
                "risk step at sv {} has non-positive multiplier {}",
                step.min_sv, step.multiplier
            )));
        }
        Ok(self)
    }
}

// ========== Tests ==========
