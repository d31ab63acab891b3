//! Support value scoring configuration

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::training::BarColor;

/// SV 점수 파라미터
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Validate)]
#[serde(default)]
pub struct ScoringConfig {
    // === Risk ===
    /// Base failure ceiling in percent (MAX_FAILURE, 기본: 20)
    #[validate(range(min = 0, max = 100))]
    pub max_failure: i32,
    /// Scales hint bonuses up (HINT_IS_IMPORTANT)
    pub hint_is_important: bool,
    /// Step function over sv_total, first match wins
    pub risk_steps: Vec<RiskStep>,

    // === Card values ===
    #[validate(range(min = 0.0))]
    pub reporter_value: f64,
    #[validate(range(min = 0.0))]
    pub rainbow_value: f64,
    #[validate(range(min = 0.0))]
    pub blue_green_value: f64,
    #[validate(range(min = 0.0))]
    pub orange_max_value: f64,
    pub director: DirectorScores,

    // === Tile-capped bonuses ===
    #[validate(range(min = 0.0))]
    pub hint_blue_green: f64,
    #[validate(range(min = 0.0))]
    pub hint_orange_max: f64,
    /// Hint bonus when hints are important, before the multiplier
    #[validate(range(min = 0.0))]
    pub hint_important_base: f64,
    #[validate(range(min = 0.0))]
    pub hint_important_multiplier: f64,
    #[validate(range(min = 1))]
    pub rainbow_combo_min: usize,
    #[validate(range(min = 0.0))]
    pub rainbow_combo_bonus: f64,

    /// greedy_hit threshold (기본: 2.5)
    #[validate(range(min = 0.0))]
    pub greedy_sv: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            max_failure: 20,
            hint_is_important: false,
            risk_steps: RiskStep::defaults(),

            reporter_value: 0.1,
            rainbow_value: 1.0,
            blue_green_value: 1.0,
            orange_max_value: 0.0,
            director: DirectorScores::default(),

            hint_blue_green: 0.75,
            hint_orange_max: 0.5,
            hint_important_base: 0.75,
            hint_important_multiplier: 3.0,
            rainbow_combo_min: 2,
            rainbow_combo_bonus: 0.5,

            greedy_sv: 2.5,
        }
    }
}

impl ScoringConfig {
    /// Blue/green hint bonus for the current importance setting.
    pub fn blue_green_hint_bonus(&self) -> f64 {
        if self.hint_is_important {
            self.hint_blue_green * self.hint_important_multiplier
        } else {
            self.hint_blue_green
        }
    }

    /// Orange/max hint bonus. Importance replaces the base with the shared
    /// important base, so it can exceed the blue/green bonus.
    pub fn orange_max_hint_bonus(&self) -> f64 {
        if self.hint_is_important {
            self.hint_important_base * self.hint_important_multiplier
        } else {
            self.hint_orange_max
        }
    }
}

/// One step of the risk multiplier function.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RiskStep {
    pub min_sv: f64,
    /// `>=` when true, `>` otherwise
    pub inclusive: bool,
    pub multiplier: f64,
}

impl RiskStep {
    pub fn defaults() -> Vec<RiskStep> {
        vec![
            RiskStep { min_sv: 4.0, inclusive: true, multiplier: 2.0 },
            RiskStep { min_sv: 3.0, inclusive: false, multiplier: 1.5 },
            RiskStep { min_sv: 2.5, inclusive: true, multiplier: 1.25 },
        ]
    }

    pub fn matches(&self, sv: f64) -> bool {
        if self.inclusive {
            sv >= self.min_sv
        } else {
            sv > self.min_sv
        }
    }
}

/// Director card value by bar color.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct DirectorScores {
    pub blue: f64,
    pub green: f64,
    pub orange: f64,
    pub yellow: f64,
    pub max: f64,
}

impl Default for DirectorScores {
    fn default() -> Self {
        Self { blue: 0.25, green: 0.15, orange: 0.10, yellow: 0.0, max: 0.0 }
    }
}

impl DirectorScores {
    /// `None` for an unresolved color.
    pub fn for_card(&self, color: BarColor, is_max: bool) -> Option<f64> {
        if is_max {
            return Some(self.max);
        }
        match color {
            BarColor::Blue => Some(self.blue),
            BarColor::Green => Some(self.green),
            BarColor::Orange => Some(self.orange),
            BarColor::Yellow => Some(self.yellow),
            BarColor::Unknown => None,
        }
    }
}
