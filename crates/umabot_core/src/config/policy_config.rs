//! Decision policy thresholds
//!
//! Every number the rule cascade compares against lives here so presets can
//! retune the cascade without touching the rules.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::training::CareerDate;

/// 결정 규칙 임계값
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Validate)]
#[serde(default)]
pub struct PolicyConfig {
    // === SV tiers ===
    /// Must equal `scoring.greedy_sv`, checked in `BotConfig::validated`
    #[validate(range(min = 0.0))]
    pub greedy_sv: f64,
    #[validate(range(min = 0.0))]
    pub strong_sv: f64,
    #[validate(range(min = 0.0))]
    pub decent_sv: f64,
    #[validate(range(min = 0.0))]
    pub priority_only_sv: f64,

    // === Priority guard ===
    #[validate(range(min = 1, max = 5))]
    pub priority_guard_top_n: usize,
    /// Top-N tile must be worth at least this much to be substituted in
    #[validate(range(min = 0.0))]
    pub guard_min_top_sv: f64,
    /// Largest SV lead a non-priority tile may have and still be replaced
    #[validate(range(min = 0.0))]
    pub guard_max_margin: f64,
    /// Candidates at or above this bypass the guard
    #[validate(range(min = 0.0))]
    pub exceptional_sv: f64,

    // === Final season ===
    #[validate(range(min = 0))]
    pub final_push_below: i32,
    #[validate(range(min = 0))]
    pub final_soft_cap: i32,

    // === Summer proximity ===
    #[validate(range(min = 0, max = 100))]
    pub summer_rest_energy: i32,
    #[validate(range(min = 0, max = 100))]
    pub summer_wit_energy: i32,
    #[validate(range(min = 0, max = 100))]
    pub pre_summer_energy: i32,
    #[validate(range(min = 0.0))]
    pub pre_summer_wit_sv: f64,
    #[validate(range(min = 1))]
    pub pre_summer_lookahead: i32,

    // === Director ===
    pub director_year: u8,
    /// Inclusive month window that needs a blue director
    pub director_early_months: (u8, u8),
    /// Inclusive month window that accepts any non-max director
    pub director_late_months: (u8, u8),

    // === WIT soft skip / energy ===
    #[validate(range(min = 0.0))]
    pub wit_rainbow_sv: f64,
    #[validate(range(min = 0, max = 100))]
    pub low_energy_rest: i32,
    #[validate(range(min = 0.0))]
    pub wit_late_sv: f64,
    #[validate(range(min = 0.0))]
    pub wit_floor_sv: f64,

    // === Recreation ===
    #[validate(range(min = 0, max = 100))]
    pub recreation_max_energy: i32,
    #[validate(range(min = 0, max = 100))]
    pub summer_recreation_max_energy: i32,
    /// Dates that raise mood on their own (new year shrine visit etc.)
    pub mood_events: Vec<CareerDate>,
    #[validate(range(min = 0))]
    pub mood_event_lookahead: i32,

    // === Racing / terminal ===
    #[validate(range(min = 0, max = 100))]
    pub race_min_energy: i32,
    #[validate(range(min = 0, max = 100))]
    pub terminal_rest_energy: i32,

    // === Undertrain nudge ===
    #[validate(range(min = 0.0))]
    pub undertrain_min_sv: f64,
    #[validate(range(min = 0.0))]
    pub undertrain_base_tolerance: f64,
    #[validate(range(min = 0.0))]
    pub undertrain_tolerance_per_pct: f64,
    #[validate(range(min = 0.0))]
    pub undertrain_max_tolerance: f64,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            greedy_sv: 2.5,
            strong_sv: 2.0,
            decent_sv: 1.5,
            priority_only_sv: 1.0,

            priority_guard_top_n: 3,
            guard_min_top_sv: 0.5,
            guard_max_margin: 0.75,
            exceptional_sv: 4.1,

            final_push_below: 600,
            final_soft_cap: 1170,

            summer_rest_energy: 40,
            summer_wit_energy: 70,
            pre_summer_energy: 90,
            pre_summer_wit_sv: 0.5,
            pre_summer_lookahead: 2,

            director_year: 3,
            director_early_months: (1, 3),
            director_late_months: (9, 12),

            wit_rainbow_sv: 1.5,
            low_energy_rest: 35,
            wit_late_sv: 1.5,
            wit_floor_sv: 1.0,

            recreation_max_energy: 90,
            summer_recreation_max_energy: 70,
            mood_events: vec![CareerDate::new(2, 1, 1), CareerDate::new(3, 1, 1)],
            mood_event_lookahead: 2,

            race_min_energy: 50,
            terminal_rest_energy: 70,

            undertrain_min_sv: 1.0,
            undertrain_base_tolerance: 0.5,
            undertrain_tolerance_per_pct: 0.05,
            undertrain_max_tolerance: 1.25,
        }
    }
}

impl PolicyConfig {
    /// SV tolerance for the undertrain nudge, wider for larger gaps.
    pub fn undertrain_tolerance(&self, gap_pct: f64, threshold_pct: f64) -> f64 {
        let extra = (gap_pct - threshold_pct).max(0.0) * self.undertrain_tolerance_per_pct;
        (self.undertrain_base_tolerance + extra).min(self.undertrain_max_tolerance)
    }

    /// Within `mood_event_lookahead` turns before (or on) a mood event.
    pub fn near_mood_event(&self, date: &CareerDate) -> bool {
        self.mood_events.iter().any(|event| {
            date.turns_until(event)
                .is_some_and(|d| (0..=self.mood_event_lookahead).contains(&d))
        })
    }
}
