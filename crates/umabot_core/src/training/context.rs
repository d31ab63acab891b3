// 턴 컨텍스트 - 결정 1회당 읽기 전용
use super::calendar::CareerDate;
use super::mood::Mood;
use super::types::{Stat, StatMap};
use crate::config::BotConfig;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// What the caller observed this turn, outside the training tiles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema, Default)]
pub struct TurnObservation {
    #[serde(default)]
    pub mood: Mood,
    #[serde(default)]
    pub career_date: CareerDate,
    #[serde(default)]
    pub energy_pct: Option<i32>,
    #[serde(default)]
    pub turns_left: i32,
    #[serde(default)]
    pub stats: StatMap,
    /// Caller's race calendar says a G1 is runnable today
    #[serde(default)]
    pub g1_race_today: bool,
    /// Set by the caller after a refused or failed race attempt
    #[serde(default)]
    pub skip_race: bool,
}

/// Everything the policy reads besides the tile scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SessionContext {
    pub mood: Mood,
    pub career_date: CareerDate,
    pub energy_pct: Option<i32>,
    pub turns_left: i32,
    pub stats: StatMap,
    pub reference_stats: StatMap,
    /// Engineer-declared preference order, most important first
    pub priority_stats: Vec<Stat>,
    pub minimal_mood: Mood,
    pub g1_race_today: bool,

    pub prioritize_g1: bool,
    pub skip_race: bool,
    pub hint_is_important: bool,
    pub race_if_no_good_value: bool,
    pub undertrain_threshold_pct: f64,
    pub top_stats_focus_n: usize,
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::from_observation(TurnObservation::default(), &BotConfig::default())
    }
}

impl SessionContext {
    /// Combine a turn observation with the career settings of `config`.
    pub fn from_observation(obs: TurnObservation, config: &BotConfig) -> Self {
        let career = &config.career;
        Self {
            mood: obs.mood,
            career_date: obs.career_date,
            energy_pct: obs.energy_pct,
            turns_left: obs.turns_left,
            stats: obs.stats,
            reference_stats: career.reference_stats.clone(),
            priority_stats: career.priority_stats.clone(),
            minimal_mood: career.minimal_mood,
            g1_race_today: obs.g1_race_today,
            prioritize_g1: career.prioritize_g1,
            skip_race: obs.skip_race,
            hint_is_important: config.scoring.hint_is_important,
            race_if_no_good_value: career.race_if_no_good_value,
            undertrain_threshold_pct: career.undertrain_threshold_pct,
            top_stats_focus_n: career.top_stats_focus_n,
        }
    }

    /// Current total reached the reference target. Missing entries never cap.
    pub fn is_capped(&self, stat: Stat) -> bool {
        match (self.stats.get(&stat), self.reference_stats.get(&stat)) {
            (Some(cur), Some(target)) => cur >= target,
            _ => false,
        }
    }

    pub fn top_priorities(&self, n: usize) -> &[Stat] {
        &self.priority_stats[..n.min(self.priority_stats.len())]
    }

    pub fn is_top_priority(&self, stat: Option<Stat>, n: usize) -> bool {
        stat.is_some_and(|s| self.top_priorities(n).contains(&s))
    }

    /// Position in `priority_stats`; unlisted stats sort after every listed one.
    pub fn priority_rank(&self, stat: Option<Stat>) -> usize {
        stat.and_then(|s| self.priority_stats.iter().position(|p| *p == s))
            .unwrap_or(usize::MAX)
    }

    pub fn energy_at_most(&self, limit: i32) -> bool {
        self.energy_pct.is_some_and(|e| e <= limit)
    }

    pub fn energy_above(&self, floor: i32) -> bool {
        self.energy_pct.is_some_and(|e| e > floor)
    }
}
