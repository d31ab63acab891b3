//! Career goals set by the engineer before a run

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::training::{Mood, Stat, StatMap};

pub const UNDERTRAIN_THRESHOLD_RANGE: (f64, f64) = (1.0, 20.0);
pub const TOP_STATS_FOCUS_RANGE: (usize, usize) = (1, 5);

/// 육성 목표 설정
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct CareerSettings {
    /// Target distribution; reaching a target caps the stat
    pub reference_stats: StatMap,
    /// Most important first
    pub priority_stats: Vec<Stat>,
    /// Recreate when mood is below this
    pub minimal_mood: Mood,
    /// Share gap (percent points) that triggers the undertrain nudge (1–20)
    pub undertrain_threshold_pct: f64,
    /// How many priority stats the nudge watches (1–5)
    pub top_stats_focus_n: usize,
    pub race_if_no_good_value: bool,
    pub prioritize_g1: bool,
}

impl Default for CareerSettings {
    fn default() -> Self {
        Self {
            reference_stats: [
                (Stat::Spd, 1150),
                (Stat::Sta, 900),
                (Stat::Pwr, 1000),
                (Stat::Guts, 400),
                (Stat::Wit, 700),
            ]
            .into_iter()
            .collect(),
            priority_stats: vec![Stat::Spd, Stat::Sta, Stat::Wit, Stat::Pwr, Stat::Guts],
            minimal_mood: Mood::Normal,
            undertrain_threshold_pct: 6.0,
            top_stats_focus_n: 3,
            race_if_no_good_value: false,
            prioritize_g1: false,
        }
    }
}

impl CareerSettings {
    /// Clamp knobs into their supported ranges. Returns the names of fields
    /// that were changed.
    pub fn clamp_knobs(&mut self) -> Vec<&'static str> {
        let mut changed = Vec::new();

        let (lo, hi) = UNDERTRAIN_THRESHOLD_RANGE;
        let threshold = if self.undertrain_threshold_pct.is_nan() {
            lo
        } else {
            self.undertrain_threshold_pct.clamp(lo, hi)
        };
        if threshold != self.undertrain_threshold_pct {
            self.undertrain_threshold_pct = threshold;
            changed.push("undertrain_threshold_pct");
        }

        let (lo, hi) = TOP_STATS_FOCUS_RANGE;
        let focus = self.top_stats_focus_n.clamp(lo, hi);
        if focus != self.top_stats_focus_n {
            self.top_stats_focus_n = focus;
            changed.push("top_stats_focus_n");
        }

        changed
    }

    /// Drop repeated entries from the priority list, keeping the first.
    pub fn dedup_priorities(&mut self) -> bool {
        let before = self.priority_stats.len();
        let mut seen = Vec::with_capacity(before);
        self.priority_stats.retain(|s| {
            if seen.contains(s) {
                false
            } else {
                seen.push(*s);
                true
            }
        });
        self.priority_stats.len() != before
    }
}
