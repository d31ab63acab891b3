// 육성 스탯 / 타일 배치
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Trainable stat category.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum Stat {
    Spd,
    Sta,
    Pwr,
    Guts,
    Wit,
}

impl Stat {
    pub const ALL: [Stat; 5] = [Stat::Spd, Stat::Sta, Stat::Pwr, Stat::Guts, Stat::Wit];

    /// 짧은 표기 (로그용)
    pub fn code(&self) -> &'static str {
        match self {
            Stat::Spd => "SPD",
            Stat::Sta => "STA",
            Stat::Pwr => "PWR",
            Stat::Guts => "GUTS",
            Stat::Wit => "WIT",
        }
    }
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Stat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "SPD" | "SPEED" => Ok(Stat::Spd),
            "STA" | "STAMINA" => Ok(Stat::Sta),
            "PWR" | "POWER" => Ok(Stat::Pwr),
            "GUTS" => Ok(Stat::Guts),
            "WIT" | "WISDOM" | "INT" => Ok(Stat::Wit),
            other => Err(format!("unknown stat: {other}")),
        }
    }
}

/// Stat totals keyed by category. Missing entries mean "not observed".
pub type StatMap = BTreeMap<Stat, i32>;

/// Maps on-screen tile positions to the stat they train.
///
/// The five-slot left-to-right arrangement is only the default; the scorer and
/// policy never assume it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TileLayout {
    pub stats: Vec<Stat>,
}

impl Default for TileLayout {
    fn default() -> Self {
        Self { stats: Stat::ALL.to_vec() }
    }
}

impl TileLayout {
    pub fn new(stats: Vec<Stat>) -> Self {
        Self { stats }
    }

    pub fn stat_for(&self, tile_idx: usize) -> Option<Stat> {
        self.stats.get(tile_idx).copied()
    }

    /// First tile index training `stat`.
    pub fn tile_for(&self, stat: Stat) -> Option<usize> {
        self.stats.iter().position(|s| *s == stat)
    }

    pub fn len(&self) -> usize {
        self.stats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }
}
