// 훈련 타일 입력 / 점수 출력
use super::support::{BarColor, SupportCard, SupportKind};
use super::types::Stat;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One on-screen training tile after left-to-right reindexing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TrainingTile {
    pub tile_idx: usize,
    /// 0..=100. The scanner substitutes a disallowing value when OCR fails.
    pub failure_pct: i32,
    #[serde(default)]
    pub supports: Vec<SupportCard>,
}

impl TrainingTile {
    pub fn new(tile_idx: usize, failure_pct: i32) -> Self {
        Self { tile_idx, failure_pct, supports: Vec::new() }
    }

    pub fn with_support(mut self, card: SupportCard) -> Self {
        self.supports.push(card);
        self
    }

    pub fn with_supports(mut self, cards: impl IntoIterator<Item = SupportCard>) -> Self {
        self.supports.extend(cards);
        self
    }

    pub fn has_hint(&self) -> bool {
        self.supports.iter().any(|c| c.has_hint)
    }

    pub fn rainbow_count(&self) -> usize {
        self.supports
            .iter()
            .filter(|c| c.kind == SupportKind::Standard && c.has_rainbow)
            .count()
    }

    fn director(&self) -> Option<&SupportCard> {
        self.supports.iter().find(|c| c.kind == SupportKind::Director)
    }

    /// Bar color of the director card on this tile, as read.
    pub fn director_color(&self) -> Option<BarColor> {
        self.director().map(|c| c.bar_color)
    }

    /// Director bar is full. Kept apart from the color: a non-max yellow
    /// bar still counts as an active director.
    pub fn director_is_max(&self) -> bool {
        self.director().is_some_and(|c| c.is_max)
    }
}

/// Scorer output for one tile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TileScore {
    pub tile_idx: usize,
    /// `None` when the index falls outside the configured layout
    pub stat: Option<Stat>,
    pub failure_pct: i32,
    pub sv_total: f64,
    /// Audit breakdown, only categories that contributed (or were recorded)
    pub sv_by_category: BTreeMap<String, f64>,
    pub risk_limit_pct: i32,
    pub allowed_by_risk: bool,
    pub greedy_hit: bool,
    pub has_hint: bool,
    pub rainbow_count: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub director_color: Option<BarColor>,
    #[serde(default)]
    pub director_is_max: bool,
    pub notes: Vec<String>,
}

impl TileScore {
    pub fn is_stat(&self, stat: Stat) -> bool {
        self.stat == Some(stat)
    }

    /// One-line summary used by the policy trace.
    pub fn label(&self) -> String {
        match self.stat {
            Some(stat) => format!("tile {} ({}) sv={:.2}", self.tile_idx, stat, self.sv_total),
            None => format!("tile {} sv={:.2}", self.tile_idx, self.sv_total),
        }
    }
}
