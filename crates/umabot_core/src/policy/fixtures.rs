// 정책 테스트용 시나리오 빌더
use std::collections::BTreeMap;

use crate::config::PolicyConfig;
use crate::training::{
    BarColor, CareerDate, Decision, Mood, SessionContext, Stat, TileLayout, TileScore,
};

use super::DecisionPolicy;

pub const SPD: usize = 0;
pub const STA: usize = 1;
pub const PWR: usize = 2;
pub const GUTS: usize = 3;
pub const WIT: usize = 4;

/// Allowed tile with no flags, stat from the default layout.
pub fn score(idx: usize, sv: f64) -> TileScore {
    TileScore {
        tile_idx: idx,
        stat: TileLayout::default().stat_for(idx),
        failure_pct: 0,
        sv_total: sv,
        sv_by_category: BTreeMap::new(),
        risk_limit_pct: 20,
        allowed_by_risk: true,
        greedy_hit: sv >= 2.5,
        has_hint: false,
        rainbow_count: 0,
        director_color: None,
        director_is_max: false,
        notes: Vec::new(),
    }
}

pub fn blocked(mut tile: TileScore) -> TileScore {
    tile.allowed_by_risk = false;
    tile.greedy_hit = false;
    tile.failure_pct = 80;
    tile
}

pub fn hinted(mut tile: TileScore) -> TileScore {
    tile.has_hint = true;
    tile
}

pub fn rainbow(mut tile: TileScore, count: usize) -> TileScore {
    tile.rainbow_count = count;
    tile
}

pub fn director(mut tile: TileScore, color: BarColor) -> TileScore {
    tile.director_color = Some(color);
    tile
}

pub fn maxed_director(mut tile: TileScore, color: BarColor) -> TileScore {
    tile.director_color = Some(color);
    tile.director_is_max = true;
    tile
}

/// Five tiles at the given SVs, all allowed.
pub fn board(svs: [f64; 5]) -> Vec<TileScore> {
    svs.iter().enumerate().map(|(i, sv)| score(i, *sv)).collect()
}

/// Classic year April, energy 80, mood unknown, no stats observed.
pub fn ctx() -> SessionContext {
    let mut ctx = SessionContext::default();
    ctx.career_date = CareerDate::new(2, 4, 1);
    ctx.energy_pct = Some(80);
    ctx.mood = Mood::Unknown;
    ctx.turns_left = 40;
    ctx
}

pub fn with_stats(mut ctx: SessionContext, stats: &[(Stat, i32)]) -> SessionContext {
    ctx.stats = stats.iter().copied().collect();
    ctx
}

pub fn with_reference(mut ctx: SessionContext, stats: &[(Stat, i32)]) -> SessionContext {
    ctx.reference_stats = stats.iter().copied().collect();
    ctx
}

pub fn run(scores: &[TileScore], ctx: &SessionContext) -> Decision {
    let config = PolicyConfig::default();
    DecisionPolicy::new(&config).decide(scores, ctx)
}
