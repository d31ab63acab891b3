//! Candidate pools shared by the cascade rules
//!
//! 규칙 평가 전에 한 번 계산: cap 필터, 힌트 예외, 우선순위 가드.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use crate::config::PolicyConfig;
use crate::training::{SessionContext, Stat, TileScore};

#[derive(Debug, Clone)]
pub struct TilePools<'a> {
    scores: &'a [TileScore],
    ctx: &'a SessionContext,
    config: &'a PolicyConfig,
    capped: BTreeSet<Stat>,
}

impl<'a> TilePools<'a> {
    pub fn new(scores: &'a [TileScore], ctx: &'a SessionContext, config: &'a PolicyConfig) -> Self {
        let capped = Stat::ALL.into_iter().filter(|s| ctx.is_capped(*s)).collect();
        Self { scores, ctx, config, capped }
    }

    pub fn scores(&self) -> &'a [TileScore] {
        self.scores
    }

    pub fn capped_stats(&self) -> &BTreeSet<Stat> {
        &self.capped
    }

    pub fn is_capped(&self, score: &TileScore) -> bool {
        score.stat.is_some_and(|s| self.capped.contains(&s))
    }

    /// A hinted tile ignores its stat cap when hints are important.
    pub fn hint_override(&self, score: &TileScore) -> bool {
        score.has_hint && self.ctx.hint_is_important
    }

    /// Risk-allowed and (uncapped or hint override).
    pub fn is_good(&self, score: &TileScore) -> bool {
        score.allowed_by_risk && (!self.is_capped(score) || self.hint_override(score))
    }

    pub fn is_top_priority(&self, score: &TileScore) -> bool {
        self.ctx.is_top_priority(score.stat, self.config.priority_guard_top_n)
    }

    /// Highest SV; ties go to the better priority rank, then the lower index.
    pub fn best_of<I>(&self, iter: I) -> Option<&'a TileScore>
    where
        I: IntoIterator<Item = &'a TileScore>,
    {
        iter.into_iter().min_by(|a, b| self.rank_order(a, b))
    }

    fn rank_order(&self, a: &TileScore, b: &TileScore) -> Ordering {
        b.sv_total
            .total_cmp(&a.sv_total)
            .then_with(|| self.ctx.priority_rank(a.stat).cmp(&self.ctx.priority_rank(b.stat)))
            .then_with(|| a.tile_idx.cmp(&b.tile_idx))
    }

    /// Tiles in evaluation order (best first).
    pub fn ranked(&self) -> Vec<&'a TileScore> {
        let mut all: Vec<&TileScore> = self.scores.iter().collect();
        all.sort_by(|a, b| self.rank_order(a, b));
        all
    }

    pub fn best_good(&self, min_sv: f64) -> Option<&'a TileScore> {
        self.best_of(self.scores.iter().filter(|s| self.is_good(s) && s.sv_total >= min_sv))
    }

    pub fn best_good_for_stat(&self, stat: Stat, min_sv: f64) -> Option<&'a TileScore> {
        self.best_of(
            self.scores
                .iter()
                .filter(|s| s.is_stat(stat) && self.is_good(s) && s.sv_total >= min_sv),
        )
    }

    pub fn best_good_top_priority(&self, min_sv: f64) -> Option<&'a TileScore> {
        self.best_of(self.scores.iter().filter(|s| {
            self.is_good(s) && self.is_top_priority(s) && s.sv_total >= min_sv
        }))
    }

    pub fn best_allowed(&self) -> Option<&'a TileScore> {
        self.best_of(self.scores.iter().filter(|s| s.allowed_by_risk))
    }

    pub fn best_allowed_hinted(&self) -> Option<&'a TileScore> {
        self.best_of(self.scores.iter().filter(|s| s.allowed_by_risk && s.has_hint))
    }

    /// Best risk-allowed WIT tile. WIT soft skips ignore caps.
    pub fn allowed_wit(&self) -> Option<&'a TileScore> {
        self.best_of(self.scores.iter().filter(|s| s.is_stat(Stat::Wit) && s.allowed_by_risk))
    }

    pub fn any_positive_sv(&self) -> bool {
        self.scores.iter().any(|s| s.sv_total > 0.0)
    }

    pub fn any_hinted(&self) -> bool {
        self.scores.iter().any(|s| s.has_hint)
    }

    /// Priority guard: swap a marginal non-priority pick for the best top-N
    /// tile. Returns the tile to use and a trace line when the guard acted.
    pub fn guard(&self, candidate: &'a TileScore) -> (&'a TileScore, Option<String>) {
        let cfg = self.config;
        if self.is_top_priority(candidate) {
            return (candidate, None);
        }
        if candidate.sv_total >= cfg.exceptional_sv {
            return (
                candidate,
                Some(format!("guard bypassed, sv {:.2} is exceptional", candidate.sv_total)),
            );
        }
        let Some(top) = self.best_good_top_priority(f64::NEG_INFINITY) else {
            return (candidate, None);
        };
        if top.sv_total >= cfg.guard_min_top_sv
            && candidate.sv_total - top.sv_total <= cfg.guard_max_margin
        {
            let note = format!("priority guard: {} -> {}", candidate.label(), top.label());
            return (top, Some(note));
        }
        (candidate, None)
    }
}
