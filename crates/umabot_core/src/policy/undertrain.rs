//! Undertrain detection
//!
//! Compares the reference distribution with the current one over the stats
//! both maps know. A positive gap means the stat lags its target share.

use crate::training::{SessionContext, Stat};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShareGap {
    pub stat: Stat,
    pub reference_share: f64,
    pub current_share: f64,
    /// (reference - current) in percentage points
    pub gap_pct: f64,
}

/// Share gaps for every stat present in both `stats` and `reference_stats`.
/// Empty when either side sums to zero.
pub fn share_gaps(ctx: &SessionContext) -> Vec<ShareGap> {
    let known: Vec<(Stat, f64, f64)> = Stat::ALL
        .into_iter()
        .filter_map(|stat| {
            let cur = *ctx.stats.get(&stat)?;
            let target = *ctx.reference_stats.get(&stat)?;
            Some((stat, target.max(0) as f64, cur.max(0) as f64))
        })
        .collect();

    let ref_sum: f64 = known.iter().map(|(_, r, _)| r).sum();
    let cur_sum: f64 = known.iter().map(|(_, _, c)| c).sum();
    if ref_sum <= 0.0 || cur_sum <= 0.0 {
        return Vec::new();
    }

    known
        .into_iter()
        .map(|(stat, r, c)| {
            let reference_share = r / ref_sum;
            let current_share = c / cur_sum;
            ShareGap {
                stat,
                reference_share,
                current_share,
                gap_pct: (reference_share - current_share) * 100.0,
            }
        })
        .collect()
}

/// Focus stats whose gap reaches the threshold, largest gap first; equal
/// gaps keep priority order.
pub fn undertrained_focus_stats(ctx: &SessionContext) -> Vec<ShareGap> {
    let gaps = share_gaps(ctx);
    let focus = ctx.top_priorities(ctx.top_stats_focus_n);
    let mut hits: Vec<ShareGap> = focus
        .iter()
        .filter_map(|stat| gaps.iter().find(|g| g.stat == *stat).copied())
        .filter(|g| g.gap_pct >= ctx.undertrain_threshold_pct)
        .collect();
    // stable sort keeps priority order on ties
    hits.sort_by(|a, b| b.gap_pct.total_cmp(&a.gap_pct));
    hits
}
