//! Ordered rule cascade
//!
//! 규칙은 이 순서대로 평가되고 처음 발동한 규칙이 결정을 낸다.
//! The table is the reviewable artifact: reordering entries changes tie-break
//! intent, so each entry is also exercised on its own in the tests.

use crate::config::PolicyConfig;
use crate::training::{Action, BarColor, Mood, RuleId, SessionContext, TileScore};

use super::pools::TilePools;
use super::undertrain::undertrained_focus_stats;

/// Result of evaluating one rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleOutcome {
    Fire(Action, String),
    Pass(String),
}

/// Read-only view every rule receives.
#[derive(Debug, Clone)]
pub struct RuleInput<'a> {
    pub ctx: &'a SessionContext,
    pub config: &'a PolicyConfig,
    pub pools: TilePools<'a>,
}

impl<'a> RuleInput<'a> {
    pub fn new(scores: &'a [TileScore], ctx: &'a SessionContext, config: &'a PolicyConfig) -> Self {
        Self { ctx, config, pools: TilePools::new(scores, ctx, config) }
    }

    /// Train `candidate` after the priority guard.
    fn train_guarded(&self, candidate: &'a TileScore, why: String) -> RuleOutcome {
        let (pick, guard_note) = self.pools.guard(candidate);
        let note = match guard_note {
            Some(g) => format!("{why}, {g}"),
            None => why,
        };
        RuleOutcome::Fire(Action::Train(pick.tile_idx), note)
    }
}

pub struct Rule {
    pub id: RuleId,
    pub eval: fn(&RuleInput<'_>) -> RuleOutcome,
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule").field("id", &self.id).finish()
    }
}

/// 규칙 순서표
pub static CASCADE: [Rule; 16] = [
    Rule { id: RuleId::Undertrain, eval: undertrain },
    Rule { id: RuleId::Greedy, eval: greedy },
    Rule { id: RuleId::FinalSeason, eval: final_season },
    Rule { id: RuleId::MoodGate, eval: mood_gate },
    Rule { id: RuleId::SummerProximity, eval: summer_proximity },
    Rule { id: RuleId::Strong, eval: strong },
    Rule { id: RuleId::G1Race, eval: g1_race },
    Rule { id: RuleId::DirectorBonus, eval: director_bonus },
    Rule { id: RuleId::WitRainbow, eval: wit_rainbow },
    Rule { id: RuleId::LowEnergyRest, eval: low_energy_rest },
    Rule { id: RuleId::WitFallback, eval: wit_fallback },
    Rule { id: RuleId::Decent, eval: decent },
    Rule { id: RuleId::Recreation, eval: recreation },
    Rule { id: RuleId::RaceGate, eval: race_gate },
    Rule { id: RuleId::PriorityOnly, eval: priority_only },
    Rule { id: RuleId::TerminalFallback, eval: terminal_fallback },
];

pub fn rule(id: RuleId) -> &'static Rule {
    // CASCADE is indexed in RuleId declaration order
    &CASCADE[id as usize]
}

fn pass(msg: impl Into<String>) -> RuleOutcome {
    RuleOutcome::Pass(msg.into())
}

fn energy_label(ctx: &SessionContext) -> String {
    ctx.energy_pct.map(|e| format!("{e}%")).unwrap_or_else(|| "unknown".to_string())
}

// ========== 0. undertrain nudge ==========

fn undertrain(input: &RuleInput<'_>) -> RuleOutcome {
    let ctx = input.ctx;
    let cfg = input.config;
    let pools = &input.pools;

    if ctx.hint_is_important && pools.any_hinted() {
        return pass("skipped, hinted tile present");
    }
    let hits = undertrained_focus_stats(ctx);
    if hits.is_empty() {
        return pass("no focus stat behind target share");
    }
    let Some(best) = pools.best_good(f64::NEG_INFINITY) else {
        return pass("no trainable tile");
    };

    let mut checked = Vec::new();
    for gap in &hits {
        let Some(tile) = pools.best_good_for_stat(gap.stat, cfg.undertrain_min_sv) else {
            checked.push(format!("{} gap {:.1}pp has no tile >= {:.2}", gap.stat, gap.gap_pct, cfg.undertrain_min_sv));
            continue;
        };
        let tolerance = cfg.undertrain_tolerance(gap.gap_pct, ctx.undertrain_threshold_pct);
        let deficit = best.sv_total - tile.sv_total;
        if deficit <= tolerance {
            return input.train_guarded(
                tile,
                format!(
                    "{} gap {:.1}pp, {} within {:.2} of best",
                    gap.stat,
                    gap.gap_pct,
                    tile.label(),
                    tolerance
                ),
            );
        }
        checked.push(format!(
            "{} gap {:.1}pp, {} trails best by {:.2} (> {:.2})",
            gap.stat,
            gap.gap_pct,
            tile.label(),
            deficit,
            tolerance
        ));
    }
    pass(checked.join(", "))
}

// ========== 1. greedy ==========

fn greedy(input: &RuleInput<'_>) -> RuleOutcome {
    let min = input.config.greedy_sv;
    match input.pools.best_good(min) {
        Some(tile) => input.train_guarded(tile, format!("{} >= {min:.2}", tile.label())),
        None => pass(format!("no allowed uncapped tile with sv >= {min:.2}")),
    }
}

// ========== 2. final season ==========

fn final_season(input: &RuleInput<'_>) -> RuleOutcome {
    let ctx = input.ctx;
    let cfg = input.config;
    let pools = &input.pools;

    if !ctx.career_date.is_final_season() {
        return pass("not final season");
    }
    if let Some(tile) = pools.best_allowed_hinted() {
        return RuleOutcome::Fire(
            Action::TakeHint(tile.tile_idx),
            format!("hint on {}", tile.label()),
        );
    }

    let top = ctx.top_priorities(cfg.priority_guard_top_n);
    for stat in top {
        let Some(value) = ctx.stats.get(stat).copied() else { continue };
        if value >= cfg.final_push_below {
            continue;
        }
        if let Some(tile) = pools.best_good_for_stat(*stat, f64::NEG_INFINITY) {
            return RuleOutcome::Fire(
                Action::Train(tile.tile_idx),
                format!("{stat} {value} below {}, {}", cfg.final_push_below, tile.label()),
            );
        }
    }

    // 1170 에 가장 가까운 스탯 (미만)
    let mut nearest: Option<(i32, &TileScore)> = None;
    for stat in top {
        let Some(value) = ctx.stats.get(stat).copied() else { continue };
        if value >= cfg.final_soft_cap {
            continue;
        }
        let Some(tile) = pools.best_good_for_stat(*stat, f64::NEG_INFINITY) else { continue };
        if nearest.map_or(true, |(v, _)| value > v) {
            nearest = Some((value, tile));
        }
    }
    if let Some((value, tile)) = nearest {
        return RuleOutcome::Fire(
            Action::Train(tile.tile_idx),
            format!("{value} nearest below {}, {}", cfg.final_soft_cap, tile.label()),
        );
    }

    if let Some(wit) = pools.allowed_wit() {
        return RuleOutcome::Fire(
            Action::TrainWit(wit.tile_idx),
            format!("soft skip via {}", wit.label()),
        );
    }
    pass("final season, nothing to push")
}

// ========== 3. mood ==========

fn mood_gate(input: &RuleInput<'_>) -> RuleOutcome {
    let ctx = input.ctx;
    if ctx.mood.is_below(ctx.minimal_mood) && ctx.mood.is_below(Mood::Great) {
        return RuleOutcome::Fire(
            Action::Recreation,
            format!("mood {} below minimum {}", ctx.mood, ctx.minimal_mood),
        );
    }
    pass(format!("mood {} ok", ctx.mood))
}

// ========== 4. summer proximity ==========

fn summer_proximity(input: &RuleInput<'_>) -> RuleOutcome {
    let ctx = input.ctx;
    let cfg = input.config;
    let Some(turns) = ctx.career_date.turns_until_summer() else {
        return pass("summer not ahead");
    };
    if ctx.energy_pct.is_none() {
        return pass(format!("summer in {turns}, energy unknown"));
    }

    if turns == 1 {
        if ctx.energy_at_most(cfg.summer_rest_energy) {
            return RuleOutcome::Fire(
                Action::Rest,
                format!("summer next turn, energy {} <= {}", energy_label(ctx), cfg.summer_rest_energy),
            );
        }
        if ctx.energy_at_most(cfg.summer_wit_energy) {
            if let Some(wit) = input.pools.allowed_wit() {
                return RuleOutcome::Fire(
                    Action::TrainWit(wit.tile_idx),
                    format!("summer next turn, energy {}, soft skip via {}", energy_label(ctx), wit.label()),
                );
            }
        }
    }

    if turns <= cfg.pre_summer_lookahead && ctx.energy_at_most(cfg.pre_summer_energy) {
        if let Some(wit) =
            input.pools.allowed_wit().filter(|w| w.sv_total >= cfg.pre_summer_wit_sv)
        {
            return RuleOutcome::Fire(
                Action::TrainWit(wit.tile_idx),
                format!("summer in {turns}, energy {}, {}", energy_label(ctx), wit.label()),
            );
        }
        return pass(format!("summer in {turns}, no WIT tile >= {:.2}", cfg.pre_summer_wit_sv));
    }
    pass(format!("summer in {turns}, energy {}", energy_label(ctx)))
}

// ========== 5. strong ==========

fn strong(input: &RuleInput<'_>) -> RuleOutcome {
    let min = input.config.strong_sv;
    match input.pools.best_good(min) {
        Some(tile) => input.train_guarded(tile, format!("{} >= {min:.2}", tile.label())),
        None => pass(format!("no allowed uncapped tile with sv >= {min:.2}")),
    }
}

// ========== 6. G1 ==========

/// Race, unless racing is only allowed with good training and nothing has
/// value, in which case the best allowed tile is trained instead.
fn race_or_train(input: &RuleInput<'_>, why: String) -> RuleOutcome {
    let pools = &input.pools;
    if !input.ctx.race_if_no_good_value && !pools.any_positive_sv() {
        return match pools.best_allowed() {
            Some(tile) => input.train_guarded(tile, format!("{why}, no positive sv so training")),
            None => pass(format!("{why}, no positive sv and no allowed tile")),
        };
    }
    RuleOutcome::Fire(Action::Race, why)
}

fn g1_race(input: &RuleInput<'_>) -> RuleOutcome {
    let ctx = input.ctx;
    if !ctx.prioritize_g1 {
        return pass("G1 priority off");
    }
    let date = &ctx.career_date;
    if date.is_pre_debut() || date.is_junior() {
        return pass(format!("no G1 racing in {date}"));
    }
    if !ctx.g1_race_today {
        return pass("no G1 today");
    }
    if ctx.skip_race {
        return pass("racing suppressed");
    }
    race_or_train(input, "G1 available".to_string())
}

// ========== 7. director ==========

fn director_bonus(input: &RuleInput<'_>) -> RuleOutcome {
    let ctx = input.ctx;
    let cfg = input.config;
    let pools = &input.pools;
    let date = &ctx.career_date;

    if date.year_code != cfg.director_year || date.month.is_none() {
        return pass("outside director year");
    }
    let (e0, e1) = cfg.director_early_months;
    let (l0, l1) = cfg.director_late_months;
    let early = date.in_months(e0, e1);
    let late = date.in_months(l0, l1);
    if !early && !late {
        return pass("outside director windows");
    }

    for tile in pools.ranked() {
        let Some(color) = tile.director_color else { continue };
        if tile.director_is_max {
            continue;
        }
        // early: blue only; late: any non-max director with a resolved color
        let window_ok = if early { color == BarColor::Blue } else { color != BarColor::Unknown };
        if !window_ok {
            continue;
        }
        let orange = color == BarColor::Orange;
        if !(pools.is_top_priority(tile) || orange) {
            continue;
        }
        if !tile.allowed_by_risk {
            continue;
        }
        if !orange && pools.is_capped(tile) {
            continue;
        }
        return RuleOutcome::Fire(
            Action::TrainDirector(tile.tile_idx),
            format!("{color} director on {}", tile.label()),
        );
    }
    pass("no eligible director")
}

// ========== 8. WIT rainbow ==========

fn wit_rainbow(input: &RuleInput<'_>) -> RuleOutcome {
    let min = input.config.wit_rainbow_sv;
    match input.pools.allowed_wit() {
        Some(wit) if wit.rainbow_count > 0 && wit.sv_total >= min => RuleOutcome::Fire(
            Action::TrainWit(wit.tile_idx),
            format!("rainbow on {}", wit.label()),
        ),
        _ => pass(format!("no allowed rainbow WIT with sv >= {min:.2}")),
    }
}

// ========== 9. low energy ==========

fn low_energy_rest(input: &RuleInput<'_>) -> RuleOutcome {
    let ctx = input.ctx;
    let limit = input.config.low_energy_rest;
    if ctx.energy_at_most(limit) {
        return RuleOutcome::Fire(
            Action::Rest,
            format!("energy {} <= {limit}", energy_label(ctx)),
        );
    }
    pass(format!("energy {}", energy_label(ctx)))
}

// ========== 10. WIT fallback ==========

fn wit_fallback(input: &RuleInput<'_>) -> RuleOutcome {
    let cfg = input.config;
    let Some(wit) = input.pools.allowed_wit() else {
        return pass("no allowed WIT tile");
    };
    let why = if wit.rainbow_count > 0 {
        "rainbow present"
    } else if wit.sv_total >= cfg.wit_late_sv {
        "late threshold"
    } else if wit.sv_total >= cfg.wit_floor_sv {
        "above floor"
    } else {
        return pass(format!("{} below floor {:.2}", wit.label(), cfg.wit_floor_sv));
    };
    RuleOutcome::Fire(Action::TrainWit(wit.tile_idx), format!("{why}, {}", wit.label()))
}

// ========== 11. decent ==========

fn decent(input: &RuleInput<'_>) -> RuleOutcome {
    let min = input.config.decent_sv;
    match input.pools.best_good(min) {
        Some(tile) => input.train_guarded(tile, format!("{} >= {min:.2}", tile.label())),
        None => pass(format!("no allowed uncapped tile with sv >= {min:.2}")),
    }
}

// ========== 12. recreation ==========

fn recreation(input: &RuleInput<'_>) -> RuleOutcome {
    let ctx = input.ctx;
    let cfg = input.config;
    if !ctx.mood.is_below(Mood::Great) {
        return pass(format!("mood {}", ctx.mood));
    }
    if cfg.near_mood_event(&ctx.career_date) {
        return pass("mood event close");
    }
    let summer = ctx.career_date.is_summer();
    let limit = if summer { cfg.summer_recreation_max_energy } else { cfg.recreation_max_energy };
    if ctx.energy_pct.is_some_and(|e| e > limit) {
        return pass(format!("energy {} > {limit}", energy_label(ctx)));
    }
    RuleOutcome::Fire(
        Action::Recreation,
        format!("mood {}, energy {}{}", ctx.mood, energy_label(ctx), if summer { " (summer)" } else { "" }),
    )
}

// ========== 13. race gate ==========

fn race_gate(input: &RuleInput<'_>) -> RuleOutcome {
    let ctx = input.ctx;
    let cfg = input.config;
    let date = &ctx.career_date;
    if date.is_summer() {
        return pass("summer");
    }
    if date.is_pre_debut() || date.is_junior() || date.is_final_season() {
        return pass(format!("no free racing in {date}"));
    }
    if ctx.skip_race {
        return pass("racing suppressed");
    }
    if !ctx.energy_above(cfg.race_min_energy) {
        return pass(format!("energy {} <= {}", energy_label(ctx), cfg.race_min_energy));
    }
    race_or_train(input, "no good training, racing".to_string())
}

// ========== 14. priority only ==========

fn priority_only(input: &RuleInput<'_>) -> RuleOutcome {
    let min = input.config.priority_only_sv;
    match input.pools.best_good_top_priority(min) {
        Some(tile) => RuleOutcome::Fire(
            Action::Train(tile.tile_idx),
            format!("top priority {} >= {min:.2}", tile.label()),
        ),
        None => pass(format!("no top priority tile with sv >= {min:.2}")),
    }
}

// ========== 15. terminal ==========

fn terminal_fallback(input: &RuleInput<'_>) -> RuleOutcome {
    let ctx = input.ctx;
    let cfg = input.config;
    let pools = &input.pools;

    if ctx.career_date.is_summer() {
        if let Some(wit) = pools.allowed_wit() {
            return RuleOutcome::Fire(
                Action::TrainWit(wit.tile_idx),
                format!("summer soft skip via {}", wit.label()),
            );
        }
    }
    if ctx.energy_at_most(cfg.terminal_rest_energy) {
        return RuleOutcome::Fire(
            Action::Rest,
            format!("energy {} <= {}", energy_label(ctx), cfg.terminal_rest_energy),
        );
    }
    if let Some(tile) = pools.best_allowed() {
        return input.train_guarded(tile, format!("best allowed {}", tile.label()));
    }
    RuleOutcome::Fire(Action::Noop, "no allowed tile, nothing applies".to_string())
}
