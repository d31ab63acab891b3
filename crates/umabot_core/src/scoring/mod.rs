//! Support Value (SV) Scorer
//!
//! 타일마다 서포트 카드로부터 SV 점수와 실패율 상한을 계산한다.
//!
//! ## 평가 순서
//!
//! ```text
//! cards (reporter / director / standard) → tile-capped hint bonus
//!   → rainbow combo → risk gate → greedy flag
//! ```
//!
//! Every contribution is written to `TileScore::notes` in this order; the
//! trace is part of the output contract.

pub mod risk;

pub use risk::{risk_limit_pct, risk_multiplier};

use std::collections::BTreeMap;

use crate::config::ScoringConfig;
use crate::training::{SupportCard, SupportKind, TileLayout, TileScore, TrainingTile};

pub const CAT_REPORTER: &str = "reporter";
pub const CAT_DIRECTOR: &str = "director";
pub const CAT_RAINBOW: &str = "rainbow";
pub const CAT_BLUE_GREEN: &str = "blue_green";
pub const CAT_ORANGE_MAX: &str = "orange_max";
pub const CAT_UNKNOWN: &str = "unknown";
pub const CAT_HINT_BLUE_GREEN: &str = "hint_blue_green";
pub const CAT_HINT_ORANGE_MAX: &str = "hint_orange_max";
pub const CAT_RAINBOW_COMBO: &str = "rainbow_combo";

/// Running SV total with its audit trail.
#[derive(Debug, Default)]
struct SvLedger {
    total: f64,
    by_category: BTreeMap<String, f64>,
    notes: Vec<String>,
}

impl SvLedger {
    fn add(&mut self, category: &str, value: f64, note: String) {
        self.total += value;
        *self.by_category.entry(category.to_string()).or_insert(0.0) += value;
        self.notes.push(note);
    }
}

/// SV 점수 계산기
#[derive(Debug, Clone)]
pub struct SupportValueScorer<'a> {
    config: &'a ScoringConfig,
    layout: &'a TileLayout,
}

impl<'a> SupportValueScorer<'a> {
    pub fn new(config: &'a ScoringConfig, layout: &'a TileLayout) -> Self {
        Self { config, layout }
    }

    pub fn score_all(&self, tiles: &[TrainingTile]) -> Vec<TileScore> {
        tiles.iter().map(|tile| self.score(tile)).collect()
    }

    pub fn score(&self, tile: &TrainingTile) -> TileScore {
        let cfg = self.config;
        let mut ledger = SvLedger::default();
        let mut rainbow_count = 0usize;
        let mut blue_green_hint_seen = false;
        let mut orange_max_hint_seen = false;

        // 1. 카드별 기여
        for card in tile.supports.iter().map(SupportCard::normalized) {
            match card.kind {
                SupportKind::Reporter => {
                    ledger.add(
                        CAT_REPORTER,
                        cfg.reporter_value,
                        format!("reporter: +{:.2}", cfg.reporter_value),
                    );
                }
                SupportKind::Director => {
                    let color = if card.is_max { "max" } else { card.bar_color.name() };
                    match cfg.director.for_card(card.bar_color, card.is_max) {
                        Some(value) => ledger.add(
                            CAT_DIRECTOR,
                            value,
                            format!("director ({color}): +{value:.2}"),
                        ),
                        None => ledger.add(
                            CAT_UNKNOWN,
                            0.0,
                            "director (unknown color category): +0.00".to_string(),
                        ),
                    }
                }
                SupportKind::Standard => {
                    if card.has_rainbow {
                        rainbow_count += 1;
                        ledger.add(
                            CAT_RAINBOW,
                            cfg.rainbow_value,
                            format!("rainbow support: +{:.2}", cfg.rainbow_value),
                        );
                    }
                    if card.bar_color.is_blue_green() {
                        blue_green_hint_seen |= card.has_hint;
                        ledger.add(
                            CAT_BLUE_GREEN,
                            cfg.blue_green_value,
                            format!("support bar {}: +{:.2}", card.bar_color, cfg.blue_green_value),
                        );
                    } else if card.bar_color.is_orange_yellow() || card.is_max {
                        orange_max_hint_seen |= card.has_hint;
                        let color = if card.is_max { "max" } else { card.bar_color.name() };
                        ledger.add(
                            CAT_ORANGE_MAX,
                            cfg.orange_max_value,
                            format!("support bar {color}: +{:.2}", cfg.orange_max_value),
                        );
                    } else {
                        ledger.add(
                            CAT_UNKNOWN,
                            0.0,
                            "support bar (unknown color category): +0.00".to_string(),
                        );
                    }
                }
            }
        }

        // 2. 타일당 1회 힌트 보너스
        if blue_green_hint_seen {
            let bonus = cfg.blue_green_hint_bonus();
            ledger.add(
                CAT_HINT_BLUE_GREEN,
                bonus,
                format!("hint on blue/green support (tile-capped): +{bonus:.2}"),
            );
        }
        if orange_max_hint_seen {
            let bonus = cfg.orange_max_hint_bonus();
            ledger.add(
                CAT_HINT_ORANGE_MAX,
                bonus,
                format!("hint on orange/max support (tile-capped): +{bonus:.2}"),
            );
        }

        // 3. 레인보우 콤보 (1회)
        if rainbow_count >= cfg.rainbow_combo_min {
            ledger.add(
                CAT_RAINBOW_COMBO,
                cfg.rainbow_combo_bonus,
                format!("rainbow combo ({rainbow_count} rainbows): +{:.2}", cfg.rainbow_combo_bonus),
            );
        }

        // 4. 리스크
        let sv_total = ledger.total;
        let multiplier = risk_multiplier(sv_total, &cfg.risk_steps);
        let risk_limit_pct = risk_limit_pct(cfg.max_failure, multiplier);
        let allowed_by_risk = tile.failure_pct <= risk_limit_pct;
        ledger.notes.push(format!(
            "risk: sv {:.2} -> x{:.2}, limit {}% (base {}%), failure {}% {}",
            sv_total,
            multiplier,
            risk_limit_pct,
            cfg.max_failure,
            tile.failure_pct,
            if allowed_by_risk { "allowed" } else { "blocked" }
        ));

        // 5. greedy
        let greedy_hit = sv_total >= cfg.greedy_sv && allowed_by_risk;
        ledger.notes.push(if greedy_hit {
            format!("greedy: hit (sv >= {:.2})", cfg.greedy_sv)
        } else {
            "greedy: no".to_string()
        });

        for note in &ledger.notes {
            log::trace!("tile {}: {}", tile.tile_idx, note);
        }
        log::debug!(
            "tile {} sv={:.2} limit={}% fail={}% allowed={} greedy={}",
            tile.tile_idx,
            sv_total,
            risk_limit_pct,
            tile.failure_pct,
            allowed_by_risk,
            greedy_hit
        );

        TileScore {
            tile_idx: tile.tile_idx,
            stat: self.layout.stat_for(tile.tile_idx),
            failure_pct: tile.failure_pct,
            sv_total,
            sv_by_category: ledger.by_category,
            risk_limit_pct,
            allowed_by_risk,
            greedy_hit,
            has_hint: tile.has_hint(),
            rainbow_count,
            director_color: tile.director_color(),
            director_is_max: tile.director_is_max(),
            notes: ledger.notes,
        }
    }
}

/// Score every tile with `config`.
pub fn score_tiles(
    tiles: &[TrainingTile],
    config: &ScoringConfig,
    layout: &TileLayout,
) -> Vec<TileScore> {
    SupportValueScorer::new(config, layout).score_all(tiles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::training::{BarColor, Stat};

    fn score_one(tile: TrainingTile, config: &ScoringConfig) -> TileScore {
        let layout = TileLayout::default();
        SupportValueScorer::new(config, &layout).score(&tile)
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_single_rainbow_on_wit_tile() {
        let tile = TrainingTile::new(4, 5)
            .with_support(SupportCard::standard(BarColor::Orange).with_rainbow());
        let s = score_one(tile, &ScoringConfig::default());

        assert_eq!(s.stat, Some(Stat::Wit));
        assert!(approx(s.sv_total, 1.0));
        assert_eq!(s.risk_limit_pct, 20);
        assert!(s.allowed_by_risk);
        assert!(!s.greedy_hit);
        assert_eq!(s.rainbow_count, 1);
        assert!(!s.sv_by_category.contains_key(CAT_RAINBOW_COMBO));
    }

    #[test]
    fn test_rainbow_and_blue_are_independent() {
        let tile = TrainingTile::new(0, 0)
            .with_support(SupportCard::standard(BarColor::Blue).with_rainbow());
        let s = score_one(tile, &ScoringConfig::default());
        assert!(approx(s.sv_total, 2.0));
        assert!(approx(s.sv_by_category[CAT_RAINBOW], 1.0));
        assert!(approx(s.sv_by_category[CAT_BLUE_GREEN], 1.0));
    }

    #[test]
    fn test_rainbow_combo_applies_once() {
        let tile = TrainingTile::new(1, 0).with_supports([
            SupportCard::standard(BarColor::Orange).with_rainbow(),
            SupportCard::standard(BarColor::Yellow).with_rainbow(),
            SupportCard::standard(BarColor::Unknown).maxed().with_rainbow(),
        ]);
        let s = score_one(tile, &ScoringConfig::default());
        // 3 rainbows + one flat combo
        assert!(approx(s.sv_total, 3.5));
        assert!(approx(s.sv_by_category[CAT_RAINBOW_COMBO], 0.5));
        assert_eq!(s.risk_limit_pct, 30);
    }

    #[test]
    fn test_blue_hint_is_tile_capped() {
        let tile = TrainingTile::new(0, 10).with_supports([
            SupportCard::standard(BarColor::Blue).with_hint(),
            SupportCard::standard(BarColor::Blue).with_hint(),
        ]);
        let s = score_one(tile, &ScoringConfig::default());
        assert!(approx(s.sv_total, 2.75));
        assert!(approx(s.sv_by_category[CAT_HINT_BLUE_GREEN], 0.75));
        assert_eq!(s.notes.iter().filter(|n| n.starts_with("hint on")).count(), 1);
        assert_eq!(s.risk_limit_pct, 25);
        assert!(s.greedy_hit);
    }

    #[test]
    fn test_important_hints_scale_both_groups() {
        let cfg = ScoringConfig { hint_is_important: true, ..ScoringConfig::default() };
        let tile = TrainingTile::new(2, 0).with_supports([
            SupportCard::standard(BarColor::Green).with_hint(),
            SupportCard::standard(BarColor::Orange).with_hint(),
        ]);
        let s = score_one(tile, &cfg);
        // 1.0 (green) + 0.0 (orange) + 2.25 + 2.25
        assert!(approx(s.sv_total, 5.5));
        assert_eq!(s.risk_limit_pct, 40);
    }

    #[test]
    fn test_orange_hint_default_bonus() {
        let tile = TrainingTile::new(3, 0)
            .with_support(SupportCard::standard(BarColor::Orange).with_hint());
        let s = score_one(tile, &ScoringConfig::default());
        assert!(approx(s.sv_total, 0.5));
        assert!(approx(s.sv_by_category[CAT_ORANGE_MAX], 0.0));
    }

    #[test]
    fn test_special_cards() {
        let tile = TrainingTile::new(1, 0).with_supports([
            SupportCard::reporter(),
            SupportCard::director(BarColor::Blue),
            SupportCard::director(BarColor::Green).maxed(),
        ]);
        let s = score_one(tile, &ScoringConfig::default());
        assert!(approx(s.sv_total, 0.35));
        assert_eq!(
            s.notes[..3],
            [
                "reporter: +0.10".to_string(),
                "director (blue): +0.25".to_string(),
                "director (max): +0.00".to_string(),
            ]
        );
    }

    #[test]
    fn test_director_flags_carried_to_score() {
        let yellow = score_one(
            TrainingTile::new(0, 0).with_support(SupportCard::director(BarColor::Yellow)),
            &ScoringConfig::default(),
        );
        assert_eq!(yellow.director_color, Some(BarColor::Yellow));
        assert!(!yellow.director_is_max);

        let maxed = score_one(
            TrainingTile::new(0, 0).with_support(SupportCard::director(BarColor::Blue).maxed()),
            &ScoringConfig::default(),
        );
        assert_eq!(maxed.director_color, Some(BarColor::Blue));
        assert!(maxed.director_is_max);
    }

    #[test]
    fn test_unknown_colors_recorded_not_rejected() {
        let tile = TrainingTile::new(0, 0).with_supports([
            SupportCard::standard(BarColor::Unknown),
            SupportCard::director(BarColor::Unknown),
        ]);
        let s = score_one(tile, &ScoringConfig::default());
        assert!(approx(s.sv_total, 0.0));
        assert!(s.notes.iter().any(|n| n.contains("unknown color category")));
        assert!(s.sv_by_category.contains_key(CAT_UNKNOWN));
    }

    #[test]
    fn test_note_order_matches_evaluation() {
        let tile = TrainingTile::new(0, 30).with_supports([
            SupportCard::standard(BarColor::Blue).with_hint().with_rainbow(),
            SupportCard::standard(BarColor::Green).with_rainbow(),
        ]);
        let s = score_one(tile, &ScoringConfig::default());
        assert_eq!(
            s.notes,
            vec![
                "rainbow support: +1.00",
                "support bar blue: +1.00",
                "rainbow support: +1.00",
                "support bar green: +1.00",
                "hint on blue/green support (tile-capped): +0.75",
                "rainbow combo (2 rainbows): +0.50",
                "risk: sv 5.25 -> x2.00, limit 40% (base 20%), failure 30% allowed",
                "greedy: hit (sv >= 2.50)",
            ]
        );
    }

    #[test]
    fn test_failure_above_limit_blocks_greedy() {
        let tile = TrainingTile::new(0, 26).with_supports([
            SupportCard::standard(BarColor::Blue),
            SupportCard::standard(BarColor::Blue),
            SupportCard::standard(BarColor::Orange).with_hint(),
        ]);
        let s = score_one(tile, &ScoringConfig::default());
        assert!(approx(s.sv_total, 2.5));
        assert_eq!(s.risk_limit_pct, 25);
        assert!(!s.allowed_by_risk);
        assert!(!s.greedy_hit);
    }

    #[test]
    fn test_tile_outside_layout_has_no_stat() {
        let s = score_one(TrainingTile::new(7, 0), &ScoringConfig::default());
        assert_eq!(s.stat, None);
        assert!(s.allowed_by_risk);
    }
}
