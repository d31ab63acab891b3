//! Decision Policy
//!
//! 5개 타일 점수 + 턴 컨텍스트 → 행동 1개.
//!
//! ## 핵심 구조
//!
//! ```text
//! TileScore[] + SessionContext → TilePools (cap / hint / guard) → CASCADE → Decision
//! ```
//!
//! The cascade is a fixed list of predicate/action pairs ([`rules::CASCADE`]).
//! The first rule that fires wins; every evaluated rule leaves one note in
//! the decision trace. The last rule always fires, so `decide` is total.

pub mod pools;
pub mod rules;
pub mod undertrain;

#[cfg(test)]
mod fixtures;

pub use pools::TilePools;
pub use rules::{rule, Rule, RuleInput, RuleOutcome, CASCADE};
pub use undertrain::{share_gaps, undertrained_focus_stats, ShareGap};

use crate::config::PolicyConfig;
use crate::training::{Action, Decision, RuleId, SessionContext, TileScore};

/// 결정 정책
#[derive(Debug, Clone, Copy)]
pub struct DecisionPolicy<'a> {
    config: &'a PolicyConfig,
}

impl<'a> DecisionPolicy<'a> {
    pub fn new(config: &'a PolicyConfig) -> Self {
        Self { config }
    }

    /// Run the cascade.
    pub fn decide(&self, scores: &[TileScore], ctx: &SessionContext) -> Decision {
        let input = RuleInput::new(scores, ctx, self.config);
        let mut notes = Vec::with_capacity(CASCADE.len());

        for rule in CASCADE.iter() {
            match (rule.eval)(&input) {
                RuleOutcome::Fire(action, note) => {
                    notes.push(format!("{}: {}", rule.id, note));
                    log::info!("decision {} via {} ({})", action, rule.id, note);
                    return Decision::new(action, rule.id, notes);
                }
                RuleOutcome::Pass(note) => {
                    log::debug!("rule {} passed: {}", rule.id, note);
                    notes.push(format!("{}: {}", rule.id, note));
                }
            }
        }

        // terminal_fallback always fires; kept so the function stays total
        Decision::new(Action::Noop, RuleId::TerminalFallback, notes)
    }

    /// Evaluate a single rule in isolation.
    pub fn evaluate(&self, id: RuleId, scores: &[TileScore], ctx: &SessionContext) -> RuleOutcome {
        let input = RuleInput::new(scores, ctx, self.config);
        (rule(id).eval)(&input)
    }
}

/// Convenience wrapper around [`DecisionPolicy::decide`].
pub fn decide(scores: &[TileScore], ctx: &SessionContext, config: &PolicyConfig) -> Decision {
    DecisionPolicy::new(config).decide(scores, ctx)
}
