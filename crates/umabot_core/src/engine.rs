//! Training Engine
//!
//! 스코어러 + 정책을 한 번에 실행하는 퍼사드.
//!
//! ```text
//! TrainingTile[] ─► SupportValueScorer ─► TileScore[] ─┐
//! TurnObservation + CareerSettings ─► SessionContext ──┴─► DecisionPolicy ─► Decision
//! ```
//!
//! The engine owns one validated [`BotConfig`] and is otherwise stateless:
//! every call to [`TrainingEngine::evaluate`] is a pure function of its inputs.

use serde::{Deserialize, Serialize};

use crate::config::BotConfig;
use crate::error::Result;
use crate::policy::DecisionPolicy;
use crate::scoring::SupportValueScorer;
use crate::training::{Decision, SessionContext, TileScore, TrainingTile, TurnObservation};

/// Scores plus the decision for one turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct TurnReport {
    pub scores: Vec<TileScore>,
    pub decision: Decision,
}

#[derive(Debug, Clone)]
pub struct TrainingEngine {
    config: BotConfig,
}

impl Default for TrainingEngine {
    fn default() -> Self {
        Self { config: BotConfig::default() }
    }
}

impl TrainingEngine {
    /// Validates `config` once up front.
    pub fn new(config: BotConfig) -> Result<Self> {
        Ok(Self { config: config.validated()? })
    }

    /// Engine for the preset named by `UMABOT_PROFILE`.
    pub fn from_env() -> Self {
        Self { config: BotConfig::from_env_or_default() }
    }

    pub fn config(&self) -> &BotConfig {
        &self.config
    }

    pub fn score(&self, tiles: &[TrainingTile]) -> Vec<TileScore> {
        SupportValueScorer::new(&self.config.scoring, &self.config.layout).score_all(tiles)
    }

    pub fn context(&self, observation: TurnObservation) -> SessionContext {
        SessionContext::from_observation(observation, &self.config)
    }

    pub fn decide(&self, scores: &[TileScore], ctx: &SessionContext) -> Decision {
        DecisionPolicy::new(&self.config.policy).decide(scores, ctx)
    }

    /// Score the tiles and run the policy.
    pub fn evaluate(&self, tiles: &[TrainingTile], observation: TurnObservation) -> TurnReport {
        let scores = self.score(tiles);
        let ctx = self.context(observation);
        log::debug!(
            "evaluating {} tiles at {} (energy {:?}, mood {})",
            scores.len(),
            ctx.career_date,
            ctx.energy_pct,
            ctx.mood
        );
        let decision = self.decide(&scores, &ctx);
        TurnReport { scores, decision }
    }
}
