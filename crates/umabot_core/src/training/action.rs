//! Decision output: the single action chosen for this turn.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 이번 턴의 행동
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", content = "tile_idx", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    Train(usize),
    /// WIT training used as an energy-cheap "soft skip"
    TrainWit(usize),
    TrainDirector(usize),
    TakeHint(usize),
    Rest,
    Recreation,
    Race,
    Noop,
}

impl Action {
    /// Tile the executor must click, if any.
    pub fn tile_idx(&self) -> Option<usize> {
        match self {
            Action::Train(idx)
            | Action::TrainWit(idx)
            | Action::TrainDirector(idx)
            | Action::TakeHint(idx) => Some(*idx),
            Action::Rest | Action::Recreation | Action::Race | Action::Noop => None,
        }
    }

    pub fn is_training(&self) -> bool {
        self.tile_idx().is_some()
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Train(idx) => write!(f, "TRAIN({idx})"),
            Action::TrainWit(idx) => write!(f, "TRAIN_WIT({idx})"),
            Action::TrainDirector(idx) => write!(f, "TRAIN_DIRECTOR({idx})"),
            Action::TakeHint(idx) => write!(f, "TAKE_HINT({idx})"),
            Action::Rest => f.write_str("REST"),
            Action::Recreation => f.write_str("RECREATION"),
            Action::Race => f.write_str("RACE"),
            Action::Noop => f.write_str("NOOP"),
        }
    }
}

/// Cascade entries in evaluation order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum RuleId {
    Undertrain,
    Greedy,
    FinalSeason,
    MoodGate,
    SummerProximity,
    Strong,
    G1Race,
    DirectorBonus,
    WitRainbow,
    LowEnergyRest,
    WitFallback,
    Decent,
    Recreation,
    RaceGate,
    PriorityOnly,
    TerminalFallback,
}

impl RuleId {
    pub fn name(&self) -> &'static str {
        match self {
            RuleId::Undertrain => "undertrain",
            RuleId::Greedy => "greedy",
            RuleId::FinalSeason => "final_season",
            RuleId::MoodGate => "mood_gate",
            RuleId::SummerProximity => "summer_proximity",
            RuleId::Strong => "strong",
            RuleId::G1Race => "g1_race",
            RuleId::DirectorBonus => "director_bonus",
            RuleId::WitRainbow => "wit_rainbow",
            RuleId::LowEnergyRest => "low_energy_rest",
            RuleId::WitFallback => "wit_fallback",
            RuleId::Decent => "decent",
            RuleId::Recreation => "recreation",
            RuleId::RaceGate => "race_gate",
            RuleId::PriorityOnly => "priority_only",
            RuleId::TerminalFallback => "terminal_fallback",
        }
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Chosen action plus the trace of every rule that was evaluated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Decision {
    pub action: Action,
    /// Rule that fired
    pub rule: RuleId,
    /// `notes` joined for logging; not meant to be parsed
    pub reason: String,
    pub notes: Vec<String>,
}

impl Decision {
    pub fn new(action: Action, rule: RuleId, notes: Vec<String>) -> Self {
        Self { action, rule, reason: notes.join("; "), notes }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} via {}", self.action, self.rule)
    }
}
