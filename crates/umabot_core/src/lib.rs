//! # umabot_core - Training Decision Engine
//!
//! Deterministic decision core for a career-training bot. Given the five
//! training tiles a scanner read off the screen and the turn context (date,
//! energy, mood, stat totals), it picks exactly one action.
//!
//! ## Features
//! - Support Value (SV) scorer with per-tile audit notes and a risk gate
//! - Ordered rule cascade with a priority guard and a full decision trace
//! - Pure and total: same input, same decision; no I/O during a turn
//! - JSON API and JSON schema for callers in other processes

// Struct initialization pattern used intentionally
#![allow(clippy::field_reassign_with_default)]

pub mod api;
pub mod config;
pub mod engine;
pub mod error;
pub mod policy;
pub mod scoring;
pub mod training;

// Re-export main API functions
pub use api::{decide_turn_json, request_schema, TurnRequest, TurnResponse};
pub use config::{BotConfig, CareerSettings, PolicyConfig, ScoringConfig};
pub use engine::{TrainingEngine, TurnReport};
pub use error::{CoreError, Result};
pub use policy::{decide, DecisionPolicy};
pub use scoring::{score_tiles, SupportValueScorer};
pub use training::{
    Action, BarColor, CareerDate, Decision, Mood, RuleId, SessionContext, Stat, SupportCard,
    SupportKind, TileLayout, TileScore, TrainingTile, TurnObservation,
};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const SCHEMA_VERSION: u8 = 1;
