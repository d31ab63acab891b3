// 턴 결정 JSON API
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::config::BotConfig;
use crate::engine::{TrainingEngine, TurnReport};
use crate::error::{CoreError, Result};
use crate::training::{Decision, TileScore, TrainingTile, TurnObservation};
use crate::SCHEMA_VERSION;

/// 턴 요청 - 스캐너/호출자에서 전송
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct TurnRequest {
    pub schema_version: u8,
    /// Omitted: the preset from `UMABOT_PROFILE`
    #[serde(default)]
    pub config: Option<BotConfig>,
    pub tiles: Vec<TrainingTile>,
    #[serde(default)]
    pub observation: TurnObservation,
}

/// 턴 응답
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct TurnResponse {
    pub schema_version: u8,
    pub scores: Vec<TileScore>,
    pub decision: Decision,
}

impl From<TurnReport> for TurnResponse {
    fn from(report: TurnReport) -> Self {
        Self { schema_version: SCHEMA_VERSION, scores: report.scores, decision: report.decision }
    }
}

impl TurnRequest {
    pub fn engine(&self) -> Result<TrainingEngine> {
        match &self.config {
            Some(config) => TrainingEngine::new(config.clone()),
            None => Ok(TrainingEngine::from_env()),
        }
    }

    pub fn run(self) -> Result<TurnResponse> {
        if self.schema_version != SCHEMA_VERSION {
            return Err(CoreError::SchemaVersion {
                found: self.schema_version,
                expected: SCHEMA_VERSION,
            });
        }
        let engine = self.engine()?;
        Ok(engine.evaluate(&self.tiles, self.observation).into())
    }
}

/// 메인 엔트리 포인트 - JSON 요청을 처리하고 JSON 응답 반환
pub fn decide_turn_json(request_json: &str) -> Result<String> {
    let request: TurnRequest = serde_json::from_str(request_json)?;
    let response = request.run()?;
    Ok(serde_json::to_string(&response)?)
}

/// JSON schema of [`TurnRequest`].
pub fn request_schema() -> schemars::schema::RootSchema {
    schemars::schema_for!(TurnRequest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request() -> serde_json::Value {
        json!({
            "schema_version": 1,
            "config": {},
            "tiles": [
                {"tile_idx": 0, "failure_pct": 5, "supports": [{"bar_color": "blue"}, {"bar_color": "green"}]},
                {"tile_idx": 1, "failure_pct": 5, "supports": [{"kind": "reporter"}]},
                {"tile_idx": 2, "failure_pct": 5},
                {"tile_idx": 3, "failure_pct": 5},
                {"tile_idx": 4, "failure_pct": 5, "supports": [{"bar_color": "orange", "has_hint": true}]}
            ],
            "observation": {
                "mood": "GREAT",
                "career_date": {"year_code": 2, "month": 4, "half": 1},
                "energy_pct": 75,
                "turns_left": 40
            }
        })
    }

    #[test]
    fn test_decide_turn_json() {
        let out = decide_turn_json(&request().to_string()).unwrap();
        let v: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(v["schema_version"], 1);
        assert_eq!(v["scores"].as_array().map(Vec::len), Some(5));
        assert_eq!(v["decision"]["action"]["kind"], "TRAIN");
        assert_eq!(v["decision"]["action"]["tile_idx"], 0);
        assert_eq!(v["decision"]["rule"], "strong");
    }

    #[test]
    fn test_rejects_wrong_schema_version() {
        let mut req = request();
        req["schema_version"] = json!(7);
        let err = decide_turn_json(&req.to_string()).unwrap_err();
        assert!(matches!(err, CoreError::SchemaVersion { found: 7, expected: 1 }));
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(decide_turn_json("{not json"), Err(CoreError::Json(_))));
    }

    #[test]
    fn test_invalid_config_is_reported() {
        let mut req = request();
        req["config"] = json!({"scoring": {"max_failure": 250}});
        assert!(matches!(
            decide_turn_json(&req.to_string()),
            Err(CoreError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_request_schema_lists_fields() {
        let schema = serde_json::to_value(request_schema()).unwrap();
        let props = &schema["properties"];
        assert!(props["tiles"].is_object());
        assert!(props["observation"].is_object());
        assert!(props["schema_version"].is_object());
    }
}
