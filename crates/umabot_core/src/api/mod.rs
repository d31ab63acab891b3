pub mod turn_json;

pub use turn_json::{decide_turn_json, request_schema, TurnRequest, TurnResponse};
