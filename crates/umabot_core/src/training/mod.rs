// 육성 화면 데이터 모델
// 스캐너 입력 (타일/서포트) + 턴 컨텍스트 + 결정 출력

pub mod action;
pub mod calendar;
pub mod context;
pub mod mood;
pub mod support;
pub mod tile;
pub mod types;

pub use action::*;
pub use calendar::*;
pub use context::*;
pub use mood::*;
pub use support::*;
pub use tile::*;
pub use types::*;
