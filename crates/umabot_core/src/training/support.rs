// 서포트 카드 (스캐너가 검출한 결과)
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 서포트 카드 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum SupportKind {
    /// Regular card with a friendship bar
    #[default]
    Standard,
    /// 기자 - fixed small value
    Reporter,
    /// 감독 - value depends on the bar color
    Director,
}

/// Progress-bar color read from the card portrait.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum BarColor {
    Blue,
    Green,
    Orange,
    Yellow,
    #[default]
    Unknown,
}

impl BarColor {
    pub fn is_blue_green(&self) -> bool {
        matches!(self, BarColor::Blue | BarColor::Green)
    }

    pub fn is_orange_yellow(&self) -> bool {
        matches!(self, BarColor::Orange | BarColor::Yellow)
    }

    pub fn name(&self) -> &'static str {
        match self {
            BarColor::Blue => "blue",
            BarColor::Green => "green",
            BarColor::Orange => "orange",
            BarColor::Yellow => "yellow",
            BarColor::Unknown => "unknown",
        }
    }
}

impl fmt::Display for BarColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One helper card detected on a training tile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Default)]
pub struct SupportCard {
    #[serde(default)]
    pub kind: SupportKind,
    #[serde(default)]
    pub bar_color: BarColor,
    #[serde(default)]
    pub is_max: bool,
    #[serde(default)]
    pub has_hint: bool,
    #[serde(default)]
    pub has_rainbow: bool,
}

impl SupportCard {
    pub fn standard(bar_color: BarColor) -> Self {
        Self { kind: SupportKind::Standard, bar_color, ..Self::default() }
    }

    pub fn reporter() -> Self {
        Self { kind: SupportKind::Reporter, ..Self::default() }
    }

    pub fn director(bar_color: BarColor) -> Self {
        Self { kind: SupportKind::Director, bar_color, ..Self::default() }
    }

    pub fn with_hint(mut self) -> Self {
        self.has_hint = true;
        self
    }

    pub fn with_rainbow(mut self) -> Self {
        self.has_rainbow = true;
        self
    }

    pub fn maxed(mut self) -> Self {
        self.is_max = true;
        self
    }

    /// A max bar with an unresolved color reads as yellow.
    pub fn normalized(&self) -> Self {
        let mut card = self.clone();
        if card.is_max && card.bar_color == BarColor::Unknown {
            card.bar_color = BarColor::Yellow;
        }
        card
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_unknown_normalizes_to_yellow() {
        let card = SupportCard::standard(BarColor::Unknown).maxed().normalized();
        assert_eq!(card.bar_color, BarColor::Yellow);
    }

    #[test]
    fn test_max_with_resolved_color_is_kept() {
        let card = SupportCard::standard(BarColor::Orange).maxed().normalized();
        assert_eq!(card.bar_color, BarColor::Orange);
    }

    #[test]
    fn test_card_defaults_from_sparse_json() {
        let card: SupportCard = serde_json::from_str(r#"{"bar_color":"green"}"#).unwrap();
        assert_eq!(card.kind, SupportKind::Standard);
        assert_eq!(card.bar_color, BarColor::Green);
        assert!(!card.has_hint && !card.has_rainbow && !card.is_max);
    }
}
