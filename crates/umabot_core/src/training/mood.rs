// 컨디션(기분) - 5단계 + 미인식
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Mood as read from the career screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Mood {
    Awful,
    Bad,
    Normal,
    Good,
    Great,
    /// OCR could not resolve the label
    #[default]
    Unknown,
}

impl Mood {
    /// 1 (AWFUL) .. 5 (GREAT), -1 when unknown.
    pub fn ordinal(&self) -> i8 {
        match self {
            Mood::Awful => 1,
            Mood::Bad => 2,
            Mood::Normal => 3,
            Mood::Good => 4,
            Mood::Great => 5,
            Mood::Unknown => -1,
        }
    }

    pub fn from_ordinal(ordinal: i8) -> Self {
        match ordinal {
            1 => Mood::Awful,
            2 => Mood::Bad,
            3 => Mood::Normal,
            4 => Mood::Good,
            5 => Mood::Great,
            _ => Mood::Unknown,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Mood::Unknown)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Mood::Awful => "AWFUL",
            Mood::Bad => "BAD",
            Mood::Normal => "NORMAL",
            Mood::Good => "GOOD",
            Mood::Great => "GREAT",
            Mood::Unknown => "UNKNOWN",
        }
    }

    /// Known and strictly below `other`. Unknown mood is never "below".
    pub fn is_below(&self, other: Mood) -> bool {
        self.is_known() && other.is_known() && self.ordinal() < other.ordinal()
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.label(), self.ordinal())
    }
}

impl FromStr for Mood {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "AWFUL" => Ok(Mood::Awful),
            "BAD" => Ok(Mood::Bad),
            "NORMAL" => Ok(Mood::Normal),
            "GOOD" => Ok(Mood::Good),
            "GREAT" => Ok(Mood::Great),
            "UNKNOWN" | "" => Ok(Mood::Unknown),
            other => Err(format!("unknown mood label: {other}")),
        }
    }
}
