//! Career calendar.
//!
//! Year codes: 0 = pre-debut, 1 = junior, 2 = classic, 3 = senior,
//! 4 = final season. Years 1..3 have 24 half-month turns each.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const YEAR_PRE_DEBUT: u8 = 0;
pub const YEAR_JUNIOR: u8 = 1;
pub const YEAR_CLASSIC: u8 = 2;
pub const YEAR_SENIOR: u8 = 3;
pub const YEAR_FINAL: u8 = 4;

const TURNS_PER_YEAR: i32 = 24;
const SUMMER_MONTHS: [u8; 2] = [7, 8];

/// Date shown on the career screen. Month and half are absent when OCR missed
/// them or the phase has no calendar (pre-debut, final season).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
pub struct CareerDate {
    pub year_code: u8,
    #[serde(default)]
    pub month: Option<u8>,
    /// 1 = early, 2 = late
    #[serde(default)]
    pub half: Option<u8>,
}

impl CareerDate {
    pub fn new(year_code: u8, month: u8, half: u8) -> Self {
        Self { year_code, month: Some(month), half: Some(half) }
    }

    pub fn year_only(year_code: u8) -> Self {
        Self { year_code, month: None, half: None }
    }

    pub fn is_pre_debut(&self) -> bool {
        self.year_code == YEAR_PRE_DEBUT
    }

    pub fn is_junior(&self) -> bool {
        self.year_code == YEAR_JUNIOR
    }

    pub fn is_final_season(&self) -> bool {
        self.year_code >= YEAR_FINAL
    }

    /// Absolute half-month turn, only defined for years 1..3 with a full date.
    pub fn turn_index(&self) -> Option<i32> {
        if !(YEAR_JUNIOR..=YEAR_SENIOR).contains(&self.year_code) {
            return None;
        }
        let month = self.month.filter(|m| (1..=12).contains(m))?;
        let half = self.half.filter(|h| (1..=2).contains(h))?;
        Some(
            (self.year_code as i32 - 1) * TURNS_PER_YEAR
                + (month as i32 - 1) * 2
                + (half as i32 - 1),
        )
    }

    /// Signed turn distance to `other` (positive when `other` is later).
    pub fn turns_until(&self, other: &CareerDate) -> Option<i32> {
        Some(other.turn_index()? - self.turn_index()?)
    }

    /// Summer camp: July and August of classic and senior years.
    pub fn is_summer(&self) -> bool {
        matches!(self.year_code, YEAR_CLASSIC | YEAR_SENIOR)
            && self.month.is_some_and(|m| SUMMER_MONTHS.contains(&m))
    }

    /// Turns until this year's summer camp opens, `None` when no camp is ahead
    /// in the current year or the date is incomplete.
    pub fn turns_until_summer(&self) -> Option<i32> {
        if !matches!(self.year_code, YEAR_CLASSIC | YEAR_SENIOR) {
            return None;
        }
        let start = CareerDate::new(self.year_code, SUMMER_MONTHS[0], 1);
        self.turns_until(&start).filter(|d| *d > 0)
    }

    pub fn in_months(&self, first: u8, last: u8) -> bool {
        self.month.is_some_and(|m| (first..=last).contains(&m))
    }
}

impl fmt::Display for CareerDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let phase = match self.year_code {
            YEAR_PRE_DEBUT => "pre-debut",
            YEAR_JUNIOR => "junior",
            YEAR_CLASSIC => "classic",
            YEAR_SENIOR => "senior",
            _ => "final",
        };
        match (self.month, self.half) {
            (Some(m), Some(1)) => write!(f, "{phase} {m:02}/early"),
            (Some(m), Some(_)) => write!(f, "{phase} {m:02}/late"),
            (Some(m), None) => write!(f, "{phase} {m:02}"),
            _ => f.write_str(phase),
        }
    }
}
