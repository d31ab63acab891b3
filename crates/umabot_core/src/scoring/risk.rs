//! Risk gating: SV-scaled failure ceiling

use crate::config::RiskStep;

/// First matching step's multiplier, 1.0 when none match.
pub fn risk_multiplier(sv_total: f64, steps: &[RiskStep]) -> f64 {
    steps.iter().find(|step| step.matches(sv_total)).map(|step| step.multiplier).unwrap_or(1.0)
}

/// `min(100, floor(base * multiplier))`
pub fn risk_limit_pct(base: i32, multiplier: f64) -> i32 {
    let limit = (base as f64 * multiplier).floor() as i32;
    limit.clamp(0, 100)
}
