//! Risk classification
//!
//! Maps a badness score onto the ordered risk tiers.

use types::risk::{RiskLevel, RiskScore};

// ── Tier thresholds ──────────────────────────────────────────────────────

/// Lower bound (inclusive) of the Critical tier
pub const CRITICAL_THRESHOLD: u8 = 70;
/// Lower bound (inclusive) of the High tier
pub const HIGH_THRESHOLD: u8 = 50;
/// Lower bound (inclusive) of the Medium tier
pub const MEDIUM_THRESHOLD: u8 = 30;

/// Classify a badness score
///
/// | Score    | Level    |
/// |----------|----------|
/// | 70..=100 | Critical |
/// | 50..=69  | High     |
/// | 30..=49  | Medium   |
/// | 0..=29   | Low      |
pub fn classify(score: RiskScore) -> RiskLevel {
    let value = score.value();
    if value >= CRITICAL_THRESHOLD {
        RiskLevel::Critical
    } else if value >= HIGH_THRESHOLD {
        RiskLevel::High
    } else if value >= MEDIUM_THRESHOLD {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

/// Classify a value on the security scale (100 = safest)
pub fn classify_security(security_score: RiskScore) -> RiskLevel {
    classify(security_score.complement())
}
