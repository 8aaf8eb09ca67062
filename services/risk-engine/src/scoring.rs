//! Score calculation
//!
//! Two scoring policies are in use and they disagree for the same answers,
//! so both are kept as named strategies and the caller picks one.
//! All arithmetic is Decimal so multiplier products are exact; the final
//! score is rounded half up to an integer on the badness scale.

use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use types::assessment::{AssessmentInput, ContextLevel};
use types::control::{Control, Controls};
use types::errors::ScoringError;
use types::risk::{RiskScore, ScoringPolicy};

/// A scoring formula over canonical input
pub trait ScoringStrategy: Send + Sync {
    /// Policy tag recorded on results
    fn policy(&self) -> ScoringPolicy;

    /// Controls the formula looks at, in reporting order
    fn tracked_controls(&self) -> &'static [Control];

    /// Badness score in `[0, 100]`
    fn score(&self, input: &AssessmentInput) -> Result<RiskScore, ScoringError>;
}

/// Strategy implementing `policy`
pub fn strategy_for(policy: ScoringPolicy) -> &'static dyn ScoringStrategy {
    match policy {
        ScoringPolicy::WeightedPenalty => &WeightedPenalty,
        ScoringPolicy::UniformFraction => &UniformFraction,
    }
}

/// Round half up and clamp into `[0, 100]`
pub fn to_risk_score(raw: Decimal) -> RiskScore {
    let rounded = raw.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    if rounded <= Decimal::ZERO {
        return RiskScore::MIN;
    }
    RiskScore::saturating(rounded.to_u32().unwrap_or(u32::MAX))
}

// ── Policy A: weighted penalty with multipliers ─────────────────────────

/// Penalty for each tracked control when absent
///
/// | Control           | Penalty |
/// |-------------------|---------|
/// | antivirus         | 15      |
/// | firewall          | 15      |
/// | encryption        | 15      |
/// | backup            | 10      |
/// | accessControl     | 15      |
/// | updatePolicy      | 10      |
/// | training          | 10      |
/// | incidentResponse  | 10      |
pub const WEIGHTED_PENALTIES: [(Control, u32); 8] = [
    (Control::Antivirus, 15),
    (Control::Firewall, 15),
    (Control::Encryption, 15),
    (Control::Backup, 10),
    (Control::AccessControl, 15),
    (Control::UpdatePolicy, 10),
    (Control::Training, 10),
    (Control::IncidentResponse, 10),
];

const WEIGHTED_TRACKED: [Control; 8] = [
    Control::Antivirus,
    Control::Firewall,
    Control::Encryption,
    Control::Backup,
    Control::AccessControl,
    Control::UpdatePolicy,
    Control::Training,
    Control::IncidentResponse,
];

/// Sum of penalties for absent tracked controls (0..=100)
pub fn penalty_base(controls: &Controls) -> u32 {
    WEIGHTED_PENALTIES
        .iter()
        .filter(|(control, _)| !controls.is_present(*control))
        .map(|(_, penalty)| penalty)
        .sum()
}

/// low 0.7, medium 1.0, high 1.3
pub fn complexity_multiplier(level: ContextLevel) -> Decimal {
    match level {
        ContextLevel::Low => Decimal::new(7, 1),
        ContextLevel::Medium => Decimal::ONE,
        ContextLevel::High => Decimal::new(13, 1),
    }
}

/// low 0.8, medium 1.0, high 1.5
pub fn sensitivity_multiplier(level: ContextLevel) -> Decimal {
    match level {
        ContextLevel::Low => Decimal::new(8, 1),
        ContextLevel::Medium => Decimal::ONE,
        ContextLevel::High => Decimal::new(15, 1),
    }
}

/// Unrounded weighted risk: `min(100, base × complexity × sensitivity)`
pub fn weighted_risk(controls: &Controls, complexity: ContextLevel, sensitivity: ContextLevel) -> Decimal {
    let raw = Decimal::from(penalty_base(controls))
        * complexity_multiplier(complexity)
        * sensitivity_multiplier(sensitivity);
    raw.min(Decimal::ONE_HUNDRED)
}

/// Policy A: client-side weighted penalty
///
/// Requires both `systemComplexity` and `dataSensitivity`; a missing one
/// is an error rather than a guessed multiplier.
#[derive(Debug, Clone, Copy, Default)]
pub struct WeightedPenalty;

impl ScoringStrategy for WeightedPenalty {
    fn policy(&self) -> ScoringPolicy {
        ScoringPolicy::WeightedPenalty
    }

    fn tracked_controls(&self) -> &'static [Control] {
        &WEIGHTED_TRACKED
    }

    fn score(&self, input: &AssessmentInput) -> Result<RiskScore, ScoringError> {
        let complexity = input
            .system_complexity
            .ok_or(ScoringError::missing("systemComplexity"))?;
        let sensitivity = input
            .data_sensitivity
            .ok_or(ScoringError::missing("dataSensitivity"))?;

        Ok(to_risk_score(weighted_risk(&input.controls, complexity, sensitivity)))
    }
}

// ── Policy B: uniform fraction ──────────────────────────────────────────

const UNIFORM_TRACKED: [Control; 10] = [
    Control::Firewall,
    Control::Antivirus,
    Control::Backup,
    Control::Training,
    Control::IncidentResponse,
    Control::PasswordPolicy,
    Control::TwoFactorAuth,
    Control::Encryption,
    Control::AccessControl,
    Control::SecurityAudit,
];

/// `round(missing / tracked × 100)`
pub fn uniform_risk(controls: &Controls, tracked: &[Control]) -> Decimal {
    if tracked.is_empty() {
        return Decimal::ZERO;
    }
    let total = Decimal::from(tracked.len() as u64);
    let missing = Decimal::from((tracked.len() - controls.count_present(tracked)) as u64);
    missing / total * Decimal::ONE_HUNDRED
}

/// Policy B: server-side uniform fraction over ten controls
///
/// Context fields are ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformFraction;

impl ScoringStrategy for UniformFraction {
    fn policy(&self) -> ScoringPolicy {
        ScoringPolicy::UniformFraction
    }

    fn tracked_controls(&self) -> &'static [Control] {
        &UNIFORM_TRACKED
    }

    fn score(&self, input: &AssessmentInput) -> Result<RiskScore, ScoringError> {
        Ok(to_risk_score(uniform_risk(&input.controls, self.tracked_controls())))
    }
}
