//! Risk Engine: orchestrator
//!
//! Runs normalizer → scoring → classifier → {threats, vulnerabilities,
//! recommendations} and builds alert events for stored assessments.

use types::assessment::{Assessment, AssessmentInput};
use types::errors::ScoringError;
use types::risk::{AssessmentResult, RiskScore, ScoringPolicy};

use crate::classifier;
use crate::events::{self, AssessmentEvent};
use crate::normalizer::Normalize;
use crate::recommendations;
use crate::scoring;
use crate::threats;
use crate::vulnerabilities;

/// Risk engine configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RiskEngineConfig {
    /// Badness score at or above which a high-risk event is emitted
    pub alert_threshold: RiskScore,
    /// Security score below which the generic review action is recommended
    pub review_threshold: u8,
}

impl Default for RiskEngineConfig {
    fn default() -> Self {
        Self {
            alert_threshold: RiskScore::saturating(70),
            review_threshold: recommendations::DEFAULT_REVIEW_THRESHOLD,
        }
    }
}

/// Risk engine service
#[derive(Debug, Clone, Default)]
pub struct RiskEngine {
    config: RiskEngineConfig,
}

impl RiskEngine {
    /// Create a new risk engine with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new risk engine with custom configuration
    pub fn with_config(config: RiskEngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RiskEngineConfig {
        &self.config
    }

    /// Score canonical input under `policy`
    pub fn assess(
        &self,
        input: &AssessmentInput,
        policy: ScoringPolicy,
    ) -> Result<AssessmentResult, ScoringError> {
        let strategy = scoring::strategy_for(policy);
        let tracked = strategy.tracked_controls();

        let score = strategy.score(input)?;
        let security_score = score.complement();
        let risk_level = classifier::classify(score);

        Ok(AssessmentResult {
            policy,
            score,
            security_score,
            risk_level,
            threats: threats::estimate_threats(&input.controls),
            vulnerabilities: vulnerabilities::detect_vulnerabilities(&input.controls, tracked),
            recommendations: recommendations::generate_recommendations(
                &input.controls,
                tracked,
                security_score,
                self.config.review_threshold,
            ),
        })
    }

    /// Normalize a raw record, then score it
    ///
    /// Nothing is scored when normalization fails.
    pub fn assess_raw(
        &self,
        raw: impl Normalize,
        policy: ScoringPolicy,
    ) -> Result<(AssessmentInput, AssessmentResult), ScoringError> {
        let input = raw.normalize()?;
        let result = self.assess(&input, policy)?;
        Ok((input, result))
    }

    /// Events to deliver for a stored assessment
    pub fn events_for(&self, assessment: &Assessment) -> Vec<AssessmentEvent> {
        events::events_for_assessment(assessment, self.config.alert_threshold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::AssessmentEventType;
    use crate::normalizer::ClientForm;
    use chrono::Utc;
    use types::assessment::{ContextLevel, EmployeeCount, Sector};
    use types::control::{Control, Controls};
    use types::ids::UserId;
    use types::risk::{RiskLevel, Severity};

    const POLICY_A_TRACKED: [Control; 8] = [
        Control::Antivirus,
        Control::Firewall,
        Control::Encryption,
        Control::Backup,
        Control::AccessControl,
        Control::UpdatePolicy,
        Control::Training,
        Control::IncidentResponse,
    ];

    fn make_input(controls: Controls, level: Option<ContextLevel>) -> AssessmentInput {
        AssessmentInput {
            company_name: "Acme".to_string(),
            sector: Sector::Technology,
            employee_count: EmployeeCount::UpTo50,
            controls,
            system_complexity: level,
            data_sensitivity: level,
        }
    }

    fn only_tracked(present: bool) -> Controls {
        POLICY_A_TRACKED
            .iter()
            .fold(Controls::default(), |c, control| c.with(*control, present))
    }

    #[test]
    fn test_all_tracked_present_is_low() {
        let engine = RiskEngine::new();
        let input = make_input(only_tracked(true), Some(ContextLevel::Medium));
        let result = engine.assess(&input, ScoringPolicy::WeightedPenalty).unwrap();
        assert_eq!(result.score.value(), 0);
        assert_eq!(result.security_score.value(), 100);
        assert_eq!(result.risk_level, RiskLevel::Low);
        assert!(result.vulnerabilities.is_empty());
        assert!(result.recommendations.is_empty());
    }

    #[test]
    fn test_all_tracked_absent_high_context_is_critical() {
        let engine = RiskEngine::new();
        let input = make_input(only_tracked(false), Some(ContextLevel::High));
        let result = engine.assess(&input, ScoringPolicy::WeightedPenalty).unwrap();
        assert_eq!(result.score.value(), 100);
        assert_eq!(result.security_score.value(), 0);
        assert_eq!(result.risk_level, RiskLevel::Critical);
        assert_eq!(result.vulnerabilities.len(), 8);
    }

    #[test]
    fn test_uniform_three_missing_is_medium() {
        let engine = RiskEngine::new();
        let controls = Controls::all_present()
            .with(Control::Backup, false)
            .with(Control::PasswordPolicy, false)
            .with(Control::SecurityAudit, false);
        let result = engine
            .assess(&make_input(controls, None), ScoringPolicy::UniformFraction)
            .unwrap();
        assert_eq!(result.score.value(), 30);
        assert_eq!(result.risk_level, RiskLevel::Medium);
        assert_eq!(result.policy, ScoringPolicy::UniformFraction);
    }

    #[test]
    fn test_missing_backup_reports_continuity_and_rule() {
        let engine = RiskEngine::new();
        let controls = only_tracked(true).with(Control::Backup, false);
        let result = engine
            .assess(&make_input(controls, Some(ContextLevel::Medium)), ScoringPolicy::WeightedPenalty)
            .unwrap();
        assert!(result
            .vulnerabilities
            .iter()
            .any(|v| v.area == "Business Continuity" && v.severity == Severity::Critical));
        let rule_count = result
            .recommendations
            .iter()
            .filter(|r| r.action.contains("3-2-1"))
            .count();
        assert_eq!(rule_count, 1);
    }

    #[test]
    fn test_invalid_sector_produces_no_result() {
        let engine = RiskEngine::new();
        let form = ClientForm {
            company_name: Some("Acme".to_string()),
            industry: Some("InvalidSector".to_string()),
            employee_count: Some("1-10".to_string()),
            ..ClientForm::default()
        };
        let err = engine.assess_raw(form, ScoringPolicy::UniformFraction).unwrap_err();
        assert_eq!(err, ScoringError::malformed("sector", "InvalidSector"));
    }

    #[test]
    fn test_weighted_requires_context() {
        let engine = RiskEngine::new();
        let err = engine
            .assess(&make_input(Controls::default(), None), ScoringPolicy::WeightedPenalty)
            .unwrap_err();
        assert_eq!(err.field(), "systemComplexity");
    }

    #[test]
    fn test_identical_input_identical_output() {
        let engine = RiskEngine::new();
        let input = make_input(
            Controls::all_present().with(Control::Firewall, false),
            Some(ContextLevel::High),
        );
        let a = engine.assess(&input, ScoringPolicy::WeightedPenalty).unwrap();
        let b = engine.assess(&input, ScoringPolicy::WeightedPenalty).unwrap();
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }

    #[test]
    fn test_events_use_configured_threshold() {
        let engine = RiskEngine::with_config(RiskEngineConfig {
            alert_threshold: RiskScore::saturating(30),
            ..RiskEngineConfig::default()
        });
        let input = make_input(
            Controls::all_present()
                .with(Control::Backup, false)
                .with(Control::PasswordPolicy, false)
                .with(Control::SecurityAudit, false),
            None,
        );
        let result = engine.assess(&input, ScoringPolicy::UniformFraction).unwrap();
        let assessment = Assessment::new(UserId::new(), input, result, Utc::now());
        let events = engine.events_for(&assessment);
        assert_eq!(events.len(), 2);
        assert!(matches!(
            events[1].event_type,
            AssessmentEventType::HighRiskDetected { .. }
        ));
    }
}
