//! Assessment event definitions
//!
//! Events built from a scored assessment for notification delivery.
//! Construction is pure; delivering them is the caller's job.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use types::assessment::Assessment;
use types::ids::{AssessmentId, UserId};
use types::risk::{RiskLevel, RiskScore};
use uuid::Uuid;

/// Security score at or above which an assessment counts as good
pub const GOOD_SECURITY_SCORE: u8 = 80;
/// Security score at or above which an assessment needs attention
pub const ATTENTION_SECURITY_SCORE: u8 = 60;

/// Headline attached to a completed assessment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Verdict {
    /// securityScore >= 80
    Good,
    /// 60 <= securityScore < 80
    NeedsAttention,
    /// securityScore < 60
    Urgent,
}

impl Verdict {
    pub fn from_security_score(security_score: RiskScore) -> Self {
        let value = security_score.value();
        if value >= GOOD_SECURITY_SCORE {
            Verdict::Good
        } else if value >= ATTENTION_SECURITY_SCORE {
            Verdict::NeedsAttention
        } else {
            Verdict::Urgent
        }
    }
}

/// Event type classification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum AssessmentEventType {
    /// Emitted for every scored assessment
    AssessmentCompleted { verdict: Verdict },
    /// Score reached the alert threshold
    HighRiskDetected { threshold: RiskScore },
}

/// Event emitted after an assessment is scored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentEvent {
    pub event_id: Uuid,
    pub assessment_id: AssessmentId,
    pub owner: UserId,
    pub company_name: String,
    pub event_type: AssessmentEventType,
    pub score: RiskScore,
    pub risk_level: RiskLevel,
    pub timestamp: DateTime<Utc>,
}

impl AssessmentEvent {
    pub fn new(assessment: &Assessment, event_type: AssessmentEventType) -> Self {
        Self {
            event_id: Uuid::now_v7(),
            assessment_id: assessment.id,
            owner: assessment.owner,
            company_name: assessment.input.company_name.clone(),
            event_type,
            score: assessment.result.score,
            risk_level: assessment.result.risk_level,
            timestamp: assessment.updated_at,
        }
    }

    pub fn is_high_risk(&self) -> bool {
        matches!(self.event_type, AssessmentEventType::HighRiskDetected { .. })
    }
}

/// Events for a freshly scored assessment
///
/// Always one `AssessmentCompleted`; a `HighRiskDetected` follows when
/// `score >= alert_threshold`.
pub fn events_for_assessment(assessment: &Assessment, alert_threshold: RiskScore) -> Vec<AssessmentEvent> {
    let verdict = Verdict::from_security_score(assessment.result.security_score);
    let mut events = vec![AssessmentEvent::new(
        assessment,
        AssessmentEventType::AssessmentCompleted { verdict },
    )];

    if assessment.result.score >= alert_threshold {
        events.push(AssessmentEvent::new(
            assessment,
            AssessmentEventType::HighRiskDetected {
                threshold: alert_threshold,
            },
        ));
    }

    events
}
