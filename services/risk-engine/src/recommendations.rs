//! Recommendation generation
//!
//! One action per absent tracked control, plus a generic review action
//! when the security score is below the review threshold. The output
//! never repeats an action string.

use std::collections::HashSet;

use types::control::{Control, Controls};
use types::risk::{Recommendation, RiskScore, Severity};

/// Security score below which the generic action is emitted
pub const DEFAULT_REVIEW_THRESHOLD: u8 = 80;

/// Generic action emitted when the security score is low
pub const REVIEW_CONTROLS_ACTION: &str = "Implement the missing security controls immediately";

/// Remediation action and priority for an absent control
pub fn remediation(control: Control) -> (Severity, &'static str) {
    match control {
        Control::Firewall => (Severity::High, "Install and configure a corporate firewall"),
        Control::Antivirus => (Severity::High, "Deploy an antivirus solution on all devices"),
        Control::Backup => (
            Severity::Critical,
            "Establish a regular backup policy (3-2-1 rule)",
        ),
        Control::Training => (Severity::Medium, "Run security awareness training for employees"),
        Control::IncidentResponse => (Severity::High, "Create an incident response plan"),
        Control::AccessControl => (Severity::High, "Establish role-based access controls"),
        Control::Encryption => (Severity::High, "Encrypt sensitive data"),
        Control::Monitoring => (Severity::Medium, "Set up continuous security monitoring"),
        Control::UpdatePolicy => (Severity::Medium, "Adopt a patch and update policy"),
        Control::PasswordPolicy => (Severity::Medium, "Enforce a strong password policy"),
        Control::TwoFactorAuth => (Severity::High, "Enable two-factor authentication (2FA)"),
        Control::SecurityAudit => (Severity::Low, "Run periodic security audits"),
    }
}

/// Recommendations for absent controls in `tracked`
///
/// The review action comes first when `security_score < review_threshold`.
pub fn generate_recommendations(
    controls: &Controls,
    tracked: &[Control],
    security_score: RiskScore,
    review_threshold: u8,
) -> Vec<Recommendation> {
    let mut out = Vec::new();

    if security_score.value() < review_threshold {
        out.push(Recommendation {
            priority: Severity::High,
            action: REVIEW_CONTROLS_ACTION.to_string(),
            control: None,
        });
    }

    out.extend(controls.absent_in(tracked).map(|control| {
        let (priority, action) = remediation(control);
        Recommendation {
            priority,
            action: action.to_string(),
            control: Some(control),
        }
    }));

    dedup_actions(out)
}

/// Drop later recommendations whose action repeats an earlier one
pub fn dedup_actions(recommendations: Vec<Recommendation>) -> Vec<Recommendation> {
    let mut seen = HashSet::new();
    recommendations
        .into_iter()
        .filter(|r| seen.insert(r.action.clone()))
        .collect()
}
