//! Vulnerability detection
//!
//! Every absent tracked control maps to one named weak area.

use types::control::{Control, Controls};
use types::risk::{Severity, Vulnerability};

/// Static description of the weak area opened by an absent control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeakArea {
    pub area: &'static str,
    pub severity: Severity,
    pub description: &'static str,
}

/// Weak area for `control`
///
/// | Control          | Area                   | Severity |
/// |------------------|------------------------|----------|
/// | firewall         | Network Perimeter      | High     |
/// | antivirus        | Endpoint Protection    | High     |
/// | backup           | Business Continuity    | Critical |
/// | training         | Human Factor           | Medium   |
/// | incidentResponse | Incident Handling      | High     |
/// | accessControl    | Identity and Access    | High     |
/// | encryption       | Data Protection        | High     |
/// | monitoring       | Detection              | Medium   |
/// | updatePolicy     | Patch Management       | Medium   |
/// | passwordPolicy   | Credential Hygiene     | Medium   |
/// | twoFactorAuth    | Authentication         | High     |
/// | securityAudit    | Governance             | Low      |
pub fn weak_area(control: Control) -> WeakArea {
    match control {
        Control::Firewall => WeakArea {
            area: "Network Perimeter",
            severity: Severity::High,
            description: "No corporate firewall leaves the network exposed",
        },
        Control::Antivirus => WeakArea {
            area: "Endpoint Protection",
            severity: Severity::High,
            description: "Devices without antivirus can run malicious software undetected",
        },
        Control::Backup => WeakArea {
            area: "Business Continuity",
            severity: Severity::Critical,
            description: "Without regular backups, data is at risk",
        },
        Control::Training => WeakArea {
            area: "Human Factor",
            severity: Severity::Medium,
            description: "Lack of training increases social engineering risk",
        },
        Control::IncidentResponse => WeakArea {
            area: "Incident Handling",
            severity: Severity::High,
            description: "No response plan delays containment of an incident",
        },
        Control::AccessControl => WeakArea {
            area: "Identity and Access",
            severity: Severity::High,
            description: "Unrestricted access lets any account reach sensitive systems",
        },
        Control::Encryption => WeakArea {
            area: "Data Protection",
            severity: Severity::High,
            description: "Unencrypted sensitive data is readable if leaked",
        },
        Control::Monitoring => WeakArea {
            area: "Detection",
            severity: Severity::Medium,
            description: "Without monitoring, intrusions go unnoticed",
        },
        Control::UpdatePolicy => WeakArea {
            area: "Patch Management",
            severity: Severity::Medium,
            description: "Unpatched systems keep known vulnerabilities open",
        },
        Control::PasswordPolicy => WeakArea {
            area: "Credential Hygiene",
            severity: Severity::Medium,
            description: "Weak passwords are easy to guess or reuse",
        },
        Control::TwoFactorAuth => WeakArea {
            area: "Authentication",
            severity: Severity::High,
            description: "A single stolen password is enough to take over an account",
        },
        Control::SecurityAudit => WeakArea {
            area: "Governance",
            severity: Severity::Low,
            description: "Without periodic audits, control gaps are not found",
        },
    }
}

/// One vulnerability per absent control in `tracked`, in tracked order
pub fn detect_vulnerabilities(controls: &Controls, tracked: &[Control]) -> Vec<Vulnerability> {
    controls
        .absent_in(tracked)
        .map(|control| {
            let weak = weak_area(control);
            Vulnerability {
                control,
                area: weak.area.to_string(),
                severity: weak.severity,
                description: weak.description.to_string(),
            }
        })
        .collect()
}
