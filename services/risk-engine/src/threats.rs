//! Threat estimation
//!
//! Each catalog threat has one mitigating control. Its probability drops
//! when that control is present; impact is fixed per threat.

use types::control::{Control, Controls};
use types::risk::{Threat, ThreatType};

/// Static profile of one catalog threat
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThreatProfile {
    pub threat_type: ThreatType,
    pub mitigated_by: Control,
    /// Probability when the mitigating control is present
    pub probability_mitigated: u8,
    /// Probability when it is absent
    pub probability_exposed: u8,
    pub impact: u8,
}

impl ThreatProfile {
    pub fn estimate(&self, controls: &Controls) -> Threat {
        let probability = if controls.is_present(self.mitigated_by) {
            self.probability_mitigated
        } else {
            self.probability_exposed
        };
        Threat {
            threat_type: self.threat_type,
            probability,
            impact: self.impact,
        }
    }
}

/// Threat catalog in canonical order
///
/// | Threat     | Mitigated by | Present | Absent | Impact |
/// |------------|--------------|---------|--------|--------|
/// | Ransomware | backup       | 30      | 70     | 90     |
/// | Phishing   | training     | 40      | 80     | 70     |
/// | Malware    | antivirus    | 25      | 75     | 80     |
/// | DDoS       | firewall     | 30      | 60     | 60     |
/// | Data Leak  | encryption   | 20      | 70     | 95     |
pub const THREAT_CATALOG: [ThreatProfile; 5] = [
    ThreatProfile {
        threat_type: ThreatType::Ransomware,
        mitigated_by: Control::Backup,
        probability_mitigated: 30,
        probability_exposed: 70,
        impact: 90,
    },
    ThreatProfile {
        threat_type: ThreatType::Phishing,
        mitigated_by: Control::Training,
        probability_mitigated: 40,
        probability_exposed: 80,
        impact: 70,
    },
    ThreatProfile {
        threat_type: ThreatType::Malware,
        mitigated_by: Control::Antivirus,
        probability_mitigated: 25,
        probability_exposed: 75,
        impact: 80,
    },
    ThreatProfile {
        threat_type: ThreatType::DDoS,
        mitigated_by: Control::Firewall,
        probability_mitigated: 30,
        probability_exposed: 60,
        impact: 60,
    },
    ThreatProfile {
        threat_type: ThreatType::DataLeak,
        mitigated_by: Control::Encryption,
        probability_mitigated: 20,
        probability_exposed: 70,
        impact: 95,
    },
];

/// One threat per catalog entry, in catalog order
pub fn estimate_threats(controls: &Controls) -> Vec<Threat> {
    THREAT_CATALOG.iter().map(|p| p.estimate(controls)).collect()
}

/// First `n` threats by `probability × impact`, highest first
///
/// Ties keep their input order.
pub fn top_threats(threats: &[Threat], n: usize) -> Vec<Threat> {
    let mut ranked = threats.to_vec();
    ranked.sort_by(|a, b| b.exposure().cmp(&a.exposure()));
    ranked.truncate(n);
    ranked
}
