//! Risk scoring result types
//!
//! Scores are integers on the badness scale (0 = safest, 100 = worst).
//! The security scale used by the questionnaire UI is its complement.

use crate::control::Control;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Integer score bounded to `[0, 100]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct RiskScore(u8);

impl RiskScore {
    pub const MIN: RiskScore = RiskScore(0);
    pub const MAX: RiskScore = RiskScore(100);

    /// Returns None when `value > 100`
    pub fn new(value: u8) -> Option<Self> {
        (value <= 100).then_some(Self(value))
    }

    /// Clamp any non-negative integer into range
    pub fn saturating(value: u32) -> Self {
        Self(value.min(100) as u8)
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    /// `100 - self`, switching between badness and security scales
    pub fn complement(&self) -> Self {
        Self(100 - self.0)
    }
}

impl TryFrom<u8> for RiskScore {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| format!("score {value} exceeds 100"))
    }
}

impl From<RiskScore> for u8 {
    fn from(score: RiskScore) -> Self {
        score.0
    }
}

impl fmt::Display for RiskScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Discrete risk tier, ordered from least to most severe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    pub const ALL: [RiskLevel; 4] = [
        RiskLevel::Low,
        RiskLevel::Medium,
        RiskLevel::High,
        RiskLevel::Critical,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
            RiskLevel::Critical => "Critical",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Severity of a weak area, also used as recommendation priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "Low",
            Severity::Medium => "Medium",
            Severity::High => "High",
            Severity::Critical => "Critical",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Severity::Low),
            "medium" => Ok(Severity::Medium),
            "high" => Ok(Severity::High),
            "critical" => Ok(Severity::Critical),
            other => Err(format!("unknown severity '{other}'")),
        }
    }
}

/// Which scoring formula produced a result
///
/// The two formulas disagree for the same answers and are kept apart so
/// that stored scores never silently change meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScoringPolicy {
    /// Weighted penalties scaled by complexity and sensitivity multipliers
    WeightedPenalty,
    /// Every missing control costs an equal share
    #[default]
    UniformFraction,
}

impl ScoringPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScoringPolicy::WeightedPenalty => "weightedPenalty",
            ScoringPolicy::UniformFraction => "uniformFraction",
        }
    }
}

impl fmt::Display for ScoringPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScoringPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['-', '_'], "").as_str() {
            "weightedpenalty" | "a" => Ok(ScoringPolicy::WeightedPenalty),
            "uniformfraction" | "b" => Ok(ScoringPolicy::UniformFraction),
            _ => Err(format!("unknown scoring policy '{s}'")),
        }
    }
}

/// Threat families in the estimator catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ThreatType {
    Ransomware,
    Phishing,
    Malware,
    #[serde(rename = "DDoS")]
    DDoS,
    #[serde(rename = "Data Leak")]
    DataLeak,
}

impl ThreatType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThreatType::Ransomware => "Ransomware",
            ThreatType::Phishing => "Phishing",
            ThreatType::Malware => "Malware",
            ThreatType::DDoS => "DDoS",
            ThreatType::DataLeak => "Data Leak",
        }
    }
}

impl fmt::Display for ThreatType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Estimated likelihood and impact of one threat, both in `[0, 100]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Threat {
    #[serde(rename = "type")]
    pub threat_type: ThreatType,
    pub probability: u8,
    pub impact: u8,
}

impl Threat {
    /// Ranking key for top-N selection
    pub fn exposure(&self) -> u16 {
        u16::from(self.probability) * u16::from(self.impact)
    }
}

/// Weak area caused by an absent control
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vulnerability {
    pub control: Control,
    pub area: String,
    pub severity: Severity,
    pub description: String,
}

/// Remediation action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub priority: Severity,
    pub action: String,
    /// Control this action remediates; None for the generic review action
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub control: Option<Control>,
}

/// Output of the scoring pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentResult {
    pub policy: ScoringPolicy,
    /// Badness scale
    pub score: RiskScore,
    /// `100 - score`
    pub security_score: RiskScore,
    pub risk_level: RiskLevel,
    pub threats: Vec<Threat>,
    pub vulnerabilities: Vec<Vulnerability>,
    pub recommendations: Vec<Recommendation>,
}
