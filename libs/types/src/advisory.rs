//! Threat advisory catalog entries
//!
//! Advisories are reference material shown alongside assessments. They do
//! not feed the scoring pipeline.

use crate::ids::AdvisoryId;
use crate::risk::Severity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Advisory category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AdvisoryCategory {
    Malware,
    Phishing,
    Ransomware,
    #[serde(rename = "ddos")]
    DDoS,
    SqlInjection,
    Xss,
    SocialEngineering,
    DataLeak,
    #[default]
    Other,
}

impl FromStr for AdvisoryCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['-', '_', ' '], "").as_str() {
            "malware" => Ok(AdvisoryCategory::Malware),
            "phishing" => Ok(AdvisoryCategory::Phishing),
            "ransomware" => Ok(AdvisoryCategory::Ransomware),
            "ddos" => Ok(AdvisoryCategory::DDoS),
            "sqlinjection" => Ok(AdvisoryCategory::SqlInjection),
            "xss" => Ok(AdvisoryCategory::Xss),
            "socialengineering" => Ok(AdvisoryCategory::SocialEngineering),
            "dataleak" => Ok(AdvisoryCategory::DataLeak),
            "other" => Ok(AdvisoryCategory::Other),
            _ => Err(format!("unknown advisory category '{s}'")),
        }
    }
}

/// A published threat advisory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreatAdvisory {
    pub id: AdvisoryId,
    pub title: String,
    pub description: String,
    pub severity: Severity,
    pub category: AdvisoryCategory,
    pub affected_systems: Vec<String>,
    pub mitigation: Option<String>,
    pub is_active: bool,
    pub reported_at: DateTime<Utc>,
}

/// Fields accepted when publishing a new advisory
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAdvisory {
    pub title: String,
    pub description: String,
    #[serde(default = "default_severity")]
    pub severity: Severity,
    #[serde(default)]
    pub category: AdvisoryCategory,
    #[serde(default)]
    pub affected_systems: Vec<String>,
    #[serde(default)]
    pub mitigation: Option<String>,
}

fn default_severity() -> Severity {
    Severity::Medium
}

impl ThreatAdvisory {
    /// Build an active advisory; title and description are trimmed
    pub fn publish(new: NewAdvisory, reported_at: DateTime<Utc>) -> Result<Self, &'static str> {
        let title = new.title.trim().to_string();
        let description = new.description.trim().to_string();
        if title.is_empty() {
            return Err("title");
        }
        if description.is_empty() {
            return Err("description");
        }

        Ok(Self {
            id: AdvisoryId::new(),
            title,
            description,
            severity: new.severity,
            category: new.category,
            affected_systems: new.affected_systems,
            mitigation: new.mitigation.map(|m| m.trim().to_string()).filter(|m| !m.is_empty()),
            is_active: true,
            reported_at,
        })
    }
}
