//! Threat advisory catalog
//!
//! Seeded at startup with well-known threat families; admins may publish
//! more at runtime.

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use types::advisory::{AdvisoryCategory, NewAdvisory, ThreatAdvisory};
use types::ids::AdvisoryId;
use types::risk::Severity;

/// Optional list filters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AdvisoryFilter {
    pub severity: Option<Severity>,
    pub category: Option<AdvisoryCategory>,
}

impl AdvisoryFilter {
    fn matches(&self, advisory: &ThreatAdvisory) -> bool {
        advisory.is_active
            && self.severity.is_none_or(|s| advisory.severity == s)
            && self.category.is_none_or(|c| advisory.category == c)
    }
}

#[derive(Debug, Default)]
pub struct AdvisoryCatalog {
    advisories: DashMap<AdvisoryId, ThreatAdvisory>,
}

impl AdvisoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog holding the built-in advisories, all reported at `now`
    pub fn seeded(now: DateTime<Utc>) -> Self {
        let catalog = Self::new();
        for new in seed_advisories() {
            if let Ok(advisory) = ThreatAdvisory::publish(new, now) {
                catalog.insert(advisory);
            }
        }
        catalog
    }

    pub fn insert(&self, advisory: ThreatAdvisory) {
        self.advisories.insert(advisory.id, advisory);
    }

    pub fn get(&self, id: &AdvisoryId) -> Option<ThreatAdvisory> {
        self.advisories.get(id).map(|entry| entry.value().clone())
    }

    /// Active advisories matching `filter`, most severe first, then newest
    pub fn list(&self, filter: &AdvisoryFilter) -> Vec<ThreatAdvisory> {
        let mut out: Vec<ThreatAdvisory> = self
            .advisories
            .iter()
            .filter(|entry| filter.matches(entry.value()))
            .map(|entry| entry.value().clone())
            .collect();
        out.sort_by(|a, b| {
            b.severity
                .cmp(&a.severity)
                .then(b.reported_at.cmp(&a.reported_at))
                .then(a.title.cmp(&b.title))
        });
        out
    }

    pub fn len(&self) -> usize {
        self.advisories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.advisories.is_empty()
    }
}

fn seed(
    title: &str,
    description: &str,
    severity: Severity,
    category: AdvisoryCategory,
    affected: &[&str],
    mitigation: &str,
) -> NewAdvisory {
    NewAdvisory {
        title: title.to_string(),
        description: description.to_string(),
        severity,
        category,
        affected_systems: affected.iter().map(|s| s.to_string()).collect(),
        mitigation: Some(mitigation.to_string()),
    }
}

fn seed_advisories() -> Vec<NewAdvisory> {
    vec![
        seed(
            "WannaCry ransomware",
            "Ransomware that encrypts files and demands payment in Bitcoin.",
            Severity::Critical,
            AdvisoryCategory::Ransomware,
            &["Windows", "Servers"],
            "Keep systems patched, back up regularly, do not open suspicious attachments.",
        ),
        seed(
            "Email phishing",
            "Fraudulent emails trying to steal access credentials.",
            Severity::High,
            AdvisoryCategory::Phishing,
            &["Email", "Webmail"],
            "Employee training, spam filters, multi-factor authentication.",
        ),
        seed(
            "DDoS attack",
            "Servers overloaded with malicious traffic.",
            Severity::High,
            AdvisoryCategory::DDoS,
            &["Web servers", "APIs"],
            "CDN, web application firewall, traffic monitoring.",
        ),
        seed(
            "SQL injection",
            "Malicious SQL inserted through web forms.",
            Severity::Critical,
            AdvisoryCategory::SqlInjection,
            &["Databases", "Web applications"],
            "Input validation, prepared statements, WAF.",
        ),
        seed(
            "Trojan malware",
            "Malicious software disguised as a legitimate program.",
            Severity::High,
            AdvisoryCategory::Malware,
            &["Desktops", "Laptops"],
            "Up-to-date antivirus, no downloads from untrusted sources.",
        ),
        seed(
            "Social engineering",
            "Psychological manipulation to obtain confidential information.",
            Severity::Medium,
            AdvisoryCategory::SocialEngineering,
            &["Users"],
            "Ongoing training and clear security policies.",
        ),
        seed(
            "Data leak",
            "Unauthorized exposure of sensitive data.",
            Severity::Critical,
            AdvisoryCategory::DataLeak,
            &["Databases", "Servers"],
            "Encryption, access control, log monitoring.",
        ),
        seed(
            "Cross-site scripting (XSS)",
            "Malicious scripts injected into web pages.",
            Severity::Medium,
            AdvisoryCategory::Xss,
            &["Web applications"],
            "Input sanitization, Content Security Policy.",
        ),
    ]
}
