//! Assessment input and persisted assessment record
//!
//! `AssessmentInput` is the canonical, post-normalization questionnaire.
//! Categorical fields parse from the labels used by both questionnaire
//! front ends (English names, client picker codes, server record labels).

use crate::control::Controls;
use crate::errors::ScoringError;
use crate::ids::{AssessmentId, UserId};
use crate::risk::AssessmentResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Business sector of the assessed company
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sector {
    Technology,
    Finance,
    Health,
    Education,
    Retail,
    Manufacturing,
    Government,
    Services,
    Other,
}

impl Sector {
    pub const ALL: [Sector; 9] = [
        Sector::Technology,
        Sector::Finance,
        Sector::Health,
        Sector::Education,
        Sector::Retail,
        Sector::Manufacturing,
        Sector::Government,
        Sector::Services,
        Sector::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Sector::Technology => "Technology",
            Sector::Finance => "Finance",
            Sector::Health => "Health",
            Sector::Education => "Education",
            Sector::Retail => "Retail",
            Sector::Manufacturing => "Manufacturing",
            Sector::Government => "Government",
            Sector::Services => "Services",
            Sector::Other => "Other",
        }
    }

    /// Lowercase labels accepted for this sector
    fn aliases(&self) -> &'static [&'static str] {
        match self {
            Sector::Technology => &["technology", "tecnologia"],
            Sector::Finance => &["finance", "financeiro", "finanças", "financas"],
            Sector::Health => &["health", "saude", "saúde"],
            Sector::Education => &["education", "educacao", "educação"],
            Sector::Retail => &["retail", "varejo"],
            Sector::Manufacturing => &["manufacturing", "manufatura", "indústria", "industria"],
            Sector::Government => &["government", "governo"],
            Sector::Services => &["services", "serviços", "servicos"],
            Sector::Other => &["other", "outro"],
        }
    }
}

impl fmt::Display for Sector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sector {
    type Err = ScoringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        Sector::ALL
            .into_iter()
            .find(|sector| sector.aliases().contains(&needle.as_str()))
            .ok_or_else(|| ScoringError::malformed("sector", s))
    }
}

/// Headcount bracket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EmployeeCount {
    #[serde(rename = "1-10")]
    UpTo10,
    #[serde(rename = "11-50")]
    UpTo50,
    #[serde(rename = "51-200")]
    UpTo200,
    #[serde(rename = "201-500")]
    UpTo500,
    #[serde(rename = "500+")]
    Over500,
}

impl EmployeeCount {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmployeeCount::UpTo10 => "1-10",
            EmployeeCount::UpTo50 => "11-50",
            EmployeeCount::UpTo200 => "51-200",
            EmployeeCount::UpTo500 => "201-500",
            EmployeeCount::Over500 => "500+",
        }
    }
}

impl fmt::Display for EmployeeCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EmployeeCount {
    type Err = ScoringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1-10" => Ok(EmployeeCount::UpTo10),
            "11-50" => Ok(EmployeeCount::UpTo50),
            "51-200" => Ok(EmployeeCount::UpTo200),
            "201-500" => Ok(EmployeeCount::UpTo500),
            "500+" => Ok(EmployeeCount::Over500),
            _ => Err(ScoringError::malformed("employeeCount", s)),
        }
    }
}

/// Three-step ordinal used for system complexity and data sensitivity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContextLevel {
    Low,
    Medium,
    High,
}

impl ContextLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContextLevel::Low => "low",
            ContextLevel::Medium => "medium",
            ContextLevel::High => "high",
        }
    }

    /// Parse a context level, attributing failures to `field`
    pub fn parse_field(field: &'static str, s: &str) -> Result<Self, ScoringError> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(ContextLevel::Low),
            "medium" => Ok(ContextLevel::Medium),
            "high" => Ok(ContextLevel::High),
            _ => Err(ScoringError::malformed(field, s)),
        }
    }
}

impl fmt::Display for ContextLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical questionnaire answers
///
/// Invariant: `company_name` is trimmed and non-empty. Only the normalizer
/// in the risk engine should build one from untrusted input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentInput {
    pub company_name: String,
    pub sector: Sector,
    pub employee_count: EmployeeCount,
    pub controls: Controls,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_complexity: Option<ContextLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_sensitivity: Option<ContextLevel>,
}

/// Persisted assessment: the input, its scored result, and ownership
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assessment {
    pub id: AssessmentId,
    pub owner: UserId,
    pub input: AssessmentInput,
    pub result: AssessmentResult,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Assessment {
    /// Create a new record owned by `owner`
    pub fn new(
        owner: UserId,
        input: AssessmentInput,
        result: AssessmentResult,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: AssessmentId::new(),
            owner,
            input,
            result,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Replace input and result after the pipeline re-ran
    pub fn rescore(&mut self, input: AssessmentInput, result: AssessmentResult, timestamp: DateTime<Utc>) {
        self.input = input;
        self.result = result;
        self.updated_at = timestamp;
    }

    pub fn is_owned_by(&self, user: &UserId) -> bool {
        self.owner == *user
    }
}
