//! Aggregate statistics over a user's assessment history

use crate::assessment::Assessment;
use crate::risk::RiskLevel;
use serde::{Deserialize, Serialize};

/// Count of assessments per risk tier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RiskLevelCounts {
    pub low: usize,
    pub medium: usize,
    pub high: usize,
    pub critical: usize,
}

impl RiskLevelCounts {
    pub fn record(&mut self, level: RiskLevel) {
        match level {
            RiskLevel::Low => self.low += 1,
            RiskLevel::Medium => self.medium += 1,
            RiskLevel::High => self.high += 1,
            RiskLevel::Critical => self.critical += 1,
        }
    }

    pub fn get(&self, level: RiskLevel) -> usize {
        match level {
            RiskLevel::Low => self.low,
            RiskLevel::Medium => self.medium,
            RiskLevel::High => self.high,
            RiskLevel::Critical => self.critical,
        }
    }
}

/// Summary returned by the stats endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentStats {
    pub total: usize,
    pub by_risk_level: RiskLevelCounts,
    /// Mean badness score rounded half up; 0 when there are no assessments
    pub average_score: u8,
    pub latest: Option<Assessment>,
}

impl AssessmentStats {
    pub fn from_assessments(assessments: &[Assessment]) -> Self {
        let mut by_risk_level = RiskLevelCounts::default();
        let mut sum: u32 = 0;
        for assessment in assessments {
            by_risk_level.record(assessment.result.risk_level);
            sum += u32::from(assessment.result.score.value());
        }

        let total = assessments.len();
        let average_score = if total == 0 {
            0
        } else {
            let total = total as u32;
            // Integer half-up rounding of sum / total
            ((2 * sum + total) / (2 * total)) as u8
        };

        let latest = assessments
            .iter()
            .max_by_key(|a| (a.created_at, a.id))
            .cloned();

        Self {
            total,
            by_risk_level,
            average_score,
            latest,
        }
    }
}
