use crate::catalog::AdvisoryFilter;
use crate::error::AppError;
use crate::store::{DEFAULT_PAGE_LIMIT, ListQuery, MAX_PAGE_LIMIT, Page, SortKey};
use risk_engine::normalizer::SubmissionForm;
use serde::{Deserialize, Serialize};
use types::assessment::{Assessment, AssessmentInput};
use types::advisory::AdvisoryCategory;
use types::risk::{AssessmentResult, ScoringPolicy, Severity};

/// Body of create, update and preview requests
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AssessmentRequest {
    #[serde(flatten)]
    pub form: SubmissionForm,
    /// Falls back to the configured default policy (create, preview) or the
    /// stored policy (update)
    #[serde(default)]
    pub policy: Option<ScoringPolicy>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListParams {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub sort: Option<String>,
}

impl ListParams {
    pub fn into_query(self) -> Result<ListQuery, AppError> {
        let page = self.page.unwrap_or(1);
        if page == 0 {
            return Err(AppError::BadRequest("page must be at least 1".into()));
        }
        let limit = self.limit.unwrap_or(DEFAULT_PAGE_LIMIT);
        if !(1..=MAX_PAGE_LIMIT).contains(&limit) {
            return Err(AppError::BadRequest(format!(
                "limit must be between 1 and {MAX_PAGE_LIMIT}"
            )));
        }
        let sort = match self.sort.as_deref() {
            Some(raw) => raw.parse::<SortKey>().map_err(AppError::BadRequest)?,
            None => SortKey::default(),
        };
        Ok(ListQuery { page, limit, sort })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AssessmentPage {
    pub data: Vec<Assessment>,
    pub total: usize,
    pub page: u32,
    pub pages: u32,
}

impl From<Page<Assessment>> for AssessmentPage {
    fn from(page: Page<Assessment>) -> Self {
        Self {
            data: page.items,
            total: page.total,
            page: page.page,
            pages: page.pages,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PreviewResponse {
    pub input: AssessmentInput,
    pub result: AssessmentResult,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdvisoryParams {
    pub severity: Option<String>,
    pub category: Option<String>,
}

impl AdvisoryParams {
    pub fn into_filter(self) -> Result<AdvisoryFilter, AppError> {
        let severity = self
            .severity
            .map(|s| s.parse::<Severity>())
            .transpose()
            .map_err(AppError::BadRequest)?;
        let category = self
            .category
            .map(|c| c.parse::<AdvisoryCategory>())
            .transpose()
            .map_err(AppError::BadRequest)?;
        Ok(AdvisoryFilter { severity, category })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::control::Control;

    #[test]
    fn test_list_params_defaults() {
        let query = ListParams::default().into_query().unwrap();
        assert_eq!(query, ListQuery::default());
    }

    #[test]
    fn test_list_params_bounds() {
        let zero_page = ListParams { page: Some(0), ..ListParams::default() };
        assert!(zero_page.into_query().is_err());
        let big = ListParams { limit: Some(101), ..ListParams::default() };
        assert!(big.into_query().is_err());
        let bad_sort = ListParams { sort: Some("riskLevel".into()), ..ListParams::default() };
        assert!(bad_sort.into_query().is_err());
    }

    #[test]
    fn test_request_flattens_form() {
        let req: AssessmentRequest = serde_json::from_str(
            r#"{
                "companyName": "Acme",
                "sector": "Finance",
                "employeeCount": "11-50",
                "controls": { "firewall": true, "backup": false },
                "policy": "weightedPenalty"
            }"#,
        )
        .unwrap();
        assert_eq!(req.policy, Some(ScoringPolicy::WeightedPenalty));
        assert_eq!(req.form.company_name.as_deref(), Some("Acme"));
        assert_eq!(req.form.controls.get(&Control::Firewall), Some(&true));
    }

    #[test]
    fn test_advisory_params() {
        let filter = AdvisoryParams {
            severity: Some("critical".into()),
            category: Some("ddos".into()),
        }
        .into_filter()
        .unwrap();
        assert_eq!(filter.severity, Some(Severity::Critical));
        assert_eq!(filter.category, Some(AdvisoryCategory::DDoS));

        let bad = AdvisoryParams { severity: Some("extreme".into()), category: None };
        assert!(bad.into_filter().is_err());
    }
}
