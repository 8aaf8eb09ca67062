//! Assessment storage
//!
//! `AssessmentRepository` is the persistence seam. Lookups are always
//! scoped to an owner: another user's record behaves as if it did not
//! exist.

use async_trait::async_trait;
use dashmap::DashMap;
use serde::Serialize;
use std::cmp::Ordering;
use std::str::FromStr;
use thiserror::Error;
use types::assessment::Assessment;
use types::ids::{AssessmentId, UserId};

pub const DEFAULT_PAGE_LIMIT: u32 = 10;
pub const MAX_PAGE_LIMIT: u32 = 100;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("assessment {0} not found")]
    NotFound(AssessmentId),

    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Listing order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    CreatedAtAsc,
    #[default]
    CreatedAtDesc,
    ScoreAsc,
    ScoreDesc,
    CompanyNameAsc,
    CompanyNameDesc,
}

impl SortKey {
    fn compare(&self, a: &Assessment, b: &Assessment) -> Ordering {
        let by_created = a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id));
        match self {
            SortKey::CreatedAtAsc => by_created,
            SortKey::CreatedAtDesc => by_created.reverse(),
            SortKey::ScoreAsc => a.result.score.cmp(&b.result.score).then(by_created),
            SortKey::ScoreDesc => b.result.score.cmp(&a.result.score).then(by_created.reverse()),
            SortKey::CompanyNameAsc => a
                .input
                .company_name
                .to_lowercase()
                .cmp(&b.input.company_name.to_lowercase())
                .then(by_created),
            SortKey::CompanyNameDesc => b
                .input
                .company_name
                .to_lowercase()
                .cmp(&a.input.company_name.to_lowercase())
                .then(by_created.reverse()),
        }
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "createdAt" => Ok(SortKey::CreatedAtAsc),
            "-createdAt" => Ok(SortKey::CreatedAtDesc),
            "score" => Ok(SortKey::ScoreAsc),
            "-score" => Ok(SortKey::ScoreDesc),
            "companyName" => Ok(SortKey::CompanyNameAsc),
            "-companyName" => Ok(SortKey::CompanyNameDesc),
            other => Err(format!("unsupported sort '{other}'")),
        }
    }
}

/// Validated page request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListQuery {
    /// 1-based
    pub page: u32,
    pub limit: u32,
    pub sort: SortKey,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_LIMIT,
            sort: SortKey::default(),
        }
    }
}

impl ListQuery {
    fn offset(&self) -> usize {
        (self.page.saturating_sub(1) as usize).saturating_mul(self.limit as usize)
    }
}

/// One page of results plus totals
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub page: u32,
    pub pages: u32,
}

impl<T> Page<T> {
    /// Slice `all` (already sorted) according to `query`
    pub fn from_sorted(all: Vec<T>, query: &ListQuery) -> Self {
        let total = all.len();
        let limit = query.limit.max(1) as usize;
        let pages = total.div_ceil(limit) as u32;
        let items = all
            .into_iter()
            .skip(query.offset())
            .take(limit)
            .collect();
        Self {
            items,
            total,
            page: query.page,
            pages,
        }
    }
}

#[async_trait]
pub trait AssessmentRepository: Send + Sync {
    async fn insert(&self, assessment: Assessment) -> Result<(), RepositoryError>;

    /// None when missing or owned by someone else
    async fn get(&self, owner: &UserId, id: &AssessmentId) -> Result<Option<Assessment>, RepositoryError>;

    async fn list(&self, owner: &UserId, query: &ListQuery) -> Result<Page<Assessment>, RepositoryError>;

    /// Every assessment of `owner`, unordered
    async fn all_for_owner(&self, owner: &UserId) -> Result<Vec<Assessment>, RepositoryError>;

    /// Replace an existing record of the same owner
    async fn update(&self, assessment: Assessment) -> Result<(), RepositoryError>;

    /// Hard delete; false when nothing was removed
    async fn delete(&self, owner: &UserId, id: &AssessmentId) -> Result<bool, RepositoryError>;
}

/// DashMap-backed repository
#[derive(Debug, Default)]
pub struct InMemoryAssessmentRepository {
    assessments: DashMap<AssessmentId, Assessment>,
}

impl InMemoryAssessmentRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AssessmentRepository for InMemoryAssessmentRepository {
    async fn insert(&self, assessment: Assessment) -> Result<(), RepositoryError> {
        self.assessments.insert(assessment.id, assessment);
        Ok(())
    }

    async fn get(&self, owner: &UserId, id: &AssessmentId) -> Result<Option<Assessment>, RepositoryError> {
        Ok(self
            .assessments
            .get(id)
            .filter(|entry| entry.is_owned_by(owner))
            .map(|entry| entry.value().clone()))
    }

    async fn list(&self, owner: &UserId, query: &ListQuery) -> Result<Page<Assessment>, RepositoryError> {
        let mut owned = self.all_for_owner(owner).await?;
        owned.sort_by(|a, b| query.sort.compare(a, b));
        Ok(Page::from_sorted(owned, query))
    }

    async fn all_for_owner(&self, owner: &UserId) -> Result<Vec<Assessment>, RepositoryError> {
        Ok(self
            .assessments
            .iter()
            .filter(|entry| entry.is_owned_by(owner))
            .map(|entry| entry.value().clone())
            .collect())
    }

    async fn update(&self, assessment: Assessment) -> Result<(), RepositoryError> {
        match self.assessments.get_mut(&assessment.id) {
            Some(mut entry) if entry.is_owned_by(&assessment.owner) => {
                *entry = assessment;
                Ok(())
            }
            _ => Err(RepositoryError::NotFound(assessment.id)),
        }
    }

    async fn delete(&self, owner: &UserId, id: &AssessmentId) -> Result<bool, RepositoryError> {
        Ok(self
            .assessments
            .remove_if(id, |_, assessment| assessment.is_owned_by(owner))
            .is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use types::assessment::{AssessmentInput, EmployeeCount, Sector};
    use types::control::Controls;
    use types::risk::{AssessmentResult, RiskLevel, RiskScore, ScoringPolicy};

    fn make_assessment(owner: UserId, name: &str, score: u8, minutes: i64) -> Assessment {
        let input = AssessmentInput {
            company_name: name.to_string(),
            sector: Sector::Retail,
            employee_count: EmployeeCount::UpTo10,
            controls: Controls::default(),
            system_complexity: None,
            data_sensitivity: None,
        };
        let score = RiskScore::new(score).unwrap();
        let result = AssessmentResult {
            policy: ScoringPolicy::UniformFraction,
            score,
            security_score: score.complement(),
            risk_level: RiskLevel::Low,
            threats: vec![],
            vulnerabilities: vec![],
            recommendations: vec![],
        };
        let base = Utc.with_ymd_and_hms(2024, 2, 16, 12, 0, 0).unwrap();
        Assessment::new(owner, input, result, base + Duration::minutes(minutes))
    }

    #[tokio::test]
    async fn test_get_is_owner_scoped() {
        let repo = InMemoryAssessmentRepository::new();
        let alice = UserId::new();
        let bob = UserId::new();
        let assessment = make_assessment(alice, "Acme", 10, 0);
        let id = assessment.id;
        repo.insert(assessment).await.unwrap();

        assert!(repo.get(&alice, &id).await.unwrap().is_some());
        assert!(repo.get(&bob, &id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_sorts_and_paginates() {
        let repo = InMemoryAssessmentRepository::new();
        let owner = UserId::new();
        for (i, (name, score)) in [("b", 40), ("a", 90), ("c", 10)].iter().enumerate() {
            repo.insert(make_assessment(owner, name, *score, i as i64)).await.unwrap();
        }
        repo.insert(make_assessment(UserId::new(), "other", 50, 9)).await.unwrap();

        let newest = repo.list(&owner, &ListQuery::default()).await.unwrap();
        assert_eq!(newest.total, 3);
        assert_eq!(newest.pages, 1);
        assert_eq!(newest.items[0].input.company_name, "c");

        let query = ListQuery { page: 2, limit: 2, sort: SortKey::ScoreDesc };
        let page = repo.list(&owner, &query).await.unwrap();
        assert_eq!(page.pages, 2);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].result.score.value(), 10);

        let query = ListQuery { sort: SortKey::CompanyNameAsc, ..ListQuery::default() };
        let names: Vec<String> = repo
            .list(&owner, &query)
            .await
            .unwrap()
            .items
            .into_iter()
            .map(|a| a.input.company_name)
            .collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_page_past_end_is_empty() {
        let repo = InMemoryAssessmentRepository::new();
        let owner = UserId::new();
        repo.insert(make_assessment(owner, "a", 1, 0)).await.unwrap();
        let query = ListQuery { page: 5, ..ListQuery::default() };
        let page = repo.list(&owner, &query).await.unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.total, 1);
    }

    #[tokio::test]
    async fn test_update_and_delete_respect_owner() {
        let repo = InMemoryAssessmentRepository::new();
        let owner = UserId::new();
        let stranger = UserId::new();
        let mut assessment = make_assessment(owner, "Acme", 10, 0);
        let id = assessment.id;
        repo.insert(assessment.clone()).await.unwrap();

        assessment.owner = stranger;
        assert!(matches!(
            repo.update(assessment).await,
            Err(RepositoryError::NotFound(_))
        ));
        assert!(!repo.delete(&stranger, &id).await.unwrap());
        assert!(repo.delete(&owner, &id).await.unwrap());
        assert!(repo.get(&owner, &id).await.unwrap().is_none());
    }

    #[test]
    fn test_sort_key_parse() {
        assert_eq!("-score".parse(), Ok(SortKey::ScoreDesc));
        assert_eq!("companyName".parse(), Ok(SortKey::CompanyNameAsc));
        assert!("riskLevel".parse::<SortKey>().is_err());
    }
}
