//! Input normalization
//!
//! Questionnaire answers arrive in three shapes:
//! - `ClientForm`: the mobile client's boolean-flag form
//! - `ServerRecord`: the persisted record schema (`has*` flags)
//! - `SubmissionForm`: the canonical wire form accepted over HTTP
//!
//! Each implements [`Normalize`] and maps into one canonical
//! `AssessmentInput`. Unanswered flags become `false`; categorical fields
//! outside their enumerated set fail fast.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use types::assessment::{AssessmentInput, ContextLevel, EmployeeCount, Sector};
use types::control::{Control, Controls};
use types::errors::ScoringError;

/// Conversion of a raw questionnaire record into canonical input
pub trait Normalize {
    fn normalize(self) -> Result<AssessmentInput, ScoringError>;
}

impl Normalize for AssessmentInput {
    fn normalize(self) -> Result<AssessmentInput, ScoringError> {
        let company_name = required_text("companyName", Some(self.company_name))?;
        Ok(AssessmentInput { company_name, ..self })
    }
}

// ── Client-side form ────────────────────────────────────────────────────

/// Boolean-flag form produced by the mobile client
///
/// Older client builds used `has*` names for the same switches; both are
/// accepted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClientForm {
    pub company_name: Option<String>,
    pub industry: Option<String>,
    pub employee_count: Option<String>,
    #[serde(alias = "hasFirewall")]
    pub firewall_enabled: bool,
    #[serde(alias = "hasAntivirus")]
    pub antivirus_enabled: bool,
    #[serde(alias = "hasEncryption")]
    pub data_encryption: bool,
    #[serde(alias = "hasBackup")]
    pub backup_system: bool,
    #[serde(alias = "hasAccessControl")]
    pub access_control: bool,
    pub update_policy: bool,
    #[serde(alias = "hasTraining")]
    pub security_training: bool,
    #[serde(alias = "hasIncidentResponse")]
    pub incident_response: bool,
    #[serde(alias = "hasMonitoring")]
    pub monitoring: bool,
    pub system_complexity: Option<String>,
    pub data_sensitivity: Option<String>,
}

impl Normalize for ClientForm {
    fn normalize(self) -> Result<AssessmentInput, ScoringError> {
        let company_name = required_text("companyName", self.company_name)?;
        let sector = parse_sector(self.industry)?;
        let employee_count = parse_employee_count(self.employee_count)?;

        let controls = Controls {
            firewall: self.firewall_enabled,
            antivirus: self.antivirus_enabled,
            encryption: self.data_encryption,
            backup: self.backup_system,
            access_control: self.access_control,
            update_policy: self.update_policy,
            training: self.security_training,
            incident_response: self.incident_response,
            monitoring: self.monitoring,
            ..Controls::default()
        };

        Ok(AssessmentInput {
            company_name,
            sector,
            employee_count,
            controls,
            system_complexity: parse_context("systemComplexity", self.system_complexity)?,
            data_sensitivity: parse_context("dataSensitivity", self.data_sensitivity)?,
        })
    }
}

// ── Server-side record ──────────────────────────────────────────────────

/// Persisted record schema with ten `has*` answers
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServerRecord {
    pub company_name: Option<String>,
    pub sector: Option<String>,
    pub employees_count: Option<String>,
    pub has_firewall: bool,
    pub has_antivirus: bool,
    pub has_backup: bool,
    pub has_training: bool,
    pub has_incident_plan: bool,
    pub has_password_policy: bool,
    pub has_two_factor_auth: bool,
    pub has_data_encryption: bool,
    pub has_access_control: bool,
    pub has_security_audit: bool,
}

impl Normalize for ServerRecord {
    fn normalize(self) -> Result<AssessmentInput, ScoringError> {
        let company_name = required_text("companyName", self.company_name)?;
        let sector = parse_sector(self.sector)?;
        let employee_count = parse_employee_count(self.employees_count)?;

        let controls = Controls {
            firewall: self.has_firewall,
            antivirus: self.has_antivirus,
            backup: self.has_backup,
            training: self.has_training,
            incident_response: self.has_incident_plan,
            password_policy: self.has_password_policy,
            two_factor_auth: self.has_two_factor_auth,
            encryption: self.has_data_encryption,
            access_control: self.has_access_control,
            security_audit: self.has_security_audit,
            ..Controls::default()
        };

        Ok(AssessmentInput {
            company_name,
            sector,
            employee_count,
            controls,
            system_complexity: None,
            data_sensitivity: None,
        })
    }
}

// ── Canonical submission form ───────────────────────────────────────────

/// Canonical wire form
///
/// Every field is optional so the same type doubles as a partial update:
/// [`SubmissionForm::merge`] overlays supplied fields on a stored input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SubmissionForm {
    pub company_name: Option<String>,
    pub sector: Option<String>,
    pub employee_count: Option<String>,
    pub controls: BTreeMap<Control, bool>,
    pub system_complexity: Option<String>,
    pub data_sensitivity: Option<String>,
}

impl SubmissionForm {
    /// Overlay `patch` on `self`; fields absent from `patch` are kept
    pub fn merge(mut self, patch: SubmissionForm) -> SubmissionForm {
        if patch.company_name.is_some() {
            self.company_name = patch.company_name;
        }
        if patch.sector.is_some() {
            self.sector = patch.sector;
        }
        if patch.employee_count.is_some() {
            self.employee_count = patch.employee_count;
        }
        if patch.system_complexity.is_some() {
            self.system_complexity = patch.system_complexity;
        }
        if patch.data_sensitivity.is_some() {
            self.data_sensitivity = patch.data_sensitivity;
        }
        self.controls.extend(patch.controls);
        self
    }
}

impl From<&AssessmentInput> for SubmissionForm {
    fn from(input: &AssessmentInput) -> Self {
        Self {
            company_name: Some(input.company_name.clone()),
            sector: Some(input.sector.as_str().to_string()),
            employee_count: Some(input.employee_count.as_str().to_string()),
            controls: Control::ALL
                .into_iter()
                .map(|c| (c, input.controls.is_present(c)))
                .collect(),
            system_complexity: input.system_complexity.map(|l| l.as_str().to_string()),
            data_sensitivity: input.data_sensitivity.map(|l| l.as_str().to_string()),
        }
    }
}

impl Normalize for SubmissionForm {
    fn normalize(self) -> Result<AssessmentInput, ScoringError> {
        let company_name = required_text("companyName", self.company_name)?;
        let sector = parse_sector(self.sector)?;
        let employee_count = parse_employee_count(self.employee_count)?;

        let mut controls = Controls::default();
        for (control, present) in self.controls {
            controls.set(control, present);
        }

        Ok(AssessmentInput {
            company_name,
            sector,
            employee_count,
            controls,
            system_complexity: parse_context("systemComplexity", self.system_complexity)?,
            data_sensitivity: parse_context("dataSensitivity", self.data_sensitivity)?,
        })
    }
}

// ── Field parsing ───────────────────────────────────────────────────────

fn required_text(field: &'static str, value: Option<String>) -> Result<String, ScoringError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or(ScoringError::missing(field))
}

fn parse_sector(value: Option<String>) -> Result<Sector, ScoringError> {
    required_text("sector", value)?.parse()
}

fn parse_employee_count(value: Option<String>) -> Result<EmployeeCount, ScoringError> {
    required_text("employeeCount", value)?.parse()
}

/// Blank means unanswered (the client picker's placeholder submits "")
fn parse_context(field: &'static str, value: Option<String>) -> Result<Option<ContextLevel>, ScoringError> {
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => ContextLevel::parse_field(field, raw).map(Some),
    }
}
