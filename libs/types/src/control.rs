//! Security controls answered in the questionnaire
//!
//! A control is either present or absent. Unanswered controls are absent:
//! `Controls::default()` has every flag off.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A named security measure tracked by the questionnaire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Control {
    Firewall,
    Antivirus,
    Backup,
    Training,
    IncidentResponse,
    AccessControl,
    Encryption,
    Monitoring,
    UpdatePolicy,
    PasswordPolicy,
    TwoFactorAuth,
    SecurityAudit,
}

impl Control {
    /// Every tracked control, in questionnaire order
    pub const ALL: [Control; 12] = [
        Control::Firewall,
        Control::Antivirus,
        Control::Backup,
        Control::Training,
        Control::IncidentResponse,
        Control::AccessControl,
        Control::Encryption,
        Control::Monitoring,
        Control::UpdatePolicy,
        Control::PasswordPolicy,
        Control::TwoFactorAuth,
        Control::SecurityAudit,
    ];

    /// camelCase wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            Control::Firewall => "firewall",
            Control::Antivirus => "antivirus",
            Control::Backup => "backup",
            Control::Training => "training",
            Control::IncidentResponse => "incidentResponse",
            Control::AccessControl => "accessControl",
            Control::Encryption => "encryption",
            Control::Monitoring => "monitoring",
            Control::UpdatePolicy => "updatePolicy",
            Control::PasswordPolicy => "passwordPolicy",
            Control::TwoFactorAuth => "twoFactorAuth",
            Control::SecurityAudit => "securityAudit",
        }
    }
}

impl fmt::Display for Control {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Present/absent flag for every control
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Controls {
    pub firewall: bool,
    pub antivirus: bool,
    pub backup: bool,
    pub training: bool,
    pub incident_response: bool,
    pub access_control: bool,
    pub encryption: bool,
    pub monitoring: bool,
    pub update_policy: bool,
    pub password_policy: bool,
    pub two_factor_auth: bool,
    pub security_audit: bool,
}

impl Controls {
    /// Every control present
    pub fn all_present() -> Self {
        let mut controls = Self::default();
        for control in Control::ALL {
            controls.set(control, true);
        }
        controls
    }

    pub fn is_present(&self, control: Control) -> bool {
        match control {
            Control::Firewall => self.firewall,
            Control::Antivirus => self.antivirus,
            Control::Backup => self.backup,
            Control::Training => self.training,
            Control::IncidentResponse => self.incident_response,
            Control::AccessControl => self.access_control,
            Control::Encryption => self.encryption,
            Control::Monitoring => self.monitoring,
            Control::UpdatePolicy => self.update_policy,
            Control::PasswordPolicy => self.password_policy,
            Control::TwoFactorAuth => self.two_factor_auth,
            Control::SecurityAudit => self.security_audit,
        }
    }

    pub fn set(&mut self, control: Control, present: bool) {
        let flag = match control {
            Control::Firewall => &mut self.firewall,
            Control::Antivirus => &mut self.antivirus,
            Control::Backup => &mut self.backup,
            Control::Training => &mut self.training,
            Control::IncidentResponse => &mut self.incident_response,
            Control::AccessControl => &mut self.access_control,
            Control::Encryption => &mut self.encryption,
            Control::Monitoring => &mut self.monitoring,
            Control::UpdatePolicy => &mut self.update_policy,
            Control::PasswordPolicy => &mut self.password_policy,
            Control::TwoFactorAuth => &mut self.two_factor_auth,
            Control::SecurityAudit => &mut self.security_audit,
        };
        *flag = present;
    }

    /// Builder-style variant of [`Controls::set`]
    pub fn with(mut self, control: Control, present: bool) -> Self {
        self.set(control, present);
        self
    }

    /// Controls from `tracked` that are absent, in `tracked` order
    pub fn absent_in<'a>(&'a self, tracked: &'a [Control]) -> impl Iterator<Item = Control> + 'a {
        tracked.iter().copied().filter(|c| !self.is_present(*c))
    }

    /// Number of controls from `tracked` that are present
    pub fn count_present(&self, tracked: &[Control]) -> usize {
        tracked.iter().filter(|c| self.is_present(**c)).count()
    }
}
