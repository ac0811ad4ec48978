use serde::{Deserialize, Serialize};

/// Three-valued presence flag. `Unknown` means the backing fetch has not
/// resolved yet; derivation keeps the last-known state instead of guessing,
/// so a page refresh mid-flight does not flash a wrong navigation state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Presence {
    #[default]
    Unknown,
    Present,
    Absent,
}

impl Presence {
    pub fn from_found(found: bool) -> Self {
        if found {
            Presence::Present
        } else {
            Presence::Absent
        }
    }

    pub fn is_present(self) -> bool {
        matches!(self, Presence::Present)
    }
}

/// The sole source of truth for derived navigation state. Never mutated
/// directly by UI code; only fetch-outcome handlers apply `FlowEvent`s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowFlags {
    pub company: Presence,
    pub company_license: Presence,
    pub branch: Presence,
    pub profile: Presence,
}

/// Fetch outcomes and completion signals of external write operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowEvent {
    CompanyFetched { found: bool },
    LicenseFetched { found: bool },
    BranchFetched { found: bool },
    ProfileFetched { found: bool },
    CompanyDeleted,
    ProfileDeleted,
}

/// Current company-onboarding step, derived, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CompanyOnboardingStep {
    Company,
    CompanyLicense,
    Branch,
    Completed,
}

/// Current employee-onboarding step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EmployeeOnboardingStep {
    Employee,
    Completed,
}

/// Which console areas are reachable given the current flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavAvailability {
    pub company_settings: bool,
    pub branches: bool,
    pub departments: bool,
    pub employees: bool,
    pub employee_onboarding: bool,
}

/// Full derived flow state: one recomputation, no observable intermediate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowState {
    pub company_step: CompanyOnboardingStep,
    pub employee_step: EmployeeOnboardingStep,
    pub nav: NavAvailability,
}
