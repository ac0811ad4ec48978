use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{HasId, Id};

/// The tenant's company record. Singleton per tenant; its absence drives the
/// first onboarding step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub id: Id,
    pub name: String,
    pub country_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl HasId for Company {
    fn id(&self) -> Id {
        self.id
    }
}

/// License attached to the tenant's company. Presence of the record means
/// the license has been acquired; the onboarding chain does not inspect the
/// plan beyond that.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyLicense {
    pub id: Id,
    pub plan: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub acquired_at: Option<DateTime<Utc>>,
}

impl HasId for CompanyLicense {
    fn id(&self) -> Id {
        self.id
    }
}

/// The operator's own employee record within the tenant company. Its
/// presence completes employee onboarding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeProfile {
    pub id: Id,
    pub employee_id: Id,
    pub company_id: Id,
}

impl HasId for EmployeeProfile {
    fn id(&self) -> Id {
        self.id
    }
}
