use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{HasId, Id};

/// An employee record as served by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: Id,
    pub first_name: String,
    pub last_name: String,
    /// Server-computed display name; may be absent on draft records.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub full_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_branch_id: Option<Id>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_department_id: Option<Id>,
    /// Manager reference.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reports_to_id: Option<Id>,
    /// True until a backing record exists server-side.
    #[serde(default)]
    pub draft: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl HasId for Employee {
    fn id(&self) -> Id {
        self.id
    }
}

impl Employee {
    /// Display name, falling back to "first last" when the server has not
    /// populated `full_name` yet.
    pub fn display_name(&self) -> String {
        if self.full_name.is_empty() {
            format!("{} {}", self.first_name, self.last_name)
        } else {
            self.full_name.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_falls_back_for_drafts() {
        let json = r#"{"id": 1, "firstName": "Noa", "lastName": "Berg", "draft": true}"#;
        let employee: Employee = serde_json::from_str(json).unwrap();
        assert!(employee.draft);
        assert_eq!(employee.display_name(), "Noa Berg");
    }

    #[test]
    fn wire_field_names_are_camel_case() {
        let json = r#"{
            "id": 2,
            "firstName": "Iris",
            "lastName": "Kane",
            "fullName": "Iris Kane",
            "assignedBranchId": 10,
            "assignedDepartmentId": 20,
            "reportsToId": 3
        }"#;
        let employee: Employee = serde_json::from_str(json).unwrap();
        assert_eq!(employee.assigned_branch_id, Some(10));
        assert_eq!(employee.assigned_department_id, Some(20));
        assert_eq!(employee.reports_to_id, Some(3));
        assert!(!employee.draft);
    }
}
