use serde::Serialize;

use super::{Branch, Department, Employee};

/// Denormalized employee row. A read-only projection recomputed wholesale on
/// every fetch; a reference that could not be resolved is simply absent.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedEmployee {
    #[serde(flatten)]
    pub employee: Employee,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<Branch>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<Department>,
    /// One hop only; the manager's own references are never expanded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manager: Option<Employee>,
}

/// Denormalized department view. `ancestry` holds the resolved parent chain,
/// nearest parent first; for list rows it carries at most the direct parent,
/// for a single-department view the full trail up to a root.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedDepartment {
    #[serde(flatten)]
    pub department: Department,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manager: Option<Employee>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ancestry: Vec<Department>,
}

impl ResolvedDepartment {
    pub fn parent(&self) -> Option<&Department> {
        self.ancestry.first()
    }

    /// Root-first display path, ending with the department itself,
    /// e.g. `"Operations / Logistics / Fleet"`.
    pub fn display_path(&self) -> String {
        let mut names: Vec<&str> = self
            .ancestry
            .iter()
            .rev()
            .map(|department| department.name.as_str())
            .collect();
        names.push(&self.department.name);
        names.join(" / ")
    }
}
