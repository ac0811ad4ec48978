use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{HasId, Id};

/// An organizational unit. Departments form a tree through
/// `parent_department_id`; the backing data is not trusted to be acyclic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Department {
    pub id: Id,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_department_id: Option<Id>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manager_id: Option<Id>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl HasId for Department {
    fn id(&self) -> Id {
        self.id
    }
}

impl Department {
    pub fn is_root(&self) -> bool {
        self.parent_department_id.is_none()
    }
}
