use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{HasId, Id};

/// A physical location of the tenant's company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Branch {
    pub id: Id,
    pub name: String,
    pub timezone_id: String,
    /// Absent address is a valid, display-default state.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<PostalAddress>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl HasId for Branch {
    fn id(&self) -> Id {
        self.id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostalAddress {
    pub line1: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line2: Option<String>,
    pub city: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subdivision: Option<String>,
    pub postal_code: String,
    pub country_code: String,
}

impl PostalAddress {
    /// Single-line rendering for list rows.
    pub fn display_line(&self) -> String {
        let mut parts = vec![self.line1.as_str()];
        if let Some(line2) = &self.line2 {
            parts.push(line2);
        }
        parts.push(&self.city);
        if let Some(subdivision) = &self.subdivision {
            parts.push(subdivision);
        }
        parts.push(&self.postal_code);
        parts.push(&self.country_code);
        parts.join(", ")
    }
}
