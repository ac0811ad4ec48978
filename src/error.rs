use thiserror::Error;

use crate::model::Id;

/// Which entity collection a fetch was addressed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Company,
    Branch,
    Department,
    Employee,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            EntityKind::Company => "company",
            EntityKind::Branch => "branch",
            EntityKind::Department => "department",
            EntityKind::Employee => "employee",
        };
        f.write_str(name)
    }
}

/// Fetch error taxonomy.
///
/// `NotFound` is only raised for the primary entity of a view; a missing
/// secondary reference is reported as an absent field on the resolved view,
/// never as an error.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The primary entity of the requesting view does not exist.
    #[error("{kind} {id} not found")]
    NotFound { kind: EntityKind, id: Id },

    /// Transport-level failure. Surfaced to the caller as-is; retry policy
    /// belongs to the collaborator issuing the request, not this core.
    #[error("network failure: {0}")]
    Network(#[from] reqwest::Error),

    /// The server answered but the body did not match the expected shape.
    #[error("invalid response body for {path}: {detail}")]
    Decode { path: String, detail: String },

    /// Non-success status outside the taxonomy above.
    #[error("unexpected status {status} from {path}")]
    Unexpected { status: u16, path: String },
}

impl FetchError {
    pub fn not_found(kind: EntityKind, id: Id) -> Self {
        FetchError::NotFound { kind, id }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, FetchError::NotFound { .. })
    }
}

/// Result type for gateway and resolver operations.
pub type FetchResult<T> = Result<T, FetchError>;
