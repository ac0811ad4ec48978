use serde::{Deserialize, Serialize};

/// Opaque numeric identifier, unique within its entity type.
pub type Id = i64;

/// Access to an entity's identifier, used for dedup and merge-by-id.
pub trait HasId {
    fn id(&self) -> Id;
}

/// Parameters for one paged list request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRequest {
    pub page_number: u32,
    pub page_size: u32,
    /// Free-text filter. Omitted from the query string entirely when no
    /// filter is active, never sent as an empty string.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl PageRequest {
    pub fn first(page_size: u32) -> Self {
        Self {
            page_number: 1,
            page_size,
            search: None,
        }
    }

    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    /// Request for the page following this one, same size and filter.
    pub fn next(&self) -> Self {
        Self {
            page_number: self.page_number + 1,
            page_size: self.page_size,
            search: self.search.clone(),
        }
    }
}

/// One page of a server-side collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page_number: u32,
    pub page_size: u32,
    pub total_items: u64,
    pub total_pages: u32,
}

impl<T> Page<T> {
    pub fn empty(page_number: u32, page_size: u32) -> Self {
        Self {
            items: Vec::new(),
            page_number,
            page_size,
            total_items: 0,
            total_pages: 0,
        }
    }

    pub fn is_last(&self) -> bool {
        self.page_number >= self.total_pages
    }

    /// Transform every row while keeping the page metadata intact. Row count
    /// and row order are preserved by construction.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page_number: self.page_number,
            page_size: self.page_size,
            total_items: self.total_items,
            total_pages: self.total_pages,
        }
    }
}

/// Page count for a collection of `total_items` at the given page size.
pub fn total_pages(total_items: u64, page_size: u32) -> u32 {
    if page_size == 0 {
        return 0;
    }
    total_items.div_ceil(page_size as u64) as u32
}
