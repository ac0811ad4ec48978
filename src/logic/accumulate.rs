use std::collections::{BTreeMap, HashSet};

use crate::model::{HasId, Id, Page, PageRequest};

/// Backs "load more on scroll" selection fields: grows one deduplicated,
/// order-stable list across successive page fetches.
///
/// Requests may be issued concurrently, but pages are applied strictly in
/// page-number order; a response that races ahead of its predecessor is
/// buffered until the gap closes. The accumulated list never contains the
/// same id twice.
#[derive(Debug)]
pub struct PageAccumulator<T: HasId> {
    items: Vec<T>,
    seen: HashSet<Id>,
    /// Highest page number handed out via `next_request`.
    requested: u32,
    /// Highest page number applied to the list.
    applied: u32,
    total_items: u64,
    total_pages: u32,
    page_size: u32,
    search: Option<String>,
    /// Out-of-order responses awaiting their predecessors.
    pending: BTreeMap<u32, Page<T>>,
}

impl<T: HasId> PageAccumulator<T> {
    pub fn new(page_size: u32) -> Self {
        Self {
            items: Vec::new(),
            seen: HashSet::new(),
            requested: 0,
            applied: 0,
            total_items: 0,
            total_pages: 0,
            page_size,
            search: None,
            pending: BTreeMap::new(),
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, id: Id) -> bool {
        self.seen.contains(&id)
    }

    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    pub fn total_items(&self) -> u64 {
        self.total_items
    }

    /// A request has been handed out whose response has not been applied yet.
    pub fn is_loading(&self) -> bool {
        self.requested > self.applied
    }

    /// Whether any page past the ones already applied exists. Unknown totals
    /// (nothing applied yet) count as more.
    pub fn has_more(&self) -> bool {
        self.applied == 0 || self.applied < self.total_pages
    }

    /// Hand out the next page request, or `None` once the known end of the
    /// collection has been requested. Scrolling at the bottom of a fully
    /// loaded list therefore never triggers another fetch.
    pub fn next_request(&mut self) -> Option<PageRequest> {
        if self.applied > 0 && self.requested >= self.total_pages {
            return None;
        }
        self.requested += 1;
        let mut request = PageRequest::first(self.page_size);
        request.page_number = self.requested;
        request.search = self.search.clone();
        Some(request)
    }

    /// Merge a fetched page. Pages apply in page-number order regardless of
    /// arrival order; duplicates of already-applied pages are dropped.
    pub fn append_page(&mut self, page: Page<T>) {
        if page.page_number <= self.applied {
            return;
        }
        self.pending.insert(page.page_number, page);
        while let Some(next) = self.pending.remove(&(self.applied + 1)) {
            self.apply(next);
        }
    }

    fn apply(&mut self, page: Page<T>) {
        self.applied = page.page_number;
        self.requested = self.requested.max(self.applied);
        self.total_items = page.total_items;
        self.total_pages = page.total_pages;
        for item in page.items {
            if self.seen.insert(item.id()) {
                self.items.push(item);
            }
        }
    }

    /// Inject a single independently fetched item so a selection control can
    /// render a reference living on a page that has not been scrolled to.
    /// Prepended; a later page carrying the same id will not duplicate it.
    /// Returns false if the id was already present.
    pub fn ensure_item_present(&mut self, item: T) -> bool {
        if !self.seen.insert(item.id()) {
            return false;
        }
        self.items.insert(0, item);
        true
    }

    /// Free-text filter change: the accumulated list and cursor restart from
    /// the first page.
    pub fn reset(&mut self, search: Option<String>) {
        self.items.clear();
        self.seen.clear();
        self.pending.clear();
        self.requested = 0;
        self.applied = 0;
        self.total_items = 0;
        self.total_pages = 0;
        self.search = search;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Branch;

    fn branch(id: Id, name: &str) -> Branch {
        Branch {
            id,
            name: name.to_string(),
            timezone_id: "Etc/UTC".to_string(),
            address: None,
            created_at: None,
            updated_at: None,
        }
    }

    fn page(number: u32, ids: &[Id], total_items: u64, total_pages: u32) -> Page<Branch> {
        Page {
            items: ids
                .iter()
                .map(|id| branch(*id, &format!("Branch {id}")))
                .collect(),
            page_number: number,
            page_size: ids.len() as u32,
            total_items,
            total_pages,
        }
    }

    #[test]
    fn ids_stay_unique_in_first_seen_order() {
        let mut acc = PageAccumulator::new(3);
        acc.next_request();
        acc.append_page(page(1, &[1, 2, 3], 8, 3));
        acc.next_request();
        // Overlapping window after a concurrent insert upstream.
        acc.append_page(page(2, &[3, 4, 5], 8, 3));

        let ids: Vec<Id> = acc.items().iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn racing_page_is_held_until_its_predecessor_lands() {
        let mut acc = PageAccumulator::new(2);
        acc.next_request();
        acc.next_request();

        acc.append_page(page(2, &[3, 4], 6, 3));
        assert!(acc.is_empty()); // page 2 buffered, page 1 still in flight

        acc.append_page(page(1, &[1, 2], 6, 3));
        let ids: Vec<Id> = acc.items().iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
        assert!(!acc.is_loading());
    }

    #[test]
    fn end_of_list_is_idempotent() {
        let mut acc = PageAccumulator::new(2);
        acc.next_request();
        acc.append_page(page(1, &[1, 2], 3, 2));
        acc.next_request();
        acc.append_page(page(2, &[3], 3, 2));

        assert!(!acc.has_more());
        assert!(acc.next_request().is_none());
        assert!(acc.next_request().is_none());
        assert_eq!(acc.len(), 3);
    }

    #[test]
    fn duplicate_page_delivery_is_dropped() {
        let mut acc = PageAccumulator::new(2);
        acc.next_request();
        acc.append_page(page(1, &[1, 2], 4, 2));
        acc.append_page(page(1, &[1, 2], 4, 2));
        assert_eq!(acc.len(), 2);
    }

    #[test]
    fn injected_selection_renders_without_loading_its_page() {
        let mut acc = PageAccumulator::new(10);
        acc.next_request();
        acc.append_page(page(1, &(1..=10).collect::<Vec<_>>(), 30, 3));
        acc.next_request();
        acc.append_page(page(2, &(11..=20).collect::<Vec<_>>(), 30, 3));
        assert_eq!(acc.len(), 20);

        // The edited record references an item on page 3.
        assert!(acc.ensure_item_present(branch(241, "Anchorage Branch")));
        assert_eq!(acc.len(), 21);
        assert_eq!(acc.items()[0].name, "Anchorage Branch");

        // Page 3 eventually scrolls in; the injected id is not duplicated.
        acc.next_request();
        let mut tail: Vec<Id> = (21..=29).collect();
        tail.push(241);
        acc.append_page(page(3, &tail, 30, 3));
        assert_eq!(acc.len(), 30);
        let count = acc.items().iter().filter(|b| b.id == 241).count();
        assert_eq!(count, 1);
    }

    #[test]
    fn filter_change_resets_list_and_cursor() {
        let mut acc = PageAccumulator::new(2);
        acc.next_request();
        acc.append_page(page(1, &[1, 2], 4, 2));
        assert_eq!(acc.len(), 2);

        acc.reset(Some("north".to_string()));
        assert!(acc.is_empty());
        assert!(!acc.is_loading());

        let request = acc.next_request().unwrap();
        assert_eq!(request.page_number, 1);
        assert_eq!(request.search.as_deref(), Some("north"));
    }

    #[test]
    fn stale_pending_pages_do_not_survive_a_reset() {
        let mut acc = PageAccumulator::new(2);
        acc.next_request();
        acc.next_request();
        acc.append_page(page(2, &[3, 4], 6, 3)); // buffered

        acc.reset(None);
        acc.next_request();
        acc.append_page(page(1, &[9], 1, 1));
        let ids: Vec<Id> = acc.items().iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![9]);
    }
}
