//! Snapshot of everything the listing shell renders.

use crate::types::{MovieSummary, ResultPage, SearchQuery, SortKey};

/// Listing controller state.
///
/// Owned and mutated only by the controller; shells receive clones.
/// `page` always holds the outcome of the most recent settled fetch, and
/// `request_epoch` identifies the latest issued fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct ControllerState {
    pub query: SearchQuery,
    pub page: Option<ResultPage>,
    pub sort_key: SortKey,
    pub visible_count: usize,
    pub loading: bool,
    pub error: Option<String>,
    pub request_epoch: u64,
}

impl ControllerState {
    pub fn new(visible_count: usize) -> Self {
        Self {
            query: SearchQuery::default(),
            page: None,
            sort_key: SortKey::None,
            visible_count: visible_count.max(1),
            loading: false,
            error: None,
            request_epoch: 0,
        }
    }

    /// Page count of the committed page, 1 when nothing is committed.
    pub fn total_pages(&self) -> u32 {
        self.page.as_ref().map_or(1, ResultPage::total_pages)
    }

    /// Page number of the committed page, else the page last asked for.
    pub fn current_page(&self) -> u32 {
        self.page
            .as_ref()
            .map_or(self.query.page(), ResultPage::requested_page)
    }

    /// Committed items in catalog order.
    pub fn items(&self) -> &[MovieSummary] {
        self.page.as_ref().map_or(&[], ResultPage::items)
    }
}
