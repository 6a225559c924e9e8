//! Fetch orchestration with latest-wins epoch gating.
//!
//! The orchestrator is synchronous: issuing a fetch yields a ticket, and the
//! caller reports the network outcome back against that ticket. Only the
//! ticket of the latest epoch may touch the committed page, the error or the
//! loading flag. Older tickets still complete on the wire but are dropped
//! here without side effects.

use marquee_core::config::ListingConfig;

use super::state::ControllerState;
use crate::errors::{CatalogError, ListingError};
use crate::types::{ListingRequest, ResultPage, SearchQuery, SortKey};

/// Race-prevention token for one issued fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub epoch: u64,
    pub request: ListingRequest,
}

/// What happened when a fetch outcome was reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settlement {
    /// Latest fetch succeeded and its page is now committed.
    Committed,
    /// Latest fetch failed; results were cleared and the error set.
    Failed,
    /// A newer fetch superseded this one; state was left untouched.
    Discarded,
}

/// Owner of `ControllerState` and the only code that mutates it.
#[derive(Debug)]
pub struct FetchOrchestrator {
    state: ControllerState,
    default_visible_count: usize,
    max_total_pages: u32,
}

impl FetchOrchestrator {
    pub fn new(config: &ListingConfig) -> Self {
        let default_visible_count = config.default_visible_count.max(1);
        Self {
            state: ControllerState::new(default_visible_count),
            default_visible_count,
            max_total_pages: config.max_total_pages,
        }
    }

    pub fn state(&self) -> &ControllerState {
        &self.state
    }

    /// Issues a fetch for `query` and returns its ticket.
    ///
    /// Bumps the epoch before anything else so that every outcome still in
    /// flight is superseded, then marks the listing as loading.
    pub fn run_query(&mut self, query: SearchQuery) -> FetchTicket {
        self.state.request_epoch += 1;
        let ticket = FetchTicket {
            epoch: self.state.request_epoch,
            request: query.to_request(),
        };

        self.state.query = query;
        self.state.loading = true;
        self.state.error = None;

        ticket
    }

    /// A new effective term always starts over at page 1.
    pub fn apply_effective_term(&mut self, term: String) -> FetchTicket {
        self.run_query(SearchQuery::new(term, 1))
    }

    /// Fetches `page` of the current effective term.
    ///
    /// Returns `None` without touching state when `page` is outside
    /// `1..=total_pages`.
    pub fn request_page(&mut self, page: u32) -> Option<FetchTicket> {
        let total_pages = self.state.total_pages();
        if page == 0 || page > total_pages {
            tracing::debug!(page, total_pages, "Ignoring out-of-range page request");
            return None;
        }

        let term = self.state.query.term().to_string();
        Some(self.run_query(SearchQuery::new(term, page)))
    }

    /// Reports the network outcome of the fetch issued with `epoch`.
    pub fn settle(
        &mut self,
        epoch: u64,
        outcome: Result<ResultPage, CatalogError>,
    ) -> Settlement {
        if epoch != self.state.request_epoch {
            tracing::debug!(
                epoch,
                latest = self.state.request_epoch,
                succeeded = outcome.is_ok(),
                "Discarding superseded fetch outcome"
            );
            return Settlement::Discarded;
        }

        self.state.loading = false;

        match outcome {
            Ok(page) => {
                self.state.page = Some(page.with_page_ceiling(self.max_total_pages));
                Settlement::Committed
            }
            Err(error) => {
                tracing::warn!(epoch, %error, "Listing fetch failed");
                self.state.error = Some(ListingError::from(error).user_message());
                self.state.page = None;
                Settlement::Failed
            }
        }
    }

    /// Changes the sort order; the visible window resets on every change.
    ///
    /// Returns whether the key actually changed.
    pub fn set_sort_key(&mut self, key: SortKey) -> bool {
        if self.state.sort_key == key {
            return false;
        }
        self.state.sort_key = key;
        self.state.visible_count = self.default_visible_count;
        true
    }

    /// Grows the visible window by `by` items.
    pub fn expand_visible_count(&mut self, by: usize) -> bool {
        if by == 0 {
            return false;
        }
        self.state.visible_count = self.state.visible_count.saturating_add(by);
        true
    }
}
