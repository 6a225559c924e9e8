//! Client-side ordering and windowing of a committed page.

use std::cmp::Ordering;

use super::pagination::{PageSlot, has_next, has_previous, page_window};
use super::state::ControllerState;
use crate::types::{MovieSummary, SortKey};

/// Orders `items` by `sort_key` and keeps the first `visible_count`.
///
/// The sort is stable, so ties keep catalog order, and missing values
/// compare as zero. `SortKey::None` returns catalog order unchanged.
/// The input slice is never reordered.
pub fn project(
    items: &[MovieSummary],
    sort_key: SortKey,
    visible_count: usize,
) -> Vec<&MovieSummary> {
    let mut projected: Vec<&MovieSummary> = items.iter().collect();

    match sort_key {
        SortKey::None => {}
        SortKey::YearAsc => projected.sort_by(|a, b| year(a).cmp(&year(b))),
        SortKey::YearDesc => projected.sort_by(|a, b| year(b).cmp(&year(a))),
        SortKey::RatingAsc => projected.sort_by(|a, b| compare_rating(a, b)),
        SortKey::RatingDesc => projected.sort_by(|a, b| compare_rating(b, a)),
        SortKey::VoteCountAsc => projected.sort_by(|a, b| votes(a).cmp(&votes(b))),
        SortKey::VoteCountDesc => projected.sort_by(|a, b| votes(b).cmp(&votes(a))),
    }

    projected.truncate(visible_count);
    projected
}

fn year(movie: &MovieSummary) -> i32 {
    movie.release_year.unwrap_or(0)
}

fn votes(movie: &MovieSummary) -> u64 {
    movie.vote_count.unwrap_or(0)
}

fn compare_rating(a: &MovieSummary, b: &MovieSummary) -> Ordering {
    a.vote_average
        .unwrap_or(0.0)
        .total_cmp(&b.vote_average.unwrap_or(0.0))
}

/// Render-ready view of the listing.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingView {
    pub term: String,
    pub items: Vec<MovieSummary>,
    /// Committed items left out by the visible window
    pub hidden_count: usize,
    pub sort_key: SortKey,
    pub current_page: u32,
    pub total_pages: u32,
    pub page_slots: Vec<PageSlot>,
    pub has_previous: bool,
    pub has_next: bool,
    pub loading: bool,
    pub error: Option<String>,
}

impl ListingView {
    pub fn from_state(state: &ControllerState) -> Self {
        let items: Vec<MovieSummary> = project(state.items(), state.sort_key, state.visible_count)
            .into_iter()
            .cloned()
            .collect();
        let hidden_count = state.items().len() - items.len();
        let current_page = state.current_page();
        let total_pages = state.total_pages();

        Self {
            term: state.query.term().to_string(),
            items,
            hidden_count,
            sort_key: state.sort_key,
            current_page,
            total_pages,
            page_slots: page_window(current_page, total_pages),
            has_previous: has_previous(current_page),
            has_next: has_next(current_page, total_pages),
            loading: state.loading,
            error: state.error.clone(),
        }
    }
}
