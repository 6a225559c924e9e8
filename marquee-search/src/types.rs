//! Data types for movie listings.

use std::fmt;
use std::str::FromStr;

use marquee_core::config::UPSTREAM_PAGE_CEILING;
use serde::{Deserialize, Serialize};

/// Base URL for poster images served by the TMDB image CDN.
pub const POSTER_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";

/// Unique identifier of a movie in the upstream catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MovieId(pub u64);

impl fmt::Display for MovieId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Movie record as rendered in a listing.
///
/// Sourced verbatim from the catalog and never mutated locally. Missing
/// numeric fields stay `None`; the projector decides how to order them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieSummary {
    pub id: MovieId,
    pub title: String,
    pub release_year: Option<i32>,
    /// Average rating, always within `0.0..=10.0` when present
    pub vote_average: Option<f64>,
    pub vote_count: Option<u64>,
    pub poster_path: Option<String>,
    pub original_language: Option<String>,
    pub overview: Option<String>,
}

impl MovieSummary {
    /// Creates a summary with only identity fields set.
    pub fn new(id: u64, title: impl Into<String>) -> Self {
        Self {
            id: MovieId(id),
            title: title.into(),
            release_year: None,
            vote_average: None,
            vote_count: None,
            poster_path: None,
            original_language: None,
            overview: None,
        }
    }

    /// Sets the release year.
    pub fn with_year(mut self, year: i32) -> Self {
        self.release_year = Some(year);
        self
    }

    /// Sets the average rating; values outside `0.0..=10.0` are dropped.
    pub fn with_rating(mut self, rating: f64) -> Self {
        self.vote_average = sanitize_vote_average(rating);
        self
    }

    /// Sets the vote count.
    pub fn with_vote_count(mut self, votes: u64) -> Self {
        self.vote_count = Some(votes);
        self
    }

    /// Full poster URL, if the movie has a poster.
    pub fn poster_url(&self) -> Option<String> {
        self.poster_path
            .as_deref()
            .map(|path| format!("{POSTER_BASE_URL}/{}", path.trim_start_matches('/')))
    }
}

/// Returns the rating when it is a finite value on the 0-10 scale.
pub fn sanitize_vote_average(rating: f64) -> Option<f64> {
    (rating.is_finite() && (0.0..=10.0).contains(&rating)).then_some(rating)
}

/// Full record for the movie details view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieDetails {
    pub id: MovieId,
    pub title: String,
    pub tagline: Option<String>,
    pub overview: Option<String>,
    pub release_year: Option<i32>,
    pub runtime_minutes: Option<u32>,
    pub genres: Vec<String>,
    pub vote_average: Option<f64>,
    pub vote_count: Option<u64>,
    pub poster_path: Option<String>,
    pub original_language: Option<String>,
}

impl MovieDetails {
    /// Format runtime as "2h 46m", or `None` when unknown.
    pub fn format_runtime(&self) -> Option<String> {
        let minutes = self.runtime_minutes.filter(|m| *m > 0)?;
        Some(match (minutes / 60, minutes % 60) {
            (0, m) => format!("{m}m"),
            (h, 0) => format!("{h}h"),
            (h, m) => format!("{h}h {m}m"),
        })
    }
}

/// One page of listing results as committed by the controller.
///
/// `total_pages` is always within `1..=500`; a missing or zero upstream
/// count means a single page. Deserialized pages go through the same clamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "StoredResultPage")]
pub struct ResultPage {
    items: Vec<MovieSummary>,
    total_pages: u32,
    requested_page: u32,
}

impl ResultPage {
    /// Builds a page, clamping the upstream page count to the API ceiling.
    pub fn new(items: Vec<MovieSummary>, total_pages: Option<u32>, requested_page: u32) -> Self {
        Self {
            items,
            total_pages: total_pages.unwrap_or(1).clamp(1, UPSTREAM_PAGE_CEILING),
            requested_page,
        }
    }

    /// Applies a tighter page ceiling than the upstream one.
    pub fn with_page_ceiling(mut self, ceiling: u32) -> Self {
        self.total_pages = self.total_pages.min(ceiling.max(1));
        self
    }

    pub fn items(&self) -> &[MovieSummary] {
        &self.items
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn requested_page(&self) -> u32 {
        self.requested_page
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[derive(Deserialize)]
struct StoredResultPage {
    items: Vec<MovieSummary>,
    total_pages: Option<u32>,
    requested_page: u32,
}

impl From<StoredResultPage> for ResultPage {
    fn from(stored: StoredResultPage) -> Self {
        ResultPage::new(stored.items, stored.total_pages, stored.requested_page)
    }
}

/// A (term, page) pair; a new value is created for every input or page change.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SearchQuery {
    term: String,
    page: u32,
}

impl SearchQuery {
    /// Creates a query; page numbers start at 1 and 0 is lifted to 1.
    pub fn new(term: impl Into<String>, page: u32) -> Self {
        Self {
            term: term.into(),
            page: page.max(1),
        }
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    /// Whether this query falls back to the discover feed.
    pub fn is_discover(&self) -> bool {
        self.term.trim().is_empty()
    }

    /// Translates the query into the catalog request it issues.
    pub fn to_request(&self) -> ListingRequest {
        if self.is_discover() {
            ListingRequest::Discover { page: self.page }
        } else {
            ListingRequest::Search {
                term: self.term.clone(),
                page: self.page,
            }
        }
    }
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self::new("", 1)
    }
}

/// Catalog request issued for a query.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ListingRequest {
    /// Popularity-ordered feed, adult and video content excluded.
    Discover { page: u32 },
    /// Title search.
    Search { term: String, page: u32 },
}

impl ListingRequest {
    pub fn page(&self) -> u32 {
        match self {
            ListingRequest::Discover { page } | ListingRequest::Search { page, .. } => *page,
        }
    }
}

/// Client-side ordering applied to a committed page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortKey {
    /// Keep the order the catalog returned.
    #[default]
    None,
    YearAsc,
    YearDesc,
    RatingAsc,
    RatingDesc,
    VoteCountAsc,
    VoteCountDesc,
}

impl SortKey {
    pub const ALL: [SortKey; 7] = [
        SortKey::None,
        SortKey::YearAsc,
        SortKey::YearDesc,
        SortKey::RatingAsc,
        SortKey::RatingDesc,
        SortKey::VoteCountAsc,
        SortKey::VoteCountDesc,
    ];
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect::<String>()
            .to_lowercase();

        match normalized.as_str() {
            "none" | "" => Ok(SortKey::None),
            "yearasc" => Ok(SortKey::YearAsc),
            "yeardesc" => Ok(SortKey::YearDesc),
            "ratingasc" => Ok(SortKey::RatingAsc),
            "ratingdesc" => Ok(SortKey::RatingDesc),
            "votecountasc" | "votesasc" => Ok(SortKey::VoteCountAsc),
            "votecountdesc" | "votesdesc" => Ok(SortKey::VoteCountDesc),
            _ => Err(format!("Invalid sort key: {s}")),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SortKey::None => "none",
            SortKey::YearAsc => "year-asc",
            SortKey::YearDesc => "year-desc",
            SortKey::RatingAsc => "rating-asc",
            SortKey::RatingDesc => "rating-desc",
            SortKey::VoteCountAsc => "vote-count-asc",
            SortKey::VoteCountDesc => "vote-count-desc",
        };
        write!(f, "{name}")
    }
}

/// Window for the trending feed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeWindow {
    Day,
    #[default]
    Week,
}

impl TimeWindow {
    pub fn as_str(self) -> &'static str {
        match self {
            TimeWindow::Day => "day",
            TimeWindow::Week => "week",
        }
    }
}

impl FromStr for TimeWindow {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "day" | "today" => Ok(TimeWindow::Day),
            "week" => Ok(TimeWindow::Week),
            _ => Err(format!("Invalid time window: {s}")),
        }
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_page_clamps_total_pages() {
        assert_eq!(ResultPage::new(Vec::new(), Some(900), 1).total_pages(), 500);
        assert_eq!(ResultPage::new(Vec::new(), Some(0), 1).total_pages(), 1);
        assert_eq!(ResultPage::new(Vec::new(), None, 1).total_pages(), 1);
        assert_eq!(ResultPage::new(Vec::new(), Some(3), 2).total_pages(), 3);
        assert_eq!(
            ResultPage::new(Vec::new(), Some(300), 1)
                .with_page_ceiling(100)
                .total_pages(),
            100
        );
    }

    #[test]
    fn test_deserialized_result_page_is_clamped() {
        let page: ResultPage =
            serde_json::from_str(r#"{"items":[],"total_pages":900,"requested_page":2}"#).unwrap();
        assert_eq!(page.total_pages(), 500);
        assert_eq!(page.requested_page(), 2);

        let page: ResultPage =
            serde_json::from_str(r#"{"items":[],"total_pages":0,"requested_page":1}"#).unwrap();
        assert_eq!(page.total_pages(), 1);

        let committed = ResultPage::new(vec![MovieSummary::new(1, "Dune")], Some(3), 1);
        let json = serde_json::to_string(&committed).unwrap();
        assert_eq!(serde_json::from_str::<ResultPage>(&json).unwrap(), committed);
    }

    #[test]
    fn test_query_request_translation() {
        assert_eq!(
            SearchQuery::new("", 1).to_request(),
            ListingRequest::Discover { page: 1 }
        );
        assert_eq!(
            SearchQuery::new("   ", 4).to_request(),
            ListingRequest::Discover { page: 4 }
        );
        assert_eq!(
            SearchQuery::new("dune", 2).to_request(),
            ListingRequest::Search {
                term: "dune".to_string(),
                page: 2
            }
        );
        assert_eq!(SearchQuery::new("dune", 0).page(), 1);
    }

    #[test]
    fn test_sort_key_parsing() {
        assert_eq!("yearAsc".parse::<SortKey>(), Ok(SortKey::YearAsc));
        assert_eq!("year-desc".parse::<SortKey>(), Ok(SortKey::YearDesc));
        assert_eq!("RATING_DESC".parse::<SortKey>(), Ok(SortKey::RatingDesc));
        assert_eq!("votes-asc".parse::<SortKey>(), Ok(SortKey::VoteCountAsc));
        assert_eq!("none".parse::<SortKey>(), Ok(SortKey::None));
        assert!("popularity".parse::<SortKey>().is_err());

        for key in SortKey::ALL {
            assert_eq!(key.to_string().parse::<SortKey>(), Ok(key));
        }
    }

    #[test]
    fn test_rating_sanitizing() {
        assert_eq!(sanitize_vote_average(7.5), Some(7.5));
        assert_eq!(sanitize_vote_average(0.0), Some(0.0));
        assert_eq!(sanitize_vote_average(10.5), None);
        assert_eq!(sanitize_vote_average(-1.0), None);
        assert_eq!(sanitize_vote_average(f64::NAN), None);
    }

    #[test]
    fn test_poster_url() {
        let mut movie = MovieSummary::new(1, "Dune");
        assert_eq!(movie.poster_url(), None);
        movie.poster_path = Some("/d5NXSklXo0qyIYkgV94XAgMIckC.jpg".to_string());
        assert_eq!(
            movie.poster_url().as_deref(),
            Some("https://image.tmdb.org/t/p/w500/d5NXSklXo0qyIYkgV94XAgMIckC.jpg")
        );
    }

    #[test]
    fn test_format_runtime() {
        let mut details = MovieDetails {
            id: MovieId(1),
            title: "Dune: Part Two".to_string(),
            tagline: None,
            overview: None,
            release_year: Some(2024),
            runtime_minutes: Some(166),
            genres: Vec::new(),
            vote_average: None,
            vote_count: None,
            poster_path: None,
            original_language: None,
        };
        assert_eq!(details.format_runtime().as_deref(), Some("2h 46m"));
        details.runtime_minutes = Some(120);
        assert_eq!(details.format_runtime().as_deref(), Some("2h"));
        details.runtime_minutes = Some(0);
        assert_eq!(details.format_runtime(), None);
    }
}
