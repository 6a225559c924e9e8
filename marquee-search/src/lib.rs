//! Marquee Search - Movie discovery and the listing controller
//!
//! Provides movie catalog backends (TMDB and an offline demo catalog), search
//! analytics, and the listing controller that debounces search input, keeps
//! only the latest fetch authoritative and projects the committed page into
//! a sorted, windowed view.

pub mod analytics;
pub mod errors;
pub mod listing;
pub mod providers;
pub mod types;

// Re-export main types
pub use analytics::{InMemorySearchAnalytics, SearchAnalytics, SearchCount};
pub use errors::{CatalogError, ListingError};
pub use listing::{ControllerState, ListingHandle, ListingView, spawn_listing_controller};
pub use providers::{DemoProvider, MovieProvider, TmdbProvider};
pub use types::{
    ListingRequest, MovieDetails, MovieId, MovieSummary, ResultPage, SearchQuery, SortKey,
    TimeWindow,
};

/// Convenience type alias for Results with CatalogError.
pub type Result<T> = std::result::Result<T, CatalogError>;
