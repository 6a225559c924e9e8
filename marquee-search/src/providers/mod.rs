//! Movie catalog providers.

use async_trait::async_trait;

use crate::errors::CatalogError;
use crate::types::{ListingRequest, MovieDetails, MovieId, MovieSummary, ResultPage, TimeWindow};

pub mod demo;
pub mod mock;
pub mod tmdb;

pub use demo::DemoProvider;
#[cfg(test)]
pub use mock::{MockOutcome, MockProvider};
pub use tmdb::TmdbProvider;

/// Trait for movie catalog backends.
///
/// Implementations provide listing and lookup functionality through different
/// backends (the TMDB REST API, a built-in demo catalog, scripted mocks for
/// testing).
#[async_trait]
pub trait MovieProvider: Send + Sync + std::fmt::Debug {
    /// Fetches one page of the popularity-ordered discover feed.
    ///
    /// # Errors
    /// - `CatalogError::Network` - Network connectivity issues
    /// - `CatalogError::HttpStatus` - Catalog answered with a non-success status
    /// - `CatalogError::Parse` - Response body could not be decoded
    async fn discover(&self, page: u32) -> Result<ResultPage, CatalogError>;

    /// Fetches one page of title search results.
    ///
    /// # Errors
    /// - `CatalogError::Network` - Network connectivity issues
    /// - `CatalogError::HttpStatus` - Catalog answered with a non-success status
    /// - `CatalogError::Parse` - Response body could not be decoded
    async fn search(&self, term: &str, page: u32) -> Result<ResultPage, CatalogError>;

    /// Fetches the trending movies for a time window.
    ///
    /// # Errors
    /// - `CatalogError::Network` - Network connectivity issues
    /// - `CatalogError::HttpStatus` - Catalog answered with a non-success status
    async fn trending(&self, window: TimeWindow) -> Result<Vec<MovieSummary>, CatalogError>;

    /// Fetches the full record of one movie.
    ///
    /// # Errors
    /// - `CatalogError::NotFound` - No movie with this identifier
    /// - `CatalogError::Network` - Network connectivity issues
    async fn movie_details(&self, id: MovieId) -> Result<MovieDetails, CatalogError>;

    /// Dispatches a listing request to `discover` or `search`.
    ///
    /// # Errors
    /// - Any error of the dispatched call
    async fn fetch_listing(&self, request: &ListingRequest) -> Result<ResultPage, CatalogError> {
        match request {
            ListingRequest::Discover { page } => self.discover(*page).await,
            ListingRequest::Search { term, page } => self.search(term, *page).await,
        }
    }
}
