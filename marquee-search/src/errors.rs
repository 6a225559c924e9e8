//! Error types for catalog access and the listing controller.

use thiserror::Error;

use crate::types::MovieId;

/// Errors that can occur while talking to a movie catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Transport failed before a response arrived (connection, timeout, TLS).
    #[error("Network error: {reason}")]
    Network {
        /// The reason for the network error
        reason: String,
    },

    /// The catalog answered with a non-success status.
    #[error("Upstream returned HTTP {status}")]
    HttpStatus {
        /// HTTP status code returned by the catalog
        status: u16,
    },

    /// The response body could not be decoded.
    #[error("Parse error: {reason}")]
    Parse {
        /// The reason for the parse error
        reason: String,
    },

    /// No bearer credential was configured for the catalog.
    #[error("No API credential configured; set TMDB_API_KEY or MARQUEE_TMDB_TOKEN")]
    MissingCredential,

    /// The requested movie does not exist.
    #[error("Movie {id} not found")]
    NotFound {
        /// Identifier that was looked up
        id: MovieId,
    },

    /// The search analytics store rejected an operation.
    #[error("Analytics store error: {reason}")]
    Analytics {
        /// The reason for the analytics failure
        reason: String,
    },
}

/// Errors surfaced by the listing controller.
///
/// Every catalog failure collapses into `FetchFailed`; the shell never
/// learns whether connectivity, the upstream service or decoding broke.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ListingError {
    /// A discover or search fetch failed.
    #[error("Fetch failed: {reason}")]
    FetchFailed {
        /// Diagnostic detail, kept for logs only
        reason: String,
    },

    /// The controller actor is no longer running.
    #[error("Listing controller has shut down")]
    ControllerShutdown,
}

impl ListingError {
    /// Message shown to users for any failed fetch.
    pub const FETCH_FAILED_MESSAGE: &'static str =
        "Error fetching movies. Please try again later...";

    /// Returns a user-friendly error message suitable for display.
    pub fn user_message(&self) -> String {
        match self {
            ListingError::FetchFailed { .. } => Self::FETCH_FAILED_MESSAGE.to_string(),
            ListingError::ControllerShutdown => {
                "The movie listing is no longer available".to_string()
            }
        }
    }
}

impl From<CatalogError> for ListingError {
    fn from(error: CatalogError) -> Self {
        ListingError::FetchFailed {
            reason: error.to_string(),
        }
    }
}
