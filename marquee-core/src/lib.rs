//! Marquee Core - Shared configuration and diagnostics
//!
//! This crate provides the pieces every Marquee component leans on:
//! centralized configuration with environment overrides, tracing setup,
//! and the top-level error type surfaced by the command-line shell.

pub mod config;
pub mod tracing_setup;

// Re-export main types for convenient access
pub use config::{ApiConfig, ListingConfig, MarqueeConfig};

/// Core errors that can bubble up to the Marquee shell.
#[derive(Debug, thiserror::Error)]
pub enum MarqueeError {
    #[error("Configuration error: {reason}")]
    Configuration { reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Catalog error: {reason}")]
    Search { reason: String },
}

impl MarqueeError {
    /// Returns a user-friendly error message suitable for display.
    pub fn user_message(&self) -> String {
        match self {
            MarqueeError::Configuration { reason } => format!("Configuration problem: {reason}"),
            MarqueeError::Io(_) => "File system error occurred".to_string(),
            MarqueeError::Search { .. } => {
                "Error fetching movies. Please try again later...".to_string()
            }
        }
    }

    /// Checks if this error is due to user input or setup rather than upstream failure.
    pub fn is_user_error(&self) -> bool {
        matches!(self, MarqueeError::Configuration { .. })
    }

    /// Wraps an error raised by the catalog layer.
    pub fn from_search_error(error: impl std::fmt::Display) -> Self {
        MarqueeError::Search {
            reason: error.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, MarqueeError>;
