//! Centralized configuration for Marquee.
//!
//! All tunable parameters and settings are defined here to avoid
//! hard-coded values scattered throughout the codebase.

use std::time::Duration;

use crate::MarqueeError;

/// Upstream ceiling on the number of pages the movie API will serve.
pub const UPSTREAM_PAGE_CEILING: u32 = 500;

/// Central configuration for all Marquee components.
///
/// Groups related configuration settings into logical sections.
/// Supports environment variable overrides for runtime customization.
#[derive(Debug, Clone, Default)]
pub struct MarqueeConfig {
    pub api: ApiConfig,
    pub listing: ListingConfig,
}

/// Movie metadata API configuration.
///
/// Controls where requests go, which credential they carry, and how long
/// a single request may take before it counts as failed.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL of the TMDB v3 API
    pub base_url: String,
    /// Bearer credential sent with every request
    pub bearer_token: Option<String>,
    /// Response language requested from the API
    pub language: String,
    /// Per-request timeout
    pub request_timeout: Duration,
    /// User agent for HTTP requests
    pub user_agent: &'static str,
    /// Restricts the discover feed to a single release year
    pub discover_release_year: Option<u16>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.themoviedb.org/3".to_string(),
            bearer_token: None,
            language: "en-US".to_string(),
            request_timeout: Duration::from_secs(15),
            user_agent: "marquee/0.1.0",
            discover_release_year: None,
        }
    }
}

/// Listing controller configuration.
///
/// Controls debounce timing, the client-side visible window, and the
/// pagination ceiling applied to upstream page counts.
#[derive(Debug, Clone)]
pub struct ListingConfig {
    /// Quiet period before a raw search term becomes effective
    pub debounce_delay: Duration,
    /// Number of items rendered after every sort change
    pub default_visible_count: usize,
    /// Increment used by the "show more" affordance
    pub visible_count_step: usize,
    /// Ceiling applied to upstream total page counts
    pub max_total_pages: u32,
    /// Whether the controller fetches the discover feed when it starts
    pub load_on_start: bool,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            debounce_delay: Duration::from_millis(500),
            default_visible_count: 20,
            visible_count_step: 20,
            max_total_pages: UPSTREAM_PAGE_CEILING,
            load_on_start: true,
        }
    }
}

impl ListingConfig {
    /// Creates a configuration for deterministic controller tests.
    pub fn for_testing() -> Self {
        Self {
            load_on_start: false,
            ..Default::default()
        }
    }
}

impl MarqueeConfig {
    /// Creates configuration with environment variable overrides.
    ///
    /// Allows runtime configuration via environment variables while
    /// maintaining sensible defaults. Unparseable values are ignored.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        // API configuration overrides
        let token = std::env::var("MARQUEE_TMDB_TOKEN").or_else(|_| std::env::var("TMDB_API_KEY"));
        if let Ok(token) = token {
            if !token.trim().is_empty() {
                config.api.bearer_token = Some(token.trim().to_string());
            }
        }

        if let Ok(base_url) = std::env::var("MARQUEE_TMDB_BASE_URL") {
            config.api.base_url = base_url;
        }

        if let Ok(timeout) = std::env::var("MARQUEE_REQUEST_TIMEOUT") {
            if let Ok(seconds) = timeout.parse::<u64>() {
                config.api.request_timeout = Duration::from_secs(seconds);
            }
        }

        if let Ok(year) = std::env::var("MARQUEE_RELEASE_YEAR") {
            if let Ok(year) = year.parse::<u16>() {
                config.api.discover_release_year = Some(year);
            }
        }

        // Listing configuration overrides
        if let Ok(delay) = std::env::var("MARQUEE_DEBOUNCE_MS") {
            if let Ok(millis) = delay.parse::<u64>() {
                config.listing.debounce_delay = Duration::from_millis(millis);
            }
        }

        if let Ok(count) = std::env::var("MARQUEE_VISIBLE_COUNT") {
            if let Ok(count) = count.parse::<usize>() {
                config.listing.default_visible_count = count;
                config.listing.visible_count_step = count;
            }
        }

        config
    }

    /// Checks that the configuration can drive a listing.
    ///
    /// # Errors
    ///
    /// - `MarqueeError::Configuration` - Base URL is not an absolute http(s) URL,
    ///   or the visible count or page ceiling is zero
    pub fn validate(&self) -> Result<(), MarqueeError> {
        let base_url =
            url::Url::parse(&self.api.base_url).map_err(|e| MarqueeError::Configuration {
                reason: format!("invalid API base URL '{}': {e}", self.api.base_url),
            })?;

        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(MarqueeError::Configuration {
                reason: format!("unsupported API scheme '{}'", base_url.scheme()),
            });
        }

        if self.listing.default_visible_count == 0 {
            return Err(MarqueeError::Configuration {
                reason: "visible count must be at least 1".to_string(),
            });
        }

        if self.listing.max_total_pages == 0 {
            return Err(MarqueeError::Configuration {
                reason: "page ceiling must be at least 1".to_string(),
            });
        }

        Ok(())
    }
}
