//! Search analytics: how often each term was searched, and what it found.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::errors::CatalogError;
use crate::types::{MovieId, MovieSummary};

/// Aggregated record for one search term.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchCount {
    pub term: String,
    pub count: u64,
    /// Top result the first time the term was recorded
    pub movie_id: MovieId,
    pub poster_url: Option<String>,
    /// Release year of the latest top result
    pub release_year: Option<i32>,
    /// Rating of the latest top result
    pub vote_average: Option<f64>,
}

/// Store for search-term popularity.
#[async_trait]
pub trait SearchAnalytics: Send + Sync + std::fmt::Debug {
    /// Counts one search for `term` whose top result was `top_movie`.
    ///
    /// # Errors
    /// - `CatalogError::Analytics` - Store rejected the update
    async fn record_search(&self, term: &str, top_movie: &MovieSummary) -> Result<(), CatalogError>;

    /// Most searched terms, highest count first.
    ///
    /// # Errors
    /// - `CatalogError::Analytics` - Store could not be read
    async fn top_searches(&self, limit: usize) -> Result<Vec<SearchCount>, CatalogError>;
}

/// Process-local analytics store.
#[derive(Debug, Default)]
pub struct InMemorySearchAnalytics {
    entries: Mutex<HashMap<String, SearchCount>>,
}

impl InMemorySearchAnalytics {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SearchAnalytics for InMemorySearchAnalytics {
    async fn record_search(
        &self,
        term: &str,
        top_movie: &MovieSummary,
    ) -> Result<(), CatalogError> {
        let term = term.trim();
        if term.is_empty() {
            return Err(CatalogError::Analytics {
                reason: "cannot record an empty search term".to_string(),
            });
        }

        let mut entries = self.entries.lock();
        entries
            .entry(term.to_string())
            .and_modify(|entry| {
                entry.count += 1;
                entry.release_year = top_movie.release_year;
                entry.vote_average = top_movie.vote_average;
            })
            .or_insert_with(|| SearchCount {
                term: term.to_string(),
                count: 1,
                movie_id: top_movie.id,
                poster_url: top_movie.poster_url(),
                release_year: top_movie.release_year,
                vote_average: top_movie.vote_average,
            });

        tracing::trace!(term, "Recorded search");
        Ok(())
    }

    async fn top_searches(&self, limit: usize) -> Result<Vec<SearchCount>, CatalogError> {
        let mut entries: Vec<SearchCount> = self.entries.lock().values().cloned().collect();
        entries.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.term.cmp(&b.term)));
        entries.truncate(limit);
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use tokio_test::{assert_err, assert_ok};

    use super::*;

    #[tokio::test]
    async fn test_counts_accumulate_per_term() {
        let analytics = InMemorySearchAnalytics::new();
        let dune = MovieSummary::new(438631, "Dune").with_year(2021).with_rating(7.8);
        let alien = MovieSummary::new(348, "Alien").with_year(1979);

        assert_ok!(analytics.record_search("dune", &dune).await);
        assert_ok!(analytics.record_search(" dune ", &dune).await);
        assert_ok!(analytics.record_search("alien", &alien).await);

        let top = analytics.top_searches(10).await.unwrap();
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].term, "dune");
        assert_eq!(top[0].count, 2);
        assert_eq!(top[0].movie_id, MovieId(438631));
        assert_eq!(top[1].term, "alien");
        assert_eq!(top[1].count, 1);
    }

    #[tokio::test]
    async fn test_repeat_search_keeps_first_movie_but_refreshes_stats() {
        let analytics = InMemorySearchAnalytics::new();
        let first = MovieSummary::new(1, "Dune").with_year(2021).with_rating(7.8);
        let later = MovieSummary::new(2, "Dune: Part Two").with_year(2024).with_rating(8.2);

        analytics.record_search("dune", &first).await.unwrap();
        analytics.record_search("dune", &later).await.unwrap();

        let top = analytics.top_searches(1).await.unwrap();
        assert_eq!(top[0].movie_id, MovieId(1));
        assert_eq!(top[0].release_year, Some(2024));
        assert_eq!(top[0].vote_average, Some(8.2));
    }

    #[tokio::test]
    async fn test_ties_order_by_term_and_limit_applies() {
        let analytics = InMemorySearchAnalytics::new();
        let movie = MovieSummary::new(1, "Anything");
        for term in ["zodiac", "alien", "matrix"] {
            analytics.record_search(term, &movie).await.unwrap();
        }

        let top = analytics.top_searches(2).await.unwrap();
        let terms: Vec<&str> = top.iter().map(|entry| entry.term.as_str()).collect();
        assert_eq!(terms, vec!["alien", "matrix"]);
    }

    #[tokio::test]
    async fn test_blank_term_is_rejected() {
        let analytics = InMemorySearchAnalytics::new();
        let result = analytics
            .record_search("   ", &MovieSummary::new(1, "Anything"))
            .await;
        assert!(matches!(result, Err(CatalogError::Analytics { .. })));

        assert_err!(analytics.record_search("", &MovieSummary::new(1, "Anything")).await);
        assert!(assert_ok!(analytics.top_searches(10).await).is_empty());
    }
}
