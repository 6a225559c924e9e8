//! Scripted provider for controller tests.

#![cfg(test)]

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use super::MovieProvider;
use crate::errors::CatalogError;
use crate::types::{ListingRequest, MovieDetails, MovieId, MovieSummary, ResultPage, TimeWindow};

/// Canned result of a scripted request.
#[derive(Debug, Clone)]
pub enum MockOutcome {
    Page(ResultPage),
    Status(u16),
}

#[derive(Debug, Clone)]
struct MockScript {
    delay: Duration,
    outcome: MockOutcome,
}

/// Mock provider for testing.
///
/// Records every listing request and answers with a scripted page or status
/// after a scripted delay. Unscripted requests get a single-movie page
/// titled after the request.
#[derive(Debug, Default)]
pub struct MockProvider {
    calls: Mutex<Vec<ListingRequest>>,
    scripts: Mutex<HashMap<ListingRequest, MockScript>>,
}

impl MockProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scripts the answer for one request.
    pub fn script(&self, request: ListingRequest, delay: Duration, outcome: MockOutcome) {
        self.scripts
            .lock()
            .insert(request, MockScript { delay, outcome });
    }

    /// Requests received so far, in arrival order.
    pub fn calls(&self) -> Vec<ListingRequest> {
        self.calls.lock().clone()
    }

    fn default_page(request: &ListingRequest) -> ResultPage {
        let title = match request {
            ListingRequest::Discover { page } => format!("Discover page {page}"),
            ListingRequest::Search { term, page } => format!("{term} page {page}"),
        };
        ResultPage::new(
            vec![MovieSummary::new(u64::from(request.page()), title)],
            Some(1),
            request.page(),
        )
    }

    async fn respond(&self, request: ListingRequest) -> Result<ResultPage, CatalogError> {
        self.calls.lock().push(request.clone());
        let script = self.scripts.lock().get(&request).cloned();

        let Some(script) = script else {
            return Ok(Self::default_page(&request));
        };

        if !script.delay.is_zero() {
            tokio::time::sleep(script.delay).await;
        }

        match script.outcome {
            MockOutcome::Page(page) => Ok(page),
            MockOutcome::Status(status) => Err(CatalogError::HttpStatus { status }),
        }
    }
}

#[async_trait]
impl MovieProvider for MockProvider {
    async fn discover(&self, page: u32) -> Result<ResultPage, CatalogError> {
        self.respond(ListingRequest::Discover { page }).await
    }

    async fn search(&self, term: &str, page: u32) -> Result<ResultPage, CatalogError> {
        self.respond(ListingRequest::Search {
            term: term.to_string(),
            page,
        })
        .await
    }

    async fn trending(&self, _window: TimeWindow) -> Result<Vec<MovieSummary>, CatalogError> {
        Ok(Vec::new())
    }

    async fn movie_details(&self, id: MovieId) -> Result<MovieDetails, CatalogError> {
        Err(CatalogError::NotFound { id })
    }
}
