//! Handle for communicating with the listing controller actor.

use tokio::sync::{mpsc, oneshot, watch};

use super::commands::ListingCommand;
use super::projector::ListingView;
use super::state::ControllerState;
use crate::errors::ListingError;
use crate::types::SortKey;

/// Handle for communicating with the listing controller actor.
///
/// Commands go through the actor's queue; state is read from the watch
/// channel the actor publishes to after every change. Cheap to clone.
#[derive(Debug, Clone)]
pub struct ListingHandle {
    sender: mpsc::Sender<ListingCommand>,
    state: watch::Receiver<ControllerState>,
}

impl ListingHandle {
    pub(super) fn new(
        sender: mpsc::Sender<ListingCommand>,
        state: watch::Receiver<ControllerState>,
    ) -> Self {
        Self { sender, state }
    }

    /// Feeds raw search input; it takes effect once the input settles.
    ///
    /// # Errors
    /// - `ListingError::ControllerShutdown` - Actor is no longer running
    pub async fn set_raw_term(&self, term: impl Into<String>) -> Result<(), ListingError> {
        self.send(ListingCommand::SetRawTerm { term: term.into() })
            .await
    }

    /// Changes the client-side ordering of the committed page.
    ///
    /// # Errors
    /// - `ListingError::ControllerShutdown` - Actor is no longer running
    pub async fn set_sort_key(&self, key: SortKey) -> Result<(), ListingError> {
        self.send(ListingCommand::SetSortKey { key }).await
    }

    /// Requests another page of the current effective term.
    ///
    /// Returns whether a fetch was issued; out-of-range pages are ignored.
    ///
    /// # Errors
    /// - `ListingError::ControllerShutdown` - Actor is no longer running
    pub async fn request_page(&self, page: u32) -> Result<bool, ListingError> {
        let (responder, rx) = oneshot::channel();
        self.send(ListingCommand::RequestPage { page, responder })
            .await?;

        rx.await.map_err(|_| ListingError::ControllerShutdown)
    }

    /// Shows `by` more items of the committed page.
    ///
    /// # Errors
    /// - `ListingError::ControllerShutdown` - Actor is no longer running
    pub async fn expand_visible_count(&self, by: usize) -> Result<(), ListingError> {
        self.send(ListingCommand::ExpandVisibleCount { by }).await
    }

    /// Reads the state straight from the actor.
    ///
    /// Unlike `current`, this waits until every command queued before it
    /// has been processed.
    ///
    /// # Errors
    /// - `ListingError::ControllerShutdown` - Actor is no longer running
    pub async fn snapshot(&self) -> Result<ControllerState, ListingError> {
        let (responder, rx) = oneshot::channel();
        self.send(ListingCommand::Snapshot { responder }).await?;

        rx.await.map_err(|_| ListingError::ControllerShutdown)
    }

    /// Last published state.
    pub fn current(&self) -> ControllerState {
        self.state.borrow().clone()
    }

    /// Projected view of the last published state.
    pub fn view(&self) -> ListingView {
        ListingView::from_state(&self.state.borrow())
    }

    /// Receiver that is notified on every state change.
    pub fn subscribe(&self) -> watch::Receiver<ControllerState> {
        self.state.clone()
    }

    /// Waits until the published state satisfies `predicate`.
    ///
    /// # Errors
    /// - `ListingError::ControllerShutdown` - Actor stopped before the state matched
    pub async fn wait_for<F>(&self, predicate: F) -> Result<ControllerState, ListingError>
    where
        F: FnMut(&ControllerState) -> bool,
    {
        let mut receiver = self.state.clone();
        let state = receiver
            .wait_for(predicate)
            .await
            .map_err(|_| ListingError::ControllerShutdown)?;
        Ok(state.clone())
    }

    /// Stops the actor and waits for it to acknowledge.
    ///
    /// # Errors
    /// - `ListingError::ControllerShutdown` - Actor was already gone
    pub async fn shutdown(&self) -> Result<(), ListingError> {
        let (responder, rx) = oneshot::channel();
        self.send(ListingCommand::Shutdown { responder }).await?;

        rx.await.map_err(|_| ListingError::ControllerShutdown)
    }

    async fn send(&self, command: ListingCommand) -> Result<(), ListingError> {
        self.sender
            .send(command)
            .await
            .map_err(|_| ListingError::ControllerShutdown)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use marquee_core::config::ListingConfig;
    use tokio_test::assert_ok;

    use super::*;
    use crate::analytics::{InMemorySearchAnalytics, SearchAnalytics};
    use crate::listing::spawn_listing_controller;
    use crate::providers::{MockOutcome, MockProvider};
    use crate::types::{ListingRequest, MovieSummary, ResultPage};

    const DEBOUNCE: Duration = Duration::from_millis(500);

    fn search(term: &str, page: u32) -> ListingRequest {
        ListingRequest::Search {
            term: term.to_string(),
            page,
        }
    }

    fn spawn(provider: &Arc<MockProvider>) -> ListingHandle {
        spawn_listing_controller(ListingConfig::for_testing(), provider.clone(), None)
    }

    async fn settled(handle: &ListingHandle) -> ControllerState {
        handle
            .wait_for(|state| state.request_epoch > 0 && !state.loading)
            .await
            .unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn test_typing_burst_issues_single_search() {
        let provider = Arc::new(MockProvider::new());
        let handle = spawn(&provider);

        for term in ["d", "du", "dun", "dune"] {
            handle.set_raw_term(term).await.unwrap();
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
        let state = settled(&handle).await;

        assert_eq!(provider.calls(), vec![search("dune", 1)]);
        assert_eq!(state.request_epoch, 1);
        assert_eq!(state.items()[0].title, "dune page 1");
    }

    #[tokio::test(start_paused = true)]
    async fn test_discover_feed_loads_on_start() {
        let provider = Arc::new(MockProvider::new());
        let config = ListingConfig {
            load_on_start: true,
            ..ListingConfig::for_testing()
        };
        let handle = spawn_listing_controller(config, provider.clone(), None);

        assert!(handle.current().loading);
        let state = settled(&handle).await;
        assert_eq!(provider.calls(), vec![ListingRequest::Discover { page: 1 }]);
        assert_eq!(state.items()[0].title, "Discover page 1");
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_stale_response_is_never_committed() {
        let provider = Arc::new(MockProvider::new());
        provider.script(
            search("alien", 1),
            Duration::from_secs(5),
            MockOutcome::Page(ResultPage::new(vec![MovieSummary::new(348, "Alien")], Some(1), 1)),
        );
        provider.script(
            search("aliens", 1),
            Duration::from_millis(50),
            MockOutcome::Page(ResultPage::new(vec![MovieSummary::new(679, "Aliens")], Some(1), 1)),
        );
        let handle = spawn(&provider);

        handle.set_raw_term("alien").await.unwrap();
        tokio::time::sleep(DEBOUNCE + Duration::from_millis(10)).await;
        handle.set_raw_term("aliens").await.unwrap();

        let state = handle
            .wait_for(|state| state.request_epoch == 2 && !state.loading)
            .await
            .unwrap();
        assert_eq!(state.items()[0].title, "Aliens");

        // Let the stale "alien" response arrive.
        tokio::time::sleep(Duration::from_secs(10)).await;
        let state = handle.snapshot().await.unwrap();
        assert_eq!(state.items()[0].title, "Aliens");
        assert_eq!(provider.calls(), vec![search("alien", 1), search("aliens", 1)]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_fetch_surfaces_generic_message() {
        let provider = Arc::new(MockProvider::new());
        provider.script(search("dune", 1), Duration::ZERO, MockOutcome::Status(503));
        let handle = spawn(&provider);

        handle.set_raw_term("dune").await.unwrap();
        let state = settled(&handle).await;

        assert_eq!(state.page, None);
        assert_eq!(
            state.error.as_deref(),
            Some(ListingError::FETCH_FAILED_MESSAGE)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_page_requests_follow_effective_term_and_bounds() {
        let provider = Arc::new(MockProvider::new());
        provider.script(
            search("dune", 1),
            Duration::ZERO,
            MockOutcome::Page(ResultPage::new(vec![MovieSummary::new(1, "Dune")], Some(3), 1)),
        );
        let handle = spawn(&provider);

        handle.set_raw_term("dune").await.unwrap();
        settled(&handle).await;

        assert!(!handle.request_page(4).await.unwrap());
        assert!(handle.request_page(2).await.unwrap());
        let state = handle
            .wait_for(|state| state.request_epoch == 2 && !state.loading)
            .await
            .unwrap();

        assert_eq!(state.query.page(), 2);
        assert_eq!(provider.calls(), vec![search("dune", 1), search("dune", 2)]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_sort_and_visible_window_shape_the_view() {
        let provider = Arc::new(MockProvider::new());
        let items: Vec<MovieSummary> = (1..=30)
            .map(|id| MovieSummary::new(id, format!("Movie {id}")).with_year(1990 + id as i32))
            .collect();
        provider.script(
            search("movie", 1),
            Duration::ZERO,
            MockOutcome::Page(ResultPage::new(items, Some(1), 1)),
        );
        let handle = spawn(&provider);

        handle.set_raw_term("movie").await.unwrap();
        settled(&handle).await;

        handle.expand_visible_count(20).await.unwrap();
        handle.snapshot().await.unwrap();
        assert_eq!(handle.view().items.len(), 30);

        handle.set_sort_key(SortKey::YearDesc).await.unwrap();
        handle.snapshot().await.unwrap();
        let view = handle.view();
        assert_eq!(view.items.len(), 20);
        assert_eq!(view.hidden_count, 10);
        assert_eq!(view.items[0].title, "Movie 30");
    }

    #[tokio::test(start_paused = true)]
    async fn test_committed_search_is_recorded() {
        let provider = Arc::new(MockProvider::new());
        let analytics = Arc::new(InMemorySearchAnalytics::new());
        let handle = spawn_listing_controller(
            ListingConfig {
                load_on_start: true,
                ..ListingConfig::for_testing()
            },
            provider.clone(),
            Some(analytics.clone() as Arc<dyn SearchAnalytics>),
        );
        settled(&handle).await;

        handle.set_raw_term("dune").await.unwrap();
        handle
            .wait_for(|state| state.request_epoch == 2 && !state.loading)
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(10)).await;

        let top = analytics.top_searches(10).await.unwrap();
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].term, "dune");
        assert_eq!(top[0].count, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_handle_fails_after_shutdown() {
        let provider = Arc::new(MockProvider::new());
        let handle = spawn(&provider);

        assert_ok!(handle.set_raw_term("dune").await);
        assert_ok!(handle.shutdown().await);

        tokio::time::sleep(DEBOUNCE * 2).await;
        assert!(provider.calls().is_empty());
        assert_eq!(
            handle.set_raw_term("alien").await,
            Err(ListingError::ControllerShutdown)
        );
        assert_eq!(handle.snapshot().await, Err(ListingError::ControllerShutdown));
    }
}
