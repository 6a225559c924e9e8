//! Actor implementation for the listing controller.

use std::sync::Arc;

use marquee_core::config::ListingConfig;
use tokio::sync::{mpsc, watch};

use super::commands::ListingCommand;
use super::debouncer::{Debounced, Debouncer};
use super::handle::ListingHandle;
use super::orchestrator::{FetchOrchestrator, FetchTicket, Settlement};
use super::state::ControllerState;
use crate::analytics::SearchAnalytics;
use crate::providers::MovieProvider;

/// Spawns the listing controller actor and returns its handle.
///
/// The actor owns the listing state and processes shell commands, debounced
/// terms and fetch outcomes one at a time. When `load_on_start` is set the
/// discover feed is requested before this function returns.
///
/// # Examples
/// ```rust,no_run
/// # #[tokio::main]
/// # async fn main() {
/// use std::sync::Arc;
/// use marquee_core::config::ListingConfig;
/// use marquee_search::listing::spawn_listing_controller;
/// use marquee_search::providers::DemoProvider;
///
/// let handle = spawn_listing_controller(
///     ListingConfig::default(),
///     Arc::new(DemoProvider::new()),
///     None,
/// );
/// handle.set_raw_term("dune").await.unwrap();
/// # }
/// ```
pub fn spawn_listing_controller(
    config: ListingConfig,
    provider: Arc<dyn MovieProvider>,
    analytics: Option<Arc<dyn SearchAnalytics>>,
) -> ListingHandle {
    let (sender, receiver) = mpsc::channel(100);
    let (settled_sender, settled_receiver) = mpsc::unbounded_channel();
    let (term_sender, term_receiver) = mpsc::unbounded_channel();

    let orchestrator = FetchOrchestrator::new(&config);
    let (state_sender, state_receiver) = watch::channel(orchestrator.state().clone());

    let mut controller = ListingController {
        orchestrator,
        debouncer: Debouncer::new(config.debounce_delay, term_sender),
        provider,
        analytics,
        settled_sender,
        state_sender,
    };

    if config.load_on_start {
        let ticket = controller.orchestrator.apply_effective_term(String::new());
        controller.dispatch(ticket);
        controller.publish();
    }

    tokio::spawn(async move {
        run_actor_loop(controller, receiver, settled_receiver, term_receiver).await;
    });

    ListingHandle::new(sender, state_receiver)
}

struct ListingController {
    orchestrator: FetchOrchestrator,
    debouncer: Debouncer<String>,
    provider: Arc<dyn MovieProvider>,
    analytics: Option<Arc<dyn SearchAnalytics>>,
    settled_sender: mpsc::UnboundedSender<ListingCommand>,
    state_sender: watch::Sender<ControllerState>,
}

impl ListingController {
    /// Handles a single command.
    /// Returns true to continue processing, false to shutdown.
    fn handle_command(&mut self, command: ListingCommand) -> bool {
        match command {
            ListingCommand::SetRawTerm { term } => {
                self.debouncer.push(term);
                return true;
            }

            ListingCommand::SetSortKey { key } => {
                self.orchestrator.set_sort_key(key);
            }

            ListingCommand::RequestPage { page, responder } => {
                let ticket = self.orchestrator.request_page(page);
                let issued = ticket.is_some();
                if let Some(ticket) = ticket {
                    self.dispatch(ticket);
                }
                let _ = responder.send(issued);
            }

            ListingCommand::ExpandVisibleCount { by } => {
                self.orchestrator.expand_visible_count(by);
            }

            ListingCommand::Snapshot { responder } => {
                let _ = responder.send(self.orchestrator.state().clone());
                return true;
            }

            ListingCommand::Shutdown { responder } => {
                self.debouncer.cancel();
                let _ = responder.send(());
                return false;
            }

            ListingCommand::Settled { epoch, outcome } => {
                if self.orchestrator.settle(epoch, outcome) == Settlement::Committed {
                    self.record_search();
                }
            }
        }

        self.publish();
        true
    }

    fn on_debounced(&mut self, emission: Debounced<String>) {
        let Some(term) = self.debouncer.accept(emission) else {
            return;
        };
        let ticket = self.orchestrator.apply_effective_term(term);
        self.dispatch(ticket);
        self.publish();
    }

    /// Runs the fetch for `ticket` on its own task.
    ///
    /// The outcome comes back as `ListingCommand::Settled`.
    fn dispatch(&self, ticket: FetchTicket) {
        tracing::debug!(epoch = ticket.epoch, request = ?ticket.request, "Issuing listing fetch");

        let provider = Arc::clone(&self.provider);
        let settled_sender = self.settled_sender.clone();
        tokio::spawn(async move {
            let outcome = provider.fetch_listing(&ticket.request).await;
            let _ = settled_sender.send(ListingCommand::Settled {
                epoch: ticket.epoch,
                outcome,
            });
        });
    }

    /// Reports a committed search to the analytics recorder.
    fn record_search(&self) {
        let Some(analytics) = &self.analytics else {
            return;
        };
        let state = self.orchestrator.state();
        if state.query.is_discover() {
            return;
        }
        let Some(top_movie) = state.items().first().cloned() else {
            return;
        };

        let analytics = Arc::clone(analytics);
        let term = state.query.term().to_string();
        tokio::spawn(async move {
            if let Err(e) = analytics.record_search(&term, &top_movie).await {
                tracing::warn!(term, error = %e, "Failed to record search");
            }
        });
    }

    fn publish(&self) {
        self.state_sender.send_replace(self.orchestrator.state().clone());
    }
}

/// Runs the main actor message processing loop.
///
/// The loop ends on a shutdown command or once every handle is dropped.
async fn run_actor_loop(
    mut controller: ListingController,
    mut receiver: mpsc::Receiver<ListingCommand>,
    mut settled_receiver: mpsc::UnboundedReceiver<ListingCommand>,
    mut term_receiver: mpsc::UnboundedReceiver<Debounced<String>>,
) {
    tracing::debug!("Listing controller actor started");

    loop {
        tokio::select! {
            command = receiver.recv() => {
                let Some(command) = command else {
                    break;
                };
                if !controller.handle_command(command) {
                    break;
                }
            }
            Some(command) = settled_receiver.recv() => {
                controller.handle_command(command);
            }
            Some(emission) = term_receiver.recv() => {
                controller.on_debounced(emission);
            }
        }
    }

    tracing::debug!("Listing controller actor stopped");
}
