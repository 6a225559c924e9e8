//! Command definitions for the listing controller actor.

use tokio::sync::oneshot;

use crate::errors::CatalogError;
use crate::types::{ResultPage, SortKey};

use super::state::ControllerState;

/// Commands that can be sent to the listing controller actor.
///
/// Shell commands carry an optional response channel; `Settled` is only
/// produced by the controller's own fetch tasks.
#[derive(Debug)]
pub enum ListingCommand {
    /// Raw search input changed; debounced before it takes effect.
    SetRawTerm { term: String },
    /// Change the client-side ordering.
    SetSortKey { key: SortKey },
    /// Fetch another page of the current effective term.
    RequestPage {
        page: u32,
        responder: oneshot::Sender<bool>,
    },
    /// Grow the visible window.
    ExpandVisibleCount { by: usize },
    /// Read the current state.
    Snapshot {
        responder: oneshot::Sender<ControllerState>,
    },
    /// Stop the actor gracefully.
    Shutdown { responder: oneshot::Sender<()> },
    /// Internal notification when a fetch finished.
    Settled {
        epoch: u64,
        outcome: Result<ResultPage, CatalogError>,
    },
}
