//! Movie listing controller.
//!
//! Turns raw search input, sort changes and page requests into at most one
//! authoritative result set. Input is debounced, every fetch carries an
//! epoch so out-of-order responses cannot overwrite fresher ones, and the
//! committed page is projected through a client-side sort and visible window.

mod actor;
mod commands;
pub mod debouncer;
mod handle;
pub mod orchestrator;
pub mod pagination;
pub mod projector;
mod state;

pub use actor::spawn_listing_controller;
pub use handle::ListingHandle;
pub use orchestrator::{FetchOrchestrator, FetchTicket, Settlement};
pub use pagination::{PageSlot, has_next, has_previous, page_window};
pub use projector::{ListingView, project};
pub use state::ControllerState;
