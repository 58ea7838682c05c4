//! Request lifecycle: cancellation tokens, the route-bound controller and the
//! UI state projector it drives.

pub mod controller;
pub mod projector;
pub mod token;

#[cfg(test)]
pub(crate) mod testing;

pub use controller::{Completion, PendingFetch, RequestController};
pub use projector::{project, LifecycleEvent, UiState};
pub use token::{CancelSignal, RequestToken, TokenId};
