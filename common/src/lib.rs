//! Shared core of the GitHub roaster: username validation, the route table,
//! wire models and the request lifecycle that turns route changes into
//! cancellable roast requests.
//!
//! Nothing in this crate touches the browser, so everything here builds and
//! is tested natively. The `frontend` crate supplies the HTTP client and the
//! history integration.

pub mod client;
pub mod config;
pub mod identifier;
pub mod lifecycle;
pub mod model;
pub mod requests;
pub mod route;

pub use client::{RequestFailure, RoastApi};
pub use config::ApiConfig;
pub use identifier::{validate, ResourceIdentifier, ValidationError};
pub use route::{submit, NavigationIntent, Route};
