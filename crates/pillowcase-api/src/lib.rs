//! Pillowcase API Library
//!
//! HTTP handlers, middleware and application setup for the image service.

mod api_doc;
mod handlers;
mod middleware;
mod telemetry;
mod utils;
mod validation;

pub mod error;
pub mod setup;
pub mod state;

// Re-exports
pub use error::{ErrorResponse, HttpAppError};
pub use state::AppState;
