//! HTTP server module for the brewery backend.
//!
//! Axum-based HTTP layer exposing the beer service as a REST API. Two
//! parallel surfaces are mounted: the typed v1 handlers and the
//! functional-style v2 route table. Both are thin adapters over the single
//! service layer in [`crate::db::services`].

#[cfg(feature = "http-server")]
pub mod dto;

#[cfg(feature = "http-server")]
pub mod error;

#[cfg(feature = "http-server")]
pub mod functional;

#[cfg(feature = "http-server")]
pub mod handlers;

#[cfg(feature = "http-server")]
pub mod router;

#[cfg(feature = "http-server")]
pub mod state;

#[cfg(feature = "http-server")]
pub use router::create_router;

#[cfg(feature = "http-server")]
pub use state::AppState;
