//! # Brewery REST Backend
//!
//! Reactive CRUD service for a single beer resource, backed by a
//! relational store accessed through a non-blocking driver.
//!
//! ## Features
//!
//! - **Lookup**: fetch a beer by id or by its UPC business key
//! - **Listing**: paginated listing with optional name/style filters
//! - **Mutation**: create, update and delete operations
//! - **Two REST surfaces**: a typed v1 API and a functional-style v2 API
//!   sharing one service layer
//!
//! ## Architecture
//!
//! The crate is organized into three logical modules:
//!
//! - [`api`]: wire-facing DTOs and payload validation
//! - [`db`]: repository pattern, service layer and persistence backends
//! - [`http`]: axum-based HTTP server, routers and request handlers
//!
//! Requests flow router → handler → service → repository → store; the
//! response flows back through the same chain with DTO mapping and HTTP
//! status translation at the handler boundary.

pub mod api;

pub mod db;

#[cfg(feature = "http-server")]
pub mod http;
