//! Repository trait for beer persistence.
//!
//! The trait is the abstract interface between the service layer and a
//! storage backend. Absence of a row is never an error on reads; it is
//! represented as `None` or an empty page so callers decide what missing
//! data means for them.

use async_trait::async_trait;

use crate::api::{BeerStyle, PageRequest};
use crate::db::models::{Beer, BeerPage, NewBeer};

pub mod error;

pub use error::{ErrorContext, RepositoryError, RepositoryResult};

/// Repository trait for beer CRUD operations.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait BeerRepository: Send + Sync {
    /// Check if the storage backend is reachable.
    ///
    /// # Returns
    /// - `Ok(true)` if the connection is healthy
    /// - `Ok(false)` if unhealthy but no error occurred
    /// - `Err(RepositoryError)` if the check itself failed
    async fn health_check(&self) -> RepositoryResult<bool>;

    /// Look up a beer by its identifier.
    ///
    /// # Returns
    /// * `Ok(Some(Beer))` if the row exists
    /// * `Ok(None)` if it does not
    async fn find_by_id(&self, id: i32) -> RepositoryResult<Option<Beer>>;

    /// Look up a beer by its UPC business key.
    async fn find_by_upc(&self, upc: &str) -> RepositoryResult<Option<Beer>>;

    /// Fetch one page of beers matching the optional filters.
    ///
    /// # Arguments
    /// * `name_filter` - exact match on beer name when present
    /// * `style_filter` - exact match on beer style when present
    /// * `page` - offset/limit paging supplied by the caller; defaults are
    ///   the service layer's concern, not the repository's
    ///
    /// # Returns
    /// The matching rows for the page plus the total matching count. An
    /// empty page is a normal result, not an error.
    async fn find_page(
        &self,
        name_filter: Option<&str>,
        style_filter: Option<BeerStyle>,
        page: PageRequest,
    ) -> RepositoryResult<BeerPage>;

    /// Insert a new beer row.
    ///
    /// The store assigns the id and timestamps; `quantity_on_hand` starts
    /// at zero.
    ///
    /// # Returns
    /// * `Ok(Beer)` - the stored row including its assigned id
    /// * `Err(RepositoryError)` - on failure, including UPC uniqueness
    ///   violations
    async fn insert(&self, new_beer: &NewBeer) -> RepositoryResult<Beer>;

    /// Overwrite the mutable fields of an existing beer.
    ///
    /// `upc` is immutable and is not touched; `updated_at` is refreshed.
    ///
    /// # Returns
    /// * `Ok(Some(Beer))` - the updated row
    /// * `Ok(None)` - no row exists for `id`
    async fn update(&self, id: i32, update: &NewBeer) -> RepositoryResult<Option<Beer>>;

    /// Delete a beer row by id.
    ///
    /// # Returns
    /// * `Ok(true)` if a row was removed
    /// * `Ok(false)` if no row existed for `id`
    async fn delete_by_id(&self, id: i32) -> RepositoryResult<bool>;
}
