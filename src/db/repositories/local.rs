//! In-memory local repository implementation.
//!
//! Stores all beers in a `HashMap` behind an `RwLock`, providing fast,
//! deterministic and isolated execution for unit tests and local
//! development. It enforces the same row-level invariants as the SQL
//! backend: ids are assigned monotonically, UPCs are unique, and the
//! store owns the timestamps.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::api::{BeerStyle, PageRequest};
use crate::db::models::{Beer, BeerPage, NewBeer};
use crate::db::repository::{BeerRepository, ErrorContext, RepositoryError, RepositoryResult};

/// In-memory local repository.
///
/// # Example
/// ```
/// use brewery_rest::db::repositories::LocalRepository;
///
/// let repo = LocalRepository::new();
/// assert_eq!(repo.beer_count(), 0);
/// ```
#[derive(Clone)]
pub struct LocalRepository {
    data: Arc<RwLock<LocalData>>,
}

struct LocalData {
    beers: HashMap<i32, Beer>,
    next_beer_id: i32,
    is_healthy: bool,
}

impl Default for LocalData {
    fn default() -> Self {
        Self {
            beers: HashMap::new(),
            next_beer_id: 1,
            is_healthy: true,
        }
    }
}

impl LocalRepository {
    /// Create a new empty local repository.
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(LocalData::default())),
        }
    }

    /// Set the health status for testing connection failures.
    pub fn set_healthy(&self, healthy: bool) {
        let mut data = self.data.write().unwrap();
        data.is_healthy = healthy;
    }

    /// Clear all data from the repository.
    pub fn clear(&self) {
        let mut data = self.data.write().unwrap();
        *data = LocalData {
            is_healthy: data.is_healthy,
            ..Default::default()
        };
    }

    /// Get the number of beers stored.
    pub fn beer_count(&self) -> usize {
        self.data.read().unwrap().beers.len()
    }

    /// Check if a beer exists.
    pub fn has_beer(&self, id: i32) -> bool {
        self.data.read().unwrap().beers.contains_key(&id)
    }

    fn guard_healthy(data: &LocalData, operation: &str) -> RepositoryResult<()> {
        if data.is_healthy {
            Ok(())
        } else {
            Err(RepositoryError::ConnectionError {
                message: "Local repository marked unhealthy".to_string(),
                context: ErrorContext::new(operation).retryable(),
            })
        }
    }
}

impl Default for LocalRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BeerRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(self.data.read().unwrap().is_healthy)
    }

    async fn find_by_id(&self, id: i32) -> RepositoryResult<Option<Beer>> {
        let data = self.data.read().unwrap();
        Self::guard_healthy(&data, "find_by_id")?;
        Ok(data.beers.get(&id).cloned())
    }

    async fn find_by_upc(&self, upc: &str) -> RepositoryResult<Option<Beer>> {
        let data = self.data.read().unwrap();
        Self::guard_healthy(&data, "find_by_upc")?;
        Ok(data.beers.values().find(|b| b.upc == upc).cloned())
    }

    async fn find_page(
        &self,
        name_filter: Option<&str>,
        style_filter: Option<BeerStyle>,
        page: PageRequest,
    ) -> RepositoryResult<BeerPage> {
        let data = self.data.read().unwrap();
        Self::guard_healthy(&data, "find_page")?;

        let mut matching: Vec<&Beer> = data
            .beers
            .values()
            .filter(|b| name_filter.map_or(true, |name| b.beer_name == name))
            .filter(|b| style_filter.map_or(true, |style| b.beer_style == style))
            .collect();
        // Deterministic order regardless of HashMap iteration.
        matching.sort_by_key(|b| b.id);

        let total_elements = matching.len() as u64;
        let offset = usize::try_from(page.offset()).unwrap_or(usize::MAX);
        let beers = matching
            .into_iter()
            .skip(offset)
            .take(page.page_size as usize)
            .cloned()
            .collect();

        Ok(BeerPage {
            beers,
            total_elements,
        })
    }

    async fn insert(&self, new_beer: &NewBeer) -> RepositoryResult<Beer> {
        let mut data = self.data.write().unwrap();
        Self::guard_healthy(&data, "insert")?;

        // Mirror the SQL unique constraint on upc.
        if data.beers.values().any(|b| b.upc == new_beer.upc) {
            return Err(RepositoryError::query_with_context(
                format!("duplicate key value for upc {}", new_beer.upc),
                ErrorContext::new("insert").with_details("unique_violation"),
            ));
        }

        let id = data.next_beer_id;
        data.next_beer_id += 1;

        let now = Utc::now();
        let beer = Beer {
            id,
            beer_name: new_beer.beer_name.clone(),
            beer_style: new_beer.beer_style,
            upc: new_beer.upc.clone(),
            price: new_beer.price,
            quantity_on_hand: 0,
            created_at: now,
            updated_at: now,
        };
        data.beers.insert(id, beer.clone());
        Ok(beer)
    }

    async fn update(&self, id: i32, update: &NewBeer) -> RepositoryResult<Option<Beer>> {
        let mut data = self.data.write().unwrap();
        Self::guard_healthy(&data, "update")?;

        match data.beers.get_mut(&id) {
            Some(beer) => {
                // upc is immutable; id, created_at and inventory are preserved.
                beer.beer_name = update.beer_name.clone();
                beer.beer_style = update.beer_style;
                beer.price = update.price;
                beer.updated_at = Utc::now();
                Ok(Some(beer.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete_by_id(&self, id: i32) -> RepositoryResult<bool> {
        let mut data = self.data.write().unwrap();
        Self::guard_healthy(&data, "delete_by_id")?;
        Ok(data.beers.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn new_beer(name: &str, upc: &str) -> NewBeer {
        NewBeer {
            beer_name: name.to_string(),
            beer_style: BeerStyle::PaleAle,
            upc: upc.to_string(),
            price: Decimal::new(595, 2),
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_sequential_ids() {
        let repo = LocalRepository::new();
        let a = repo.insert(&new_beer("A", "1")).await.unwrap();
        let b = repo.insert(&new_beer("B", "2")).await.unwrap();
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
        assert_eq!(a.quantity_on_hand, 0);
    }

    #[tokio::test]
    async fn test_duplicate_upc_rejected() {
        let repo = LocalRepository::new();
        repo.insert(&new_beer("A", "0631234200036")).await.unwrap();
        let err = repo
            .insert(&new_beer("B", "0631234200036"))
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::QueryError { .. }));
        assert_eq!(repo.beer_count(), 1);
    }

    #[tokio::test]
    async fn test_update_preserves_upc_and_created_at() {
        let repo = LocalRepository::new();
        let stored = repo.insert(&new_beer("A", "1")).await.unwrap();

        let mut change = new_beer("Renamed", "different-upc");
        change.beer_style = BeerStyle::Stout;
        let updated = repo.update(stored.id, &change).await.unwrap().unwrap();

        assert_eq!(updated.beer_name, "Renamed");
        assert_eq!(updated.beer_style, BeerStyle::Stout);
        assert_eq!(updated.upc, "1");
        assert_eq!(updated.created_at, stored.created_at);
        assert!(updated.updated_at >= stored.updated_at);
    }

    #[tokio::test]
    async fn test_update_missing_returns_none() {
        let repo = LocalRepository::new();
        let result = repo.update(999, &new_beer("A", "1")).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_delete_reports_absence() {
        let repo = LocalRepository::new();
        let stored = repo.insert(&new_beer("A", "1")).await.unwrap();
        assert!(repo.delete_by_id(stored.id).await.unwrap());
        assert!(!repo.delete_by_id(stored.id).await.unwrap());
        assert!(!repo.has_beer(stored.id));
    }

    #[tokio::test]
    async fn test_find_page_filters_and_counts() {
        let repo = LocalRepository::new();
        repo.insert(&new_beer("Galaxy Cat", "1")).await.unwrap();
        repo.insert(&new_beer("Galaxy Cat", "2")).await.unwrap();
        let mut other = new_beer("Crank", "3");
        other.beer_style = BeerStyle::Ipa;
        repo.insert(&other).await.unwrap();

        let page = repo
            .find_page(Some("Galaxy Cat"), None, PageRequest::default())
            .await
            .unwrap();
        assert_eq!(page.total_elements, 2);
        assert_eq!(page.beers.len(), 2);

        let page = repo
            .find_page(None, Some(BeerStyle::Ipa), PageRequest::default())
            .await
            .unwrap();
        assert_eq!(page.total_elements, 1);
        assert_eq!(page.beers[0].beer_name, "Crank");

        let page = repo
            .find_page(Some("Nope"), None, PageRequest::default())
            .await
            .unwrap();
        assert_eq!(page.total_elements, 0);
        assert!(page.beers.is_empty());
    }

    #[tokio::test]
    async fn test_find_page_offset_and_limit() {
        let repo = LocalRepository::new();
        for i in 0..5 {
            repo.insert(&new_beer(&format!("Beer {}", i), &i.to_string()))
                .await
                .unwrap();
        }

        let page = repo
            .find_page(None, None, PageRequest::new(1, 2))
            .await
            .unwrap();
        assert_eq!(page.total_elements, 5);
        assert_eq!(page.beers.len(), 2);
        assert_eq!(page.beers[0].id, 3);
        assert_eq!(page.beers[1].id, 4);
    }

    #[tokio::test]
    async fn test_unhealthy_repository_fails_reads() {
        let repo = LocalRepository::new();
        repo.set_healthy(false);
        assert!(!repo.health_check().await.unwrap());
        let err = repo.find_by_id(1).await.unwrap_err();
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn test_clear_resets_ids() {
        let repo = LocalRepository::new();
        repo.insert(&new_beer("A", "1")).await.unwrap();
        repo.clear();
        assert_eq!(repo.beer_count(), 0);
        let again = repo.insert(&new_beer("B", "2")).await.unwrap();
        assert_eq!(again.id, 1);
    }
}
