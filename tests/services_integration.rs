//! Service-layer integration tests.
//!
//! Drives the full beer lifecycle through the service functions against
//! the in-memory repository, the way the HTTP handlers do, without any
//! HTTP machinery in between.

use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::Arc;

use brewery_rest::api::{BeerDto, BeerStyle, PageRequest};
use brewery_rest::db::repositories::LocalRepository;
use brewery_rest::db::repository::{BeerRepository, RepositoryError};
use brewery_rest::db::services;

fn sagres() -> BeerDto {
    BeerDto {
        id: None,
        beer_name: Some("Sagres".to_string()),
        beer_style: Some(BeerStyle::PaleAle),
        upc: Some("0631234200036".to_string()),
        price: Some(Decimal::from_str("1.00").unwrap()),
        quantity_on_hand: None,
        created_date: None,
        last_modified_date: None,
    }
}

#[tokio::test]
async fn test_full_beer_lifecycle() {
    let repo = LocalRepository::new();

    // Create
    let created = services::save_new_beer(&repo, &sagres()).await.unwrap();
    let id = created.id.unwrap();
    assert_eq!(created.beer_name.as_deref(), Some("Sagres"));
    assert!(created.created_date.is_some());

    // Read back by id and by upc
    let fetched = services::get_beer_by_id(&repo, id, false)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(fetched.upc.as_deref(), Some("0631234200036"));

    let by_upc = services::get_beer_by_upc(&repo, "0631234200036")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(by_upc.id, Some(id));

    // Update
    let mut change = sagres();
    change.beer_name = Some("Sagres Bohemia".to_string());
    change.beer_style = Some(BeerStyle::Lager);
    let updated = services::update_beer(&repo, id, &change)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.beer_name.as_deref(), Some("Sagres Bohemia"));
    assert_eq!(updated.beer_style, Some(BeerStyle::Lager));

    // Listing sees the updated row
    let page = services::list_beers(&repo, None, None, None, false)
        .await
        .unwrap();
    assert_eq!(page.total_elements, 1);
    assert_eq!(page.content[0].beer_name.as_deref(), Some("Sagres Bohemia"));

    // Delete, then every lookup comes back empty
    services::delete_beer_by_id(&repo, id).await.unwrap();
    assert!(services::get_beer_by_id(&repo, id, false)
        .await
        .unwrap()
        .is_none());
    let err = services::delete_beer_by_id(&repo, id).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_inventory_visibility_per_operation() {
    let repo = LocalRepository::new();
    let created = services::save_new_beer(&repo, &sagres()).await.unwrap();
    let id = created.id.unwrap();

    let hidden = services::get_beer_by_id(&repo, id, false)
        .await
        .unwrap()
        .unwrap();
    assert!(hidden.quantity_on_hand.is_none());

    let shown = services::get_beer_by_id(&repo, id, true)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(shown.quantity_on_hand, Some(0));

    // The UPC lookup never exposes inventory.
    let by_upc = services::get_beer_by_upc(&repo, "0631234200036")
        .await
        .unwrap()
        .unwrap();
    assert!(by_upc.quantity_on_hand.is_none());
}

#[tokio::test]
async fn test_paging_across_many_rows() {
    let repo = LocalRepository::new();
    for i in 0..30 {
        let mut dto = sagres();
        dto.beer_name = Some(format!("Beer {}", i));
        dto.upc = Some(format!("{:013}", i));
        services::save_new_beer(&repo, &dto).await.unwrap();
    }

    // Default page request: first 25 of 30.
    let page = services::list_beers(&repo, None, None, None, false)
        .await
        .unwrap();
    assert_eq!(page.total_elements, 30);
    assert_eq!(page.total_pages, 2);
    assert_eq!(page.content.len(), 25);
    assert_eq!(page.number, 0);

    // Second page holds the remainder.
    let page = services::list_beers(&repo, None, None, Some(PageRequest::new(1, 25)), false)
        .await
        .unwrap();
    assert_eq!(page.content.len(), 5);
    assert_eq!(page.number, 1);
}

#[tokio::test]
async fn test_filters_compose() {
    let repo = LocalRepository::new();
    let mut a = sagres();
    a.beer_name = Some("Galaxy Cat".to_string());
    a.upc = Some("1".to_string());
    services::save_new_beer(&repo, &a).await.unwrap();

    let mut b = sagres();
    b.beer_name = Some("Galaxy Cat".to_string());
    b.beer_style = Some(BeerStyle::Stout);
    b.upc = Some("2".to_string());
    services::save_new_beer(&repo, &b).await.unwrap();

    let page = services::list_beers(
        &repo,
        Some("Galaxy Cat"),
        Some(BeerStyle::Stout),
        None,
        false,
    )
    .await
    .unwrap();
    assert_eq!(page.total_elements, 1);
    assert_eq!(page.content[0].beer_style, Some(BeerStyle::Stout));
}

#[tokio::test]
async fn test_services_work_through_trait_object() {
    // Handlers hold the repository as Arc<dyn BeerRepository>; the service
    // functions must accept the unsized form.
    let repo: Arc<dyn BeerRepository> = Arc::new(LocalRepository::new());
    let created = services::save_new_beer(repo.as_ref(), &sagres())
        .await
        .unwrap();
    assert!(created.id.is_some());
    assert!(services::health_check(repo.as_ref()).await.unwrap());
}

#[tokio::test]
async fn test_store_failure_surfaces_as_repository_error() {
    let repo = LocalRepository::new();
    services::save_new_beer(&repo, &sagres()).await.unwrap();
    repo.set_healthy(false);

    let err = services::list_beers(&repo, None, None, None, false)
        .await
        .unwrap_err();
    assert!(matches!(err, RepositoryError::ConnectionError { .. }));
}
