//! High-level beer service layer.
//!
//! Repository-agnostic business functions shared by both API surfaces.
//! This layer owns DTO mapping, default paging and the inventory
//! redaction; the HTTP layer owns status-code translation. Reads report
//! absence as `Ok(None)` — the only operation that signals absence as an
//! error is delete, which has nothing useful to return instead.

use tracing::info;

use crate::api::{BeerDto, BeerPagedList, BeerStyle, PageRequest};
use crate::db::models::{Beer, NewBeer};
use crate::db::repository::{BeerRepository, RepositoryError, RepositoryResult};

/// Map a stored beer to its wire representation.
///
/// When `show_inventory` is false the quantity field is withheld from the
/// DTO; this is display-only redaction, the repository always returns the
/// column.
fn to_dto(beer: Beer, show_inventory: bool) -> BeerDto {
    BeerDto {
        id: Some(beer.id),
        beer_name: Some(beer.beer_name),
        beer_style: Some(beer.beer_style),
        upc: Some(beer.upc),
        price: Some(beer.price),
        quantity_on_hand: show_inventory.then_some(beer.quantity_on_hand),
        created_date: Some(beer.created_at),
        last_modified_date: Some(beer.updated_at),
    }
}

/// Extract the writable fields from a validated payload.
///
/// Handlers validate payloads before dispatch; a missing required field
/// here means a caller skipped validation, which is reported as a
/// validation error rather than a panic.
fn to_new_beer(dto: &BeerDto) -> RepositoryResult<NewBeer> {
    let beer_name = dto
        .beer_name
        .clone()
        .ok_or_else(|| RepositoryError::validation("beerName is required"))?;
    let beer_style = dto
        .beer_style
        .ok_or_else(|| RepositoryError::validation("beerStyle is required"))?;
    let upc = dto
        .upc
        .clone()
        .ok_or_else(|| RepositoryError::validation("upc is required"))?;
    let price = dto
        .price
        .ok_or_else(|| RepositoryError::validation("price is required"))?;

    Ok(NewBeer {
        beer_name,
        beer_style,
        upc,
        price,
    })
}

/// Check if the storage backend is healthy.
pub async fn health_check<R: BeerRepository + ?Sized>(repo: &R) -> RepositoryResult<bool> {
    repo.health_check().await
}

/// Fetch a beer by id.
///
/// # Arguments
/// * `repo` - repository implementation
/// * `id` - beer identifier
/// * `show_inventory` - include `quantityOnHand` in the DTO
///
/// # Returns
/// * `Ok(Some(BeerDto))` if the beer exists
/// * `Ok(None)` if it does not (the handler maps this to 404)
pub async fn get_beer_by_id<R: BeerRepository + ?Sized>(
    repo: &R,
    id: i32,
    show_inventory: bool,
) -> RepositoryResult<Option<BeerDto>> {
    let beer = repo.find_by_id(id).await?;
    Ok(beer.map(|b| to_dto(b, show_inventory)))
}

/// Fetch a beer by its UPC. Same contract as [`get_beer_by_id`], keyed by
/// the business key; inventory is always withheld.
pub async fn get_beer_by_upc<R: BeerRepository + ?Sized>(
    repo: &R,
    upc: &str,
) -> RepositoryResult<Option<BeerDto>> {
    let beer = repo.find_by_upc(upc).await?;
    Ok(beer.map(|b| to_dto(b, false)))
}

/// List beers with optional filters and paging.
///
/// An absent page request defaults to page 0 with
/// [`crate::api::DEFAULT_PAGE_SIZE`] elements, unsorted beyond the
/// repository's stable id order. An empty result set is a valid page, not
/// an error.
pub async fn list_beers<R: BeerRepository + ?Sized>(
    repo: &R,
    name_filter: Option<&str>,
    style_filter: Option<BeerStyle>,
    page_request: Option<PageRequest>,
    show_inventory: bool,
) -> RepositoryResult<BeerPagedList> {
    let page = page_request.unwrap_or_default().normalized();
    let result = repo.find_page(name_filter, style_filter, page).await?;

    let content = result
        .beers
        .into_iter()
        .map(|b| to_dto(b, show_inventory))
        .collect();

    Ok(BeerPagedList::new(content, result.total_elements, page))
}

/// Persist a new beer.
///
/// Any client-supplied `id` is ignored; the store assigns one. Returns the
/// DTO with the assigned id populated.
pub async fn save_new_beer<R: BeerRepository + ?Sized>(
    repo: &R,
    dto: &BeerDto,
) -> RepositoryResult<BeerDto> {
    let new_beer = to_new_beer(dto)?;
    let stored = repo.insert(&new_beer).await?;
    info!("Stored new beer id={} upc={}", stored.id, stored.upc);
    Ok(to_dto(stored, false))
}

/// Overwrite the mutable fields of an existing beer.
///
/// # Returns
/// * `Ok(Some(BeerDto))` with the updated row
/// * `Ok(None)` if no row exists for `id` (the handler maps this to 404)
pub async fn update_beer<R: BeerRepository + ?Sized>(
    repo: &R,
    id: i32,
    dto: &BeerDto,
) -> RepositoryResult<Option<BeerDto>> {
    let update = to_new_beer(dto)?;
    let updated = repo.update(id, &update).await?;
    if updated.is_some() {
        info!("Updated beer id={}", id);
    }
    Ok(updated.map(|b| to_dto(b, false)))
}

/// Delete a beer by id.
///
/// # Returns
/// * `Ok(())` if the row was removed
/// * `Err(RepositoryError::NotFound)` if no row existed for `id`
pub async fn delete_beer_by_id<R: BeerRepository + ?Sized>(
    repo: &R,
    id: i32,
) -> RepositoryResult<()> {
    if repo.delete_by_id(id).await? {
        info!("Deleted beer id={}", id);
        Ok(())
    } else {
        Err(RepositoryError::not_found(format!("Beer {} not found", id)))
    }
}
