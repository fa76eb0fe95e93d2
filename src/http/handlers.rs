//! HTTP handlers for the v1 REST surface.
//!
//! These handlers lean on axum's typed extractors for path, query and body
//! parsing, then delegate to the service layer. Status-code translation
//! happens here: an empty service result becomes 404, a validation failure
//! becomes 400 before the service is ever invoked.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use tracing::debug;

use super::dto::{HealthResponse, ListBeersQuery, ShowInventoryQuery};
use super::error::AppError;
use super::state::AppState;
use crate::api::{validate_beer_payload, BeerDto, BeerPagedList};
use crate::db::services;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

/// Unwrap a JSON body, mapping a deserialization failure to 400.
fn parse_body(payload: Result<Json<BeerDto>, JsonRejection>) -> Result<BeerDto, AppError> {
    match payload {
        Ok(Json(dto)) => Ok(dto),
        Err(rejection) => Err(AppError::BadRequest(format!(
            "Invalid beer payload: {}",
            rejection.body_text()
        ))),
    }
}

fn validate(dto: &BeerDto) -> Result<(), AppError> {
    validate_beer_payload(dto).map_err(AppError::Validation)
}

/// GET /health
///
/// Health check endpoint to verify the service is running and the store is
/// reachable.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let db_status = match services::health_check(state.repository.as_ref()).await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        database: db_status,
    }))
}

/// GET /api/v1/beer/{beerId}
///
/// 200 with the DTO when the beer exists, 404 otherwise. The optional
/// `showInventory` flag (default false) controls whether `quantityOnHand`
/// appears in the body.
pub async fn get_beer_by_id(
    State(state): State<AppState>,
    Path(beer_id): Path<i32>,
    Query(query): Query<ShowInventoryQuery>,
) -> HandlerResult<BeerDto> {
    let dto = services::get_beer_by_id(
        state.repository.as_ref(),
        beer_id,
        query.show_inventory(),
    )
    .await?;

    dto.map(Json).ok_or(AppError::NotFound)
}

/// GET /api/v1/beerUpc/{upc}
pub async fn get_beer_by_upc(
    State(state): State<AppState>,
    Path(upc): Path<String>,
) -> HandlerResult<BeerDto> {
    let dto = services::get_beer_by_upc(state.repository.as_ref(), &upc).await?;
    dto.map(Json).ok_or(AppError::NotFound)
}

/// GET /api/v1/beer
///
/// Paginated listing with optional `beerName` and `beerStyle` filters.
/// Always 200; an empty result set is a valid page, not a 404.
pub async fn list_beers(
    State(state): State<AppState>,
    Query(query): Query<ListBeersQuery>,
) -> HandlerResult<BeerPagedList> {
    debug!(
        "Listing beers name={:?} style={:?}",
        query.beer_name, query.beer_style
    );
    let page = services::list_beers(
        state.repository.as_ref(),
        query.beer_name.as_deref(),
        query.beer_style,
        query.page_request(),
        query.show_inventory(),
    )
    .await?;

    Ok(Json(page))
}

/// POST /api/v1/beer
///
/// Validates the payload, persists it and answers 201 with a `Location`
/// header pointing at the new resource; no body.
pub async fn create_beer(
    State(state): State<AppState>,
    payload: Result<Json<BeerDto>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let dto = parse_body(payload)?;
    validate(&dto)?;

    let saved = services::save_new_beer(state.repository.as_ref(), &dto).await?;
    let id = saved
        .id
        .ok_or_else(|| AppError::Repository(crate::db::repository::RepositoryError::internal(
            "Stored beer has no id",
        )))?;

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, format!("/api/v1/beer/{}", id))],
    ))
}

/// PUT /api/v1/beer/{beerId}
///
/// 204 when the row was updated, 404 when the target id does not exist.
pub async fn update_beer(
    State(state): State<AppState>,
    Path(beer_id): Path<i32>,
    payload: Result<Json<BeerDto>, JsonRejection>,
) -> Result<StatusCode, AppError> {
    let dto = parse_body(payload)?;
    validate(&dto)?;

    match services::update_beer(state.repository.as_ref(), beer_id, &dto).await? {
        Some(_) => Ok(StatusCode::NO_CONTENT),
        None => Err(AppError::NotFound),
    }
}

/// DELETE /api/v1/beer/{beerId}
///
/// 204 on success; a second delete for the same id answers 404 because the
/// service signals absence as NotFound.
pub async fn delete_beer(
    State(state): State<AppState>,
    Path(beer_id): Path<i32>,
) -> Result<StatusCode, AppError> {
    services::delete_beer_by_id(state.repository.as_ref(), beer_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
