//! Functional-style v2 REST surface.
//!
//! Exposes the same operations as the v1 handlers, but routes are declared
//! as an explicit table of (method, path, handler) bindings and every path
//! and query parameter is pulled out of the raw request parts by hand.
//! Both surfaces share the service layer, so there is exactly one
//! implementation of the semantics.

use std::collections::HashMap;

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use super::error::AppError;
use super::state::AppState;
use crate::api::{validate_beer_payload, BeerDto, BeerStyle, PageRequest, DEFAULT_PAGE_SIZE};
use crate::db::services;

pub const BEER_ROUTE_V2: &str = "/api/v2/beer";
pub const BEER_ROUTE_BEER_ID_V2: &str = "/api/v2/beer/{beerId}";
pub const BEER_UPC_ROUTE_V2: &str = "/api/v2/beerUpc/{upc}";

pub const BEER_PATH_ID_V2: &str = "beerId";
pub const BEER_PATH_UPC_V2: &str = "upc";
pub const BEER_PARAM_SHOW_INVENTORY_V2: &str = "showInventory";

/// Explicit route table for the v2 surface.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(BEER_ROUTE_V2, get(list_beers).post(add_beer))
        .route(
            BEER_ROUTE_BEER_ID_V2,
            get(get_beer_by_id).put(update_beer).delete(delete_beer),
        )
        .route(BEER_UPC_ROUTE_V2, get(get_beer_by_upc))
}

/// Parse the `beerId` path variable; non-numeric values answer 400.
fn parse_beer_id(raw: &str) -> Result<i32, AppError> {
    raw.parse::<i32>()
        .map_err(|_| AppError::BadRequest(format!("Invalid beerId: {}", raw)))
}

/// Query flags follow the original surface's semantics: the literal string
/// "true" (any casing) enables the flag, anything else disables it.
fn parse_flag(params: &HashMap<String, String>, key: &str) -> bool {
    params
        .get(key)
        .map(|v| v.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

fn parse_body(body: serde_json::Value) -> Result<BeerDto, AppError> {
    let dto: BeerDto = serde_json::from_value(body)
        .map_err(|e| AppError::BadRequest(format!("Invalid beer payload: {}", e)))?;
    validate_beer_payload(&dto).map_err(AppError::Validation)?;
    Ok(dto)
}

/// GET /api/v2/beer/{beerId}
async fn get_beer_by_id(
    State(state): State<AppState>,
    Path(beer_id): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let beer_id = parse_beer_id(&beer_id)?;
    let show_inventory = parse_flag(&params, BEER_PARAM_SHOW_INVENTORY_V2);

    let dto = services::get_beer_by_id(state.repository.as_ref(), beer_id, show_inventory).await?;
    dto.map(Json).ok_or(AppError::NotFound)
}

/// GET /api/v2/beerUpc/{upc}
async fn get_beer_by_upc(
    State(state): State<AppState>,
    Path(upc): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let dto = services::get_beer_by_upc(state.repository.as_ref(), &upc).await?;
    dto.map(Json).ok_or(AppError::NotFound)
}

/// GET /api/v2/beer
async fn list_beers(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let beer_name = params.get("beerName").cloned();
    let beer_style = params
        .get("beerStyle")
        .map(|raw| raw.parse::<BeerStyle>().map_err(AppError::BadRequest))
        .transpose()?;

    let parse_u32 = |key: &str| -> Result<Option<u32>, AppError> {
        params
            .get(key)
            .map(|raw| {
                raw.parse::<u32>()
                    .map_err(|_| AppError::BadRequest(format!("Invalid {}: {}", key, raw)))
            })
            .transpose()
    };
    let page_number = parse_u32("pageNumber")?;
    let page_size = parse_u32("pageSize")?;
    let page_request = match (page_number, page_size) {
        (None, None) => None,
        (number, size) => Some(PageRequest::new(
            number.unwrap_or(0),
            size.unwrap_or(DEFAULT_PAGE_SIZE),
        )),
    };

    let page = services::list_beers(
        state.repository.as_ref(),
        beer_name.as_deref(),
        beer_style,
        page_request,
        parse_flag(&params, BEER_PARAM_SHOW_INVENTORY_V2),
    )
    .await?;

    Ok(Json(page))
}

/// POST /api/v2/beer
async fn add_beer(
    State(state): State<AppState>,
    Json(body): Json<serde_json::Value>,
) -> Result<impl IntoResponse, AppError> {
    let dto = parse_body(body)?;

    let saved = services::save_new_beer(state.repository.as_ref(), &dto).await?;
    let id = saved.id.ok_or_else(|| {
        AppError::Repository(crate::db::repository::RepositoryError::internal(
            "Stored beer has no id",
        ))
    })?;

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, format!("{}/{}", BEER_ROUTE_V2, id))],
    ))
}

/// PUT /api/v2/beer/{beerId}
async fn update_beer(
    State(state): State<AppState>,
    Path(beer_id): Path<String>,
    Json(body): Json<serde_json::Value>,
) -> Result<StatusCode, AppError> {
    let beer_id = parse_beer_id(&beer_id)?;
    let dto = parse_body(body)?;

    match services::update_beer(state.repository.as_ref(), beer_id, &dto).await? {
        Some(_) => Ok(StatusCode::NO_CONTENT),
        None => Err(AppError::NotFound),
    }
}

/// DELETE /api/v2/beer/{beerId}
async fn delete_beer(
    State(state): State<AppState>,
    Path(beer_id): Path<String>,
) -> Result<StatusCode, AppError> {
    let beer_id = parse_beer_id(&beer_id)?;
    services::delete_beer_by_id(state.repository.as_ref(), beer_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
