//! Router configuration for the HTTP API.
//!
//! Sets up both API surfaces and the middleware stack (CORS, compression,
//! tracing) and produces the axum router ready for serving.

use axum::{
    extract::DefaultBodyLimit,
    routing::get,
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::functional;
use super::handlers;
use super::state::AppState;

/// Create the main application router with all routes and middleware.
///
/// The v1 surface is nested under `/api/v1` with typed handlers; the v2
/// surface is merged in as the explicit route table built by
/// [`functional::router`]. Both dispatch into the same service layer.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration - permissive for development, should be restricted in production
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_v1 = Router::new()
        .route(
            "/beer",
            get(handlers::list_beers).post(handlers::create_beer),
        )
        .route(
            "/beer/{beerId}",
            get(handlers::get_beer_by_id)
                .put(handlers::update_beer)
                .delete(handlers::delete_beer),
        )
        .route("/beerUpc/{upc}", get(handlers::get_beer_by_upc));

    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/api/v1", api_v1)
        .merge(functional::router())
        .layer(DefaultBodyLimit::max(1024 * 1024))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
