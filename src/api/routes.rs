//! Router configuration for the API.
//!
//! Mounts the health check, the OpenAPI document and whichever of the
//! three services the configuration enables, then applies the middleware.

use axum::http::{Method, header};
use axum::{Json, Router, middleware, routing::get};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;

use crate::api::doc::{ApiDoc, OPENAPI_PATH};
use crate::api::handlers;
use crate::api::middleware::{global_error_handler, logging_middleware, request_id_middleware};
use crate::state::AppState;

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

/// Creates the main application router with all routes and middleware.
///
/// # Middleware Order
/// Later layers wrap earlier ones, so a request passes through:
/// 1. CORS and compression
/// 2. Request ID - generates/propagates `x-request-id`
/// 3. Logging - one span per request, tagged with the request ID
/// 4. Error shaping - turns framework errors into the JSON error body
pub fn create_router(state: AppState) -> Router {
    let mounted = state.mounted;
    let mut api =
        OpenApiRouter::with_openapi(ApiDoc::openapi()).merge(handlers::health::health_routes());

    if mounted.booking {
        api = api
            .merge(handlers::venues::venue_routes())
            .merge(handlers::artists::artist_routes())
            .merge(handlers::shows::show_routes());
    }
    if mounted.trivia {
        api = api.merge(handlers::trivia::trivia_routes());
    }
    if mounted.coffee {
        api = api.merge(handlers::drinks::drink_routes());
    }

    let (router, openapi) = api.split_for_parts();

    router
        .route(
            OPENAPI_PATH,
            get(move || std::future::ready(Json(openapi.clone()))),
        )
        .layer(middleware::from_fn(global_error_handler))
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(CompressionLayer::new())
        .layer(cors_layer())
        .with_state(state)
}
