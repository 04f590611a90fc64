//! Venue request handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::BOOKING_TAG;
use crate::api::dto::{
    AreaResponse, DeletedResponse, ErrorResponse, FlashResponse, SearchForm, SearchResponse,
    VenueDetailResponse, VenueEditForm, VenueForm, VenueResponse,
};
use crate::error::AppResult;
use crate::state::AppState;
use crate::utils::validate::ValidatedForm;

/// Creates venue-related routes.
pub fn venue_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_venues))
        .routes(routes!(search_venues))
        .routes(routes!(create_venue))
        .routes(routes!(show_venue))
        .routes(routes!(delete_venue))
        .routes(routes!(edit_venue_form))
        .routes(routes!(edit_venue))
}

/// GET /venues - Venues grouped by city and state
#[utoipa::path(
    get,
    path = "/venues",
    tag = BOOKING_TAG,
    responses(
        (status = 200, description = "Venues grouped by area", body = Vec<AreaResponse>)
    )
)]
async fn list_venues(State(state): State<AppState>) -> AppResult<Json<Vec<AreaResponse>>> {
    let areas = state.services.venues.areas().await?;
    Ok(Json(areas.into_iter().map(AreaResponse::from).collect()))
}

/// POST /venues/search - Case-insensitive name search
#[utoipa::path(
    post,
    path = "/venues/search",
    tag = BOOKING_TAG,
    request_body(content = SearchForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Matching venues", body = SearchResponse)
    )
)]
async fn search_venues(
    State(state): State<AppState>,
    ValidatedForm(form): ValidatedForm<SearchForm>,
) -> AppResult<Json<SearchResponse>> {
    let matches = state.services.venues.search(&form.search_term).await?;
    Ok(Json(SearchResponse::from(matches)))
}

/// GET /venues/{id} - Venue page with past and upcoming shows
#[utoipa::path(
    get,
    path = "/venues/{id}",
    tag = BOOKING_TAG,
    params(("id" = i32, Path, description = "Venue id")),
    responses(
        (status = 200, description = "Venue detail", body = VenueDetailResponse),
        (status = 404, description = "No such venue", body = ErrorResponse)
    )
)]
async fn show_venue(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<VenueDetailResponse>> {
    let detail = state.services.venues.detail(id).await?;
    Ok(Json(VenueDetailResponse::from(detail)))
}

/// POST /venues/create - List a new venue
#[utoipa::path(
    post,
    path = "/venues/create",
    tag = BOOKING_TAG,
    request_body(content = VenueForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 201, description = "Venue listed", body = FlashResponse),
        (status = 400, description = "Rejected; the message lists every failed check", body = ErrorResponse),
        (status = 422, description = "Store failure", body = ErrorResponse)
    )
)]
async fn create_venue(
    State(state): State<AppState>,
    ValidatedForm(form): ValidatedForm<VenueForm>,
) -> AppResult<(StatusCode, Json<FlashResponse>)> {
    let flash = state.services.venues.create(form.into_new_venue()).await?;
    Ok((StatusCode::CREATED, Json(FlashResponse::from(flash))))
}

/// GET /venues/{id}/edit - Current values for the edit form
#[utoipa::path(
    get,
    path = "/venues/{id}/edit",
    tag = BOOKING_TAG,
    params(("id" = i32, Path, description = "Venue id")),
    responses(
        (status = 200, description = "Venue as stored", body = VenueResponse),
        (status = 404, description = "No such venue", body = ErrorResponse)
    )
)]
async fn edit_venue_form(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<VenueResponse>> {
    let venue = state.services.venues.get(id).await?;
    Ok(Json(VenueResponse::from(venue)))
}

/// POST /venues/{id}/edit - Update the supplied fields
#[utoipa::path(
    post,
    path = "/venues/{id}/edit",
    tag = BOOKING_TAG,
    params(("id" = i32, Path, description = "Venue id")),
    request_body(content = VenueEditForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Venue updated", body = FlashResponse),
        (status = 400, description = "Rejected", body = ErrorResponse),
        (status = 404, description = "No such venue", body = ErrorResponse),
        (status = 422, description = "Store failure", body = ErrorResponse)
    )
)]
async fn edit_venue(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedForm(form): ValidatedForm<VenueEditForm>,
) -> AppResult<Json<FlashResponse>> {
    let flash = state
        .services
        .venues
        .update(id, form.into_update_venue())
        .await?;
    Ok(Json(FlashResponse::from(flash)))
}

/// DELETE /venues/{id} - Delete a venue and its shows
#[utoipa::path(
    delete,
    path = "/venues/{id}",
    tag = BOOKING_TAG,
    params(("id" = i32, Path, description = "Venue id")),
    responses(
        (status = 200, description = "Venue deleted", body = DeletedResponse),
        (status = 404, description = "No such venue", body = ErrorResponse),
        (status = 500, description = "Delete failed", body = ErrorResponse)
    )
)]
async fn delete_venue(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<DeletedResponse>> {
    state.services.venues.delete(id).await?;
    Ok(Json(DeletedResponse { success: true }))
}
