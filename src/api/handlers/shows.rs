//! Show listing and booking handlers.

use axum::{Json, extract::State, http::StatusCode};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::BOOKING_TAG;
use crate::api::dto::{ErrorResponse, FlashResponse, ShowForm, ShowListingResponse};
use crate::error::AppResult;
use crate::state::AppState;
use crate::utils::validate::ValidatedForm;

pub fn show_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_shows))
        .routes(routes!(create_show))
}

/// GET /shows - Every show with its venue and artist, earliest first
#[utoipa::path(
    get,
    path = "/shows",
    tag = BOOKING_TAG,
    responses(
        (status = 200, description = "All shows", body = Vec<ShowListingResponse>)
    )
)]
async fn list_shows(State(state): State<AppState>) -> AppResult<Json<Vec<ShowListingResponse>>> {
    let shows = state.services.shows.list().await?;
    Ok(Json(shows.into_iter().map(ShowListingResponse::from).collect()))
}

/// POST /shows/create - Book an artist at a venue
#[utoipa::path(
    post,
    path = "/shows/create",
    tag = BOOKING_TAG,
    request_body(content = ShowForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 201, description = "Show listed", body = FlashResponse),
        (status = 400, description = "Bad start time or already booked", body = ErrorResponse),
        (status = 422, description = "Store failure, e.g. unknown venue or artist", body = ErrorResponse)
    )
)]
async fn create_show(
    State(state): State<AppState>,
    ValidatedForm(form): ValidatedForm<ShowForm>,
) -> AppResult<(StatusCode, Json<FlashResponse>)> {
    let start = form.start()?;
    let flash = state
        .services
        .shows
        .create(form.venue_id, form.artist_id, start)
        .await?;
    Ok((StatusCode::CREATED, Json(FlashResponse::from(flash))))
}
