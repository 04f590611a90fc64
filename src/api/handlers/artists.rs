//! Artist request handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::BOOKING_TAG;
use crate::api::dto::{
    ArtistDetailResponse, ArtistEditForm, ArtistForm, ArtistListEntry, ArtistResponse,
    DeletedResponse, ErrorResponse, FlashResponse, SearchForm, SearchResponse,
};
use crate::error::AppResult;
use crate::state::AppState;
use crate::utils::validate::ValidatedForm;

pub fn artist_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_artists))
        .routes(routes!(search_artists))
        .routes(routes!(create_artist))
        .routes(routes!(show_artist))
        .routes(routes!(delete_artist))
        .routes(routes!(edit_artist_form))
        .routes(routes!(edit_artist))
}

/// GET /artists - Every artist by name
#[utoipa::path(
    get,
    path = "/artists",
    tag = BOOKING_TAG,
    responses(
        (status = 200, description = "Artists ordered by name", body = Vec<ArtistListEntry>)
    )
)]
async fn list_artists(State(state): State<AppState>) -> AppResult<Json<Vec<ArtistListEntry>>> {
    let artists = state.services.artists.list().await?;
    Ok(Json(artists.into_iter().map(ArtistListEntry::from).collect()))
}

/// POST /artists/search
#[utoipa::path(
    post,
    path = "/artists/search",
    tag = BOOKING_TAG,
    request_body(content = SearchForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Matching artists", body = SearchResponse)
    )
)]
async fn search_artists(
    State(state): State<AppState>,
    ValidatedForm(form): ValidatedForm<SearchForm>,
) -> AppResult<Json<SearchResponse>> {
    let matches = state.services.artists.search(&form.search_term).await?;
    Ok(Json(SearchResponse::from(matches)))
}

/// GET /artists/{id}
#[utoipa::path(
    get,
    path = "/artists/{id}",
    tag = BOOKING_TAG,
    params(("id" = i32, Path, description = "Artist id")),
    responses(
        (status = 200, description = "Artist detail", body = ArtistDetailResponse),
        (status = 404, description = "No such artist", body = ErrorResponse)
    )
)]
async fn show_artist(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ArtistDetailResponse>> {
    let detail = state.services.artists.detail(id).await?;
    Ok(Json(ArtistDetailResponse::from(detail)))
}

/// POST /artists/create
#[utoipa::path(
    post,
    path = "/artists/create",
    tag = BOOKING_TAG,
    request_body(content = ArtistForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 201, description = "Artist listed", body = FlashResponse),
        (status = 400, description = "Rejected", body = ErrorResponse),
        (status = 422, description = "Store failure", body = ErrorResponse)
    )
)]
async fn create_artist(
    State(state): State<AppState>,
    ValidatedForm(form): ValidatedForm<ArtistForm>,
) -> AppResult<(StatusCode, Json<FlashResponse>)> {
    let flash = state.services.artists.create(form.into_new_artist()).await?;
    Ok((StatusCode::CREATED, Json(FlashResponse::from(flash))))
}

/// GET /artists/{id}/edit
#[utoipa::path(
    get,
    path = "/artists/{id}/edit",
    tag = BOOKING_TAG,
    params(("id" = i32, Path, description = "Artist id")),
    responses(
        (status = 200, description = "Artist as stored", body = ArtistResponse),
        (status = 404, description = "No such artist", body = ErrorResponse)
    )
)]
async fn edit_artist_form(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ArtistResponse>> {
    let artist = state.services.artists.get(id).await?;
    Ok(Json(ArtistResponse::from(artist)))
}

/// POST /artists/{id}/edit
#[utoipa::path(
    post,
    path = "/artists/{id}/edit",
    tag = BOOKING_TAG,
    params(("id" = i32, Path, description = "Artist id")),
    request_body(content = ArtistEditForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Artist updated", body = FlashResponse),
        (status = 400, description = "Rejected", body = ErrorResponse),
        (status = 404, description = "No such artist", body = ErrorResponse),
        (status = 422, description = "Store failure", body = ErrorResponse)
    )
)]
async fn edit_artist(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedForm(form): ValidatedForm<ArtistEditForm>,
) -> AppResult<Json<FlashResponse>> {
    let flash = state
        .services
        .artists
        .update(id, form.into_update_artist())
        .await?;
    Ok(Json(FlashResponse::from(flash)))
}

/// DELETE /artists/{id}
#[utoipa::path(
    delete,
    path = "/artists/{id}",
    tag = BOOKING_TAG,
    params(("id" = i32, Path, description = "Artist id")),
    responses(
        (status = 200, description = "Artist deleted", body = DeletedResponse),
        (status = 404, description = "No such artist", body = ErrorResponse),
        (status = 500, description = "Delete failed", body = ErrorResponse)
    )
)]
async fn delete_artist(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<DeletedResponse>> {
    state.services.artists.delete(id).await?;
    Ok(Json(DeletedResponse { success: true }))
}
