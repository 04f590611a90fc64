//! Coffee-shop menu handlers. Everything but the public menu sits behind
//! the permission gate.

use axum::{
    Json,
    extract::{Path, State},
};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::COFFEE_TAG;
use crate::api::dto::{
    AuthErrorResponse, DrinkCreatedResponse, DrinkDeletedResponse, DrinkLong, DrinkMenuResponse,
    DrinkRequest, DrinkShort, ErrorResponse, menu,
};
use crate::api::middleware::{Authorized, CreateDrink, DeleteDrink, ReadDrinkDetail, UpdateDrink};
use crate::error::AppResult;
use crate::state::AppState;
use crate::utils::validate::JsonBody;

pub fn drink_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_drinks))
        .routes(routes!(list_drink_details))
        .routes(routes!(create_drink))
        .routes(routes!(update_drink))
        .routes(routes!(delete_drink))
}

/// GET /drinks - Public menu, visible ingredients only
#[utoipa::path(
    get,
    path = "/drinks",
    tag = COFFEE_TAG,
    responses(
        (status = 200, description = "Short menu", body = DrinkMenuResponse<DrinkShort>),
        (status = 404, description = "Menu is empty", body = ErrorResponse)
    )
)]
async fn list_drinks(
    State(state): State<AppState>,
) -> AppResult<Json<DrinkMenuResponse<DrinkShort>>> {
    let drinks = state.services.drinks.menu().await?;
    Ok(Json(DrinkMenuResponse::new(menu(drinks)?)))
}

/// GET /drinks-detail - Full recipes
#[utoipa::path(
    get,
    path = "/drinks-detail",
    tag = COFFEE_TAG,
    responses(
        (status = 200, description = "Long menu", body = DrinkMenuResponse<DrinkLong>),
        (status = 401, description = "Missing or invalid token", body = AuthErrorResponse),
        (status = 403, description = "Permission missing", body = AuthErrorResponse),
        (status = 404, description = "Menu is empty", body = ErrorResponse)
    ),
    security(("bearerAuth" = ["get:drinks-detail"]))
)]
async fn list_drink_details(
    _auth: Authorized<ReadDrinkDetail>,
    State(state): State<AppState>,
) -> AppResult<Json<DrinkMenuResponse<DrinkLong>>> {
    let drinks = state.services.drinks.menu().await?;
    Ok(Json(DrinkMenuResponse::new(menu(drinks)?)))
}

/// POST /drinks
#[utoipa::path(
    post,
    path = "/drinks",
    tag = COFFEE_TAG,
    request_body = DrinkRequest,
    responses(
        (status = 200, description = "Drink created", body = DrinkCreatedResponse),
        (status = 400, description = "Title or recipe missing", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = AuthErrorResponse),
        (status = 403, description = "Permission missing", body = AuthErrorResponse),
        (status = 422, description = "Store failure", body = ErrorResponse)
    ),
    security(("bearerAuth" = ["post:drinks"]))
)]
async fn create_drink(
    auth: Authorized<CreateDrink>,
    State(state): State<AppState>,
    JsonBody(request): JsonBody<DrinkRequest>,
) -> AppResult<Json<DrinkCreatedResponse>> {
    let drink = state.services.drinks.create(request.into_draft()).await?;
    tracing::info!(drink_id = drink.id, sub = ?auth.subject(), "Drink added");
    Ok(Json(DrinkCreatedResponse {
        success: true,
        drinks: DrinkLong::try_from(drink)?,
    }))
}

/// PATCH /drinks/{id} - Changes only the supplied fields
#[utoipa::path(
    patch,
    path = "/drinks/{id}",
    tag = COFFEE_TAG,
    params(("id" = i32, Path, description = "Drink id")),
    request_body = DrinkRequest,
    responses(
        (status = 200, description = "Drink updated", body = DrinkMenuResponse<DrinkLong>),
        (status = 400, description = "Neither title nor recipe given", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = AuthErrorResponse),
        (status = 403, description = "Permission missing", body = AuthErrorResponse),
        (status = 404, description = "No such drink", body = ErrorResponse),
        (status = 422, description = "Store failure", body = ErrorResponse)
    ),
    security(("bearerAuth" = ["patch:drinks"]))
)]
async fn update_drink(
    auth: Authorized<UpdateDrink>,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    JsonBody(request): JsonBody<DrinkRequest>,
) -> AppResult<Json<DrinkMenuResponse<DrinkLong>>> {
    let drink = state.services.drinks.update(id, request.into_draft()).await?;
    tracing::info!(drink_id = id, sub = ?auth.subject(), "Drink updated");
    Ok(Json(DrinkMenuResponse::new(vec![DrinkLong::try_from(drink)?])))
}

/// DELETE /drinks/{id}
#[utoipa::path(
    delete,
    path = "/drinks/{id}",
    tag = COFFEE_TAG,
    params(("id" = i32, Path, description = "Drink id")),
    responses(
        (status = 200, description = "Drink deleted", body = DrinkDeletedResponse),
        (status = 401, description = "Missing or invalid token", body = AuthErrorResponse),
        (status = 403, description = "Permission missing", body = AuthErrorResponse),
        (status = 404, description = "No such drink", body = ErrorResponse),
        (status = 422, description = "Store failure", body = ErrorResponse)
    ),
    security(("bearerAuth" = ["delete:drinks"]))
)]
async fn delete_drink(
    auth: Authorized<DeleteDrink>,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<DrinkDeletedResponse>> {
    let deleted = state.services.drinks.delete(id).await?;
    tracing::info!(drink_id = deleted, sub = ?auth.subject(), "Drink deleted");
    Ok(Json(DrinkDeletedResponse {
        success: true,
        delete: deleted,
    }))
}
