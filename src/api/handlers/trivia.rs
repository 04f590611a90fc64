//! Trivia question bank and quiz handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::TRIVIA_TAG;
use crate::api::dto::{
    CategoriesResponse, CurrentCategory, DeleteQuestionResponse, ErrorResponse, PageQuery,
    QuestionCreatedResponse, QuestionListResponse, QuestionResponse, QuestionSearchResponse,
    QuestionsPost, QuizRequest, QuizResponse,
};
use crate::error::AppResult;
use crate::state::AppState;
use crate::utils::validate::JsonBody;

pub fn trivia_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_categories))
        .routes(routes!(list_questions))
        .routes(routes!(post_question))
        .routes(routes!(delete_question))
        .routes(routes!(category_questions))
        .routes(routes!(next_quiz_question))
}

/// GET /categories
#[utoipa::path(
    get,
    path = "/categories",
    tag = TRIVIA_TAG,
    responses(
        (status = 200, description = "Every category", body = CategoriesResponse),
        (status = 404, description = "No categories", body = ErrorResponse)
    )
)]
async fn list_categories(State(state): State<AppState>) -> AppResult<Json<CategoriesResponse>> {
    let categories = state.services.trivia.categories().await?;
    Ok(Json(CategoriesResponse {
        success: true,
        categories,
    }))
}

/// GET /questions?page=N - Ten questions per page
#[utoipa::path(
    get,
    path = "/questions",
    tag = TRIVIA_TAG,
    params(PageQuery),
    responses(
        (status = 200, description = "One page of questions", body = QuestionListResponse),
        (status = 404, description = "Page is empty", body = ErrorResponse)
    )
)]
async fn list_questions(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<QuestionListResponse>> {
    let page = state.services.trivia.listing(query.page).await?;
    Ok(Json(QuestionListResponse::new(page, CurrentCategory::all())))
}

/// POST /questions - Search when `searchTerm` is given, otherwise create
#[utoipa::path(
    post,
    path = "/questions",
    tag = TRIVIA_TAG,
    request_body = QuestionsPost,
    responses(
        (status = 200, description = "Search results", body = QuestionSearchResponse),
        (status = 201, description = "Question created", body = QuestionCreatedResponse),
        (status = 400, description = "Question or answer missing", body = ErrorResponse),
        (status = 422, description = "Store failure", body = ErrorResponse)
    )
)]
async fn post_question(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<QuestionsPost>,
) -> AppResult<Response> {
    if let Some(term) = body.search_term() {
        let questions = state.services.trivia.search(term).await?;
        return Ok(Json(QuestionSearchResponse::from(questions)).into_response());
    }

    let created = state.services.trivia.create(body.into_draft()).await?;
    let response = QuestionCreatedResponse {
        success: true,
        created,
    };
    Ok((StatusCode::CREATED, Json(response)).into_response())
}

/// DELETE /questions/{id}?page=N - Delete and return the refreshed page
#[utoipa::path(
    delete,
    path = "/questions/{id}",
    tag = TRIVIA_TAG,
    params(("id" = i32, Path, description = "Question id"), PageQuery),
    responses(
        (status = 200, description = "Question deleted", body = DeleteQuestionResponse),
        (status = 404, description = "No such question", body = ErrorResponse),
        (status = 422, description = "Store failure", body = ErrorResponse)
    )
)]
async fn delete_question(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<DeleteQuestionResponse>> {
    let page = state.services.trivia.delete(id, query.page).await?;
    Ok(Json(DeleteQuestionResponse {
        deleted: id,
        page: QuestionListResponse::new(page, CurrentCategory::all()),
    }))
}

/// GET /categories/{id}/questions?page=N - May be empty
#[utoipa::path(
    get,
    path = "/categories/{id}/questions",
    tag = TRIVIA_TAG,
    params(("id" = i32, Path, description = "Category id"), PageQuery),
    responses(
        (status = 200, description = "Questions in the category", body = QuestionListResponse)
    )
)]
async fn category_questions(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<QuestionListResponse>> {
    let page = state.services.trivia.in_category(id, query.page).await?;
    Ok(Json(QuestionListResponse::new(
        page,
        CurrentCategory::Category(id),
    )))
}

/// POST /quizzes - Next unseen question, or null once exhausted
#[utoipa::path(
    post,
    path = "/quizzes",
    tag = TRIVIA_TAG,
    request_body = QuizRequest,
    responses(
        (status = 200, description = "Next question or null", body = QuizResponse),
        (status = 400, description = "Malformed body", body = ErrorResponse)
    )
)]
async fn next_quiz_question(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<QuizRequest>,
) -> AppResult<Json<QuizResponse>> {
    let question = state
        .services
        .trivia
        .next_quiz_question(&request.previous_questions, request.category())
        .await?;
    Ok(Json(QuizResponse {
        success: true,
        question: question.map(QuestionResponse::from),
    }))
}
