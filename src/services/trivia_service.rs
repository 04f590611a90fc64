//! Trivia question bank: paging, category filters, search, writes and quiz play.

use diesel_async::scoped_futures::ScopedFutureExt;
use rand::Rng;

use crate::error::{AppError, AppResult};
use crate::models::{CategoryMap, NewQuestion, Question, category_map};
use crate::repositories::{CategoryRepository, QuestionRepository};
use crate::services::workflow::{Rejection, Violation, WorkflowError, WriteOutcome, run_write};

pub const QUESTIONS_PER_PAGE: i64 = 10;

/// The `[offset, offset + limit)` slice of the id-ordered question list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub offset: i64,
    pub limit: i64,
}

impl PageWindow {
    /// Selects no rows; the total is still counted.
    pub const EMPTY: PageWindow = PageWindow {
        offset: 0,
        limit: 0,
    };

    /// Window for a 1-based page number; pages below 1 select nothing.
    pub fn for_page(page: i64) -> Option<Self> {
        if page < 1 {
            return None;
        }
        Some(Self {
            offset: (page - 1).saturating_mul(QUESTIONS_PER_PAGE),
            limit: QUESTIONS_PER_PAGE,
        })
    }
}

/// A question listing together with the category lookup it is rendered with.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionPage {
    pub questions: Vec<Question>,
    pub total_questions: i64,
    pub categories: CategoryMap,
}

/// Fields of a question submission, before the required-field check.
#[derive(Debug, Clone, Default)]
pub struct QuestionDraft {
    pub question: Option<String>,
    pub answer: Option<String>,
    pub difficulty: Option<i32>,
    pub category: Option<i32>,
}

impl QuestionDraft {
    /// Question and answer text must be present and non-blank.
    pub fn check_required(&self) -> Rejection {
        let mut rejection = Rejection::new();
        if is_blank(self.question.as_deref()) {
            rejection.push(Violation::Required("question"));
        }
        if is_blank(self.answer.as_deref()) {
            rejection.push(Violation::Required("answer"));
        }
        rejection
    }
}

fn is_blank(value: Option<&str>) -> bool {
    value.is_none_or(|text| text.trim().is_empty())
}

/// Picks the next quiz question: none, the only one, or a uniform choice.
pub fn pick_next<R: Rng>(mut candidates: Vec<Question>, rng: &mut R) -> Option<Question> {
    match candidates.len() {
        0 => None,
        1 => candidates.pop(),
        len => Some(candidates.swap_remove(rng.random_range(0..len))),
    }
}

#[derive(Clone)]
pub struct TriviaService {
    questions: QuestionRepository,
    categories: CategoryRepository,
}

impl TriviaService {
    pub fn new(questions: QuestionRepository, categories: CategoryRepository) -> Self {
        Self {
            questions,
            categories,
        }
    }

    async fn category_map(&self) -> AppResult<CategoryMap> {
        Ok(category_map(self.categories.list_all().await?))
    }

    /// All categories; an empty table is reported as not found.
    pub async fn categories(&self) -> AppResult<CategoryMap> {
        let categories = self.category_map().await?;
        if categories.is_empty() {
            return Err(AppError::NotFound {
                entity: "category".to_string(),
                field: "id".to_string(),
                value: "any".to_string(),
            });
        }
        Ok(categories)
    }

    /// One page of questions. Pages past the end (or below 1) are empty.
    pub async fn page(&self, page: i64) -> AppResult<QuestionPage> {
        let window = PageWindow::for_page(page).unwrap_or(PageWindow::EMPTY);
        let (questions, total_questions) = self
            .questions
            .list_paginated(window.offset, window.limit)
            .await?;

        Ok(QuestionPage {
            questions,
            total_questions,
            categories: self.category_map().await?,
        })
    }

    /// The primary listing: an empty page is not found.
    pub async fn listing(&self, page: i64) -> AppResult<QuestionPage> {
        let page_data = self.page(page).await?;
        if page_data.questions.is_empty() {
            return Err(AppError::NotFound {
                entity: "question page".to_string(),
                field: "page".to_string(),
                value: page.to_string(),
            });
        }
        Ok(page_data)
    }

    /// One page of a category's questions. Unlike the primary listing, an
    /// empty page (or an unknown category) is a valid answer.
    pub async fn in_category(&self, category_id: i32, page: i64) -> AppResult<QuestionPage> {
        let window = PageWindow::for_page(page).unwrap_or(PageWindow::EMPTY);
        let (questions, total_questions) = self
            .questions
            .by_category_paginated(category_id, window.offset, window.limit)
            .await?;

        Ok(QuestionPage {
            questions,
            total_questions,
            categories: self.category_map().await?,
        })
    }

    /// Unpaginated case-insensitive search over the question text.
    pub async fn search(&self, term: &str) -> AppResult<Vec<Question>> {
        self.questions.search(term).await
    }

    /// Stores a question and returns its id.
    ///
    /// Missing difficulty or category reach the store as NULL and fail there,
    /// which surfaces as the generic unprocessable error.
    pub async fn create(&self, draft: QuestionDraft) -> AppResult<i32> {
        let rejection = draft.check_required();
        if !rejection.is_empty() {
            tracing::warn!(violations = ?rejection.violations(), "Question rejected");
            return Err(AppError::bad_request("bad request"));
        }

        let new_question = NewQuestion {
            question: draft.question.unwrap_or_default(),
            answer: draft.answer.unwrap_or_default(),
            difficulty: draft.difficulty,
            category: draft.category,
        };

        let outcome = run_write(self.questions.pool(), "create_question", move |conn| {
            async move {
                let created = QuestionRepository::insert(conn, &new_question).await?;
                Ok::<_, WorkflowError>(created.id)
            }
            .scope_boxed()
        })
        .await;

        match outcome {
            WriteOutcome::Committed(id) => Ok(id),
            WriteOutcome::Rejected(_) => Err(AppError::bad_request("bad request")),
            WriteOutcome::NotFound | WriteOutcome::Failed(_) => Err(AppError::unprocessable()),
        }
    }

    /// Deletes a question and returns the refreshed `page`.
    pub async fn delete(&self, id: i32, page: i64) -> AppResult<QuestionPage> {
        let outcome = run_write(self.questions.pool(), "delete_question", move |conn| {
            async move {
                match QuestionRepository::delete(conn, id).await? {
                    0 => Err(WorkflowError::NotFound),
                    _ => Ok(()),
                }
            }
            .scope_boxed()
        })
        .await;

        match outcome {
            WriteOutcome::Committed(()) => self.page(page).await,
            WriteOutcome::NotFound => Err(AppError::not_found("question", id)),
            WriteOutcome::Rejected(_) | WriteOutcome::Failed(_) => Err(AppError::unprocessable()),
        }
    }

    /// Next quiz question from `category` (any when `None`) not yet served.
    pub async fn next_quiz_question(
        &self,
        previous: &[i32],
        category: Option<i32>,
    ) -> AppResult<Option<Question>> {
        let candidates = self.questions.eligible(category, previous).await?;
        Ok(pick_next(candidates, &mut rand::rng()))
    }
}
