//! Trivia API request and response bodies.

use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

use crate::models::{CategoryMap, Question};
use crate::services::{QuestionDraft, QuestionPage};

/// Accepts `3`, `"3"` or null. Text that is not a number reads as absent.
fn lenient_int<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(i64),
        Text(String),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Number(n)) => i32::try_from(n).ok(),
        Some(Raw::Text(text)) => text.trim().parse().ok(),
        None => None,
    })
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct QuestionResponse {
    pub id: i32,
    pub question: String,
    pub answer: String,
    pub category: i32,
    pub difficulty: i32,
}

impl From<Question> for QuestionResponse {
    fn from(question: Question) -> Self {
        Self {
            id: question.id,
            question: question.question,
            answer: question.answer,
            category: question.category,
            difficulty: question.difficulty,
        }
    }
}

fn responses(questions: Vec<Question>) -> Vec<QuestionResponse> {
    questions.into_iter().map(QuestionResponse::from).collect()
}

/// `""` for the unfiltered listing, the id for a category listing.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(untagged)]
pub enum CurrentCategory {
    Category(i32),
    All(String),
}

impl CurrentCategory {
    pub fn all() -> Self {
        CurrentCategory::All(String::new())
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CategoriesResponse {
    pub success: bool,
    /// Category type keyed by id
    #[schema(value_type = Object, example = json!({"1": "Science", "2": "Art"}))]
    pub categories: CategoryMap,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct QuestionListResponse {
    pub success: bool,
    pub questions: Vec<QuestionResponse>,
    pub total_questions: i64,
    #[schema(value_type = Object)]
    pub categories: CategoryMap,
    pub current_category: CurrentCategory,
}

impl QuestionListResponse {
    pub fn new(page: QuestionPage, current_category: CurrentCategory) -> Self {
        Self {
            success: true,
            questions: responses(page.questions),
            total_questions: page.total_questions,
            categories: page.categories,
            current_category,
        }
    }
}

/// The refreshed page after a delete, tagged with the deleted id.
#[derive(Debug, Serialize, ToSchema)]
pub struct DeleteQuestionResponse {
    pub deleted: i32,
    #[serde(flatten)]
    pub page: QuestionListResponse,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct QuestionSearchResponse {
    pub success: bool,
    pub questions: Vec<QuestionResponse>,
    pub total_questions: usize,
}

impl From<Vec<Question>> for QuestionSearchResponse {
    fn from(questions: Vec<Question>) -> Self {
        Self {
            success: true,
            total_questions: questions.len(),
            questions: responses(questions),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct QuestionCreatedResponse {
    pub success: bool,
    pub created: i32,
}

/// `POST /questions` body: a search when `searchTerm` is non-empty,
/// otherwise a new question.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct QuestionsPost {
    #[serde(default, rename = "searchTerm")]
    pub search_term: Option<String>,
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default)]
    pub answer: Option<String>,
    #[serde(default, deserialize_with = "lenient_int")]
    pub difficulty: Option<i32>,
    #[serde(default, deserialize_with = "lenient_int")]
    pub category: Option<i32>,
}

impl QuestionsPost {
    pub fn search_term(&self) -> Option<&str> {
        self.search_term.as_deref().filter(|term| !term.is_empty())
    }

    pub fn into_draft(self) -> QuestionDraft {
        QuestionDraft {
            question: self.question,
            answer: self.answer,
            difficulty: self.difficulty,
            category: self.category,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct QuizCategory {
    /// Category id as a number or string; `0` means any category
    #[serde(default, deserialize_with = "lenient_int")]
    #[schema(value_type = String, example = "3")]
    pub id: Option<i32>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct QuizRequest {
    #[serde(default)]
    pub previous_questions: Vec<i32>,
    #[serde(default)]
    pub quiz_category: Option<QuizCategory>,
}

impl QuizRequest {
    /// The category filter, or `None` for any category.
    pub fn category(&self) -> Option<i32> {
        self.quiz_category
            .as_ref()
            .and_then(|category| category.id)
            .filter(|id| *id != 0)
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct QuizResponse {
    pub success: bool,
    /// `null` once every eligible question has been served
    pub question: Option<QuestionResponse>,
}
