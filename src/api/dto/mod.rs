//! Data Transfer Objects for API requests and responses.
//!
//! DTOs are organized by domain:
//! - `booking` - Venue, artist and show forms and views
//! - `trivia` - Question bank and quiz bodies
//! - `drink` - Coffee-shop menu bodies
//! - `error` - Common error response DTOs
//! - `health` - Health check response
//! - `pagination` - Page selection query

mod booking;
mod drink;
mod error;
mod health;
mod pagination;
mod trivia;

pub use booking::{
    AreaResponse, ArtistDetailResponse, ArtistEditForm, ArtistForm, ArtistListEntry,
    ArtistResponse, ArtistShow, DeletedResponse, FlashResponse, ProfileSummary, SearchForm,
    SearchResponse, ShowForm, ShowListingResponse, VenueDetailResponse, VenueEditForm, VenueForm,
    VenueResponse, VenueShow,
};
pub use drink::{
    DrinkCreatedResponse, DrinkDeletedResponse, DrinkLong, DrinkMenuResponse, DrinkRequest,
    DrinkShort, RecipeInput, menu,
};
pub use error::{AuthErrorResponse, ErrorResponse};
pub use health::{ComponentHealth, HealthResponse, HealthStatus};
pub use pagination::PageQuery;
pub use trivia::{
    CategoriesResponse, CurrentCategory, DeleteQuestionResponse, QuestionCreatedResponse,
    QuestionListResponse, QuestionResponse, QuestionSearchResponse, QuestionsPost, QuizCategory,
    QuizRequest, QuizResponse,
};
