//! Service layer for business logic operations.
//!
//! Services encapsulate business logic and coordinate between
//! repositories and handlers. Every mutation goes through
//! [`workflow::run_write`].

mod artist_service;
mod drink_service;
pub mod flash;
pub mod profile;
mod show_service;
mod trivia_service;
mod venue_service;
pub mod workflow;

pub use artist_service::{ArtistDetail, ArtistService};
pub use drink_service::{DrinkDraft, DrinkService};
pub use flash::Flash;
pub use show_service::{ShowService, ShowSplit};
pub use trivia_service::{
    PageWindow, QUESTIONS_PER_PAGE, QuestionDraft, QuestionPage, TriviaService, pick_next,
};
pub use venue_service::{VenueArea, VenueDetail, VenueService, group_by_area};

use crate::repositories::Repositories;

/// Aggregates all services for convenient access.
///
/// This struct is designed to be used as Axum application state.
/// Cloning is cheap since underlying pools use `Arc` internally.
#[derive(Clone)]
pub struct Services {
    pub venues: VenueService,
    pub artists: ArtistService,
    pub shows: ShowService,
    pub trivia: TriviaService,
    pub drinks: DrinkService,
}

impl Services {
    /// Creates a new Services instance from Repositories.
    pub fn new(repos: Repositories) -> Self {
        Self {
            venues: VenueService::new(repos.venues, repos.shows.clone()),
            artists: ArtistService::new(repos.artists, repos.shows.clone()),
            shows: ShowService::new(repos.shows),
            trivia: TriviaService::new(repos.questions, repos.categories),
            drinks: DrinkService::new(repos.drinks),
        }
    }
}
