//! Venue listing, detail, and the validated venue writes.

use std::collections::HashMap;

use crate::error::{AppError, AppResult};
use crate::models::{Artist, NewVenue, UpdateVenue, Venue};
use crate::repositories::{ShowRepository, VenueRepository};
use crate::services::flash::Flash;
use crate::services::profile::{create_profile, delete_profile, update_profile};
use crate::services::show_service::ShowSplit;

/// Venues sharing one city and state, in name order.
#[derive(Debug, Clone, PartialEq)]
pub struct VenueArea {
    pub city: String,
    pub state: String,
    /// Each venue with its number of upcoming shows.
    pub venues: Vec<(Venue, i64)>,
}

/// Groups name-ordered venues by `(city, state)`.
///
/// Groups appear in the order their first venue appears. The key is the pair
/// itself, so `("New", "York")` and `("NewYork", "")` stay apart.
pub fn group_by_area(venues: Vec<Venue>, upcoming: &HashMap<i32, i64>) -> Vec<VenueArea> {
    let mut areas: Vec<VenueArea> = Vec::new();
    let mut index: HashMap<(String, String), usize> = HashMap::new();

    for venue in venues {
        let count = upcoming.get(&venue.id).copied().unwrap_or(0);
        let key = (venue.city.clone(), venue.state.clone());
        let slot = *index.entry(key).or_insert_with(|| {
            areas.push(VenueArea {
                city: venue.city.clone(),
                state: venue.state.clone(),
                venues: Vec::new(),
            });
            areas.len() - 1
        });
        areas[slot].venues.push((venue, count));
    }

    areas
}

#[derive(Debug, Clone)]
pub struct VenueDetail {
    pub venue: Venue,
    pub shows: ShowSplit<Artist>,
}

#[derive(Clone)]
pub struct VenueService {
    repo: VenueRepository,
    shows: ShowRepository,
}

impl VenueService {
    pub fn new(repo: VenueRepository, shows: ShowRepository) -> Self {
        Self { repo, shows }
    }

    pub async fn areas(&self) -> AppResult<Vec<VenueArea>> {
        let venues = self.repo.list_ordered().await?;
        let upcoming = self.shows.upcoming_counts_by_venue(jiff::Timestamp::now()).await?;
        Ok(group_by_area(venues, &upcoming))
    }

    /// Venues whose name contains `term`, each with its upcoming show count.
    pub async fn search(&self, term: &str) -> AppResult<Vec<(Venue, i64)>> {
        let venues = self.repo.search(term).await?;
        let upcoming = self.shows.upcoming_counts_by_venue(jiff::Timestamp::now()).await?;
        Ok(venues
            .into_iter()
            .map(|venue| {
                let count = upcoming.get(&venue.id).copied().unwrap_or(0);
                (venue, count)
            })
            .collect())
    }

    /// Gets a venue by its ID, or `NotFound`.
    pub async fn get(&self, id: i32) -> AppResult<Venue> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("venue", id))
    }

    pub async fn detail(&self, id: i32) -> AppResult<VenueDetail> {
        let venue = self.get(id).await?;
        let shows = self.shows.for_venue(id).await?;
        Ok(VenueDetail {
            venue,
            shows: ShowSplit::partition(shows, jiff::Timestamp::now()),
        })
    }

    /// Lists a new venue after the duplicate and phone checks.
    pub async fn create(&self, new_venue: NewVenue) -> AppResult<Flash> {
        create_profile(&self.repo, new_venue).await
    }

    /// Applies the supplied fields; unchanged unique values are not re-checked.
    pub async fn update(&self, id: i32, changes: UpdateVenue) -> AppResult<Flash> {
        update_profile(&self.repo, id, changes).await
    }

    /// Deletes a venue and, through the cascade, its shows.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        delete_profile(&self.repo, id).await
    }
}
