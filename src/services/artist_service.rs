//! Artist listing, detail, and the validated artist writes.

use crate::error::{AppError, AppResult};
use crate::models::{Artist, NewArtist, UpdateArtist, Venue};
use crate::repositories::{ArtistRepository, ShowRepository};
use crate::services::flash::Flash;
use crate::services::profile::{create_profile, delete_profile, update_profile};
use crate::services::show_service::ShowSplit;

#[derive(Debug, Clone)]
pub struct ArtistDetail {
    pub artist: Artist,
    pub shows: ShowSplit<Venue>,
}

#[derive(Clone)]
pub struct ArtistService {
    repo: ArtistRepository,
    shows: ShowRepository,
}

impl ArtistService {
    pub fn new(repo: ArtistRepository, shows: ShowRepository) -> Self {
        Self { repo, shows }
    }

    /// Every artist ordered by name.
    pub async fn list(&self) -> AppResult<Vec<Artist>> {
        self.repo.list_ordered().await
    }

    /// Artists whose name contains `term`, each with its upcoming show count.
    pub async fn search(&self, term: &str) -> AppResult<Vec<(Artist, i64)>> {
        let artists = self.repo.search(term).await?;
        let upcoming = self.shows.upcoming_counts_by_artist(jiff::Timestamp::now()).await?;
        Ok(artists
            .into_iter()
            .map(|artist| {
                let count = upcoming.get(&artist.id).copied().unwrap_or(0);
                (artist, count)
            })
            .collect())
    }

    /// Gets an artist by its ID, or `NotFound`.
    pub async fn get(&self, id: i32) -> AppResult<Artist> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("artist", id))
    }

    pub async fn detail(&self, id: i32) -> AppResult<ArtistDetail> {
        let artist = self.get(id).await?;
        let shows = self.shows.for_artist(id).await?;
        Ok(ArtistDetail {
            artist,
            shows: ShowSplit::partition(shows, jiff::Timestamp::now()),
        })
    }

    /// Lists a new artist after the duplicate and phone checks.
    pub async fn create(&self, new_artist: NewArtist) -> AppResult<Flash> {
        create_profile(&self.repo, new_artist).await
    }

    /// Applies the supplied fields; unchanged unique values are not re-checked.
    pub async fn update(&self, id: i32, changes: UpdateArtist) -> AppResult<Flash> {
        update_profile(&self.repo, id, changes).await
    }

    /// Deletes an artist and, through the cascade, its shows.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        delete_profile(&self.repo, id).await
    }
}
