//! Show repository: joins against venues and artists plus upcoming counts.

use std::collections::HashMap;

use diesel::dsl::{count_star, exists};
use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use jiff_diesel::Timestamp as DbTimestamp;

use crate::db::AsyncDbPool;
use crate::error::AppError;
use crate::models::{Artist, NewShow, Show, Venue};
use crate::schema::{artists, shows, venues};

/// A show joined with both of its parties.
pub type ShowListing = (Show, Venue, Artist);

#[derive(Clone)]
pub struct ShowRepository {
    pool: AsyncDbPool,
}

impl ShowRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &AsyncDbPool {
        &self.pool
    }

    /// Number of shows starting after `now`, keyed by venue id.
    ///
    /// Venues without upcoming shows are absent from the map.
    pub async fn upcoming_counts_by_venue(
        &self,
        now: jiff::Timestamp,
    ) -> Result<HashMap<i32, i64>, AppError> {
        let mut conn = self.pool.get().await?;

        let rows: Vec<(i32, i64)> = shows::table
            .filter(shows::start_time.gt(DbTimestamp::from(now)))
            .group_by(shows::venue_id)
            .select((shows::venue_id, count_star()))
            .load(&mut conn)
            .await?;
        Ok(rows.into_iter().collect())
    }

    /// Number of shows starting after `now`, keyed by artist id.
    pub async fn upcoming_counts_by_artist(
        &self,
        now: jiff::Timestamp,
    ) -> Result<HashMap<i32, i64>, AppError> {
        let mut conn = self.pool.get().await?;

        let rows: Vec<(i32, i64)> = shows::table
            .filter(shows::start_time.gt(DbTimestamp::from(now)))
            .group_by(shows::artist_id)
            .select((shows::artist_id, count_star()))
            .load(&mut conn)
            .await?;
        Ok(rows.into_iter().collect())
    }

    /// Shows held at a venue with their artists, earliest first.
    pub async fn for_venue(&self, venue_id: i32) -> Result<Vec<(Show, Artist)>, AppError> {
        let mut conn = self.pool.get().await?;

        shows::table
            .inner_join(artists::table)
            .filter(shows::venue_id.eq(venue_id))
            .order(shows::start_time.asc())
            .select((Show::as_select(), Artist::as_select()))
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }

    /// Shows an artist plays with their venues, earliest first.
    pub async fn for_artist(&self, artist_id: i32) -> Result<Vec<(Show, Venue)>, AppError> {
        let mut conn = self.pool.get().await?;

        shows::table
            .inner_join(venues::table)
            .filter(shows::artist_id.eq(artist_id))
            .order(shows::start_time.asc())
            .select((Show::as_select(), Venue::as_select()))
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }

    /// Every show with venue and artist, earliest first.
    pub async fn list_with_parties(&self) -> Result<Vec<ShowListing>, AppError> {
        let mut conn = self.pool.get().await?;

        shows::table
            .inner_join(venues::table)
            .inner_join(artists::table)
            .order((shows::start_time.asc(), shows::id.asc()))
            .select((Show::as_select(), Venue::as_select(), Artist::as_select()))
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }

    /// Whether the exact (venue, artist, start) triple is already booked.
    pub async fn exists_triple(conn: &mut AsyncPgConnection, show: &NewShow) -> QueryResult<bool> {
        diesel::select(exists(
            shows::table
                .filter(shows::venue_id.eq(show.venue_id))
                .filter(shows::artist_id.eq(show.artist_id))
                .filter(shows::start_time.eq(show.start_time)),
        ))
        .get_result(conn)
        .await
    }

    pub async fn insert(conn: &mut AsyncPgConnection, new_show: &NewShow) -> QueryResult<Show> {
        diesel::insert_into(shows::table)
            .values(new_show)
            .returning(Show::as_returning())
            .get_result(conn)
            .await
    }
}
