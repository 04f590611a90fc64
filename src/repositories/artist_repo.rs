//! Artist repository for async database operations.

use diesel::dsl::exists;
use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};

use crate::db::AsyncDbPool;
use crate::error::AppError;
use crate::models::{Artist, NewArtist, UpdateArtist};
use crate::services::flash::ProfileKind;
use crate::services::profile::ProfileStore;
use crate::services::workflow::UniqueField;

/// Artist repository holding an async connection pool.
#[derive(Clone)]
pub struct ArtistRepository {
    pool: AsyncDbPool,
}

impl ArtistRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    /// Lists every artist ordered by name.
    pub async fn list_ordered(&self) -> Result<Vec<Artist>, AppError> {
        use crate::schema::artists::dsl::*;
        let mut conn = self.pool.get().await?;

        artists
            .order(name.asc())
            .select(Artist::as_select())
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }

    /// Case-insensitive substring search over the artist name.
    pub async fn search(&self, term: &str) -> Result<Vec<Artist>, AppError> {
        use crate::schema::artists::dsl::*;
        let mut conn = self.pool.get().await?;

        artists
            .filter(name.ilike(super::contains_pattern(term)))
            .order(name.asc())
            .select(Artist::as_select())
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }

    /// Finds an artist by its ID.
    ///
    /// # Returns
    /// `Some(Artist)` if found, `None` otherwise
    pub async fn find_by_id(&self, artist_id: i32) -> Result<Option<Artist>, AppError> {
        use crate::schema::artists::dsl::*;
        let mut conn = self.pool.get().await?;

        artists
            .filter(id.eq(artist_id))
            .select(Artist::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }
}

impl ProfileStore for ArtistRepository {
    type Row = Artist;
    type New = NewArtist;
    type Changes = UpdateArtist;

    const KIND: ProfileKind = ProfileKind::Artist;
    const CREATE: &'static str = "create_artist";
    const UPDATE: &'static str = "update_artist";
    const DELETE: &'static str = "delete_artist";

    fn pool(&self) -> &AsyncDbPool {
        &self.pool
    }

    async fn find(&self, artist_id: i32) -> Result<Option<Artist>, AppError> {
        self.find_by_id(artist_id).await
    }

    async fn value_taken(
        conn: &mut AsyncPgConnection,
        field: UniqueField,
        value: &str,
    ) -> QueryResult<bool> {
        use crate::schema::artists::dsl::*;

        match field {
            UniqueField::Name => {
                diesel::select(exists(artists.filter(name.eq(value))))
                    .get_result(conn)
                    .await
            }
            UniqueField::Website => {
                diesel::select(exists(artists.filter(website.eq(value))))
                    .get_result(conn)
                    .await
            }
            UniqueField::FacebookLink => {
                diesel::select(exists(artists.filter(facebook_link.eq(value))))
                    .get_result(conn)
                    .await
            }
        }
    }

    async fn insert(conn: &mut AsyncPgConnection, new_artist: &NewArtist) -> QueryResult<Artist> {
        use crate::schema::artists::dsl::*;

        diesel::insert_into(artists)
            .values(new_artist)
            .returning(Artist::as_returning())
            .get_result(conn)
            .await
    }

    async fn find_for_update(
        conn: &mut AsyncPgConnection,
        artist_id: i32,
    ) -> QueryResult<Option<Artist>> {
        use crate::schema::artists::dsl::*;

        artists
            .filter(id.eq(artist_id))
            .select(Artist::as_select())
            .for_update()
            .first(conn)
            .await
            .optional()
    }

    async fn update(
        conn: &mut AsyncPgConnection,
        artist_id: i32,
        changes: &UpdateArtist,
    ) -> QueryResult<Artist> {
        use crate::schema::artists::dsl::*;

        diesel::update(artists.filter(id.eq(artist_id)))
            .set(changes)
            .returning(Artist::as_returning())
            .get_result(conn)
            .await
    }

    async fn delete(conn: &mut AsyncPgConnection, artist_id: i32) -> QueryResult<usize> {
        use crate::schema::artists::dsl::*;

        diesel::delete(artists.filter(id.eq(artist_id))).execute(conn).await
    }
}
