//! Venue repository for async database operations.

use diesel::dsl::exists;
use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};

use crate::db::AsyncDbPool;
use crate::error::AppError;
use crate::models::{NewVenue, UpdateVenue, Venue};
use crate::services::flash::ProfileKind;
use crate::services::profile::ProfileStore;
use crate::services::workflow::UniqueField;

/// Venue repository holding an async connection pool.
#[derive(Clone)]
pub struct VenueRepository {
    pool: AsyncDbPool,
}

impl VenueRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    /// Lists every venue ordered by name.
    pub async fn list_ordered(&self) -> Result<Vec<Venue>, AppError> {
        use crate::schema::venues::dsl::*;
        let mut conn = self.pool.get().await?;

        venues
            .order(name.asc())
            .select(Venue::as_select())
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }

    /// Case-insensitive substring search over the venue name.
    pub async fn search(&self, term: &str) -> Result<Vec<Venue>, AppError> {
        use crate::schema::venues::dsl::*;
        let mut conn = self.pool.get().await?;

        venues
            .filter(name.ilike(super::contains_pattern(term)))
            .order(name.asc())
            .select(Venue::as_select())
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }

    /// Finds a venue by its ID.
    ///
    /// # Returns
    /// `Some(Venue)` if found, `None` otherwise
    pub async fn find_by_id(&self, venue_id: i32) -> Result<Option<Venue>, AppError> {
        use crate::schema::venues::dsl::*;
        let mut conn = self.pool.get().await?;

        venues
            .filter(id.eq(venue_id))
            .select(Venue::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }
}

impl ProfileStore for VenueRepository {
    type Row = Venue;
    type New = NewVenue;
    type Changes = UpdateVenue;

    const KIND: ProfileKind = ProfileKind::Venue;
    const CREATE: &'static str = "create_venue";
    const UPDATE: &'static str = "update_venue";
    const DELETE: &'static str = "delete_venue";

    fn pool(&self) -> &AsyncDbPool {
        &self.pool
    }

    async fn find(&self, venue_id: i32) -> Result<Option<Venue>, AppError> {
        self.find_by_id(venue_id).await
    }

    async fn value_taken(
        conn: &mut AsyncPgConnection,
        field: UniqueField,
        value: &str,
    ) -> QueryResult<bool> {
        use crate::schema::venues::dsl::*;

        match field {
            UniqueField::Name => {
                diesel::select(exists(venues.filter(name.eq(value))))
                    .get_result(conn)
                    .await
            }
            UniqueField::Website => {
                diesel::select(exists(venues.filter(website.eq(value))))
                    .get_result(conn)
                    .await
            }
            UniqueField::FacebookLink => {
                diesel::select(exists(venues.filter(facebook_link.eq(value))))
                    .get_result(conn)
                    .await
            }
        }
    }

    async fn insert(conn: &mut AsyncPgConnection, new_venue: &NewVenue) -> QueryResult<Venue> {
        use crate::schema::venues::dsl::*;

        diesel::insert_into(venues)
            .values(new_venue)
            .returning(Venue::as_returning())
            .get_result(conn)
            .await
    }

    async fn find_for_update(
        conn: &mut AsyncPgConnection,
        venue_id: i32,
    ) -> QueryResult<Option<Venue>> {
        use crate::schema::venues::dsl::*;

        venues
            .filter(id.eq(venue_id))
            .select(Venue::as_select())
            .for_update()
            .first(conn)
            .await
            .optional()
    }

    async fn update(
        conn: &mut AsyncPgConnection,
        venue_id: i32,
        changes: &UpdateVenue,
    ) -> QueryResult<Venue> {
        use crate::schema::venues::dsl::*;

        diesel::update(venues.filter(id.eq(venue_id)))
            .set(changes)
            .returning(Venue::as_returning())
            .get_result(conn)
            .await
    }

    async fn delete(conn: &mut AsyncPgConnection, venue_id: i32) -> QueryResult<usize> {
        use crate::schema::venues::dsl::*;

        diesel::delete(venues.filter(id.eq(venue_id))).execute(conn).await
    }
}
