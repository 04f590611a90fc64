//! Show listing, booking, and past/upcoming partitioning.

use diesel_async::AsyncPgConnection;
use diesel_async::scoped_futures::ScopedFutureExt;
use jiff_diesel::Timestamp as DbTimestamp;

use crate::error::AppResult;
use crate::models::{NewShow, Show, ShowTiming};
use crate::repositories::{ShowListing, ShowRepository};
use crate::services::flash::{self, Flash};
use crate::services::workflow::{Violation, WorkflowError, run_write};

/// Shows of one profile split around a reference instant.
#[derive(Debug, Clone, PartialEq)]
pub struct ShowSplit<P> {
    pub past: Vec<(Show, P)>,
    pub upcoming: Vec<(Show, P)>,
}

impl<P> ShowSplit<P> {
    /// Classifies every show against `now`; input order is kept in both halves.
    pub fn partition(shows: Vec<(Show, P)>, now: jiff::Timestamp) -> Self {
        let (upcoming, past) = shows
            .into_iter()
            .partition(|(show, _)| ShowTiming::classify(show.starts_at(), now) == ShowTiming::Upcoming);
        Self { past, upcoming }
    }
}

#[derive(Clone)]
pub struct ShowService {
    repo: ShowRepository,
}

impl ShowService {
    pub fn new(repo: ShowRepository) -> Self {
        Self { repo }
    }

    pub async fn list(&self) -> AppResult<Vec<ShowListing>> {
        self.repo.list_with_parties().await
    }

    /// Books a show unless the same venue, artist and start are already booked.
    pub async fn create(
        &self,
        venue_id: i32,
        artist_id: i32,
        start: jiff::Timestamp,
    ) -> AppResult<Flash> {
        let new_show = NewShow {
            venue_id,
            artist_id,
            start_time: DbTimestamp::from(start),
        };

        let outcome = run_write(self.repo.pool(), "create_show", move |conn| {
            insert_unique_show(conn, new_show).scope_boxed()
        })
        .await;

        flash::settle(outcome, "show", flash::SHOW_NOT_LISTED.to_string(), |show| {
            flash::show_listed(show.id)
        })
    }
}

async fn insert_unique_show(
    conn: &mut AsyncPgConnection,
    new_show: NewShow,
) -> Result<Show, WorkflowError> {
    if ShowRepository::exists_triple(conn, &new_show).await? {
        return Err(WorkflowError::Rejected(Violation::DuplicateShow.into()));
    }
    Ok(ShowRepository::insert(conn, &new_show).await?)
}
