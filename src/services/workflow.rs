//! Validated-write workflow shared by every mutating operation.
//!
//! A write is a closure run inside exactly one store transaction. The closure
//! performs its precondition checks against the same connection, accumulates
//! every failed check into a [`Rejection`], and either returns the written
//! value or bails out with the rejection. The runner turns the transaction
//! result into an explicit [`WriteOutcome`] so callers never see raw store
//! errors.

use diesel_async::scoped_futures::ScopedBoxFuture;
use diesel_async::{AsyncConnection, AsyncPgConnection};
use thiserror::Error;

use crate::db::AsyncDbPool;
use crate::error::DatabaseErrorConverter;

/// Columns whose non-empty values must be unique per profile table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniqueField {
    Name,
    Website,
    FacebookLink,
}

/// One failed precondition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    Duplicate(UniqueField),
    InvalidPhone,
    DuplicateShow,
    Required(&'static str),
}

impl Violation {
    /// The clause appended to the flash text; `noun` names the profile kind.
    pub fn clause(&self, noun: &str) -> String {
        match self {
            Violation::Duplicate(UniqueField::Name) => {
                format!(" The {noun} is already in the database.")
            }
            Violation::Duplicate(UniqueField::Website) => {
                " The website is already in the database.".to_string()
            }
            Violation::Duplicate(UniqueField::FacebookLink) => {
                " The facebook link is already in the database.".to_string()
            }
            Violation::InvalidPhone => " Invalid phone number.".to_string(),
            Violation::DuplicateShow => " The show is already in the database.".to_string(),
            Violation::Required(field) => format!(" The {field} is required."),
        }
    }

    /// Maps a unique index name back to the check it enforces.
    pub fn from_unique_constraint(constraint: &str) -> Option<Self> {
        match constraint {
            "shows_venue_artist_start_key" => Some(Violation::DuplicateShow),
            "venues_name_key" | "artists_name_key" => {
                Some(Violation::Duplicate(UniqueField::Name))
            }
            name if name.ends_with("_facebook_link_key") => {
                Some(Violation::Duplicate(UniqueField::FacebookLink))
            }
            name if name.ends_with("_website_key") => {
                Some(Violation::Duplicate(UniqueField::Website))
            }
            _ => None,
        }
    }
}

/// Every precondition that failed, in check order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rejection {
    violations: Vec<Violation>,
}

impl Rejection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, violation: Violation) {
        self.violations.push(violation);
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Concatenated clauses, each with its leading space.
    pub fn clauses(&self, noun: &str) -> String {
        self.violations.iter().map(|v| v.clause(noun)).collect()
    }

    /// `Ok(())` when nothing failed, so a write closure can `?` it.
    pub fn into_result(self) -> Result<(), WorkflowError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(WorkflowError::Rejected(self))
        }
    }
}

impl From<Violation> for Rejection {
    fn from(violation: Violation) -> Self {
        Self {
            violations: vec![violation],
        }
    }
}

/// Why a write closure aborted its transaction.
#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("write rejected")]
    Rejected(Rejection),

    #[error("target row not found")]
    NotFound,

    #[error(transparent)]
    Store(#[from] diesel::result::Error),
}

/// Result of one validated write; exactly one commit or rollback happened.
#[derive(Debug)]
pub enum WriteOutcome<T> {
    Committed(T),
    Rejected(Rejection),
    NotFound,
    Failed(anyhow::Error),
}

/// Runs `work` inside a single transaction on a pooled connection.
///
/// A unique violation raised by the store at commit time is reported as the
/// matching [`Violation`], so a lost check-then-insert race reads the same as
/// a duplicate caught by the explicit check.
pub async fn run_write<'a, T, F>(pool: &AsyncDbPool, operation: &'static str, work: F) -> WriteOutcome<T>
where
    T: Send + 'a,
    F: for<'r> FnOnce(&'r mut AsyncPgConnection) -> ScopedBoxFuture<'a, 'r, Result<T, WorkflowError>>
        + Send
        + 'a,
{
    let mut conn = match pool.get().await {
        Ok(conn) => conn,
        Err(e) => {
            tracing::error!(operation, error = %e, "Could not acquire a connection");
            return WriteOutcome::Failed(anyhow::Error::from(e));
        }
    };

    let result: Result<T, WorkflowError> = (*conn).transaction(work).await;
    match result {
        Ok(value) => {
            tracing::info!(operation, "Write committed");
            WriteOutcome::Committed(value)
        }
        Err(WorkflowError::Rejected(rejection)) => {
            tracing::warn!(operation, violations = ?rejection.violations(), "Write rejected");
            WriteOutcome::Rejected(rejection)
        }
        Err(WorkflowError::NotFound) => {
            tracing::debug!(operation, "Write target not found");
            WriteOutcome::NotFound
        }
        Err(WorkflowError::Store(error)) => {
            if let Some(violation) = DatabaseErrorConverter::unique_constraint(&error)
                .and_then(Violation::from_unique_constraint)
            {
                tracing::warn!(operation, ?violation, "Write lost a uniqueness race");
                return WriteOutcome::Rejected(Rejection::from(violation));
            }
            tracing::error!(operation, error = %error, "Write failed and was rolled back");
            WriteOutcome::Failed(anyhow::Error::from(error))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::{migrated_pool, unique_text};
    use crate::models::{Artist, NewArtist};
    use crate::repositories::ArtistRepository;
    use crate::services::profile::ProfileStore;
    use diesel_async::scoped_futures::ScopedFutureExt;

    #[test]
    fn test_clauses_accumulate_in_check_order() {
        let mut rejection = Rejection::new();
        rejection.push(Violation::Duplicate(UniqueField::Name));
        rejection.push(Violation::Duplicate(UniqueField::Website));
        rejection.push(Violation::Duplicate(UniqueField::FacebookLink));
        rejection.push(Violation::InvalidPhone);

        assert_eq!(
            rejection.clauses("venue"),
            " The venue is already in the database. The website is already in the database. \
             The facebook link is already in the database. Invalid phone number."
        );
    }

    #[test]
    fn test_name_clause_uses_noun() {
        assert_eq!(
            Violation::Duplicate(UniqueField::Name).clause("artist"),
            " The artist is already in the database."
        );
        assert_eq!(
            Violation::Required("title").clause("drink"),
            " The title is required."
        );
    }

    #[test]
    fn test_empty_rejection_passes() {
        assert!(Rejection::new().into_result().is_ok());
        let err = Rejection::from(Violation::InvalidPhone).into_result().unwrap_err();
        assert!(matches!(err, WorkflowError::Rejected(r) if r.violations() == [Violation::InvalidPhone]));
    }

    #[test]
    fn test_unique_constraint_mapping() {
        assert_eq!(
            Violation::from_unique_constraint("venues_name_key"),
            Some(Violation::Duplicate(UniqueField::Name))
        );
        assert_eq!(
            Violation::from_unique_constraint("artists_website_key"),
            Some(Violation::Duplicate(UniqueField::Website))
        );
        assert_eq!(
            Violation::from_unique_constraint("venues_facebook_link_key"),
            Some(Violation::Duplicate(UniqueField::FacebookLink))
        );
        assert_eq!(
            Violation::from_unique_constraint("shows_venue_artist_start_key"),
            Some(Violation::DuplicateShow)
        );
        assert_eq!(Violation::from_unique_constraint("drinks_pkey"), None);
    }

    /// Inserts without the explicit duplicate check, as a writer that lost
    /// the check-then-insert race would.
    async fn unchecked_insert(pool: &AsyncDbPool, new_artist: NewArtist) -> WriteOutcome<Artist> {
        run_write(pool, "unchecked_insert", move |conn| {
            async move { Ok::<_, WorkflowError>(ArtistRepository::insert(conn, &new_artist).await?) }
                .scope_boxed()
        })
        .await
    }

    #[tokio::test]
    #[ignore = "needs TRIAD_DATABASE__URL"]
    async fn test_store_unique_violation_reads_as_duplicate() {
        let Some(pool) = migrated_pool().await else {
            return;
        };
        let new_artist = NewArtist {
            name: unique_text("Guns N Petals"),
            city: "San Francisco".to_string(),
            state: "CA".to_string(),
            image_link: "https://images.example/petals.jpg".to_string(),
            ..Default::default()
        };

        let first = match unchecked_insert(&pool, new_artist.clone()).await {
            WriteOutcome::Committed(artist) => artist,
            other => panic!("Expected Committed, got {other:?}"),
        };

        match unchecked_insert(&pool, new_artist).await {
            WriteOutcome::Rejected(rejection) => assert_eq!(
                rejection.violations(),
                [Violation::Duplicate(UniqueField::Name)]
            ),
            other => panic!("Expected Rejected, got {other:?}"),
        }

        let outcome = run_write(&pool, "cleanup", move |conn| {
            async move { Ok::<_, WorkflowError>(ArtistRepository::delete(conn, first.id).await?) }
                .scope_boxed()
        })
        .await;
        assert!(matches!(outcome, WriteOutcome::Committed(1)));
    }
}
