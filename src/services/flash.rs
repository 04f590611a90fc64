//! Flash texts reported by the booking write operations.

use crate::error::{AppError, AppResult};
use crate::services::workflow::WriteOutcome;

/// Success report of a booking write: the flash text plus the row's id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flash {
    pub message: String,
    pub id: i32,
}

/// The bookable profile kinds, which share their flash wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileKind {
    Venue,
    Artist,
}

impl ProfileKind {
    pub fn label(self) -> &'static str {
        match self {
            ProfileKind::Venue => "Venue",
            ProfileKind::Artist => "Artist",
        }
    }

    /// Lower-case form used inside duplicate clauses.
    pub fn noun(self) -> &'static str {
        match self {
            ProfileKind::Venue => "venue",
            ProfileKind::Artist => "artist",
        }
    }

    pub fn listed(self, name: &str, id: i32) -> Flash {
        Flash {
            message: format!("{} {} was successfully listed! ID:{}", self.label(), name, id),
            id,
        }
    }

    pub fn not_listed(self, name: &str) -> String {
        format!("An error occurred. {} {} could not be listed.", self.label(), name)
    }

    pub fn updated(self, name: &str, id: i32) -> Flash {
        Flash {
            message: format!("{} {} was successfully updated!", self.label(), name),
            id,
        }
    }

    pub fn not_updated(self, name: &str) -> String {
        format!("An error occurred. {} {} could not be updated.", self.label(), name)
    }
}

pub fn show_listed(id: i32) -> Flash {
    Flash {
        message: "Show was successfully listed!".to_string(),
        id,
    }
}

pub const SHOW_NOT_LISTED: &str = "An error occurred. Show could not be listed.";

/// Maps a booking write outcome onto the flash contract.
///
/// Rejections carry `failure` followed by every clause; store failures carry
/// `failure` alone so no internal detail reaches the client.
pub fn settle<T>(
    outcome: WriteOutcome<T>,
    noun: &str,
    failure: String,
    on_commit: impl FnOnce(T) -> Flash,
) -> AppResult<Flash> {
    match outcome {
        WriteOutcome::Committed(value) => Ok(on_commit(value)),
        WriteOutcome::Rejected(rejection) => Err(AppError::Rejected {
            message: format!("{failure}{}", rejection.clauses(noun)),
        }),
        WriteOutcome::NotFound => Err(AppError::NotFound {
            entity: noun.to_string(),
            field: "id".to_string(),
            value: "unknown".to_string(),
        }),
        WriteOutcome::Failed(_) => Err(AppError::Unprocessable { message: failure }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::workflow::{Rejection, UniqueField, Violation};

    #[test]
    fn test_listed_texts() {
        let flash = ProfileKind::Venue.listed("The Dueling Pianos Bar", 3);
        assert_eq!(flash.message, "Venue The Dueling Pianos Bar was successfully listed! ID:3");
        assert_eq!(
            ProfileKind::Artist.updated("Guns N Petals", 4).message,
            "Artist Guns N Petals was successfully updated!"
        );
    }

    #[test]
    fn test_rejection_appends_clauses() {
        let mut rejection = Rejection::new();
        rejection.push(Violation::Duplicate(UniqueField::Name));
        rejection.push(Violation::InvalidPhone);

        let result = settle::<i32>(
            WriteOutcome::Rejected(rejection),
            ProfileKind::Venue.noun(),
            ProfileKind::Venue.not_listed("The Musical Hop"),
            |id| ProfileKind::Venue.listed("The Musical Hop", id),
        );

        match result {
            Err(AppError::Rejected { message }) => assert_eq!(
                message,
                "An error occurred. Venue The Musical Hop could not be listed. \
                 The venue is already in the database. Invalid phone number."
            ),
            other => panic!("Expected Rejected, got {:?}", other),
        }
    }

    #[test]
    fn test_failure_hides_detail() {
        let result = settle::<i32>(
            WriteOutcome::Failed(anyhow::anyhow!("connection reset")),
            "show",
            SHOW_NOT_LISTED.to_string(),
            show_listed,
        );

        match result {
            Err(AppError::Unprocessable { message }) => assert_eq!(message, SHOW_NOT_LISTED),
            other => panic!("Expected Unprocessable, got {:?}", other),
        }
    }
}
