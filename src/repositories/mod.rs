//! Repository layer for data access operations.
//!
//! Repositories hold the pool for plain reads. Writes take a borrowed
//! connection instead, so they run inside the caller's transaction.

mod artist_repo;
mod category_repo;
mod drink_repo;
mod question_repo;
mod show_repo;
mod venue_repo;

pub use artist_repo::ArtistRepository;
pub use category_repo::CategoryRepository;
pub use drink_repo::DrinkRepository;
pub use question_repo::QuestionRepository;
pub use show_repo::{ShowListing, ShowRepository};
pub use venue_repo::VenueRepository;

use crate::db::AsyncDbPool;

/// Aggregates all repositories for convenient access.
///
/// Since `AsyncDbPool` uses `Arc` internally, cloning is cheap.
#[derive(Clone)]
pub struct Repositories {
    pub venues: VenueRepository,
    pub artists: ArtistRepository,
    pub shows: ShowRepository,
    pub categories: CategoryRepository,
    pub questions: QuestionRepository,
    pub drinks: DrinkRepository,
}

impl Repositories {
    /// Creates a new Repositories instance with all repositories initialized.
    ///
    /// # Arguments
    /// * `pool` - The async database connection pool
    pub fn new(pool: AsyncDbPool) -> Self {
        Self {
            venues: VenueRepository::new(pool.clone()),
            artists: ArtistRepository::new(pool.clone()),
            shows: ShowRepository::new(pool.clone()),
            categories: CategoryRepository::new(pool.clone()),
            questions: QuestionRepository::new(pool.clone()),
            drinks: DrinkRepository::new(pool),
        }
    }
}

/// Wraps a search term for an unanchored `ILIKE`, escaping its wildcards.
pub(crate) fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_pattern_escapes_wildcards() {
        assert_eq!(contains_pattern("Hop"), "%Hop%");
        assert_eq!(contains_pattern("100%_real"), "%100\\%\\_real%");
        assert_eq!(contains_pattern(""), "%%");
    }
}
