//! Rules and writes shared by venue and artist profiles: unique fields,
//! phone format, and the checked create/update/delete.

use diesel::QueryResult;
use diesel_async::AsyncPgConnection;
use diesel_async::scoped_futures::ScopedFutureExt;

use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult};
use crate::models::{Artist, NewArtist, NewVenue, UpdateArtist, UpdateVenue, Venue};
use crate::services::flash::{self, Flash, ProfileKind};
use crate::services::workflow::{Rejection, UniqueField, Violation, WorkflowError, WriteOutcome, run_write};

/// Columns checked for uniqueness on a venue or artist row.
pub trait ProfileRecord {
    fn id(&self) -> i32;
    fn name(&self) -> &str;
    fn website(&self) -> &str;
    fn facebook_link(&self) -> &str;
    fn phone(&self) -> &str;

    fn unique_value(&self, field: UniqueField) -> &str {
        match field {
            UniqueField::Name => self.name(),
            UniqueField::Website => self.website(),
            UniqueField::FacebookLink => self.facebook_link(),
        }
    }
}

/// A create or edit submission for a profile.
pub trait ProfileInput {
    /// `None` keeps the stored name.
    fn name(&self) -> Option<&str>;
    fn candidates(&self) -> UniqueCandidates<'_>;
    fn phone(&self) -> Option<&str>;
    fn normalize(&mut self);
    /// False when applying the input would change no column.
    fn changes_anything(&self) -> bool {
        true
    }
}

/// Venue and artist rows, inserts and changesets share their field names.
macro_rules! profile_model {
    ($row:ty, $new:ty, $changes:ty) => {
        impl ProfileRecord for $row {
            fn id(&self) -> i32 {
                self.id
            }
            fn name(&self) -> &str {
                &self.name
            }
            fn website(&self) -> &str {
                &self.website
            }
            fn facebook_link(&self) -> &str {
                &self.facebook_link
            }
            fn phone(&self) -> &str {
                &self.phone
            }
        }

        impl ProfileInput for $new {
            fn name(&self) -> Option<&str> {
                Some(&self.name)
            }
            fn candidates(&self) -> UniqueCandidates<'_> {
                UniqueCandidates {
                    name: Some(&self.name),
                    website: Some(&self.website),
                    facebook_link: Some(&self.facebook_link),
                }
            }
            fn phone(&self) -> Option<&str> {
                Some(&self.phone)
            }
            fn normalize(&mut self) {
                self.phone = normalize_phone(&self.phone);
            }
        }

        impl ProfileInput for $changes {
            fn name(&self) -> Option<&str> {
                self.name.as_deref()
            }
            fn candidates(&self) -> UniqueCandidates<'_> {
                UniqueCandidates {
                    name: self.name.as_deref(),
                    website: self.website.as_deref(),
                    facebook_link: self.facebook_link.as_deref(),
                }
            }
            fn phone(&self) -> Option<&str> {
                self.phone.as_deref()
            }
            fn normalize(&mut self) {
                if let Some(phone) = self.phone.as_mut() {
                    *phone = normalize_phone(phone);
                }
            }
            fn changes_anything(&self) -> bool {
                !self.is_empty()
            }
        }
    };
}

profile_model!(Venue, NewVenue, UpdateVenue);
profile_model!(Artist, NewArtist, UpdateArtist);

/// Store access for one profile table. Writes take the transaction's
/// connection.
pub trait ProfileStore: Send + Sync + 'static {
    type Row: ProfileRecord + Send + Sync + 'static;
    type New: ProfileInput + Send + Sync + 'static;
    type Changes: ProfileInput + Send + Sync + 'static;

    const KIND: ProfileKind;
    const CREATE: &'static str;
    const UPDATE: &'static str;
    const DELETE: &'static str;

    fn pool(&self) -> &AsyncDbPool;

    fn find(&self, id: i32) -> impl Future<Output = AppResult<Option<Self::Row>>> + Send;

    /// Whether any row already holds `value` in the given unique column.
    fn value_taken(
        conn: &mut AsyncPgConnection,
        field: UniqueField,
        value: &str,
    ) -> impl Future<Output = QueryResult<bool>> + Send;

    fn insert(
        conn: &mut AsyncPgConnection,
        new: &Self::New,
    ) -> impl Future<Output = QueryResult<Self::Row>> + Send;

    /// Loads a row and locks it until the transaction ends.
    fn find_for_update(
        conn: &mut AsyncPgConnection,
        id: i32,
    ) -> impl Future<Output = QueryResult<Option<Self::Row>>> + Send;

    fn update(
        conn: &mut AsyncPgConnection,
        id: i32,
        changes: &Self::Changes,
    ) -> impl Future<Output = QueryResult<Self::Row>> + Send;

    /// Deletes a row and, through the cascading key, its shows. Returns the
    /// number of affected rows (0 or 1).
    fn delete(
        conn: &mut AsyncPgConnection,
        id: i32,
    ) -> impl Future<Output = QueryResult<usize>> + Send;
}

/// Lists a new profile after the duplicate and phone checks.
pub async fn create_profile<S: ProfileStore>(store: &S, mut input: S::New) -> AppResult<Flash> {
    input.normalize();
    let kind = S::KIND;
    let name = input.name().unwrap_or_default().to_string();

    let outcome = run_write(store.pool(), S::CREATE, move |conn| {
        insert_checked::<S>(conn, input).scope_boxed()
    })
    .await;

    flash::settle(outcome, kind.noun(), kind.not_listed(&name), |row| {
        kind.listed(row.name(), row.id())
    })
}

/// Applies the supplied fields; unchanged unique values are not re-checked.
pub async fn update_profile<S: ProfileStore>(
    store: &S,
    id: i32,
    mut changes: S::Changes,
) -> AppResult<Flash> {
    changes.normalize();
    let kind = S::KIND;
    let name = match changes.name() {
        Some(name) => name.to_string(),
        None => store
            .find(id)
            .await?
            .ok_or_else(|| AppError::not_found(kind.noun(), id))?
            .name()
            .to_string(),
    };

    let outcome = run_write(store.pool(), S::UPDATE, move |conn| {
        update_checked::<S>(conn, id, changes).scope_boxed()
    })
    .await;

    if matches!(outcome, WriteOutcome::NotFound) {
        return Err(AppError::not_found(kind.noun(), id));
    }
    flash::settle(outcome, kind.noun(), kind.not_updated(&name), |row| {
        kind.updated(row.name(), row.id())
    })
}

/// Deletes a profile. A store failure is an internal error.
pub async fn delete_profile<S: ProfileStore>(store: &S, id: i32) -> AppResult<()> {
    let noun = S::KIND.noun();
    let outcome = run_write(store.pool(), S::DELETE, move |conn| {
        async move {
            match S::delete(conn, id).await? {
                0 => Err(WorkflowError::NotFound),
                _ => Ok(()),
            }
        }
        .scope_boxed()
    })
    .await;

    match outcome {
        WriteOutcome::Committed(()) => Ok(()),
        WriteOutcome::NotFound => Err(AppError::not_found(noun, id)),
        WriteOutcome::Rejected(_) | WriteOutcome::Failed(_) => Err(AppError::Internal {
            source: anyhow::anyhow!("{noun} {id} could not be deleted"),
        }),
    }
}

/// Every duplicate and phone check for `input`, accumulated in check order.
async fn check_profile<S: ProfileStore, I: ProfileInput + Sync>(
    conn: &mut AsyncPgConnection,
    current: Option<&S::Row>,
    input: &I,
) -> Result<(), WorkflowError> {
    let candidates = input.candidates();

    let mut rejection = Rejection::new();
    for (field, value) in pending_unique_checks(current, &candidates) {
        if S::value_taken(conn, field, value).await? {
            rejection.push(Violation::Duplicate(field));
        }
    }
    if let Some(phone) = input.phone()
        && current.is_none_or(|row| row.phone() != phone)
        && !phone_is_valid(phone)
    {
        rejection.push(Violation::InvalidPhone);
    }
    rejection.into_result()
}

async fn insert_checked<S: ProfileStore>(
    conn: &mut AsyncPgConnection,
    input: S::New,
) -> Result<S::Row, WorkflowError> {
    check_profile::<S, S::New>(conn, None, &input).await?;
    Ok(S::insert(conn, &input).await?)
}

async fn update_checked<S: ProfileStore>(
    conn: &mut AsyncPgConnection,
    id: i32,
    changes: S::Changes,
) -> Result<S::Row, WorkflowError> {
    let current = S::find_for_update(conn, id)
        .await?
        .ok_or(WorkflowError::NotFound)?;

    check_profile::<S, S::Changes>(conn, Some(&current), &changes).await?;

    if !changes.changes_anything() {
        return Ok(current);
    }
    Ok(S::update(conn, id, &changes).await?)
}

/// Candidate values for the unique columns; `None` leaves a column untouched.
#[derive(Debug, Default, Clone, Copy)]
pub struct UniqueCandidates<'a> {
    pub name: Option<&'a str>,
    pub website: Option<&'a str>,
    pub facebook_link: Option<&'a str>,
}

impl<'a> UniqueCandidates<'a> {
    fn get(&self, field: UniqueField) -> Option<&'a str> {
        match field {
            UniqueField::Name => self.name,
            UniqueField::Website => self.website,
            UniqueField::FacebookLink => self.facebook_link,
        }
    }
}

/// Unique columns that need a lookup, in check order.
///
/// A value is checked when it is non-empty and either the row is new or the
/// value differs from what the row currently holds.
pub fn pending_unique_checks<'a, R: ProfileRecord>(
    current: Option<&R>,
    candidates: &UniqueCandidates<'a>,
) -> Vec<(UniqueField, &'a str)> {
    [UniqueField::Name, UniqueField::Website, UniqueField::FacebookLink]
        .into_iter()
        .filter_map(|field| {
            let value = candidates.get(field)?;
            if value.is_empty() {
                return None;
            }
            match current {
                Some(row) if row.unique_value(field) == value => None,
                _ => Some((field, value)),
            }
        })
        .collect()
}

/// Strips ASCII punctuation, so `(555) 123-4567` keeps its space.
pub fn normalize_phone(raw: &str) -> String {
    raw.chars().filter(|c| !c.is_ascii_punctuation()).collect()
}

/// A normalized phone is either empty or exactly ten digits.
pub fn phone_is_valid(normalized: &str) -> bool {
    normalized.is_empty()
        || (normalized.len() == 10 && normalized.bytes().all(|b| b.is_ascii_digit()))
}

/// Renders a stored phone as `xxx-xxx-xxxx`; anything else is returned as is.
pub fn format_phone(stored: &str) -> String {
    if stored.len() == 10 && stored.is_ascii() {
        format!("{}-{}-{}", &stored[..3], &stored[3..6], &stored[6..])
    } else {
        stored.to_string()
    }
}
