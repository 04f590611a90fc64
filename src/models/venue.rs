use diesel::prelude::*;

/// Venue row as stored in the `venues` table.
///
/// Optional text columns are stored as empty strings, so "unset" and
/// "empty" are the same thing everywhere above the repository.
#[derive(Debug, Queryable, Selectable, Clone, PartialEq)]
#[diesel(table_name = crate::schema::venues)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Venue {
    pub id: i32,
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: String,
    pub image_link: String,
    pub website: String,
    pub facebook_link: String,
    pub genres: Vec<String>,
    pub seeking_talent: bool,
    pub seeking_description: String,
}

/// NewVenue model for inserting new records
#[derive(Debug, Insertable, Clone, Default)]
#[diesel(table_name = crate::schema::venues)]
pub struct NewVenue {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: String,
    pub image_link: String,
    pub website: String,
    pub facebook_link: String,
    pub genres: Vec<String>,
    pub seeking_talent: bool,
    pub seeking_description: String,
}

/// Partial update; `None` keeps the stored value.
#[derive(Debug, AsChangeset, Clone, Default)]
#[diesel(table_name = crate::schema::venues)]
pub struct UpdateVenue {
    pub name: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub website: Option<String>,
    pub facebook_link: Option<String>,
    pub genres: Option<Vec<String>>,
    pub seeking_talent: Option<bool>,
    pub seeking_description: Option<String>,
}

impl UpdateVenue {
    /// True when no column would change; diesel rejects an empty changeset.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.city.is_none()
            && self.state.is_none()
            && self.address.is_none()
            && self.phone.is_none()
            && self.image_link.is_none()
            && self.website.is_none()
            && self.facebook_link.is_none()
            && self.genres.is_none()
            && self.seeking_talent.is_none()
            && self.seeking_description.is_none()
    }
}
