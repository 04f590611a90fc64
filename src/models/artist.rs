use diesel::prelude::*;

/// Artist row. Mirrors [`crate::models::Venue`] without an address and
/// with `seeking_venue` in place of `seeking_talent`.
#[derive(Debug, Queryable, Selectable, Clone, PartialEq)]
#[diesel(table_name = crate::schema::artists)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Artist {
    pub id: i32,
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub image_link: String,
    pub website: String,
    pub facebook_link: String,
    pub genres: Vec<String>,
    pub seeking_venue: bool,
    pub seeking_description: String,
}

#[derive(Debug, Insertable, Clone, Default)]
#[diesel(table_name = crate::schema::artists)]
pub struct NewArtist {
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub image_link: String,
    pub website: String,
    pub facebook_link: String,
    pub genres: Vec<String>,
    pub seeking_venue: bool,
    pub seeking_description: String,
}

#[derive(Debug, AsChangeset, Clone, Default)]
#[diesel(table_name = crate::schema::artists)]
pub struct UpdateArtist {
    pub name: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub website: Option<String>,
    pub facebook_link: Option<String>,
    pub genres: Option<Vec<String>>,
    pub seeking_venue: Option<bool>,
    pub seeking_description: Option<String>,
}

impl UpdateArtist {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.city.is_none()
            && self.state.is_none()
            && self.phone.is_none()
            && self.image_link.is_none()
            && self.website.is_none()
            && self.facebook_link.is_none()
            && self.genres.is_none()
            && self.seeking_venue.is_none()
            && self.seeking_description.is_none()
    }
}
