//! Booking directory DTOs: url-encoded forms in, JSON views out.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::models::{
    Artist, NewArtist, NewVenue, Show, UpdateArtist, UpdateVenue, Venue, display_start_time,
    parse_start_time,
};
use crate::repositories::ShowListing;
use crate::services::profile::format_phone;
use crate::services::{ArtistDetail, Flash, VenueArea, VenueDetail};

/// Checkbox semantics: absent is unchecked, and so are the usual "off" spellings.
fn checked(value: &Option<String>) -> bool {
    match value.as_deref().map(str::trim) {
        None => false,
        Some(raw) => !matches!(
            raw.to_ascii_lowercase().as_str(),
            "" | "0" | "n" | "no" | "off" | "false"
        ),
    }
}

/// `None` for an empty repeated `genres` key, so an edit keeps the stored list.
fn genres_change(genres: Vec<String>) -> Option<Vec<String>> {
    if genres.is_empty() { None } else { Some(genres) }
}

/// Venue creation form.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct VenueForm {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "City is required"))]
    pub city: String,
    #[validate(length(min = 1, message = "State is required"))]
    pub state: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub phone: String,
    #[validate(length(min = 1, message = "Image link is required"))]
    pub image_link: String,
    #[serde(default, rename = "website_link")]
    pub website: String,
    #[serde(default)]
    pub facebook_link: String,
    /// Repeated `genres=..` keys
    #[serde(default)]
    pub genres: Vec<String>,
    /// Checkbox; any value other than an "off" spelling means checked
    #[serde(default)]
    pub seeking_talent: Option<String>,
    #[serde(default)]
    pub seeking_description: String,
}

impl VenueForm {
    pub fn into_new_venue(self) -> NewVenue {
        let seeking_talent = checked(&self.seeking_talent);
        NewVenue {
            name: self.name,
            city: self.city,
            state: self.state,
            address: self.address,
            phone: self.phone,
            image_link: self.image_link,
            website: self.website,
            facebook_link: self.facebook_link,
            genres: self.genres,
            seeking_talent,
            seeking_description: self.seeking_description,
        }
    }
}

/// Venue edit form. Omitted fields keep their stored value, except the
/// checkbox, which an HTML form omits when unchecked.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct VenueEditForm {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: Option<String>,
    #[validate(length(min = 1, message = "City is required"))]
    pub city: Option<String>,
    #[validate(length(min = 1, message = "State is required"))]
    pub state: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    #[validate(length(min = 1, message = "Image link is required"))]
    pub image_link: Option<String>,
    #[serde(rename = "website_link")]
    pub website: Option<String>,
    pub facebook_link: Option<String>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub seeking_talent: Option<String>,
    pub seeking_description: Option<String>,
}

impl VenueEditForm {
    pub fn into_update_venue(self) -> UpdateVenue {
        let seeking_talent = Some(checked(&self.seeking_talent));
        UpdateVenue {
            name: self.name,
            city: self.city,
            state: self.state,
            address: self.address,
            phone: self.phone,
            image_link: self.image_link,
            website: self.website,
            facebook_link: self.facebook_link,
            genres: genres_change(self.genres),
            seeking_talent,
            seeking_description: self.seeking_description,
        }
    }
}

/// Artist creation form.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ArtistForm {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "City is required"))]
    pub city: String,
    #[validate(length(min = 1, message = "State is required"))]
    pub state: String,
    #[serde(default)]
    pub phone: String,
    #[validate(length(min = 1, message = "Image link is required"))]
    pub image_link: String,
    #[serde(default, rename = "website_link")]
    pub website: String,
    #[serde(default)]
    pub facebook_link: String,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub seeking_venue: Option<String>,
    #[serde(default)]
    pub seeking_description: String,
}

impl ArtistForm {
    pub fn into_new_artist(self) -> NewArtist {
        let seeking_venue = checked(&self.seeking_venue);
        NewArtist {
            name: self.name,
            city: self.city,
            state: self.state,
            phone: self.phone,
            image_link: self.image_link,
            website: self.website,
            facebook_link: self.facebook_link,
            genres: self.genres,
            seeking_venue,
            seeking_description: self.seeking_description,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct ArtistEditForm {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: Option<String>,
    #[validate(length(min = 1, message = "City is required"))]
    pub city: Option<String>,
    #[validate(length(min = 1, message = "State is required"))]
    pub state: Option<String>,
    pub phone: Option<String>,
    #[validate(length(min = 1, message = "Image link is required"))]
    pub image_link: Option<String>,
    #[serde(rename = "website_link")]
    pub website: Option<String>,
    pub facebook_link: Option<String>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub seeking_venue: Option<String>,
    pub seeking_description: Option<String>,
}

impl ArtistEditForm {
    pub fn into_update_artist(self) -> UpdateArtist {
        let seeking_venue = Some(checked(&self.seeking_venue));
        UpdateArtist {
            name: self.name,
            city: self.city,
            state: self.state,
            phone: self.phone,
            image_link: self.image_link,
            website: self.website,
            facebook_link: self.facebook_link,
            genres: genres_change(self.genres),
            seeking_venue,
            seeking_description: self.seeking_description,
        }
    }
}

/// Show booking form; `start_time` is `YYYY-MM-DD HH:MM:SS` in UTC.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ShowForm {
    pub artist_id: i32,
    pub venue_id: i32,
    #[schema(example = "2035-04-01 20:00:00")]
    pub start_time: String,
}

impl ShowForm {
    pub fn start(&self) -> AppResult<jiff::Timestamp> {
        parse_start_time(&self.start_time).ok_or_else(|| {
            AppError::bad_request(format!("Invalid start time '{}'", self.start_time))
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct SearchForm {
    #[serde(default)]
    pub search_term: String,
}

/// Success report of a booking write.
#[derive(Debug, Serialize, ToSchema)]
pub struct FlashResponse {
    pub success: bool,
    #[schema(example = "Venue The Musical Hop was successfully listed! ID:1")]
    pub message: String,
    pub id: i32,
}

impl From<Flash> for FlashResponse {
    fn from(flash: Flash) -> Self {
        Self {
            success: true,
            message: flash.message,
            id: flash.id,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DeletedResponse {
    pub success: bool,
}

/// A venue or artist with its number of upcoming shows.
#[derive(Debug, Serialize, ToSchema, PartialEq)]
pub struct ProfileSummary {
    pub id: i32,
    pub name: String,
    pub num_upcoming_shows: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AreaResponse {
    pub city: String,
    pub state: String,
    pub venues: Vec<ProfileSummary>,
}

impl From<VenueArea> for AreaResponse {
    fn from(area: VenueArea) -> Self {
        Self {
            city: area.city,
            state: area.state,
            venues: area
                .venues
                .into_iter()
                .map(|(venue, num_upcoming_shows)| ProfileSummary {
                    id: venue.id,
                    name: venue.name,
                    num_upcoming_shows,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SearchResponse {
    pub count: usize,
    pub data: Vec<ProfileSummary>,
}

impl SearchResponse {
    fn from_summaries(data: Vec<ProfileSummary>) -> Self {
        Self {
            count: data.len(),
            data,
        }
    }
}

impl From<Vec<(Venue, i64)>> for SearchResponse {
    fn from(matches: Vec<(Venue, i64)>) -> Self {
        Self::from_summaries(
            matches
                .into_iter()
                .map(|(venue, num_upcoming_shows)| ProfileSummary {
                    id: venue.id,
                    name: venue.name,
                    num_upcoming_shows,
                })
                .collect(),
        )
    }
}

impl From<Vec<(Artist, i64)>> for SearchResponse {
    fn from(matches: Vec<(Artist, i64)>) -> Self {
        Self::from_summaries(
            matches
                .into_iter()
                .map(|(artist, num_upcoming_shows)| ProfileSummary {
                    id: artist.id,
                    name: artist.name,
                    num_upcoming_shows,
                })
                .collect(),
        )
    }
}

/// A venue as shown on its page and pre-filled into its edit form.
#[derive(Debug, Serialize, ToSchema)]
pub struct VenueResponse {
    pub id: i32,
    pub name: String,
    pub genres: Vec<String>,
    pub address: String,
    pub city: String,
    pub state: String,
    /// `xxx-xxx-xxxx` when ten digits are stored
    pub phone: String,
    pub website: String,
    pub facebook_link: String,
    pub seeking_talent: bool,
    pub seeking_description: String,
    pub image_link: String,
}

impl From<Venue> for VenueResponse {
    fn from(venue: Venue) -> Self {
        Self {
            id: venue.id,
            phone: format_phone(&venue.phone),
            name: venue.name,
            genres: venue.genres,
            address: venue.address,
            city: venue.city,
            state: venue.state,
            website: venue.website,
            facebook_link: venue.facebook_link,
            seeking_talent: venue.seeking_talent,
            seeking_description: venue.seeking_description,
            image_link: venue.image_link,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ArtistResponse {
    pub id: i32,
    pub name: String,
    pub genres: Vec<String>,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub website: String,
    pub facebook_link: String,
    pub seeking_venue: bool,
    pub seeking_description: String,
    pub image_link: String,
}

impl From<Artist> for ArtistResponse {
    fn from(artist: Artist) -> Self {
        Self {
            id: artist.id,
            phone: format_phone(&artist.phone),
            name: artist.name,
            genres: artist.genres,
            city: artist.city,
            state: artist.state,
            website: artist.website,
            facebook_link: artist.facebook_link,
            seeking_venue: artist.seeking_venue,
            seeking_description: artist.seeking_description,
            image_link: artist.image_link,
        }
    }
}

/// A show on a venue page, described by its artist.
#[derive(Debug, Serialize, ToSchema, PartialEq)]
pub struct ArtistShow {
    pub artist_id: i32,
    pub artist_name: String,
    pub artist_image_link: String,
    #[schema(example = "04/01/2035, 20:00:00")]
    pub start_time: String,
}

impl From<(Show, Artist)> for ArtistShow {
    fn from((show, artist): (Show, Artist)) -> Self {
        Self {
            artist_id: artist.id,
            artist_name: artist.name,
            artist_image_link: artist.image_link,
            start_time: display_start_time(show.starts_at()),
        }
    }
}

/// A show on an artist page, described by its venue.
#[derive(Debug, Serialize, ToSchema, PartialEq)]
pub struct VenueShow {
    pub venue_id: i32,
    pub venue_name: String,
    pub venue_image_link: String,
    pub start_time: String,
}

impl From<(Show, Venue)> for VenueShow {
    fn from((show, venue): (Show, Venue)) -> Self {
        Self {
            venue_id: venue.id,
            venue_name: venue.name,
            venue_image_link: venue.image_link,
            start_time: display_start_time(show.starts_at()),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct VenueDetailResponse {
    #[serde(flatten)]
    pub venue: VenueResponse,
    pub past_shows: Vec<ArtistShow>,
    pub upcoming_shows: Vec<ArtistShow>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

impl From<VenueDetail> for VenueDetailResponse {
    fn from(detail: VenueDetail) -> Self {
        let past_shows: Vec<ArtistShow> =
            detail.shows.past.into_iter().map(ArtistShow::from).collect();
        let upcoming_shows: Vec<ArtistShow> =
            detail.shows.upcoming.into_iter().map(ArtistShow::from).collect();
        Self {
            venue: VenueResponse::from(detail.venue),
            past_shows_count: past_shows.len(),
            upcoming_shows_count: upcoming_shows.len(),
            past_shows,
            upcoming_shows,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ArtistDetailResponse {
    #[serde(flatten)]
    pub artist: ArtistResponse,
    pub past_shows: Vec<VenueShow>,
    pub upcoming_shows: Vec<VenueShow>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

impl From<ArtistDetail> for ArtistDetailResponse {
    fn from(detail: ArtistDetail) -> Self {
        let past_shows: Vec<VenueShow> =
            detail.shows.past.into_iter().map(VenueShow::from).collect();
        let upcoming_shows: Vec<VenueShow> =
            detail.shows.upcoming.into_iter().map(VenueShow::from).collect();
        Self {
            artist: ArtistResponse::from(detail.artist),
            past_shows_count: past_shows.len(),
            upcoming_shows_count: upcoming_shows.len(),
            past_shows,
            upcoming_shows,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ArtistListEntry {
    pub id: i32,
    pub name: String,
}

impl From<Artist> for ArtistListEntry {
    fn from(artist: Artist) -> Self {
        Self {
            id: artist.id,
            name: artist.name,
        }
    }
}

/// One row of the `/shows` listing.
#[derive(Debug, Serialize, ToSchema)]
pub struct ShowListingResponse {
    pub venue_id: i32,
    pub venue_name: String,
    pub artist_id: i32,
    pub artist_name: String,
    pub artist_image_link: String,
    pub start_time: String,
}

impl From<ShowListing> for ShowListingResponse {
    fn from((show, venue, artist): ShowListing) -> Self {
        Self {
            venue_id: venue.id,
            venue_name: venue.name,
            artist_id: artist.id,
            artist_name: artist.name,
            artist_image_link: artist.image_link,
            start_time: display_start_time(show.starts_at()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::ShowSplit;
    use jiff_diesel::Timestamp as DbTimestamp;

    fn venue(id: i32, name: &str) -> Venue {
        Venue {
            id,
            name: name.to_string(),
            city: "San Francisco".to_string(),
            state: "CA".to_string(),
            address: "1015 Folsom Street".to_string(),
            phone: "1231231234".to_string(),
            image_link: "https://img/venue.png".to_string(),
            website: String::new(),
            facebook_link: String::new(),
            genres: vec!["Jazz".to_string()],
            seeking_talent: true,
            seeking_description: String::new(),
        }
    }

    fn artist(id: i32, name: &str) -> Artist {
        Artist {
            id,
            name: name.to_string(),
            city: "San Francisco".to_string(),
            state: "CA".to_string(),
            phone: "326-123-5000".to_string(),
            image_link: format!("https://img/{id}.png"),
            website: String::new(),
            facebook_link: String::new(),
            genres: vec![],
            seeking_venue: false,
            seeking_description: String::new(),
        }
    }

    fn show(id: i32, start: &str) -> Show {
        let start: jiff::Timestamp = start.parse().unwrap();
        Show {
            id,
            venue_id: 1,
            artist_id: 4,
            start_time: DbTimestamp::from(start),
        }
    }

    #[test]
    fn test_checkbox_values() {
        assert!(!checked(&None));
        assert!(checked(&Some("y".to_string())));
        assert!(checked(&Some("on".to_string())));
        assert!(!checked(&Some("False".to_string())));
        assert!(!checked(&Some(String::new())));
    }

    #[test]
    fn test_venue_form_into_new_venue() {
        let form = VenueForm {
            name: "The Musical Hop".to_string(),
            city: "San Francisco".to_string(),
            state: "CA".to_string(),
            address: String::new(),
            phone: "123-123-1234".to_string(),
            image_link: "https://img".to_string(),
            website: "https://themusicalhop.com".to_string(),
            facebook_link: String::new(),
            genres: vec!["Jazz".to_string(), "Folk".to_string()],
            seeking_talent: Some("y".to_string()),
            seeking_description: "Looking for acts".to_string(),
        };

        let new_venue = form.into_new_venue();
        assert!(new_venue.seeking_talent);
        assert_eq!(new_venue.website, "https://themusicalhop.com");
        assert_eq!(new_venue.genres.len(), 2);
        // Normalization happens in the service.
        assert_eq!(new_venue.phone, "123-123-1234");
    }

    #[test]
    fn test_edit_form_keeps_absent_fields() {
        let form = ArtistEditForm {
            name: Some("Guns N Petals".to_string()),
            ..Default::default()
        };

        let changes = form.into_update_artist();
        assert_eq!(changes.name.as_deref(), Some("Guns N Petals"));
        assert_eq!(changes.city, None);
        assert_eq!(changes.genres, None);
        assert_eq!(changes.seeking_venue, Some(false));
    }

    #[test]
    fn test_edit_form_rejects_blank_required_field() {
        let form = VenueEditForm {
            city: Some(String::new()),
            ..Default::default()
        };
        assert!(form.validate().is_err());
        assert!(VenueEditForm::default().validate().is_ok());
    }

    #[test]
    fn test_show_form_start_time() {
        let form = ShowForm {
            artist_id: 4,
            venue_id: 1,
            start_time: "2035-04-01 20:00:00".to_string(),
        };
        let expected: jiff::Timestamp = "2035-04-01T20:00:00Z".parse().unwrap();
        assert_eq!(form.start().unwrap(), expected);

        let bad = ShowForm {
            start_time: "soon".to_string(),
            ..form
        };
        assert!(matches!(bad.start(), Err(AppError::BadRequest { .. })));
    }

    #[test]
    fn test_venue_response_formats_phone() {
        let response = VenueResponse::from(venue(1, "The Musical Hop"));
        assert_eq!(response.phone, "123-123-1234");

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["website"], "");
        assert_eq!(json["seeking_talent"], true);
    }

    #[test]
    fn test_venue_detail_counts_and_flattens() {
        let detail = VenueDetail {
            venue: venue(1, "The Musical Hop"),
            shows: ShowSplit {
                past: vec![(show(1, "2019-05-21T21:30:00Z"), artist(4, "Guns N Petals"))],
                upcoming: vec![
                    (show(2, "2035-04-01T20:00:00Z"), artist(5, "Matt Quevedo")),
                    (show(3, "2035-04-08T20:00:00Z"), artist(6, "The Wild Sax Band")),
                ],
            },
        };

        let json = serde_json::to_value(VenueDetailResponse::from(detail)).unwrap();
        assert_eq!(json["name"], "The Musical Hop");
        assert_eq!(json["past_shows_count"], 1);
        assert_eq!(json["upcoming_shows_count"], 2);
        assert_eq!(json["past_shows"][0]["artist_id"], 4);
        assert_eq!(json["past_shows"][0]["start_time"], "05/21/2019, 21:30:00");
        assert_eq!(json["upcoming_shows"][1]["artist_image_link"], "https://img/6.png");
    }

    #[test]
    fn test_area_and_search_responses() {
        let area = VenueArea {
            city: "San Francisco".to_string(),
            state: "CA".to_string(),
            venues: vec![(venue(1, "The Musical Hop"), 0), (venue(3, "Park Square"), 1)],
        };
        let area = AreaResponse::from(area);
        assert_eq!(
            area.venues[1],
            ProfileSummary {
                id: 3,
                name: "Park Square".to_string(),
                num_upcoming_shows: 1,
            }
        );

        let search = SearchResponse::from(vec![(artist(4, "Guns N Petals"), 2)]);
        assert_eq!(search.count, 1);
        assert_eq!(search.data[0].num_upcoming_shows, 2);
    }

    #[test]
    fn test_show_listing_response() {
        let listing = (
            show(1, "2019-05-21T21:30:00Z"),
            venue(1, "The Musical Hop"),
            artist(4, "Guns N Petals"),
        );
        let response = ShowListingResponse::from(listing);
        assert_eq!(response.venue_name, "The Musical Hop");
        assert_eq!(response.artist_id, 4);
        assert_eq!(response.start_time, "05/21/2019, 21:30:00");
    }
}
