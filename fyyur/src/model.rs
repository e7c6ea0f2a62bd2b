// Marquee
// Copyright 2023 Julio Merino
//
// Licensed under the Apache License, Version 2.0 (the "License"); you may not
// use this file except in compliance with the License.  You may obtain a copy
// of the License at:
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.  See the
// License for the specific language governing permissions and limitations
// under the License.

//! High-level data types for venues, artists and the shows that bring them together.

use derive_getters::Getters;
use derive_more::Constructor;
use marquee_core::model::{ModelError, ModelResult};
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{OffsetDateTime, PrimitiveDateTime, UtcOffset};

/// Genres offered by the venue and artist forms.
pub(crate) const GENRES: &[&str] = &[
    "Alternative",
    "Blues",
    "Classical",
    "Country",
    "Electronic",
    "Folk",
    "Funk",
    "Hip-Hop",
    "Heavy Metal",
    "Instrumental",
    "Jazz",
    "Musical Theatre",
    "Pop",
    "Punk",
    "R&B",
    "Reggae",
    "Rock n Roll",
    "Soul",
    "Other",
];

/// Ensures that the field `name` with `value` is not blank.
fn require(name: &str, value: &str) -> ModelResult<()> {
    if value.trim().is_empty() {
        return Err(ModelError(format!("{} cannot be empty", name)));
    }
    Ok(())
}

/// Ensures that all `genres` are known.
fn check_genres(genres: &[String]) -> ModelResult<()> {
    for genre in genres {
        if !GENRES.contains(&genre.as_str()) {
            return Err(ModelError(format!("Unknown genre '{}'", genre)));
        }
    }
    Ok(())
}

/// Properties of a venue as provided by users.
///
/// Optional text fields are empty strings when not provided.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct VenueInfo {
    /// Name of the venue.
    pub(crate) name: String,

    /// City where the venue is.
    pub(crate) city: String,

    /// State where the venue is.
    pub(crate) state: String,

    /// Street address of the venue.
    pub(crate) address: String,

    /// Contact phone number.
    pub(crate) phone: String,

    /// Link to a picture of the venue.
    pub(crate) image_link: String,

    /// Link to the venue's Facebook page.
    pub(crate) facebook_link: String,

    /// Genres of the music played at the venue.
    pub(crate) genres: Vec<String>,

    /// Whether the venue is looking for artists.
    pub(crate) seeking_talent: bool,

    /// Details on the artists the venue is looking for.
    pub(crate) seeking_talent_description: String,

    /// Website of the venue.
    pub(crate) website: String,
}

impl VenueInfo {
    /// Checks that all required fields are present.
    pub(crate) fn validate(self) -> ModelResult<Self> {
        require("Name", &self.name)?;
        require("City", &self.city)?;
        require("State", &self.state)?;
        require("Address", &self.address)?;
        check_genres(&self.genres)?;
        Ok(self)
    }
}

/// A stored venue.
#[derive(Clone, Constructor, Debug, Getters, PartialEq)]
pub(crate) struct Venue {
    /// Identifier of the venue.
    id: i64,

    /// Properties of the venue.
    info: VenueInfo,
}

/// Properties of an artist as provided by users.
///
/// Optional text fields are empty strings when not provided.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct ArtistInfo {
    /// Name of the artist.
    pub(crate) name: String,

    /// City where the artist is based.
    pub(crate) city: String,

    /// State where the artist is based.
    pub(crate) state: String,

    /// Contact phone number.
    pub(crate) phone: String,

    /// Genres the artist plays.
    pub(crate) genres: Vec<String>,

    /// Link to a picture of the artist.
    pub(crate) image_link: String,

    /// Link to the artist's Facebook page.
    pub(crate) facebook_link: String,

    /// Website of the artist.
    pub(crate) website: String,

    /// Whether the artist is looking for venues.
    pub(crate) seeking_venue: bool,

    /// Details on the venues the artist is looking for.
    pub(crate) seeking_venue_description: String,
}

impl ArtistInfo {
    /// Checks that all required fields are present.
    pub(crate) fn validate(self) -> ModelResult<Self> {
        require("Name", &self.name)?;
        require("City", &self.city)?;
        require("State", &self.state)?;
        check_genres(&self.genres)?;
        Ok(self)
    }
}

/// A stored artist.
#[derive(Clone, Constructor, Debug, Getters, PartialEq)]
pub(crate) struct Artist {
    /// Identifier of the artist.
    id: i64,

    /// Properties of the artist.
    info: ArtistInfo,
}

/// Parses the start time of a show as entered by users.
///
/// Accepts `YYYY-MM-DD HH:MM:SS`, interpreted as UTC, and RFC 3339.
pub(crate) fn parse_start_time(raw: &str) -> ModelResult<OffsetDateTime> {
    let raw = raw.trim();
    let format = format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
    if let Ok(primitive) = PrimitiveDateTime::parse(raw, format) {
        return Ok(primitive.assume_utc());
    }
    OffsetDateTime::parse(raw, &Rfc3339)
        .map_err(|_| ModelError(format!("Invalid start time '{}'", raw)))
}

/// Formats the start time of a show for display.
pub(crate) fn format_start_time(start_time: OffsetDateTime) -> String {
    let format = format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
    let utc = start_time.to_offset(UtcOffset::UTC);
    match utc.format(format) {
        Ok(s) => format!("{} UTC", s),
        Err(_) => utc.to_string(),
    }
}

/// A show that has not been stored yet.
#[derive(Clone, Constructor, Debug, Getters, PartialEq)]
pub(crate) struct NewShow {
    /// Artist playing in the show.
    artist_id: i64,

    /// Venue hosting the show.
    venue_id: i64,

    /// When the show starts.
    start_time: OffsetDateTime,
}

/// A stored show along with the names and pictures of its artist and venue.
#[derive(Clone, Constructor, Debug, Getters, PartialEq)]
pub(crate) struct ShowDetails {
    /// Identifier of the show.
    id: i64,

    /// Identifier of the artist playing in the show.
    artist_id: i64,

    /// Name of the artist.
    artist_name: String,

    /// Link to a picture of the artist.
    artist_image_link: String,

    /// Identifier of the venue hosting the show.
    venue_id: i64,

    /// Name of the venue.
    venue_name: String,

    /// Link to a picture of the venue.
    venue_image_link: String,

    /// When the show starts.
    start_time: OffsetDateTime,
}

impl ShowDetails {
    /// Returns true if the show starts strictly after `now`.
    pub(crate) fn is_upcoming(&self, now: OffsetDateTime) -> bool {
        self.start_time > now
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn test_venue_info_validate() {
        let info = VenueInfo {
            name: "The Musical Hop".to_owned(),
            city: "San Francisco".to_owned(),
            state: "CA".to_owned(),
            address: "1015 Folsom Street".to_owned(),
            ..Default::default()
        };
        assert_eq!(info.clone(), info.clone().validate().unwrap());

        let bad = VenueInfo { address: " ".to_owned(), ..info };
        assert_eq!(ModelError("Address cannot be empty".to_owned()), bad.validate().unwrap_err());
    }

    #[test]
    fn test_artist_info_validate() {
        let info = ArtistInfo {
            name: "Guns N Petals".to_owned(),
            city: "San Francisco".to_owned(),
            state: "CA".to_owned(),
            ..Default::default()
        };
        assert_eq!(info.clone(), info.clone().validate().unwrap());

        let bad = ArtistInfo { name: String::new(), ..info.clone() };
        assert_eq!(ModelError("Name cannot be empty".to_owned()), bad.validate().unwrap_err());

        let bad = ArtistInfo { genres: vec!["Jazz".to_owned(), "Polka".to_owned()], ..info };
        assert_eq!(ModelError("Unknown genre 'Polka'".to_owned()), bad.validate().unwrap_err());
    }

    #[test]
    fn test_parse_start_time_ok() {
        assert_eq!(
            datetime!(2035-04-01 20:00:00 UTC),
            parse_start_time("2035-04-01 20:00:00").unwrap()
        );
        assert_eq!(
            datetime!(2019-05-21 21:30:00 UTC),
            parse_start_time("2019-05-21T21:30:00.000Z").unwrap()
        );
        assert_eq!(
            datetime!(2019-05-21 21:30:00 +02:00),
            parse_start_time(" 2019-05-21T21:30:00+02:00 ").unwrap()
        );
    }

    #[test]
    fn test_parse_start_time_invalid() {
        for raw in ["", "tomorrow", "2035-04-01", "2035-13-01 20:00:00"] {
            assert!(parse_start_time(raw).unwrap_err().0.contains("Invalid start time"));
        }
    }

    #[test]
    fn test_format_start_time() {
        assert_eq!(
            "2035-04-01 20:00:00 UTC",
            format_start_time(datetime!(2035-04-01 20:00:00 UTC))
        );
        assert_eq!(
            "2035-04-01 18:00:00 UTC",
            format_start_time(datetime!(2035-04-01 20:00:00 +02:00))
        );
    }

    #[test]
    fn test_show_is_upcoming() {
        let show = ShowDetails::new(
            1,
            2,
            "Artist".to_owned(),
            String::new(),
            3,
            "Venue".to_owned(),
            String::new(),
            datetime!(2030-01-01 10:00:00 UTC),
        );
        assert!(show.is_upcoming(datetime!(2030-01-01 09:59:59 UTC)));
        assert!(!show.is_upcoming(datetime!(2030-01-01 10:00:00 UTC)));
        assert!(!show.is_upcoming(datetime!(2030-01-01 10:00:01 UTC)));
    }
}
