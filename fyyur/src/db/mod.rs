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

//! Database abstraction to manipulate venues, artists and shows.

use crate::model::{Artist, ArtistInfo, NewShow, ShowDetails, Venue, VenueInfo};
#[cfg(feature = "postgres")]
use marquee_core::db::postgres;
#[cfg(any(feature = "sqlite", test))]
use marquee_core::db::sqlite;
use marquee_core::db::{DbError, DbResult, Executor};
use marquee_core::model::SearchTerm;
use sqlx::Row;
#[cfg(feature = "postgres")]
use sqlx::postgres::PgRow;
#[cfg(any(feature = "sqlite", test))]
use sqlx::sqlite::SqliteRow;
#[cfg(feature = "postgres")]
use time::OffsetDateTime;


/// Initializes the database schema.
pub async fn init_schema(ex: &mut Executor) -> DbResult<()> {
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => postgres::run_schema(ex, include_str!("postgres.sql")).await,

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => sqlite::run_schema(ex, include_str!("sqlite.sql")).await,

        #[allow(unused)]
        _ => unreachable!(),
    }
}

/// Selects which shows to query.
#[derive(Clone, Copy, Debug)]
pub(crate) enum ShowFilter {
    /// All shows.
    All,

    /// Only the shows of the given artist.
    Artist(i64),

    /// Only the shows hosted by the given venue.
    Venue(i64),
}

/// Serializes a list of `genres` for storage.
fn genres_to_json(genres: &[String]) -> DbResult<String> {
    Ok(serde_json::to_string(genres)?)
}

/// Parses a `raw` list of genres as read from storage.
fn genres_from_json(raw: &str) -> DbResult<Vec<String>> {
    Ok(serde_json::from_str(raw)?)
}

/// Ensures that a mutation of the entity `id` touched exactly one row.
fn check_one_row(rows_affected: u64, what: &str) -> DbResult<()> {
    match rows_affected {
        0 => Err(DbError::NotFound),
        1 => Ok(()),
        _ => Err(DbError::BackendError(format!("{} affected more than one row", what))),
    }
}

#[cfg(feature = "postgres")]
impl TryFrom<PgRow> for Venue {
    type Error = DbError;

    fn try_from(row: PgRow) -> DbResult<Self> {
        let id: i64 = row.try_get("id").map_err(postgres::map_sqlx_error)?;
        let genres: String = row.try_get("genres").map_err(postgres::map_sqlx_error)?;
        let info = VenueInfo {
            name: row.try_get("name").map_err(postgres::map_sqlx_error)?,
            city: row.try_get("city").map_err(postgres::map_sqlx_error)?,
            state: row.try_get("state").map_err(postgres::map_sqlx_error)?,
            address: row.try_get("address").map_err(postgres::map_sqlx_error)?,
            phone: row.try_get("phone").map_err(postgres::map_sqlx_error)?,
            image_link: row.try_get("image_link").map_err(postgres::map_sqlx_error)?,
            facebook_link: row.try_get("facebook_link").map_err(postgres::map_sqlx_error)?,
            genres: genres_from_json(&genres)?,
            seeking_talent: row.try_get("seeking_talent").map_err(postgres::map_sqlx_error)?,
            seeking_talent_description: row
                .try_get("seeking_talent_description")
                .map_err(postgres::map_sqlx_error)?,
            website: row.try_get("website").map_err(postgres::map_sqlx_error)?,
        };
        Ok(Venue::new(id, info))
    }
}

#[cfg(feature = "postgres")]
impl TryFrom<PgRow> for Artist {
    type Error = DbError;

    fn try_from(row: PgRow) -> DbResult<Self> {
        let id: i64 = row.try_get("id").map_err(postgres::map_sqlx_error)?;
        let genres: String = row.try_get("genres").map_err(postgres::map_sqlx_error)?;
        let info = ArtistInfo {
            name: row.try_get("name").map_err(postgres::map_sqlx_error)?,
            city: row.try_get("city").map_err(postgres::map_sqlx_error)?,
            state: row.try_get("state").map_err(postgres::map_sqlx_error)?,
            phone: row.try_get("phone").map_err(postgres::map_sqlx_error)?,
            genres: genres_from_json(&genres)?,
            image_link: row.try_get("image_link").map_err(postgres::map_sqlx_error)?,
            facebook_link: row.try_get("facebook_link").map_err(postgres::map_sqlx_error)?,
            website: row.try_get("website").map_err(postgres::map_sqlx_error)?,
            seeking_venue: row.try_get("seeking_venue").map_err(postgres::map_sqlx_error)?,
            seeking_venue_description: row
                .try_get("seeking_venue_description")
                .map_err(postgres::map_sqlx_error)?,
        };
        Ok(Artist::new(id, info))
    }
}

#[cfg(feature = "postgres")]
impl TryFrom<PgRow> for ShowDetails {
    type Error = DbError;

    fn try_from(row: PgRow) -> DbResult<Self> {
        let id: i64 = row.try_get("id").map_err(postgres::map_sqlx_error)?;
        let artist_id: i64 = row.try_get("artist_id").map_err(postgres::map_sqlx_error)?;
        let artist_name: String = row.try_get("artist_name").map_err(postgres::map_sqlx_error)?;
        let artist_image_link: String =
            row.try_get("artist_image_link").map_err(postgres::map_sqlx_error)?;
        let venue_id: i64 = row.try_get("venue_id").map_err(postgres::map_sqlx_error)?;
        let venue_name: String = row.try_get("venue_name").map_err(postgres::map_sqlx_error)?;
        let venue_image_link: String =
            row.try_get("venue_image_link").map_err(postgres::map_sqlx_error)?;
        let start_time: OffsetDateTime =
            row.try_get("start_time").map_err(postgres::map_sqlx_error)?;
        Ok(ShowDetails::new(
            id,
            artist_id,
            artist_name,
            artist_image_link,
            venue_id,
            venue_name,
            venue_image_link,
            start_time,
        ))
    }
}

#[cfg(any(feature = "sqlite", test))]
impl TryFrom<SqliteRow> for Venue {
    type Error = DbError;

    fn try_from(row: SqliteRow) -> DbResult<Self> {
        let id: i64 = row.try_get("id").map_err(sqlite::map_sqlx_error)?;
        let genres: String = row.try_get("genres").map_err(sqlite::map_sqlx_error)?;
        let info = VenueInfo {
            name: row.try_get("name").map_err(sqlite::map_sqlx_error)?,
            city: row.try_get("city").map_err(sqlite::map_sqlx_error)?,
            state: row.try_get("state").map_err(sqlite::map_sqlx_error)?,
            address: row.try_get("address").map_err(sqlite::map_sqlx_error)?,
            phone: row.try_get("phone").map_err(sqlite::map_sqlx_error)?,
            image_link: row.try_get("image_link").map_err(sqlite::map_sqlx_error)?,
            facebook_link: row.try_get("facebook_link").map_err(sqlite::map_sqlx_error)?,
            genres: genres_from_json(&genres)?,
            seeking_talent: row.try_get("seeking_talent").map_err(sqlite::map_sqlx_error)?,
            seeking_talent_description: row
                .try_get("seeking_talent_description")
                .map_err(sqlite::map_sqlx_error)?,
            website: row.try_get("website").map_err(sqlite::map_sqlx_error)?,
        };
        Ok(Venue::new(id, info))
    }
}

#[cfg(any(feature = "sqlite", test))]
impl TryFrom<SqliteRow> for Artist {
    type Error = DbError;

    fn try_from(row: SqliteRow) -> DbResult<Self> {
        let id: i64 = row.try_get("id").map_err(sqlite::map_sqlx_error)?;
        let genres: String = row.try_get("genres").map_err(sqlite::map_sqlx_error)?;
        let info = ArtistInfo {
            name: row.try_get("name").map_err(sqlite::map_sqlx_error)?,
            city: row.try_get("city").map_err(sqlite::map_sqlx_error)?,
            state: row.try_get("state").map_err(sqlite::map_sqlx_error)?,
            phone: row.try_get("phone").map_err(sqlite::map_sqlx_error)?,
            genres: genres_from_json(&genres)?,
            image_link: row.try_get("image_link").map_err(sqlite::map_sqlx_error)?,
            facebook_link: row.try_get("facebook_link").map_err(sqlite::map_sqlx_error)?,
            website: row.try_get("website").map_err(sqlite::map_sqlx_error)?,
            seeking_venue: row.try_get("seeking_venue").map_err(sqlite::map_sqlx_error)?,
            seeking_venue_description: row
                .try_get("seeking_venue_description")
                .map_err(sqlite::map_sqlx_error)?,
        };
        Ok(Artist::new(id, info))
    }
}

#[cfg(any(feature = "sqlite", test))]
impl TryFrom<SqliteRow> for ShowDetails {
    type Error = DbError;

    fn try_from(row: SqliteRow) -> DbResult<Self> {
        let id: i64 = row.try_get("id").map_err(sqlite::map_sqlx_error)?;
        let artist_id: i64 = row.try_get("artist_id").map_err(sqlite::map_sqlx_error)?;
        let artist_name: String = row.try_get("artist_name").map_err(sqlite::map_sqlx_error)?;
        let artist_image_link: String =
            row.try_get("artist_image_link").map_err(sqlite::map_sqlx_error)?;
        let venue_id: i64 = row.try_get("venue_id").map_err(sqlite::map_sqlx_error)?;
        let venue_name: String = row.try_get("venue_name").map_err(sqlite::map_sqlx_error)?;
        let venue_image_link: String =
            row.try_get("venue_image_link").map_err(sqlite::map_sqlx_error)?;
        let start_time_secs: i64 = row.try_get("start_time_secs").map_err(sqlite::map_sqlx_error)?;
        let start_time_nsecs: i64 =
            row.try_get("start_time_nsecs").map_err(sqlite::map_sqlx_error)?;
        let start_time = sqlite::build_timestamp(start_time_secs, start_time_nsecs)?;
        Ok(ShowDetails::new(
            id,
            artist_id,
            artist_name,
            artist_image_link,
            venue_id,
            venue_name,
            venue_image_link,
            start_time,
        ))
    }
}

/// Stores a new venue described by `info` and returns it with its assigned identifier.
pub(crate) async fn create_venue(ex: &mut Executor, info: VenueInfo) -> DbResult<Venue> {
    let genres = genres_to_json(&info.genres)?;
    let id = match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "
                INSERT INTO venues
                    (name, city, state, address, phone, image_link, facebook_link, genres,
                    seeking_talent, seeking_talent_description, website)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
                RETURNING id
            ";
            let row = sqlx::query(query_str)
                .bind(&info.name)
                .bind(&info.city)
                .bind(&info.state)
                .bind(&info.address)
                .bind(&info.phone)
                .bind(&info.image_link)
                .bind(&info.facebook_link)
                .bind(&genres)
                .bind(info.seeking_talent)
                .bind(&info.seeking_talent_description)
                .bind(&info.website)
                .fetch_one(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            row.try_get::<i64, _>("id").map_err(postgres::map_sqlx_error)?
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "
                INSERT INTO venues
                    (name, city, state, address, phone, image_link, facebook_link, genres,
                    seeking_talent, seeking_talent_description, website)
                VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ";
            let done = sqlx::query(query_str)
                .bind(&info.name)
                .bind(&info.city)
                .bind(&info.state)
                .bind(&info.address)
                .bind(&info.phone)
                .bind(&info.image_link)
                .bind(&info.facebook_link)
                .bind(&genres)
                .bind(info.seeking_talent)
                .bind(&info.seeking_talent_description)
                .bind(&info.website)
                .execute(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            done.last_insert_rowid()
        }

        #[allow(unused)]
        _ => unreachable!(),
    };
    Ok(Venue::new(id, info))
}

/// Gets all venues sorted by their identifier.
pub(crate) async fn get_venues(ex: &mut Executor) -> DbResult<Vec<Venue>> {
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "
                SELECT
                    id, name, city, state, address, phone, image_link, facebook_link, genres,
                        seeking_talent, seeking_talent_description, website
                FROM venues
                ORDER BY id
            ";
            let rows = sqlx::query(query_str)
                .fetch_all(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            rows.into_iter().map(Venue::try_from).collect()
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "
                SELECT
                    id, name, city, state, address, phone, image_link, facebook_link, genres,
                        seeking_talent, seeking_talent_description, website
                FROM venues
                ORDER BY id
            ";
            let rows = sqlx::query(query_str)
                .fetch_all(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            rows.into_iter().map(Venue::try_from).collect()
        }

        #[allow(unused)]
        _ => unreachable!(),
    }
}

/// Gets the venue identified by `id`.
pub(crate) async fn get_venue(ex: &mut Executor, id: i64) -> DbResult<Venue> {
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "
                SELECT
                    id, name, city, state, address, phone, image_link, facebook_link, genres,
                        seeking_talent, seeking_talent_description, website
                FROM venues
                WHERE id = $1
            ";
            let row = sqlx::query(query_str)
                .bind(id)
                .fetch_one(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            Venue::try_from(row)
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "
                SELECT
                    id, name, city, state, address, phone, image_link, facebook_link, genres,
                        seeking_talent, seeking_talent_description, website
                FROM venues
                WHERE id = ?
            ";
            let row = sqlx::query(query_str)
                .bind(id)
                .fetch_one(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            Venue::try_from(row)
        }

        #[allow(unused)]
        _ => unreachable!(),
    }
}

/// Gets the venues whose name contains `term`, ignoring case, sorted by their identifier.
pub(crate) async fn search_venues(ex: &mut Executor, term: &SearchTerm) -> DbResult<Vec<Venue>> {
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "
                SELECT
                    id, name, city, state, address, phone, image_link, facebook_link, genres,
                        seeking_talent, seeking_talent_description, website
                FROM venues
                WHERE name ILIKE $1 ESCAPE '\\'
                ORDER BY id
            ";
            let rows = sqlx::query(query_str)
                .bind(term.like_pattern())
                .fetch_all(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            rows.into_iter().map(Venue::try_from).collect()
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            // LIKE in SQLite only folds ASCII case so matching happens here.
            let query_str = "
                SELECT
                    id, name, city, state, address, phone, image_link, facebook_link, genres,
                        seeking_talent, seeking_talent_description, website
                FROM venues
                ORDER BY id
            ";
            let rows = sqlx::query(query_str)
                .fetch_all(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            let all = rows.into_iter().map(Venue::try_from).collect::<DbResult<Vec<Venue>>>()?;
            Ok(all.into_iter().filter(|e| term.matches(&e.info().name)).collect())
        }

        #[allow(unused)]
        _ => unreachable!(),
    }
}

/// Replaces the properties of the venue `id` with `info`.
pub(crate) async fn update_venue(ex: &mut Executor, id: i64, info: &VenueInfo) -> DbResult<()> {
    let genres = genres_to_json(&info.genres)?;
    let rows_affected = match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "
                UPDATE venues
                SET
                    name = $1, city = $2, state = $3, address = $4, phone = $5, image_link = $6,
                    facebook_link = $7, genres = $8, seeking_talent = $9,
                    seeking_talent_description = $10, website = $11
                WHERE id = $12
            ";
            let done = sqlx::query(query_str)
                .bind(&info.name)
                .bind(&info.city)
                .bind(&info.state)
                .bind(&info.address)
                .bind(&info.phone)
                .bind(&info.image_link)
                .bind(&info.facebook_link)
                .bind(&genres)
                .bind(info.seeking_talent)
                .bind(&info.seeking_talent_description)
                .bind(&info.website)
                .bind(id)
                .execute(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            done.rows_affected()
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "
                UPDATE venues
                SET
                    name = ?, city = ?, state = ?, address = ?, phone = ?, image_link = ?,
                    facebook_link = ?, genres = ?, seeking_talent = ?,
                    seeking_talent_description = ?, website = ?
                WHERE id = ?
            ";
            let done = sqlx::query(query_str)
                .bind(&info.name)
                .bind(&info.city)
                .bind(&info.state)
                .bind(&info.address)
                .bind(&info.phone)
                .bind(&info.image_link)
                .bind(&info.facebook_link)
                .bind(&genres)
                .bind(info.seeking_talent)
                .bind(&info.seeking_talent_description)
                .bind(&info.website)
                .bind(id)
                .execute(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            done.rows_affected()
        }

        #[allow(unused)]
        _ => unreachable!(),
    };
    check_one_row(rows_affected, "Update")
}

/// Deletes the venue identified by `id`.
///
/// Fails with `DbError::ConstraintViolation` if the venue still has shows.
pub(crate) async fn delete_venue(ex: &mut Executor, id: i64) -> DbResult<()> {
    let rows_affected = match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "DELETE FROM venues WHERE id = $1";
            let done = sqlx::query(query_str)
                .bind(id)
                .execute(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            done.rows_affected()
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "DELETE FROM venues WHERE id = ?";
            let done = sqlx::query(query_str)
                .bind(id)
                .execute(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            done.rows_affected()
        }

        #[allow(unused)]
        _ => unreachable!(),
    };
    check_one_row(rows_affected, "Deletion")
}

/// Stores a new artist described by `info` and returns it with its assigned identifier.
pub(crate) async fn create_artist(ex: &mut Executor, info: ArtistInfo) -> DbResult<Artist> {
    let genres = genres_to_json(&info.genres)?;
    let id = match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "
                INSERT INTO artists
                    (name, city, state, phone, genres, image_link, facebook_link, website,
                    seeking_venue, seeking_venue_description)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
                RETURNING id
            ";
            let row = sqlx::query(query_str)
                .bind(&info.name)
                .bind(&info.city)
                .bind(&info.state)
                .bind(&info.phone)
                .bind(&genres)
                .bind(&info.image_link)
                .bind(&info.facebook_link)
                .bind(&info.website)
                .bind(info.seeking_venue)
                .bind(&info.seeking_venue_description)
                .fetch_one(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            row.try_get::<i64, _>("id").map_err(postgres::map_sqlx_error)?
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "
                INSERT INTO artists
                    (name, city, state, phone, genres, image_link, facebook_link, website,
                    seeking_venue, seeking_venue_description)
                VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ";
            let done = sqlx::query(query_str)
                .bind(&info.name)
                .bind(&info.city)
                .bind(&info.state)
                .bind(&info.phone)
                .bind(&genres)
                .bind(&info.image_link)
                .bind(&info.facebook_link)
                .bind(&info.website)
                .bind(info.seeking_venue)
                .bind(&info.seeking_venue_description)
                .execute(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            done.last_insert_rowid()
        }

        #[allow(unused)]
        _ => unreachable!(),
    };
    Ok(Artist::new(id, info))
}

/// Gets all artists sorted by their identifier.
pub(crate) async fn get_artists(ex: &mut Executor) -> DbResult<Vec<Artist>> {
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "
                SELECT
                    id, name, city, state, phone, genres, image_link, facebook_link, website,
                        seeking_venue, seeking_venue_description
                FROM artists
                ORDER BY id
            ";
            let rows = sqlx::query(query_str)
                .fetch_all(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            rows.into_iter().map(Artist::try_from).collect()
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "
                SELECT
                    id, name, city, state, phone, genres, image_link, facebook_link, website,
                        seeking_venue, seeking_venue_description
                FROM artists
                ORDER BY id
            ";
            let rows = sqlx::query(query_str)
                .fetch_all(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            rows.into_iter().map(Artist::try_from).collect()
        }

        #[allow(unused)]
        _ => unreachable!(),
    }
}

/// Gets the artist identified by `id`.
pub(crate) async fn get_artist(ex: &mut Executor, id: i64) -> DbResult<Artist> {
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "
                SELECT
                    id, name, city, state, phone, genres, image_link, facebook_link, website,
                        seeking_venue, seeking_venue_description
                FROM artists
                WHERE id = $1
            ";
            let row = sqlx::query(query_str)
                .bind(id)
                .fetch_one(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            Artist::try_from(row)
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "
                SELECT
                    id, name, city, state, phone, genres, image_link, facebook_link, website,
                        seeking_venue, seeking_venue_description
                FROM artists
                WHERE id = ?
            ";
            let row = sqlx::query(query_str)
                .bind(id)
                .fetch_one(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            Artist::try_from(row)
        }

        #[allow(unused)]
        _ => unreachable!(),
    }
}

/// Gets the artists whose name contains `term`, ignoring case, sorted by their identifier.
pub(crate) async fn search_artists(ex: &mut Executor, term: &SearchTerm) -> DbResult<Vec<Artist>> {
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "
                SELECT
                    id, name, city, state, phone, genres, image_link, facebook_link, website,
                        seeking_venue, seeking_venue_description
                FROM artists
                WHERE name ILIKE $1 ESCAPE '\\'
                ORDER BY id
            ";
            let rows = sqlx::query(query_str)
                .bind(term.like_pattern())
                .fetch_all(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            rows.into_iter().map(Artist::try_from).collect()
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            // LIKE in SQLite only folds ASCII case so matching happens here.
            let query_str = "
                SELECT
                    id, name, city, state, phone, genres, image_link, facebook_link, website,
                        seeking_venue, seeking_venue_description
                FROM artists
                ORDER BY id
            ";
            let rows = sqlx::query(query_str)
                .fetch_all(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            let all = rows.into_iter().map(Artist::try_from).collect::<DbResult<Vec<Artist>>>()?;
            Ok(all.into_iter().filter(|e| term.matches(&e.info().name)).collect())
        }

        #[allow(unused)]
        _ => unreachable!(),
    }
}

/// Replaces the properties of the artist `id` with `info`.
pub(crate) async fn update_artist(ex: &mut Executor, id: i64, info: &ArtistInfo) -> DbResult<()> {
    let genres = genres_to_json(&info.genres)?;
    let rows_affected = match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "
                UPDATE artists
                SET
                    name = $1, city = $2, state = $3, phone = $4, genres = $5, image_link = $6,
                    facebook_link = $7, website = $8, seeking_venue = $9,
                    seeking_venue_description = $10
                WHERE id = $11
            ";
            let done = sqlx::query(query_str)
                .bind(&info.name)
                .bind(&info.city)
                .bind(&info.state)
                .bind(&info.phone)
                .bind(&genres)
                .bind(&info.image_link)
                .bind(&info.facebook_link)
                .bind(&info.website)
                .bind(info.seeking_venue)
                .bind(&info.seeking_venue_description)
                .bind(id)
                .execute(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            done.rows_affected()
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "
                UPDATE artists
                SET
                    name = ?, city = ?, state = ?, phone = ?, genres = ?, image_link = ?,
                    facebook_link = ?, website = ?, seeking_venue = ?,
                    seeking_venue_description = ?
                WHERE id = ?
            ";
            let done = sqlx::query(query_str)
                .bind(&info.name)
                .bind(&info.city)
                .bind(&info.state)
                .bind(&info.phone)
                .bind(&genres)
                .bind(&info.image_link)
                .bind(&info.facebook_link)
                .bind(&info.website)
                .bind(info.seeking_venue)
                .bind(&info.seeking_venue_description)
                .bind(id)
                .execute(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            done.rows_affected()
        }

        #[allow(unused)]
        _ => unreachable!(),
    };
    check_one_row(rows_affected, "Update")
}

/// Deletes the artist identified by `id`.
///
/// Fails with `DbError::ConstraintViolation` if the artist still has shows.
pub(crate) async fn delete_artist(ex: &mut Executor, id: i64) -> DbResult<()> {
    let rows_affected = match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "DELETE FROM artists WHERE id = $1";
            let done = sqlx::query(query_str)
                .bind(id)
                .execute(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            done.rows_affected()
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "DELETE FROM artists WHERE id = ?";
            let done = sqlx::query(query_str)
                .bind(id)
                .execute(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            done.rows_affected()
        }

        #[allow(unused)]
        _ => unreachable!(),
    };
    check_one_row(rows_affected, "Deletion")
}

/// Stores a `new` show and returns its assigned identifier.
///
/// Fails with `DbError::ConstraintViolation` if the artist or the venue do not exist.
pub(crate) async fn create_show(ex: &mut Executor, new: &NewShow) -> DbResult<i64> {
    let id = match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "
                INSERT INTO shows (artist_id, venue_id, start_time)
                VALUES ($1, $2, $3)
                RETURNING id
            ";
            let row = sqlx::query(query_str)
                .bind(*new.artist_id())
                .bind(*new.venue_id())
                .bind(*new.start_time())
                .fetch_one(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            row.try_get::<i64, _>("id").map_err(postgres::map_sqlx_error)?
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let (start_time_secs, start_time_nsecs) = sqlite::unpack_timestamp(*new.start_time())?;
            let query_str = "
                INSERT INTO shows (artist_id, venue_id, start_time_secs, start_time_nsecs)
                VALUES (?, ?, ?, ?)
            ";
            let done = sqlx::query(query_str)
                .bind(*new.artist_id())
                .bind(*new.venue_id())
                .bind(start_time_secs)
                .bind(start_time_nsecs)
                .execute(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            done.last_insert_rowid()
        }

        #[allow(unused)]
        _ => unreachable!(),
    };
    Ok(id)
}

/// Returns the `WHERE` clause for `filter` using `placeholder` for its argument, if any.
fn show_filter_clause(filter: ShowFilter, placeholder: &str) -> (String, Option<i64>) {
    match filter {
        ShowFilter::All => (String::new(), None),
        ShowFilter::Artist(id) => (format!("WHERE s.artist_id = {}", placeholder), Some(id)),
        ShowFilter::Venue(id) => (format!("WHERE s.venue_id = {}", placeholder), Some(id)),
    }
}

/// Gets the shows selected by `filter` along with their artist and venue details, sorted by
/// start time.
pub(crate) async fn get_shows(ex: &mut Executor, filter: ShowFilter) -> DbResult<Vec<ShowDetails>> {
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let (where_clause, id) = show_filter_clause(filter, "$1");
            let query_str = format!(
                "
                SELECT
                    s.id, s.artist_id, a.name AS artist_name, a.image_link AS artist_image_link,
                    s.venue_id, v.name AS venue_name, v.image_link AS venue_image_link,
                    s.start_time
                FROM shows s
                    JOIN artists a ON s.artist_id = a.id
                    JOIN venues v ON s.venue_id = v.id
                {}
                ORDER BY s.start_time, s.id
                ",
                where_clause
            );
            let mut query = sqlx::query(&query_str);
            if let Some(id) = id {
                query = query.bind(id);
            }
            let rows = query.fetch_all(ex.conn()).await.map_err(postgres::map_sqlx_error)?;
            rows.into_iter().map(ShowDetails::try_from).collect()
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let (where_clause, id) = show_filter_clause(filter, "?");
            let query_str = format!(
                "
                SELECT
                    s.id, s.artist_id, a.name AS artist_name, a.image_link AS artist_image_link,
                    s.venue_id, v.name AS venue_name, v.image_link AS venue_image_link,
                    s.start_time_secs, s.start_time_nsecs
                FROM shows s
                    JOIN artists a ON s.artist_id = a.id
                    JOIN venues v ON s.venue_id = v.id
                {}
                ORDER BY s.start_time_secs, s.start_time_nsecs, s.id
                ",
                where_clause
            );
            let mut query = sqlx::query(&query_str);
            if let Some(id) = id {
                query = query.bind(id);
            }
            let rows = query.fetch_all(ex.conn()).await.map_err(sqlite::map_sqlx_error)?;
            rows.into_iter().map(ShowDetails::try_from).collect()
        }

        #[allow(unused)]
        _ => unreachable!(),
    }
}
