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

//! Operations on artists.

use crate::db::{self, ShowFilter};
use crate::driver::{Driver, Profile, Schedule, Summary};
use crate::model::{Artist, ArtistInfo};
use log::info;
use marquee_core::db::DbError;
use marquee_core::driver::{DriverError, DriverResult};
use marquee_core::model::SearchTerm;

/// Creates the error returned when the artist `id` does not exist.
fn not_found(id: i64) -> DriverError {
    DriverError::NotFound(format!("Artist {} does not exist", id))
}

impl Driver {
    /// Gets all artists sorted by identifier.
    pub(crate) async fn get_artists(self) -> DriverResult<Vec<Artist>> {
        Ok(db::get_artists(&mut self.db.ex().await?).await?)
    }

    /// Gets the artists whose name contains `term`.
    pub(crate) async fn search_artists(self, term: SearchTerm) -> DriverResult<Vec<Summary>> {
        let mut ex = self.db.ex().await?;
        let artists = db::search_artists(&mut ex, &term).await?;
        let shows = db::get_shows(&mut ex, ShowFilter::All).await?;
        let now = self.clock.now_utc();
        Ok(artists
            .iter()
            .map(|a| {
                Summary::new(*a.id(), &a.info().name, &shows, now, |s| s.artist_id() == a.id())
            })
            .collect())
    }

    /// Gets the artist `id` along with the shows it plays in.
    pub(crate) async fn get_artist(self, id: i64) -> DriverResult<Profile<Artist>> {
        let mut ex = self.db.ex().await?;
        let artist = match db::get_artist(&mut ex, id).await {
            Ok(artist) => artist,
            Err(DbError::NotFound) => return Err(not_found(id)),
            Err(e) => return Err(e.into()),
        };
        let shows = db::get_shows(&mut ex, ShowFilter::Artist(id)).await?;
        let schedule = Schedule::split(shows, self.clock.now_utc());
        Ok(Profile { entity: artist, schedule })
    }

    /// Adds a new artist described by `info`.
    pub(crate) async fn create_artist(self, info: ArtistInfo) -> DriverResult<Artist> {
        let info = info.validate()?;
        let mut tx = self.db.begin().await?;
        let artist = db::create_artist(tx.ex(), info).await?;
        tx.commit().await?;
        info!("Created artist {} named '{}'", artist.id(), artist.info().name);
        Ok(artist)
    }

    /// Replaces the properties of the artist `id` with `info` and returns the updated artist
    /// along with its shows.
    pub(crate) async fn update_artist(
        self,
        id: i64,
        info: ArtistInfo,
    ) -> DriverResult<Profile<Artist>> {
        let info = info.validate()?;
        let mut tx = self.db.begin().await?;
        match db::update_artist(tx.ex(), id, &info).await {
            Ok(()) => (),
            Err(DbError::NotFound) => return Err(not_found(id)),
            Err(e) => return Err(e.into()),
        }
        let shows = db::get_shows(tx.ex(), ShowFilter::Artist(id)).await?;
        tx.commit().await?;
        let schedule = Schedule::split(shows, self.clock.now_utc());
        Ok(Profile { entity: Artist::new(id, info), schedule })
    }

    /// Deletes the artist `id`, which must not play in any shows.
    pub(crate) async fn delete_artist(self, id: i64) -> DriverResult<()> {
        let mut tx = self.db.begin().await?;
        let shows = db::get_shows(tx.ex(), ShowFilter::Artist(id)).await?;
        if !shows.is_empty() {
            return Err(DriverError::Conflict(format!(
                "Artist {} cannot be deleted because it has {} shows",
                id,
                shows.len()
            )));
        }
        match db::delete_artist(tx.ex(), id).await {
            Ok(()) => (),
            Err(DbError::NotFound) => return Err(not_found(id)),
            Err(DbError::ConstraintViolation(e)) => return Err(DriverError::Conflict(e)),
            Err(e) => return Err(e.into()),
        }
        tx.commit().await?;
        info!("Deleted artist {}", id);
        Ok(())
    }
}
