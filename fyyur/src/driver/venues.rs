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

//! Operations on venues.

use crate::db::{self, ShowFilter};
use crate::driver::{Driver, Profile, Schedule, Summary};
use crate::model::{Venue, VenueInfo};
use derive_getters::Getters;
use log::info;
use marquee_core::db::DbError;
use marquee_core::driver::{DriverError, DriverResult};
use marquee_core::model::SearchTerm;
use std::collections::BTreeMap;

/// Creates the error returned when the venue `id` does not exist.
fn not_found(id: i64) -> DriverError {
    DriverError::NotFound(format!("Venue {} does not exist", id))
}

/// Venues located in the same city.
#[derive(Clone, Debug, Getters, PartialEq)]
pub(crate) struct VenueArea {
    /// Name of the city.
    city: String,

    /// Name of the state the city belongs to.
    state: String,

    /// Venues in the city sorted by identifier.
    venues: Vec<Summary>,
}

impl Driver {
    /// Gets all venues grouped by their location, sorted by city and state.
    pub(crate) async fn get_venue_areas(self) -> DriverResult<Vec<VenueArea>> {
        let mut ex = self.db.ex().await?;
        let venues = db::get_venues(&mut ex).await?;
        let shows = db::get_shows(&mut ex, ShowFilter::All).await?;
        let now = self.clock.now_utc();

        let mut areas: BTreeMap<(String, String), Vec<Summary>> = BTreeMap::new();
        for venue in venues {
            let info = venue.info();
            let summary = Summary::new(*venue.id(), &info.name, &shows, now, |s| {
                s.venue_id() == venue.id()
            });
            areas.entry((info.city.clone(), info.state.clone())).or_default().push(summary);
        }
        Ok(areas
            .into_iter()
            .map(|((city, state), venues)| VenueArea { city, state, venues })
            .collect())
    }

    /// Gets the venues whose name contains `term`.
    pub(crate) async fn search_venues(self, term: SearchTerm) -> DriverResult<Vec<Summary>> {
        let mut ex = self.db.ex().await?;
        let venues = db::search_venues(&mut ex, &term).await?;
        let shows = db::get_shows(&mut ex, ShowFilter::All).await?;
        let now = self.clock.now_utc();
        Ok(venues
            .iter()
            .map(|v| Summary::new(*v.id(), &v.info().name, &shows, now, |s| s.venue_id() == v.id()))
            .collect())
    }

    /// Gets the venue `id` along with the shows it hosts.
    pub(crate) async fn get_venue(self, id: i64) -> DriverResult<Profile<Venue>> {
        let mut ex = self.db.ex().await?;
        let venue = match db::get_venue(&mut ex, id).await {
            Ok(venue) => venue,
            Err(DbError::NotFound) => return Err(not_found(id)),
            Err(e) => return Err(e.into()),
        };
        let shows = db::get_shows(&mut ex, ShowFilter::Venue(id)).await?;
        let schedule = Schedule::split(shows, self.clock.now_utc());
        Ok(Profile { entity: venue, schedule })
    }

    /// Adds a new venue described by `info`.
    pub(crate) async fn create_venue(self, info: VenueInfo) -> DriverResult<Venue> {
        let info = info.validate()?;
        let mut tx = self.db.begin().await?;
        let venue = db::create_venue(tx.ex(), info).await?;
        tx.commit().await?;
        info!("Created venue {} named '{}'", venue.id(), venue.info().name);
        Ok(venue)
    }

    /// Replaces the properties of the venue `id` with `info` and returns the updated venue
    /// along with its shows.
    pub(crate) async fn update_venue(
        self,
        id: i64,
        info: VenueInfo,
    ) -> DriverResult<Profile<Venue>> {
        let info = info.validate()?;
        let mut tx = self.db.begin().await?;
        match db::update_venue(tx.ex(), id, &info).await {
            Ok(()) => (),
            Err(DbError::NotFound) => return Err(not_found(id)),
            Err(e) => return Err(e.into()),
        }
        let shows = db::get_shows(tx.ex(), ShowFilter::Venue(id)).await?;
        tx.commit().await?;
        let schedule = Schedule::split(shows, self.clock.now_utc());
        Ok(Profile { entity: Venue::new(id, info), schedule })
    }

    /// Deletes the venue `id`, which must not host any shows.
    pub(crate) async fn delete_venue(self, id: i64) -> DriverResult<()> {
        let mut tx = self.db.begin().await?;
        let shows = db::get_shows(tx.ex(), ShowFilter::Venue(id)).await?;
        if !shows.is_empty() {
            return Err(DriverError::Conflict(format!(
                "Venue {} cannot be deleted because it has {} shows",
                id,
                shows.len()
            )));
        }
        match db::delete_venue(tx.ex(), id).await {
            Ok(()) => (),
            Err(DbError::NotFound) => return Err(not_found(id)),
            Err(DbError::ConstraintViolation(e)) => return Err(DriverError::Conflict(e)),
            Err(e) => return Err(e.into()),
        }
        tx.commit().await?;
        info!("Deleted venue {}", id);
        Ok(())
    }
}
