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

//! Test utilities for the business layer.

use crate::db;
use crate::driver::Driver;
use crate::model::{Artist, ArtistInfo, NewShow, Venue, VenueInfo};
use marquee_core::clocks::testutils::SettableClock;
use marquee_core::db::{Db, Executor};
use std::sync::Arc;
use time::macros::datetime;
use time::{Duration, OffsetDateTime};

/// Current time of the clock when a test starts.
pub(crate) const NOW: OffsetDateTime = datetime!(2023-06-15 18:00:00 UTC);

/// Offset in seconds from `NOW` of a show that already happened.
pub(crate) const PAST: i64 = -86400;

/// Offset in seconds from `NOW` of a show that has not started yet.
pub(crate) const UPCOMING: i64 = 3600;

/// Builds the properties of a venue called `name` in `city`.
pub(crate) fn venue_info(name: &str, city: &str) -> VenueInfo {
    VenueInfo {
        name: name.to_owned(),
        city: city.to_owned(),
        state: "CA".to_owned(),
        address: format!("1 Main Street, {}", city),
        genres: vec!["Jazz".to_owned()],
        ..Default::default()
    }
}

/// Builds the properties of an artist called `name`.
pub(crate) fn artist_info(name: &str) -> ArtistInfo {
    ArtistInfo {
        name: name.to_owned(),
        city: "San Francisco".to_owned(),
        state: "CA".to_owned(),
        genres: vec!["Rock n Roll".to_owned()],
        ..Default::default()
    }
}

/// State of a running test.
pub(crate) struct TestContext {
    /// The database backing the driver.
    db: Arc<dyn Db + Send + Sync>,

    /// The clock injected into the driver.
    clock: Arc<SettableClock>,

    /// The driver under test.
    driver: Driver,
}

impl TestContext {
    /// Initializes the driver using an in-memory database and a clock stopped at `NOW`.
    pub(crate) async fn setup() -> Self {
        let db = Arc::from(marquee_core::db::sqlite::testutils::setup().await);
        db::init_schema(&mut db.ex().await.unwrap()).await.unwrap();
        let clock = Arc::new(SettableClock::new(NOW));
        let driver = Driver::new(db.clone(), clock.clone());
        Self { db, clock, driver }
    }

    /// Gets a direct executor against the database.
    pub(crate) async fn ex(&self) -> Executor {
        self.db.ex().await.unwrap()
    }

    /// Gets a copy of the driver in this test context.
    pub(crate) fn driver(&self) -> Driver {
        self.driver.clone()
    }

    /// Returns the instant `offset` seconds away from `NOW`.
    pub(crate) fn at(&self, offset: i64) -> OffsetDateTime {
        NOW + Duration::seconds(offset)
    }

    /// Moves the clock `secs` seconds forward.
    pub(crate) fn advance_clock(&self, secs: u64) {
        self.clock.advance(std::time::Duration::from_secs(secs));
    }

    /// Creates a venue by directly modifying the backing database.
    pub(crate) async fn create_venue(&self, name: &str, city: &str) -> Venue {
        db::create_venue(&mut self.ex().await, venue_info(name, city)).await.unwrap()
    }

    /// Creates an artist by directly modifying the backing database.
    pub(crate) async fn create_artist(&self, name: &str) -> Artist {
        db::create_artist(&mut self.ex().await, artist_info(name)).await.unwrap()
    }

    /// Creates a show of `artist` at `venue` starting `offset` seconds away from `NOW` by
    /// directly modifying the backing database.  Returns the identifier of the show.
    pub(crate) async fn create_show(&self, artist: &Artist, venue: &Venue, offset: i64) -> i64 {
        let new = NewShow::new(*artist.id(), *venue.id(), self.at(offset));
        db::create_show(&mut self.ex().await, &new).await.unwrap()
    }

    /// Gets all venues by directly querying the backing database.
    pub(crate) async fn all_venues(&self) -> Vec<Venue> {
        db::get_venues(&mut self.ex().await).await.unwrap()
    }

    /// Gets all artists by directly querying the backing database.
    pub(crate) async fn all_artists(&self) -> Vec<Artist> {
        db::get_artists(&mut self.ex().await).await.unwrap()
    }
}
