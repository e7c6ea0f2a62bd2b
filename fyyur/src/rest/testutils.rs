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

//! Test utilities for the HTML interface.

use crate::db::{self, ShowFilter};
use crate::driver::Driver;
use crate::driver::testutils::{NOW, artist_info, venue_info};
use crate::model::{Artist, NewShow, ShowDetails, Venue};
use crate::rest::app;
use axum::Router;
use marquee_core::clocks::testutils::SettableClock;
use marquee_core::db::{Db, Executor};
use std::sync::Arc;
use time::Duration;

pub(crate) use crate::driver::testutils::{PAST, UPCOMING};

/// State of a running test.
pub(crate) struct TestContext {
    /// The database backing the app.
    db: Arc<dyn Db + Send + Sync>,

    /// The router serving the app.
    app: Router,
}

impl TestContext {
    /// Initializes the app using an in-memory database and a clock stopped at `NOW`.
    pub(crate) async fn setup() -> Self {
        let db = Arc::from(marquee_core::db::sqlite::testutils::setup().await);
        db::init_schema(&mut db.ex().await.unwrap()).await.unwrap();
        let clock = Arc::new(SettableClock::new(NOW));
        let app = app(Driver::new(db.clone(), clock));
        Self { db, app }
    }

    /// Gets a direct executor against the database.
    async fn ex(&self) -> Executor {
        self.db.ex().await.unwrap()
    }

    /// Gets a clone of the app router.
    pub(crate) fn app(&self) -> Router {
        self.app.clone()
    }

    /// Consumes the context and transforms it into the app router.
    pub(crate) fn into_app(self) -> Router {
        self.app
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
        let new = NewShow::new(*artist.id(), *venue.id(), NOW + Duration::seconds(offset));
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

    /// Gets all shows by directly querying the backing database.
    pub(crate) async fn all_shows(&self) -> Vec<ShowDetails> {
        db::get_shows(&mut self.ex().await, ShowFilter::All).await.unwrap()
    }
}
