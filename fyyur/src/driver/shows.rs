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

//! Operations on shows.

use crate::db::{self, ShowFilter};
use crate::driver::Driver;
use crate::model::{NewShow, ShowDetails};
use log::info;
use marquee_core::db::DbError;
use marquee_core::driver::{DriverError, DriverResult};

impl Driver {
    /// Gets all shows sorted by start time.
    pub(crate) async fn get_shows(self) -> DriverResult<Vec<ShowDetails>> {
        Ok(db::get_shows(&mut self.db.ex().await?, ShowFilter::All).await?)
    }

    /// Schedules a `new` show and returns its identifier.
    ///
    /// The artist and the venue must already exist.
    pub(crate) async fn create_show(self, new: NewShow) -> DriverResult<i64> {
        let mut tx = self.db.begin().await?;
        match db::get_artist(tx.ex(), *new.artist_id()).await {
            Ok(_) => (),
            Err(DbError::NotFound) => {
                return Err(DriverError::Unprocessable(format!(
                    "Artist {} does not exist",
                    new.artist_id()
                )));
            }
            Err(e) => return Err(e.into()),
        }
        match db::get_venue(tx.ex(), *new.venue_id()).await {
            Ok(_) => (),
            Err(DbError::NotFound) => {
                return Err(DriverError::Unprocessable(format!(
                    "Venue {} does not exist",
                    new.venue_id()
                )));
            }
            Err(e) => return Err(e.into()),
        }
        let id = db::create_show(tx.ex(), &new).await?;
        tx.commit().await?;
        info!("Created show {} for artist {} at venue {}", id, new.artist_id(), new.venue_id());
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use crate::driver::testutils::*;
    use crate::model::NewShow;
    use marquee_core::driver::DriverError;

    #[tokio::test]
    async fn test_get_shows_sorted_by_start_time() {
        let context = TestContext::setup().await;

        let venue = context.create_venue("The Musical Hop", "San Francisco").await;
        let artist = context.create_artist("Guns N Petals").await;
        let late = context.create_show(&artist, &venue, UPCOMING).await;
        let early = context.create_show(&artist, &venue, PAST).await;

        let shows = context.driver().get_shows().await.unwrap();
        assert_eq!(vec![early, late], shows.iter().map(|s| *s.id()).collect::<Vec<i64>>());
        assert_eq!("Guns N Petals", shows[0].artist_name());
        assert_eq!("The Musical Hop", shows[0].venue_name());
    }

    #[tokio::test]
    async fn test_create_show_ok() {
        let context = TestContext::setup().await;

        let venue = context.create_venue("The Musical Hop", "San Francisco").await;
        let artist = context.create_artist("Guns N Petals").await;

        let new = NewShow::new(*artist.id(), *venue.id(), context.at(UPCOMING));
        let id = context.driver().create_show(new).await.unwrap();

        let shows = context.driver().get_shows().await.unwrap();
        assert_eq!(1, shows.len());
        assert_eq!(id, *shows[0].id());
        assert_eq!(context.at(UPCOMING), *shows[0].start_time());
    }

    #[tokio::test]
    async fn test_create_show_unknown_artist_or_venue() {
        let context = TestContext::setup().await;

        let venue = context.create_venue("The Musical Hop", "San Francisco").await;
        let artist = context.create_artist("Guns N Petals").await;

        let new = NewShow::new(999, *venue.id(), context.at(UPCOMING));
        assert_eq!(
            DriverError::Unprocessable("Artist 999 does not exist".to_owned()),
            context.driver().create_show(new).await.unwrap_err()
        );

        let new = NewShow::new(*artist.id(), 998, context.at(UPCOMING));
        assert_eq!(
            DriverError::Unprocessable("Venue 998 does not exist".to_owned()),
            context.driver().create_show(new).await.unwrap_err()
        );

        assert!(context.driver().get_shows().await.unwrap().is_empty());
    }
}
