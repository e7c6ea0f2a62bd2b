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

//! Business logic for the venues and artists listing.

use crate::model::ShowDetails;
use derive_getters::Getters;
use marquee_core::clocks::Clock;
use marquee_core::db::Db;
use std::sync::Arc;
use time::OffsetDateTime;

mod artists;
mod shows;
#[cfg(test)]
pub(crate) mod testutils;
mod venues;

pub(crate) use venues::VenueArea;

/// Business logic.
///
/// The public operations exposed by the driver are all "one shot": they start and commit a
/// transaction, so it's incorrect for the caller to use two separate calls.  For this reason,
/// these operations consume the driver in an attempt to minimize the possibility of executing
/// two operations.
#[derive(Clone)]
pub(crate) struct Driver {
    /// The database that the driver uses for persistence.
    db: Arc<dyn Db + Send + Sync>,

    /// Clock used to tell apart past shows from upcoming shows.
    clock: Arc<dyn Clock + Send + Sync>,
}

impl Driver {
    /// Creates a new driver backed by the given injected components.
    pub(crate) fn new(db: Arc<dyn Db + Send + Sync>, clock: Arc<dyn Clock + Send + Sync>) -> Self {
        Self { db, clock }
    }
}

/// Minimal description of a venue or an artist for listings.
#[derive(Clone, Debug, Getters, PartialEq)]
pub(crate) struct Summary {
    /// Identifier of the entity.
    id: i64,

    /// Name of the entity.
    name: String,

    /// Number of shows of the entity that have not started yet.
    num_upcoming_shows: usize,
}

impl Summary {
    /// Summarizes the entity `id` named `name` by counting its upcoming shows out of `shows`.
    fn new<F>(id: i64, name: &str, shows: &[ShowDetails], now: OffsetDateTime, owns: F) -> Self
    where
        F: Fn(&ShowDetails) -> bool,
    {
        let num_upcoming_shows = shows.iter().filter(|s| owns(s) && s.is_upcoming(now)).count();
        Self { id, name: name.to_owned(), num_upcoming_shows }
    }
}

/// The shows of a venue or an artist split by whether they already happened.
#[derive(Clone, Debug, Default, Getters, PartialEq)]
pub(crate) struct Schedule {
    /// Shows that started at or before the current time, sorted by start time.
    past: Vec<ShowDetails>,

    /// Shows that start after the current time, sorted by start time.
    upcoming: Vec<ShowDetails>,
}

impl Schedule {
    /// Splits `shows` relative to `now`.
    fn split(shows: Vec<ShowDetails>, now: OffsetDateTime) -> Self {
        let (upcoming, past) = shows.into_iter().partition(|s| s.is_upcoming(now));
        Self { past, upcoming }
    }
}

/// A venue or an artist along with its shows.
#[derive(Clone, Debug, Getters, PartialEq)]
pub(crate) struct Profile<T> {
    /// The venue or artist.
    entity: T,

    /// Shows the entity takes part in.
    schedule: Schedule,
}
