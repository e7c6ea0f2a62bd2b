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

//! Slicing of ordered result sets into fixed-size pages.
//!
//! Pages are 1-based.  Requesting a page past the end of a result set yields an empty page, and
//! it is up to the caller to decide whether that is an error.  All services in this project report
//! empty pages as "not found".

use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;

/// A 1-based page index.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PageNumber(NonZeroUsize);

impl Default for PageNumber {
    fn default() -> Self {
        PageNumber::FIRST
    }
}

impl PageNumber {
    /// The first page.
    pub const FIRST: PageNumber = PageNumber(NonZeroUsize::MIN);

    /// Creates a page number from a raw 1-based `page`, or `None` if it is zero.
    pub fn new(page: usize) -> Option<Self> {
        NonZeroUsize::new(page).map(PageNumber)
    }

    /// Parses a page number from an untrusted `raw` value, falling back to the first page when
    /// the value is missing, not a number or not positive.
    pub fn parse_or_first(raw: Option<&str>) -> Self {
        raw.and_then(|s| s.trim().parse::<usize>().ok()).and_then(Self::new).unwrap_or_default()
    }

    /// Returns the page number as a 1-based integer.
    pub fn get(self) -> usize {
        self.0.get()
    }
}

/// Query string parameters to select a page.
///
/// The `page` parameter is kept as a raw string so that malformed values do not reject the
/// request and instead fall back to the first page.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct PageQuery {
    /// Requested page, if any.
    #[serde(default)]
    pub page: Option<String>,
}

impl PageQuery {
    /// Returns the page selected by this query.
    pub fn page(&self) -> PageNumber {
        PageNumber::parse_or_first(self.page.as_deref())
    }
}

/// Returns the items in `page` given pages of `size` items each.
///
/// The returned vector holds the items `[(page - 1) * size, page * size)` of `items`, clipped to
/// the available items, and is empty when the page is out of range.
pub fn paginate<T>(items: Vec<T>, page: PageNumber, size: usize) -> Vec<T> {
    let start = (page.get() - 1).saturating_mul(size);
    items.into_iter().skip(start).take(size).collect()
}
