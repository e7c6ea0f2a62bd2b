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

//! Page with the form to edit a venue.

use crate::driver::Driver;
use crate::rest::{ErrorPage, pages, parse_path_id};
use axum::extract::{Path, State};
use axum::response::Html;

/// GET handler for this page.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    Path(id): Path<String>,
) -> Result<Html<String>, ErrorPage> {
    let id = parse_path_id(&id)?;
    let profile = driver.get_venue(id).await?;
    Ok(Html(pages::venue_form(Some(id), profile.entity().info())))
}
