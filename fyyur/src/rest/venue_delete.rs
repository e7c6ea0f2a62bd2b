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

//! Action to delete a venue.

use crate::driver::Driver;
use crate::rest::pages::{self, Flash};
use crate::rest::{FailedAction, parse_path_id};
use axum::extract::{Path, State};
use axum::response::Html;

/// DELETE handler for this action.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    Path(raw_id): Path<String>,
) -> Result<Html<String>, FailedAction> {
    let context = || format!("An error occurred. Venue {} could not be deleted", raw_id);
    let id = parse_path_id(&raw_id).map_err(|e| FailedAction::new(context(), e))?;

    driver.delete_venue(id).await.map_err(|e| FailedAction::new(context(), e))?;

    let flash = Flash::success(format!("Venue {} was successfully deleted!", id));
    Ok(Html(pages::home(Some(&flash))))
}
