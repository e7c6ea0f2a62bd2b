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

//! Action to edit an artist.

use crate::driver::Driver;
use crate::rest::forms::Form;
use crate::rest::pages::{self, Flash};
use crate::rest::{FailedAction, parse_path_id};
use axum::extract::{Path, State};
use axum::response::Html;

/// POST handler for this action.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    Path(raw_id): Path<String>,
    form: Form,
) -> Result<Html<String>, FailedAction> {
    let context = || format!("An error occurred. Artist {} could not be updated", raw_id);
    let id = parse_path_id(&raw_id).map_err(|e| FailedAction::new(context(), e))?;

    let profile = driver
        .update_artist(id, form.artist_info())
        .await
        .map_err(|e| FailedAction::new(context(), e))?;

    let name = &profile.entity().info().name;
    let flash = Flash::success(format!("Artist {} was successfully updated!", name));
    Ok(Html(pages::artist_profile(&profile, Some(&flash))))
}
