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

//! Action to list a new venue.

use crate::driver::Driver;
use crate::rest::forms::Form;
use crate::rest::pages::{self, Flash};
use crate::rest::FailedAction;
use axum::extract::State;
use axum::response::Html;

/// POST handler for this action.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    form: Form,
) -> Result<Html<String>, FailedAction> {
    let info = form.venue_info();
    let name = info.name.clone();

    let venue = driver.create_venue(info).await.map_err(|e| {
        FailedAction::new(format!("An error occurred. Venue {} could not be listed", name), e)
    })?;

    let flash = Flash::success(format!("Venue {} was successfully listed!", venue.info().name));
    Ok(Html(pages::home(Some(&flash))))
}
