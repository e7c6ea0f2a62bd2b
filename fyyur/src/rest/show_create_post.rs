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

//! Action to list a new show.

use crate::driver::Driver;
use crate::model::{NewShow, parse_start_time};
use crate::rest::FailedAction;
use crate::rest::forms::Form;
use crate::rest::pages::{self, Flash};
use axum::extract::State;
use axum::response::Html;
use marquee_core::rest::RestError;

/// Context of the error notice when the show cannot be listed.
const ERROR_CONTEXT: &str = "An error occurred. Show could not be listed";

/// POST handler for this action.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    form: Form,
) -> Result<Html<String>, FailedAction> {
    let fail = |e: RestError| FailedAction::new(ERROR_CONTEXT, e);

    let artist_id = form.id("artist_id").map_err(fail)?;
    let venue_id = form.id("venue_id").map_err(fail)?;
    let start_time =
        parse_start_time(&form.get("start_time")).map_err(|e| fail(RestError::from(e)))?;

    driver
        .create_show(NewShow::new(artist_id, venue_id, start_time))
        .await
        .map_err(|e| FailedAction::new(ERROR_CONTEXT, e))?;

    let flash = Flash::success("Show was successfully listed!".to_owned());
    Ok(Html(pages::home(Some(&flash))))
}
