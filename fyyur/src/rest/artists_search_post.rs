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

//! Page to search artists by name.

use crate::driver::Driver;
use crate::rest::forms::Form;
use crate::rest::{ErrorPage, pages};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;
use marquee_core::model::SearchTerm;
use marquee_core::rest::RestError;

/// GET and POST handler for this page.
///
/// A search without matches renders the empty results page with a 404 status.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    form: Form,
) -> Result<(StatusCode, Html<String>), ErrorPage> {
    let raw_term = form.get("search_term");
    let term = SearchTerm::new(raw_term.clone())
        .map_err(|e| ErrorPage::from(RestError::Unprocessable(e.to_string())))?;

    let results = driver.search_artists(term).await?;
    let status = if results.is_empty() { StatusCode::NOT_FOUND } else { StatusCode::OK };

    Ok((status, Html(pages::search_results("artists", &raw_term, &results))))
}
