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

//! API to search questions by a substring of their text.

use crate::driver::Driver;
use crate::model::Question;
use axum::Json;
use axum::extract::{Query, State};
use marquee_core::model::SearchTerm;
use marquee_core::pagination::PageQuery;
use marquee_core::rest::{JsonBody, RestError, RestResult};
use serde::{Deserialize, Serialize};

/// Message sent to the server to search for questions.
#[derive(Deserialize, Serialize)]
pub(crate) struct SearchRequest {
    /// Text to look for, case-insensitively.  A missing term is treated as empty.
    #[serde(default, rename = "searchTerm")]
    pub(crate) search_term: Option<String>,
}

/// Message returned by the server with the questions that matched a search.
#[derive(Serialize)]
#[cfg_attr(test, derive(Debug, Deserialize, PartialEq))]
pub(crate) struct SearchResponse {
    /// Always true.
    pub(crate) success: bool,

    /// Matching questions in the requested page.
    pub(crate) questions: Vec<Question>,

    /// Total number of matching questions.
    pub(crate) total_questions: usize,

    /// Always null as searches span all categories.
    pub(crate) current_category: Option<String>,
}

/// POST handler for this API.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    Query(query): Query<PageQuery>,
    JsonBody(request): JsonBody<SearchRequest>,
) -> RestResult<Json<SearchResponse>> {
    let term = SearchTerm::new(request.search_term.unwrap_or_default())
        .map_err(|e| RestError::Unprocessable(e.to_string()))?;
    let page = driver.search_questions(term, query.page()).await?;
    Ok(Json(SearchResponse {
        success: true,
        questions: page.questions,
        total_questions: page.total_questions,
        current_category: None,
    }))
}
