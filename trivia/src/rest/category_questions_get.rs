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

//! API to list the questions in a category page by page.

use crate::driver::Driver;
use crate::model::{CategoryId, Question};
use crate::rest::parse_path_id;
use axum::Json;
use axum::extract::{Path, Query, State};
use marquee_core::pagination::PageQuery;
use marquee_core::rest::{EmptyBody, RestResult};
#[cfg(test)]
use serde::Deserialize;
use serde::Serialize;

/// Message returned by the server with a page of questions in a category.
#[derive(Serialize)]
#[cfg_attr(test, derive(Debug, Deserialize, PartialEq))]
pub(crate) struct CategoryQuestionsResponse {
    /// Always true.
    pub(crate) success: bool,

    /// Questions in the requested page.
    pub(crate) questions: Vec<Question>,

    /// Total number of questions in the category.
    pub(crate) total_questions: usize,

    /// Name of the category.
    pub(crate) current_category: String,
}

/// GET handler for this API.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    Path(id): Path<String>,
    Query(query): Query<PageQuery>,
    _: EmptyBody,
) -> RestResult<Json<CategoryQuestionsResponse>> {
    let id = CategoryId::new(parse_path_id(&id)?);
    let (category, page) = driver.get_category_questions(id, query.page()).await?;
    Ok(Json(CategoryQuestionsResponse {
        success: true,
        questions: page.questions,
        total_questions: page.total_questions,
        current_category: category.kind().clone(),
    }))
}
