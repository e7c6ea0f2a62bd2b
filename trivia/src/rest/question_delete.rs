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

//! API to delete a question.

use crate::driver::Driver;
use crate::model::Question;
use crate::rest::parse_path_id;
use axum::Json;
use axum::extract::{Path, State};
use marquee_core::rest::{EmptyBody, RestResult};
#[cfg(test)]
use serde::Deserialize;
use serde::Serialize;

/// Message returned by the server after deleting a question.
#[derive(Serialize)]
#[cfg_attr(test, derive(Debug, Deserialize, PartialEq))]
pub(crate) struct DeleteResponse {
    /// Always true.
    pub(crate) success: bool,

    /// Identifier of the deleted question.
    pub(crate) deleted: i64,

    /// First page of the remaining questions.
    pub(crate) questions: Vec<Question>,

    /// Total number of remaining questions.
    pub(crate) total_questions: usize,
}

/// DELETE handler for this API.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    Path(id): Path<String>,
    _: EmptyBody,
) -> RestResult<Json<DeleteResponse>> {
    let id = parse_path_id(&id)?;
    let page = driver.delete_question(id).await?;
    Ok(Json(DeleteResponse {
        success: true,
        deleted: id,
        questions: page.questions,
        total_questions: page.total_questions,
    }))
}
