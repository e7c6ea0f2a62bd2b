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

//! API to get the next question of a quiz.

use crate::driver::Driver;
use crate::model::{CategoryId, Question};
use axum::Json;
use axum::extract::State;
use marquee_core::rest::{JsonBody, RestError, RestResult};
use serde::{Deserialize, Serialize};

/// Category selected for a quiz.
#[derive(Deserialize, Serialize)]
pub(crate) struct QuizCategory {
    /// Identifier of the category, or 0 for all categories.
    #[serde(default)]
    pub(crate) id: Option<CategoryId>,

    /// Name of the category.  Informational only.
    #[serde(default, rename = "type")]
    pub(crate) kind: Option<String>,
}

/// Message sent to the server to get the next question of a quiz.
#[derive(Deserialize, Serialize)]
pub(crate) struct QuizRequest {
    /// Identifiers of the questions already asked in this quiz.
    #[serde(default)]
    pub(crate) previous_questions: Option<Vec<i64>>,

    /// Category to pick questions from.
    #[serde(default)]
    pub(crate) quiz_category: Option<QuizCategory>,
}

/// Message returned by the server with the next question of a quiz.
#[derive(Serialize)]
#[cfg_attr(test, derive(Debug, Deserialize, PartialEq))]
pub(crate) struct QuizResponse {
    /// Always true.
    pub(crate) success: bool,

    /// The next question to ask.
    pub(crate) question: Question,
}

/// POST handler for this API.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    JsonBody(request): JsonBody<QuizRequest>,
) -> RestResult<Json<QuizResponse>> {
    let previous = request
        .previous_questions
        .ok_or_else(|| RestError::InvalidRequest("Missing previous_questions".to_owned()))?;
    let category = request
        .quiz_category
        .and_then(|c| c.id)
        .ok_or_else(|| RestError::InvalidRequest("Missing quiz_category".to_owned()))?;

    let question = driver.next_quiz_question(category, &previous).await?;
    Ok(Json(QuizResponse { success: true, question }))
}
