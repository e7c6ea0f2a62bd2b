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

//! API to create a new question.

use crate::driver::Driver;
use crate::model::{CategoryId, Difficulty, NewQuestion, Question};
use axum::Json;
use axum::extract::State;
use marquee_core::rest::{JsonBody, RestError, RestResult};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Message sent to the server to create a question.
///
/// All fields are optional at the protocol level so that missing or malformed fields are reported
/// as unprocessable instead of as malformed requests.
#[derive(Deserialize, Serialize)]
pub(crate) struct CreateRequest {
    /// Text of the question.
    #[serde(default)]
    pub(crate) question: Option<Value>,

    /// Text of the answer.
    #[serde(default)]
    pub(crate) answer: Option<Value>,

    /// Identifier of the category, as a number or a numeric string.
    #[serde(default)]
    pub(crate) category: Option<Value>,

    /// Difficulty from 1 to 5, as a number or a numeric string.
    #[serde(default)]
    pub(crate) difficulty: Option<Value>,
}

/// Extracts the required field `name` from `value` and converts it to its desired type.
fn required<T: DeserializeOwned>(name: &str, value: Option<Value>) -> RestResult<T> {
    match value {
        None | Some(Value::Null) => Err(RestError::Unprocessable(format!("Missing {}", name))),
        Some(value) => serde_json::from_value(value)
            .map_err(|e| RestError::Unprocessable(format!("Invalid {}: {}", name, e))),
    }
}

impl CreateRequest {
    /// Validates the request and converts it into a question to be stored.
    fn into_new_question(self) -> RestResult<NewQuestion> {
        let question: String = required("question", self.question)?;
        let answer: String = required("answer", self.answer)?;
        let category: CategoryId = required("category", self.category)?;
        let difficulty: Difficulty = required("difficulty", self.difficulty)?;
        NewQuestion::new(question, answer, category, difficulty)
            .map_err(|e| RestError::Unprocessable(e.to_string()))
    }
}

/// Message returned by the server after creating a question.
#[derive(Serialize)]
#[cfg_attr(test, derive(Debug, Deserialize, PartialEq))]
pub(crate) struct CreateResponse {
    /// Always true.
    pub(crate) success: bool,

    /// Identifier of the new question.
    pub(crate) created: i64,

    /// First page of questions after the creation.
    pub(crate) questions: Vec<Question>,

    /// Total number of questions after the creation.
    pub(crate) total_questions: usize,
}

/// POST handler for this API.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    JsonBody(request): JsonBody<CreateRequest>,
) -> RestResult<Json<CreateResponse>> {
    let new = request.into_new_question()?;
    let (question, page) = driver.create_question(new).await?;
    Ok(Json(CreateResponse {
        success: true,
        created: *question.id(),
        questions: page.questions,
        total_questions: page.total_questions,
    }))
}
