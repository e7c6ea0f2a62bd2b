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

//! REST interface for the trivia service.

use crate::driver::Driver;
use axum::Router;
use marquee_core::rest::{
    RestError, RestResult, cors_layer, json_method_not_allowed, not_found_fallback,
};

mod categories_get;
mod category_questions_get;
mod question_delete;
mod questions_get;
mod questions_post;
mod questions_search_post;
mod quizzes_post;
#[cfg(test)]
mod testutils;

/// Parses the identifier `raw` taken from a path segment.
///
/// Paths with non-numeric identifiers do not name any resource.
fn parse_path_id(raw: &str) -> RestResult<i64> {
    raw.parse::<i64>().map_err(|_| RestError::NotFound("Resource not found".to_owned()))
}

/// Creates the router for the application.
pub(crate) fn app(driver: Driver) -> Router {
    use axum::routing::{delete, get, post};

    Router::new()
        .route("/categories", get(categories_get::handler))
        .route("/categories/:id/questions", get(category_questions_get::handler))
        .route("/questions", get(questions_get::handler).post(questions_post::handler))
        .route("/questions/search", post(questions_search_post::handler))
        .route("/questions/:id", delete(question_delete::handler))
        .route("/quizzes", post(quizzes_post::handler))
        .fallback(not_found_fallback)
        .layer(axum::middleware::map_response(json_method_not_allowed))
        .layer(cors_layer())
        .with_state(driver)
}
