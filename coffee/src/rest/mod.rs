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

//! REST interface for the drinks menu.

use crate::driver::Driver;
use axum::Router;
use axum::extract::FromRef;
use marquee_core::rest::{
    RestError, RestResult, cors_layer, json_method_not_allowed, not_found_fallback,
};
use marquee_jwt::JwtVerifier;
#[cfg(test)]
use serde::Deserialize;
use serde::Serialize;

mod drink_delete;
mod drink_patch;
mod drinks_detail_get;
mod drinks_get;
mod drinks_post;
#[cfg(test)]
mod testutils;

/// State shared by all handlers.
#[derive(Clone)]
pub(crate) struct AppState {
    /// Business logic of the service.
    driver: Driver,

    /// Gate for the APIs that require permissions.
    verifier: JwtVerifier,
}

impl FromRef<AppState> for Driver {
    fn from_ref(state: &AppState) -> Self {
        state.driver.clone()
    }
}

impl FromRef<AppState> for JwtVerifier {
    fn from_ref(state: &AppState) -> Self {
        state.verifier.clone()
    }
}

/// Message returned by the server with a list of drinks in either of their representations.
#[derive(Serialize)]
#[cfg_attr(test, derive(Debug, Deserialize, PartialEq))]
pub(crate) struct DrinksResponse<T> {
    /// Always true.
    pub(crate) success: bool,

    /// The drinks.
    pub(crate) drinks: Vec<T>,
}

/// Parses the identifier `raw` taken from a path segment.
///
/// Paths with non-numeric identifiers do not name any resource.
fn parse_path_id(raw: &str) -> RestResult<i64> {
    raw.parse::<i64>().map_err(|_| RestError::NotFound("Resource not found".to_owned()))
}

/// Creates the router for the application.
pub(crate) fn app(driver: Driver, verifier: JwtVerifier) -> Router {
    use axum::routing::{get, patch};

    Router::new()
        .route("/drinks", get(drinks_get::handler).post(drinks_post::handler))
        .route("/drinks-detail", get(drinks_detail_get::handler))
        .route("/drinks/:id", patch(drink_patch::handler).delete(drink_delete::handler))
        .fallback(not_found_fallback)
        .layer(axum::middleware::map_response(json_method_not_allowed))
        .layer(cors_layer())
        .with_state(AppState { driver, verifier })
}
