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

//! HTML interface for the venues and artists listing.
//!
//! Pages that only read data report failures with a standalone error page.  Pages that modify
//! data report failures by rendering the home page with an error notice.  Both carry the status
//! code of the underlying error.

use crate::driver::Driver;
use axum::Router;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use marquee_core::driver::DriverError;
use marquee_core::model::ModelError;
use marquee_core::rest::{RestError, RestResult};

mod artist_create_get;
mod artist_create_post;
mod artist_delete;
mod artist_edit_get;
mod artist_edit_post;
mod artist_get;
mod artists_get;
mod artists_search_post;
mod forms;
mod home_get;
mod pages;
mod show_create_get;
mod show_create_post;
mod shows_get;
#[cfg(test)]
mod testutils;
mod venue_create_get;
mod venue_create_post;
mod venue_delete;
mod venue_edit_get;
mod venue_edit_post;
mod venue_get;
mod venues_get;
mod venues_search_post;

/// Failure of a request that renders a standalone error page.
#[derive(Debug)]
pub(crate) struct ErrorPage(RestError);

impl From<RestError> for ErrorPage {
    fn from(e: RestError) -> Self {
        Self(e)
    }
}

impl From<DriverError> for ErrorPage {
    fn from(e: DriverError) -> Self {
        Self(e.into())
    }
}

impl From<ModelError> for ErrorPage {
    fn from(e: ModelError) -> Self {
        Self(e.into())
    }
}

impl IntoResponse for ErrorPage {
    fn into_response(self) -> Response {
        self.0.log();

        let status = self.0.status();
        (status, Html(pages::error(status, &self.0.to_string()))).into_response()
    }
}

/// Failure of a request that modifies data, which renders the home page with an error notice.
#[derive(Debug)]
pub(crate) struct FailedAction {
    /// Description of the action that failed.
    context: String,

    /// Reason for the failure.
    error: RestError,
}

impl FailedAction {
    /// Creates a new failure of the action described by `context` due to `error`.
    pub(crate) fn new<S: Into<String>, E: Into<RestError>>(context: S, error: E) -> Self {
        Self { context: context.into(), error: error.into() }
    }
}

impl IntoResponse for FailedAction {
    fn into_response(self) -> Response {
        self.error.log();

        let flash = pages::Flash::error(format!("{}: {}", self.context, self.error));
        (self.error.status(), Html(pages::home(Some(&flash)))).into_response()
    }
}

/// Parses the identifier `raw` taken from a path segment.
///
/// Paths with non-numeric identifiers do not name any page.
fn parse_path_id(raw: &str) -> RestResult<i64> {
    raw.parse::<i64>().map_err(|_| RestError::NotFound("Page not found".to_owned()))
}

/// Router fallback that answers requests to unknown paths with an HTML 404.
async fn not_found_page() -> ErrorPage {
    ErrorPage(RestError::NotFound("Page not found".to_owned()))
}

/// Response mapper that replaces the bare 405 responses generated by the router when a path
/// exists but the method does not with an HTML 405.
async fn html_method_not_allowed(response: Response) -> Response {
    if response.status() != StatusCode::METHOD_NOT_ALLOWED
        || response.headers().contains_key(axum::http::header::CONTENT_TYPE)
    {
        return response;
    }

    let allow = response.headers().get(axum::http::header::ALLOW).cloned();
    let mut response = ErrorPage(RestError::MethodNotAllowed).into_response();
    if let Some(allow) = allow {
        response.headers_mut().insert(axum::http::header::ALLOW, allow);
    }
    response
}

/// Creates the router for the application.
pub(crate) fn app(driver: Driver) -> Router {
    use axum::routing::{get, post};

    Router::new()
        .route("/", get(home_get::handler))
        .route("/venues", get(venues_get::handler))
        .route(
            "/venues/search",
            get(venues_search_post::handler).post(venues_search_post::handler),
        )
        .route(
            "/venues/create",
            get(venue_create_get::handler).post(venue_create_post::handler),
        )
        .route("/venues/:id", get(venue_get::handler).delete(venue_delete::handler))
        .route("/venues/:id/edit", get(venue_edit_get::handler).post(venue_edit_post::handler))
        .route("/artists", get(artists_get::handler))
        .route(
            "/artists/search",
            get(artists_search_post::handler).post(artists_search_post::handler),
        )
        .route(
            "/artists/create",
            get(artist_create_get::handler).post(artist_create_post::handler),
        )
        .route("/artists/:id", get(artist_get::handler).delete(artist_delete::handler))
        .route(
            "/artists/:id/edit",
            get(artist_edit_get::handler).post(artist_edit_post::handler),
        )
        .route("/shows", get(shows_get::handler))
        .route("/shows/create", get(show_create_get::handler).post(show_create_post::handler))
        .fallback(not_found_page)
        .layer(axum::middleware::map_response(html_method_not_allowed))
        .with_state(driver)
}
