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

//! API to list all categories.

use crate::driver::Driver;
use crate::model::Category;
use axum::Json;
use axum::extract::State;
use marquee_core::rest::{EmptyBody, RestResult};
#[cfg(test)]
use serde::Deserialize;
use serde::Serialize;

/// Message returned by the server with the list of categories.
#[derive(Serialize)]
#[cfg_attr(test, derive(Debug, Deserialize, PartialEq))]
pub(crate) struct CategoriesResponse {
    /// Always true.
    pub(crate) success: bool,

    /// All categories sorted by identifier.
    pub(crate) categories: Vec<Category>,
}

/// GET handler for this API.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    _: EmptyBody,
) -> RestResult<Json<CategoriesResponse>> {
    let categories = driver.get_categories().await?;
    Ok(Json(CategoriesResponse { success: true, categories }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::testutils::*;
    use axum::http;
    use marquee_core::rest::testutils::OneShotBuilder;
    use marquee_core::test_payload_must_be_empty;

    fn route() -> (http::Method, String) {
        (http::Method::GET, "/categories".to_owned())
    }

    #[tokio::test]
    async fn test_ok() {
        let context = TestContext::setup().await;

        let science = context.create_category("Science").await;
        let art = context.create_category("Art").await;

        let response = OneShotBuilder::new(context.into_app(), route())
            .send_empty()
            .await
            .expect_json::<CategoriesResponse>()
            .await;
        assert_eq!(CategoriesResponse { success: true, categories: vec![science, art] }, response);
    }

    #[tokio::test]
    async fn test_none() {
        let context = TestContext::setup().await;

        OneShotBuilder::new(context.into_app(), route())
            .send_empty()
            .await
            .expect_status(http::StatusCode::NOT_FOUND)
            .expect_error("No categories")
            .await;
    }

    test_payload_must_be_empty!(TestContext::setup().await.into_app(), route());
}
