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

//! API to list the drinks in the menu with all of their details.

use crate::driver::Driver;
use crate::model::LongDrink;
use crate::rest::DrinksResponse;
use axum::Json;
use axum::extract::State;
use axum::http::HeaderMap;
use marquee_core::rest::{EmptyBody, RestResult};
use marquee_jwt::JwtVerifier;

/// Permission required to call this API.
const PERMISSION: &str = "get:drinks-detail";

/// GET handler for this API.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    State(verifier): State<JwtVerifier>,
    headers: HeaderMap,
    _: EmptyBody,
) -> RestResult<Json<DrinksResponse<LongDrink>>> {
    verifier.authorize(&headers, PERMISSION).await?;

    let drinks = driver.get_drinks().await?;
    Ok(Json(DrinksResponse { success: true, drinks: drinks.iter().map(|d| d.long()).collect() }))
}
