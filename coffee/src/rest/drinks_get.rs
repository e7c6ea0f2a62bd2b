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

//! API to list the drinks in the menu.

use crate::driver::Driver;
use crate::model::ShortDrink;
use crate::rest::DrinksResponse;
use axum::Json;
use axum::extract::State;
use marquee_core::rest::{EmptyBody, RestResult};

/// GET handler for this API.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    _: EmptyBody,
) -> RestResult<Json<DrinksResponse<ShortDrink>>> {
    let drinks = driver.get_drinks().await?;
    Ok(Json(DrinksResponse { success: true, drinks: drinks.iter().map(|d| d.short()).collect() }))
}
