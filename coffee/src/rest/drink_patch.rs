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

//! API to modify a drink in the menu.

use crate::driver::Driver;
use crate::model::LongDrink;
use crate::rest::{DrinksResponse, parse_path_id};
use axum::Json;
use axum::extract::{Path, State};
use axum::http::HeaderMap;
use marquee_core::rest::{JsonBody, RestResult};
use marquee_jwt::JwtVerifier;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Permission required to call this API.
const PERMISSION: &str = "patch:drinks";

/// Message sent to the server to modify a drink.
#[derive(Deserialize, Serialize)]
pub(crate) struct UpdateRequest {
    /// New title of the drink.  Always required.
    #[serde(default)]
    pub(crate) title: Option<String>,

    /// New recipe of the drink in any of its accepted forms, if it changes.
    #[serde(default)]
    pub(crate) recipe: Option<Value>,
}

/// PATCH handler for this API.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    State(verifier): State<JwtVerifier>,
    Path(id): Path<String>,
    headers: HeaderMap,
    JsonBody(request): JsonBody<UpdateRequest>,
) -> RestResult<Json<DrinksResponse<LongDrink>>> {
    verifier.authorize(&headers, PERMISSION).await?;

    let id = parse_path_id(&id)?;
    let drink = driver.update_drink(id, request.title, request.recipe).await?;
    Ok(Json(DrinksResponse { success: true, drinks: vec![drink.long()] }))
}
