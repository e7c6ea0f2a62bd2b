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

//! API to remove a drink from the menu.

use crate::driver::Driver;
use crate::rest::parse_path_id;
use axum::Json;
use axum::extract::{Path, State};
use axum::http::HeaderMap;
use marquee_core::rest::{EmptyBody, RestResult};
use marquee_jwt::JwtVerifier;
#[cfg(test)]
use serde::Deserialize;
use serde::Serialize;

/// Permission required to call this API.
const PERMISSION: &str = "delete:drinks";

/// Message returned by the server after removing a drink.
#[derive(Serialize)]
#[cfg_attr(test, derive(Debug, Deserialize, PartialEq))]
pub(crate) struct DeleteResponse {
    /// Always true.
    pub(crate) success: bool,

    /// Identifier of the removed drink.
    pub(crate) delete: i64,
}

/// DELETE handler for this API.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    State(verifier): State<JwtVerifier>,
    Path(id): Path<String>,
    headers: HeaderMap,
    _: EmptyBody,
) -> RestResult<Json<DeleteResponse>> {
    verifier.authorize(&headers, PERMISSION).await?;

    let id = parse_path_id(&id)?;
    driver.delete_drink(id).await?;
    Ok(Json(DeleteResponse { success: true, delete: id }))
}
