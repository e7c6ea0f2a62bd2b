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

//! API to add a drink to the menu.

use crate::driver::Driver;
use crate::model::{DrinkTitle, LongDrink, Recipe};
use crate::rest::DrinksResponse;
use axum::Json;
use axum::extract::State;
use axum::http::HeaderMap;
use marquee_core::rest::{JsonBody, RestError, RestResult};
use marquee_jwt::JwtVerifier;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Permission required to call this API.
const PERMISSION: &str = "post:drinks";

/// Message sent to the server to add a drink.
#[derive(Deserialize, Serialize)]
pub(crate) struct CreateRequest {
    /// Title of the drink.
    #[serde(default)]
    pub(crate) title: Option<Value>,

    /// Recipe of the drink in any of its accepted forms.
    #[serde(default)]
    pub(crate) recipe: Option<Value>,
}

impl CreateRequest {
    /// Validates the request and extracts the properties of the new drink.
    fn into_parts(self) -> RestResult<(DrinkTitle, Recipe)> {
        let title = match self.title {
            Some(Value::String(title)) => DrinkTitle::new(title),
            None | Some(Value::Null) => {
                return Err(RestError::Unprocessable("Missing title".to_owned()));
            }
            Some(_) => return Err(RestError::Unprocessable("Title must be a string".to_owned())),
        }
        .map_err(|e| RestError::Unprocessable(e.to_string()))?;

        let recipe = match self.recipe {
            None | Some(Value::Null) => {
                return Err(RestError::Unprocessable("Missing recipe".to_owned()));
            }
            Some(recipe) => {
                Recipe::from_value(recipe).map_err(|e| RestError::Unprocessable(e.to_string()))?
            }
        };

        Ok((title, recipe))
    }
}

/// POST handler for this API.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    State(verifier): State<JwtVerifier>,
    headers: HeaderMap,
    JsonBody(request): JsonBody<CreateRequest>,
) -> RestResult<Json<DrinksResponse<LongDrink>>> {
    verifier.authorize(&headers, PERMISSION).await?;

    let (title, recipe) = request.into_parts()?;
    let drink = driver.create_drink(title, recipe).await?;
    Ok(Json(DrinksResponse { success: true, drinks: vec![drink.long()] }))
}
