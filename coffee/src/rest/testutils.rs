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

//! Test utilities for the REST API.

use crate::db;
use crate::driver::Driver;
use crate::model::{Drink, DrinkTitle, Ingredient, Recipe};
use crate::rest::app;
use axum::Router;
use marquee_core::db::{Db, Executor};
use marquee_jwt::testutils::{TokenBuilder, test_verifier};
use std::sync::Arc;

/// Creates a valid token that grants `permissions`.
pub(crate) fn token(permissions: &[&str]) -> String {
    TokenBuilder::default().with_permissions(permissions).build()
}

/// Builds the recipe of a latte.
pub(crate) fn latte_recipe() -> Recipe {
    Recipe::new(vec![
        Ingredient::new("brown", "espresso", 1).unwrap(),
        Ingredient::new("white", "milk", 3).unwrap(),
    ])
    .unwrap()
}

/// State of a running test.
pub(crate) struct TestContext {
    /// The database backing the app.
    db: Arc<dyn Db + Send + Sync>,

    /// The router serving the app.
    app: Router,
}

impl TestContext {
    /// Initializes the app using an in-memory database and a verifier that trusts test tokens.
    pub(crate) async fn setup() -> Self {
        let db = Arc::from(marquee_core::db::sqlite::testutils::setup().await);
        db::init_schema(&mut db.ex().await.unwrap()).await.unwrap();
        let app = app(Driver::new(db.clone()), test_verifier());
        Self { db, app }
    }

    /// Gets a direct executor against the database.
    async fn ex(&self) -> Executor {
        self.db.ex().await.unwrap()
    }

    /// Gets a clone of the app router.
    pub(crate) fn app(&self) -> Router {
        self.app.clone()
    }

    /// Consumes the context and transforms it into the app router.
    pub(crate) fn into_app(self) -> Router {
        self.app
    }

    /// Creates a latte-like drink titled `title` by directly modifying the backing database.
    pub(crate) async fn create_drink(&self, title: &str) -> Drink {
        db::create_drink(&mut self.ex().await, DrinkTitle::new(title).unwrap(), latte_recipe())
            .await
            .unwrap()
    }

    /// Gets all drinks by directly querying the backing database.
    pub(crate) async fn all_drinks(&self) -> Vec<Drink> {
        db::get_drinks(&mut self.ex().await).await.unwrap()
    }
}

/// Generates tests to verify that an API rejects requests without a token that grants
/// `$permission`.  `$body`, if present, is sent as the JSON payload of the requests.
macro_rules! test_requires_permission {
    ( $app:expr, $route:expr, $permission:expr $(, $body:expr)? ) => {
        /// Sends a request to the API under test, optionally authenticated with `token`.
        async fn send_auth_request(
            token: Option<String>,
        ) -> marquee_core::rest::testutils::ResponseChecker {
            let mut builder = marquee_core::rest::testutils::OneShotBuilder::new($app, $route);
            if let Some(token) = token {
                builder = builder.with_bearer_auth(token);
            }
            let body: Option<serde_json::Value> = None $( .or(Some($body)) )?;
            match body {
                Some(body) => builder.send_json(body).await,
                None => builder.send_empty().await,
            }
        }

        #[tokio::test]
        async fn test_auth_missing_token() {
            send_auth_request(None)
                .await
                .expect_status(axum::http::StatusCode::UNAUTHORIZED)
                .expect_error("Authorization header is expected")
                .await;
        }

        #[tokio::test]
        async fn test_auth_expired_token() {
            let token = marquee_jwt::testutils::TokenBuilder::default()
                .with_permissions(&[$permission])
                .expired_since(3600)
                .build();
            send_auth_request(Some(token))
                .await
                .expect_status(axum::http::StatusCode::UNAUTHORIZED)
                .expect_error("Token expired")
                .await;
        }

        #[tokio::test]
        async fn test_auth_missing_permission() {
            let token = crate::rest::testutils::token(&["get:coffee-beans"]);
            send_auth_request(Some(token))
                .await
                .expect_status(axum::http::StatusCode::FORBIDDEN)
                .expect_error("Permission not found")
                .await;
        }
    };
}

pub(crate) use test_requires_permission;
