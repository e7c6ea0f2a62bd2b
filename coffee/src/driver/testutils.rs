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

//! Test utilities for the business layer.

use crate::db;
use crate::driver::Driver;
use crate::model::{Drink, DrinkTitle, Ingredient, Recipe};
use marquee_core::db::{Db, Executor};
use std::sync::Arc;

/// Builds a one-ingredient recipe named after `name`.
pub(crate) fn recipe_for(name: &str) -> Recipe {
    Recipe::new(vec![Ingredient::new("green", name, 2).unwrap()]).unwrap()
}

/// State of a running test.
pub(crate) struct TestContext {
    /// The database backing the driver.
    db: Arc<dyn Db + Send + Sync>,

    /// The driver under test.
    driver: Driver,
}

impl TestContext {
    /// Initializes the driver using an in-memory database.
    pub(crate) async fn setup() -> Self {
        let db = Arc::from(marquee_core::db::sqlite::testutils::setup().await);
        db::init_schema(&mut db.ex().await.unwrap()).await.unwrap();
        let driver = Driver::new(db.clone());
        Self { db, driver }
    }

    /// Gets a direct executor against the database.
    async fn ex(&self) -> Executor {
        self.db.ex().await.unwrap()
    }

    /// Gets a copy of the driver in this test context.
    pub(crate) fn driver(&self) -> Driver {
        self.driver.clone()
    }

    /// Creates a drink titled `title` by directly modifying the backing database.
    ///
    /// The recipe of the drink is derived from its title with `recipe_for`.
    pub(crate) async fn create_drink(&self, title: &str) -> Drink {
        db::create_drink(&mut self.ex().await, DrinkTitle::new(title).unwrap(), recipe_for(title))
            .await
            .unwrap()
    }

    /// Gets all drinks by directly querying the backing database.
    pub(crate) async fn all_drinks(&self) -> Vec<Drink> {
        db::get_drinks(&mut self.ex().await).await.unwrap()
    }
}
